//! Scenarios taken from day-to-day Odoo view/data files: record
//! spacing, comment fidelity, domain and XPath expressions, inline
//! `<attribute>` tags, hand-formatted multi-line attribute style.

use odx_formatter::{format, FormatterOptions};

fn fmt(text: &str, options: &FormatterOptions) -> String {
    format(text, options).unwrap()
}

fn comments(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find("<!--") {
        let end = at + rest[at..].find("-->").expect("unterminated comment") + 3;
        out.push(rest[at..end].to_string());
        rest = &rest[end..];
    }
    out
}

#[test]
fn records_are_separated_by_blank_lines() {
    let options = FormatterOptions::default();
    let text = "<odoo>\n<record id=\"a\" model=\"m\"><field name=\"x\"/></record>\n<record id=\"b\" model=\"m\"/>\n</odoo>";
    let out = fmt(text, &options);
    assert_eq!(
        "<odoo>\n  <record id=\"a\" model=\"m\">\n    <field name=\"x\"/>\n  </record>\n\n  <record id=\"b\" model=\"m\"/>\n</odoo>\n",
        out
    );
}

#[test]
fn menuitems_are_spaced_like_records() {
    let options = FormatterOptions::default();
    let text = "<odoo>\n<menuitem id=\"menu_root\" name=\"App\"/>\n<menuitem id=\"menu_sub\" parent=\"menu_root\"/>\n</odoo>";
    let out = fmt(text, &options);
    assert!(out.contains("<menuitem id=\"menu_root\" name=\"App\"/>\n\n  <menuitem id=\"menu_sub\""));
}

#[test]
fn tag_spacing_can_be_disabled() {
    let options = FormatterOptions {
        block_tag_spacing: false,
        ..FormatterOptions::default()
    };
    let text = "<odoo>\n<record id=\"a\" model=\"m\"/>\n<record id=\"b\" model=\"m\"/>\n</odoo>";
    let out = fmt(text, &options);
    assert!(!out.contains("\n\n"));
}

#[test]
fn comment_bytes_survive_formatting() {
    let options = FormatterOptions {
        format_attributes: true,
        sort_attributes: true,
        max_line_length: 40,
        ..FormatterOptions::default()
    };
    let text = concat!(
        "<odoo>\n",
        "    <!-- Partner form view -->\n",
        "    <record id=\"view_partner_form\" model=\"ir.ui.view\">\n",
        "        <field name=\"model\">res.partner</field>\n",
        "    </record>\n",
        "    <!-- intentionally <unbalanced attr=' inside -->\n",
        "    <record id=\"b\" model=\"m\"/>\n",
        "</odoo>\n",
    );
    let out = fmt(text, &options);
    assert_eq!(comments(text), comments(&out));
}

#[test]
fn comments_holding_disabled_records_stay_byte_identical() {
    let options = FormatterOptions::default();
    let text = "<odoo>\n  <!-- disabled:\n  <record id=\"a\" model=\"m\"/>\n  -->\n  <record id=\"b\" model=\"m\"/>\n</odoo>\n";
    let out = fmt(text, &options);
    assert!(out.contains("<!-- disabled:\n  <record id=\"a\" model=\"m\"/>\n  -->"));
    assert_eq!(comments(text), comments(&out));
}

#[test]
fn comments_can_be_dropped() {
    let options = FormatterOptions {
        preserve_comments: false,
        ..FormatterOptions::default()
    };
    let text = "<odoo>\n  <!-- gone -->\n  <record id=\"a\" model=\"m\"/>\n</odoo>";
    let out = fmt(text, &options);
    assert!(!out.contains("<!--"));
    assert!(out.contains("<record id=\"a\" model=\"m\"/>"));
}

#[test]
fn multi_line_comments_kept_verbatim() {
    let options = FormatterOptions::default();
    let text = "<odoo>\n  <!-- first line\n       second line -->\n  <record id=\"a\" model=\"m\"/>\n</odoo>\n";
    let out = fmt(text, &options);
    assert!(out.contains("<!-- first line\n       second line -->"));
}

#[test]
fn domain_entities_in_text_are_decoded() {
    let options = FormatterOptions::default();
    let text = "<odoo><record id=\"a\" model=\"m\"><field name=\"domain\">[(&apos;type&apos;,&apos;=&apos;,&apos;contact&apos;)]</field></record></odoo>";
    let out = fmt(text, &options);
    assert!(out.contains("[('type','=','contact')]"));
}

#[test]
fn apos_entities_in_attribute_values_are_decoded() {
    let options = FormatterOptions::default();
    let text = "<odoo><field name=\"x\" options=\"{&apos;model&apos;: &apos;res.partner&apos;}\"/></odoo>";
    let out = fmt(text, &options);
    assert!(out.contains("options=\"{'model': 'res.partner'}\""));
}

#[test]
fn quot_entities_rewrap_the_value_in_single_quotes() {
    let options = FormatterOptions::default();
    let text = "<odoo><xpath expr=\"//field[@name=&quot;email&quot;]\" position=\"after\"><field name=\"phone\"/></xpath></odoo>";
    let out = fmt(text, &options);
    assert!(out.contains("expr='//field[@name=\"email\"]'"));
}

#[test]
fn attribute_tags_stay_on_one_line() {
    let options = FormatterOptions {
        format_attributes: true,
        max_line_length: 40,
        ..FormatterOptions::default()
    };
    let text = "<odoo><xpath expr=\"//x\" position=\"attributes\"><attribute name=\"attrs\">{'invisible': [('state', '!=', 'done')]}</attribute></xpath></odoo>";
    let out = fmt(text, &options);
    assert!(out.contains(
        "<attribute name=\"attrs\">{'invisible': [('state', '!=', 'done')]}</attribute>"
    ));
}

#[test]
fn cdata_sections_pass_through_verbatim() {
    let options = FormatterOptions::default();
    let text = "<data><script><![CDATA[if (a < b) { alert(\"x&y\"); }]]></script></data>";
    let out = fmt(text, &options);
    assert!(out.contains("<![CDATA[if (a < b) { alert(\"x&y\"); }]]>"));
}

#[test]
fn hand_formatted_style_forces_four_space_indent() {
    let options = FormatterOptions::default();
    let text = "<odoo>\n    <record id=\"a\" model=\"m\">\n        <field name=\"x\">1</field>\n    </record>\n</odoo>\n";
    assert_eq!(text, fmt(text, &options));
}

#[test]
fn hand_formatted_style_reexpands_long_tags() {
    let options = FormatterOptions {
        max_line_length: 60,
        ..FormatterOptions::default()
    };
    let text = concat!(
        "<odoo>\n",
        "    <record id=\"view_sale_order_form_inherit_custom\" model=\"ir.ui.view\">\n",
        "        <field name=\"name\">sale.order.form.custom</field>\n",
        "    </record>\n",
        "</odoo>\n",
    );
    let out = fmt(text, &options);
    assert_eq!(
        concat!(
            "<odoo>\n",
            "    <record\n",
            "        id=\"view_sale_order_form_inherit_custom\"\n",
            "        model=\"ir.ui.view\">\n",
            "        <field name=\"name\">sale.order.form.custom</field>\n",
            "    </record>\n",
            "</odoo>\n",
        ),
        out
    );
    assert_eq!(out, fmt(&out, &options));
}

#[test]
fn full_view_file_round_trip() {
    let options = FormatterOptions::default();
    let text = concat!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
        "<odoo>\n",
        "  <record id=\"view_partner_form\" model=\"ir.ui.view\">\n",
        "    <field name=\"name\">res.partner.form</field>\n",
        "    <field name=\"model\">res.partner</field>\n",
        "  </record>\n",
        "\n",
        "  <menuitem id=\"menu_partner\" name=\"Partners\"/>\n",
        "</odoo>\n",
    );
    assert_eq!(text, fmt(text, &options));
}
