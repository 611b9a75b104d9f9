use odx_formatter::{format, FormatterOptions, IndentKind};

fn fmt(text: &str, options: &FormatterOptions) -> String {
    format(text, options).unwrap()
}

#[test]
fn formatting_is_idempotent() {
    let options = FormatterOptions::default();
    let text = "<odoo>\n  <record id=\"a\" model=\"m\">\n    <field name=\"x\">1</field>\n  </record>\n\n  <record id=\"b\" model=\"m\"/>\n</odoo>\n";
    let once = fmt(text, &options);
    assert_eq!(once, fmt(&once, &options));
    assert_eq!(text, once);
}

#[test]
fn reindents_arbitrary_whitespace() {
    let options = FormatterOptions::default();
    let text = "<root>\n        <a>\n  <b/>\n        </a>\n</root>";
    assert_eq!(
        "<root>\n    <a>\n        <b/>\n    </a>\n</root>\n",
        fmt(text, &options)
    );
}

#[test]
fn blank_line_runs_are_capped() {
    let options = FormatterOptions {
        block_tag_spacing: false,
        ..FormatterOptions::default()
    };
    let text = "<root>\n<a/>\n\n\n\n\n<b/>\n</root>";
    assert_eq!("<root>\n  <a/>\n\n  <b/>\n</root>\n", fmt(text, &options));
}

#[test]
fn zero_blank_lines_allowed() {
    let options = FormatterOptions {
        max_blank_lines: 0,
        block_tag_spacing: false,
        ..FormatterOptions::default()
    };
    let text = "<root>\n<a/>\n\n\n<b/>\n\n<c/>\n</root>";
    let out = fmt(text, &options);
    assert!(!out.contains("\n\n"));
}

#[test]
fn blank_runs_in_the_prologue_are_capped() {
    let options = FormatterOptions::default();
    let out = fmt(
        "<?xml version=\"1.0\"?>\n\n\n\n<!-- header -->\n<root>\n  <a/>\n</root>\n",
        &options,
    );
    assert!(!out.contains("\n\n\n"));
    assert!(out.contains("?>\n\n<!-- header -->\n<root>"));
}

#[test]
fn single_blank_line_survives_unchanged() {
    let options = FormatterOptions {
        block_tag_spacing: false,
        ..FormatterOptions::default()
    };
    let text = "<root>\n  <a/>\n\n  <b/>\n</root>\n";
    assert_eq!(text, fmt(text, &options));
}

#[test]
fn short_tag_lines_are_never_split() {
    let options = FormatterOptions {
        format_attributes: true,
        ..FormatterOptions::default()
    };
    let text = "<root><field name=\"a\" widget=\"monetary\"/></root>";
    assert_eq!(
        "<root>\n  <field name=\"a\" widget=\"monetary\"/>\n</root>\n",
        fmt(text, &options)
    );
}

#[test]
fn long_tag_lines_wrap_one_attribute_per_line() {
    let options = FormatterOptions {
        format_attributes: true,
        max_line_length: 30,
        ..FormatterOptions::default()
    };
    let text = "<root><field name=\"partner_id\" widget=\"many2one\"/></root>";
    assert_eq!(
        "<root>\n  <field\n    name=\"partner_id\"\n    widget=\"many2one\"/>\n</root>\n",
        fmt(text, &options)
    );
}

#[test]
fn wrapped_attributes_sort_alphabetically_when_asked() {
    let options = FormatterOptions {
        format_attributes: true,
        sort_attributes: true,
        max_line_length: 20,
        ..FormatterOptions::default()
    };
    let out = fmt("<root><field widget=\"x\" name=\"a\" help=\"z\"/></root>", &options);
    let names: Vec<usize> = ["help=", "name=", "widget="]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
    assert!(names[0] < names[1] && names[1] < names[2]);
}

#[test]
fn unsorted_attributes_keep_source_order() {
    let options = FormatterOptions {
        format_attributes: true,
        max_line_length: 20,
        ..FormatterOptions::default()
    };
    let out = fmt("<root><field widget=\"x\" name=\"a\" help=\"z\"/></root>", &options);
    let names: Vec<usize> = ["widget=", "name=", "help="]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
    assert!(names[0] < names[1] && names[1] < names[2]);
}

#[test]
fn round_trip_example() {
    let options = FormatterOptions {
        indent_size: 4,
        max_line_length: 20,
        format_attributes: true,
        sort_attributes: true,
        ..FormatterOptions::default()
    };
    let out = fmt(r#"<record id="b" model="m" active="true">x</record>"#, &options);
    assert_eq!(
        "<record\n    active=\"true\"\n    id=\"b\"\n    model=\"m\">x</record>\n",
        out
    );
}

#[test]
fn quote_style_inside_attribute_values_is_preserved() {
    let options = FormatterOptions::default();
    let text = "<odoo>\n  <xpath expr=\"//field[@name='email']\" position=\"after\">\n    <field name=\"phone\"/>\n  </xpath>\n</odoo>";
    let out = fmt(text, &options);
    assert!(out.contains("[@name='email']"));
    assert!(!out.contains("&apos;"));
}

#[test]
fn tabs_as_indentation() {
    let options = FormatterOptions {
        indent_kind: IndentKind::Tabs,
        ..FormatterOptions::default()
    };
    let out = fmt("<root><a><b/></a></root>", &options);
    assert_eq!("<root>\n\t<a>\n\t\t<b/>\n\t</a>\n</root>\n", out);
}

#[test]
fn empty_elements_can_be_expanded() {
    let options = FormatterOptions {
        self_closing: false,
        ..FormatterOptions::default()
    };
    let out = fmt("<root><a/></root>", &options);
    assert_eq!("<root>\n  <a></a>\n</root>\n", out);
}

#[test]
fn output_has_no_trailing_whitespace_and_one_final_newline() {
    let options = FormatterOptions::default();
    let out = fmt("<root>   \n  <a/>   \n</root>\n\n\n", &options);
    assert!(out.ends_with("</root>\n"));
    assert!(!out.ends_with("\n\n"));
    for line in out.lines() {
        assert_eq!(line, line.trim_end());
    }
}

#[test]
fn declaration_is_normalized_onto_its_own_line() {
    let options = FormatterOptions::default();
    let out = fmt(
        "<?xml    version=\"1.0\"\n encoding=\"utf-8\"  ?><root><a/></root>",
        &options,
    );
    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root>"));
}

#[test]
fn empty_input_round_trips() {
    let options = FormatterOptions::default();
    assert_eq!("", fmt("", &options));
}

#[test]
fn malformed_input_is_rejected() {
    let options = FormatterOptions::default();
    let err = format("<a><b></a>", &options).unwrap_err();
    assert!(err.to_string().contains("XML formatting failed"));
}
