//! The formatting pipeline. Each stage is small and testable on its
//! own; this module only fixes their order:
//!
//! segment → comment vault → blank-run vault → parse → build →
//! declaration/entity/wrap/multiline rewrites → blank restoration →
//! block-tag spacing → comment restoration → re-join → finalize.
//!
//! Spacing runs before comment restoration on purpose: comments are
//! still single-line placeholder tokens there, so the pass cannot put a
//! blank line inside a restored comment body.

use crate::builder::TreeBuilder;
use crate::error::Result;
use crate::options::FormatterOptions;
use crate::post;
use crate::post::multiline;
use crate::preserve::{
    cap_margin_blank_lines, collapse_blank_lines, extract_comments, restore_blank_lines,
    restore_comments,
};
use crate::reader::TreeReader;
use crate::segment::Segment;

pub fn run(text: &str, options: &FormatterOptions) -> Result<String> {
    let segment = Segment::split(text);

    let (stripped, comments) = extract_comments(segment.main);
    let collapsed = collapse_blank_lines(&stripped);
    let root = TreeReader::new(&collapsed).parse()?;

    // A hand-formatted source fixes the indent for the whole rebuild.
    let hand_formatted = multiline::detect(segment.main);
    let indent_unit = if hand_formatted {
        multiline::FORCED_INDENT.to_string()
    } else {
        options.indent_unit()
    };

    let mut main = TreeBuilder::new(&indent_unit, options.self_closing).build(&root);
    main = post::entities::decode_entities(&main);
    if options.format_attributes {
        main = post::wrap::wrap_long_lines(&main, options, &indent_unit);
    }
    if hand_formatted {
        main = multiline::reexpand(&main, options, &indent_unit);
    }
    main = restore_blank_lines(&main, options.max_blank_lines);
    if options.block_tag_spacing {
        main = post::spacing::space_block_tags(&main, options);
    }
    main = restore_comments(&main, &comments, options.preserve_comments);

    let prefix = cap_margin(segment.prefix, options);
    let suffix = cap_margin(segment.suffix, options);
    let mut joined = post::normalize_declaration(&prefix)
        .trim_end()
        .to_string();
    if !joined.is_empty() {
        joined.push('\n');
    }
    joined.push_str(&main);
    joined.push_str(&suffix);

    Ok(post::finalize(&joined))
}

/// Margins bypass the builder but still honour the blank-line cap.
/// Their comments are tokenized first, so the cap never sees blank
/// lines inside a comment body.
fn cap_margin(text: &str, options: &FormatterOptions) -> String {
    let (stripped, comments) = extract_comments(text);
    let capped = cap_margin_blank_lines(&stripped, options.max_blank_lines);
    restore_comments(&capped, &comments, options.preserve_comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(text: &str, options: &FormatterOptions) -> String {
        run(text, options).unwrap()
    }

    #[test]
    fn reindents_a_flat_document() {
        let options = FormatterOptions::default();
        let out = format("<odoo><data><field name=\"x\"/></data></odoo>", &options);
        assert_eq!("<odoo>\n  <data>\n    <field name=\"x\"/>\n  </data>\n</odoo>\n", out);
    }

    #[test]
    fn declaration_survives_on_its_own_line() {
        let options = FormatterOptions::default();
        let out = format("<?xml   version=\"1.0\"  encoding=\"utf-8\"?><root><a/></root>", &options);
        assert_eq!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root>\n  <a/>\n</root>\n",
            out
        );
    }

    #[test]
    fn comments_come_back_byte_identical() {
        let options = FormatterOptions::default();
        let text = "<root>\n  <!-- keep <this  exactly=' -->\n  <a/>\n</root>\n";
        let out = format(text, &options);
        assert!(out.contains("<!-- keep <this  exactly=' -->"));
    }

    #[test]
    fn blank_lines_capped() {
        let options = FormatterOptions::default();
        let out = format("<root>\n<a/>\n\n\n\n<b/>\n</root>\n", &options);
        assert_eq!("<root>\n  <a/>\n\n  <b/>\n</root>\n", out);
    }

    #[test]
    fn hand_formatted_source_forces_four_space_indent() {
        let options = FormatterOptions::default();
        let text = "<odoo>\n    <data>\n        <field name=\"x\"/>\n    </data>\n</odoo>\n";
        assert_eq!(text, format(text, &options));
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let options = FormatterOptions {
            format_attributes: true,
            sort_attributes: true,
            max_line_length: 60,
            ..FormatterOptions::default()
        };
        let text = "<odoo><record id=\"view_partner\" model=\"ir.ui.view\"><field name=\"arch\" type=\"xml\"><!-- body --></field></record></odoo>";
        let once = format(text, &options);
        assert_eq!(once, format(&once, &options));
    }

    #[test]
    fn suffix_kept_verbatim() {
        let options = FormatterOptions::default();
        let out = format("<root><a/></root>\n<!-- trailer -->\n", &options);
        assert!(out.ends_with("</root>\n<!-- trailer -->\n"));
    }

    #[test]
    fn malformed_input_is_an_error() {
        let options = FormatterOptions::default();
        assert!(run("<a><b></a>", &options).is_err());
    }
}
