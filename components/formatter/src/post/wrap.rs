//! Width-driven attribute re-wrapping: lines over the limit are split to
//! one attribute per line, everything else is left exactly as it is.

use crate::dom::Attribute;
use crate::options::FormatterOptions;
use crate::scan::{parse_tag_line, scan_attributes, TagLine};

/// Re-wrap every over-length tag line. Lines that fit, lines that are
/// not tag-opens and always-inline tags pass through untouched.
pub fn wrap_long_lines(text: &str, options: &FormatterOptions, indent_unit: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in text.split('\n') {
        match wrappable(line, options) {
            Some(tag) => out.extend(wrap_tag(
                &tag,
                indent_unit,
                options.sort_attributes,
                options.close_bracket_on_own_line,
            )),
            None => out.push(line.to_string()),
        }
    }

    out.join("\n")
}

fn wrappable<'a>(line: &'a str, options: &FormatterOptions) -> Option<TagLine<'a>> {
    if line.trim_end().chars().count() <= options.max_line_length {
        return None;
    }
    let tag = parse_tag_line(line)?;
    if options.is_inline_tag(tag.name) || scan_attributes(tag.attr_src).is_empty() {
        return None;
    }
    Some(tag)
}

/// The shared wrap primitive: tag name alone on the first line, one
/// attribute per line one level deeper, closing bracket per
/// `close_on_own_line`, same-line trailing content re-attached after the
/// bracket.
pub fn wrap_tag(
    tag: &TagLine<'_>,
    indent_unit: &str,
    sort: bool,
    close_on_own_line: bool,
) -> Vec<String> {
    let mut attributes = scan_attributes(tag.attr_src);
    if sort {
        attributes.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let bracket = if tag.self_closing { "/>" } else { ">" };
    let attr_indent = format!("{}{}", tag.indent, indent_unit);

    let mut lines = vec![format!("{}<{}", tag.indent, tag.name)];
    for (i, attr) in attributes.iter().enumerate() {
        let last = i + 1 == attributes.len();
        let mut line = format!("{}{}", attr_indent, render(attr));
        if last && !close_on_own_line {
            line.push_str(bracket);
            line.push_str(tag.rest);
        }
        lines.push(line);
    }
    if close_on_own_line {
        lines.push(format!("{}{}{}", tag.indent, bracket, tag.rest));
    }

    lines
}

fn render(attr: &Attribute) -> String {
    let quote = attr.quote.as_char();
    format!("{}={}{}{}", attr.name, quote, attr.value, quote)
}
