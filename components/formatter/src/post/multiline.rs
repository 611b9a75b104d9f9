//! Detection and reapplication of a hand-authored multi-line attribute
//! style.
//!
//! Documents that already spread attributes across lines carry deep
//! indentation and bare `name="value"` lines. When the source looks like
//! that, the rebuild uses a fixed 4-space indent and over-length tags of
//! a few expression-heavy kinds are re-expanded to one attribute per
//! line. Best effort by design; a wrong guess produces valid single-line
//! output, nothing worse.

use crate::chars::{XmlByteExt, XmlStrExt};
use crate::options::FormatterOptions;
use crate::post::wrap::wrap_tag;
use crate::scan::{parse_tag_line, scan_attributes, TagLine};

/// Indent unit forced on the builder once [`detect`] fires.
pub const FORCED_INDENT: &str = "    ";

/// Whether the original main content already hand-formats attributes
/// across lines: any line with 8+ leading spaces, or a bare attribute
/// line at 4+ leading spaces.
pub fn detect(original_main: &str) -> bool {
    original_main.split('\n').any(|line| {
        let depth = line.leading_spaces();
        depth >= 8 || (depth >= 4 && bare_attribute(line.trim_start()))
    })
}

/// `name="..."` / `name='...'` with nothing before it on the line.
fn bare_attribute(trimmed: &str) -> bool {
    let bytes = trimmed.as_bytes();
    let name_len = bytes.iter().take_while(|b| b.is_name_byte()).count();
    if name_len == 0 {
        return false;
    }
    matches!(bytes.get(name_len), Some(b'='))
        && matches!(bytes.get(name_len + 1), Some(b'"') | Some(b'\''))
}

/// Re-expand over-length lines of the configured tag kinds to one
/// attribute per line. Runs only when [`detect`] fired on the source.
pub fn reexpand(text: &str, options: &FormatterOptions, indent_unit: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in text.split('\n') {
        match expandable(line, options) {
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

fn expandable<'a>(line: &'a str, options: &FormatterOptions) -> Option<TagLine<'a>> {
    if line.trim_end().chars().count() <= options.max_line_length {
        return None;
    }
    let tag = parse_tag_line(line)?;
    if !options.is_multiline_tag(tag.name) || scan_attributes(tag.attr_src).is_empty() {
        return None;
    }
    Some(tag)
}
