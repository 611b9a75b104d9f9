//! Blank-line separation around configured block tags.
//!
//! Record-style elements read best with one blank line on each side.
//! The pass walks the already-formatted lines with a stack of open
//! element names, so wrapped tag-opens (`<record` with the bracket on a
//! later line) are paired with their closing form correctly.

use crate::chars::XmlByteExt;
use crate::options::FormatterOptions;
use crate::preserve::is_comment_token;
use crate::scan::parse_tag_line;

/// Ensure exactly one blank line before the opening form and after the
/// closing form of every block tag. Runs while comments are still inert
/// single-line placeholder tokens, so nothing here can land inside a
/// restored comment.
pub fn space_block_tags(text: &str, options: &FormatterOptions) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    // Name of a tag whose open bracket has not appeared yet.
    let mut pending: Option<String> = None;
    let mut blank_after_close = false;
    // The previous line opened an element that is still open; the
    // current line is its first child.
    let mut opened_on_prev_line = false;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if blank_after_close {
            blank_after_close = false;
            if !trimmed.is_empty() && !trimmed.starts_with("</") {
                out.push(String::new());
            }
        }

        if let Some(name) = pending.take() {
            out.push(line.to_string());
            if closes_inline(trimmed, &name) {
                blank_after_close = options.is_block_tag(&name);
                opened_on_prev_line = false;
            } else if trimmed.ends_with('>') {
                stack.push(name);
                opened_on_prev_line = true;
            } else {
                pending = Some(name);
                opened_on_prev_line = false;
            }
            continue;
        }

        if let Some(name) = closing_tag_name(trimmed) {
            let matching = stack.pop().map_or(false, |open| open == name);
            out.push(line.to_string());
            blank_after_close = matching && options.is_block_tag(name);
            opened_on_prev_line = false;
            continue;
        }

        match open_tag_name(trimmed) {
            Some(name) => {
                if options.is_block_tag(name)
                    && !opened_on_prev_line
                    && wants_blank_before(&out)
                {
                    out.push(String::new());
                }
                let name = name.to_string();
                out.push(line.to_string());
                match parse_tag_line(line) {
                    Some(tag) if tag.self_closing || closes_inline(trimmed, &name) => {
                        blank_after_close = options.is_block_tag(&name);
                        opened_on_prev_line = false;
                    }
                    Some(_) => {
                        stack.push(name);
                        opened_on_prev_line = true;
                    }
                    // Bracket on a later line.
                    None => {
                        pending = Some(name);
                        opened_on_prev_line = false;
                    }
                }
            }
            None => {
                out.push(line.to_string());
                opened_on_prev_line = false;
            }
        }
    }

    out.join("\n")
}

fn closing_tag_name(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix("</")?;
    let name_len = rest.bytes().take_while(|b| b.is_name_byte()).count();
    if name_len == 0 {
        return None;
    }
    Some(&rest[..name_len])
}

fn open_tag_name(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix('<')?;
    let name_len = rest.bytes().take_while(|b| b.is_name_byte()).count();
    if name_len == 0 {
        return None;
    }
    Some(&rest[..name_len])
}

/// Whether the line both opens and closes the element (`<t>x</t>` or the
/// last line of a wrapped open carrying trailing content).
fn closes_inline(trimmed: &str, name: &str) -> bool {
    trimmed.ends_with("/>") || trimmed.ends_with(&format!("</{}>", name))
}

/// A blank goes before the tag unless one is already there, the tag is
/// the first content line, the previous line opens the parent, or a
/// comment (restored or still a placeholder token) is glued to the tag
/// from above.
fn wants_blank_before(out: &[String]) -> bool {
    let Some(previous) = out.last() else {
        return false;
    };
    let previous = previous.trim();
    if previous.is_empty() || previous.ends_with("-->") || is_comment_token(previous) {
        return false;
    }
    let parent_open = previous.starts_with('<')
        && !previous.starts_with("</")
        && previous.ends_with('>')
        && !previous.ends_with("/>")
        && !previous.contains("</");
    !parent_open
}
