use memchr::memchr_iter;

use crate::chars::XmlByteExt;

/// A document split around its root element.
///
/// `prefix` holds everything before the first real tag (declaration,
/// doctype, leading comments and whitespace), `suffix` everything after
/// the root element closes. Both bypass the parse/rebuild round trip and
/// are re-attached verbatim at the end.
#[derive(Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub prefix: &'a str,
    pub main: &'a str,
    pub suffix: &'a str,
}

impl<'a> Segment<'a> {
    /// Split `text` by plain scanning. No nesting validation happens
    /// here; malformed structure is the validator's job.
    pub fn split(text: &'a str) -> Self {
        let start = match first_real_tag(text) {
            Some(start) => start,
            // Degenerate document without a single element.
            None => {
                return Self {
                    prefix: "",
                    main: text,
                    suffix: "",
                }
            }
        };

        let root_name = read_name(&text[start + 1..]);
        let end = match last_close_tag(&text[start..], root_name) {
            Some(end) => start + end,
            None => text.len(),
        };

        Self {
            prefix: &text[..start],
            main: &text[start..end],
            suffix: &text[end..],
        }
    }
}

/// First `<` that opens an element rather than a declaration, doctype,
/// comment or processing instruction.
fn first_real_tag(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    memchr_iter(b'<', bytes).find(|&at| !matches!(bytes.get(at + 1), Some(b'!') | Some(b'?')))
}

fn read_name(text: &str) -> &str {
    let end = text
        .bytes()
        .position(|b| !b.is_name_byte())
        .unwrap_or(text.len());
    &text[..end]
}

/// End offset (exclusive) of the last `</name>` in `text`, tolerating
/// whitespace before the closing `>`.
fn last_close_tag(text: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }

    let open = format!("</{}", name);
    for (at, _) in text.rmatch_indices(&open) {
        let rest = &text.as_bytes()[at + open.len()..];
        let extra = rest
            .iter()
            .take_while(|b| b.is_xml_whitespace())
            .count();
        if rest.get(extra) == Some(&b'>') {
            return Some(at + open.len() + extra + 1);
        }
    }
    None
}
