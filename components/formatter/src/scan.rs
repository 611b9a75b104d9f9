//! Quote-aware, fail-soft scanning of raw tag text.
//!
//! This is deliberately not an XML grammar: it reads whatever it can
//! make sense of and stops silently at the first unparsable position.
//! Good enough for re-wrapping lines the real parser already accepted.

use crate::chars::XmlByteExt;
use crate::dom::{Attribute, Quote};

/// Parse `name="value"` pairs out of raw attribute text, keeping the
/// quote character of each value. A value cannot contain its own
/// delimiting quote; the other quote kind passes through verbatim.
pub fn scan_attributes(src: &str) -> Vec<Attribute> {
    let bytes = src.as_bytes();
    let mut attributes = Vec::new();
    let mut at = 0;

    loop {
        while bytes.get(at).is_some_and(|b| b.is_xml_whitespace()) {
            at += 1;
        }
        let name_start = at;
        while bytes.get(at).is_some_and(|b| b.is_name_byte()) {
            at += 1;
        }
        if at == name_start {
            break;
        }
        let name = &src[name_start..at];

        while bytes.get(at).is_some_and(|b| b.is_xml_whitespace()) {
            at += 1;
        }
        if bytes.get(at) != Some(&b'=') {
            break;
        }
        at += 1;
        while bytes.get(at).is_some_and(|b| b.is_xml_whitespace()) {
            at += 1;
        }

        let quote = match bytes.get(at) {
            Some(b'"') => Quote::Double,
            Some(b'\'') => Quote::Single,
            _ => break,
        };
        at += 1;
        let value_start = at;
        let Some(len) = memchr::memchr(quote.as_char() as u8, &bytes[at..]) else {
            break;
        };
        attributes.push(Attribute::new(name, &src[value_start..at + len], quote));
        at += len + 1;
    }

    attributes
}

/// A single source line holding a complete tag-open (or self-closing
/// tag), split into its parts.
#[derive(Debug, PartialEq, Eq)]
pub struct TagLine<'a> {
    pub indent: &'a str,
    pub name: &'a str,
    /// Raw text between the tag name and the closing bracket.
    pub attr_src: &'a str,
    pub self_closing: bool,
    /// Whatever follows the `>` on the same line (`text</tag>` and the
    /// like). Re-attached unchanged after wrapping.
    pub rest: &'a str,
}

/// Split a line of the form `<name attrs...>rest` / `<name attrs.../>`.
/// Returns `None` for anything else (closing tags, comments, tags spread
/// over several lines) — callers skip those lines.
pub fn parse_tag_line(line: &str) -> Option<TagLine<'_>> {
    let bytes = line.as_bytes();
    let indent_len = bytes
        .iter()
        .take_while(|b| b.is_xml_whitespace())
        .count();

    if bytes.get(indent_len) != Some(&b'<') {
        return None;
    }
    let name_start = indent_len + 1;
    let mut at = name_start;
    while bytes.get(at).is_some_and(|b| b.is_name_byte()) {
        at += 1;
    }
    if at == name_start {
        return None;
    }
    let name_end = at;

    // Find the bracket that closes this tag, honouring quoted values.
    let mut quote: Option<u8> = None;
    let mut bracket = None;
    while let Some(&b) = bytes.get(at) {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => {
                    bracket = Some(at);
                    break;
                }
                _ => {}
            },
        }
        at += 1;
    }
    let bracket = bracket?;

    let self_closing = bytes[..bracket].last() == Some(&b'/');
    let attr_end = if self_closing { bracket - 1 } else { bracket };

    Some(TagLine {
        indent: &line[..indent_len],
        name: &line[name_start..name_end],
        attr_src: &line[name_end..attr_end],
        self_closing,
        rest: &line[bracket + 1..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_simple_attributes() {
        let attrs = scan_attributes(r#" id="a" model="ir.model""#);
        assert_eq!(2, attrs.len());
        assert_eq!("id", attrs[0].name);
        assert_eq!("a", attrs[0].value);
        assert_eq!(Quote::Double, attrs[0].quote);
    }

    #[test]
    fn keeps_single_quote_values() {
        let attrs = scan_attributes(r#" expr="//button[@name='action_close']" position="before""#);
        assert_eq!(2, attrs.len());
        assert_eq!("//button[@name='action_close']", attrs[0].value);
        assert_eq!(Quote::Double, attrs[0].quote);
    }

    #[test]
    fn keeps_double_quotes_inside_single_quoted_value() {
        let attrs = scan_attributes(r#" expr='//field[@name="x"]'"#);
        assert_eq!(1, attrs.len());
        assert_eq!(r#"//field[@name="x"]"#, attrs[0].value);
        assert_eq!(Quote::Single, attrs[0].quote);
    }

    #[test]
    fn domain_expression_with_brackets_and_operators() {
        let attrs =
            scan_attributes(r#" attrs="{'invisible': [('state', '!=', 'done')]}" class="btn""#);
        assert_eq!(2, attrs.len());
        assert_eq!("{'invisible': [('state', '!=', 'done')]}", attrs[0].value);
    }

    #[test]
    fn stops_at_unparsable_position() {
        let attrs = scan_attributes(r#" id="a" broken=noquote id2="b""#);
        assert_eq!(1, attrs.len());
        assert_eq!("id", attrs[0].name);
    }

    #[test]
    fn empty_input() {
        assert!(scan_attributes("").is_empty());
        assert!(scan_attributes("   ").is_empty());
    }

    #[test]
    fn parses_open_tag_line() {
        let tag = parse_tag_line(r#"    <record id="a" model="m">"#).unwrap();
        assert_eq!("    ", tag.indent);
        assert_eq!("record", tag.name);
        assert_eq!(r#" id="a" model="m""#, tag.attr_src);
        assert!(!tag.self_closing);
        assert_eq!("", tag.rest);
    }

    #[test]
    fn parses_self_closing_with_rest() {
        let tag = parse_tag_line(r#"<field name="x"/>tail"#).unwrap();
        assert!(tag.self_closing);
        assert_eq!("tail", tag.rest);
        assert_eq!(r#" name="x""#, tag.attr_src);
    }

    #[test]
    fn bracket_inside_quotes_is_content() {
        let tag = parse_tag_line(r#"<field domain="[('a','>',1)]"/>"#).unwrap();
        assert_eq!(r#" domain="[('a','>',1)]""#, tag.attr_src);
        assert!(tag.self_closing);
    }

    #[test]
    fn rejects_non_tag_lines() {
        assert!(parse_tag_line("plain text").is_none());
        assert!(parse_tag_line("</record>").is_none());
        assert!(parse_tag_line("<!-- comment -->").is_none());
        // Tag spread over several lines: no closing bracket here.
        assert!(parse_tag_line("<record id=\"a\"").is_none());
    }
}
