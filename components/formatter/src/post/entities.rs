//! Entity decoding with author-friendly quote style.
//!
//! Odoo domain and XPath expressions live in attributes and read much
//! better as `[@name='x']` than `[@name=&apos;x&apos;]`. A single quote
//! needs no escaping inside a double-quoted value, and a value full of
//! escaped double quotes reads better re-wrapped in single quotes. Text
//! between tags needs neither entity at all.

use memchr::{memchr, memchr3, memmem};

/// Decode `&apos;`/`&quot;` wherever the escaping is unnecessary.
/// Comments and CDATA sections are copied verbatim.
pub fn decode_entities(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut at = 0;

    while at < bytes.len() {
        if bytes[at] == b'<' {
            if text[at..].starts_with("<!--") {
                at = copy_until(text, at, "-->", &mut out);
            } else if text[at..].starts_with("<![CDATA[") {
                at = copy_until(text, at, "]]>", &mut out);
            } else {
                at = copy_tag(text, at, &mut out);
            }
        } else {
            let end = memchr(b'<', &bytes[at..]).map_or(bytes.len(), |e| at + e);
            push_decoded_text(&text[at..end], &mut out);
            at = end;
        }
    }

    out
}

fn copy_until(text: &str, start: usize, terminator: &str, out: &mut String) -> usize {
    let end = memmem::find(text[start..].as_bytes(), terminator.as_bytes())
        .map_or(text.len(), |e| start + e + terminator.len());
    out.push_str(&text[start..end]);
    end
}

/// Copy one tag, rewriting each quoted attribute value on the way.
fn copy_tag(text: &str, start: usize, out: &mut String) -> usize {
    let bytes = text.as_bytes();
    let mut at = start;

    while at < bytes.len() {
        let Some(step) = memchr3(b'>', b'"', b'\'', &bytes[at..]) else {
            out.push_str(&text[at..]);
            return bytes.len();
        };
        out.push_str(&text[at..at + step]);
        at += step;

        match bytes[at] {
            b'>' => {
                out.push('>');
                return at + 1;
            }
            quote => {
                let value_start = at + 1;
                let Some(len) = memchr(quote, &bytes[value_start..]) else {
                    out.push_str(&text[at..]);
                    return bytes.len();
                };
                push_attr_value(&text[value_start..value_start + len], quote, out);
                at = value_start + len + 1;
            }
        }
    }

    at
}

fn push_attr_value(value: &str, quote: u8, out: &mut String) {
    if quote == b'"' {
        let decoded = value.replace("&apos;", "'");
        if value.contains("&quot;") && !decoded.contains('\'') {
            // Escaped double quotes and no single quote in the way:
            // single-quote the value and unescape.
            out.push('\'');
            out.push_str(&decoded.replace("&quot;", "\""));
            out.push('\'');
        } else {
            out.push('"');
            out.push_str(&decoded);
            out.push('"');
        }
    } else {
        out.push('\'');
        out.push_str(&value.replace("&quot;", "\""));
        out.push('\'');
    }
}

fn push_decoded_text(text: &str, out: &mut String) {
    out.push_str(&text.replace("&apos;", "'").replace("&quot;", "\""));
}
