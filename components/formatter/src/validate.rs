//! Standalone well-formedness check with best-effort error localization.
//!
//! Two tiers: a strict event walk over the whole document (attribute
//! checks forced on), then the same tree parse the formatter itself
//! uses. Whatever fails first is reported with a 1-based line/column and
//! a short excerpt of the offending line. Never panics, never returns an
//! error type: callers always get a result object.

use quick_xml::events::Event;

use crate::chars::XmlStrExt;
use crate::error::Error;
use crate::reader::TreeReader;
use crate::segment::Segment;

const EXCERPT_LIMIT: usize = 20;

/// Outcome of [`validate`]. `line`, `column` and `line_excerpt` are
/// populated on a best-effort basis and may be absent even when
/// `is_valid` is false.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub line_excerpt: Option<String>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
            line: None,
            column: None,
            line_excerpt: None,
        }
    }

    fn invalid(text: &str, offset: usize, message: String) -> Self {
        let (line, column) = match locate(text, offset) {
            Some(at) => at,
            // Position unknown: an error message sometimes carries one.
            None => (line_from_message(&message), None),
        };
        Self {
            is_valid: false,
            line_excerpt: line.map(|l| excerpt(text, l)),
            error: Some(message),
            line,
            column,
        }
    }
}

/// Check a document for well-formedness. Empty or whitespace-only text
/// is valid (there is nothing to format either).
pub fn validate(text: &str) -> ValidationResult {
    if text.only_xml_whitespace() {
        return ValidationResult::valid();
    }

    if let Err((offset, message)) = strict_walk(text) {
        return ValidationResult::invalid(text, offset, message);
    }

    // Second opinion: the exact parse the formatter will run.
    let segment = Segment::split(text);
    if segment.main.only_xml_whitespace() {
        return ValidationResult::valid();
    }
    match TreeReader::new(segment.main).parse() {
        Ok(_) => ValidationResult::valid(),
        Err(err) => {
            let offset = segment.prefix.len() + err.offset();
            ValidationResult::invalid(text, offset, err.reason().message())
        }
    }
}

/// Strict event walk over the full document, declaration included.
fn strict_walk(text: &str) -> Result<(), (usize, String)> {
    let mut reader = quick_xml::Reader::from_reader(text.as_bytes());
    reader.check_end_names(true);
    reader.check_comments(false);
    reader.trim_text(false);

    let mut buffer: Vec<u8> = Vec::with_capacity(1024);
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let offset = reader.buffer_position();
        let evt = reader
            .read_event(&mut buffer)
            .map_err(|err| xml_failure(err, offset))?;

        match evt {
            Event::Start(ref start) => {
                if depth == 0 && seen_root {
                    return Err((offset, "more than one root element".to_string()));
                }
                check_attributes(start, offset)?;
                depth += 1;
                seen_root = true;
            }
            Event::Empty(ref start) => {
                if depth == 0 && seen_root {
                    return Err((offset, "more than one root element".to_string()));
                }
                check_attributes(start, offset)?;
                seen_root = true;
            }
            Event::End(_) => {
                // Mismatches and extra closing tags are quick-xml's job.
                depth = depth.saturating_sub(1);
            }
            Event::Text(ref content) => {
                if depth == 0 {
                    let raw = std::str::from_utf8(content.as_ref())
                        .map_err(|err| (offset, format!("UTF-8 error: {}", err)))?;
                    if !raw.only_xml_whitespace() && seen_root {
                        return Err((offset, "trailing content after root element".to_string()));
                    }
                }
            }
            Event::Comment(_) | Event::CData(_) | Event::PI(_) => {}
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
        buffer.clear();
    }

    if depth != 0 {
        return Err((text.len(), "unexpected end of file".to_string()));
    }
    Ok(())
}

fn check_attributes(
    start: &quick_xml::events::BytesStart,
    offset: usize,
) -> Result<(), (usize, String)> {
    for attribute in start.attributes().with_checks(true) {
        attribute.map_err(|err| xml_failure(err, offset))?;
    }
    Ok(())
}

fn xml_failure(err: quick_xml::Error, offset: usize) -> (usize, String) {
    let err = Error::from_xml(err, offset);
    (err.offset(), err.reason().message())
}

/// 1-based line and column of a byte offset. `None` when the offset lies
/// outside the text.
fn locate(text: &str, offset: usize) -> Option<(Option<usize>, Option<usize>)> {
    if offset > text.len() {
        return None;
    }
    let before = &text.as_bytes()[..offset];
    let line = 1 + before.iter().filter(|b| **b == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |nl| nl + 1);
    Some((Some(line), Some(offset - line_start + 1)))
}

/// Trimmed content of the given 1-based line, shortened for display.
fn excerpt(text: &str, line: usize) -> String {
    let content = text.split('\n').nth(line - 1).unwrap_or("").trim();
    if content.chars().count() > EXCERPT_LIMIT {
        let cut: String = content.chars().take(EXCERPT_LIMIT).collect();
        format!("{}...", cut)
    } else {
        content.to_string()
    }
}

/// Last resort: fish a `line N` out of an error message.
fn line_from_message(message: &str) -> Option<usize> {
    let at = message.find("line ")?;
    let digits: String = message[at + 5..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
