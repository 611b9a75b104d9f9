//! Formatter for Odoo-style XML documents.
//!
//! Reindents a document through a parse/rebuild round trip while keeping
//! the things a plain round trip would destroy: comment bytes, blank-line
//! runs, attribute quote styles. Optional passes re-wrap over-length
//! attribute lists and separate record-style elements with blank lines.
//!
//! ```
//! use odx_formatter::{format, FormatterOptions};
//!
//! let out = format("<odoo><record id=\"a\"/></odoo>", &FormatterOptions::default()).unwrap();
//! assert_eq!("<odoo>\n  <record id=\"a\"/>\n</odoo>\n", out);
//! ```

use crate::chars::XmlByteExt;
use crate::chars::XmlStrExt;

mod builder;
mod chars;
mod dom;
mod error;
mod options;
mod pipeline;
mod post;
mod preserve;
mod reader;
mod scan;
mod segment;
mod validate;

pub use crate::error::{Error, Reason, Result};
pub use crate::options::{FormatterOptions, IndentKind};
pub use crate::validate::{validate, ValidationResult};

/// Format a document. Empty and whitespace-only input comes back
/// unchanged; malformed input fails with the validator's diagnosis
/// instead of half-formatted output.
pub fn format(text: &str, options: &FormatterOptions) -> Result<String> {
    if text.only_xml_whitespace() {
        return Ok(text.to_string());
    }

    let check = validate::validate(text);
    if !check.is_valid {
        let message = check.error.unwrap_or_else(|| "document is not well-formed".to_string());
        return Err(Error::new(0, Reason::FormatFailed(message)));
    }

    pipeline::run(text, options).map_err(Error::into_format_failure)
}

/// Cheap guess whether a text is an XML document: first non-whitespace
/// byte opens a declaration or a tag. Used to skip formatting files that
/// merely share the extension.
pub fn is_likely_xml(text: &str) -> bool {
    let trimmed = text.trim_start();
    if trimmed.starts_with("<?xml") {
        return true;
    }
    let bytes = trimmed.as_bytes();
    bytes.first() == Some(&b'<')
        && bytes.get(1).is_some_and(|b| b.is_name_byte() || *b == b'!')
}
