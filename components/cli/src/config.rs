//! Project-local configuration: a `.odxfmtrc` JSON file searched from
//! the working directory upward. Flags given on the command line win
//! over rc values, rc values win over defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use odx_formatter::{FormatterOptions, IndentKind};

pub const RC_FILE_NAME: &str = ".odxfmtrc";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RcFile {
    pub tab_size: Option<usize>,
    pub use_tabs: Option<bool>,
    pub max_line_length: Option<usize>,
    pub align_attributes: Option<bool>,
    pub sort_attributes: Option<bool>,
    pub empty_element_handling: Option<EmptyElementHandling>,
    pub close_tag_on_new_line: Option<bool>,
    pub preserve_comments: Option<bool>,
    pub maximum_blank_lines: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyElementHandling {
    SelfClosing,
    Expand,
}

impl RcFile {
    pub fn apply(&self, options: &mut FormatterOptions) {
        if let Some(size) = self.tab_size {
            options.indent_size = size;
        }
        if let Some(tabs) = self.use_tabs {
            options.indent_kind = if tabs { IndentKind::Tabs } else { IndentKind::Spaces };
        }
        if let Some(max) = self.max_line_length {
            options.max_line_length = max;
        }
        if let Some(align) = self.align_attributes {
            options.format_attributes = align;
        }
        if let Some(sort) = self.sort_attributes {
            options.sort_attributes = sort;
        }
        if let Some(handling) = self.empty_element_handling {
            options.self_closing = handling == EmptyElementHandling::SelfClosing;
        }
        if let Some(own_line) = self.close_tag_on_new_line {
            options.close_bracket_on_own_line = own_line;
        }
        if let Some(preserve) = self.preserve_comments {
            options.preserve_comments = preserve;
        }
        if let Some(max) = self.maximum_blank_lines {
            options.max_blank_lines = max;
        }
    }
}

/// Find and parse the nearest rc file. A missing file is not an error;
/// an unreadable or malformed one is.
pub fn load(start: &Path) -> Result<Option<RcFile>, String> {
    for dir in start.ancestors() {
        let candidate = dir.join(RC_FILE_NAME);
        if candidate.is_file() {
            let raw = fs::read_to_string(&candidate)
                .map_err(|err| format!("{}: {}", candidate.display(), err))?;
            let rc: RcFile = serde_json::from_str(&raw)
                .map_err(|err| format!("{}: {}", candidate.display(), err))?;
            return Ok(Some(rc));
        }
    }
    Ok(None)
}
