/// Whether indentation uses spaces or tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentKind {
    Spaces,
    Tabs,
}

/// Formatting configuration. Built once per `format` call and never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct FormatterOptions {
    pub indent_size: usize,
    pub indent_kind: IndentKind,
    pub max_line_length: usize,
    /// Re-wrap over-length tag lines to one attribute per line.
    pub format_attributes: bool,
    /// Stable ordinal sort of attribute names inside wrapped tags.
    pub sort_attributes: bool,
    /// Emit `<tag/>` for empty elements instead of `<tag></tag>`.
    pub self_closing: bool,
    /// Put the closing `>`/`/>` of a wrapped tag on its own line.
    pub close_bracket_on_own_line: bool,
    pub preserve_comments: bool,
    /// Cap on consecutive blank lines restored into the output body.
    pub max_blank_lines: usize,
    /// Surround the tags below with one blank line on each side.
    pub block_tag_spacing: bool,
    pub block_tag_names: Vec<String>,
    /// Tags that are never split across lines, whatever their length.
    pub inline_tag_names: Vec<String>,
    /// Tags re-expanded to one attribute per line when the source already
    /// used a hand-authored multi-line attribute style.
    pub multiline_tag_names: Vec<String>,
}

impl FormatterOptions {
    /// Indentation string for one nesting level.
    pub fn indent_unit(&self) -> String {
        match self.indent_kind {
            IndentKind::Tabs => "\t".to_string(),
            IndentKind::Spaces => " ".repeat(self.indent_size),
        }
    }

    pub fn is_inline_tag(&self, name: &str) -> bool {
        self.inline_tag_names.iter().any(|t| t == name)
    }

    pub fn is_block_tag(&self, name: &str) -> bool {
        self.block_tag_names.iter().any(|t| t == name)
    }

    pub fn is_multiline_tag(&self, name: &str) -> bool {
        self.multiline_tag_names.iter().any(|t| t == name)
    }
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            indent_kind: IndentKind::Spaces,
            max_line_length: 120,
            format_attributes: false,
            sort_attributes: false,
            self_closing: true,
            close_bracket_on_own_line: false,
            preserve_comments: true,
            max_blank_lines: 1,
            block_tag_spacing: true,
            block_tag_names: names(&["record", "menuitem", "template"]),
            inline_tag_names: names(&["attribute"]),
            multiline_tag_names: names(&["record", "field", "xpath", "menuitem", "button"]),
        }
    }
}
