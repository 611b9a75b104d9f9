//! Adapter "build" half: tree back to indented text.
//!
//! One indentation level per nesting depth, empty elements self-closed
//! when configured, placeholder text kept on its own line so restored
//! comments land at the right indentation.

use crate::dom::{Attribute, Element, Node};
use crate::preserve::is_comment_token;

pub struct TreeBuilder<'a> {
    indent_unit: &'a str,
    self_closing: bool,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(indent_unit: &'a str, self_closing: bool) -> Self {
        Self {
            indent_unit,
            self_closing,
        }
    }

    pub fn build(&self, root: &Element) -> String {
        let mut lines = Vec::new();
        self.element(root, 0, &mut lines);
        lines.join("\n")
    }

    fn indent(&self, depth: usize) -> String {
        self.indent_unit.repeat(depth)
    }

    fn element(&self, element: &Element, depth: usize, lines: &mut Vec<String>) {
        let open = format!(
            "{}<{}{}",
            self.indent(depth),
            element.name(),
            render_attributes(element.attributes())
        );

        if element.is_empty() {
            if self.self_closing {
                lines.push(format!("{}/>", open));
            } else {
                lines.push(format!("{}></{}>", open, element.name()));
            }
            return;
        }

        if let Some(text) = element.inline_text() {
            let trimmed = text.trim();
            if !trimmed.contains('\n') && !is_comment_token(trimmed) {
                lines.push(format!("{}>{}</{}>", open, trimmed, element.name()));
                return;
            }
        }

        lines.push(format!("{}>", open));
        for child in element.children() {
            self.node(child, depth + 1, lines);
        }
        lines.push(format!("{}</{}>", self.indent(depth), element.name()));
    }

    fn node(&self, node: &Node, depth: usize, lines: &mut Vec<String>) {
        let indent = self.indent(depth);
        match node {
            Node::Element(element) => self.element(element, depth, lines),
            Node::Text(text) => {
                for line in text.lines() {
                    let line = line.trim();
                    if !line.is_empty() {
                        lines.push(format!("{}{}", indent, line));
                    }
                }
            }
            Node::Comment(content) => lines.push(format!("{}<!--{}-->", indent, content)),
            Node::CData(content) => lines.push(format!("{}<![CDATA[{}]]>", indent, content)),
            Node::Pi(content) => lines.push(format!("{}<?{}?>", indent, content)),
        }
    }
}

fn render_attributes(attributes: &[Attribute]) -> String {
    let mut out = String::new();
    for attr in attributes {
        let quote = attr.quote.as_char();
        out.push(' ');
        out.push_str(&attr.name);
        out.push('=');
        out.push(quote);
        out.push_str(&attr.value);
        out.push(quote);
    }
    out
}
