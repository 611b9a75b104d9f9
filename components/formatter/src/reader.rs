//! Adapter "parse" half: quick-xml events to the order-preserving tree.
//!
//! quick-xml is treated as the off-the-shelf parser; everything fragile
//! (comments, blank runs) has been replaced by inert placeholders before
//! the text gets here. Raw bytes are kept raw — no entity decoding.

use std::str::from_utf8;

use quick_xml::events::{BytesStart, Event};

use crate::chars::XmlStrExt;
use crate::dom::{Element, Node};
use crate::error::{Error, Reason, Result};
use crate::scan::scan_attributes;

pub struct TreeReader<'r> {
    reader: quick_xml::Reader<&'r [u8]>,
}

impl<'r> TreeReader<'r> {
    pub fn new(text: &'r str) -> Self {
        let mut reader = quick_xml::Reader::from_reader(text.as_bytes());
        reader.check_end_names(true);
        reader.check_comments(false);
        reader.trim_text(false);
        reader.trim_markup_names_in_closing_tags(true);
        Self { reader }
    }

    fn error(&self, reason: Reason) -> Error {
        Error::new(self.reader.buffer_position(), reason)
    }

    fn conv_utf8<'a>(&self, bytes: &'a [u8]) -> Result<&'a str> {
        from_utf8(bytes).map_err(|err| self.error(Reason::Utf8(err)))
    }

    fn create_element(&self, start: &BytesStart) -> Result<Element> {
        let name = self.conv_utf8(start.name())?;
        let attr_src = self.conv_utf8(start.attributes_raw())?;
        Ok(Element::new(name, scan_attributes(attr_src)))
    }

    fn text_node(&self, bytes: &[u8]) -> Result<Option<Node>> {
        let text = self.conv_utf8(bytes)?;
        if text.only_xml_whitespace() {
            Ok(None)
        } else {
            Ok(Some(Node::Text(text.to_string())))
        }
    }

    /// Parse the working text into its root element. Fails on anything
    /// malformed instead of silently dropping content.
    pub fn parse(mut self) -> Result<Element> {
        let mut buffer: Vec<u8> = Vec::with_capacity(1024);
        let mut stack: Vec<Element> = Vec::with_capacity(16);
        let mut root: Option<Element> = None;

        loop {
            let offset = self.reader.buffer_position();
            let evt = self
                .reader
                .read_event(&mut buffer)
                .map_err(|err| Error::from_xml(err, offset))?;

            match evt {
                Event::Start(start) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(self.error(Reason::MultipleRoots));
                    }
                    let element = self.create_element(&start)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = self.create_element(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(Node::Element(element)),
                        None if root.is_none() => root = Some(element),
                        None => return Err(self.error(Reason::MultipleRoots)),
                    }
                }
                Event::End(_) => {
                    // Name mismatches are quick-xml's job (check_end_names).
                    let element = match stack.pop() {
                        Some(element) => element,
                        None => return Err(self.error(Reason::TrailingContent)),
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(Node::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(text) => {
                    if let Some(node) = self.text_node(text.as_ref())? {
                        match stack.last_mut() {
                            Some(parent) => parent.push_child(node),
                            None => return Err(self.error(Reason::TrailingContent)),
                        }
                    }
                }
                Event::Comment(text) => {
                    let content = self.conv_utf8(text.as_ref())?.to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.push_child(Node::Comment(content));
                    }
                    // A comment outside the root is prefix/suffix
                    // territory and never reaches this reader.
                }
                Event::CData(text) => {
                    // quick-xml hands CDATA content escaped; the section
                    // bytes must come back verbatim.
                    let raw = text
                        .unescaped()
                        .map_err(|err| Error::from_xml(err, offset))?;
                    let content = self.conv_utf8(raw.as_ref())?.to_string();
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(Node::CData(content)),
                        None => return Err(self.error(Reason::TrailingContent)),
                    }
                }
                Event::PI(text) => {
                    let content = self.conv_utf8(text.as_ref())?.to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.push_child(Node::Pi(content));
                    }
                }
                Event::Decl(_) => return Err(self.error(Reason::UnexpectedDecl)),
                Event::DocType(_) => return Err(self.error(Reason::UnexpectedDocType)),
                Event::Eof => break,
            }
            buffer.clear();
        }

        if !stack.is_empty() {
            return Err(self.error(Reason::UnexpectedEof));
        }
        root.ok_or_else(|| self.error(Reason::NoRootElement))
    }
}
