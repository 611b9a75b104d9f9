//! Order-preserving document tree for the parse/rebuild round trip.
//!
//! Values are stored raw, exactly as authored: attribute values keep
//! their entities and their quote character, text keeps its entities.
//! Decoding is a post-processing decision, not a parsing one.

/// Quote character around an attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub quote: Quote,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>, quote: Quote) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quote,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Raw character data, entities intact. Whitespace-only text is
    /// dropped by the reader; layout belongs to the builder.
    Text(String),
    /// Comment body without delimiters. After extraction only blank-line
    /// markers reach the tree this way.
    Comment(String),
    CData(String),
    /// Processing instruction body, `<?` and `?>` stripped.
    Pi(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The single non-whitespace text child, if the element holds
    /// nothing else. Such content is rendered inline.
    pub fn inline_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [Node::Text(text)] => Some(text),
            _ => None,
        }
    }
}
