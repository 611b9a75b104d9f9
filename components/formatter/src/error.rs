use std::fmt;
use std::io;
use std::str::Utf8Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error raised while parsing or rebuilding a document.
///
/// `offset` is the byte position inside the text that was handed to the
/// failing stage, best effort: 0 when the position is unknown.
pub struct Error {
    offset: usize,
    reason: Reason,
}

impl Error {
    pub fn new(offset: usize, reason: Reason) -> Self {
        Self { offset, reason }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// Wrap an adapter/validator error for the public `format` boundary.
    pub(crate) fn into_format_failure(self) -> Self {
        let message = self.reason.message();
        Self {
            offset: self.offset,
            reason: Reason::FormatFailed(message),
        }
    }

    pub(crate) fn from_xml(err: quick_xml::Error, offset: usize) -> Self {
        match err {
            quick_xml::Error::Io(err) => Self::new(offset, Reason::Io(err)),
            quick_xml::Error::Utf8(err) => Self::new(offset, Reason::Utf8(err)),
            quick_xml::Error::UnexpectedEof(_) => Self::new(offset, Reason::UnexpectedEof),
            quick_xml::Error::EndEventMismatch { expected, found } => {
                Self::new(offset, Reason::EndEventMismatch { expected, found })
            }
            quick_xml::Error::UnexpectedToken(token) => {
                Self::new(offset, Reason::UnexpectedToken(token))
            }
            quick_xml::Error::UnexpectedBang => Self::new(offset, Reason::InvalidBang),
            quick_xml::Error::TextNotFound => Self::new(offset, Reason::UnexpectedEof),
            quick_xml::Error::XmlDeclWithoutVersion(_) => {
                Self::new(offset, Reason::XmlDeclWithoutVersion)
            }
            quick_xml::Error::NameWithQuote(pos) => Self::new(offset + pos, Reason::NameWithQuote),
            quick_xml::Error::NoEqAfterName(pos) => Self::new(offset + pos, Reason::NoEqAfterName),
            quick_xml::Error::UnquotedValue(pos) => Self::new(offset + pos, Reason::UnquotedValue),
            quick_xml::Error::DuplicatedAttribute(pos, other) => {
                Self::new(offset + pos, Reason::DuplicatedAttribute(offset + other))
            }
            quick_xml::Error::EscapeError(_) => Self::new(offset, Reason::InvalidEntity),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason.message())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("offset", &self.offset)
            .field("message", &self.reason.message())
            .finish()
    }
}

impl std::error::Error for Error {}

pub enum Reason {
    // general
    Io(io::Error),

    // not-wf
    Utf8(Utf8Error),
    UnexpectedEof,
    EndEventMismatch { expected: String, found: String },
    UnexpectedToken(String),
    InvalidBang,
    XmlDeclWithoutVersion,
    NameWithQuote,
    NoEqAfterName,
    UnquotedValue,
    DuplicatedAttribute(usize),
    InvalidEntity,
    UnexpectedDocType,
    UnexpectedDecl,
    MultipleRoots,
    NoRootElement,
    TrailingContent,

    // public `format` boundary
    FormatFailed(String),
}

impl Reason {
    pub fn message(&self) -> String {
        match self {
            Reason::Io(err) => format!("I/O error: {}", err),
            Reason::Utf8(err) => format!("UTF-8 error: {}", err),
            Reason::UnexpectedEof => "unexpected end of file".to_string(),
            Reason::EndEventMismatch { expected, found } => {
                format!("expected </{}> but got </{}>", expected, found)
            }
            Reason::UnexpectedToken(token) => format!("unexpected token: {:?}", token),
            Reason::InvalidBang => "invalid bang".to_string(),
            Reason::XmlDeclWithoutVersion => {
                "first attribute of xml decl must be the version".to_string()
            }
            Reason::NameWithQuote => "attribute name contains quote".to_string(),
            Reason::NoEqAfterName => "missing `=` after attribute name".to_string(),
            Reason::UnquotedValue => "missing quotes around attribute value".to_string(),
            Reason::DuplicatedAttribute(other) => {
                format!("attribute already exists at {}", other)
            }
            Reason::InvalidEntity => "unknown or invalid entity".to_string(),
            Reason::UnexpectedDocType => "unexpected doctype".to_string(),
            Reason::UnexpectedDecl => "xml decl not at start of file".to_string(),
            Reason::MultipleRoots => "more than one root element".to_string(),
            Reason::NoRootElement => "no root element found".to_string(),
            Reason::TrailingContent => "trailing content after root element".to_string(),
            Reason::FormatFailed(message) => format!("XML formatting failed: {}", message),
        }
    }
}
