//! Error types for the report parser.

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while parsing a test report.
#[derive(Error, Debug)]
pub enum Error {
    /// XML syntax error reported by the event source
    #[error("XML parsing error: {0}")]
    Xml(quick_xml::Error),

    /// XML attribute parsing error
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Text that does not follow the decimal number rules of the locale
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// Missing required attribute
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element the attribute was expected on
        element: String,
        /// Name of the absent attribute
        attribute: String,
    },

    /// Input ended before the document was complete
    #[error("Incomplete XML document: {0}")]
    IncompleteDocument(String),

    /// Element appearing where the document structure does not allow it
    #[error("Unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    /// Returns true for every error caused by the document content rather
    /// than by the underlying byte source.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            // quick-xml shares the source error; recover it so callers can
            // still tell read failures apart from bad content.
            quick_xml::Error::Io(io_err) => Error::Io(
                Arc::try_unwrap(io_err)
                    .unwrap_or_else(|shared| io::Error::new(shared.kind(), shared.to_string())),
            ),
            other => Error::Xml(other),
        }
    }
}

/// Result type alias for report parsing operations.
pub type Result<T> = std::result::Result<T, Error>;
