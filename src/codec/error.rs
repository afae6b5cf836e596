use thiserror::Error;

/// Errors raised while reading an XML body
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    /// The body is not well-formed XML
    #[error("malformed XML document: {0}")]
    MalformedDocument(String),
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedDocument(reason.into())
    }
}

impl From<quick_xml::Error> for CodecError {
    fn from(err: quick_xml::Error) -> Self {
        CodecError::MalformedDocument(err.to_string())
    }
}
