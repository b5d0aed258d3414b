//! Error types for the tablefix library.

use std::io;
use thiserror::Error;

/// Result type alias for tablefix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing buffers or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a ZIP-based document container.
    #[error("Unknown file format: not a DOCX container")]
    UnknownFormat,

    /// The ZIP package is damaged or uses unsupported features.
    #[error("Invalid package: {0}")]
    Package(String),

    /// A required package part is missing (e.g. `word/document.xml`).
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The document XML is malformed.
    #[error("XML parsing error: {0}")]
    Xml(String),
}

impl Error {
    /// Whether this error was caused by invalid input rather than an
    /// internal failure. Callers serving HTTP use this to pick between
    /// a client-error and a server-error status.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat | Error::Package(_) | Error::MissingPart(_) | Error::Xml(_)
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart("<unnamed>".to_string()),
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format: not a DOCX container");

        let err = Error::MissingPart("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing package part: word/document.xml");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(Error::UnknownFormat.is_invalid_input());
        assert!(Error::Xml("unexpected end of file".into()).is_invalid_input());
        assert!(Error::Package("corrupt central directory".into()).is_invalid_input());
    }
}
