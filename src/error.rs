//! Error types for bboxgen library.

use std::io;
use thiserror::Error;

/// Result type alias for bboxgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating annotations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document metadata is missing, unreadable or lacks a required key.
    #[error("Invalid document metadata: {0}")]
    Metadata(String),

    /// The pdf2xml output could not be parsed.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// An external tool could not be run or reported failure.
    #[error("External tool `{0}` failed: {1}")]
    Tool(String, String),

    /// Error writing the annotation table.
    #[error("Annotation output error: {0}")]
    Output(String),

    /// The batch directory is missing or cannot be scanned.
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Metadata(err.to_string())
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

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(e) => Error::Io(e),
                other => Error::Output(format!("{:?}", other)),
            }
        } else {
            Error::Output(err.to_string())
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::InvalidBatch(err.to_string())
    }
}
