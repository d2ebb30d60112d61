//! Error types for the quizdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for quizdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to the user when the input is not valid JSON.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format. Please check your input.";

/// Errors that can occur while generating or reading documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not syntactically valid JSON.
    #[error("Invalid JSON format. Please check your input.")]
    Parse(#[source] serde_json::Error),

    /// The JSON is valid but does not have the expected shape.
    #[error("{0}")]
    Format(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing the ZIP package.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error reading or writing XML content.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

/// User-facing failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not valid JSON.
    Parse,
    /// Input has the wrong shape.
    Format,
    /// Anything else that failed during rendering.
    Unexpected,
}

impl Error {
    /// Classify this error for display at the form boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(_) => ErrorKind::Parse,
            Error::Format(_) => ErrorKind::Format,
            _ => ErrorKind::Unexpected,
        }
    }

    /// Human-readable message for the error notification.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Parse => INVALID_JSON_MESSAGE.to_string(),
            ErrorKind::Format => self.to_string(),
            ErrorKind::Unexpected => format!("Error: {}", self),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
