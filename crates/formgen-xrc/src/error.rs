//! Error types for XRC generation.

use formgen_core::CoreError;
use thiserror::Error;

/// Result type alias for XRC operations.
pub type Result<T> = std::result::Result<T, XrcError>;

/// Errors raised while building or serializing an XRC document.
#[derive(Error, Debug)]
pub enum XrcError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The node passed to the generator is not a form or the project.
    #[error("'{0}' is not a form")]
    NotAForm(String),

    /// quick-xml failed to write the document.
    #[error("Unable to write XML: {0}")]
    Xml(String),

    #[error("Generated XML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
