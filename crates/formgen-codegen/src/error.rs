//! Error types for code generation.

use formgen_core::CoreError;
use thiserror::Error;

use crate::language::GenLang;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that abort generation of a form.
///
/// Anything recoverable (an unsupported node, a missing image) is recorded as a
/// warning instead and never surfaces here.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Design tree or asset cache failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A collection pass failed, leaving the context partially populated.
    #[error("The {pass} pass failed: {source}")]
    CollectionPass {
        pass: &'static str,
        #[source]
        source: Box<CodegenError>,
    },

    /// The node passed to the generator is not a form.
    #[error("'{0}' is not a form")]
    NotAForm(String),

    /// No backend is compiled in for this language.
    #[error("No {0} code generator is available")]
    UnsupportedLanguage(GenLang),

    /// Options could not be parsed.
    #[error("Invalid generation options: {0}")]
    Options(#[from] serde_json::Error),
}
