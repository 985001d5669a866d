//! Error types for project generation.

use std::path::PathBuf;

use formgen_codegen::CodegenError;
use formgen_core::CoreError;
use formgen_xrc::XrcError;
use thiserror::Error;

/// Result type alias for project generation.
pub type Result<T> = std::result::Result<T, FormgenError>;

#[derive(Error, Debug)]
pub enum FormgenError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Xrc(#[from] XrcError),

    /// Reading or writing an output file failed.
    #[error("Unable to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
