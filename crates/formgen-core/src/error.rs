//! Error types for the design tree and asset cache.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the design tree, property encodings and asset cache.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An image or animation property string could not be parsed.
    #[error("Invalid image description '{description}': {reason}")]
    InvalidImageDescription {
        description: String,
        reason: String,
    },

    /// A property was read with an accessor that does not match its type.
    #[error("Property '{property}' is a {actual} property, not {expected}")]
    PropertyType {
        property: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// A node id does not belong to the tree it was used with.
    #[error("Node {0} is not part of this design tree")]
    UnknownNode(usize),

    /// Two different files produced the same embedded array name.
    #[error("Embedded image '{second}' conflicts with '{first}' (both map to '{array_name}')")]
    AssetNameConflict {
        first: String,
        second: String,
        array_name: String,
    },

    /// Reading an asset's source file failed.
    #[error("Unable to read '{path}': {source}")]
    AssetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
