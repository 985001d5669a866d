//! Design tree, property encodings and asset cache for the formgen generators.
//!
//! The tree is the single input every generator reads. It is built once (from a
//! project file, an importer or [`NodeBuilder`]s in tests) and then shared read-only
//! by all the generation passes.
//!
//! # Example
//!
//! ```
//! use formgen_core::{DesignTree, GenName, NodeBuilder, PropName};
//!
//! let tree = DesignTree::new(
//!     NodeBuilder::new(GenName::Project).with_child(
//!         NodeBuilder::new(GenName::Dialog)
//!             .with_prop(PropName::ClassName, "MainDialog")
//!             .with_child(NodeBuilder::new(GenName::VerticalBoxSizer)),
//!     ),
//! );
//! assert_eq!(tree.forms().len(), 1);
//! ```

pub mod asset;
pub mod encoding;
pub mod error;
pub mod gen_name;
pub mod node;
pub mod prop;
pub mod tree;

pub use asset::{AssetCache, AssetId, AssetSource, EmbeddedAsset, FsAssetSource, MemoryAssetSource};
pub use encoding::{IdValue, ImageDescription, ImageKind, Platform, BUILTIN_ID_PREFIX, PLATFORMS_ALL};
pub use error::{CoreError, Result};
pub use gen_name::{GenName, GenType, WxLibrary};
pub use node::{Node, NodeBuilder, NodeEvent, NodeId};
pub use prop::{PropName, PropType, Property};
pub use tree::DesignTree;
