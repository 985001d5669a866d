//! Source code generation for formgen design trees.
//!
//! Supported languages:
//! - C++ (header and source pair)
//! - Python (wxPython)
//! - Ruby (wxRuby3)
//! - Perl (wxPerl)
//!
//! XRC output lives in the `formgen-xrc` crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use formgen_codegen::{generate_form, GenLang, GenResultCode, GenerationOptions};
//! use formgen_core::{AssetCache, DesignTree, GenName, MemoryAssetSource, NodeBuilder, PropName};
//!
//! let tree = DesignTree::new(
//!     NodeBuilder::new(GenName::Project).with_child(
//!         NodeBuilder::new(GenName::Dialog)
//!             .with_prop(PropName::ClassName, "AboutDialog")
//!             .with_child(NodeBuilder::new(GenName::VerticalBoxSizer)),
//!     ),
//! );
//! let cache = AssetCache::new(Arc::new(MemoryAssetSource::new()));
//! let options = GenerationOptions::default();
//!
//! let output = generate_form(&tree, &cache, &options, tree.forms()[0], GenLang::Python).unwrap();
//! assert_eq!(output.code, GenResultCode::NeedsWriting);
//! assert!(output.files[0].content.contains("class AboutDialog(wx.Dialog):"));
//! ```

pub mod backend;
pub mod collect;
pub mod construct;
pub mod context;
pub mod declaration;
pub mod error;
pub mod language;
pub mod options;
pub mod orchestrator;
pub mod platform;
pub mod results;
pub mod stmt;
pub mod writer;

use formgen_core::{AssetCache, DesignTree, NodeId};

// Re-export commonly used types
pub use backend::{backend_for, Backend};
pub use context::GenerationContext;
pub use error::{CodegenError, Result};
pub use language::{GenLang, OutputFile};
pub use options::{GenerationOptions, XrcOptions};
pub use orchestrator::{form_names, FormGenerator};
pub use platform::{Destination, Grouped};
pub use results::{FormOutput, GenResultCode};

/// Generate one form in one language.
pub fn generate_form(
    tree: &DesignTree,
    cache: &AssetCache,
    options: &GenerationOptions,
    form: NodeId,
    language: GenLang,
) -> Result<FormOutput> {
    FormGenerator::new(tree, cache, options).generate(form, language)
}
