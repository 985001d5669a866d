//! wxWidgets code generation for formgen projects.
//!
//! This crate ties the generators together: every form of a project is run
//! through each requested language (C++, Python, Ruby, Perl and XRC) and the
//! finished files are handed to a [`FileWriter`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use formgen::{generate_project, DryRunWriter, GenLang, GenerationOptions};
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
//! let options = GenerationOptions {
//!     languages: vec![GenLang::Python, GenLang::Xrc],
//!     ..GenerationOptions::default()
//! };
//!
//! let results = generate_project(&tree, &cache, &options, &DryRunWriter::new());
//! assert!(results.is_success());
//! assert_eq!(results.paths(), vec!["about_dialog.py", "about_dialog.xrc"]);
//! ```

pub mod error;
pub mod project;
pub mod writer;

use formgen_core::{AssetCache, DesignTree};

// Re-export commonly used types
pub use error::{FormgenError, Result};
pub use formgen_codegen::{FormOutput, GenLang, GenResultCode, GenerationOptions, OutputFile, XrcOptions};
pub use project::{FileResult, FormResult, ProjectGenerator, ProjectResults};
pub use writer::{DiskWriter, DryRunWriter, FileWriter};

/// Generate every form of `tree` in each of `options.languages`.
pub fn generate_project(
    tree: &DesignTree,
    cache: &AssetCache,
    options: &GenerationOptions,
    writer: &dyn FileWriter,
) -> ProjectResults {
    ProjectGenerator::new(cache, options, writer).generate(tree, &options.languages)
}
