//! XRC resource generation for formgen design trees.
//!
//! Unlike the source code backends, XRC output is an XML document. The
//! [`XrcGenerator`] builds it node by node in an [`XmlDocument`] and serializes
//! it with `quick-xml`.
//!
//! # Example
//!
//! ```
//! use formgen_codegen::{GenResultCode, GenerationOptions};
//! use formgen_core::{DesignTree, GenName, NodeBuilder, PropName};
//!
//! let tree = DesignTree::new(
//!     NodeBuilder::new(GenName::Project).with_child(
//!         NodeBuilder::new(GenName::Dialog)
//!             .with_prop(PropName::ClassName, "AboutDialog")
//!             .with_prop(PropName::Title, "About"),
//!     ),
//! );
//! let output = formgen_xrc::generate_form(&tree, tree.forms()[0], &GenerationOptions::default()).unwrap();
//! assert_eq!(output.code, GenResultCode::NeedsWriting);
//! assert_eq!(output.files[0].full_path(), "about_dialog.xrc");
//! assert!(output.files[0].content.contains("<title>About</title>"));
//! ```

pub mod builder;
pub mod error;
pub mod handlers;
mod objects;
pub mod result;
pub mod xml;

use tracing::{debug_span, warn};

use formgen_codegen::{form_names, FormOutput, GenLang, GenResultCode, GenerationOptions, OutputFile, XrcOptions};
use formgen_core::{CoreError, DesignTree, GenName, GenType, NodeId};

// Re-export commonly used types
pub use builder::{XrcGenerator, TEMP_DIALOG_NAME, TEMP_SIZER_NAME};
pub use error::{Result, XrcError};
pub use handlers::{handler_for, needs_explicit_registration, required_handlers};
pub use result::XrcResult;
pub use xml::{Indent, XmlDocument, XmlId};

/// Generate the XRC file for one form.
///
/// The project, folders and the image list are ignored, and so are forms
/// XRC can't describe (with a warning).
pub fn generate_form(tree: &DesignTree, form: NodeId, options: &GenerationOptions) -> Result<FormOutput> {
    let node = tree.get(form).ok_or(CoreError::UnknownNode(form.index()))?;
    if matches!(node.gen_type(), GenType::Project | GenType::Folder | GenType::Images) {
        return Ok(FormOutput::ignored(node.class_name(), GenLang::Xrc));
    }
    if !node.is_form() {
        return Err(XrcError::NotAForm(node.gen().as_str().to_string()));
    }
    if node.is_gen(GenName::PopupTransientWindow) {
        let warning = format!("{} ({}) cannot be generated for XRC", node.class_name(), node.gen());
        warn!("{warning}");
        return Ok(FormOutput::ignored(node.class_name(), GenLang::Xrc).with_warning(warning));
    }

    let span = debug_span!("generate_form", form = node.class_name(), language = %GenLang::Xrc);
    let _guard = span.enter();

    let mut generator = XrcGenerator::new(&options.xrc);
    generator.add_generated_comments();
    generator.add_node(tree, form)?;
    let content = generator.to_xml()?;

    let (class_name, base_file) = form_names(node);
    Ok(FormOutput {
        class_name,
        language: GenLang::Xrc,
        code: GenResultCode::NeedsWriting,
        files: vec![OutputFile::new(base_file, GenLang::Xrc.extension(), content)],
        warnings: generator.take_warnings(),
    })
}

/// The XRC text for a form or the whole project, without the banner.
pub fn xrc_string(tree: &DesignTree, node: NodeId, options: &XrcOptions) -> Result<String> {
    let mut generator = XrcGenerator::new(options);
    generator.add_node(tree, node)?;
    generator.to_xml()
}

/// Like [`xrc_string`], with dialogs and panels wrapped for a live preview.
pub fn preview_string(tree: &DesignTree, node: NodeId, options: &XrcOptions) -> Result<String> {
    let mut generator = XrcGenerator::new(options).previewing(true);
    generator.add_node(tree, node)?;
    generator.to_xml()
}

#[cfg(test)]
mod tests {
    use formgen_core::{NodeBuilder, PropName};

    use super::*;

    fn tree() -> DesignTree {
        DesignTree::new(
            NodeBuilder::new(GenName::Project)
                .with_child(NodeBuilder::new(GenName::Images))
                .with_child(
                    NodeBuilder::new(GenName::Frame)
                        .with_prop(PropName::ClassName, "MainFrame")
                        .with_prop(PropName::BaseFile, "ui/main_frame")
                        .with_child(NodeBuilder::new(GenName::StatusBar).with_prop(PropName::VarName, "m_status")),
                )
                .with_child(NodeBuilder::new(GenName::PopupTransientWindow).with_prop(PropName::ClassName, "Tip")),
        )
    }

    #[test]
    fn test_form_output_file() {
        let tree = tree();
        let forms = tree.forms();
        let output = generate_form(&tree, forms[1], &GenerationOptions::default()).unwrap();
        assert_eq!(output.class_name, "MainFrame");
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].full_path(), "ui/main_frame.xrc");
        let content = &output.files[0].content;
        assert!(content.starts_with("<?xml version=\"1.0\"?>\n<!-- Code generated by formgen. Do not edit. -->"));
        assert!(content.contains("<object class=\"wxStatusBar\" name=\"m_status\">"));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_ignored_forms() {
        let tree = tree();
        let forms = tree.forms();
        let options = GenerationOptions::default();

        let images = generate_form(&tree, forms[0], &options).unwrap();
        assert_eq!(images.code, GenResultCode::Ignored);
        assert!(images.warnings.is_empty());

        let popup = generate_form(&tree, forms[2], &options).unwrap();
        assert_eq!(popup.code, GenResultCode::Ignored);
        assert_eq!(popup.warnings.len(), 1);
    }

    #[test]
    fn test_not_a_form() {
        let tree = tree();
        let status = tree.iter().find(|node| node.is_gen(GenName::StatusBar)).unwrap().id();
        assert!(matches!(
            generate_form(&tree, status, &GenerationOptions::default()),
            Err(XrcError::NotAForm(_))
        ));
    }

    #[test]
    fn test_whole_project_string() {
        let tree = tree();
        let options = XrcOptions {
            no_whitespace: true,
            ..XrcOptions::default()
        };
        let xml = xrc_string(&tree, tree.root(), &options).unwrap();
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<object class=\"wxFrame\" name=\"MainFrame\">"));
        assert!(!xml.contains("Tip"));
    }

    #[test]
    fn test_preview_string_uses_temp_names() {
        let tree = DesignTree::new(
            NodeBuilder::new(GenName::Project)
                .with_child(NodeBuilder::new(GenName::PanelForm).with_prop(PropName::ClassName, "Page")),
        );
        let xml = preview_string(&tree, tree.forms()[0], &XrcOptions::default()).unwrap();
        assert!(xml.contains(TEMP_DIALOG_NAME));
        assert!(xml.contains(TEMP_SIZER_NAME));
    }
}
