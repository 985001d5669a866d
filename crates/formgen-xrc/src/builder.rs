//! Builds an XRC document from a design tree.
//!
//! Every node goes through [`Builder::generate_object`]: the node's transform
//! fills in the element it was handed and returns an [`XrcResult`], and the
//! result decides where (and whether) the node's children are written. The
//! document shape mostly follows the design tree, with three exceptions:
//!
//! - a widget inside a sizer is wrapped in a `sizeritem` element,
//! - a collapsible pane's children sit inside a `panewindow` element,
//! - tree book pages are flattened under the `wxTreebook` with a `depth` value
//!   instead of being nested inside each other.

use tracing::{debug, warn};

use formgen_codegen::XrcOptions;
use formgen_core::{CoreError, DesignTree, GenName, GenType, Node, NodeBuilder, NodeId, PropName};

use crate::error::Result;
use crate::result::XrcResult;
use crate::xml::{Indent, XmlDocument, XmlId};

pub const XRC_NAMESPACE: &str = "http://www.wxwidgets.org/wxxrc";
pub const XRC_VERSION: &str = "2.5.3.0";

/// Name of the synthetic dialog or panel a form is wrapped in for previews.
pub const TEMP_DIALOG_NAME: &str = "_wxue_temp_dlg";
/// Name of the synthetic sizer inside the preview dialog.
pub const TEMP_SIZER_NAME: &str = "_wxue_temp_sizer";

/// Walks design nodes into one XML document.
pub(crate) struct Builder<'t, 'd> {
    pub(crate) tree: &'t DesignTree,
    pub(crate) doc: &'d mut XmlDocument,
    pub(crate) add_comments: bool,
    pub(crate) warnings: &'d mut Vec<String>,
}

impl<'t> Builder<'t, '_> {
    /// Transform `node` into `object`, then place its children according to
    /// the transform's result.
    pub(crate) fn generate_object(&mut self, node: &'t Node, object: XmlId) -> XrcResult {
        let mut result = self.transform(node, object);
        if result == XrcResult::NotSupported && matches!(node.gen_type(), GenType::Project | GenType::Folder) {
            result = XrcResult::Updated;
        }

        match result {
            XrcResult::SizerItemCreated => {
                let Some(mut container) = self.doc.first_child_named(object, "object") else {
                    return result;
                };
                if node.is_gen(GenName::CollapsiblePane) {
                    container = self.pane_window(container);
                }
                let tree = self.tree;
                for child in tree.children(node.id()) {
                    if child.is_gen(GenName::BookPage) && node.is_gen(GenName::BookPage) {
                        self.nested_book_page(child, object, container);
                        continue;
                    }
                    self.append_child_object(child, container);
                }
                result
            }
            XrcResult::Updated => {
                // The dropdown menu was written by the tool's own transform.
                if node.is_gen(GenName::ToolDropdown) {
                    return result;
                }
                let container = if node.is_gen(GenName::CollapsiblePane) {
                    self.pane_window(object)
                } else {
                    object
                };
                let tree = self.tree;
                for child in tree.children(node.id()) {
                    if child.is_gen(GenName::Folder) {
                        self.generate_object(child, container);
                        continue;
                    }
                    self.append_child_object(child, container);
                }
                result
            }
            XrcResult::FormNotSupported if self.add_comments => result,
            XrcResult::FormNotSupported | XrcResult::NotSupported => XrcResult::NotSupported,
        }
    }

    /// Append an `object` for `child` under `parent`, dropping it again when
    /// the child has no XRC form.
    pub(crate) fn append_child_object(&mut self, child: &'t Node, parent: XmlId) -> XrcResult {
        let child_object = self.doc.append_child(parent, "object");
        let result = self.generate_object(child, child_object);
        if result == XrcResult::NotSupported {
            self.doc.remove_child(parent, child_object);
        }
        result
    }

    fn pane_window(&mut self, parent: XmlId) -> XmlId {
        let pane = self.doc.append_child(parent, "object");
        self.doc.set_attribute(pane, "class", "panewindow");
        pane
    }

    /// A book page nested inside another page. Tree books want every page as
    /// a direct child, so walk back up the document to the `wxTreebook` and
    /// record how deep the page really is.
    fn nested_book_page(&mut self, page: &'t Node, parent_page: XmlId, fallback: XmlId) {
        let mut depth = None;
        let mut book = None;
        let mut cursor = Some(parent_page);
        while let Some(id) = cursor {
            match self.doc.attribute(id, "class") {
                Some("wxTreebook") => {
                    book = Some(id);
                    break;
                }
                Some("treebookpage") if depth.is_none() => {
                    let parent_depth = self
                        .doc
                        .child_text(id, "depth")
                        .and_then(|text| text.trim().parse::<u32>().ok())
                        .unwrap_or(0);
                    depth = Some(parent_depth + 1);
                }
                _ => {}
            }
            cursor = self.doc.parent(id);
        }

        let Some(book) = book else {
            debug!(page = page.var_name(), "nested page outside a tree book");
            self.append_child_object(page, fallback);
            return;
        };
        let child_object = self.doc.append_child(book, "object");
        self.doc
            .append_text(child_object, "depth", depth.unwrap_or(1).to_string());
        self.generate_object(page, child_object);
    }
}

/// Accumulates forms into one XRC resource document.
///
/// ```
/// use formgen_codegen::XrcOptions;
/// use formgen_core::{DesignTree, GenName, NodeBuilder, PropName};
/// use formgen_xrc::XrcGenerator;
///
/// let tree = DesignTree::new(NodeBuilder::new(GenName::Project).with_child(
///     NodeBuilder::new(GenName::PanelForm).with_prop(PropName::ClassName, "Settings"),
/// ));
/// let mut generator = XrcGenerator::new(&XrcOptions::default());
/// generator.add_node(&tree, tree.forms()[0]).unwrap();
/// assert!(generator.to_xml().unwrap().contains("<object class=\"wxPanel\" name=\"Settings\"/>"));
/// ```
#[derive(Debug, Clone)]
pub struct XrcGenerator {
    doc: XmlDocument,
    resource: Option<XmlId>,
    add_comments: bool,
    previewing: bool,
    indent: Indent,
    warnings: Vec<String>,
}

impl XrcGenerator {
    pub fn new(options: &XrcOptions) -> Self {
        Self {
            doc: XmlDocument::new(),
            resource: None,
            add_comments: options.add_comments,
            previewing: false,
            indent: Indent::from_options(options),
            warnings: Vec::new(),
        }
    }

    /// Wrap dialogs and panel forms in a synthetic shell so they can be shown
    /// on their own.
    pub fn previewing(mut self, previewing: bool) -> Self {
        self.previewing = previewing;
        self
    }

    /// Add the do-not-edit banner. Must come before the first form.
    pub fn add_generated_comments(&mut self) {
        self.doc.append_root_comment(" Code generated by formgen. Do not edit. ");
        self.doc
            .append_root_comment(" Changes will be lost the next time the form is generated. ");
    }

    /// Add the project (every form), or a single form, to the resource.
    pub fn add_node(&mut self, tree: &DesignTree, id: NodeId) -> Result<XrcResult> {
        let node = tree.get(id).ok_or(CoreError::UnknownNode(id.index()))?;
        if node.gen().is_bar_form() {
            // Bars can't be loaded on their own, so put them in a panel.
            let mut temp = DesignTree::new(
                NodeBuilder::new(GenName::PanelForm)
                    .with_prop(PropName::ClassName, node.class_name())
                    .with_child(
                        NodeBuilder::new(GenName::VerticalBoxSizer).with_prop(PropName::VarName, TEMP_SIZER_NAME),
                    ),
            );
            let temp_root = temp.root();
            let sizer = temp
                .children(temp_root)
                .next()
                .map(Node::id)
                .ok_or(CoreError::UnknownNode(temp_root.index()))?;
            temp.copy_subtree(tree, id, sizer)?;
            return Ok(self.add_resolved(&temp, temp_root));
        }
        Ok(self.add_resolved(tree, id))
    }

    fn add_resolved(&mut self, tree: &DesignTree, id: NodeId) -> XrcResult {
        let root = self.resource();
        let node = tree.node(id);
        let mut warnings = std::mem::take(&mut self.warnings);
        let mut builder = Builder {
            tree,
            doc: &mut self.doc,
            add_comments: self.add_comments,
            warnings: &mut warnings,
        };

        let result = if node.is_gen(GenName::Project) {
            builder.generate_object(node, root)
        } else if self.previewing && node.is_gen(GenName::PanelForm) {
            let doc = &mut *builder.doc;
            let dialog = doc.append_child(root, "object");
            doc.set_attribute(dialog, "class", "wxDialog");
            doc.set_attribute(dialog, "name", TEMP_DIALOG_NAME);
            doc.append_text(dialog, "style", "wxDEFAULT_DIALOG_STYLE|wxRESIZE_BORDER");
            doc.append_text(dialog, "centered", "1");
            doc.append_text(dialog, "title", node.class_name());
            let sizer = doc.append_child(dialog, "object");
            doc.set_attribute(sizer, "class", "wxBoxSizer");
            doc.set_attribute(sizer, "name", TEMP_SIZER_NAME);
            doc.append_text(sizer, "orient", "wxVERTICAL");
            let sizer_item = doc.append_child(sizer, "object");
            doc.set_attribute(sizer_item, "class", "sizeritem");
            let object = doc.append_child(sizer_item, "object");
            builder.generate_object(node, object)
        } else if self.previewing && node.is_gen(GenName::Dialog) {
            let doc = &mut *builder.doc;
            let panel = doc.append_child(root, "object");
            doc.set_attribute(panel, "class", "wxPanel");
            doc.set_attribute(panel, "name", TEMP_DIALOG_NAME);
            let object = doc.append_child(panel, "object");
            match tree.children(id).next() {
                Some(child) => builder.generate_object(child, object),
                None => XrcResult::Updated,
            }
        } else {
            let object = builder.doc.append_child(root, "object");
            let result = builder.generate_object(node, object);
            if result == XrcResult::NotSupported {
                builder.doc.remove_child(root, object);
            }
            result
        };

        for warning in &warnings {
            warn!("{warning}");
        }
        self.warnings = warnings;
        result
    }

    /// The `<resource>` element, created on first use.
    pub fn resource(&mut self) -> XmlId {
        if let Some(resource) = self.resource {
            return resource;
        }
        let resource = self.doc.append_root("resource");
        self.doc.set_attribute(resource, "xmlns", XRC_NAMESPACE);
        self.doc.set_attribute(resource, "version", XRC_VERSION);
        self.resource = Some(resource);
        resource
    }

    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    /// Problems found so far, in the order they were found.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    pub fn to_xml(&self) -> Result<String> {
        self.doc.to_xml(self.indent)
    }
}
