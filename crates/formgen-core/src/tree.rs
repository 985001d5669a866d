//! The design tree arena.
//!
//! Nodes live in a flat `Vec` and refer to each other through [`NodeId`]s. The tree
//! is read-only while code is generated, so `&DesignTree` can be shared freely
//! between the collection passes running on different threads.

use crate::error::{CoreError, Result};
use crate::gen_name::{GenName, GenType};
use crate::node::{Node, NodeBuilder, NodeId};

/// A hierarchical UI design.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DesignTree {
    /// Build a tree whose root is `root` (with all of its builder children).
    pub fn new(root: NodeBuilder) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.insert(None, root);
        tree
    }

    /// An empty project.
    pub fn with_project() -> Self {
        Self::new(NodeBuilder::new(GenName::Project))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different tree. Use [`DesignTree::get`] when that
    /// can happen.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Append `child` (and its subtree) as the last child of `parent`.
    pub fn add(&mut self, parent: NodeId, child: NodeBuilder) -> Result<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Err(CoreError::UnknownNode(parent.0));
        }
        Ok(self.insert(Some(parent), child))
    }

    fn insert(&mut self, parent: Option<NodeId>, builder: NodeBuilder) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            gen: builder.gen,
            props: builder.props,
            events: builder.events,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        for child in builder.children {
            self.insert(Some(id), child);
        }
        id
    }

    /// Copy `src_id` and its descendants from `src` to the end of `parent`'s
    /// children in this tree.
    pub fn copy_subtree(&mut self, src: &DesignTree, src_id: NodeId, parent: NodeId) -> Result<NodeId> {
        let builder = src.to_builder(src_id)?;
        self.add(parent, builder)
    }

    /// Rebuild the subtree rooted at `id` as a [`NodeBuilder`].
    pub fn to_builder(&self, id: NodeId) -> Result<NodeBuilder> {
        let node = self.get(id).ok_or(CoreError::UnknownNode(id.0))?;
        let mut builder = NodeBuilder::new(node.gen);
        builder.props = node.props.clone();
        builder.events = node.events.clone();
        for child in &node.children {
            builder.children.push(self.to_builder(*child)?);
        }
        Ok(builder)
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent.map(|parent| self.node(parent))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id).children.iter().map(move |child| self.node(*child))
    }

    /// Ancestors of `id`, nearest first, not including `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.parent(id), move |node| self.parent(node.id))
    }

    /// The form containing `id`, or `id` itself when it is a form.
    pub fn form_of(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        if node.is_form() {
            return Some(id);
        }
        self.ancestors(id).find(|node| node.is_form()).map(Node::id)
    }

    /// The nearest ancestor that restricts its contents to a platform subset.
    pub fn platform_container(&self, id: NodeId) -> Option<&Node> {
        self.ancestors(id).find(|node| node.platforms().is_some())
    }

    /// All nodes of the subtree rooted at `id` in pre-order, `id` first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        out
    }

    /// Every form under the project, descending into folders, in tree order.
    pub fn forms(&self) -> Vec<NodeId> {
        let mut forms = Vec::new();
        self.collect_forms(self.root, &mut forms);
        forms
    }

    fn collect_forms(&self, id: NodeId, forms: &mut Vec<NodeId>) {
        for child in self.children(id) {
            match child.gen_type() {
                GenType::Folder => self.collect_forms(child.id, forms),
                GenType::Form | GenType::Images => forms.push(child.id),
                _ => {}
            }
        }
    }

    /// The project's image list form, if it has one.
    pub fn images_form(&self) -> Option<NodeId> {
        self.children(self.root)
            .find(|node| node.is_gen(GenName::Images))
            .map(Node::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

impl std::ops::Index<NodeId> for DesignTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::PropName;

    fn sample_tree() -> DesignTree {
        DesignTree::new(
            NodeBuilder::new(GenName::Project)
                .with_child(NodeBuilder::new(GenName::Images))
                .with_child(
                    NodeBuilder::new(GenName::Folder).with_child(
                        NodeBuilder::new(GenName::Dialog)
                            .with_prop(PropName::ClassName, "MyDialog")
                            .with_child(
                                NodeBuilder::new(GenName::VerticalBoxSizer)
                                    .with_prop(PropName::Platforms, "Windows")
                                    .with_child(
                                        NodeBuilder::new(GenName::Button)
                                            .with_prop(PropName::VarName, "m_btn"),
                                    ),
                            ),
                    ),
                ),
        )
    }

    #[test]
    fn test_structure() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 6);
        let forms = tree.forms();
        assert_eq!(forms.len(), 2);
        assert!(tree[forms[0]].is_gen(GenName::Images));
        assert!(tree[forms[1]].is_gen(GenName::Dialog));
        assert_eq!(tree.images_form(), Some(forms[0]));
    }

    #[test]
    fn test_form_of_and_platform_container() {
        let tree = sample_tree();
        let dialog = tree.forms()[1];
        let order = tree.descendants(dialog);
        assert_eq!(order.len(), 3);
        let button = order[2];
        assert_eq!(tree[button].var_name(), "m_btn");
        assert_eq!(tree.form_of(button), Some(dialog));
        assert_eq!(tree.form_of(dialog), Some(dialog));
        let container = tree.platform_container(button).map(Node::gen);
        assert_eq!(container, Some(GenName::VerticalBoxSizer));
        assert!(tree.platform_container(order[1]).is_none());
    }

    #[test]
    fn test_copy_subtree() {
        let src = sample_tree();
        let dialog = src.forms()[1];
        let mut dest = DesignTree::new(NodeBuilder::new(GenName::PanelForm));
        let root = dest.root();
        let copied = dest.copy_subtree(&src, dialog, root).unwrap();
        assert_eq!(dest.len(), 4);
        assert_eq!(dest[copied].class_name(), "MyDialog");
        assert_eq!(dest.parent(copied).map(Node::id), Some(root));
    }

    #[test]
    fn test_add_rejects_unknown_parent() {
        let mut tree = DesignTree::with_project();
        assert!(tree.add(NodeId(42), NodeBuilder::new(GenName::Dialog)).is_err());
    }
}
