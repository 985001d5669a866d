//! Design tree nodes.

use indexmap::IndexMap;

use crate::encoding::PLATFORMS_ALL;
use crate::gen_name::{GenName, GenType};
use crate::prop::{PropName, Property};

/// Index of a node inside its [`DesignTree`](crate::DesignTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An event a node handles, e.g. `wxEVT_BUTTON` bound to `OnOK`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeEvent {
    pub name: String,
    /// Handler function name, or a C++ lambda body starting with `[`.
    pub handler: String,
}

impl NodeEvent {
    pub fn new(name: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: handler.into(),
        }
    }

    /// True when the handler is an inline lambda rather than a member function.
    pub fn is_lambda(&self) -> bool {
        self.handler.trim_start().starts_with('[')
    }
}

/// A single node of the design tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) gen: GenName,
    pub(crate) props: Vec<Property>,
    pub(crate) events: IndexMap<String, NodeEvent>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn gen(&self) -> GenName {
        self.gen
    }

    pub fn gen_type(&self) -> GenType {
        self.gen.gen_type()
    }

    pub fn is_gen(&self, gen: GenName) -> bool {
        self.gen == gen
    }

    pub fn is_form(&self) -> bool {
        self.gen.is_form()
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn props(&self) -> &[Property] {
        &self.props
    }

    pub fn prop(&self, name: PropName) -> Option<&Property> {
        self.props.iter().find(|prop| prop.name == name)
    }

    /// True if the property exists, even with an empty value.
    pub fn has_prop(&self, name: PropName) -> bool {
        self.prop(name).is_some()
    }

    /// True if the property exists and is non-empty.
    pub fn has_value(&self, name: PropName) -> bool {
        self.prop(name).is_some_and(|prop| !prop.value.is_empty())
    }

    /// The property value, or `""` when absent.
    pub fn as_str(&self, name: PropName) -> &str {
        self.prop(name).map(|prop| prop.value.as_str()).unwrap_or("")
    }

    pub fn as_bool(&self, name: PropName) -> bool {
        self.prop(name).is_some_and(Property::as_bool)
    }

    pub fn as_int(&self, name: PropName) -> i64 {
        self.prop(name).map(Property::as_int).unwrap_or(0)
    }

    /// True when the property's value equals `value`.
    pub fn is_prop_value(&self, name: PropName, value: &str) -> bool {
        self.as_str(name) == value
    }

    pub fn var_name(&self) -> &str {
        self.as_str(PropName::VarName)
    }

    pub fn class_name(&self) -> &str {
        self.as_str(PropName::ClassName)
    }

    /// The node's own platform selector when it restricts generation to a subset
    /// of platforms.
    pub fn platforms(&self) -> Option<&str> {
        self.prop(PropName::Platforms)
            .map(|prop| prop.value.as_str())
            .filter(|value| *value != PLATFORMS_ALL)
    }

    pub fn events(&self) -> impl Iterator<Item = &NodeEvent> {
        self.events.values()
    }

    pub fn event(&self, name: &str) -> Option<&NodeEvent> {
        self.events.get(name)
    }

    /// True if any event on this node has a handler.
    pub fn has_events(&self) -> bool {
        self.events.values().any(|event| !event.handler.is_empty())
    }

    /// Set or replace a property value.
    pub fn set_prop(&mut self, name: PropName, value: impl Into<String>) {
        let value = value.into();
        match self.props.iter_mut().find(|prop| prop.name == name) {
            Some(prop) => prop.value = value,
            None => self.props.push(Property::new(name, value)),
        }
    }
}

/// Declarative construction of a node and its subtree.
///
/// ```
/// use formgen_core::{GenName, NodeBuilder, PropName};
///
/// let button = NodeBuilder::new(GenName::Button)
///     .with_prop(PropName::VarName, "m_ok")
///     .with_event("wxEVT_BUTTON", "OnOK");
/// ```
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    pub(crate) gen: GenName,
    pub(crate) props: Vec<Property>,
    pub(crate) events: IndexMap<String, NodeEvent>,
    pub(crate) children: Vec<NodeBuilder>,
}

impl NodeBuilder {
    pub fn new(gen: GenName) -> Self {
        Self {
            gen,
            props: Vec::new(),
            events: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Set a property. A later value for the same name replaces the earlier one.
    pub fn with_prop(mut self, name: PropName, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.props.iter_mut().find(|prop| prop.name == name) {
            Some(prop) => prop.value = value,
            None => self.props.push(Property::new(name, value)),
        }
        self
    }

    /// Bind an event to a handler.
    pub fn with_event(mut self, name: impl Into<String>, handler: impl Into<String>) -> Self {
        let event = NodeEvent::new(name, handler);
        self.events.insert(event.name.clone(), event);
        self
    }

    pub fn with_child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeBuilder>) -> Self {
        self.children.extend(children);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let builder = NodeBuilder::new(GenName::CheckBox)
            .with_prop(PropName::VarName, "m_check")
            .with_prop(PropName::Checked, "1")
            .with_prop(PropName::Platforms, "Windows")
            .with_event("wxEVT_CHECKBOX", "OnCheck");
        Node {
            id: NodeId(0),
            gen: builder.gen,
            props: builder.props,
            events: builder.events,
            parent: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_accessors() {
        let node = sample();
        assert_eq!(node.var_name(), "m_check");
        assert!(node.as_bool(PropName::Checked));
        assert!(node.has_value(PropName::VarName));
        assert!(!node.has_prop(PropName::Label));
        assert_eq!(node.as_str(PropName::Label), "");
        assert_eq!(node.platforms(), Some("Windows"));
        assert_eq!(node.event("wxEVT_CHECKBOX").map(|e| e.handler.as_str()), Some("OnCheck"));
        assert!(node.has_events());
    }

    #[test]
    fn test_default_platforms_are_unconditional() {
        let mut node = sample();
        node.set_prop(PropName::Platforms, PLATFORMS_ALL);
        assert_eq!(node.platforms(), None);
    }

    #[test]
    fn test_builder_replaces_duplicate_props() {
        let builder = NodeBuilder::new(GenName::Button)
            .with_prop(PropName::Label, "first")
            .with_prop(PropName::Label, "second");
        assert_eq!(builder.props.len(), 1);
        assert_eq!(builder.props[0].value, "second");
    }

    #[test]
    fn test_lambda_handler() {
        assert!(NodeEvent::new("wxEVT_BUTTON", "[this](wxCommandEvent&) { Close(); }").is_lambda());
        assert!(!NodeEvent::new("wxEVT_BUTTON", "OnClose").is_lambda());
    }
}
