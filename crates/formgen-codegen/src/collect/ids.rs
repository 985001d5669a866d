//! Identifier collection.

use std::collections::{BTreeMap, BTreeSet};

use formgen_core::{DesignTree, IdValue, Node, PropType};

/// Ids the form has to declare.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdSets {
    /// Bare ids, declared in an enumeration.
    pub enum_ids: BTreeSet<String>,
    /// `name=value` ids, declared as constants. A later definition of the same
    /// name replaces an earlier one.
    pub const_ids: BTreeMap<String, String>,
}

/// Collect every non-stock id under `form`, including the form's own.
pub fn collect_ids(tree: &DesignTree, form: &Node) -> IdSets {
    let mut ids = IdSets::default();
    for id in tree.descendants(form.id()) {
        let node = tree.node(id);
        for prop in node.props().iter().filter(|prop| prop.prop_type() == PropType::Id) {
            match IdValue::parse(&prop.value) {
                Some(value) if value.is_builtin() => {}
                Some(IdValue::Enum(name)) => {
                    ids.enum_ids.insert(name);
                }
                Some(IdValue::Const { name, value }) => {
                    ids.const_ids.insert(name, value);
                }
                None => {}
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgen_core::{GenName, NodeBuilder, PropName};

    #[test]
    fn test_classification_and_dedup() {
        let tree = DesignTree::new(
            NodeBuilder::new(GenName::Frame)
                .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::Id, "ID_SAVE"))
                .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::Id, "ID_SAVE"))
                .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::Id, "wxID_OK"))
                .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::Id, "ID_MAGIC=100"))
                .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::Id, "ID_MAGIC=200"))
                .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::Id, "")),
        );
        let ids = collect_ids(&tree, tree.root_node());
        assert_eq!(ids.enum_ids.iter().collect::<Vec<_>>(), vec!["ID_SAVE"]);
        assert_eq!(ids.const_ids.len(), 1);
        assert_eq!(ids.const_ids["ID_MAGIC"], "200");
    }
}
