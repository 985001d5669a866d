//! Member and validator variable collection.

use std::collections::BTreeSet;

use formgen_core::{GenName, Node, PropName};

use crate::backend::{Backend, MemberDecl};
use crate::context::GenerationContext;
use crate::declaration::{resolve_class, validator_var, Access};
use crate::platform::{Destination, Grouped};

/// Declarations for the generated class, split by access and platform.
#[derive(Debug, Default, Clone)]
pub struct MemberSets {
    pub public: Grouped<BTreeSet<String>>,
    pub protected: Grouped<BTreeSet<String>>,
    pub warnings: Vec<String>,
}

/// Collect member and validator declarations for every node in the form.
///
/// Validator variables are always protected. Nodes inside a context-menu builder
/// are locals of the generated handler and are skipped.
pub fn collect_members(ctx: &GenerationContext<'_>, backend: &dyn Backend) -> MemberSets {
    let mut sets = MemberSets::default();
    for child in ctx.tree().children(ctx.form().id()) {
        walk(ctx, backend, child, &mut sets);
    }
    sets
}

fn walk(ctx: &GenerationContext<'_>, backend: &dyn Backend, node: &Node, sets: &mut MemberSets) {
    if node.is_gen(GenName::ContextMenuEvent) {
        return;
    }
    let destination = Destination::for_node(ctx.tree(), node);
    let access = Access::of(node);

    let declares = !node.gen().class_name().is_empty() || node.is_gen(GenName::CustomControl);
    if access.is_member() && declares {
        let class = resolve_class(node, backend);
        if let Some(warning) = class.warning {
            sets.warnings.push(warning);
        }
        let decl = MemberDecl {
            var_name: ctx.var_name(node).to_string(),
            class_token: class.token,
            by_value: class.by_value,
            comment: node.as_str(PropName::VarComment).to_string(),
            public: access == Access::Public,
        };
        if let Some(line) = backend.member_declaration(&decl) {
            let sets_for_access = if decl.public {
                &mut sets.public
            } else {
                &mut sets.protected
            };
            sets_for_access.bucket_mut(destination).insert(line);
        }
    }

    if let Some(var) = validator_var(node) {
        if let Some(line) = backend.validator_declaration(&var) {
            sets.protected.bucket_mut(destination).insert(line);
        }
    }

    for child in ctx.tree().children(node.id()) {
        walk(ctx, backend, child, sets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::backend_for;
    use crate::language::GenLang;
    use formgen_core::{DesignTree, NodeBuilder, PLATFORMS_ALL};

    fn tree() -> DesignTree {
        DesignTree::new(
            NodeBuilder::new(GenName::Project).with_child(
                NodeBuilder::new(GenName::Dialog)
                    .with_prop(PropName::ClassName, "MyDialog")
                    .with_child(
                        NodeBuilder::new(GenName::VerticalBoxSizer)
                            .with_prop(PropName::Platforms, "Windows|Mac")
                            .with_children([
                                NodeBuilder::new(GenName::Button)
                                    .with_prop(PropName::VarName, "m_inherits")
                                    .with_prop(PropName::ClassAccess, "public:"),
                                NodeBuilder::new(GenName::Button)
                                    .with_prop(PropName::VarName, "m_own")
                                    .with_prop(PropName::Platforms, "Unix"),
                                NodeBuilder::new(GenName::TextCtrl)
                                    .with_prop(PropName::VarName, "m_text")
                                    .with_prop(PropName::ValidatorVariable, "m_value"),
                            ]),
                    )
                    .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::VarName, "m_plain"))
                    .with_child(
                        NodeBuilder::new(GenName::Button)
                            .with_prop(PropName::VarName, "m_everywhere")
                            .with_prop(PropName::Platforms, PLATFORMS_ALL),
                    ),
            ),
        )
    }

    fn members(tree: &DesignTree) -> MemberSets {
        let ctx = GenerationContext::new(tree, tree.forms()[0], GenLang::Cpp).unwrap();
        let backend = backend_for(GenLang::Cpp).unwrap();
        collect_members(&ctx, backend.as_ref())
    }

    fn set(lines: &[&str]) -> BTreeSet<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_ancestor_container_selector() {
        let sets = members(&tree());
        assert!(sets.warnings.is_empty());
        assert_eq!(sets.public.platform("Windows|Mac"), Some(&set(&["wxButton* m_inherits;"])));
        assert_eq!(
            sets.protected.platform("Windows|Mac"),
            Some(&set(&["wxString m_value;", "wxTextCtrl* m_text;"]))
        );
    }

    #[test]
    fn test_own_selector_beats_container() {
        let sets = members(&tree());
        assert_eq!(sets.protected.platform("Unix"), Some(&set(&["wxButton* m_own;"])));
        let container = sets.protected.platform("Windows|Mac").unwrap();
        assert!(!container.iter().any(|line| line.contains("m_own")));
    }

    #[test]
    fn test_unconditional_members() {
        let sets = members(&tree());
        assert!(sets.public.unconditional.is_empty());
        assert_eq!(
            sets.protected.unconditional,
            set(&["wxButton* m_everywhere;", "wxButton* m_plain;"])
        );
        assert_eq!(sets.protected.by_platform.len(), 2);
        assert_eq!(sets.public.by_platform.len(), 1);
    }
}
