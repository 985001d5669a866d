//! Routing of declarations and events into platform-conditional groups.
//!
//! A contribution goes to exactly one place: the bucket named by the node's own
//! platform selector, else the bucket of the nearest ancestor with a selector, else
//! the unconditional set. Selectors are compared as exact strings, so
//! `"Windows|Mac"` and `"Mac|Windows"` are different buckets.

use std::collections::BTreeMap;

use formgen_core::{DesignTree, Node};

/// Where a contribution from a node ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    Unconditional,
    Platform(&'a str),
}

impl<'a> Destination<'a> {
    /// Pick the destination for contributions made by `node`.
    pub fn for_node(tree: &'a DesignTree, node: &'a Node) -> Self {
        if let Some(selector) = node.platforms() {
            return Destination::Platform(selector);
        }
        match tree.platform_container(node.id()).and_then(Node::platforms) {
            Some(selector) => Destination::Platform(selector),
            None => Destination::Unconditional,
        }
    }

    pub fn selector(self) -> Option<&'a str> {
        match self {
            Destination::Unconditional => None,
            Destination::Platform(selector) => Some(selector),
        }
    }
}

/// A collection split into an unconditional part and one part per selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped<C> {
    pub unconditional: C,
    /// Keyed by the raw selector string; iterated in lexicographic order.
    pub by_platform: BTreeMap<String, C>,
}

impl<C: Default> Default for Grouped<C> {
    fn default() -> Self {
        Self {
            unconditional: C::default(),
            by_platform: BTreeMap::new(),
        }
    }
}

impl<C: Default> Grouped<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection a contribution with this destination belongs in.
    pub fn bucket_mut(&mut self, destination: Destination<'_>) -> &mut C {
        match destination {
            Destination::Unconditional => &mut self.unconditional,
            Destination::Platform(selector) => {
                self.by_platform.entry(selector.to_string()).or_default()
            }
        }
    }

    pub fn platform(&self, selector: &str) -> Option<&C> {
        self.by_platform.get(selector)
    }

    /// Move everything from `other` into `self`, bucket by bucket.
    pub fn merge(&mut self, other: Grouped<C>)
    where
        C: Extend<<C as IntoIterator>::Item> + IntoIterator,
    {
        self.unconditional.extend(other.unconditional);
        for (selector, items) in other.by_platform {
            self.by_platform.entry(selector).or_default().extend(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgen_core::{GenName, NodeBuilder, PropName, PLATFORMS_ALL};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn tree() -> DesignTree {
        DesignTree::new(
            NodeBuilder::new(GenName::Dialog)
                .with_child(
                    NodeBuilder::new(GenName::VerticalBoxSizer)
                        .with_prop(PropName::Platforms, "Windows|Mac")
                        .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::VarName, "inherits"))
                        .with_child(
                            NodeBuilder::new(GenName::Button)
                                .with_prop(PropName::VarName, "own")
                                .with_prop(PropName::Platforms, "Unix"),
                        ),
                )
                .with_child(
                    NodeBuilder::new(GenName::Button)
                        .with_prop(PropName::VarName, "plain")
                        .with_prop(PropName::Platforms, PLATFORMS_ALL),
                ),
        )
    }

    fn destination_of<'a>(tree: &'a DesignTree, var: &str) -> Destination<'a> {
        let node = tree.iter().find(|node| node.var_name() == var).unwrap();
        Destination::for_node(tree, node)
    }

    #[test]
    fn test_routing() {
        let tree = tree();
        assert_eq!(destination_of(&tree, "inherits"), Destination::Platform("Windows|Mac"));
        assert_eq!(destination_of(&tree, "own"), Destination::Platform("Unix"));
        assert_eq!(destination_of(&tree, "plain"), Destination::Unconditional);
    }

    #[test]
    fn test_selectors_are_not_normalized() {
        let mut grouped: Grouped<BTreeSet<String>> = Grouped::new();
        grouped.bucket_mut(Destination::Platform("Windows|Mac")).insert("a".into());
        grouped.bucket_mut(Destination::Platform("Mac|Windows")).insert("a".into());
        assert_eq!(grouped.by_platform.len(), 2);
        assert!(grouped.unconditional.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut a: Grouped<Vec<u32>> = Grouped::new();
        a.bucket_mut(Destination::Unconditional).push(1);
        let mut b: Grouped<Vec<u32>> = Grouped::new();
        b.bucket_mut(Destination::Platform("Unix")).push(2);
        b.bucket_mut(Destination::Unconditional).push(3);
        a.merge(b);
        assert_eq!(a.unconditional, vec![1, 3]);
        assert_eq!(a.platform("Unix"), Some(&vec![2]));
    }

    proptest! {
        #[test]
        fn prop_each_contribution_lands_in_exactly_one_bucket(
            selectors in proptest::collection::vec(
                prop_oneof![
                    Just(None),
                    Just(Some("Windows")),
                    Just(Some("Unix|Mac")),
                    Just(Some(PLATFORMS_ALL)),
                ],
                1..20,
            )
        ) {
            let mut root = NodeBuilder::new(GenName::Dialog);
            for (index, selector) in selectors.iter().enumerate() {
                let mut child = NodeBuilder::new(GenName::TextCtrl)
                    .with_prop(PropName::VarName, format!("m_text{index}"));
                if let Some(selector) = selector {
                    child = child.with_prop(PropName::Platforms, *selector);
                }
                root = root.with_child(child);
            }
            let tree = DesignTree::new(root);

            let mut grouped: Grouped<BTreeSet<String>> = Grouped::new();
            for node in tree.iter().skip(1) {
                grouped
                    .bucket_mut(Destination::for_node(&tree, node))
                    .insert(node.var_name().to_string());
            }

            for (index, selector) in selectors.iter().enumerate() {
                let name = format!("m_text{index}");
                let holders = std::iter::once(&grouped.unconditional)
                    .chain(grouped.by_platform.values())
                    .filter(|bucket| bucket.contains(&name))
                    .count();
                prop_assert_eq!(holders, 1);
                match selector {
                    Some(s) if *s != PLATFORMS_ALL => {
                        prop_assert!(grouped.by_platform[*s].contains(&name));
                    }
                    _ => prop_assert!(grouped.unconditional.contains(&name)),
                }
            }
        }
    }
}
