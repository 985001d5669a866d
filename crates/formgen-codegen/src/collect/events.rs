//! Event handler collection.

use formgen_core::{DesignTree, GenName, Node};

use crate::context::EventRef;
use crate::platform::{Destination, Grouped};

/// Event handlers of one form.
#[derive(Debug, Default)]
pub struct EventTables<'t> {
    pub events: Grouped<Vec<EventRef<'t>>>,
    /// Handlers bound inside the generated context-menu handler.
    pub ctx_menu: Vec<EventRef<'t>>,
}

/// Collect every event with a handler under `form`.
///
/// Children of a context-menu builder are redirected to [`EventTables::ctx_menu`];
/// the builder node itself contributes nothing.
pub fn collect_events<'t>(tree: &'t DesignTree, form: &'t Node) -> EventTables<'t> {
    let mut tables = EventTables::default();
    walk(tree, form, false, &mut tables);
    tables
}

fn walk<'t>(tree: &'t DesignTree, node: &'t Node, in_ctx_menu: bool, tables: &mut EventTables<'t>) {
    for event in node.events().filter(|event| !event.handler.is_empty()) {
        let event_ref = EventRef { node, event };
        if in_ctx_menu {
            if !tables.ctx_menu.contains(&event_ref) {
                tables.ctx_menu.push(event_ref);
            }
            continue;
        }

        let destination = Destination::for_node(tree, node);
        let bucket = tables.events.bucket_mut(destination);
        if destination != Destination::Unconditional && bucket.contains(&event_ref) {
            continue;
        }
        bucket.push(event_ref);
    }

    for child in tree.children(node.id()) {
        if child.is_gen(GenName::ContextMenuEvent) {
            for item in tree.children(child.id()) {
                walk(tree, item, true, tables);
            }
        } else {
            walk(tree, child, in_ctx_menu, tables);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgen_core::{NodeBuilder, PropName};

    fn tree() -> DesignTree {
        DesignTree::new(
            NodeBuilder::new(GenName::Dialog)
                .with_event("wxEVT_INIT_DIALOG", "OnInit")
                .with_event("wxEVT_SIZE", "")
                .with_child(
                    NodeBuilder::new(GenName::VerticalBoxSizer)
                        .with_prop(PropName::Platforms, "Windows")
                        .with_child(
                            NodeBuilder::new(GenName::Button)
                                .with_prop(PropName::VarName, "m_win")
                                .with_event("wxEVT_BUTTON", "OnWin"),
                        ),
                )
                .with_child(
                    NodeBuilder::new(GenName::Panel)
                        .with_prop(PropName::VarName, "m_panel")
                        .with_child(
                            NodeBuilder::new(GenName::ContextMenuEvent)
                                .with_event("wxEVT_CONTEXT_MENU", "Ignored")
                                .with_child(
                                    NodeBuilder::new(GenName::MenuItem)
                                        .with_prop(PropName::VarName, "m_copy")
                                        .with_event("wxEVT_MENU", "OnCopy"),
                                ),
                        ),
                ),
        )
    }

    #[test]
    fn test_destinations() {
        let tree = tree();
        let tables = collect_events(&tree, tree.root_node());

        let main: Vec<&str> = tables.events.unconditional.iter().map(|e| e.event.handler.as_str()).collect();
        assert_eq!(main, vec!["OnInit"]);

        let windows = tables.events.platform("Windows").unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].node.var_name(), "m_win");

        let ctx: Vec<&str> = tables.ctx_menu.iter().map(|e| e.event.handler.as_str()).collect();
        assert_eq!(ctx, vec!["OnCopy"]);
    }

    #[test]
    fn test_empty_handlers_are_skipped() {
        let tree = tree();
        let tables = collect_events(&tree, tree.root_node());
        let total = tables.events.unconditional.len()
            + tables.events.by_platform.values().map(Vec::len).sum::<usize>()
            + tables.ctx_menu.len();
        assert_eq!(total, 3);
    }
}
