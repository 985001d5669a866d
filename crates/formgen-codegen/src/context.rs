//! Per-form generation state.
//!
//! A [`GenerationContext`] is created for one form and one language and dropped
//! once that form's output exists. Nothing in it is shared with other forms.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::Mutex;

use formgen_core::{AssetCache, DesignTree, EmbeddedAsset, GenName, Node, NodeEvent, NodeId, PropName};

use crate::declaration::{default_var_name, describe, Access};
use crate::error::{CodegenError, Result};
use crate::language::GenLang;
use crate::platform::Grouped;
use crate::stmt::{Scope, VarRef};

/// An event handler found in the tree.
///
/// Two refs are equal only when they point at the same event of the same node.
#[derive(Debug, Clone, Copy)]
pub struct EventRef<'t> {
    pub node: &'t Node,
    pub event: &'t NodeEvent,
}

impl PartialEq for EventRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node) && std::ptr::eq(self.event, other.event)
    }
}

impl Eq for EventRef<'_> {}

impl<'t> EventRef<'t> {
    /// Sort key: event name, handler, id, variable name.
    pub fn sort_key(&self) -> (&'t str, &'t str, &'t str, &'t str) {
        (
            self.event.name.as_str(),
            self.event.handler.as_str(),
            self.node.as_str(PropName::Id),
            self.node.var_name(),
        )
    }
}

/// Sort events for deterministic binding order.
pub fn sort_events(events: &mut [EventRef<'_>]) {
    events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// Which image helper functions the generated code needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageNeeds {
    /// Images loaded from a generated header.
    pub header_function: bool,
    pub svg_function: bool,
    pub animation_function: bool,
    /// `wxArtProvider` is used.
    pub art_provider: bool,
    /// Embedded bitmaps are converted through an image helper.
    pub image_function: bool,
}

impl ImageNeeds {
    pub fn any(&self) -> bool {
        self.header_function || self.svg_function || self.animation_function || self.art_provider || self.image_function
    }

    pub fn merge(&mut self, other: ImageNeeds) {
        self.header_function |= other.header_function;
        self.svg_function |= other.svg_function;
        self.animation_function |= other.animation_function;
        self.art_provider |= other.art_provider;
        self.image_function |= other.image_function;
    }
}

/// State accumulated while generating one form.
pub struct GenerationContext<'t> {
    language: GenLang,
    tree: &'t DesignTree,
    form: &'t Node,
    names: IndexMap<NodeId, String>,

    pub(crate) events: Grouped<Vec<EventRef<'t>>>,
    pub(crate) ctx_menu_events: Vec<EventRef<'t>>,
    pub(crate) public_members: Grouped<BTreeSet<String>>,
    pub(crate) protected_members: Grouped<BTreeSet<String>>,
    embedded_images: Mutex<Vec<Arc<EmbeddedAsset>>>,
    pub(crate) header_includes: BTreeSet<String>,
    pub(crate) enum_ids: BTreeSet<String>,
    pub(crate) const_ids: BTreeMap<String, String>,
    pub(crate) needs: ImageNeeds,
    warnings: IndexSet<String>,
}

impl std::fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("language", &self.language)
            .field("form", &self.form.class_name())
            .field("events", &self.events.unconditional.len())
            .field("embedded_images", &self.embedded_images.lock().len())
            .finish()
    }
}

impl<'t> GenerationContext<'t> {
    /// Fresh context for `form`.
    pub fn new(tree: &'t DesignTree, form: NodeId, language: GenLang) -> Result<Self> {
        let form = tree
            .get(form)
            .ok_or(CodegenError::Core(formgen_core::CoreError::UnknownNode(form.index())))?;
        if !form.is_form() {
            return Err(CodegenError::NotAForm(form.gen().as_str().to_string()));
        }
        Ok(Self {
            language,
            tree,
            form,
            names: assign_names(tree, form.id()),
            events: Grouped::new(),
            ctx_menu_events: Vec::new(),
            public_members: Grouped::new(),
            protected_members: Grouped::new(),
            embedded_images: Mutex::new(Vec::new()),
            header_includes: BTreeSet::new(),
            enum_ids: BTreeSet::new(),
            const_ids: BTreeMap::new(),
            needs: ImageNeeds::default(),
            warnings: IndexSet::new(),
        })
    }

    pub fn language(&self) -> GenLang {
        self.language
    }

    pub fn tree(&self) -> &'t DesignTree {
        self.tree
    }

    pub fn form(&self) -> &'t Node {
        self.form
    }

    pub fn class_name(&self) -> &'t str {
        self.form.class_name()
    }

    /// Variable name for a node; nodes without `var_name` get a derived one.
    pub fn var_name(&self, node: &Node) -> &str {
        self.names.get(&node.id()).map(String::as_str).unwrap_or("")
    }

    /// Variable reference for a node.
    pub fn var_ref(&self, node: &Node) -> VarRef {
        let scope = if Access::of(node).is_member() {
            Scope::Member
        } else {
            Scope::Local
        };
        VarRef {
            name: self.var_name(node).to_string(),
            scope,
            by_value: scope == Scope::Member && node.is_gen(GenName::Timer),
        }
    }

    pub fn events(&self) -> &Grouped<Vec<EventRef<'t>>> {
        &self.events
    }

    pub fn ctx_menu_events(&self) -> &[EventRef<'t>] {
        &self.ctx_menu_events
    }

    pub fn public_members(&self) -> &Grouped<BTreeSet<String>> {
        &self.public_members
    }

    pub fn protected_members(&self) -> &Grouped<BTreeSet<String>> {
        &self.protected_members
    }

    pub fn header_includes(&self) -> &BTreeSet<String> {
        &self.header_includes
    }

    pub fn enum_ids(&self) -> &BTreeSet<String> {
        &self.enum_ids
    }

    pub fn const_ids(&self) -> &BTreeMap<String, String> {
        &self.const_ids
    }

    pub fn needs(&self) -> ImageNeeds {
        self.needs
    }

    /// Add an embedded image to this form's list.
    ///
    /// A new asset is re-encoded first if its file changed. The final membership
    /// check and the insert happen under one lock, so concurrent callers can't
    /// both add the same asset. Returns `true` if the asset was added.
    pub fn add_embedded_image(&self, asset: &Arc<EmbeddedAsset>, cache: &AssetCache) -> Result<bool> {
        if self.has_embedded_image(asset) {
            return Ok(false);
        }
        if cache.needs_reencode(asset) {
            tracing::debug!(file = asset.filename(), "re-encoding changed image");
            cache.reencode(asset)?;
        }
        let mut images = self.embedded_images.lock();
        if images.iter().any(|existing| existing.id() == asset.id()) {
            return Ok(false);
        }
        images.push(Arc::clone(asset));
        Ok(true)
    }

    fn has_embedded_image(&self, asset: &EmbeddedAsset) -> bool {
        self.embedded_images
            .lock()
            .iter()
            .any(|existing| existing.id() == asset.id())
    }

    /// Embedded images sorted by array name.
    pub fn embedded_images(&self) -> Vec<Arc<EmbeddedAsset>> {
        let mut images = self.embedded_images.lock().clone();
        images.sort_by(|a, b| a.array_name().cmp(b.array_name()));
        images
    }

    pub fn embedded_image_count(&self) -> usize {
        self.embedded_images.lock().len()
    }

    /// Record a warning. Duplicates are dropped.
    pub fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        if self.warnings.insert(warning.clone()) {
            tracing::warn!(form = self.class_name(), "{warning}");
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &String> {
        self.warnings.iter()
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings.into_iter().collect()
    }

    pub fn describe(&self, node: &Node) -> String {
        describe(node)
    }
}

/// Variable names for every node in the form, in tree order. Explicit names are
/// kept as written; missing ones are derived from the class and numbered.
fn assign_names(tree: &DesignTree, form: NodeId) -> IndexMap<NodeId, String> {
    let mut names = IndexMap::new();
    let mut used: IndexMap<String, usize> = IndexMap::new();
    for id in tree.descendants(form).into_iter().skip(1) {
        let node = tree.node(id);
        let name = match node.var_name() {
            "" => {
                let base = default_var_name(node);
                let count = used.entry(base.clone()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    base
                } else {
                    format!("{base}{count}")
                }
            }
            explicit => explicit.to_string(),
        };
        names.insert(id, name);
    }
    names
}
