//! Per-form generation for the C++, Python, Ruby and Perl backends.
//!
//! [`FormGenerator::generate`] takes one form from the design tree to finished
//! output files. The phases run in a fixed order:
//!
//! 1. `Init`: a fresh [`GenerationContext`] for the form.
//! 2. `Collect`: the event, image header and image needs passes run
//!    concurrently and are joined before anything is emitted; ids and members
//!    are collected after the join.
//! 3. `Construct`: the construction walk, with each node's settings and
//!    after-children hook interleaved.
//! 4. `EventBinding`: bindings for every collected event, platform buckets
//!    wrapped in conditional blocks, then the context-menu handlers.
//! 5. `Finalize`: banner, imports, image data and the class are assembled
//!    into files.

use convert_case::{Case, Casing};
use indexmap::IndexSet;
use tracing::{debug, debug_span};

use formgen_core::{AssetCache, CoreError, DesignTree, GenName, GenType, Node, NodeId, PropName};

use crate::backend::{backend_for, event_library, Backend, FormInfo, ImportSet, Param};
use crate::collect::{collect_ids, collect_members, run_concurrent_passes};
use crate::construct::{parse_size, ConstructWalk};
use crate::context::{sort_events, EventRef, GenerationContext};
use crate::declaration::{resolve_class, validator_var};
use crate::error::{CodegenError, Result};
use crate::language::{GenLang, OutputFile};
use crate::options::GenerationOptions;
use crate::results::{FormOutput, GenResultCode};
use crate::stmt::{Arg, BindSource, EventBinding};
use crate::writer::CodeWriter;

/// Generation phase, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Collect,
    Construct,
    EventBinding,
    Finalize,
}

/// Generates the code for single forms.
///
/// The tree and the asset cache are borrowed; nothing is kept between calls, so
/// one generator can be shared by threads working on different forms.
#[derive(Debug, Clone, Copy)]
pub struct FormGenerator<'a> {
    tree: &'a DesignTree,
    cache: &'a AssetCache,
    options: &'a GenerationOptions,
}

impl<'a> FormGenerator<'a> {
    pub fn new(tree: &'a DesignTree, cache: &'a AssetCache, options: &'a GenerationOptions) -> Self {
        Self { tree, cache, options }
    }

    pub fn tree(&self) -> &'a DesignTree {
        self.tree
    }

    pub fn options(&self) -> &'a GenerationOptions {
        self.options
    }

    /// Generate `form` in `language`.
    ///
    /// Nodes that can't hold code (the project, folders, the image list) and
    /// forms the backend has no mapping for come back as
    /// [`GenResultCode::Ignored`]. Errors are reserved for failures that leave
    /// the form's state unusable, such as a collection pass failing.
    pub fn generate(&self, form: NodeId, language: GenLang) -> Result<FormOutput> {
        let node = self
            .tree
            .get(form)
            .ok_or(CodegenError::Core(CoreError::UnknownNode(form.index())))?;
        if matches!(node.gen_type(), GenType::Project | GenType::Folder | GenType::Images) {
            return Ok(FormOutput::ignored(node.class_name(), language));
        }
        if !node.is_form() {
            return Err(CodegenError::NotAForm(node.gen().as_str().to_string()));
        }

        let backend = backend_for(language)?;
        if !backend.supports(node.gen()) {
            let warning = format!(
                "{} ({}) cannot be generated for {language}",
                node.class_name(),
                node.gen()
            );
            tracing::warn!("{warning}");
            return Ok(FormOutput::ignored(node.class_name(), language).with_warning(warning));
        }

        let span = debug_span!("generate_form", form = node.class_name(), language = %language);
        let _guard = span.enter();
        self.generate_with(node, backend.as_ref())
    }

    fn generate_with(&self, form: &'a Node, backend: &dyn Backend) -> Result<FormOutput> {
        let language = backend.language();

        debug!(phase = ?Phase::Init, "starting form");
        let mut ctx = GenerationContext::new(self.tree, form.id(), language)?;

        debug!(phase = ?Phase::Collect, "running collection passes");
        self.collect(&mut ctx, backend)?;

        let info = self.form_info(&ctx);
        let imports = self.import_set(&ctx, backend, &info);
        let header = backend.header(&info, &ctx, &imports);

        let mut warnings = Vec::new();
        let body = {
            let mut walk = ConstructWalk::new(&ctx, backend);
            let mut w = CodeWriter::new(backend.indent_unit());
            backend.class_open(&mut w, &info);

            if header.is_none() {
                declarations(&mut w, &ctx, backend);
            }

            debug!(phase = ?Phase::Construct, "writing constructor");
            backend.constructor_open(&mut w, &info);
            for line in validator_inits(&ctx, backend) {
                w.writeln(line);
            }
            walk.form(&mut w);

            debug!(phase = ?Phase::EventBinding, "writing event bindings");
            w.blank();
            warnings.extend(bindings(&mut w, &ctx, backend, &info));
            backend.constructor_close(&mut w, &info);

            for (builder, handler) in context_menu_builders(&ctx).into_iter().zip(&info.context_menus) {
                backend.context_menu_open(&mut w, &info, handler);
                let menu = walk.context_menu(&mut w, builder);
                for event in ctx.ctx_menu_events() {
                    if self.tree.ancestors(event.node.id()).any(|ancestor| ancestor.id() == builder.id()) {
                        warnings.extend(bind(&mut w, &ctx, backend, event));
                    }
                }
                backend.context_menu_close(&mut w, &menu);
            }

            backend.handler_stubs(&mut w, &info.handlers);
            backend.class_close(&mut w, &info);
            warnings.extend(walk.into_warnings());
            w.finish()
        };

        debug!(phase = ?Phase::Finalize, "assembling files");
        let mut out = CodeWriter::new(backend.indent_unit());
        backend.banner(&mut out);
        let preamble = backend.source_preamble(&info);
        if !preamble.is_empty() {
            for line in preamble {
                out.writeln(line);
            }
            out.blank();
        }
        let images = ctx.embedded_images();
        let image_code = if !images.is_empty() || ctx.needs().any() {
            let mut w = CodeWriter::new(backend.indent_unit());
            backend.images(&mut w, &images, &ctx.needs());
            w.finish()
        } else {
            String::new()
        };
        // The image helpers have imports of their own.
        for line in backend.imports(&imports, &format!("{image_code}{body}")) {
            out.writeln(line);
        }
        out.blank();
        if !image_code.is_empty() {
            out.writeln(image_code.trim_end_matches('\n'));
            out.blank();
        }
        out.writeln(&body);
        let source = out.finish();

        let mut files = Vec::with_capacity(2);
        match header {
            Some(header) => {
                files.push(OutputFile::new(&info.base_file, &self.options.header_ext, header));
                files.push(OutputFile::new(&info.base_file, &self.options.source_ext, source));
            }
            None => files.push(OutputFile::new(&info.base_file, language.extension(), source)),
        }

        for warning in warnings {
            ctx.warn(warning);
        }
        let class_name = info.class_name;
        debug!(files = files.len(), "form generated");
        Ok(FormOutput {
            class_name,
            language,
            code: GenResultCode::NeedsWriting,
            files,
            warnings: ctx.into_warnings(),
        })
    }

    /// Fill the context's tables. The three concurrent passes are joined before
    /// ids and members are collected.
    fn collect(&self, ctx: &mut GenerationContext<'a>, backend: &dyn Backend) -> Result<()> {
        let passes = run_concurrent_passes(
            ctx,
            self.cache,
            &self.options.art_directory,
            self.options.parallel_collection,
        )?;

        ctx.events = passes.events.events;
        sort_events(&mut ctx.events.unconditional);
        for events in ctx.events.by_platform.values_mut() {
            sort_events(events);
        }
        ctx.ctx_menu_events = passes.events.ctx_menu;
        sort_events(&mut ctx.ctx_menu_events);
        ctx.header_includes = passes.headers.includes;
        ctx.needs = passes.needs;
        for warning in passes.headers.warnings {
            ctx.warn(warning);
        }

        let ids = collect_ids(self.tree, ctx.form());
        ctx.enum_ids = ids.enum_ids;
        ctx.const_ids = ids.const_ids;

        let members = collect_members(ctx, backend);
        ctx.public_members = members.public;
        ctx.protected_members = members.protected;
        for warning in members.warnings {
            ctx.warn(warning);
        }
        Ok(())
    }

    fn form_info(&self, ctx: &GenerationContext<'_>) -> FormInfo {
        let form = ctx.form();
        let gen = form.gen();
        let (class_name, base_file) = form_names(form);
        let namespaces = match form.as_str(PropName::Namespace) {
            "" => self.options.namespaces(),
            own => own.split("::").map(str::trim).filter(|part| !part.is_empty()).collect(),
        };

        let mut handlers: IndexSet<(String, String)> = IndexSet::new();
        let mut seen = IndexSet::new();
        let events = ctx
            .events()
            .unconditional
            .iter()
            .chain(ctx.events().by_platform.values().flatten())
            .chain(ctx.ctx_menu_events());
        for event in events {
            let handler = &event.event.handler;
            if handler.starts_with('[') || !seen.insert(handler.clone()) {
                continue;
            }
            handlers.insert((event.event.name.clone(), handler.clone()));
        }

        let context_menus = context_menu_builders(ctx)
            .into_iter()
            .map(|builder| context_menu_handler(ctx, builder))
            .collect();

        FormInfo {
            gen,
            class_name,
            base_class: gen.class_name(),
            base_library: gen.library(),
            base_file,
            namespaces: namespaces.into_iter().map(String::from).collect(),
            params: form_params(form),
            base_create: matches!(
                gen,
                GenName::Dialog | GenName::Frame | GenName::PanelForm | GenName::Wizard | GenName::PopupTransientWindow
            ),
            header_ext: self.options.header_ext.clone(),
            handlers: handlers.into_iter().collect(),
            context_menus,
        }
    }

    fn import_set(&self, ctx: &GenerationContext<'_>, backend: &dyn Backend, info: &FormInfo) -> ImportSet {
        let mut imports = ImportSet {
            needs: ctx.needs(),
            ..ImportSet::default()
        };
        imports.libraries.insert(info.base_library);
        if let Some(header) = info.gen.include_header() {
            imports.system_headers.insert(header.to_string());
        }
        for id in self.tree.descendants(ctx.form().id()).into_iter().skip(1) {
            let node = self.tree.node(id);
            let gen = node.gen();
            for event in node.events() {
                imports.libraries.insert(event_library(&event.name));
            }
            if !gen.class_name().is_empty() || gen == GenName::CustomControl {
                let class = resolve_class(node, backend);
                imports.libraries.insert(class.library);
                imports.class_tokens.insert(class.token);
            }
            if let Some(header) = gen.include_header() {
                imports.system_headers.insert(header.to_string());
            }
            let subclass_header = node.as_str(PropName::SubclassHeader);
            if !subclass_header.is_empty() {
                imports.local_headers.insert(subclass_header.to_string());
            }
        }
        imports
            .local_headers
            .extend(ctx.header_includes().iter().cloned());
        imports
    }
}

/// The form's class name and output file name (without extension).
///
/// An unnamed form is called after its wx class, and the file name defaults
/// to the class name in snake case.
pub fn form_names(form: &Node) -> (String, String) {
    let class_name = match form.class_name() {
        "" => format!("{}Base", form.gen().class_name().trim_start_matches("wx")),
        name => name.to_string(),
    };
    let base_file = match form.as_str(PropName::BaseFile) {
        "" => class_name.to_case(Case::Snake),
        file => file.to_string(),
    };
    (class_name, base_file)
}

/// Constructor parameters of the generated class, with defaults taken from the
/// form's properties.
fn form_params(form: &Node) -> Vec<Param> {
    let parent = |default: Option<Arg>| Param {
        name: "parent",
        cpp_type: "wxWindow*",
        default,
    };
    let id = Param {
        name: "id",
        cpp_type: "wxWindowID",
        default: Some(Arg::Id(form.as_str(PropName::Id).to_string())),
    };
    let title = Param {
        name: "title",
        cpp_type: "const wxString&",
        default: Some(Arg::str(form.as_str(PropName::Title))),
    };
    let pos = Param {
        name: "pos",
        cpp_type: "const wxPoint&",
        default: Some(Arg::constant("wxDefaultPosition")),
    };
    let size = Param {
        name: "size",
        cpp_type: "const wxSize&",
        default: Some(match parse_size(form.as_str(PropName::Size)) {
            Some((width, height)) => Arg::size(width, height),
            None => Arg::constant("wxDefaultSize"),
        }),
    };
    let style = |fallback: &str| {
        let value = [form.as_str(PropName::Style), form.as_str(PropName::WindowStyle)]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("|");
        Param {
            name: "style",
            cpp_type: "long",
            default: Some(if value.is_empty() {
                Arg::constant(fallback)
            } else {
                Arg::Const(value)
            }),
        }
    };

    match form.gen() {
        GenName::Dialog | GenName::Wizard => {
            vec![parent(None), id, title, pos, size, style("wxDEFAULT_DIALOG_STYLE")]
        }
        GenName::Frame => vec![parent(Some(Arg::Null)), id, title, pos, size, style("wxDEFAULT_FRAME_STYLE")],
        GenName::PanelForm => vec![parent(None), id, pos, size, style("wxTAB_TRAVERSAL")],
        GenName::PopupTransientWindow => vec![parent(None), style("wxBORDER_NONE")],
        GenName::MenuBarForm => vec![style("0")],
        GenName::ToolBarForm => vec![parent(None), id, pos, size, style("wxTB_HORIZONTAL")],
        GenName::RibbonBarForm => vec![parent(None), id, pos, size, style("wxRIBBON_BAR_DEFAULT_STYLE")],
        _ => Vec::new(),
    }
}

/// Id and member declarations written inside the class, for languages without
/// a separate header.
fn declarations(w: &mut CodeWriter, ctx: &GenerationContext<'_>, backend: &dyn Backend) {
    let ids = backend.id_declarations(ctx.enum_ids(), ctx.const_ids());
    let members: IndexSet<&String> = ctx
        .public_members()
        .unconditional
        .iter()
        .chain(ctx.public_members().by_platform.values().flatten())
        .chain(ctx.protected_members().unconditional.iter())
        .chain(ctx.protected_members().by_platform.values().flatten())
        .collect();
    if ids.is_empty() && members.is_empty() {
        return;
    }
    for line in ids {
        w.writeln(line);
    }
    for line in members {
        w.writeln(line);
    }
    w.blank();
}

/// Constructor statements giving validator variables their initial values.
fn validator_inits(ctx: &GenerationContext<'_>, backend: &dyn Backend) -> Vec<String> {
    let tree = ctx.tree();
    tree.descendants(ctx.form().id())
        .into_iter()
        .filter_map(|id| validator_var(tree.node(id)))
        .filter_map(|var| backend.validator_init(&var))
        .collect()
}

/// Write every event binding of the form. Returns warnings for handlers the
/// language can't express.
fn bindings(w: &mut CodeWriter, ctx: &GenerationContext<'_>, backend: &dyn Backend, info: &FormInfo) -> Vec<String> {
    let mut warnings = Vec::new();
    let events = ctx.events();
    for event in &events.unconditional {
        warnings.extend(bind(w, ctx, backend, event));
    }
    for (selector, bucket) in &events.by_platform {
        backend.begin_platform(w, selector);
        for event in bucket {
            warnings.extend(bind(w, ctx, backend, event));
        }
        backend.end_platform(w, selector);
    }

    for (builder, handler) in context_menu_builders(ctx).into_iter().zip(&info.context_menus) {
        let Some(owner) = ctx.tree().parent(builder.id()) else {
            continue;
        };
        let binding = EventBinding {
            event: "wxEVT_CONTEXT_MENU",
            handler,
            class_name: &info.class_name,
            source: bind_source(ctx, owner),
        };
        if let Some(line) = backend.event_binding(&binding) {
            w.writeln(line);
        }
    }
    warnings
}

fn bind(w: &mut CodeWriter, ctx: &GenerationContext<'_>, backend: &dyn Backend, event: &EventRef<'_>) -> Option<String> {
    let binding = EventBinding {
        event: &event.event.name,
        handler: &event.event.handler,
        class_name: ctx.class_name(),
        source: bind_source(ctx, event.node),
    };
    match backend.event_binding(&binding) {
        Some(line) => {
            w.writeln(line);
            None
        }
        None if event.event.is_lambda() => Some(format!(
            "{}: the lambda handler for {} is C++ only and was skipped for {}",
            ctx.describe(event.node),
            event.event.name,
            backend.language()
        )),
        None => None,
    }
}

fn bind_source(ctx: &GenerationContext<'_>, node: &Node) -> BindSource {
    if node.is_form() {
        return BindSource::Form;
    }
    match node.gen_type() {
        GenType::MenuItem | GenType::Tool => BindSource::Item(Arg::Id(node.as_str(PropName::Id).to_string())),
        _ => BindSource::Window(ctx.var_ref(node)),
    }
}

/// Context-menu builders in the form, in tree order.
fn context_menu_builders<'t>(ctx: &GenerationContext<'t>) -> Vec<&'t Node> {
    let tree = ctx.tree();
    tree.descendants(ctx.form().id())
        .into_iter()
        .map(|id| tree.node(id))
        .filter(|node| node.is_gen(GenName::ContextMenuEvent))
        .collect()
}

/// Handler name for a context-menu builder: `OnContextMenu` for the form
/// itself, suffixed with the owning window's variable otherwise.
fn context_menu_handler(ctx: &GenerationContext<'_>, builder: &Node) -> String {
    match ctx.tree().parent(builder.id()) {
        Some(owner) if !owner.is_form() => format!("OnContextMenu_{}", ctx.var_name(owner)),
        _ => "OnContextMenu".to_string(),
    }
}
