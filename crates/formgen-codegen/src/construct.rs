//! The construction walk.
//!
//! Emits the instantiation of every node in pre-order, interleaved with that
//! node's settings, then recurses into the children before running the node's
//! after-children hook. Attaching a node to its parent (sizer `Add`, book
//! `AddPage`, menu `Append`) happens in that hook, so a container is only
//! finished once everything inside it exists.

use std::collections::HashSet;

use formgen_core::{DesignTree, GenName, GenType, ImageDescription, Node, PropName, WxLibrary};

use crate::backend::Backend;
use crate::context::GenerationContext;
use crate::declaration::{describe, resolve_class, validator_var};
use crate::stmt::{Arg, Scope, Stmt, Target, VarRef};
use crate::writer::CodeWriter;

/// Buttons a standard dialog button sizer can hold, in the order they are added.
const STD_BUTTONS: [(PropName, &str); 9] = [
    (PropName::OkButton, "wxID_OK"),
    (PropName::YesButton, "wxID_YES"),
    (PropName::SaveButton, "wxID_SAVE"),
    (PropName::ApplyButton, "wxID_APPLY"),
    (PropName::NoButton, "wxID_NO"),
    (PropName::CancelButton, "wxID_CANCEL"),
    (PropName::CloseButton, "wxID_CLOSE"),
    (PropName::HelpButton, "wxID_HELP"),
    (PropName::ContextHelpButton, "wxID_CONTEXT_HELP"),
];

/// Name of the local holding the menu built by a context-menu handler.
pub const CONTEXT_MENU_VAR: &str = "menu";

/// Writes the construction code of one form.
pub struct ConstructWalk<'a, 't> {
    ctx: &'a GenerationContext<'t>,
    backend: &'a dyn Backend,
    /// Filenames of the images embedded in this form.
    embedded: HashSet<String>,
    in_context_menu: bool,
    warnings: Vec<String>,
}

impl<'a, 't> ConstructWalk<'a, 't> {
    pub fn new(ctx: &'a GenerationContext<'t>, backend: &'a dyn Backend) -> Self {
        let embedded = ctx
            .embedded_images()
            .iter()
            .map(|asset| asset.filename().to_string())
            .collect();
        Self {
            ctx,
            backend,
            embedded,
            in_context_menu: false,
            warnings: Vec::new(),
        }
    }

    /// Warnings found during the walk, in the order they were found.
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    /// Everything the constructor creates, including the form's own settings.
    pub fn form(&mut self, w: &mut CodeWriter) {
        let form = self.ctx.form();
        self.form_settings(w, form);
        self.children(w, form);
        self.form_after_children(w, form);
    }

    /// Body of the handler for a context-menu builder: the menu local and its
    /// items. Returns the menu variable for the backend to show.
    pub fn context_menu(&mut self, w: &mut CodeWriter, builder: &'t Node) -> VarRef {
        let menu = VarRef::local(CONTEXT_MENU_VAR);
        let class = self.backend.class_token("wxMenu", WxLibrary::Core);
        self.emit(w, Stmt::create(menu.clone(), class, Vec::new()));
        self.in_context_menu = true;
        self.children(w, builder);
        self.in_context_menu = false;
        menu
    }

    fn emit(&self, w: &mut CodeWriter, stmt: Stmt) {
        w.writeln(self.backend.render_stmt(&stmt));
    }

    fn call(&self, w: &mut CodeWriter, target: Target, method: &str, args: Vec<Arg>) {
        self.emit(w, Stmt::call(target, method, args));
    }

    fn warn(&mut self, warning: String) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    fn var(&self, node: &Node) -> VarRef {
        let mut var = self.ctx.var_ref(node);
        if self.in_context_menu {
            var.scope = Scope::Local;
            var.by_value = false;
        }
        var
    }

    fn target(&self, node: &Node) -> Target {
        if node.is_form() {
            Target::This
        } else {
            Target::Var(self.var(node))
        }
    }

    fn children(&mut self, w: &mut CodeWriter, node: &'t Node) {
        let tree = self.ctx.tree();
        for child in tree.children(node.id()) {
            if child.is_gen(GenName::ContextMenuEvent) {
                continue;
            }
            self.node(w, child);
        }
    }

    fn node(&mut self, w: &mut CodeWriter, node: &'t Node) {
        // A placeholder comment alone is not a valid block body in every language.
        if !(self.backend.supports(node.gen()) && has_construction(node.gen())) {
            self.unsupported(w, node);
            return;
        }
        let selector = node.platforms();
        if let Some(selector) = selector {
            self.backend.begin_platform(w, selector);
        }
        self.create(w, node);
        self.children(w, node);
        self.after_children(w, node);
        if let Some(selector) = selector {
            self.backend.end_platform(w, selector);
        }
    }

    fn unsupported(&mut self, w: &mut CodeWriter, node: &Node) {
        let message = format!(
            "{} cannot be generated for {}",
            describe(node),
            self.backend.language()
        );
        self.emit(w, Stmt::comment(&message));
        self.warn(message);
    }

    // Creation

    fn create(&mut self, w: &mut CodeWriter, node: &'t Node) {
        let gen = node.gen();
        match gen.gen_type() {
            GenType::Sizer => self.create_sizer(w, node),
            GenType::Spacer => self.spacer(w, node),
            GenType::MenuBar | GenType::Menu => {
                let class = self.class_for(node);
                self.emit(w, Stmt::create(self.var(node), class, Vec::new()));
            }
            GenType::MenuItem => self.menu_item(w, node),
            GenType::Tool => self.tool(w, node),
            GenType::Timer => {
                let class = self.class_for(node);
                self.emit(
                    w,
                    Stmt::Create {
                        var: self.var(node),
                        class,
                        args: vec![Arg::This],
                        init_method: Some("SetOwner"),
                    },
                );
            }
            _ => {
                let class = self.class_for(node);
                let args = self.construction_args(node);
                self.emit(w, Stmt::create(self.var(node), class, args));
                self.window_settings(w, node);
                self.kind_settings(w, node);
                // Sub pages attach to the page added last, so a page goes in
                // before its own children are created.
                if node.is_gen(GenName::BookPage) {
                    self.add_page(w, node, self.var(node));
                }
            }
        }
    }

    fn class_for(&mut self, node: &Node) -> String {
        let resolved = resolve_class(node, self.backend);
        if let Some(warning) = resolved.warning {
            self.warn(warning);
        }
        resolved.token
    }

    fn construction_args(&self, node: &Node) -> Vec<Arg> {
        let label = || Arg::str(node.as_str(PropName::Label));
        match node.gen() {
            GenName::Button
            | GenName::ToggleButton
            | GenName::StaticText
            | GenName::CheckBox
            | GenName::RadioButton
            | GenName::CollapsiblePane => self.window_args(node, vec![label()], ""),
            GenName::Check3State => self.window_args(node, vec![label()], "wxCHK_3STATE"),
            GenName::TextCtrl | GenName::RichTextCtrl => {
                self.window_args(node, vec![Arg::str(node.as_str(PropName::Value))], "")
            }
            GenName::ComboBox => {
                let mut args = self.window_args(node, vec![Arg::str(node.as_str(PropName::Value))], "");
                args.truncate(5);
                args
            }
            GenName::Choice | GenName::ListBox => {
                let mut args = self.window_args(node, Vec::new(), "");
                args.truncate(4);
                args
            }
            GenName::SpinCtrl => {
                let mut args = vec![
                    self.parent_window(node),
                    self.id_arg(node),
                    Arg::str(node.as_str(PropName::Value)),
                    point_arg(node.as_str(PropName::Pos)),
                    size_arg(node.as_str(PropName::Size)),
                ];
                let style = combined_style(node, "");
                args.push(if style.is_empty() {
                    Arg::constant("wxSP_ARROW_KEYS")
                } else {
                    Arg::Const(style)
                });
                args.push(Arg::Int(int_or(node, PropName::Min, 0)));
                args.push(Arg::Int(int_or(node, PropName::Max, 100)));
                args.push(Arg::Int(int_or(node, PropName::Initial, 0)));
                args
            }
            GenName::Slider => self.window_args(
                node,
                vec![
                    Arg::Int(node.as_str(PropName::Value).trim().parse().unwrap_or(0)),
                    Arg::Int(int_or(node, PropName::Min, 0)),
                    Arg::Int(int_or(node, PropName::Max, 100)),
                ],
                "",
            ),
            GenName::Gauge => self.window_args(node, vec![Arg::Int(int_or(node, PropName::Max, 100))], ""),
            GenName::StaticBitmap => {
                let bitmap = self.bitmap_arg(node, PropName::Bitmap).unwrap_or_else(|| Arg::constant("wxNullBitmap"));
                self.window_args(node, vec![bitmap], "")
            }
            GenName::HyperlinkCtrl => self.window_args(
                node,
                vec![label(), Arg::str(node.as_str(PropName::Url))],
                "",
            ),
            GenName::AnimationCtrl => {
                let animation = self
                    .animation_arg(node)
                    .unwrap_or_else(|| Arg::constant("wxNullAnimation"));
                self.window_args(node, vec![animation], "")
            }
            GenName::CalendarCtrl => self.window_args(node, vec![Arg::constant("wxDefaultDateTime")], ""),
            GenName::StatusBar => {
                let mut args = vec![self.parent_window(node), self.id_arg(node)];
                let style = combined_style(node, "");
                if !style.is_empty() {
                    args.push(Arg::Const(style));
                }
                args
            }
            GenName::WizardPage => vec![self.parent_window(node)],
            GenName::RibbonPage | GenName::RibbonPanel => {
                vec![self.parent_window(node), self.id_arg(node), label()]
            }
            GenName::RibbonButtonBar => vec![self.parent_window(node), self.id_arg(node)],
            GenName::CustomControl => {
                let parameters = node
                    .as_str(PropName::Parameters)
                    .trim()
                    .trim_start_matches('(')
                    .trim_end_matches(')')
                    .trim();
                if parameters.is_empty() {
                    vec![self.parent_window(node), self.id_arg(node)]
                } else {
                    vec![Arg::Raw(parameters.to_string())]
                }
            }
            _ => self.window_args(node, Vec::new(), ""),
        }
    }

    /// `parent, id, extras..., pos, size, style`, dropping trailing defaults.
    fn window_args(&self, node: &Node, extras: Vec<Arg>, implied_style: &str) -> Vec<Arg> {
        let mut args = vec![self.parent_window(node), self.id_arg(node)];
        args.extend(extras);

        let pos = node.as_str(PropName::Pos);
        let size = node.as_str(PropName::Size);
        let style = combined_style(node, implied_style);
        let mut trailing = vec![
            (point_arg(pos), is_default_size(pos)),
            (size_arg(size), is_default_size(size)),
            (Arg::Const(style.clone()), style.is_empty()),
        ];
        while trailing.last().is_some_and(|(_, is_default)| *is_default) {
            trailing.pop();
        }
        args.extend(trailing.into_iter().map(|(arg, _)| arg));
        args
    }

    fn id_arg(&self, node: &Node) -> Arg {
        Arg::Id(node.as_str(PropName::Id).to_string())
    }

    /// The window new controls are created in.
    fn parent_window(&self, node: &Node) -> Arg {
        let wants_book = node.is_gen(GenName::BookPage);
        for ancestor in self.ctx.tree().ancestors(node.id()) {
            if ancestor.is_form() {
                return Arg::This;
            }
            if wants_book {
                if ancestor.gen().is_book() {
                    return Arg::Var(self.var(ancestor));
                }
                continue;
            }
            match ancestor.gen() {
                GenName::StaticBoxSizer | GenName::StaticCheckboxBoxSizer | GenName::StaticRadioBtnBoxSizer => {
                    return Arg::call(Target::Var(self.var(ancestor)), "GetStaticBox", Vec::new());
                }
                GenName::CollapsiblePane => {
                    return Arg::call(Target::Var(self.var(ancestor)), "GetPane", Vec::new());
                }
                gen if gen.is_container() => return Arg::Var(self.var(ancestor)),
                _ => {}
            }
        }
        Arg::This
    }

    fn bitmap_arg(&self, node: &Node, prop: PropName) -> Option<Arg> {
        self.image(node, prop).map(Arg::Bitmap)
    }

    fn animation_arg(&self, node: &Node) -> Option<Arg> {
        self.image(node, PropName::Animation).map(Arg::Animation)
    }

    /// A usable image description. Embedded images whose file was never found
    /// have no data array to refer to.
    fn image(&self, node: &Node, prop: PropName) -> Option<ImageDescription> {
        let image = ImageDescription::parse(node.as_str(prop)).ok()?;
        if image.kind.is_embedded() && !self.embedded.contains(&image.path) {
            return None;
        }
        Some(image)
    }

    fn create_sizer(&self, w: &mut CodeWriter, node: &Node) {
        let var = self.var(node);
        let class = resolve_class(node, self.backend).token;
        let orientation = |default: &str| match node.as_str(PropName::Orientation) {
            "" => Arg::constant(default),
            value => Arg::constant(value),
        };
        let args = match node.gen() {
            GenName::BoxSizer => vec![orientation("wxHORIZONTAL")],
            GenName::VerticalBoxSizer => vec![orientation("wxVERTICAL")],
            GenName::GridSizer | GenName::FlexGridSizer => vec![
                Arg::Int(int_or(node, PropName::Rows, 0)),
                Arg::Int(int_or(node, PropName::Cols, 2)),
                Arg::Int(int_or(node, PropName::Vgap, 0)),
                Arg::Int(int_or(node, PropName::Hgap, 0)),
            ],
            GenName::StaticBoxSizer | GenName::StaticCheckboxBoxSizer | GenName::StaticRadioBtnBoxSizer => vec![
                orientation("wxVERTICAL"),
                self.parent_window(node),
                Arg::str(node.as_str(PropName::Label)),
            ],
            _ => Vec::new(),
        };
        self.emit(w, Stmt::create(var.clone(), class, args));

        if node.is_gen(GenName::StdDialogButtonSizer) {
            let parent = self.parent_window(node);
            for (prop, id) in STD_BUTTONS {
                if node.as_bool(prop) {
                    let button = Arg::New {
                        class: "wxButton".to_string(),
                        library: WxLibrary::Core,
                        args: vec![parent.clone(), Arg::Id(id.to_string())],
                    };
                    self.call(w, Target::Var(var.clone()), "AddButton", vec![button]);
                }
            }
            self.call(w, Target::Var(var), "Realize", Vec::new());
        }
    }

    fn spacer(&self, w: &mut CodeWriter, node: &Node) {
        let Some(sizer) = self.parent_sizer(node) else {
            return;
        };
        let mut args = vec![
            Arg::Int(node.as_int(PropName::Width)),
            Arg::Int(node.as_int(PropName::Height)),
            Arg::Int(node.as_int(PropName::Proportion)),
        ];
        let flags = sizer_flags(node);
        if !flags.is_empty() {
            args.push(Arg::Const(flags));
            args.push(Arg::Int(border_size(node)));
        }
        self.call(w, Target::Var(sizer), "Add", args);
    }

    fn menu_item(&mut self, w: &mut CodeWriter, node: &'t Node) {
        let Some(menu) = self.menu_parent(node) else {
            return;
        };
        if node.is_gen(GenName::Separator) {
            self.call(w, menu, "AppendSeparator", Vec::new());
            return;
        }
        let var = self.var(node);
        let mut label = node.as_str(PropName::Label).to_string();
        let shortcut = node.as_str(PropName::Shortcut);
        if !shortcut.is_empty() {
            label = format!("{label}\t{shortcut}");
        }
        let kind = match node.as_str(PropName::Kind) {
            "" => "wxITEM_NORMAL",
            kind => kind,
        };
        let menu_arg = match &menu {
            Target::Var(menu) => Arg::Var(menu.clone()),
            _ => Arg::This,
        };
        let class = self.class_for(node);
        self.emit(
            w,
            Stmt::create(
                var.clone(),
                class,
                vec![
                    menu_arg,
                    self.id_arg(node),
                    Arg::Str(label),
                    Arg::str(node.as_str(PropName::HelpString)),
                    Arg::constant(kind),
                ],
            ),
        );
        if let Some(bitmap) = self.bitmap_arg(node, PropName::Bitmap) {
            self.call(w, Target::Var(var.clone()), "SetBitmap", vec![bitmap]);
        }
        self.call(w, menu, "Append", vec![Arg::Var(var.clone())]);
        if node.as_bool(PropName::Checked) {
            self.call(w, Target::Var(var.clone()), "Check", Vec::new());
        }
        if node.as_bool(PropName::Disabled) {
            self.call(w, Target::Var(var), "Enable", vec![Arg::Bool(false)]);
        }
    }

    fn tool(&self, w: &mut CodeWriter, node: &Node) {
        let Some(toolbar) = self.tool_parent(node) else {
            return;
        };
        let bitmap = || {
            self.bitmap_arg(node, PropName::Bitmap)
                .unwrap_or_else(|| Arg::constant("wxNullBitmap"))
        };
        match node.gen() {
            GenName::ToolSeparator => self.call(w, toolbar, "AddSeparator", Vec::new()),
            GenName::RibbonButton => self.call(
                w,
                toolbar,
                "AddButton",
                vec![
                    self.id_arg(node),
                    Arg::str(node.as_str(PropName::Label)),
                    bitmap(),
                    Arg::str(node.as_str(PropName::HelpString)),
                ],
            ),
            _ => {
                let kind = if node.is_gen(GenName::ToolDropdown) {
                    "wxITEM_DROPDOWN"
                } else {
                    match node.as_str(PropName::Kind) {
                        "" => "wxITEM_NORMAL",
                        kind => kind,
                    }
                };
                self.call(
                    w,
                    toolbar,
                    "AddTool",
                    vec![
                        self.id_arg(node),
                        Arg::str(node.as_str(PropName::Label)),
                        bitmap(),
                        Arg::str(node.as_str(PropName::HelpString)),
                        Arg::constant(kind),
                    ],
                );
                if node.is_gen(GenName::ToolDropdown) && !node.children().is_empty() {
                    let class = self.backend.class_token("wxMenu", WxLibrary::Core);
                    self.emit(w, Stmt::create(self.dropdown_menu(node), class, Vec::new()));
                }
            }
        }
    }

    fn dropdown_menu(&self, node: &Node) -> VarRef {
        VarRef::local(format!("{}_menu", self.ctx.var_name(node)))
    }

    // Settings

    fn window_settings(&self, w: &mut CodeWriter, node: &Node) {
        if !matches!(
            node.gen_type(),
            GenType::Widget | GenType::Container | GenType::Book | GenType::BookPage | GenType::ToolBar
        ) {
            return;
        }
        let var = self.var(node);
        let target = || Target::Var(var.clone());
        let tooltip = node.as_str(PropName::Tooltip);
        if !tooltip.is_empty() {
            self.call(w, target(), "SetToolTip", vec![Arg::str(tooltip)]);
        }
        if let Some((width, height)) = parse_size(node.as_str(PropName::MinSize)) {
            if (width, height) != (-1, -1) {
                self.call(w, target(), "SetMinSize", vec![Arg::size(width, height)]);
            }
        }
        if node.as_bool(PropName::Disabled) {
            self.call(w, target(), "Enable", vec![Arg::Bool(false)]);
        }
        if node.as_bool(PropName::Hidden) {
            self.call(w, target(), "Hide", Vec::new());
        }
        if node.as_bool(PropName::Focus) {
            self.call(w, target(), "SetFocus", Vec::new());
        }
        if let Some(validator) = validator_var(node) {
            if let Some(line) = self.backend.validator_binding(&var, &validator) {
                w.writeln(line);
            }
        }
    }

    fn kind_settings(&self, w: &mut CodeWriter, node: &'t Node) {
        let var = self.var(node);
        let target = || Target::Var(var.clone());
        match node.gen() {
            GenName::CheckBox | GenName::RadioButton if node.as_bool(PropName::Checked) => {
                self.call(w, target(), "SetValue", vec![Arg::Bool(true)]);
            }
            GenName::Check3State => {
                let state = node.as_str(PropName::InitialState);
                if !state.is_empty() && state != "wxCHK_UNCHECKED" {
                    self.call(w, target(), "Set3StateValue", vec![Arg::constant(state)]);
                }
            }
            GenName::Choice | GenName::ListBox | GenName::ComboBox => {
                let style = combined_style(node, "");
                if !style.is_empty() {
                    self.call(w, target(), "SetWindowStyleFlag", vec![Arg::Const(style)]);
                }
                for choice in parse_choices(node.as_str(PropName::Choices)) {
                    self.call(w, target(), "Append", vec![Arg::Str(choice)]);
                }
                if node.has_value(PropName::Selection) && node.as_int(PropName::Selection) >= 0 {
                    self.call(
                        w,
                        target(),
                        "SetSelection",
                        vec![Arg::Int(node.as_int(PropName::Selection))],
                    );
                }
            }
            GenName::Button | GenName::ToggleButton => {
                if node.is_gen(GenName::ToggleButton) && node.as_bool(PropName::Checked) {
                    self.call(w, target(), "SetValue", vec![Arg::Bool(true)]);
                }
                if let Some(bitmap) = self.bitmap_arg(node, PropName::Bitmap) {
                    self.call(w, target(), "SetBitmap", vec![bitmap]);
                }
            }
            GenName::StaticText => {
                if node.as_bool(PropName::Markup) {
                    self.call(
                        w,
                        target(),
                        "SetLabelMarkup",
                        vec![Arg::str(node.as_str(PropName::Label))],
                    );
                }
                let wrap = node.as_int(PropName::Wrap);
                if wrap > 0 {
                    self.call(w, target(), "Wrap", vec![Arg::Int(wrap)]);
                }
            }
            GenName::StaticBitmap => {
                let mode = match node.as_str(PropName::ScaleMode) {
                    "Fill" => 1,
                    "AspectFit" => 2,
                    "AspectFill" => 3,
                    _ => 0,
                };
                if mode != 0 {
                    self.call(w, target(), "SetScaleMode", vec![Arg::Int(mode)]);
                }
            }
            GenName::Gauge => {
                let value: i64 = node.as_str(PropName::Value).trim().parse().unwrap_or(0);
                if value > 0 {
                    self.call(w, target(), "SetValue", vec![Arg::Int(value)]);
                }
            }
            GenName::CollapsiblePane if node.has_prop(PropName::Collapsed) && !node.as_bool(PropName::Collapsed) => {
                self.call(w, target(), "Expand", Vec::new());
            }
            GenName::ScrolledWindow => {
                self.call(w, target(), "SetScrollRate", vec![Arg::Int(5), Arg::Int(5)]);
            }
            GenName::WizardPage => self.chain_wizard_page(w, node),
            _ => {}
        }
    }

    /// Link a wizard page to the one before it; the first page sizes the
    /// wizard's page area.
    fn chain_wizard_page(&self, w: &mut CodeWriter, node: &'t Node) {
        let tree = self.ctx.tree();
        let Some(parent) = tree.parent(node.id()) else {
            return;
        };
        let previous = parent
            .children()
            .iter()
            .map(|id| tree.node(*id))
            .take_while(|sibling| sibling.id() != node.id())
            .filter(|sibling| sibling.is_gen(GenName::WizardPage))
            .last();
        match previous {
            Some(previous) => self.call(
                w,
                Target::Var(self.var(previous)),
                "Chain",
                vec![Arg::Var(self.var(node))],
            ),
            None => {
                let area = Arg::call(Target::This, "GetPageAreaSizer", Vec::new());
                self.call(
                    w,
                    Target::Expr(Box::new(area)),
                    "Add",
                    vec![Arg::Var(self.var(node))],
                );
            }
        }
    }

    fn form_settings(&mut self, w: &mut CodeWriter, form: &Node) {
        let start = w.len();
        if let Some((width, height)) = parse_size(form.as_str(PropName::MinSize)) {
            if (width, height) != (-1, -1) {
                self.call(w, Target::This, "SetMinSize", vec![Arg::size(width, height)]);
            }
        }
        if matches!(form.gen(), GenName::Dialog | GenName::Frame) {
            if let Some(icon) = self.bitmap_arg(form, PropName::Icon) {
                let icon = Arg::call(Target::Expr(Box::new(icon)), "GetIconFor", vec![Arg::This]);
                self.call(w, Target::This, "SetIcon", vec![icon]);
            }
        }
        if !form.as_str(PropName::Tooltip).is_empty() {
            self.call(w, Target::This, "SetToolTip", vec![Arg::str(form.as_str(PropName::Tooltip))]);
        }
        if w.len() > start {
            w.blank();
        }
    }

    fn form_after_children(&self, w: &mut CodeWriter, form: &Node) {
        match form.gen() {
            GenName::ToolBarForm | GenName::RibbonBarForm => {
                self.call(w, Target::This, "Realize", Vec::new());
            }
            GenName::Dialog | GenName::Frame => {
                let center = form.as_str(PropName::Center);
                if !center.is_empty() && center != "no" {
                    w.blank();
                    self.call(w, Target::This, "Centre", vec![Arg::constant(center)]);
                }
            }
            _ => {}
        }
    }

    // After children

    fn after_children(&mut self, w: &mut CodeWriter, node: &'t Node) {
        let tree = self.ctx.tree();
        let form = self.ctx.form();
        let var = self.var(node);
        match node.gen() {
            GenName::ToolBar | GenName::AuiToolBar => {
                self.call(w, Target::Var(var.clone()), "Realize", Vec::new());
                if form.is_gen(GenName::Frame) && is_child_of_form(tree, node) {
                    self.call(w, Target::This, "SetToolBar", vec![Arg::Var(var.clone())]);
                }
            }
            GenName::MenuBar => {
                if form.is_gen(GenName::Frame) {
                    self.call(w, Target::This, "SetMenuBar", vec![Arg::Var(var.clone())]);
                }
                return;
            }
            GenName::Menu | GenName::SubMenu => {
                if let Some(parent) = self.menu_parent(node) {
                    let label = Arg::str(node.as_str(PropName::Label));
                    let method = if node.is_gen(GenName::SubMenu) {
                        "AppendSubMenu"
                    } else {
                        "Append"
                    };
                    self.call(w, parent, method, vec![Arg::Var(var), label]);
                }
                return;
            }
            GenName::ToolDropdown => {
                if !node.children().is_empty() {
                    if let Some(toolbar) = self.tool_parent(node) {
                        let menu = self.dropdown_menu(node);
                        self.call(w, toolbar, "SetDropdownMenu", vec![self.id_arg(node), Arg::Var(menu)]);
                    }
                }
                return;
            }
            GenName::BookPage => return,
            GenName::SplitterWindow => self.split(w, node),
            GenName::StatusBar => {
                if form.is_gen(GenName::Frame) && is_child_of_form(tree, node) {
                    self.call(w, Target::This, "SetStatusBar", vec![Arg::Var(var.clone())]);
                    return;
                }
            }
            _ => {}
        }
        if matches!(node.gen_type(), GenType::MenuItem | GenType::Tool | GenType::Timer | GenType::Spacer) {
            return;
        }
        self.attach_to_parent(w, node, var);
    }

    fn attach_to_parent(&self, w: &mut CodeWriter, node: &'t Node, var: VarRef) {
        let tree = self.ctx.tree();
        let Some(parent) = tree.parent(node.id()) else {
            return;
        };

        if parent.gen().is_sizer() {
            let flags = sizer_flags(node);
            let flags = if flags.is_empty() {
                Arg::Int(0)
            } else {
                Arg::Const(flags)
            };
            self.call(
                w,
                Target::Var(self.var(parent)),
                "Add",
                vec![
                    Arg::Var(var),
                    Arg::Int(node.as_int(PropName::Proportion)),
                    flags,
                    Arg::Int(border_size(node)),
                ],
            );
            return;
        }

        if node.gen().is_sizer() {
            let target = match parent.gen() {
                _ if parent.is_form() => Target::This,
                GenName::CollapsiblePane => Target::Expr(Box::new(Arg::call(
                    Target::Var(self.var(parent)),
                    "GetPane",
                    Vec::new(),
                ))),
                _ => Target::Var(self.var(parent)),
            };
            self.call(w, target, "SetSizerAndFit", vec![Arg::Var(var)]);
            return;
        }

        self.add_page(w, node, var);
    }

    fn add_page(&self, w: &mut CodeWriter, node: &'t Node, var: VarRef) {
        let tree = self.ctx.tree();
        let Some(parent) = tree.parent(node.id()) else {
            return;
        };
        let label = Arg::str(node.as_str(PropName::Label));
        if node.is_gen(GenName::BookPage) && parent.is_gen(GenName::BookPage) {
            if let Some(book) = tree.ancestors(node.id()).find(|ancestor| ancestor.gen().is_book()) {
                self.call(w, self.target(book), "AddSubPage", vec![Arg::Var(var), label]);
            }
            return;
        }
        if parent.gen().is_book() {
            let mut args = vec![Arg::Var(var), label];
            if node.as_bool(PropName::Select) {
                args.push(Arg::Bool(true));
            }
            self.call(w, self.target(parent), "AddPage", args);
        }
    }

    fn split(&self, w: &mut CodeWriter, node: &Node) {
        let tree = self.ctx.tree();
        let panes: Vec<&Node> = tree
            .children(node.id())
            .filter(|child| !child.gen().is_sizer() && child.gen_type() != GenType::Timer)
            .collect();
        let target = || Target::Var(self.var(node));
        match panes.as_slice() {
            [only] => self.call(w, target(), "Initialize", vec![Arg::Var(self.var(only))]),
            [first, second, ..] => {
                let method = if node.is_prop_value(PropName::SplitMode, "wxSPLIT_HORIZONTAL") {
                    "SplitHorizontally"
                } else {
                    "SplitVertically"
                };
                let mut args = vec![Arg::Var(self.var(first)), Arg::Var(self.var(second))];
                let sash = node.as_int(PropName::SashPos);
                if sash != 0 {
                    args.push(Arg::Int(sash));
                }
                self.call(w, target(), method, args);
            }
            [] => {}
        }
    }

    fn parent_sizer(&self, node: &Node) -> Option<VarRef> {
        self.ctx
            .tree()
            .parent(node.id())
            .filter(|parent| parent.gen().is_sizer())
            .map(|parent| self.var(parent))
    }

    /// The menu (or menu bar) a menu node is appended to.
    fn menu_parent(&self, node: &Node) -> Option<Target> {
        let parent = self.ctx.tree().parent(node.id())?;
        match parent.gen() {
            GenName::MenuBarForm => Some(Target::This),
            GenName::MenuBar | GenName::Menu | GenName::SubMenu => Some(Target::Var(self.var(parent))),
            GenName::ContextMenuEvent => Some(Target::Var(VarRef::local(CONTEXT_MENU_VAR))),
            GenName::ToolDropdown => Some(Target::Var(self.dropdown_menu(parent))),
            _ => None,
        }
    }

    fn tool_parent(&self, node: &Node) -> Option<Target> {
        let parent = self.ctx.tree().parent(node.id())?;
        match parent.gen() {
            GenName::ToolBarForm => Some(Target::This),
            GenName::ToolBar | GenName::AuiToolBar | GenName::RibbonButtonBar => {
                Some(Target::Var(self.var(parent)))
            }
            _ => None,
        }
    }
}

/// Kinds the walk knows how to create inside a form.
fn has_construction(gen: GenName) -> bool {
    !matches!(
        gen.gen_type(),
        GenType::Project | GenType::Folder | GenType::Images | GenType::Form | GenType::ContextMenu
    )
}

fn is_child_of_form(tree: &DesignTree, node: &Node) -> bool {
    tree.parent(node.id()).is_some_and(Node::is_form)
}

/// `style` and `window_style` joined, with `implied` in front when given.
fn combined_style(node: &Node, implied: &str) -> String {
    [implied, node.as_str(PropName::Style), node.as_str(PropName::WindowStyle)]
        .into_iter()
        .flat_map(|flags| flags.split('|'))
        .map(str::trim)
        .filter(|flag| !flag.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}

fn sizer_flags(node: &Node) -> String {
    [
        node.as_str(PropName::Alignment),
        node.as_str(PropName::Borders),
        node.as_str(PropName::Flags),
    ]
    .into_iter()
    .flat_map(|flags| flags.split('|'))
    .map(str::trim)
    .filter(|flag| !flag.is_empty())
    .collect::<Vec<_>>()
    .join("|")
}

fn border_size(node: &Node) -> i64 {
    node.prop(PropName::BorderSize).map(|prop| prop.as_int()).unwrap_or(5)
}

fn int_or(node: &Node, prop: PropName, default: i64) -> i64 {
    node.as_str(prop).trim().parse().unwrap_or(default)
}

/// Parse `"w,h"` (optionally bracketed). Returns `None` when either part is
/// missing or not a number.
pub fn parse_size(value: &str) -> Option<(i64, i64)> {
    let value = value.trim().trim_start_matches('[').trim_end_matches(']');
    let (width, height) = value.split_once(',')?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

fn is_default_size(value: &str) -> bool {
    matches!(parse_size(value), None | Some((-1, -1)))
}

fn point_arg(value: &str) -> Arg {
    match parse_size(value) {
        Some((x, y)) if (x, y) != (-1, -1) => Arg::Point(x, y),
        _ => Arg::constant("wxDefaultPosition"),
    }
}

/// `wxSize` from a `"w,h"` property, or `wxDefaultSize`.
fn size_arg(value: &str) -> Arg {
    match parse_size(value) {
        Some((width, height)) => Arg::size(width, height),
        None => Arg::constant("wxDefaultSize"),
    }
}

/// Items of a choices property: double-quoted strings, or `;`-separated
/// values when nothing is quoted.
pub fn parse_choices(value: &str) -> Vec<String> {
    if !value.contains('"') {
        return value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();
    }
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                items.push(std::mem::take(&mut current));
                quoted = false;
            }
            '"' => quoted = true,
            '\\' if quoted => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if quoted => current.push(c),
            _ => {}
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::backend_for;
    use crate::language::GenLang;
    use formgen_core::NodeBuilder;

    fn construct(tree: &DesignTree, language: GenLang) -> (String, Vec<String>) {
        let ctx = GenerationContext::new(tree, tree.forms()[0], language).unwrap();
        let backend = backend_for(language).unwrap();
        let mut w = CodeWriter::new(backend.indent_unit());
        let mut walk = ConstructWalk::new(&ctx, backend.as_ref());
        walk.form(&mut w);
        (w.finish(), walk.into_warnings())
    }

    fn project(form: NodeBuilder) -> DesignTree {
        DesignTree::new(NodeBuilder::new(GenName::Project).with_child(form))
    }

    fn dialog(children: Vec<NodeBuilder>) -> DesignTree {
        project(
            NodeBuilder::new(GenName::Dialog)
                .with_prop(PropName::ClassName, "MyDialog")
                .with_child(NodeBuilder::new(GenName::VerticalBoxSizer).with_children(children)),
        )
    }

    #[test]
    fn test_sizer_children_are_added_after_creation() {
        let tree = dialog(vec![NodeBuilder::new(GenName::Button)
            .with_prop(PropName::VarName, "m_ok")
            .with_prop(PropName::Label, "OK")
            .with_prop(PropName::Borders, "wxALL")
            .with_prop(PropName::BorderSize, "5")]);
        let (code, warnings) = construct(&tree, GenLang::Cpp);
        assert!(warnings.is_empty());
        let expected = "auto* box_sizer = new wxBoxSizer(wxVERTICAL);\n\
                        m_ok = new wxButton(this, wxID_ANY, \"OK\");\n\
                        box_sizer->Add(m_ok, 0, wxALL, 5);\n\
                        SetSizerAndFit(box_sizer);\n";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_python_spelling() {
        let tree = dialog(vec![NodeBuilder::new(GenName::TextCtrl)
            .with_prop(PropName::VarName, "m_name")
            .with_prop(PropName::Size, "200,-1")
            .with_prop(PropName::Tooltip, "Your name")]);
        let (code, _) = construct(&tree, GenLang::Python);
        assert!(code.contains("self.m_name = wx.TextCtrl(self, wx.ID_ANY, \"\", wx.DefaultPosition, wx.Size(200, -1))"));
        assert!(code.contains("self.m_name.SetToolTip(\"Your name\")"));
        assert!(code.contains("box_sizer.Add(self.m_name, 0, 0, 5)"));
        assert!(code.ends_with("self.SetSizerAndFit(box_sizer)\n"));
    }

    #[test]
    fn test_unsupported_node_keeps_siblings() {
        let tree = dialog(vec![
            NodeBuilder::new(GenName::Button).with_prop(PropName::VarName, "m_first"),
            NodeBuilder::new(GenName::Frame).with_prop(PropName::VarName, "nested"),
            NodeBuilder::new(GenName::Button).with_prop(PropName::VarName, "m_second"),
        ]);
        let (code, warnings) = construct(&tree, GenLang::Cpp);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("nested"));
        assert!(code.contains("// wxFrame (nested) cannot be generated for C++"));
        assert!(code.contains("m_second = new wxButton(this, wxID_ANY, wxEmptyString);"));
        assert!(code.contains("box_sizer->Add(m_second, 0, 0, 5);"));
    }

    #[test]
    fn test_ribbon_placeholder_in_perl() {
        let tree = dialog(vec![
            NodeBuilder::new(GenName::RibbonPanel).with_prop(PropName::VarName, "m_panel"),
            NodeBuilder::new(GenName::CheckBox)
                .with_prop(PropName::VarName, "m_check")
                .with_prop(PropName::Checked, "1"),
        ]);
        let (code, warnings) = construct(&tree, GenLang::Perl);
        assert_eq!(warnings.len(), 1);
        assert!(code.contains("# wxRibbonPanel (m_panel) cannot be generated for Perl"));
        assert!(code.contains("$self->{m_check}->SetValue(1);"));
    }

    #[test]
    fn test_platform_wrapped_node() {
        let tree = dialog(vec![NodeBuilder::new(GenName::Button)
            .with_prop(PropName::VarName, "m_win")
            .with_prop(PropName::Platforms, "Windows")]);
        let (code, _) = construct(&tree, GenLang::Cpp);
        let lines: Vec<&str> = code.lines().collect();
        let begin = lines.iter().position(|line| *line == "#if defined(__WINDOWS__)").unwrap();
        assert!(lines[begin + 1].starts_with("m_win = new wxButton"));
        assert_eq!(lines[begin + 3], "#endif  // Windows");
    }

    #[test]
    fn test_static_box_children_use_the_box() {
        let tree = project(
            NodeBuilder::new(GenName::PanelForm)
                .with_prop(PropName::ClassName, "Settings")
                .with_child(
                    NodeBuilder::new(GenName::StaticBoxSizer)
                        .with_prop(PropName::Label, "Options")
                        .with_child(NodeBuilder::new(GenName::CheckBox).with_prop(PropName::VarName, "m_opt")),
                ),
        );
        let (code, _) = construct(&tree, GenLang::Cpp);
        assert!(code.contains("auto* static_box_sizer = new wxStaticBoxSizer(wxVERTICAL, this, \"Options\");"));
        assert!(code.contains("m_opt = new wxCheckBox(static_box_sizer->GetStaticBox(), wxID_ANY, wxEmptyString);"));
    }

    #[test]
    fn test_books_and_sub_pages() {
        let tree = project(
            NodeBuilder::new(GenName::Frame)
                .with_prop(PropName::ClassName, "Main")
                .with_child(
                    NodeBuilder::new(GenName::Treebook)
                        .with_prop(PropName::VarName, "m_book")
                        .with_child(
                            NodeBuilder::new(GenName::BookPage)
                                .with_prop(PropName::VarName, "page")
                                .with_prop(PropName::Label, "General")
                                .with_child(
                                    NodeBuilder::new(GenName::BookPage)
                                        .with_prop(PropName::VarName, "sub")
                                        .with_prop(PropName::Label, "Advanced"),
                                ),
                        ),
                ),
        );
        let (code, _) = construct(&tree, GenLang::Cpp);
        assert!(code.contains("auto* sub = new wxPanel(m_book, wxID_ANY);"));
        assert!(code.contains("m_book->AddSubPage(sub, \"Advanced\");"));
        assert!(code.contains("m_book->AddPage(page, \"General\");"));
        let page = code.find("AddPage(page").unwrap();
        let sub_created = code.find("auto* sub = ").unwrap();
        let sub = code.find("AddSubPage").unwrap();
        assert!(page < sub_created);
        assert!(sub_created < sub);
    }

    #[test]
    fn test_page_is_added_before_its_sub_pages() {
        let tree = project(
            NodeBuilder::new(GenName::Frame)
                .with_prop(PropName::ClassName, "Main")
                .with_child(
                    NodeBuilder::new(GenName::Treebook)
                        .with_prop(PropName::VarName, "m_book")
                        .with_children([
                            NodeBuilder::new(GenName::BookPage)
                                .with_prop(PropName::VarName, "first")
                                .with_prop(PropName::Label, "First")
                                .with_child(
                                    NodeBuilder::new(GenName::BookPage)
                                        .with_prop(PropName::VarName, "first_sub")
                                        .with_prop(PropName::Label, "First sub"),
                                ),
                            NodeBuilder::new(GenName::BookPage)
                                .with_prop(PropName::VarName, "second")
                                .with_prop(PropName::Label, "Second"),
                        ]),
                ),
        );
        let (code, _) = construct(&tree, GenLang::Python);
        let lines: Vec<&str> = code.lines().map(str::trim).filter(|line| line.contains("Add")).collect();
        assert_eq!(
            lines,
            vec![
                "self.m_book.AddPage(first, \"First\")",
                "self.m_book.AddSubPage(first_sub, \"First sub\")",
                "self.m_book.AddPage(second, \"Second\")",
            ]
        );
    }

    #[test]
    fn test_unsupported_node_is_not_platform_wrapped() {
        let tree = dialog(vec![
            NodeBuilder::new(GenName::Frame)
                .with_prop(PropName::VarName, "nested")
                .with_prop(PropName::Platforms, "Windows"),
            NodeBuilder::new(GenName::Button).with_prop(PropName::VarName, "m_second"),
        ]);
        let (code, warnings) = construct(&tree, GenLang::Python);
        assert_eq!(warnings.len(), 1);
        assert!(!code.contains("wx.Platform"));
        assert!(code.contains("# wxFrame (nested) cannot be generated for Python"));
        assert!(code.contains("self.m_second = wx.Button("));
    }

    #[test]
    fn test_menus_and_tools() {
        let tree = project(
            NodeBuilder::new(GenName::Frame)
                .with_prop(PropName::ClassName, "Main")
                .with_child(
                    NodeBuilder::new(GenName::MenuBar).with_child(
                        NodeBuilder::new(GenName::Menu)
                            .with_prop(PropName::Label, "&File")
                            .with_child(
                                NodeBuilder::new(GenName::MenuItem)
                                    .with_prop(PropName::VarName, "item_open")
                                    .with_prop(PropName::Label, "&Open")
                                    .with_prop(PropName::Shortcut, "Ctrl+O")
                                    .with_prop(PropName::Id, "wxID_OPEN"),
                            )
                            .with_child(NodeBuilder::new(GenName::Separator)),
                    ),
                )
                .with_child(
                    NodeBuilder::new(GenName::ToolBar)
                        .with_prop(PropName::ClassAccess, "none")
                        .with_child(
                            NodeBuilder::new(GenName::Tool)
                                .with_prop(PropName::Id, "ID_RUN")
                                .with_prop(PropName::Label, "Run"),
                        ),
                ),
        );
        let (code, _) = construct(&tree, GenLang::Cpp);
        assert!(code.contains("auto* item_open = new wxMenuItem(menu, wxID_OPEN, \"&Open\\tCtrl+O\", wxEmptyString, wxITEM_NORMAL);"));
        assert!(code.contains("menu->Append(item_open);"));
        assert!(code.contains("menu->AppendSeparator();"));
        assert!(code.contains("menu_bar->Append(menu, \"&File\");"));
        assert!(code.contains("SetMenuBar(menu_bar);"));
        assert!(code.contains("tool_bar->AddTool(ID_RUN, \"Run\", wxNullBitmap, wxEmptyString, wxITEM_NORMAL);"));
        assert!(code.contains("tool_bar->Realize();"));
        assert!(code.contains("SetToolBar(tool_bar);"));
    }

    #[test]
    fn test_context_menu_items_are_locals() {
        let tree = project(
            NodeBuilder::new(GenName::PanelForm)
                .with_prop(PropName::ClassName, "Panel")
                .with_child(
                    NodeBuilder::new(GenName::ContextMenuEvent).with_child(
                        NodeBuilder::new(GenName::MenuItem)
                            .with_prop(PropName::VarName, "m_copy")
                            .with_prop(PropName::ClassAccess, "protected:")
                            .with_prop(PropName::Label, "Copy"),
                    ),
                ),
        );
        let ctx = GenerationContext::new(&tree, tree.forms()[0], GenLang::Python).unwrap();
        let backend = backend_for(GenLang::Python).unwrap();
        let builder = tree.iter().find(|node| node.is_gen(GenName::ContextMenuEvent)).unwrap();

        let mut main = CodeWriter::new("    ");
        let mut walk = ConstructWalk::new(&ctx, backend.as_ref());
        walk.form(&mut main);
        assert!(!main.finish().contains("m_copy"));

        let mut handler = CodeWriter::new("    ");
        let menu = walk.context_menu(&mut handler, builder);
        assert_eq!(menu, VarRef::local("menu"));
        let code = handler.finish();
        assert!(code.starts_with("menu = wx.Menu()\n"));
        assert!(code.contains("m_copy = wx.MenuItem(menu, wx.ID_ANY, \"Copy\", \"\", wx.ITEM_NORMAL)"));
        assert!(code.contains("menu.Append(m_copy)"));
    }

    #[test]
    fn test_parse_size_and_choices() {
        assert_eq!(parse_size("100, 20"), Some((100, 20)));
        assert_eq!(parse_size("[16,16]"), Some((16, 16)));
        assert_eq!(parse_size("wide"), None);
        assert_eq!(parse_choices("\"one\" \"two \\\"2\\\"\""), vec!["one", "two \"2\""]);
        assert_eq!(parse_choices("a; b;"), vec!["a", "b"]);
    }
}
