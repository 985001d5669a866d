//! C++ backend.
//!
//! Produces a header declaring the class and a source file defining `Create()`.
//! Objects are created with `new` and owned by their wx parent; timers are the
//! only members held by value.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use formgen_core::asset::array_name_for;
use formgen_core::{EmbeddedAsset, ImageDescription, ImageKind, Platform, WxLibrary};

use super::{
    byte_rows, escape_string, Backend, BraceStyle, FormInfo, ImportSet, MemberDecl, Param, ValidatorInit,
    ValidatorVar,
};
use crate::context::{GenerationContext, ImageNeeds};
use crate::language::GenLang;
use crate::platform::Grouped;
use crate::stmt::{BindSource, EventBinding, VarRef};
use crate::writer::CodeWriter;

const IMG_NAMESPACE: &str = "wxue_img";

/// C++ code generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct CppBackend;

impl CppBackend {
    pub fn new() -> Self {
        Self
    }

    fn param_list(&self, params: &[Param], with_defaults: bool) -> String {
        params
            .iter()
            .map(|param| match (&param.default, with_defaults) {
                (Some(default), true) => {
                    format!("{} {} = {}", param.cpp_type, param.name, self.render_arg(default))
                }
                _ => format!("{} {}", param.cpp_type, param.name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_grouped(&self, w: &mut CodeWriter, grouped: &Grouped<BTreeSet<String>>) {
        for line in &grouped.unconditional {
            w.writeln(line);
        }
        for (selector, lines) in &grouped.by_platform {
            self.begin_platform(w, selector);
            for line in lines {
                w.writeln(line);
            }
            self.end_platform(w, selector);
        }
    }

    fn image_array(&self, image: &ImageDescription) -> String {
        format!("{IMG_NAMESPACE}::{}", array_name_for(&image.path))
    }
}

/// Event class passed to a handler for `event`.
pub fn event_class(event: &str) -> &'static str {
    let name = event.strip_prefix("wxEVT_").unwrap_or(event);
    match name {
        "CLOSE_WINDOW" => "wxCloseEvent",
        "INIT_DIALOG" => "wxInitDialogEvent",
        "SIZE" => "wxSizeEvent",
        "PAINT" => "wxPaintEvent",
        "TIMER" => "wxTimerEvent",
        "CONTEXT_MENU" => "wxContextMenuEvent",
        "HYPERLINK" => "wxHyperlinkEvent",
        "SPINCTRL" => "wxSpinEvent",
        "COLLAPSIBLEPANE_CHANGED" => "wxCollapsiblePaneEvent",
        "SPLITTER_SASH_POS_CHANGED" | "SPLITTER_SASH_POS_CHANGING" => "wxSplitterEvent",
        "UPDATE_UI" => "wxUpdateUIEvent",
        "SET_FOCUS" | "KILL_FOCUS" => "wxFocusEvent",
        "KEY_DOWN" | "KEY_UP" | "CHAR" | "CHAR_HOOK" => "wxKeyEvent",
        name if name.starts_with("LEFT_")
            || name.starts_with("RIGHT_")
            || name.starts_with("MIDDLE_")
            || name.starts_with("MOUSE")
            || name.starts_with("ENTER_WINDOW")
            || name.starts_with("LEAVE_WINDOW")
            || name == "MOTION" =>
        {
            "wxMouseEvent"
        }
        name if name.starts_with("CALENDAR_") => "wxCalendarEvent",
        name if name.starts_with("STC_") => "wxStyledTextEvent",
        name if name.starts_with("TREE_") => "wxTreeEvent",
        name if name.starts_with("SCROLL_") => "wxScrollEvent",
        name if name.starts_with("NOTEBOOK_")
            || name.starts_with("TREEBOOK_")
            || name.starts_with("CHOICEBOOK_")
            || name.starts_with("LISTBOOK_")
            || name.starts_with("BOOKCTRL_") =>
        {
            "wxBookCtrlEvent"
        }
        name if name.starts_with("AUINOTEBOOK_") => "wxAuiNotebookEvent",
        name if name.starts_with("AUITOOLBAR_") => "wxAuiToolBarEvent",
        name if name.starts_with("RIBBONBUTTONBAR_") => "wxRibbonButtonBarEvent",
        name if name.starts_with("WIZARD_") => "wxWizardEvent",
        name if name.starts_with("HTML_") => "wxHtmlLinkEvent",
        name if name.starts_with("RICHTEXT_") => "wxRichTextEvent",
        _ => "wxCommandEvent",
    }
}

impl Backend for CppBackend {
    fn language(&self) -> GenLang {
        GenLang::Cpp
    }

    fn brace_style(&self) -> BraceStyle {
        BraceStyle::Braces
    }

    fn indent_unit(&self) -> &'static str {
        "\t"
    }

    fn comment_prefix(&self) -> &'static str {
        "//"
    }

    fn statement_end(&self) -> &'static str {
        ";"
    }

    fn holds_by_value(&self) -> bool {
        true
    }

    fn this_ref(&self) -> &'static str {
        "this"
    }

    fn member_ref(&self, name: &str) -> String {
        name.to_string()
    }

    fn local_ref(&self, name: &str) -> String {
        name.to_string()
    }

    fn local_decl(&self, name: &str) -> String {
        format!("auto* {name}")
    }

    fn string_literal(&self, value: &str) -> String {
        if value.is_empty() {
            "wxEmptyString".to_string()
        } else {
            format!("\"{}\"", escape_string(value, &[]))
        }
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }

    fn null_literal(&self) -> &'static str {
        "nullptr"
    }

    fn wx_const(&self, name: &str) -> String {
        name.to_string()
    }

    fn custom_id(&self, name: &str) -> String {
        name.to_string()
    }

    fn class_token(&self, class: &str, _library: WxLibrary) -> String {
        class.to_string()
    }

    fn generic_class_token(&self, class: &str) -> Option<String> {
        Some(class.to_string())
    }

    fn new_instance(&self, class_token: &str, args: &str) -> String {
        format!("new {class_token}({args})")
    }

    fn value_instance(&self, class_token: &str, args: &str) -> String {
        format!("{class_token}({args})")
    }

    fn method_call(&self, target: Option<&str>, by_value: bool, method: &str, args: &str) -> String {
        match target {
            None => format!("{method}({args})"),
            Some(target) if by_value => format!("{target}.{method}({args})"),
            Some(target) => format!("{target}->{method}({args})"),
        }
    }

    fn bitmap_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed | ImageKind::Header => {
                let array = self.image_array(image);
                format!("wxBitmapBundle::FromBitmap({IMG_NAMESPACE}::image({array}, sizeof({array})))")
            }
            ImageKind::Svg => {
                let array = self.image_array(image);
                let (width, height) = image.size.unwrap_or((16, 16));
                format!("{IMG_NAMESPACE}::bundle_svg({array}, sizeof({array}), wxSize({width}, {height}))")
            }
            ImageKind::Art => {
                let (art_id, client) = image.art_parts();
                format!(
                    "wxArtProvider::GetBitmapBundle({art_id}, {})",
                    client.unwrap_or("wxART_OTHER")
                )
            }
            ImageKind::Xpm => format!(
                "wxBitmapBundle::FromBitmap(wxBitmap({}))",
                array_name_for(&image.path)
            ),
        }
    }

    fn animation_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed | ImageKind::Header => {
                let array = self.image_array(image);
                format!("{IMG_NAMESPACE}::animation({array}, sizeof({array}))")
            }
            _ => "wxNullAnimation".to_string(),
        }
    }

    fn member_declaration(&self, decl: &MemberDecl) -> Option<String> {
        let pointer = if decl.by_value { "" } else { "*" };
        let mut line = format!("{}{pointer} {};", decl.class_token, decl.var_name);
        if !decl.comment.is_empty() {
            line.push_str(&format!("  // {}", decl.comment));
        }
        Some(line)
    }

    fn validator_declaration(&self, var: &ValidatorVar) -> Option<String> {
        let init = match &var.init {
            ValidatorInit::Bool(value) => Some(self.bool_literal(*value).to_string()),
            ValidatorInit::Number(value) => Some(value.clone()),
            ValidatorInit::Str(value) if !value.is_empty() => Some(self.string_literal(value)),
            ValidatorInit::Str(_) | ValidatorInit::None => None,
        };
        Some(match init {
            Some(init) => format!("{} {} {{ {init} }};", var.data_type, var.name),
            None => format!("{} {};", var.data_type, var.name),
        })
    }

    fn validator_init(&self, _var: &ValidatorVar) -> Option<String> {
        None
    }

    fn validator_binding(&self, control: &VarRef, var: &ValidatorVar) -> Option<String> {
        Some(format!(
            "{}->SetValidator(wxGenericValidator(&{}));",
            self.var_expr(control),
            var.name
        ))
    }

    fn id_declarations(&self, enum_ids: &BTreeSet<String>, const_ids: &BTreeMap<String, String>) -> Vec<String> {
        let mut lines = Vec::new();
        if !enum_ids.is_empty() {
            lines.push("enum".to_string());
            lines.push("{".to_string());
            let count = enum_ids.len();
            for (index, id) in enum_ids.iter().enumerate() {
                let init = if index == 0 { " = wxID_HIGHEST + 1" } else { "" };
                let comma = if index + 1 < count { "," } else { "" };
                lines.push(format!("\t{id}{init}{comma}"));
            }
            lines.push("};".to_string());
        }
        for (name, value) in const_ids {
            lines.push(format!("static const int {name} = {value};"));
        }
        lines
    }

    fn imports(&self, imports: &ImportSet, body: &str) -> Vec<String> {
        let mut headers = BTreeSet::new();
        let needs = &imports.needs;
        if needs.image_function || needs.header_function || needs.animation_function {
            headers.insert("wx/mstream.h");
        }
        if needs.svg_function {
            headers.insert("wx/bmpbndl.h");
        }
        if needs.art_provider {
            headers.insert("wx/artprov.h");
        }
        if needs.animation_function {
            headers.insert("wx/animate.h");
        }
        if body.contains("wxGenericValidator") {
            headers.insert("wx/valgen.h");
        }
        headers
            .into_iter()
            .map(|header| format!("#include <{header}>"))
            .collect()
    }

    fn platform_condition(&self, platforms: &[Platform]) -> String {
        if platforms.is_empty() {
            return "#if 0".to_string();
        }
        let defines = platforms
            .iter()
            .map(|platform| format!("defined({})", platform.cpp_define()))
            .collect::<Vec<_>>()
            .join(" || ");
        format!("#if {defines}")
    }

    fn begin_platform(&self, w: &mut CodeWriter, selector: &str) {
        w.write_raw(self.platform_condition(&Platform::from_selector(selector)));
    }

    fn end_platform(&self, w: &mut CodeWriter, selector: &str) {
        w.write_raw(format!("#endif  // {selector}"));
    }

    fn event_binding(&self, binding: &EventBinding<'_>) -> Option<String> {
        let event = binding.event;
        let (handler, this) = if binding.handler.starts_with('[') {
            (binding.handler.to_string(), "")
        } else {
            (format!("&{}::{}", binding.class_name, binding.handler), ", this")
        };
        Some(match &binding.source {
            BindSource::Form => format!("Bind({event}, {handler}{this});"),
            BindSource::Window(var) => {
                format!("{}->Bind({event}, {handler}{this});", self.var_expr(var))
            }
            BindSource::Item(id) => {
                format!("Bind({event}, {handler}{this}, {});", self.render_arg(id))
            }
        })
    }

    fn source_preamble(&self, info: &FormInfo) -> Vec<String> {
        vec![format!("#include \"{}{}\"", info.base_file, info.header_ext)]
    }

    fn image_data(&self, asset: &EmbeddedAsset) -> Vec<String> {
        let payload = asset.payload();
        let rows = byte_rows(&payload, 24);
        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(format!("const unsigned char {}[{}] {{", asset.array_name(), payload.len()));
        let count = rows.len();
        for (index, row) in rows.into_iter().enumerate() {
            let comma = if index + 1 < count { "," } else { "" };
            lines.push(format!("\t{row}{comma}"));
        }
        lines.push("};".to_string());
        lines
    }

    fn image_helpers(&self, needs: &ImageNeeds) -> Vec<String> {
        let mut lines = Vec::new();
        if needs.image_function || needs.header_function {
            lines.extend(
                [
                    "wxImage image(const unsigned char* data, size_t size)",
                    "{",
                    "\twxMemoryInputStream stream(data, size);",
                    "\twxImage image;",
                    "\timage.LoadFile(stream);",
                    "\treturn image;",
                    "}",
                    "",
                ]
                .map(String::from),
            );
        }
        if needs.svg_function {
            lines.extend(
                [
                    "wxBitmapBundle bundle_svg(const unsigned char* data, size_t size, wxSize def_size)",
                    "{",
                    "\tstd::string svg(reinterpret_cast<const char*>(data), size);",
                    "\treturn wxBitmapBundle::FromSVG(svg.c_str(), def_size);",
                    "}",
                    "",
                ]
                .map(String::from),
            );
        }
        if needs.animation_function {
            lines.extend(
                [
                    "wxAnimation animation(const unsigned char* data, size_t size)",
                    "{",
                    "\twxMemoryInputStream stream(data, size);",
                    "\twxAnimation animation;",
                    "\tanimation.Load(stream);",
                    "\treturn animation;",
                    "}",
                    "",
                ]
                .map(String::from),
            );
        }
        lines
    }

    fn images(&self, w: &mut CodeWriter, images: &[Arc<EmbeddedAsset>], needs: &ImageNeeds) {
        let helpers = self.image_helpers(needs);
        if images.is_empty() && helpers.is_empty() {
            return;
        }
        w.writeln(format!("namespace {IMG_NAMESPACE}"));
        w.writeln("{");
        w.indent();
        for line in helpers {
            w.writeln(line);
        }
        for asset in images {
            for line in self.image_data(asset) {
                w.writeln(line);
            }
            w.blank();
        }
        w.trim_trailing_blank();
        w.unindent();
        w.writeln(format!("}}  // namespace {IMG_NAMESPACE}"));
        w.blank();
    }

    fn class_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        for namespace in &info.namespaces {
            w.writeln(format!("namespace {namespace}"));
            w.writeln("{");
        }
        if !info.namespaces.is_empty() {
            w.blank();
        }
    }

    fn class_close(&self, w: &mut CodeWriter, info: &FormInfo) {
        for namespace in info.namespaces.iter().rev() {
            w.writeln(format!("}}  // namespace {namespace}"));
        }
    }

    fn constructor_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        if info.base_create {
            self.open_block(
                w,
                &format!("bool {}::Create({})", info.class_name, self.param_list(&info.params, false)),
            );
            w.writeln(format!("if (!{}::Create({}))", info.base_class, info.param_names()));
            w.indent();
            w.writeln("return false;");
            w.unindent();
            w.blank();
        } else {
            self.open_block(w, &format!("bool {}::Create()", info.class_name));
        }
    }

    fn constructor_close(&self, w: &mut CodeWriter, _info: &FormInfo) {
        w.blank();
        w.writeln("return true;");
        self.close_block(w);
        w.blank();
    }

    fn context_menu_open(&self, w: &mut CodeWriter, info: &FormInfo, handler: &str) {
        self.open_block(
            w,
            &format!("void {}::{handler}(wxContextMenuEvent& WXUNUSED(event))", info.class_name),
        );
    }

    fn context_menu_close(&self, w: &mut CodeWriter, menu: &VarRef) {
        let menu = self.var_expr(menu);
        w.writeln(format!("PopupMenu({menu});"));
        w.writeln(format!("delete {menu};"));
        self.close_block(w);
        w.blank();
    }

    fn header(&self, info: &FormInfo, ctx: &GenerationContext<'_>, imports: &ImportSet) -> Option<String> {
        let mut w = CodeWriter::new(self.indent_unit());
        self.banner(&mut w);
        w.writeln("#pragma once");
        w.blank();
        for header in &imports.system_headers {
            w.writeln(format!("#include <{header}>"));
        }
        w.blank();
        for header in &imports.local_headers {
            w.writeln(format!("#include \"{header}\""));
        }
        w.blank();

        for namespace in &info.namespaces {
            w.writeln(format!("namespace {namespace}"));
            w.writeln("{");
        }
        w.blank();

        w.writeln(format!("class {} : public {}", info.class_name, info.base_class));
        w.writeln("{");
        w.writeln("public:");
        w.indent();

        let ids = self.id_declarations(ctx.enum_ids(), ctx.const_ids());
        if !ids.is_empty() {
            for line in ids {
                w.writeln(line);
            }
            w.blank();
        }

        let params = self.param_list(&info.params, true);
        if info.base_create {
            w.writeln(format!("{}() {{}}", info.class_name));
            w.writeln(format!("{}({params})", info.class_name));
            w.writeln("{");
            w.indent();
            w.writeln(format!("Create({});", info.param_names()));
            w.unindent();
            w.writeln("}");
            w.blank();
            w.writeln(format!("bool Create({params});"));
        } else {
            w.writeln(format!(
                "{}({params}) : {}({})",
                info.class_name,
                info.base_class,
                info.param_names()
            ));
            w.writeln("{");
            w.indent();
            w.writeln("Create();");
            w.unindent();
            w.writeln("}");
            w.blank();
            w.writeln("bool Create();");
        }
        w.blank();
        self.write_grouped(&mut w, ctx.public_members());
        w.unindent();
        w.blank();

        w.writeln("protected:");
        w.indent();
        if !info.handlers.is_empty() || !info.context_menus.is_empty() {
            w.writeln("// Event handlers");
            w.blank();
            for (event, handler) in &info.handlers {
                w.writeln(format!(
                    "virtual void {handler}({}& event) {{ event.Skip(); }}",
                    event_class(event)
                ));
            }
            for handler in &info.context_menus {
                w.writeln(format!("void {handler}(wxContextMenuEvent& event);"));
            }
            w.blank();
        }
        self.write_grouped(&mut w, ctx.protected_members());
        w.trim_trailing_blank();
        w.unindent();
        w.writeln("};");

        if !info.namespaces.is_empty() {
            w.blank();
            for namespace in info.namespaces.iter().rev() {
                w.writeln(format!("}}  // namespace {namespace}"));
            }
        }
        Some(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{Arg, Scope, Stmt, Target};

    #[test]
    fn test_rendering() {
        let cpp = CppBackend::new();
        let stmt = Stmt::create(
            VarRef::local("box_sizer"),
            "wxBoxSizer",
            vec![Arg::constant("wxVERTICAL")],
        );
        assert_eq!(cpp.render_stmt(&stmt), "auto* box_sizer = new wxBoxSizer(wxVERTICAL);");

        let stmt = Stmt::call(
            Target::Var(VarRef::member("m_text")),
            "SetMinSize",
            vec![Arg::size(100, -1)],
        );
        assert_eq!(cpp.render_stmt(&stmt), "m_text->SetMinSize(wxSize(100, -1));");

        let stmt = Stmt::call(Target::This, "SetSizerAndFit", vec![Arg::Var(VarRef::local("box_sizer"))]);
        assert_eq!(cpp.render_stmt(&stmt), "SetSizerAndFit(box_sizer);");
    }

    #[test]
    fn test_timer_held_by_value() {
        let cpp = CppBackend::new();
        let var = VarRef {
            name: "m_timer".into(),
            scope: Scope::Member,
            by_value: true,
        };
        let stmt = Stmt::Create {
            var: var.clone(),
            class: "wxTimer".into(),
            args: vec![Arg::This],
            init_method: Some("SetOwner"),
        };
        assert_eq!(cpp.render_stmt(&stmt), "m_timer.SetOwner(this);");
        let start = Stmt::call(Target::Var(var), "Start", vec![Arg::Int(1000)]);
        assert_eq!(cpp.render_stmt(&start), "m_timer.Start(1000);");

        let decl = MemberDecl {
            var_name: "m_timer".into(),
            class_token: "wxTimer".into(),
            by_value: true,
            comment: String::new(),
            public: false,
        };
        assert_eq!(cpp.member_declaration(&decl).unwrap(), "wxTimer m_timer;");
    }

    #[test]
    fn test_literals_and_consts() {
        let cpp = CppBackend::new();
        assert_eq!(cpp.render_arg(&Arg::str("")), "wxEmptyString");
        assert_eq!(cpp.render_arg(&Arg::str("a \"b\"")), "\"a \\\"b\\\"\"");
        assert_eq!(cpp.render_arg(&Arg::constant("wxALL|wxEXPAND")), "wxALL|wxEXPAND");
        assert_eq!(cpp.render_arg(&Arg::Id(String::new())), "wxID_ANY");
        assert_eq!(cpp.render_arg(&Arg::Id("ID_SAVE=200".into())), "ID_SAVE");
    }

    #[test]
    fn test_validators() {
        let cpp = CppBackend::new();
        let var = ValidatorVar {
            name: "m_count".into(),
            data_type: "int".into(),
            init: ValidatorInit::Number("5".into()),
        };
        assert_eq!(cpp.validator_declaration(&var).unwrap(), "int m_count { 5 };");
        assert_eq!(
            cpp.validator_binding(&VarRef::member("m_spin"), &var).unwrap(),
            "m_spin->SetValidator(wxGenericValidator(&m_count));"
        );
        let text = ValidatorVar {
            name: "m_name".into(),
            data_type: "wxString".into(),
            init: ValidatorInit::Str(String::new()),
        };
        assert_eq!(cpp.validator_declaration(&text).unwrap(), "wxString m_name;");
    }

    #[test]
    fn test_ids() {
        let cpp = CppBackend::new();
        let enums: BTreeSet<String> = ["ID_A", "ID_B"].map(String::from).into();
        let consts: BTreeMap<String, String> = [("ID_C".to_string(), "300".to_string())].into();
        assert_eq!(
            cpp.id_declarations(&enums, &consts),
            vec![
                "enum",
                "{",
                "\tID_A = wxID_HIGHEST + 1,",
                "\tID_B",
                "};",
                "static const int ID_C = 300;",
            ]
        );
    }

    #[test]
    fn test_platform_blocks_are_not_indented() {
        let cpp = CppBackend::new();
        let mut w = CodeWriter::new("\t");
        w.indent();
        cpp.begin_platform(&mut w, "Windows|Mac");
        w.writeln("x();");
        cpp.end_platform(&mut w, "Windows|Mac");
        assert_eq!(
            w.finish(),
            "#if defined(__WINDOWS__) || defined(__WXOSX__)\n\tx();\n#endif  // Windows|Mac\n"
        );
    }

    #[test]
    fn test_event_bindings() {
        let cpp = CppBackend::new();
        let binding = EventBinding {
            event: "wxEVT_BUTTON",
            handler: "OnOK",
            class_name: "MyDialog",
            source: BindSource::Window(VarRef::member("m_ok")),
        };
        assert_eq!(
            cpp.event_binding(&binding).unwrap(),
            "m_ok->Bind(wxEVT_BUTTON, &MyDialog::OnOK, this);"
        );
        let menu = EventBinding {
            event: "wxEVT_MENU",
            handler: "[this](wxCommandEvent&) { Close(); }",
            class_name: "MyFrame",
            source: BindSource::Item(Arg::Id("ID_QUIT".into())),
        };
        assert_eq!(
            cpp.event_binding(&menu).unwrap(),
            "Bind(wxEVT_MENU, [this](wxCommandEvent&) { Close(); }, ID_QUIT);"
        );
    }

    #[test]
    fn test_images() {
        let cpp = CppBackend::new();
        let embed = ImageDescription::parse("Embed;images/Save-As.png").unwrap();
        assert_eq!(
            cpp.bitmap_expr(&embed),
            "wxBitmapBundle::FromBitmap(wxue_img::image(wxue_img::save_as_png, sizeof(wxue_img::save_as_png)))"
        );
        let art = ImageDescription::parse("Art;wxART_FILE_OPEN|wxART_TOOLBAR").unwrap();
        assert_eq!(
            cpp.bitmap_expr(&art),
            "wxArtProvider::GetBitmapBundle(wxART_FILE_OPEN, wxART_TOOLBAR)"
        );
        assert_eq!(event_class("wxEVT_CLOSE_WINDOW"), "wxCloseEvent");
        assert_eq!(event_class("wxEVT_LEFT_DOWN"), "wxMouseEvent");
        assert_eq!(event_class("wxEVT_CHECKBOX"), "wxCommandEvent");
    }
}
