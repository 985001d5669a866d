//! wxPython backend.

use std::collections::{BTreeMap, BTreeSet};

use formgen_core::asset::array_name_for;
use formgen_core::{EmbeddedAsset, ImageDescription, ImageKind, Platform, WxLibrary};

use super::{
    byte_rows, const_library, escape_string, event_library, is_wx_name, scripted_event_name, strip_wx, Backend,
    BraceStyle, FormInfo, ImportSet, MemberDecl, ValidatorInit, ValidatorVar,
};
use crate::context::ImageNeeds;
use crate::language::GenLang;
use crate::stmt::{BindSource, EventBinding, VarRef};
use crate::writer::CodeWriter;

const EXTENSION_MODULES: [&str; 6] = ["adv", "aui", "html", "ribbon", "richtext", "stc"];

/// Python code generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonBackend;

impl PythonBackend {
    pub fn new() -> Self {
        Self
    }

    fn module_prefix(library: WxLibrary) -> &'static str {
        match library {
            WxLibrary::Core => "wx.",
            WxLibrary::Adv => "wx.adv.",
            WxLibrary::Aui => "wx.aui.",
            WxLibrary::Html => "wx.html.",
            WxLibrary::Ribbon => "wx.ribbon.",
            WxLibrary::RichText => "wx.richtext.",
            WxLibrary::Stc => "wx.stc.",
        }
    }

    fn param_list(&self, info: &FormInfo) -> String {
        std::iter::once("self".to_string())
            .chain(info.params.iter().map(|param| match &param.default {
                Some(default) => format!("{}={}", param.name, self.render_arg(default)),
                None => param.name.to_string(),
            }))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Backend for PythonBackend {
    fn language(&self) -> GenLang {
        GenLang::Python
    }

    fn brace_style(&self) -> BraceStyle {
        BraceStyle::IndentOnly
    }

    fn indent_unit(&self) -> &'static str {
        "    "
    }

    fn comment_prefix(&self) -> &'static str {
        "#"
    }

    fn statement_end(&self) -> &'static str {
        ""
    }

    fn this_ref(&self) -> &'static str {
        "self"
    }

    fn member_ref(&self, name: &str) -> String {
        format!("self.{name}")
    }

    fn local_ref(&self, name: &str) -> String {
        name.to_string()
    }

    fn local_decl(&self, name: &str) -> String {
        name.to_string()
    }

    fn string_literal(&self, value: &str) -> String {
        format!("\"{}\"", escape_string(value, &[]))
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "True"
        } else {
            "False"
        }
    }

    fn null_literal(&self) -> &'static str {
        "None"
    }

    fn wx_const(&self, name: &str) -> String {
        if !is_wx_name(name) {
            return name.to_string();
        }
        let name = strip_wx(name);
        format!("{}{name}", Self::module_prefix(const_library(name)))
    }

    fn custom_id(&self, name: &str) -> String {
        format!("self.{name}")
    }

    fn class_token(&self, class: &str, library: WxLibrary) -> String {
        if is_wx_name(class) {
            format!("{}{}", Self::module_prefix(library), strip_wx(class))
        } else {
            class.to_string()
        }
    }

    fn generic_class_token(&self, class: &str) -> Option<String> {
        let token = match class {
            "wxGenericAnimationCtrl" => "wx.adv.GenericAnimationCtrl",
            "wxGenericCalendarCtrl" => "wx.adv.GenericCalendarCtrl",
            "wxGenericStaticBitmap" => "wx.GenericStaticBitmap",
            "wxGenericStaticText" => "wx.lib.stattext.GenStaticText",
            _ => return None,
        };
        Some(token.to_string())
    }

    fn new_instance(&self, class_token: &str, args: &str) -> String {
        format!("{class_token}({args})")
    }

    fn method_call(&self, target: Option<&str>, _by_value: bool, method: &str, args: &str) -> String {
        format!("{}.{method}({args})", target.unwrap_or("self"))
    }

    fn bitmap_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed => format!(
                "wx.BitmapBundle.FromBitmap(wx.Bitmap(_wxue_image({})))",
                array_name_for(&image.path)
            ),
            ImageKind::Svg => {
                let (width, height) = image.size.unwrap_or((16, 16));
                format!(
                    "wx.BitmapBundle.FromSVG({}, wx.Size({width}, {height}))",
                    array_name_for(&image.path)
                )
            }
            ImageKind::Art => {
                let (art_id, client) = image.art_parts();
                format!(
                    "wx.ArtProvider.GetBitmapBundle({}, {})",
                    self.wx_const(art_id),
                    self.wx_const(client.unwrap_or("wxART_OTHER"))
                )
            }
            ImageKind::Xpm | ImageKind::Header => format!(
                "wx.BitmapBundle.FromBitmap(wx.Bitmap({}, wx.BITMAP_TYPE_ANY))",
                self.string_literal(&image.path)
            ),
        }
    }

    fn animation_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed => format!("_wxue_animation({})", array_name_for(&image.path)),
            _ => "wx.adv.NullAnimation".to_string(),
        }
    }

    fn member_declaration(&self, _decl: &MemberDecl) -> Option<String> {
        None
    }

    fn validator_declaration(&self, _var: &ValidatorVar) -> Option<String> {
        None
    }

    fn validator_init(&self, var: &ValidatorVar) -> Option<String> {
        let value = match &var.init {
            ValidatorInit::Bool(value) => self.bool_literal(*value).to_string(),
            ValidatorInit::Number(value) => value.clone(),
            ValidatorInit::Str(value) => self.string_literal(value),
            ValidatorInit::None => self.null_literal().to_string(),
        };
        Some(format!("{} = {value}", self.member_ref(&var.name)))
    }

    fn id_declarations(&self, enum_ids: &BTreeSet<String>, const_ids: &BTreeMap<String, String>) -> Vec<String> {
        enum_ids
            .iter()
            .map(|id| format!("{id} = wx.NewIdRef()"))
            .chain(const_ids.iter().map(|(name, value)| format!("{name} = {value}")))
            .collect()
    }

    fn imports(&self, imports: &ImportSet, body: &str) -> Vec<String> {
        let mut modules = BTreeSet::new();
        for library in &imports.libraries {
            let prefix = Self::module_prefix(*library).trim_end_matches('.');
            if prefix != "wx" {
                modules.insert(prefix.to_string());
            }
        }
        for module in EXTENSION_MODULES {
            if body.contains(&format!("wx.{module}.")) {
                modules.insert(format!("wx.{module}"));
            }
        }
        for token in &imports.class_tokens {
            if let Some((module, _)) = token.rsplit_once('.') {
                if module.starts_with("wx.lib.") {
                    modules.insert(module.to_string());
                }
            }
        }

        let mut lines = vec!["import wx".to_string()];
        lines.extend(modules.into_iter().map(|module| format!("import {module}")));
        if body.contains("BytesIO(") {
            lines.push(String::new());
            lines.push("from io import BytesIO".to_string());
        }
        lines
    }

    fn platform_condition(&self, platforms: &[Platform]) -> String {
        if platforms.is_empty() {
            return "if False:".to_string();
        }
        let tests = platforms
            .iter()
            .map(|platform| format!("wx.Platform == \"{}\"", platform.python_platform()))
            .collect::<Vec<_>>()
            .join(" or ");
        format!("if {tests}:")
    }

    fn event_binding(&self, binding: &EventBinding<'_>) -> Option<String> {
        if binding.handler.starts_with('[') {
            return None;
        }
        let event = format!(
            "{}EVT_{}",
            Self::module_prefix(event_library(binding.event)),
            scripted_event_name(binding.event)
        );
        let handler = format!("self.{}", binding.handler);
        Some(match &binding.source {
            BindSource::Form => format!("self.Bind({event}, {handler})"),
            BindSource::Window(var) => format!("{}.Bind({event}, {handler})", self.var_expr(var)),
            BindSource::Item(id) => format!("self.Bind({event}, {handler}, id={})", self.render_arg(id)),
        })
    }

    fn image_data(&self, asset: &EmbeddedAsset) -> Vec<String> {
        let mut lines = vec![format!("{} = bytes([", asset.array_name())];
        lines.extend(
            byte_rows(&asset.payload(), 24)
                .into_iter()
                .map(|row| format!("    {row},")),
        );
        lines.push("])".to_string());
        lines
    }

    fn image_helpers(&self, needs: &ImageNeeds) -> Vec<String> {
        let mut lines = Vec::new();
        if needs.image_function {
            lines.extend(
                ["def _wxue_image(data):", "    return wx.Image(BytesIO(data))", ""].map(String::from),
            );
        }
        if needs.animation_function {
            lines.extend(
                [
                    "def _wxue_animation(data):",
                    "    animation = wx.adv.Animation()",
                    "    animation.Load(BytesIO(data))",
                    "    return animation",
                    "",
                ]
                .map(String::from),
            );
        }
        lines
    }

    fn class_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        let base = self.class_token(info.base_class, info.base_library);
        w.writeln(format!("class {}({base}):", info.class_name));
        w.indent();
    }

    fn class_close(&self, w: &mut CodeWriter, _info: &FormInfo) {
        w.unindent();
        w.blank();
    }

    fn constructor_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        w.writeln(format!("def __init__({}):", self.param_list(info)));
        w.indent();
        let base = self.class_token(info.base_class, info.base_library);
        if info.params.is_empty() {
            w.writeln(format!("{base}.__init__(self)"));
        } else {
            w.writeln(format!("{base}.__init__(self, {})", info.param_names()));
        }
        w.blank();
    }

    fn constructor_close(&self, w: &mut CodeWriter, _info: &FormInfo) {
        w.unindent();
        w.blank();
    }

    fn context_menu_open(&self, w: &mut CodeWriter, _info: &FormInfo, handler: &str) {
        w.writeln(format!("def {handler}(self, event):"));
        w.indent();
    }

    fn context_menu_close(&self, w: &mut CodeWriter, menu: &VarRef) {
        let menu = self.var_expr(menu);
        w.writeln(format!("self.PopupMenu({menu})"));
        w.writeln(format!("{menu}.Destroy()"));
        w.unindent();
        w.blank();
    }

    fn handler_stubs(&self, w: &mut CodeWriter, handlers: &[(String, String)]) {
        for (_, handler) in handlers {
            w.writeln(format!("def {handler}(self, event):"));
            w.indent();
            w.writeln("event.Skip()");
            w.unindent();
            w.blank();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{Arg, Stmt, Target};

    #[test]
    fn test_tokens() {
        let py = PythonBackend::new();
        assert_eq!(py.class_token("wxButton", WxLibrary::Core), "wx.Button");
        assert_eq!(py.class_token("wxHyperlinkCtrl", WxLibrary::Adv), "wx.adv.HyperlinkCtrl");
        assert_eq!(py.class_token("MyControl", WxLibrary::Core), "MyControl");
        assert_eq!(py.wx_const("wxID_ANY"), "wx.ID_ANY");
        assert_eq!(py.wx_const("wxHL_DEFAULT_STYLE"), "wx.adv.HL_DEFAULT_STYLE");
        assert_eq!(py.render_arg(&Arg::constant("wxALL|wxEXPAND")), "wx.ALL|wx.EXPAND");
        assert!(py.generic_class_token("wxGenericTreeCtrl").is_none());
    }

    #[test]
    fn test_statements() {
        let py = PythonBackend::new();
        let stmt = Stmt::create(
            VarRef::member("m_ok"),
            "wx.Button",
            vec![Arg::This, Arg::Id("wxID_OK".into()), Arg::str("OK")],
        );
        assert_eq!(py.render_stmt(&stmt), "self.m_ok = wx.Button(self, wx.ID_OK, \"OK\")");
        let stmt = Stmt::call(Target::This, "SetSizerAndFit", vec![Arg::Var(VarRef::local("box_sizer"))]);
        assert_eq!(py.render_stmt(&stmt), "self.SetSizerAndFit(box_sizer)");
        assert_eq!(py.render_arg(&Arg::size(20, 30)), "wx.Size(20, 30)");
        assert_eq!(py.render_arg(&Arg::size(-1, -1)), "wx.DefaultSize");
    }

    #[test]
    fn test_imports_follow_the_body() {
        let py = PythonBackend::new();
        let mut imports = ImportSet::default();
        imports.libraries.insert(WxLibrary::Stc);
        imports.class_tokens.insert("wx.lib.stattext.GenStaticText".into());
        let body = "self.link = wx.adv.HyperlinkCtrl(self)\nimg = _wxue_image(BytesIO(data))";
        assert_eq!(
            py.imports(&imports, body),
            vec![
                "import wx",
                "import wx.adv",
                "import wx.lib.stattext",
                "import wx.stc",
                "",
                "from io import BytesIO",
            ]
        );
    }

    #[test]
    fn test_event_bindings() {
        let py = PythonBackend::new();
        let binding = EventBinding {
            event: "wxEVT_CLOSE_WINDOW",
            handler: "OnClose",
            class_name: "MainFrame",
            source: BindSource::Form,
        };
        assert_eq!(py.event_binding(&binding).unwrap(), "self.Bind(wx.EVT_CLOSE, self.OnClose)");
        let link = EventBinding {
            event: "wxEVT_HYPERLINK",
            handler: "OnLink",
            class_name: "MainFrame",
            source: BindSource::Window(VarRef::local("link")),
        };
        assert_eq!(py.event_binding(&link).unwrap(), "link.Bind(wx.adv.EVT_HYPERLINK, self.OnLink)");
        let lambda = EventBinding {
            handler: "[](wxCommandEvent&) {}",
            ..binding
        };
        assert!(py.event_binding(&lambda).is_none());
    }

    #[test]
    fn test_platform_condition() {
        let py = PythonBackend::new();
        assert_eq!(
            py.platform_condition(&Platform::from_selector("Windows|Unix")),
            "if wx.Platform == \"__WXMSW__\" or wx.Platform == \"__WXGTK__\":"
        );
        let mut w = CodeWriter::new("    ");
        py.begin_platform(&mut w, "Mac");
        w.writeln("self.x = 1");
        py.end_platform(&mut w, "Mac");
        w.writeln("y = 2");
        assert_eq!(w.finish(), "if wx.Platform == \"__WXMAC__\":\n    self.x = 1\ny = 2\n");
    }
}
