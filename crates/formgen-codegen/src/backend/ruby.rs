//! wxRuby3 backend.

use std::collections::{BTreeMap, BTreeSet};

use convert_case::{Case, Casing};
use formgen_core::asset::array_name_for;
use formgen_core::{EmbeddedAsset, ImageDescription, ImageKind, Platform, WxLibrary};

use super::{
    byte_rows, const_library, escape_string, is_wx_name, scripted_event_name, strip_wx, Backend, BraceStyle,
    FormInfo, ImportSet, MemberDecl, ValidatorInit, ValidatorVar,
};
use crate::context::ImageNeeds;
use crate::language::GenLang;
use crate::stmt::{BindSource, EventBinding, VarRef};
use crate::writer::CodeWriter;

/// Ruby code generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RubyBackend;

impl RubyBackend {
    pub fn new() -> Self {
        Self
    }

    fn module_prefix(library: WxLibrary) -> &'static str {
        match library {
            WxLibrary::Core | WxLibrary::Adv => "Wx::",
            WxLibrary::Aui => "Wx::AUI::",
            WxLibrary::Html => "Wx::HTML::",
            WxLibrary::Ribbon => "Wx::RBN::",
            WxLibrary::RichText => "Wx::RTC::",
            WxLibrary::Stc => "Wx::STC::",
        }
    }

    fn require_for(library: WxLibrary) -> Option<&'static str> {
        match library {
            WxLibrary::Core | WxLibrary::Adv => None,
            WxLibrary::Aui => Some("wx/aui"),
            WxLibrary::Html => Some("wx/html"),
            WxLibrary::Ribbon => Some("wx/rbn"),
            WxLibrary::RichText => Some("wx/rtc"),
            WxLibrary::Stc => Some("wx/stc"),
        }
    }

    fn method_name(name: &str) -> String {
        name.to_case(Case::Snake)
    }

    fn array_const(image: &ImageDescription) -> String {
        array_name_for(&image.path).to_uppercase()
    }
}

impl Backend for RubyBackend {
    fn language(&self) -> GenLang {
        GenLang::Ruby
    }

    fn brace_style(&self) -> BraceStyle {
        BraceStyle::KeywordEnd
    }

    fn indent_unit(&self) -> &'static str {
        "  "
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
        format!("@{name}")
    }

    fn local_ref(&self, name: &str) -> String {
        name.to_string()
    }

    fn local_decl(&self, name: &str) -> String {
        name.to_string()
    }

    fn string_literal(&self, value: &str) -> String {
        format!("\"{}\"", escape_string(value, &['#']))
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }

    fn null_literal(&self) -> &'static str {
        "nil"
    }

    fn wx_const(&self, name: &str) -> String {
        if !is_wx_name(name) {
            return name.to_string();
        }
        let name = strip_wx(name);
        let name = if name.chars().any(|c| c.is_ascii_lowercase()) {
            name.to_case(Case::UpperSnake)
        } else {
            name.to_string()
        };
        format!("{}{name}", Self::module_prefix(const_library(&name)))
    }

    fn custom_id(&self, name: &str) -> String {
        name.to_string()
    }

    fn class_token(&self, class: &str, library: WxLibrary) -> String {
        if is_wx_name(class) {
            format!("{}{}", Self::module_prefix(library), strip_wx(class))
        } else {
            class.to_string()
        }
    }

    fn generic_class_token(&self, _class: &str) -> Option<String> {
        None
    }

    fn new_instance(&self, class_token: &str, args: &str) -> String {
        if args.is_empty() {
            format!("{class_token}.new")
        } else {
            format!("{class_token}.new({args})")
        }
    }

    fn method_call(&self, target: Option<&str>, _by_value: bool, method: &str, args: &str) -> String {
        let method = Self::method_name(method);
        let call = if args.is_empty() {
            method
        } else {
            format!("{method}({args})")
        };
        match target {
            None => call,
            Some(target) => format!("{target}.{call}"),
        }
    }

    fn bitmap_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed => format!(
                "Wx::BitmapBundle.new(Wx::Bitmap.new(wxue_image({})))",
                Self::array_const(image)
            ),
            ImageKind::Svg => {
                let (width, height) = image.size.unwrap_or((16, 16));
                format!(
                    "Wx::BitmapBundle.from_svg({}, Wx::Size.new({width}, {height}))",
                    Self::array_const(image)
                )
            }
            ImageKind::Art => {
                let (art_id, client) = image.art_parts();
                format!(
                    "Wx::ArtProvider.get_bitmap_bundle({}, {})",
                    self.wx_const(art_id),
                    self.wx_const(client.unwrap_or("wxART_OTHER"))
                )
            }
            ImageKind::Xpm | ImageKind::Header => format!(
                "Wx::BitmapBundle.new(Wx::Bitmap.new({}, Wx::BITMAP_TYPE_ANY))",
                self.string_literal(&image.path)
            ),
        }
    }

    fn animation_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed => format!("wxue_animation({})", Self::array_const(image)),
            _ => "Wx::NULL_ANIMATION".to_string(),
        }
    }

    fn member_declaration(&self, decl: &MemberDecl) -> Option<String> {
        decl.public.then(|| format!("attr_reader :{}", decl.var_name))
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
            .enumerate()
            .map(|(index, id)| format!("{id} = Wx::ID_HIGHEST + {}", index + 1))
            .chain(const_ids.iter().map(|(name, value)| format!("{name} = {value}")))
            .collect()
    }

    fn imports(&self, imports: &ImportSet, body: &str) -> Vec<String> {
        let mut requires = BTreeSet::new();
        for library in &imports.libraries {
            if let Some(require) = Self::require_for(*library) {
                requires.insert(require);
            }
        }
        for library in [
            WxLibrary::Aui,
            WxLibrary::Html,
            WxLibrary::Ribbon,
            WxLibrary::RichText,
            WxLibrary::Stc,
        ] {
            if body.contains(Self::module_prefix(library)) {
                if let Some(require) = Self::require_for(library) {
                    requires.insert(require);
                }
            }
        }

        let mut lines = vec!["require 'wx'".to_string()];
        lines.extend(requires.into_iter().map(|require| format!("require '{require}'")));
        if body.contains("StringIO") {
            lines.push("require 'stringio'".to_string());
        }
        lines
    }

    fn platform_condition(&self, platforms: &[Platform]) -> String {
        if platforms.is_empty() {
            return "if false".to_string();
        }
        let pattern = platforms
            .iter()
            .map(|platform| platform.os_pattern())
            .collect::<Vec<_>>()
            .join("|");
        format!("if RUBY_PLATFORM =~ /{pattern}/")
    }

    fn event_binding(&self, binding: &EventBinding<'_>) -> Option<String> {
        if binding.handler.starts_with('[') {
            return None;
        }
        let method = format!("evt_{}", scripted_event_name(binding.event).to_lowercase());
        let handler = format!(":{}", Self::method_name(binding.handler));
        Some(match &binding.source {
            BindSource::Form => format!("{method}({handler})"),
            BindSource::Window(var) => format!("{method}({}.get_id, {handler})", self.var_expr(var)),
            BindSource::Item(id) => format!("{method}({}, {handler})", self.render_arg(id)),
        })
    }

    fn image_data(&self, asset: &EmbeddedAsset) -> Vec<String> {
        let mut lines = vec![format!("{} = [", asset.array_name().to_uppercase())];
        lines.extend(
            byte_rows(&asset.payload(), 24)
                .into_iter()
                .map(|row| format!("  {row},")),
        );
        lines.push("].pack('C*').freeze".to_string());
        lines
    }

    fn image_helpers(&self, needs: &ImageNeeds) -> Vec<String> {
        let mut lines = Vec::new();
        if needs.image_function {
            lines.extend(
                [
                    "def wxue_image(data)",
                    "  Wx::Image.new(StringIO.new(data))",
                    "end",
                    "",
                ]
                .map(String::from),
            );
        }
        if needs.animation_function {
            lines.extend(
                [
                    "def wxue_animation(data)",
                    "  animation = Wx::Animation.new",
                    "  animation.load(StringIO.new(data))",
                    "  animation",
                    "end",
                    "",
                ]
                .map(String::from),
            );
        }
        lines
    }

    fn class_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        let base = self.class_token(info.base_class, info.base_library);
        w.writeln(format!("class {} < {base}", info.class_name));
        w.indent();
    }

    fn class_close(&self, w: &mut CodeWriter, _info: &FormInfo) {
        w.trim_trailing_blank();
        w.unindent();
        w.writeln("end");
        w.blank();
    }

    fn constructor_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        let params = info
            .params
            .iter()
            .map(|param| match &param.default {
                Some(default) => format!("{} = {}", param.name, self.render_arg(default)),
                None => param.name.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        if params.is_empty() {
            w.writeln("def initialize");
        } else {
            w.writeln(format!("def initialize({params})"));
        }
        w.indent();
        w.writeln(format!("super({})", info.param_names()));
        w.blank();
    }

    fn constructor_close(&self, w: &mut CodeWriter, _info: &FormInfo) {
        w.trim_trailing_blank();
        w.unindent();
        w.writeln("end");
        w.blank();
    }

    fn context_menu_open(&self, w: &mut CodeWriter, _info: &FormInfo, handler: &str) {
        w.writeln(format!("def {}(event)", Self::method_name(handler)));
        w.indent();
    }

    fn context_menu_close(&self, w: &mut CodeWriter, menu: &VarRef) {
        w.writeln(format!("popup_menu({})", self.var_expr(menu)));
        w.unindent();
        w.writeln("end");
        w.blank();
    }

    fn handler_stubs(&self, w: &mut CodeWriter, handlers: &[(String, String)]) {
        for (_, handler) in handlers {
            w.writeln(format!("def {}(event)", Self::method_name(handler)));
            w.indent();
            w.writeln("event.skip");
            w.unindent();
            w.writeln("end");
            w.blank();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{Arg, Stmt, Target};

    #[test]
    fn test_constants() {
        let rb = RubyBackend::new();
        assert_eq!(rb.wx_const("wxID_ANY"), "Wx::ID_ANY");
        assert_eq!(rb.wx_const("wxDefaultSize"), "Wx::DEFAULT_SIZE");
        assert_eq!(rb.wx_const("wxSTC_WRAP_WORD"), "Wx::STC::STC_WRAP_WORD");
        assert_eq!(rb.render_arg(&Arg::constant("wxALL|wxEXPAND")), "Wx::ALL|Wx::EXPAND");
    }

    #[test]
    fn test_statements() {
        let rb = RubyBackend::new();
        let stmt = Stmt::create(VarRef::local("sizer"), "Wx::BoxSizer", vec![Arg::constant("wxVERTICAL")]);
        assert_eq!(rb.render_stmt(&stmt), "sizer = Wx::BoxSizer.new(Wx::VERTICAL)");
        let stmt = Stmt::call(Target::This, "SetSizerAndFit", vec![Arg::Var(VarRef::local("sizer"))]);
        assert_eq!(rb.render_stmt(&stmt), "set_sizer_and_fit(sizer)");
        let stmt = Stmt::call(Target::Var(VarRef::member("m_toolbar")), "Realize", vec![]);
        assert_eq!(rb.render_stmt(&stmt), "@m_toolbar.realize");
        assert_eq!(rb.render_arg(&Arg::str("#{x}")), "\"\\#{x}\"");
    }

    #[test]
    fn test_public_members_get_readers() {
        let rb = RubyBackend::new();
        let mut decl = MemberDecl {
            var_name: "m_name".into(),
            class_token: "Wx::TextCtrl".into(),
            by_value: false,
            comment: String::new(),
            public: true,
        };
        assert_eq!(rb.member_declaration(&decl).unwrap(), "attr_reader :m_name");
        decl.public = false;
        assert!(rb.member_declaration(&decl).is_none());
    }

    #[test]
    fn test_event_bindings() {
        let rb = RubyBackend::new();
        let binding = EventBinding {
            event: "wxEVT_BUTTON",
            handler: "OnOK",
            class_name: "MyDialog",
            source: BindSource::Window(VarRef::member("m_ok")),
        };
        assert_eq!(rb.event_binding(&binding).unwrap(), "evt_button(@m_ok.get_id, :on_ok)");
        let close = EventBinding {
            event: "wxEVT_CLOSE_WINDOW",
            handler: "OnClose",
            class_name: "MyDialog",
            source: BindSource::Form,
        };
        assert_eq!(rb.event_binding(&close).unwrap(), "evt_close(:on_close)");
    }

    #[test]
    fn test_requires() {
        let rb = RubyBackend::new();
        let mut imports = ImportSet::default();
        imports.libraries.insert(WxLibrary::Stc);
        imports.libraries.insert(WxLibrary::Adv);
        let body = "@book = Wx::AUI::AuiNotebook.new(self)\nWx::Image.new(StringIO.new(data))";
        assert_eq!(
            rb.imports(&imports, body),
            vec!["require 'wx'", "require 'wx/aui'", "require 'wx/stc'", "require 'stringio'"]
        );
    }

    #[test]
    fn test_keyword_blocks() {
        let rb = RubyBackend::new();
        let mut w = CodeWriter::new("  ");
        rb.begin_platform(&mut w, "Windows|Unix");
        w.writeln("attr_reader :foo");
        rb.end_platform(&mut w, "Windows|Unix");
        assert_eq!(
            w.finish(),
            "if RUBY_PLATFORM =~ /mswin|mingw|linux|bsd/\n  attr_reader :foo\nend\n"
        );
    }
}
