//! wxPerl backend.

use std::collections::{BTreeMap, BTreeSet};

use formgen_core::asset::array_name_for;
use formgen_core::{EmbeddedAsset, GenName, ImageDescription, ImageKind, Platform, WxLibrary};

use super::{
    byte_rows, escape_string, is_wx_name, scripted_event_name, strip_wx, Backend, BraceStyle, FormInfo,
    ImportSet, MemberDecl, ValidatorInit, ValidatorVar,
};
use crate::context::ImageNeeds;
use crate::language::GenLang;
use crate::stmt::{BindSource, EventBinding, VarRef};
use crate::writer::CodeWriter;

/// Export tags of `use Wx qw[...]`, by constant prefix. The first match wins.
const EXPORT_TAGS: &[(&str, &str)] = &[
    ("wxID_", ":id"),
    ("wxVERTICAL", ":sizer"),
    ("wxHORIZONTAL", ":sizer"),
    ("wxALL", ":sizer"),
    ("wxEXPAND", ":sizer"),
    ("wxALIGN_", ":sizer"),
    ("wxLEFT", ":sizer"),
    ("wxRIGHT", ":sizer"),
    ("wxTOP", ":sizer"),
    ("wxBOTTOM", ":sizer"),
    ("wxSHAPED", ":sizer"),
    ("wxFIXED_MINSIZE", ":sizer"),
    ("wxTE_", ":textctrl"),
    ("wxCB_", ":combobox"),
    ("wxCHK_", ":checkbox"),
    ("wxLB_", ":listbox"),
    ("wxSL_", ":slider"),
    ("wxGA_", ":gauge"),
    ("wxTB_", ":toolbar"),
    ("wxITEM_", ":menu"),
    ("wxBITMAP_TYPE_", ":bitmap"),
    ("wxART_", ":artprov"),
    ("wxNB_", ":notebook"),
    ("wxBK_", ":bookctrl"),
    ("wxDEFAULT_DIALOG_STYLE", ":dialog"),
    ("wxDEFAULT_FRAME_STYLE", ":frame"),
    ("wxTAB_TRAVERSAL", ":window"),
    ("wxBORDER_", ":window"),
    ("wxBOTH", ":window"),
];

/// Perl code generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerlBackend;

impl PerlBackend {
    pub fn new() -> Self {
        Self
    }

    fn module_for(library: WxLibrary) -> Option<&'static str> {
        match library {
            WxLibrary::Core | WxLibrary::Adv | WxLibrary::Ribbon => None,
            WxLibrary::Aui => Some("Wx::AUI"),
            WxLibrary::Html => Some("Wx::Html"),
            WxLibrary::RichText => Some("Wx::RichText"),
            WxLibrary::Stc => Some("Wx::STC"),
        }
    }

    fn array_var(image: &ImageDescription) -> String {
        format!("${}", array_name_for(&image.path))
    }

    fn export_tags(body: &str) -> (BTreeSet<&'static str>, BTreeSet<String>) {
        let mut tags = BTreeSet::new();
        let mut events = BTreeSet::new();
        let tokens = body
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .filter(|token| !token.is_empty());
        for token in tokens {
            if token.starts_with("EVT_") {
                events.insert(token.to_string());
            } else if is_wx_name(token) {
                let tag = EXPORT_TAGS
                    .iter()
                    .find(|(prefix, _)| token.starts_with(prefix))
                    .map(|(_, tag)| *tag)
                    .unwrap_or(":misc");
                tags.insert(tag);
            }
        }
        (tags, events)
    }
}

impl Backend for PerlBackend {
    fn language(&self) -> GenLang {
        GenLang::Perl
    }

    fn brace_style(&self) -> BraceStyle {
        BraceStyle::Braces
    }

    fn indent_unit(&self) -> &'static str {
        "    "
    }

    fn comment_prefix(&self) -> &'static str {
        "#"
    }

    fn statement_end(&self) -> &'static str {
        ";"
    }

    fn supports(&self, gen: GenName) -> bool {
        gen.library() != WxLibrary::Ribbon
    }

    fn this_ref(&self) -> &'static str {
        "$self"
    }

    fn member_ref(&self, name: &str) -> String {
        format!("$self->{{{name}}}")
    }

    fn local_ref(&self, name: &str) -> String {
        format!("${name}")
    }

    fn local_decl(&self, name: &str) -> String {
        format!("my ${name}")
    }

    fn string_literal(&self, value: &str) -> String {
        format!("\"{}\"", escape_string(value, &['$', '@']))
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn null_literal(&self) -> &'static str {
        "undef"
    }

    fn wx_const(&self, name: &str) -> String {
        name.to_string()
    }

    fn custom_id(&self, name: &str) -> String {
        name.to_string()
    }

    fn class_token(&self, class: &str, _library: WxLibrary) -> String {
        if is_wx_name(class) {
            format!("Wx::{}", strip_wx(class))
        } else {
            class.to_string()
        }
    }

    fn generic_class_token(&self, _class: &str) -> Option<String> {
        None
    }

    fn new_instance(&self, class_token: &str, args: &str) -> String {
        format!("{class_token}->new({args})")
    }

    fn method_call(&self, target: Option<&str>, _by_value: bool, method: &str, args: &str) -> String {
        format!("{}->{method}({args})", target.unwrap_or("$self"))
    }

    fn bitmap_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed => format!("Wx::Bitmap->new(wxue_image({}))", Self::array_var(image)),
            ImageKind::Svg => "wxNullBitmap".to_string(),
            ImageKind::Art => {
                let (art_id, client) = image.art_parts();
                format!(
                    "Wx::ArtProvider::GetBitmap({art_id}, {})",
                    client.unwrap_or("wxART_OTHER")
                )
            }
            ImageKind::Xpm | ImageKind::Header => format!(
                "Wx::Bitmap->new({}, wxBITMAP_TYPE_ANY)",
                self.string_literal(&image.path)
            ),
        }
    }

    fn animation_expr(&self, image: &ImageDescription) -> String {
        match image.kind {
            ImageKind::Embed => format!("wxue_animation({})", Self::array_var(image)),
            _ => "Wx::Animation->new()".to_string(),
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
        Some(format!("{} = {value};", self.member_ref(&var.name)))
    }

    fn id_declarations(&self, enum_ids: &BTreeSet<String>, const_ids: &BTreeMap<String, String>) -> Vec<String> {
        enum_ids
            .iter()
            .map(|id| format!("use constant {id} => Wx::NewId();"))
            .chain(
                const_ids
                    .iter()
                    .map(|(name, value)| format!("use constant {name} => {value};")),
            )
            .collect()
    }

    fn imports(&self, imports: &ImportSet, body: &str) -> Vec<String> {
        let (tags, events) = Self::export_tags(body);
        let mut lines = vec!["use strict;".to_string(), "use warnings;".to_string(), String::new()];
        if tags.is_empty() {
            lines.push("use Wx;".to_string());
        } else {
            lines.push(format!("use Wx qw[{}];", tags.into_iter().collect::<Vec<_>>().join(" ")));
        }
        if !events.is_empty() {
            lines.push(format!(
                "use Wx::Event qw({});",
                events.into_iter().collect::<Vec<_>>().join(" ")
            ));
        }
        let modules: BTreeSet<&str> = imports
            .libraries
            .iter()
            .filter_map(|library| Self::module_for(*library))
            .collect();
        lines.extend(modules.into_iter().map(|module| format!("use {module};")));
        lines
    }

    fn platform_condition(&self, platforms: &[Platform]) -> String {
        if platforms.is_empty() {
            return "if (0)".to_string();
        }
        let pattern = platforms
            .iter()
            .map(|platform| platform.os_pattern())
            .collect::<Vec<_>>()
            .join("|");
        format!("if ($^O =~ /{pattern}/i)")
    }

    fn event_binding(&self, binding: &EventBinding<'_>) -> Option<String> {
        if binding.handler.starts_with('[') {
            return None;
        }
        let event = format!("EVT_{}", scripted_event_name(binding.event));
        let handler = format!("$self->can('{}')", binding.handler);
        Some(match &binding.source {
            BindSource::Form => format!("{event}($self, {handler});"),
            BindSource::Window(var) => {
                format!("{event}($self, {}->GetId(), {handler});", self.var_expr(var))
            }
            BindSource::Item(id) => format!("{event}($self, {}, {handler});", self.render_arg(id)),
        })
    }

    fn source_preamble(&self, info: &FormInfo) -> Vec<String> {
        vec![format!("package {};", info.class_name), String::new()]
    }

    fn image_data(&self, asset: &EmbeddedAsset) -> Vec<String> {
        let mut lines = vec![format!("my ${} = pack('C*',", asset.array_name())];
        lines.extend(
            byte_rows(&asset.payload(), 24)
                .into_iter()
                .map(|row| format!("    {row},")),
        );
        lines.push(");".to_string());
        lines
    }

    fn image_helpers(&self, needs: &ImageNeeds) -> Vec<String> {
        let mut lines = Vec::new();
        if needs.image_function {
            lines.extend(
                [
                    "sub wxue_image {",
                    "    my ($data) = @_;",
                    "    open(my $fh, '<', \\$data) or return wxNullImage;",
                    "    return Wx::Image->new($fh, wxBITMAP_TYPE_ANY);",
                    "}",
                    "",
                ]
                .map(String::from),
            );
        }
        if needs.animation_function {
            lines.extend(
                [
                    "sub wxue_animation {",
                    "    my ($data) = @_;",
                    "    my $animation = Wx::Animation->new();",
                    "    open(my $fh, '<', \\$data) or return $animation;",
                    "    $animation->Load($fh);",
                    "    return $animation;",
                    "}",
                    "",
                ]
                .map(String::from),
            );
        }
        lines
    }

    fn open_block(&self, w: &mut CodeWriter, header: &str) {
        w.writeln(format!("{header} {{"));
        w.indent();
    }

    fn class_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        let base = self.class_token(info.base_class, info.base_library);
        w.writeln(format!("use base qw({base});"));
        w.blank();
    }

    fn class_close(&self, w: &mut CodeWriter, _info: &FormInfo) {
        w.blank();
        w.writeln("1;");
    }

    fn constructor_open(&self, w: &mut CodeWriter, info: &FormInfo) {
        self.open_block(w, "sub new");
        let names: Vec<String> = info.params.iter().map(|param| format!("${}", param.name)).collect();
        let mut unpack = vec!["$class".to_string()];
        unpack.extend(names.iter().cloned());
        w.writeln(format!("my ({}) = @_;", unpack.join(", ")));
        for param in &info.params {
            if let Some(default) = &param.default {
                w.writeln(format!(
                    "${} = {} unless defined ${};",
                    param.name,
                    self.render_arg(default),
                    param.name
                ));
            }
        }
        w.writeln(format!("my $self = $class->SUPER::new({});", names.join(", ")));
        w.blank();
    }

    fn constructor_close(&self, w: &mut CodeWriter, _info: &FormInfo) {
        w.blank();
        w.writeln("return $self;");
        self.close_block(w);
        w.blank();
    }

    fn context_menu_open(&self, w: &mut CodeWriter, _info: &FormInfo, handler: &str) {
        self.open_block(w, &format!("sub {handler}"));
        w.writeln("my ($self, $event) = @_;");
    }

    fn context_menu_close(&self, w: &mut CodeWriter, menu: &VarRef) {
        w.writeln(format!("$self->PopupMenu({}, wxDefaultPosition);", self.var_expr(menu)));
        self.close_block(w);
        w.blank();
    }

    fn handler_stubs(&self, w: &mut CodeWriter, handlers: &[(String, String)]) {
        for (_, handler) in handlers {
            self.open_block(w, &format!("sub {handler}"));
            w.writeln("my ($self, $event) = @_;");
            w.writeln("$event->Skip();");
            self.close_block(w);
            w.blank();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{Arg, Stmt, Target};

    #[test]
    fn test_statements() {
        let pl = PerlBackend::new();
        let stmt = Stmt::create(
            VarRef::member("m_ok"),
            "Wx::Button",
            vec![Arg::This, Arg::Id("wxID_OK".into()), Arg::str("Save $5")],
        );
        assert_eq!(
            pl.render_stmt(&stmt),
            "$self->{m_ok} = Wx::Button->new($self, wxID_OK, \"Save \\$5\");"
        );
        let stmt = Stmt::create(VarRef::local("sizer"), "Wx::BoxSizer", vec![Arg::constant("wxVERTICAL")]);
        assert_eq!(pl.render_stmt(&stmt), "my $sizer = Wx::BoxSizer->new(wxVERTICAL);");
        let stmt = Stmt::call(Target::This, "SetSizerAndFit", vec![Arg::Var(VarRef::local("sizer"))]);
        assert_eq!(pl.render_stmt(&stmt), "$self->SetSizerAndFit($sizer);");
    }

    #[test]
    fn test_imports_scan_the_body() {
        let pl = PerlBackend::new();
        let mut imports = ImportSet::default();
        imports.libraries.insert(WxLibrary::Stc);
        let body = "my $s = Wx::BoxSizer->new(wxVERTICAL);\n\
                    $s->Add($b, 0, wxALL, 5);\n\
                    EVT_BUTTON($self, wxID_OK, $self->can('OnOK'));\n\
                    wxue_image($x);";
        assert_eq!(
            pl.imports(&imports, body),
            vec![
                "use strict;",
                "use warnings;",
                "",
                "use Wx qw[:id :sizer];",
                "use Wx::Event qw(EVT_BUTTON);",
                "use Wx::STC;",
            ]
        );
    }

    #[test]
    fn test_ribbon_is_unsupported() {
        let pl = PerlBackend::new();
        assert!(!pl.supports(GenName::RibbonPanel));
        assert!(pl.supports(GenName::Button));
    }

    #[test]
    fn test_blocks_open_on_the_same_line() {
        let pl = PerlBackend::new();
        let mut w = CodeWriter::new("    ");
        pl.begin_platform(&mut w, "Mac");
        w.writeln("$self->{x} = 1;");
        pl.end_platform(&mut w, "Mac");
        assert_eq!(w.finish(), "if ($^O =~ /darwin/i) {\n    $self->{x} = 1;\n}\n");
    }

    #[test]
    fn test_event_bindings() {
        let pl = PerlBackend::new();
        let binding = EventBinding {
            event: "wxEVT_BUTTON",
            handler: "OnOK",
            class_name: "MyDialog",
            source: BindSource::Window(VarRef::local("ok")),
        };
        assert_eq!(
            pl.event_binding(&binding).unwrap(),
            "EVT_BUTTON($self, $ok->GetId(), $self->can('OnOK'));"
        );
    }
}
