//! Backend adaptation layer.
//!
//! Each target language implements [`Backend`]. The orchestrator only ever talks to
//! a `&dyn Backend`: it never asks which language it is generating, it asks the
//! backend how to spell things. Rendering of the statement IR is provided here on
//! top of a handful of per-language primitives.

#[cfg(feature = "cpp")]
mod cpp;
#[cfg(feature = "perl")]
mod perl;
#[cfg(feature = "python")]
mod python;
#[cfg(feature = "ruby")]
mod ruby;

#[cfg(feature = "cpp")]
pub use cpp::CppBackend;
#[cfg(feature = "perl")]
pub use perl::PerlBackend;
#[cfg(feature = "python")]
pub use python::PythonBackend;
#[cfg(feature = "ruby")]
pub use ruby::RubyBackend;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use formgen_core::{EmbeddedAsset, GenName, ImageDescription, Platform, WxLibrary};

use crate::context::{GenerationContext, ImageNeeds};
use crate::error::{CodegenError, Result};
use crate::language::GenLang;
use crate::stmt::{Arg, BindSource, EventBinding, Scope, Stmt, Target, VarRef};
use crate::writer::CodeWriter;

/// How a language delimits blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceStyle {
    /// `{` and `}` around an indented body.
    Braces,
    /// Indentation alone (Python).
    IndentOnly,
    /// Indented body closed by `end` (Ruby).
    KeywordEnd,
}

/// A member variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub var_name: String,
    /// Class spelled for the target language.
    pub class_token: String,
    pub by_value: bool,
    pub comment: String,
    pub public: bool,
}

/// Initial value of a validator variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorInit {
    Bool(bool),
    Number(String),
    Str(String),
    None,
}

/// A variable bound to a control through a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorVar {
    pub name: String,
    /// C++ type, e.g. `bool`, `int`, `wxString`.
    pub data_type: String,
    pub init: ValidatorInit,
}

/// Everything the import/include builder needs to know about a form.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    pub libraries: BTreeSet<WxLibrary>,
    /// Class tokens as spelled by the backend.
    pub class_tokens: BTreeSet<String>,
    /// C++ `<wx/...>` headers.
    pub system_headers: BTreeSet<String>,
    /// Quoted local headers (subclasses, header images).
    pub local_headers: BTreeSet<String>,
    pub needs: ImageNeeds,
}

/// A constructor parameter of the generated class.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    /// C++ type of the parameter.
    pub cpp_type: &'static str,
    pub default: Option<Arg>,
}

/// Description of the class generated for a form.
#[derive(Debug, Clone)]
pub struct FormInfo {
    pub gen: GenName,
    pub class_name: String,
    /// wx class the generated class derives from.
    pub base_class: &'static str,
    pub base_library: WxLibrary,
    pub base_file: String,
    pub namespaces: Vec<String>,
    pub params: Vec<Param>,
    /// The base class is initialized through a two-step `Create` call rather
    /// than its constructor.
    pub base_create: bool,
    pub header_ext: String,
    /// `(event, handler)` for every named handler the class must provide,
    /// unique by handler.
    pub handlers: Vec<(String, String)>,
    /// Names of the generated context-menu handlers.
    pub context_menus: Vec<String>,
}

impl FormInfo {
    /// Parameter names, comma separated, for forwarding calls.
    pub fn param_names(&self) -> String {
        self.params.iter().map(|param| param.name).collect::<Vec<_>>().join(", ")
    }
}

/// Per-language syntax rules.
pub trait Backend: Send + Sync {
    fn language(&self) -> GenLang;

    fn brace_style(&self) -> BraceStyle;

    fn indent_unit(&self) -> &'static str;

    fn comment_prefix(&self) -> &'static str;

    /// Terminator appended to every statement.
    fn statement_end(&self) -> &'static str;

    /// True if objects can be held by value instead of through a pointer.
    fn holds_by_value(&self) -> bool {
        false
    }

    /// Whether the backend can generate this kind at all.
    fn supports(&self, _gen: GenName) -> bool {
        true
    }

    // Expressions

    fn this_ref(&self) -> &'static str;

    fn member_ref(&self, name: &str) -> String;

    fn local_ref(&self, name: &str) -> String;

    /// Left-hand side used when a local is first assigned.
    fn local_decl(&self, name: &str) -> String;

    fn string_literal(&self, value: &str) -> String;

    fn bool_literal(&self, value: bool) -> &'static str;

    fn null_literal(&self) -> &'static str;

    /// Spell a single wx constant such as `wxID_ANY` or `wxDefaultSize`.
    fn wx_const(&self, name: &str) -> String;

    fn const_separator(&self) -> &'static str {
        "|"
    }

    /// Reference to an id declared by the form.
    fn custom_id(&self, name: &str) -> String;

    fn class_token(&self, class: &str, library: WxLibrary) -> String;

    /// Token for the generic (pure wx) implementation of a native control, or
    /// `None` if the language binding doesn't expose one.
    fn generic_class_token(&self, class: &str) -> Option<String>;

    fn new_instance(&self, class_token: &str, args: &str) -> String;

    /// A temporary value such as a size or point.
    fn value_instance(&self, class_token: &str, args: &str) -> String {
        self.new_instance(class_token, args)
    }

    /// Method call expression. `target` is `None` for the form itself.
    fn method_call(&self, target: Option<&str>, by_value: bool, method: &str, args: &str) -> String;

    fn bitmap_expr(&self, image: &ImageDescription) -> String;

    fn animation_expr(&self, image: &ImageDescription) -> String;

    // Declarations

    fn member_declaration(&self, decl: &MemberDecl) -> Option<String>;

    fn validator_declaration(&self, var: &ValidatorVar) -> Option<String>;

    /// Statement initializing a validator variable in the constructor, for
    /// languages without declarations.
    fn validator_init(&self, var: &ValidatorVar) -> Option<String>;

    /// Statement attaching a validator to `control`.
    fn validator_binding(&self, _control: &VarRef, _var: &ValidatorVar) -> Option<String> {
        None
    }

    /// Declarations of the form's own ids.
    fn id_declarations(&self, enum_ids: &BTreeSet<String>, const_ids: &BTreeMap<String, String>) -> Vec<String>;

    /// Import, require or include lines. `body` is the generated class text, for
    /// backends that derive imports from the constants actually used.
    fn imports(&self, imports: &ImportSet, body: &str) -> Vec<String>;

    /// Condition text for a platform selector.
    fn platform_condition(&self, platforms: &[Platform]) -> String;

    fn event_binding(&self, binding: &EventBinding<'_>) -> Option<String>;

    // File structure

    fn banner(&self, w: &mut CodeWriter) {
        let prefix = self.comment_prefix();
        w.writeln(format!("{prefix} Code generated by formgen. Do not edit."));
        w.writeln(format!("{prefix} Changes will be lost the next time the form is generated."));
        w.blank();
    }

    /// Lines written between the imports and the class (C++ includes the
    /// generated header here).
    fn source_preamble(&self, _info: &FormInfo) -> Vec<String> {
        Vec::new()
    }

    fn image_data(&self, asset: &EmbeddedAsset) -> Vec<String>;

    /// Helper functions the form's images need.
    fn image_helpers(&self, needs: &ImageNeeds) -> Vec<String>;

    fn class_open(&self, w: &mut CodeWriter, info: &FormInfo);

    fn class_close(&self, w: &mut CodeWriter, info: &FormInfo);

    fn constructor_open(&self, w: &mut CodeWriter, info: &FormInfo);

    fn constructor_close(&self, w: &mut CodeWriter, info: &FormInfo);

    /// Open the generated context-menu handler. The menu is created by the caller.
    fn context_menu_open(&self, w: &mut CodeWriter, info: &FormInfo, handler: &str);

    /// Show `menu` and close the handler.
    fn context_menu_close(&self, w: &mut CodeWriter, menu: &VarRef);

    /// Stub or prototype lines for the form's event handlers, if the language
    /// needs them in the source file.
    fn handler_stubs(&self, _w: &mut CodeWriter, _handlers: &[(String, String)]) {}

    /// The C++ header, for languages that have one.
    fn header(&self, _info: &FormInfo, _ctx: &GenerationContext<'_>, _imports: &ImportSet) -> Option<String> {
        None
    }

    // Provided

    /// Helper functions followed by the data of every embedded image.
    fn images(&self, w: &mut CodeWriter, images: &[Arc<EmbeddedAsset>], needs: &ImageNeeds) {
        for line in self.image_helpers(needs) {
            w.writeln(line);
        }
        w.blank();
        for asset in images {
            for line in self.image_data(asset) {
                w.writeln(line);
            }
        }
        w.blank();
    }

    fn open_block(&self, w: &mut CodeWriter, header: &str) {
        match self.brace_style() {
            BraceStyle::Braces => {
                w.writeln(header);
                w.writeln("{");
            }
            BraceStyle::IndentOnly | BraceStyle::KeywordEnd => w.writeln(header),
        }
        w.indent();
    }

    fn close_block(&self, w: &mut CodeWriter) {
        w.unindent();
        match self.brace_style() {
            BraceStyle::Braces => w.writeln("}"),
            BraceStyle::KeywordEnd => w.writeln("end"),
            BraceStyle::IndentOnly => {}
        }
    }

    fn begin_platform(&self, w: &mut CodeWriter, selector: &str) {
        let condition = self.platform_condition(&Platform::from_selector(selector));
        self.open_block(w, &condition);
    }

    fn end_platform(&self, w: &mut CodeWriter, _selector: &str) {
        self.close_block(w);
    }

    fn comment(&self, text: &str) -> String {
        format!("{} {}", self.comment_prefix(), text)
    }

    fn var_expr(&self, var: &VarRef) -> String {
        match var.scope {
            Scope::Member => self.member_ref(&var.name),
            Scope::Local => self.local_ref(&var.name),
        }
    }

    fn render_const(&self, value: &str) -> String {
        value
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                if part.parse::<i64>().is_ok() {
                    part.to_string()
                } else {
                    self.wx_const(part)
                }
            })
            .collect::<Vec<_>>()
            .join(self.const_separator())
    }

    fn render_target(&self, target: &Target) -> (Option<String>, bool) {
        match target {
            Target::This => (None, false),
            Target::Var(var) => (Some(self.var_expr(var)), var.by_value),
            Target::Expr(arg) => {
                let by_value = matches!(
                    **arg,
                    Arg::Bitmap(_) | Arg::Animation(_) | Arg::Size(..) | Arg::Point(..)
                );
                (Some(self.render_arg(arg)), by_value)
            }
        }
    }

    fn render_arg(&self, arg: &Arg) -> String {
        match arg {
            Arg::This => self.this_ref().to_string(),
            Arg::Var(var) => self.var_expr(var),
            Arg::Str(value) => self.string_literal(value),
            Arg::Int(value) => value.to_string(),
            Arg::Bool(value) => self.bool_literal(*value).to_string(),
            Arg::Const(value) => self.render_const(value),
            Arg::Id(id) => {
                if id.is_empty() {
                    self.wx_const("wxID_ANY")
                } else if id.starts_with(formgen_core::BUILTIN_ID_PREFIX) {
                    self.wx_const(id)
                } else {
                    let name = id.split_once('=').map(|(name, _)| name).unwrap_or(id);
                    self.custom_id(name.trim())
                }
            }
            Arg::Size(width, height) => {
                let class = self.class_token("wxSize", WxLibrary::Core);
                self.value_instance(&class, &format!("{width}, {height}"))
            }
            Arg::Point(x, y) => {
                let class = self.class_token("wxPoint", WxLibrary::Core);
                self.value_instance(&class, &format!("{x}, {y}"))
            }
            Arg::Bitmap(image) => self.bitmap_expr(image),
            Arg::Animation(image) => self.animation_expr(image),
            Arg::Raw(text) => text.clone(),
            Arg::New { class, library, args } => {
                let class = self.class_token(class, *library);
                self.new_instance(&class, &self.render_args(args))
            }
            Arg::Call { target, method, args } => {
                let (target, by_value) = self.render_target(target);
                self.method_call(target.as_deref(), by_value, method, &self.render_args(args))
            }
            Arg::Null => self.null_literal().to_string(),
        }
    }

    fn render_args(&self, args: &[Arg]) -> String {
        args.iter()
            .map(|arg| self.render_arg(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render_stmt(&self, stmt: &Stmt) -> String {
        let end = self.statement_end();
        match stmt {
            Stmt::Create {
                var,
                class,
                args,
                init_method,
            } => {
                let args = self.render_args(args);
                match init_method {
                    Some(method) if var.by_value && self.holds_by_value() => {
                        format!("{}.{method}({args}){end}", var.name)
                    }
                    _ => {
                        let lhs = match var.scope {
                            Scope::Member => self.member_ref(&var.name),
                            Scope::Local => self.local_decl(&var.name),
                        };
                        format!("{lhs} = {}{end}", self.new_instance(class, &args))
                    }
                }
            }
            Stmt::Call { target, method, args } => {
                let (target, by_value) = self.render_target(target);
                let call = self.method_call(target.as_deref(), by_value, method, &self.render_args(args));
                format!("{call}{end}")
            }
            Stmt::Comment(text) => self.comment(text),
        }
    }

    /// Source of an event binding as an expression, for languages that bind
    /// through an object.
    fn bind_source_expr(&self, source: &BindSource) -> Option<String> {
        match source {
            BindSource::Form => None,
            BindSource::Window(var) => Some(self.var_expr(var)),
            BindSource::Item(id) => Some(self.render_arg(id)),
        }
    }
}

/// The backend for a language, if compiled in.
pub fn backend_for(language: GenLang) -> Result<Box<dyn Backend>> {
    match language {
        #[cfg(feature = "cpp")]
        GenLang::Cpp => Ok(Box::new(CppBackend::new())),
        #[cfg(feature = "python")]
        GenLang::Python => Ok(Box::new(PythonBackend::new())),
        #[cfg(feature = "ruby")]
        GenLang::Ruby => Ok(Box::new(RubyBackend::new())),
        #[cfg(feature = "perl")]
        GenLang::Perl => Ok(Box::new(PerlBackend::new())),
        other => Err(CodegenError::UnsupportedLanguage(other)),
    }
}

/// Event name without the `wxEVT_` prefix, using the short names the scripting
/// bindings export.
pub(crate) fn scripted_event_name(event: &str) -> String {
    let name = event.strip_prefix("wxEVT_").unwrap_or(event);
    match name {
        "CLOSE_WINDOW" => "CLOSE".to_string(),
        other => other.to_string(),
    }
}

/// Library an event macro lives in.
pub fn event_library(event: &str) -> WxLibrary {
    let name = event.strip_prefix("wxEVT_").unwrap_or(event);
    if name.starts_with("STC_") {
        WxLibrary::Stc
    } else if name.starts_with("HYPERLINK") || name.starts_with("CALENDAR") || name.starts_with("WIZARD") {
        WxLibrary::Adv
    } else if name.starts_with("RIBBON") {
        WxLibrary::Ribbon
    } else if name.starts_with("AUI") {
        WxLibrary::Aui
    } else if name.starts_with("HTML") {
        WxLibrary::Html
    } else if name.starts_with("RICHTEXT") {
        WxLibrary::RichText
    } else {
        WxLibrary::Core
    }
}

/// Class or constant name without its `wx` prefix.
pub(crate) fn strip_wx(name: &str) -> &str {
    match name.strip_prefix("wx") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase() || c == '_') => rest,
        _ => name,
    }
}

/// True if `name` is a wx class or constant rather than a user-defined one.
pub(crate) fn is_wx_name(name: &str) -> bool {
    strip_wx(name).len() != name.len()
}

/// Library a wx constant (without its `wx` prefix) belongs to in the scripting
/// bindings.
pub(crate) fn const_library(name: &str) -> WxLibrary {
    const PREFIXES: [(&str, WxLibrary); 9] = [
        ("STC_", WxLibrary::Stc),
        ("AUI_", WxLibrary::Aui),
        ("RIBBON_", WxLibrary::Ribbon),
        ("RE_", WxLibrary::RichText),
        ("HW_", WxLibrary::Html),
        ("HL_", WxLibrary::Adv),
        ("AC_", WxLibrary::Adv),
        ("CAL_", WxLibrary::Adv),
        ("WIZARD_", WxLibrary::Adv),
    ];
    PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, library)| *library)
        .unwrap_or(WxLibrary::Core)
}

/// Escape `value` for a double-quoted literal. Characters in `extra` are
/// escaped with a backslash as well.
pub(crate) fn escape_string(value: &str, extra: &[char]) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if extra.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Split embedded data into rows of comma-separated byte values.
pub(crate) fn byte_rows(bytes: &[u8], per_row: usize) -> Vec<String> {
    bytes
        .chunks(per_row.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_event_names() {
        assert_eq!(scripted_event_name("wxEVT_CLOSE_WINDOW"), "CLOSE");
        assert_eq!(scripted_event_name("wxEVT_BUTTON"), "BUTTON");
    }

    #[test]
    fn test_event_library() {
        assert_eq!(event_library("wxEVT_STC_CHANGE"), WxLibrary::Stc);
        assert_eq!(event_library("wxEVT_HYPERLINK"), WxLibrary::Adv);
        assert_eq!(event_library("wxEVT_BUTTON"), WxLibrary::Core);
    }

    #[test]
    fn test_strip_wx() {
        assert_eq!(strip_wx("wxButton"), "Button");
        assert_eq!(strip_wx("wxID_ANY"), "ID_ANY");
        assert_eq!(strip_wx("wxwidgetsHelper"), "wxwidgetsHelper");
        assert!(!is_wx_name("MyControl"));
    }

    #[test]
    fn test_const_library() {
        assert_eq!(const_library("STC_WRAP_WORD"), WxLibrary::Stc);
        assert_eq!(const_library("HL_DEFAULT_STYLE"), WxLibrary::Adv);
        assert_eq!(const_library("ALL"), WxLibrary::Core);
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("say \"hi\"\n", &[]), "say \\\"hi\\\"\\n");
        assert_eq!(escape_string("#{x}", &['#']), "\\#{x}");
        assert_eq!(escape_string("a\\b", &[]), "a\\\\b");
    }

    #[test]
    fn test_byte_rows() {
        assert_eq!(byte_rows(&[1, 2, 3, 4, 5], 2), vec!["1,2", "3,4", "5"]);
        assert!(byte_rows(&[], 8).is_empty());
    }

    #[test]
    fn test_unavailable_language() {
        assert!(matches!(
            backend_for(GenLang::Xrc),
            Err(CodegenError::UnsupportedLanguage(GenLang::Xrc))
        ));
    }
}
