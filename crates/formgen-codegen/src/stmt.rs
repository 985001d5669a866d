//! Language-neutral statements produced by the construction walk.
//!
//! Node handlers describe *what* to emit with these types; a [`Backend`] decides
//! how each one is spelled.
//!
//! [`Backend`]: crate::backend::Backend

use formgen_core::{ImageDescription, WxLibrary};

/// Whether a variable is a class member or local to the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Member,
    Local,
}

/// A variable holding a created object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarRef {
    pub name: String,
    pub scope: Scope,
    /// Held by value rather than through a pointer (only meaningful for C++).
    pub by_value: bool,
}

impl VarRef {
    pub fn member(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Scope::Member,
            by_value: false,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Scope::Local,
            by_value: false,
        }
    }
}

/// The object a method is called on.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// The form class itself.
    This,
    Var(VarRef),
    /// The result of another call, e.g. `sizer->GetStaticBox()`.
    Expr(Box<Arg>),
}

/// A call argument or sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    This,
    Var(VarRef),
    Str(String),
    Int(i64),
    Bool(bool),
    /// One or more `|`-separated wx constants, e.g. `wxALL|wxEXPAND`.
    Const(String),
    /// A window id, either stock or declared by the form.
    Id(String),
    Size(i64, i64),
    Point(i64, i64),
    Bitmap(ImageDescription),
    Animation(ImageDescription),
    /// Text copied into the output unchanged (custom control parameters).
    Raw(String),
    New {
        class: String,
        library: WxLibrary,
        args: Vec<Arg>,
    },
    Call {
        target: Box<Target>,
        method: String,
        args: Vec<Arg>,
    },
    Null,
}

impl Arg {
    pub fn str(value: impl Into<String>) -> Self {
        Arg::Str(value.into())
    }

    pub fn constant(value: impl Into<String>) -> Self {
        Arg::Const(value.into())
    }

    /// `target.method()` as an expression.
    pub fn call(target: Target, method: impl Into<String>, args: Vec<Arg>) -> Self {
        Arg::Call {
            target: Box::new(target),
            method: method.into(),
            args,
        }
    }

    /// `wxSize(w, h)`, or `wxDefaultSize` for `-1, -1`.
    pub fn size(width: i64, height: i64) -> Self {
        if width == -1 && height == -1 {
            Arg::Const("wxDefaultSize".to_string())
        } else {
            Arg::Size(width, height)
        }
    }
}

/// One emitted statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Create an object and store it in `var`.
    ///
    /// `class` is already spelled for the target language. Objects held by value
    /// are initialized by calling `init_method` instead where the language allows.
    Create {
        var: VarRef,
        class: String,
        args: Vec<Arg>,
        init_method: Option<&'static str>,
    },
    Call {
        target: Target,
        method: String,
        args: Vec<Arg>,
    },
    Comment(String),
}

impl Stmt {
    pub fn create(var: VarRef, class: impl Into<String>, args: Vec<Arg>) -> Self {
        Stmt::Create {
            var,
            class: class.into(),
            args,
            init_method: None,
        }
    }

    pub fn call(target: Target, method: impl Into<String>, args: Vec<Arg>) -> Self {
        Stmt::Call {
            target,
            method: method.into(),
            args,
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(text.into())
    }
}

/// Where an event binding gets its source from.
#[derive(Debug, Clone, PartialEq)]
pub enum BindSource {
    /// The form itself.
    Form,
    /// A window variable.
    Window(VarRef),
    /// A menu item or tool, identified by id.
    Item(Arg),
}

/// An event binding to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBinding<'a> {
    /// wx event name, e.g. `wxEVT_BUTTON`.
    pub event: &'a str,
    pub handler: &'a str,
    pub class_name: &'a str,
    pub source: BindSource,
}
