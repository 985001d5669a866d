//! Variable names, access and class selection for generated declarations.

use convert_case::{Case, Casing};
use formgen_core::{GenName, GenType, Node, PropName, WxLibrary};

use crate::backend::{Backend, ValidatorInit, ValidatorVar};

/// Visibility of the variable generated for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Protected,
    /// A local variable of the constructor.
    Local,
}

impl Access {
    /// Access from the node's `class_access` property, or the kind's default.
    pub fn of(node: &Node) -> Access {
        match node.as_str(PropName::ClassAccess) {
            "public:" => Access::Public,
            "protected:" => Access::Protected,
            "none" => Access::Local,
            _ => Self::default_for(node.gen()),
        }
    }

    fn default_for(gen: GenName) -> Access {
        match gen.gen_type() {
            GenType::Widget | GenType::Container | GenType::Book | GenType::Timer => Access::Protected,
            _ => Access::Local,
        }
    }

    pub fn is_member(self) -> bool {
        self != Access::Local
    }
}

/// Base name for a node that has no `var_name`: the class without its `wx`
/// prefix in snake case, e.g. `box_sizer`.
pub fn default_var_name(node: &Node) -> String {
    let class = match node.gen().class_name() {
        "" => node.gen().as_str(),
        class => class,
    };
    let class = class.strip_prefix("wx").unwrap_or(class);
    class.to_case(Case::Snake)
}

/// The class a node instantiates once generic-variant rules are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClass {
    /// Class spelled for the backend.
    pub token: String,
    /// Plain wx class name, before backend spelling.
    pub wx_class: String,
    pub library: WxLibrary,
    /// Held by value in languages that support it.
    pub by_value: bool,
    /// Set when a generic variant was wanted but the backend has none.
    pub warning: Option<String>,
}

/// Name of the generic variant this node needs, if any.
pub fn generic_variant(node: &Node) -> Option<&'static str> {
    let generic_subclass = node.as_str(PropName::Subclass).starts_with("wxGeneric");
    match node.gen() {
        GenName::AnimationCtrl => {
            let ani = node.as_str(PropName::Animation).contains(".ani");
            (ani || generic_subclass).then_some("wxGenericAnimationCtrl")
        }
        GenName::HyperlinkCtrl => {
            (!node.as_bool(PropName::Underlined) || generic_subclass).then_some("wxGenericHyperlinkCtrl")
        }
        GenName::StaticBitmap => {
            let scale_mode = node.as_str(PropName::ScaleMode);
            (!scale_mode.is_empty() && scale_mode != "None").then_some("wxGenericStaticBitmap")
        }
        GenName::StaticText => {
            (node.as_bool(PropName::Markup) && node.as_int(PropName::Wrap) <= 0).then_some("wxGenericStaticText")
        }
        GenName::CalendarCtrl => generic_subclass.then_some("wxGenericCalendarCtrl"),
        GenName::TreeCtrl => generic_subclass.then_some("wxGenericTreeCtrl"),
        _ => None,
    }
}

/// Pick and spell the class for `node`.
///
/// A `subclass` property that doesn't name a generic wx class replaces the class
/// outright. Custom controls take their class from `class_name`.
pub fn resolve_class(node: &Node, backend: &dyn Backend) -> ResolvedClass {
    let gen = node.gen();
    let library = gen.library();
    let by_value = gen == GenName::Timer;

    let subclass = node.as_str(PropName::Subclass);
    if gen == GenName::CustomControl || (!subclass.is_empty() && !subclass.starts_with("wxGeneric")) {
        let class = if gen == GenName::CustomControl {
            node.class_name()
        } else {
            subclass
        };
        return ResolvedClass {
            token: class.to_string(),
            wx_class: class.to_string(),
            library,
            by_value,
            warning: None,
        };
    }

    let regular = gen.class_name();
    if let Some(generic) = generic_variant(node) {
        if let Some(token) = backend.generic_class_token(generic) {
            return ResolvedClass {
                token,
                wx_class: generic.to_string(),
                library,
                by_value,
                warning: None,
            };
        }
        return ResolvedClass {
            token: backend.class_token(regular, library),
            wx_class: regular.to_string(),
            library,
            by_value,
            warning: Some(format!(
                "{} has no {generic}; {} uses {regular} instead",
                backend.language(),
                describe(node),
            )),
        };
    }

    ResolvedClass {
        token: backend.class_token(regular, library),
        wx_class: regular.to_string(),
        library,
        by_value,
        warning: None,
    }
}

/// Validator variable bound to `node`, if it has one.
pub fn validator_var(node: &Node) -> Option<ValidatorVar> {
    let name = node.as_str(PropName::ValidatorVariable).trim();
    if name.is_empty() {
        return None;
    }
    let data_type = match node.as_str(PropName::ValidatorDataType) {
        "" => default_validator_type(node.gen()).to_string(),
        data_type => data_type.to_string(),
    };

    let init = match data_type.as_str() {
        "bool" => ValidatorInit::Bool(
            node.as_bool(PropName::Checked) || node.is_prop_value(PropName::InitialState, "wxCHK_CHECKED"),
        ),
        "int" | "short" | "long" | "double" | "float" | "unsigned int" | "unsigned long" => {
            [PropName::Value, PropName::Initial, PropName::Selection, PropName::Position]
                .into_iter()
                .map(|prop| node.as_str(prop).trim())
                .find(|value| !value.is_empty())
                .map(|value| ValidatorInit::Number(value.to_string()))
                .unwrap_or(ValidatorInit::None)
        }
        "wxString" | "wxFileName" => {
            let value = match node.gen() {
                GenName::StaticText => node.as_str(PropName::Label),
                _ => node.as_str(PropName::Value),
            };
            ValidatorInit::Str(value.to_string())
        }
        _ => ValidatorInit::None,
    };

    Some(ValidatorVar {
        name: name.to_string(),
        data_type,
        init,
    })
}

fn default_validator_type(gen: GenName) -> &'static str {
    match gen {
        GenName::CheckBox | GenName::ToggleButton | GenName::RadioButton => "bool",
        GenName::Check3State
        | GenName::Choice
        | GenName::ListBox
        | GenName::SpinCtrl
        | GenName::Slider
        | GenName::Gauge => "int",
        _ => "wxString",
    }
}

/// Short description of a node for warnings.
pub fn describe(node: &Node) -> String {
    match node.var_name() {
        "" => node.gen().as_str().to_string(),
        var => format!("{} ({var})", node.gen()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgen_core::{DesignTree, NodeBuilder};

    fn single(builder: NodeBuilder) -> DesignTree {
        DesignTree::new(builder)
    }

    #[test]
    fn test_access() {
        let tree = single(NodeBuilder::new(GenName::Button).with_prop(PropName::ClassAccess, "public:"));
        assert_eq!(Access::of(tree.root_node()), Access::Public);
        let tree = single(NodeBuilder::new(GenName::Button));
        assert_eq!(Access::of(tree.root_node()), Access::Protected);
        let tree = single(NodeBuilder::new(GenName::BoxSizer));
        assert_eq!(Access::of(tree.root_node()), Access::Local);
        let tree = single(NodeBuilder::new(GenName::Button).with_prop(PropName::ClassAccess, "none"));
        assert!(!Access::of(tree.root_node()).is_member());
    }

    #[test]
    fn test_default_var_names() {
        let tree = single(NodeBuilder::new(GenName::VerticalBoxSizer));
        assert_eq!(default_var_name(tree.root_node()), "box_sizer");
        let tree = single(NodeBuilder::new(GenName::StdDialogButtonSizer));
        assert_eq!(default_var_name(tree.root_node()), "std_dialog_button_sizer");
    }

    #[test]
    fn test_generic_variants() {
        let markup = single(
            NodeBuilder::new(GenName::StaticText)
                .with_prop(PropName::Markup, "1")
                .with_prop(PropName::Wrap, "-1"),
        );
        assert_eq!(generic_variant(markup.root_node()), Some("wxGenericStaticText"));

        let wrapped = single(
            NodeBuilder::new(GenName::StaticText)
                .with_prop(PropName::Markup, "1")
                .with_prop(PropName::Wrap, "200"),
        );
        assert_eq!(generic_variant(wrapped.root_node()), None);

        let link = single(NodeBuilder::new(GenName::HyperlinkCtrl).with_prop(PropName::Underlined, "1"));
        assert_eq!(generic_variant(link.root_node()), None);
        let plain_link = single(NodeBuilder::new(GenName::HyperlinkCtrl));
        assert_eq!(generic_variant(plain_link.root_node()), Some("wxGenericHyperlinkCtrl"));

        let ani = single(NodeBuilder::new(GenName::AnimationCtrl).with_prop(PropName::Animation, "Embed;spin.ani"));
        assert_eq!(generic_variant(ani.root_node()), Some("wxGenericAnimationCtrl"));

        let bitmap = single(NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::ScaleMode, "None"));
        assert_eq!(generic_variant(bitmap.root_node()), None);
        let scaled = single(NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::ScaleMode, "Fill"));
        assert_eq!(generic_variant(scaled.root_node()), Some("wxGenericStaticBitmap"));

        let tree_ctrl = single(NodeBuilder::new(GenName::TreeCtrl).with_prop(PropName::Subclass, "wxGenericTreeCtrl"));
        assert_eq!(generic_variant(tree_ctrl.root_node()), Some("wxGenericTreeCtrl"));
    }

    #[test]
    fn test_validator_initializers() {
        let check = single(
            NodeBuilder::new(GenName::CheckBox)
                .with_prop(PropName::ValidatorVariable, "m_enabled")
                .with_prop(PropName::Checked, "1"),
        );
        let var = validator_var(check.root_node()).unwrap();
        assert_eq!(var.data_type, "bool");
        assert_eq!(var.init, ValidatorInit::Bool(true));

        let three_state = single(
            NodeBuilder::new(GenName::Check3State)
                .with_prop(PropName::ValidatorVariable, "m_state")
                .with_prop(PropName::ValidatorDataType, "bool")
                .with_prop(PropName::InitialState, "wxCHK_CHECKED"),
        );
        assert_eq!(validator_var(three_state.root_node()).unwrap().init, ValidatorInit::Bool(true));

        let spin = single(
            NodeBuilder::new(GenName::SpinCtrl)
                .with_prop(PropName::ValidatorVariable, "m_count")
                .with_prop(PropName::Initial, "5"),
        );
        assert_eq!(validator_var(spin.root_node()).unwrap().init, ValidatorInit::Number("5".into()));

        let text = single(
            NodeBuilder::new(GenName::TextCtrl)
                .with_prop(PropName::ValidatorVariable, "m_name")
                .with_prop(PropName::Value, "guest"),
        );
        let var = validator_var(text.root_node()).unwrap();
        assert_eq!(var.data_type, "wxString");
        assert_eq!(var.init, ValidatorInit::Str("guest".into()));

        let custom = single(
            NodeBuilder::new(GenName::TextCtrl)
                .with_prop(PropName::ValidatorVariable, "m_colour")
                .with_prop(PropName::ValidatorDataType, "wxColour"),
        );
        assert_eq!(validator_var(custom.root_node()).unwrap().init, ValidatorInit::None);

        let none = single(NodeBuilder::new(GenName::TextCtrl));
        assert!(validator_var(none.root_node()).is_none());
    }
}
