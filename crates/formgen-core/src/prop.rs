//! Property names, types and stored values.

/// Value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropType {
    String,
    Bool,
    Int,
    /// `identifier` or `identifier=literal`
    Id,
    /// `Type;Path[;Size]`
    Image,
    /// Same encoding as [`PropType::Image`], for animation files.
    Animation,
    /// One value out of a fixed set.
    Option,
    /// `|`-separated flags.
    Bitlist,
}

impl PropType {
    /// Short lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            PropType::String => "string",
            PropType::Bool => "bool",
            PropType::Int => "int",
            PropType::Id => "id",
            PropType::Image => "image",
            PropType::Animation => "animation",
            PropType::Option => "option",
            PropType::Bitlist => "bitlist",
        }
    }

    /// Image-like properties go through the asset cache.
    pub fn is_image_like(self) -> bool {
        matches!(self, PropType::Image | PropType::Animation)
    }
}

/// Names of the properties the generators read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropName {
    // Identity
    ClassName,
    BaseFile,
    VarName,
    ClassAccess,
    VarComment,
    Subclass,
    SubclassHeader,
    Id,
    Platforms,

    // Text and values
    Label,
    Title,
    Value,
    Tooltip,
    Url,
    Choices,
    Checked,
    InitialState,
    Initial,
    Selection,
    Position,
    Min,
    Max,
    Select,
    Collapsed,
    Underlined,
    Markup,
    Wrap,
    ScaleMode,
    Shortcut,
    HelpString,
    Kind,

    // Images
    Bitmap,
    Icon,
    Animation,

    // Validators
    ValidatorVariable,
    ValidatorDataType,

    // Layout
    Orientation,
    Rows,
    Cols,
    Vgap,
    Hgap,
    Flags,
    Alignment,
    Borders,
    BorderSize,
    Proportion,
    Width,
    Height,
    Size,
    MinSize,
    Pos,
    SashPos,
    SplitMode,

    // Window
    Style,
    WindowStyle,
    Hidden,
    Disabled,
    Focus,
    Center,
    PersistName,

    // Standard dialog buttons
    OkButton,
    YesButton,
    SaveButton,
    ApplyButton,
    NoButton,
    CancelButton,
    CloseButton,
    HelpButton,
    ContextHelpButton,

    // Custom controls
    Header,
    Parameters,
    Namespace,
}

impl PropName {
    /// The property name as it appears in project files.
    pub fn as_str(self) -> &'static str {
        match self {
            PropName::ClassName => "class_name",
            PropName::BaseFile => "base_file",
            PropName::VarName => "var_name",
            PropName::ClassAccess => "class_access",
            PropName::VarComment => "var_comment",
            PropName::Subclass => "subclass",
            PropName::SubclassHeader => "subclass_header",
            PropName::Id => "id",
            PropName::Platforms => "platforms",
            PropName::Label => "label",
            PropName::Title => "title",
            PropName::Value => "value",
            PropName::Tooltip => "tooltip",
            PropName::Url => "url",
            PropName::Choices => "contents",
            PropName::Checked => "checked",
            PropName::InitialState => "initial_state",
            PropName::Initial => "initial",
            PropName::Selection => "selection_int",
            PropName::Position => "position",
            PropName::Min => "min",
            PropName::Max => "max",
            PropName::Select => "select",
            PropName::Collapsed => "collapsed",
            PropName::Underlined => "underlined",
            PropName::Markup => "markup",
            PropName::Wrap => "wrap",
            PropName::ScaleMode => "scale_mode",
            PropName::Shortcut => "shortcut",
            PropName::HelpString => "help",
            PropName::Kind => "kind",
            PropName::Bitmap => "bitmap",
            PropName::Icon => "icon",
            PropName::Animation => "animation",
            PropName::ValidatorVariable => "validator_variable",
            PropName::ValidatorDataType => "validator_data_type",
            PropName::Orientation => "orientation",
            PropName::Rows => "rows",
            PropName::Cols => "cols",
            PropName::Vgap => "vgap",
            PropName::Hgap => "hgap",
            PropName::Flags => "flags",
            PropName::Alignment => "alignment",
            PropName::Borders => "borders",
            PropName::BorderSize => "border_size",
            PropName::Proportion => "proportion",
            PropName::Width => "width",
            PropName::Height => "height",
            PropName::Size => "size",
            PropName::MinSize => "minimum_size",
            PropName::Pos => "pos",
            PropName::SashPos => "sashpos",
            PropName::SplitMode => "splitmode",
            PropName::Style => "style",
            PropName::WindowStyle => "window_style",
            PropName::Hidden => "hidden",
            PropName::Disabled => "disabled",
            PropName::Focus => "focus",
            PropName::Center => "center",
            PropName::PersistName => "persist_name",
            PropName::OkButton => "OK",
            PropName::YesButton => "Yes",
            PropName::SaveButton => "Save",
            PropName::ApplyButton => "Apply",
            PropName::NoButton => "No",
            PropName::CancelButton => "Cancel",
            PropName::CloseButton => "Close",
            PropName::HelpButton => "Help",
            PropName::ContextHelpButton => "ContextHelp",
            PropName::Header => "header",
            PropName::Parameters => "parameters",
            PropName::Namespace => "namespace",
        }
    }

    /// The fixed value type of this property.
    pub fn prop_type(self) -> PropType {
        match self {
            PropName::Id => PropType::Id,
            PropName::Bitmap | PropName::Icon => PropType::Image,
            PropName::Animation => PropType::Animation,
            PropName::Checked
            | PropName::Select
            | PropName::Collapsed
            | PropName::Underlined
            | PropName::Markup
            | PropName::Hidden
            | PropName::Disabled
            | PropName::Focus
            | PropName::OkButton
            | PropName::YesButton
            | PropName::SaveButton
            | PropName::ApplyButton
            | PropName::NoButton
            | PropName::CancelButton
            | PropName::CloseButton
            | PropName::HelpButton
            | PropName::ContextHelpButton => PropType::Bool,
            PropName::Initial
            | PropName::Selection
            | PropName::Position
            | PropName::Min
            | PropName::Max
            | PropName::Wrap
            | PropName::Rows
            | PropName::Cols
            | PropName::Vgap
            | PropName::Hgap
            | PropName::BorderSize
            | PropName::Proportion
            | PropName::Width
            | PropName::Height
            | PropName::SashPos => PropType::Int,
            PropName::ClassAccess
            | PropName::InitialState
            | PropName::ScaleMode
            | PropName::Kind
            | PropName::ValidatorDataType
            | PropName::Orientation
            | PropName::SplitMode
            | PropName::Center => PropType::Option,
            PropName::Platforms
            | PropName::Flags
            | PropName::Alignment
            | PropName::Borders
            | PropName::Style
            | PropName::WindowStyle => PropType::Bitlist,
            _ => PropType::String,
        }
    }
}

impl std::fmt::Display for PropName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property stored on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub name: PropName,
    pub value: String,
}

impl Property {
    pub fn new(name: PropName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn prop_type(&self) -> PropType {
        self.name.prop_type()
    }

    /// `"1"` and `"true"` are true; anything else is false.
    pub fn as_bool(&self) -> bool {
        matches!(self.value.trim(), "1" | "true")
    }

    /// Parses the value as an integer, returning 0 when it doesn't parse.
    pub fn as_int(&self) -> i64 {
        self.value.trim().parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_types() {
        assert_eq!(PropName::Id.prop_type(), PropType::Id);
        assert_eq!(PropName::Bitmap.prop_type(), PropType::Image);
        assert_eq!(PropName::Animation.prop_type(), PropType::Animation);
        assert!(PropName::Icon.prop_type().is_image_like());
        assert_eq!(PropName::Checked.prop_type(), PropType::Bool);
        assert_eq!(PropName::Platforms.prop_type(), PropType::Bitlist);
        assert_eq!(PropName::VarName.prop_type(), PropType::String);
    }

    #[test]
    fn test_property_value_accessors() {
        assert!(Property::new(PropName::Checked, "1").as_bool());
        assert!(Property::new(PropName::Checked, "true").as_bool());
        assert!(!Property::new(PropName::Checked, "0").as_bool());
        assert_eq!(Property::new(PropName::Wrap, "-1").as_int(), -1);
        assert_eq!(Property::new(PropName::Wrap, "abc").as_int(), 0);
    }
}
