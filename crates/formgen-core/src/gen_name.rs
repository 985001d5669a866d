//! Generator kinds.
//!
//! Every node in a design tree is tagged with a [`GenName`]. The set of kinds is
//! closed: backends dispatch on it with `match`, so adding a kind is a compile-time
//! change that every backend has to acknowledge.

/// Broad category of a generator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenType {
    Project,
    Folder,
    Images,
    Form,
    Sizer,
    Spacer,
    Widget,
    Container,
    Book,
    BookPage,
    MenuBar,
    Menu,
    MenuItem,
    ToolBar,
    Tool,
    Timer,
    ContextMenu,
}

/// The wxWidgets library a class lives in.
///
/// Backends map this to an include, import or `use` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WxLibrary {
    Core,
    Adv,
    Aui,
    Html,
    Ribbon,
    RichText,
    Stc,
}

/// Every generator kind the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenName {
    Project,
    Folder,
    Images,

    // Forms
    Dialog,
    Frame,
    PanelForm,
    PopupTransientWindow,
    Wizard,
    MenuBarForm,
    ToolBarForm,
    RibbonBarForm,

    // Sizers
    BoxSizer,
    VerticalBoxSizer,
    GridSizer,
    FlexGridSizer,
    StaticBoxSizer,
    StaticCheckboxBoxSizer,
    StaticRadioBtnBoxSizer,
    StdDialogButtonSizer,
    Spacer,

    // Widgets
    Button,
    ToggleButton,
    StaticText,
    TextCtrl,
    CheckBox,
    Check3State,
    RadioButton,
    Choice,
    ComboBox,
    ListBox,
    SpinCtrl,
    Slider,
    Gauge,
    StaticBitmap,
    StaticLine,
    HyperlinkCtrl,
    AnimationCtrl,
    CalendarCtrl,
    TreeCtrl,
    StyledTextCtrl,
    RichTextCtrl,
    HtmlWindow,
    StatusBar,
    CustomControl,

    // Containers
    Panel,
    ScrolledWindow,
    SplitterWindow,
    CollapsiblePane,
    WizardPage,
    RibbonPage,
    RibbonPanel,
    RibbonButtonBar,

    // Books
    Notebook,
    Treebook,
    Choicebook,
    Listbook,
    Simplebook,
    AuiNotebook,
    BookPage,

    // Menus
    MenuBar,
    Menu,
    SubMenu,
    MenuItem,
    Separator,

    // Tools
    ToolBar,
    AuiToolBar,
    Tool,
    ToolDropdown,
    ToolSeparator,
    RibbonButton,

    Timer,
    ContextMenuEvent,
}

impl GenName {
    /// Every kind, in declaration order.
    pub const ALL: &'static [GenName] = &[
        GenName::Project,
        GenName::Folder,
        GenName::Images,
        GenName::Dialog,
        GenName::Frame,
        GenName::PanelForm,
        GenName::PopupTransientWindow,
        GenName::Wizard,
        GenName::MenuBarForm,
        GenName::ToolBarForm,
        GenName::RibbonBarForm,
        GenName::BoxSizer,
        GenName::VerticalBoxSizer,
        GenName::GridSizer,
        GenName::FlexGridSizer,
        GenName::StaticBoxSizer,
        GenName::StaticCheckboxBoxSizer,
        GenName::StaticRadioBtnBoxSizer,
        GenName::StdDialogButtonSizer,
        GenName::Spacer,
        GenName::Button,
        GenName::ToggleButton,
        GenName::StaticText,
        GenName::TextCtrl,
        GenName::CheckBox,
        GenName::Check3State,
        GenName::RadioButton,
        GenName::Choice,
        GenName::ComboBox,
        GenName::ListBox,
        GenName::SpinCtrl,
        GenName::Slider,
        GenName::Gauge,
        GenName::StaticBitmap,
        GenName::StaticLine,
        GenName::HyperlinkCtrl,
        GenName::AnimationCtrl,
        GenName::CalendarCtrl,
        GenName::TreeCtrl,
        GenName::StyledTextCtrl,
        GenName::RichTextCtrl,
        GenName::HtmlWindow,
        GenName::StatusBar,
        GenName::CustomControl,
        GenName::Panel,
        GenName::ScrolledWindow,
        GenName::SplitterWindow,
        GenName::CollapsiblePane,
        GenName::WizardPage,
        GenName::RibbonPage,
        GenName::RibbonPanel,
        GenName::RibbonButtonBar,
        GenName::Notebook,
        GenName::Treebook,
        GenName::Choicebook,
        GenName::Listbook,
        GenName::Simplebook,
        GenName::AuiNotebook,
        GenName::BookPage,
        GenName::MenuBar,
        GenName::Menu,
        GenName::SubMenu,
        GenName::MenuItem,
        GenName::Separator,
        GenName::ToolBar,
        GenName::AuiToolBar,
        GenName::Tool,
        GenName::ToolDropdown,
        GenName::ToolSeparator,
        GenName::RibbonButton,
        GenName::Timer,
        GenName::ContextMenuEvent,
    ];

    /// The generator name as it appears in project files.
    pub fn as_str(self) -> &'static str {
        match self {
            GenName::Project => "Project",
            GenName::Folder => "folder",
            GenName::Images => "Images",
            GenName::Dialog => "wxDialog",
            GenName::Frame => "wxFrame",
            GenName::PanelForm => "PanelForm",
            GenName::PopupTransientWindow => "wxPopupTransientWindow",
            GenName::Wizard => "wxWizard",
            GenName::MenuBarForm => "MenuBar",
            GenName::ToolBarForm => "ToolBar",
            GenName::RibbonBarForm => "RibbonBar",
            GenName::BoxSizer => "wxBoxSizer",
            GenName::VerticalBoxSizer => "VerticalBoxSizer",
            GenName::GridSizer => "wxGridSizer",
            GenName::FlexGridSizer => "wxFlexGridSizer",
            GenName::StaticBoxSizer => "wxStaticBoxSizer",
            GenName::StaticCheckboxBoxSizer => "StaticCheckboxBoxSizer",
            GenName::StaticRadioBtnBoxSizer => "StaticRadioBtnBoxSizer",
            GenName::StdDialogButtonSizer => "wxStdDialogButtonSizer",
            GenName::Spacer => "spacer",
            GenName::Button => "wxButton",
            GenName::ToggleButton => "wxToggleButton",
            GenName::StaticText => "wxStaticText",
            GenName::TextCtrl => "wxTextCtrl",
            GenName::CheckBox => "wxCheckBox",
            GenName::Check3State => "Check3State",
            GenName::RadioButton => "wxRadioButton",
            GenName::Choice => "wxChoice",
            GenName::ComboBox => "wxComboBox",
            GenName::ListBox => "wxListBox",
            GenName::SpinCtrl => "wxSpinCtrl",
            GenName::Slider => "wxSlider",
            GenName::Gauge => "wxGauge",
            GenName::StaticBitmap => "wxStaticBitmap",
            GenName::StaticLine => "wxStaticLine",
            GenName::HyperlinkCtrl => "wxHyperlinkCtrl",
            GenName::AnimationCtrl => "wxAnimationCtrl",
            GenName::CalendarCtrl => "wxCalendarCtrl",
            GenName::TreeCtrl => "wxTreeCtrl",
            GenName::StyledTextCtrl => "wxStyledTextCtrl",
            GenName::RichTextCtrl => "wxRichTextCtrl",
            GenName::HtmlWindow => "wxHtmlWindow",
            GenName::StatusBar => "wxStatusBar",
            GenName::CustomControl => "CustomControl",
            GenName::Panel => "wxPanel",
            GenName::ScrolledWindow => "wxScrolledWindow",
            GenName::SplitterWindow => "wxSplitterWindow",
            GenName::CollapsiblePane => "wxCollapsiblePane",
            GenName::WizardPage => "wxWizardPageSimple",
            GenName::RibbonPage => "wxRibbonPage",
            GenName::RibbonPanel => "wxRibbonPanel",
            GenName::RibbonButtonBar => "wxRibbonButtonBar",
            GenName::Notebook => "wxNotebook",
            GenName::Treebook => "wxTreebook",
            GenName::Choicebook => "wxChoicebook",
            GenName::Listbook => "wxListbook",
            GenName::Simplebook => "wxSimplebook",
            GenName::AuiNotebook => "wxAuiNotebook",
            GenName::BookPage => "BookPage",
            GenName::MenuBar => "wxMenuBar",
            GenName::Menu => "wxMenu",
            GenName::SubMenu => "submenu",
            GenName::MenuItem => "wxMenuItem",
            GenName::Separator => "separator",
            GenName::ToolBar => "wxToolBar",
            GenName::AuiToolBar => "wxAuiToolBar",
            GenName::Tool => "tool",
            GenName::ToolDropdown => "tool_dropdown",
            GenName::ToolSeparator => "toolSeparator",
            GenName::RibbonButton => "ribbonButton",
            GenName::Timer => "wxTimer",
            GenName::ContextMenuEvent => "wxContextMenuEvent",
        }
    }

    /// Look up a kind by its project-file name.
    pub fn from_name(name: &str) -> Option<GenName> {
        Self::ALL.iter().copied().find(|gen| gen.as_str() == name)
    }

    /// The wxWidgets class this kind instantiates.
    ///
    /// Kinds that never produce a variable of their own (spacers, tools, separators,
    /// the project itself) return an empty string. A custom control takes its class
    /// from its `class_name` property instead.
    pub fn class_name(self) -> &'static str {
        match self {
            GenName::Project
            | GenName::Folder
            | GenName::Images
            | GenName::Spacer
            | GenName::Separator
            | GenName::Tool
            | GenName::ToolDropdown
            | GenName::ToolSeparator
            | GenName::RibbonButton
            | GenName::CustomControl => "",
            GenName::PanelForm | GenName::BookPage => "wxPanel",
            GenName::MenuBarForm => "wxMenuBar",
            GenName::ToolBarForm => "wxToolBar",
            GenName::RibbonBarForm => "wxRibbonBar",
            GenName::VerticalBoxSizer => "wxBoxSizer",
            GenName::StaticCheckboxBoxSizer | GenName::StaticRadioBtnBoxSizer => {
                "wxStaticBoxSizer"
            }
            GenName::Check3State => "wxCheckBox",
            GenName::SubMenu => "wxMenu",
            other => other.as_str(),
        }
    }

    /// Category of this kind.
    pub fn gen_type(self) -> GenType {
        match self {
            GenName::Project => GenType::Project,
            GenName::Folder => GenType::Folder,
            GenName::Images => GenType::Images,
            GenName::Dialog
            | GenName::Frame
            | GenName::PanelForm
            | GenName::PopupTransientWindow
            | GenName::Wizard
            | GenName::MenuBarForm
            | GenName::ToolBarForm
            | GenName::RibbonBarForm => GenType::Form,
            GenName::BoxSizer
            | GenName::VerticalBoxSizer
            | GenName::GridSizer
            | GenName::FlexGridSizer
            | GenName::StaticBoxSizer
            | GenName::StaticCheckboxBoxSizer
            | GenName::StaticRadioBtnBoxSizer
            | GenName::StdDialogButtonSizer => GenType::Sizer,
            GenName::Spacer => GenType::Spacer,
            GenName::Panel
            | GenName::ScrolledWindow
            | GenName::SplitterWindow
            | GenName::CollapsiblePane
            | GenName::WizardPage
            | GenName::RibbonPage
            | GenName::RibbonPanel
            | GenName::RibbonButtonBar => GenType::Container,
            GenName::Notebook
            | GenName::Treebook
            | GenName::Choicebook
            | GenName::Listbook
            | GenName::Simplebook
            | GenName::AuiNotebook => GenType::Book,
            GenName::BookPage => GenType::BookPage,
            GenName::MenuBar => GenType::MenuBar,
            GenName::Menu | GenName::SubMenu => GenType::Menu,
            GenName::MenuItem | GenName::Separator => GenType::MenuItem,
            GenName::ToolBar | GenName::AuiToolBar => GenType::ToolBar,
            GenName::Tool | GenName::ToolDropdown | GenName::ToolSeparator | GenName::RibbonButton => {
                GenType::Tool
            }
            GenName::Timer => GenType::Timer,
            GenName::ContextMenuEvent => GenType::ContextMenu,
            _ => GenType::Widget,
        }
    }

    /// Library the class lives in.
    pub fn library(self) -> WxLibrary {
        match self {
            GenName::Wizard
            | GenName::WizardPage
            | GenName::HyperlinkCtrl
            | GenName::AnimationCtrl
            | GenName::CalendarCtrl => WxLibrary::Adv,
            GenName::AuiNotebook | GenName::AuiToolBar => WxLibrary::Aui,
            GenName::HtmlWindow => WxLibrary::Html,
            GenName::RibbonBarForm
            | GenName::RibbonPage
            | GenName::RibbonPanel
            | GenName::RibbonButtonBar
            | GenName::RibbonButton => WxLibrary::Ribbon,
            GenName::RichTextCtrl => WxLibrary::RichText,
            GenName::StyledTextCtrl => WxLibrary::Stc,
            _ => WxLibrary::Core,
        }
    }

    /// The C++ header declaring this kind's class, if any.
    pub fn include_header(self) -> Option<&'static str> {
        let header = match self {
            GenName::Dialog => "wx/dialog.h",
            GenName::Frame => "wx/frame.h",
            GenName::PanelForm | GenName::Panel | GenName::BookPage => "wx/panel.h",
            GenName::PopupTransientWindow => "wx/popupwin.h",
            GenName::Wizard | GenName::WizardPage => "wx/wizard.h",
            GenName::MenuBarForm | GenName::MenuBar => "wx/menu.h",
            GenName::Menu | GenName::SubMenu | GenName::MenuItem => "wx/menu.h",
            GenName::ToolBarForm | GenName::ToolBar => "wx/toolbar.h",
            GenName::AuiToolBar => "wx/aui/auibar.h",
            GenName::RibbonBarForm => "wx/ribbon/bar.h",
            GenName::RibbonPage => "wx/ribbon/page.h",
            GenName::RibbonPanel => "wx/ribbon/panel.h",
            GenName::RibbonButtonBar => "wx/ribbon/buttonbar.h",
            GenName::BoxSizer | GenName::VerticalBoxSizer => "wx/sizer.h",
            GenName::GridSizer | GenName::FlexGridSizer => "wx/sizer.h",
            GenName::StaticBoxSizer
            | GenName::StaticCheckboxBoxSizer
            | GenName::StaticRadioBtnBoxSizer => "wx/statbox.h",
            GenName::StdDialogButtonSizer => "wx/button.h",
            GenName::Button => "wx/button.h",
            GenName::ToggleButton => "wx/tglbtn.h",
            GenName::StaticText => "wx/stattext.h",
            GenName::TextCtrl => "wx/textctrl.h",
            GenName::CheckBox | GenName::Check3State => "wx/checkbox.h",
            GenName::RadioButton => "wx/radiobut.h",
            GenName::Choice => "wx/choice.h",
            GenName::ComboBox => "wx/combobox.h",
            GenName::ListBox => "wx/listbox.h",
            GenName::SpinCtrl => "wx/spinctrl.h",
            GenName::Slider => "wx/slider.h",
            GenName::Gauge => "wx/gauge.h",
            GenName::StaticBitmap => "wx/statbmp.h",
            GenName::StaticLine => "wx/statline.h",
            GenName::HyperlinkCtrl => "wx/hyperlink.h",
            GenName::AnimationCtrl => "wx/animate.h",
            GenName::CalendarCtrl => "wx/calctrl.h",
            GenName::TreeCtrl => "wx/treectrl.h",
            GenName::StyledTextCtrl => "wx/stc/stc.h",
            GenName::RichTextCtrl => "wx/richtext/richtextctrl.h",
            GenName::HtmlWindow => "wx/html/htmlwin.h",
            GenName::StatusBar => "wx/statusbr.h",
            GenName::ScrolledWindow => "wx/scrolwin.h",
            GenName::SplitterWindow => "wx/splitter.h",
            GenName::CollapsiblePane => "wx/collpane.h",
            GenName::Notebook => "wx/notebook.h",
            GenName::Treebook => "wx/treebook.h",
            GenName::Choicebook => "wx/choicebk.h",
            GenName::Listbook => "wx/listbook.h",
            GenName::Simplebook => "wx/simplebook.h",
            GenName::AuiNotebook => "wx/aui/auibook.h",
            GenName::Timer => "wx/timer.h",
            _ => return None,
        };
        Some(header)
    }

    /// True for top-level generation units.
    pub fn is_form(self) -> bool {
        self.gen_type() == GenType::Form
    }

    /// True for sizers (not spacers).
    pub fn is_sizer(self) -> bool {
        self.gen_type() == GenType::Sizer
    }

    /// True for kinds that parent other windows.
    pub fn is_container(self) -> bool {
        matches!(
            self.gen_type(),
            GenType::Form | GenType::Container | GenType::Book | GenType::BookPage
        )
    }

    /// True for the notebook family.
    pub fn is_book(self) -> bool {
        self.gen_type() == GenType::Book
    }

    /// True for the three bar forms that can't stand alone in a resource preview.
    pub fn is_bar_form(self) -> bool {
        matches!(
            self,
            GenName::MenuBarForm | GenName::ToolBarForm | GenName::RibbonBarForm
        )
    }
}

impl std::fmt::Display for GenName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
