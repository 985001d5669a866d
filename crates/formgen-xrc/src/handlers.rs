//! XRC resource handlers a generated file needs.
//!
//! `wxXmlResource::InitAllHandlers()` registers most handlers, but a few live
//! in optional libraries and have to be added by the application before the
//! resource is loaded.

use std::collections::BTreeSet;

use formgen_core::{DesignTree, GenName, NodeId};

/// Handlers `InitAllHandlers()` does not register.
pub const EXPLICIT_HANDLERS: [&str; 5] = [
    "wxAuiToolBarXmlHandler",
    "wxAuiXmlHandler",
    "wxRibbonXmlHandler",
    "wxRichTextCtrlXmlHandler",
    "wxStyledTextCtrlXmlHandler",
];

/// The handler that loads `gen`, if it appears in XRC at all.
pub fn handler_for(gen: GenName) -> Option<&'static str> {
    let handler = match gen {
        GenName::Dialog => "wxDialogXmlHandler",
        GenName::Frame => "wxFrameXmlHandler",
        GenName::PanelForm | GenName::Panel => "wxPanelXmlHandler",
        GenName::Wizard | GenName::WizardPage => "wxWizardXmlHandler",
        GenName::MenuBarForm
        | GenName::MenuBar
        | GenName::Menu
        | GenName::SubMenu
        | GenName::MenuItem
        | GenName::Separator => "wxMenuXmlHandler",
        GenName::ToolBarForm | GenName::ToolBar => "wxToolBarXmlHandler",
        GenName::AuiToolBar => "wxAuiToolBarXmlHandler",
        GenName::RibbonBarForm
        | GenName::RibbonPage
        | GenName::RibbonPanel
        | GenName::RibbonButtonBar
        | GenName::RibbonButton => "wxRibbonXmlHandler",
        GenName::BoxSizer
        | GenName::VerticalBoxSizer
        | GenName::GridSizer
        | GenName::FlexGridSizer
        | GenName::StaticBoxSizer
        | GenName::StaticCheckboxBoxSizer
        | GenName::StaticRadioBtnBoxSizer
        | GenName::Spacer => "wxSizerXmlHandler",
        GenName::StdDialogButtonSizer => "wxStdDialogButtonSizerXmlHandler",
        GenName::Button => "wxButtonXmlHandler",
        GenName::ToggleButton => "wxToggleButtonXmlHandler",
        GenName::StaticText => "wxStaticTextXmlHandler",
        GenName::TextCtrl => "wxTextCtrlXmlHandler",
        GenName::CheckBox | GenName::Check3State => "wxCheckBoxXmlHandler",
        GenName::RadioButton => "wxRadioButtonXmlHandler",
        GenName::Choice => "wxChoiceXmlHandler",
        GenName::ComboBox => "wxComboBoxXmlHandler",
        GenName::ListBox => "wxListBoxXmlHandler",
        GenName::SpinCtrl => "wxSpinCtrlXmlHandler",
        GenName::Slider => "wxSliderXmlHandler",
        GenName::Gauge => "wxGaugeXmlHandler",
        GenName::StaticBitmap => "wxStaticBitmapXmlHandler",
        GenName::StaticLine => "wxStaticLineXmlHandler",
        GenName::HyperlinkCtrl => "wxHyperlinkCtrlXmlHandler",
        GenName::AnimationCtrl => "wxAnimationCtrlXmlHandler",
        GenName::CalendarCtrl => "wxCalendarCtrlXmlHandler",
        GenName::TreeCtrl => "wxTreeCtrlXmlHandler",
        GenName::StyledTextCtrl => "wxStyledTextCtrlXmlHandler",
        GenName::RichTextCtrl => "wxRichTextCtrlXmlHandler",
        GenName::HtmlWindow => "wxHtmlWindowXmlHandler",
        GenName::StatusBar => "wxStatusBarXmlHandler",
        GenName::CustomControl => "wxUnknownWidgetXmlHandler",
        GenName::ScrolledWindow => "wxScrolledWindowXmlHandler",
        GenName::SplitterWindow => "wxSplitterWindowXmlHandler",
        GenName::CollapsiblePane => "wxCollapsiblePaneXmlHandler",
        GenName::Notebook => "wxNotebookXmlHandler",
        GenName::Treebook => "wxTreebookXmlHandler",
        GenName::Choicebook => "wxChoicebookXmlHandler",
        GenName::Listbook => "wxListbookXmlHandler",
        GenName::Simplebook => "wxSimplebookXmlHandler",
        GenName::AuiNotebook => "wxAuiXmlHandler",
        GenName::Tool | GenName::ToolDropdown | GenName::ToolSeparator => "wxToolBarXmlHandler",
        GenName::Project
        | GenName::Folder
        | GenName::Images
        | GenName::PopupTransientWindow
        | GenName::BookPage
        | GenName::Timer
        | GenName::ContextMenuEvent => return None,
    };
    Some(handler)
}

/// True when the application has to register `handler` itself.
pub fn needs_explicit_registration(handler: &str) -> bool {
    EXPLICIT_HANDLERS.contains(&handler)
}

/// Every handler needed to load the subtree at `id`, sorted by name.
pub fn required_handlers(tree: &DesignTree, id: NodeId) -> BTreeSet<&'static str> {
    tree.descendants(id)
        .into_iter()
        .filter_map(|node| handler_for(tree.node(node).gen()))
        .collect()
}

#[cfg(test)]
mod tests {
    use formgen_core::{NodeBuilder, PropName};

    use super::*;

    #[test]
    fn test_collects_sorted_unique_handlers() {
        let tree = DesignTree::new(
            NodeBuilder::new(GenName::Project).with_child(
                NodeBuilder::new(GenName::Frame)
                    .with_prop(PropName::ClassName, "Editor")
                    .with_child(NodeBuilder::new(GenName::VerticalBoxSizer).with_children([
                        NodeBuilder::new(GenName::StyledTextCtrl),
                        NodeBuilder::new(GenName::BoxSizer)
                            .with_child(NodeBuilder::new(GenName::Button))
                            .with_child(NodeBuilder::new(GenName::Button)),
                        NodeBuilder::new(GenName::Timer),
                    ])),
            ),
        );
        let handlers = required_handlers(&tree, tree.forms()[0]);
        let handlers: Vec<&str> = handlers.into_iter().collect();
        assert_eq!(
            handlers,
            vec![
                "wxButtonXmlHandler",
                "wxFrameXmlHandler",
                "wxSizerXmlHandler",
                "wxStyledTextCtrlXmlHandler",
            ]
        );
    }

    #[test]
    fn test_explicit_registration() {
        assert!(needs_explicit_registration("wxRichTextCtrlXmlHandler"));
        assert!(needs_explicit_registration("wxAuiXmlHandler"));
        assert!(!needs_explicit_registration("wxButtonXmlHandler"));
        for gen in GenName::ALL {
            if let Some(handler) = handler_for(*gen) {
                assert!(handler.ends_with("XmlHandler"), "{gen}: {handler}");
            }
        }
    }
}
