//! Per-node transforms.

use formgen_codegen::construct::{parse_choices, parse_size};
use formgen_core::{GenName, IdValue, ImageDescription, ImageKind, Node, PropName};

use crate::builder::Builder;
use crate::result::XrcResult;
use crate::xml::XmlId;

const DIALOG_BUTTONS: [(PropName, &str); 9] = [
    (PropName::OkButton, "wxID_OK"),
    (PropName::YesButton, "wxID_YES"),
    (PropName::SaveButton, "wxID_SAVE"),
    (PropName::ApplyButton, "wxID_APPLY"),
    (PropName::NoButton, "wxID_NO"),
    (PropName::CancelButton, "wxID_CANCEL"),
    (PropName::CloseButton, "wxID_CLOSE"),
    (PropName::HelpButton, "wxID_HELP"),
    (PropName::ContextHelpButton, "wxID_CONTEXT_HELP"),
];

impl<'t> Builder<'t, '_> {
    /// Fill in `object` for `node`.
    pub(crate) fn transform(&mut self, node: &'t Node, object: XmlId) -> XrcResult {
        match node.gen() {
            GenName::Project
            | GenName::Folder
            | GenName::Images => XrcResult::NotSupported,
            GenName::Timer | GenName::ContextMenuEvent => self.unsupported_child(node, object),
            GenName::PopupTransientWindow => self.unsupported_form(node, object),

            GenName::Dialog | GenName::Frame => self.top_window(node, object),
            GenName::Wizard => {
                self.attributes(node, object, "wxWizard");
                self.text(node, object, PropName::Title, "title");
                self.bitmap(node, object, PropName::Bitmap, "bitmap");
                self.style_pos_size(node, object, "");
                XrcResult::Updated
            }
            GenName::PanelForm => {
                self.attributes(node, object, "wxPanel");
                self.style_pos_size(node, object, "");
                self.window_settings(node, object);
                XrcResult::Updated
            }
            GenName::MenuBarForm | GenName::MenuBar => {
                let (item, result) = self.begin(node, object);
                self.attributes(node, item, "wxMenuBar");
                self.style_pos_size(node, item, "");
                result
            }
            GenName::ToolBarForm | GenName::ToolBar | GenName::AuiToolBar => {
                let (item, result) = self.begin(node, object);
                self.attributes(node, item, node.gen().class_name());
                self.style_pos_size(node, item, "");
                self.window_settings(node, item);
                result
            }

            GenName::BoxSizer | GenName::VerticalBoxSizer => {
                let (item, result) = self.begin(node, object);
                self.attributes(node, item, "wxBoxSizer");
                self.orientation(node, item);
                self.min_size(node, item);
                result
            }
            GenName::GridSizer | GenName::FlexGridSizer => {
                let (item, result) = self.begin(node, object);
                self.attributes(node, item, node.gen().class_name());
                for (prop, tag) in [
                    (PropName::Rows, "rows"),
                    (PropName::Cols, "cols"),
                    (PropName::Vgap, "vgap"),
                    (PropName::Hgap, "hgap"),
                ] {
                    self.text(node, item, prop, tag);
                }
                self.min_size(node, item);
                result
            }
            GenName::StaticBoxSizer | GenName::StaticCheckboxBoxSizer | GenName::StaticRadioBtnBoxSizer => {
                self.static_box_sizer(node, object)
            }
            GenName::StdDialogButtonSizer => self.dialog_button_sizer(node, object),
            GenName::Spacer => self.spacer(node, object),

            GenName::BookPage => self.book_page(node, object),

            GenName::Menu | GenName::SubMenu => {
                self.attributes(node, object, "wxMenu");
                self.text(node, object, PropName::Label, "label");
                self.bitmap(node, object, PropName::Bitmap, "bitmap");
                XrcResult::Updated
            }
            GenName::MenuItem => self.menu_item(node, object),
            GenName::Separator | GenName::ToolSeparator => {
                self.doc.set_attribute(object, "class", "separator");
                XrcResult::Updated
            }
            GenName::Tool => {
                self.attributes(node, object, "tool");
                self.tool_props(node, object);
                XrcResult::Updated
            }
            GenName::ToolDropdown => self.dropdown_tool(node, object),
            GenName::RibbonButton => {
                self.attributes(node, object, "button");
                self.text(node, object, PropName::Label, "label");
                self.text(node, object, PropName::HelpString, "help");
                self.bitmap(node, object, PropName::Bitmap, "bitmap");
                XrcResult::Updated
            }

            _ => self.widget(node, object),
        }
    }

    /// Wrap `node` in a `sizeritem` when its parent is a sizer. Returns the
    /// element to fill in and the matching result.
    fn begin(&mut self, node: &Node, object: XmlId) -> (XmlId, XrcResult) {
        let in_sizer = self
            .tree
            .parent(node.id())
            .is_some_and(|parent| parent.gen().is_sizer());
        if in_sizer {
            self.doc.set_attribute(object, "class", "sizeritem");
            self.sizer_item_props(node, object);
            (self.doc.append_child(object, "object"), XrcResult::SizerItemCreated)
        } else {
            (object, XrcResult::Updated)
        }
    }

    fn sizer_item_props(&mut self, node: &Node, object: XmlId) {
        let flags = join_flags([
            node.as_str(PropName::Borders),
            node.as_str(PropName::Flags),
            node.as_str(PropName::Alignment),
        ]);
        if !flags.is_empty() {
            self.doc.append_text(object, "flag", flags);
        }
        self.text(node, object, PropName::BorderSize, "border");
        if node.as_int(PropName::Proportion) != 0 {
            self.doc
                .append_text(object, "option", node.as_int(PropName::Proportion).to_string());
        }
    }

    /// `class` and `name`. The name is a non-default id, then the variable
    /// name, then the class name.
    fn attributes(&mut self, node: &Node, item: XmlId, class: &str) {
        self.doc.set_attribute(item, "class", class);
        let name = match IdValue::parse(node.as_str(PropName::Id)) {
            Some(id) if id.name() != "wxID_ANY" => id.name().to_string(),
            _ if node.has_prop(PropName::VarName) => node.var_name().to_string(),
            _ => node.class_name().to_string(),
        };
        if !name.is_empty() {
            self.doc.set_attribute(item, "name", name);
        }
    }

    fn text(&mut self, node: &Node, item: XmlId, prop: PropName, tag: &str) {
        if node.has_value(prop) {
            self.doc.append_text(item, tag, node.as_str(prop));
        }
    }

    fn flag(&mut self, node: &Node, item: XmlId, prop: PropName, tag: &str) {
        if node.as_bool(prop) {
            self.doc.append_text(item, tag, "1");
        }
    }

    fn style_pos_size(&mut self, node: &Node, item: XmlId, implied: &str) {
        let style = join_flags([implied, node.as_str(PropName::Style), node.as_str(PropName::WindowStyle)]);
        if !style.is_empty() {
            self.doc.append_text(item, "style", style);
        }
        for (prop, tag) in [(PropName::Pos, "pos"), (PropName::Size, "size")] {
            if let Some((x, y)) = parse_size(node.as_str(prop)).filter(|value| *value != (-1, -1)) {
                self.doc.append_text(item, tag, format!("{x},{y}"));
            }
        }
    }

    fn min_size(&mut self, node: &Node, item: XmlId) {
        if let Some((width, height)) = parse_size(node.as_str(PropName::MinSize)).filter(|value| *value != (-1, -1)) {
            self.doc.append_text(item, "minsize", format!("{width},{height}"));
        }
    }

    fn window_settings(&mut self, node: &Node, item: XmlId) {
        self.text(node, item, PropName::Tooltip, "tooltip");
        self.flag(node, item, PropName::Hidden, "hidden");
        if node.as_bool(PropName::Disabled) {
            self.doc.append_text(item, "enabled", "0");
        }
        self.flag(node, item, PropName::Focus, "focused");
        if self.add_comments && node.has_value(PropName::ValidatorVariable) {
            self.doc
                .append_comment(item, " Validators cannot be set in the XRC file. ");
        }
    }

    fn orientation(&mut self, node: &Node, item: XmlId) {
        let orient = match node.as_str(PropName::Orientation) {
            "" if node.is_gen(GenName::VerticalBoxSizer) => "wxVERTICAL",
            "" => "wxHORIZONTAL",
            orient => orient,
        };
        self.doc.append_text(item, "orient", orient);
    }

    fn bitmap(&mut self, node: &Node, item: XmlId, prop: PropName, tag: &str) {
        if !node.has_value(prop) {
            return;
        }
        let Ok(description) = ImageDescription::parse(node.as_str(prop)) else {
            if self.add_comments {
                self.doc.append_comment(item, &format!(" Invalid {tag} description. "));
            }
            return;
        };
        match description.kind {
            ImageKind::Art => {
                let (art_id, client) = description.art_parts();
                let bitmap = self.doc.append_child(item, tag);
                self.doc.set_attribute(bitmap, "stock_id", art_id);
                if let Some(client) = client {
                    self.doc.set_attribute(bitmap, "stock_client", client);
                }
            }
            ImageKind::Svg => {
                let bitmap = self.doc.append_text(item, tag, description.path.as_str());
                if let Some((width, height)) = description.size {
                    self.doc
                        .set_attribute(bitmap, "default_size", format!("{width},{height}"));
                }
            }
            _ => {
                self.doc.append_text(item, tag, description.path.as_str());
            }
        }
    }

    fn unsupported_form(&mut self, node: &Node, object: XmlId) -> XrcResult {
        let (item, _) = self.begin(node, object);
        // Something has to hold the comment without showing up in the UI.
        self.attributes(node, item, "wxBoxSizer");
        let message = format!("{} is not supported by XRC", node.gen());
        self.doc.append_comment(item, &format!(" {message} "));
        self.warnings.push(format!("{}: {message}", node.class_name()));
        XrcResult::FormNotSupported
    }

    /// Timers and context menu handlers have no XRC form. With comments on,
    /// an empty sizer keeps a note of where they were.
    fn unsupported_child(&mut self, node: &Node, object: XmlId) -> XrcResult {
        if !self.add_comments {
            return XrcResult::NotSupported;
        }
        let (item, _) = self.begin(node, object);
        self.doc.set_attribute(item, "class", "wxBoxSizer");
        self.doc
            .append_comment(item, &format!(" {} is not supported by XRC ", node.gen()));
        XrcResult::FormNotSupported
    }

    fn top_window(&mut self, node: &Node, object: XmlId) -> XrcResult {
        self.attributes(node, object, node.gen().class_name());
        self.text(node, object, PropName::Title, "title");
        if self.add_comments && node.as_str(PropName::Style).contains("wxWANTS_CHARS") {
            self.doc.append_comment(
                object,
                " The wxWANTS_CHARS style will be ignored when the XRC is loaded. ",
            );
        }
        self.style_pos_size(node, object, "");
        match node.as_str(PropName::Center) {
            "" => {}
            "no" => {
                self.doc.append_text(object, "centered", "0");
            }
            direction => {
                if self.add_comments && matches!(direction, "wxVERTICAL" | "wxHORIZONTAL") {
                    self.doc
                        .append_comment(object, &format!(" {direction} cannot be set in the XRC file. "));
                }
                self.doc.append_text(object, "centered", "1");
            }
        }
        self.bitmap(node, object, PropName::Icon, "icon");
        self.window_settings(node, object);
        XrcResult::Updated
    }

    fn static_box_sizer(&mut self, node: &Node, object: XmlId) -> XrcResult {
        let (item, result) = self.begin(node, object);
        self.attributes(node, item, "wxStaticBoxSizer");
        self.orientation(node, item);
        let label_class = match node.gen() {
            GenName::StaticCheckboxBoxSizer => "wxCheckBox",
            GenName::StaticRadioBtnBoxSizer => "wxRadioButton",
            _ => {
                self.text(node, item, PropName::Label, "label");
                self.min_size(node, item);
                return result;
            }
        };
        let window_label = self.doc.append_child(item, "windowlabel");
        let control = self.doc.append_child(window_label, "object");
        self.doc.set_attribute(control, "class", label_class);
        self.text(node, control, PropName::Label, "label");
        let checked_tag = if label_class == "wxCheckBox" { "checked" } else { "value" };
        self.flag(node, control, PropName::Checked, checked_tag);
        self.min_size(node, item);
        result
    }

    fn dialog_button_sizer(&mut self, node: &Node, object: XmlId) -> XrcResult {
        let (item, result) = self.begin(node, object);
        self.doc.set_attribute(item, "class", "wxStdDialogButtonSizer");
        if node.has_value(PropName::VarName) {
            self.doc.set_attribute(item, "name", node.var_name());
        }
        for (prop, id) in DIALOG_BUTTONS {
            if !node.as_bool(prop) {
                continue;
            }
            let button = self.doc.append_child(item, "object");
            self.doc.set_attribute(button, "class", "button");
            let control = self.doc.append_child(button, "object");
            self.doc.set_attribute(control, "class", "wxButton");
            self.doc.set_attribute(control, "name", id);
        }
        result
    }

    /// A spacer is its own sizer item.
    fn spacer(&mut self, node: &Node, object: XmlId) -> XrcResult {
        self.doc.set_attribute(object, "class", "spacer");
        let width = node.as_int(PropName::Width);
        let height = node.as_int(PropName::Height);
        self.doc.append_text(object, "size", format!("{width},{height}"));
        self.sizer_item_props(node, object);
        XrcResult::Updated
    }

    /// The page element plus the panel the page's controls live in.
    fn book_page(&mut self, node: &Node, object: XmlId) -> XrcResult {
        let book = self
            .tree
            .ancestors(node.id())
            .find(|ancestor| ancestor.gen().is_book())
            .map(Node::gen);
        let page_class = match book {
            Some(GenName::Treebook) => "treebookpage",
            Some(GenName::Choicebook) => "choicebookpage",
            Some(GenName::Listbook) => "listbookpage",
            Some(GenName::Simplebook) => "simplebookpage",
            _ => "notebookpage",
        };
        self.doc.set_attribute(object, "class", page_class);
        self.text(node, object, PropName::Label, "label");
        self.flag(node, object, PropName::Select, "selected");
        self.bitmap(node, object, PropName::Bitmap, "bitmap");

        let panel = self.doc.append_child(object, "object");
        self.attributes(node, panel, "wxPanel");
        self.style_pos_size(node, panel, "");
        self.window_settings(node, panel);
        XrcResult::SizerItemCreated
    }

    fn menu_item(&mut self, node: &Node, object: XmlId) -> XrcResult {
        self.attributes(node, object, "wxMenuItem");
        self.text(node, object, PropName::Label, "label");
        self.text(node, object, PropName::Shortcut, "accel");
        self.text(node, object, PropName::HelpString, "help");
        match node.as_str(PropName::Kind) {
            "wxITEM_CHECK" => {
                self.doc.append_text(object, "checkable", "1");
            }
            "wxITEM_RADIO" => {
                self.doc.append_text(object, "radio", "1");
            }
            _ => {}
        }
        self.flag(node, object, PropName::Checked, "checked");
        if node.as_bool(PropName::Disabled) {
            self.doc.append_text(object, "enabled", "0");
        }
        self.bitmap(node, object, PropName::Bitmap, "bitmap");
        XrcResult::Updated
    }

    fn tool_props(&mut self, node: &Node, item: XmlId) {
        match node.as_str(PropName::Kind) {
            "wxITEM_RADIO" => {
                self.doc.append_text(item, "radio", "1");
            }
            "wxITEM_CHECK" => {
                self.doc.append_text(item, "toggle", "1");
            }
            "wxITEM_DROPDOWN" => {
                self.doc.append_text(item, "dropdown", "1");
            }
            _ => {}
        }
        self.text(node, item, PropName::Label, "label");
        self.text(node, item, PropName::Tooltip, "tooltip");
        self.text(node, item, PropName::HelpString, "longhelp");
        self.flag(node, item, PropName::Disabled, "disabled");
        if node.has_value(PropName::Bitmap) {
            self.bitmap(node, item, PropName::Bitmap, "bitmap");
        } else {
            let bitmap = self.doc.append_child(item, "bitmap");
            self.doc.set_attribute(bitmap, "stock_id", "wxART_QUESTION");
            self.doc.set_attribute(bitmap, "stock_client", "wxART_TOOLBAR");
        }
    }

    /// Writes the tool and its whole menu.
    fn dropdown_tool(&mut self, node: &'t Node, object: XmlId) -> XrcResult {
        self.attributes(node, object, "tool");
        self.tool_props(node, object);
        if !node.children().is_empty() {
            let dropdown = self.doc.append_child(object, "dropdown");
            let menu = self.doc.append_child(dropdown, "object");
            self.doc.set_attribute(menu, "class", "wxMenu");
            let tree = self.tree;
            for child in tree.children(node.id()) {
                self.append_child_object(child, menu);
            }
        }
        XrcResult::Updated
    }

    fn widget(&mut self, node: &Node, object: XmlId) -> XrcResult {
        let gen = node.gen();
        let class = match gen {
            GenName::CustomControl => "unknown",
            gen => gen.class_name(),
        };
        let (item, result) = self.begin(node, object);
        self.attributes(node, item, class);

        let mut implied = "";
        match gen {
            GenName::Button => {
                self.text(node, item, PropName::Label, "label");
                self.bitmap(node, item, PropName::Bitmap, "bitmap");
            }
            GenName::ToggleButton => {
                self.text(node, item, PropName::Label, "label");
                self.flag(node, item, PropName::Checked, "checked");
                self.bitmap(node, item, PropName::Bitmap, "bitmap");
            }
            GenName::StaticText => {
                self.text(node, item, PropName::Label, "label");
                if node.has_value(PropName::Wrap) && node.as_int(PropName::Wrap) >= 0 {
                    self.text(node, item, PropName::Wrap, "wrap");
                }
                self.flag(node, item, PropName::Markup, "markup");
            }
            GenName::TextCtrl | GenName::RichTextCtrl => {
                self.text(node, item, PropName::Value, "value");
            }
            GenName::CheckBox | GenName::Check3State => {
                if gen == GenName::Check3State {
                    implied = "wxCHK_3STATE";
                }
                self.text(node, item, PropName::Label, "label");
                self.flag(node, item, PropName::Checked, "checked");
            }
            GenName::RadioButton => {
                self.text(node, item, PropName::Label, "label");
                self.flag(node, item, PropName::Checked, "value");
            }
            GenName::Choice | GenName::ComboBox | GenName::ListBox => {
                if gen == GenName::ComboBox {
                    self.text(node, item, PropName::Value, "value");
                }
                let choices = parse_choices(node.as_str(PropName::Choices));
                if !choices.is_empty() {
                    let content = self.doc.append_child(item, "content");
                    for choice in choices {
                        self.doc.append_text(content, "item", choice);
                    }
                }
                if node.has_value(PropName::Selection) && node.as_int(PropName::Selection) >= 0 {
                    self.text(node, item, PropName::Selection, "selection");
                }
            }
            GenName::SpinCtrl => {
                self.text(node, item, PropName::Initial, "value");
                self.text(node, item, PropName::Min, "min");
                self.text(node, item, PropName::Max, "max");
            }
            GenName::Slider => {
                self.text(node, item, PropName::Position, "value");
                self.text(node, item, PropName::Min, "min");
                self.text(node, item, PropName::Max, "max");
            }
            GenName::Gauge => {
                self.text(node, item, PropName::Max, "range");
                self.text(node, item, PropName::Position, "value");
            }
            GenName::StaticBitmap => {
                self.bitmap(node, item, PropName::Bitmap, "bitmap");
            }
            GenName::HyperlinkCtrl => {
                self.text(node, item, PropName::Label, "label");
                self.text(node, item, PropName::Url, "url");
            }
            GenName::HtmlWindow => {
                self.text(node, item, PropName::Url, "url");
            }
            GenName::AnimationCtrl => {
                if let Ok(animation) = ImageDescription::parse(node.as_str(PropName::Animation)) {
                    self.doc.append_text(item, "animation", animation.path);
                }
            }
            GenName::SplitterWindow => {
                self.text(node, item, PropName::SashPos, "sashpos");
                let orientation = match node.as_str(PropName::SplitMode) {
                    "wxSPLIT_HORIZONTAL" => "horizontal",
                    _ => "vertical",
                };
                self.doc.append_text(item, "orientation", orientation);
            }
            GenName::CollapsiblePane => {
                self.text(node, item, PropName::Label, "label");
                self.flag(node, item, PropName::Collapsed, "collapsed");
            }
            GenName::WizardPage => {
                self.bitmap(node, item, PropName::Bitmap, "bitmap");
            }
            GenName::RibbonPage => {
                self.text(node, item, PropName::Label, "label");
                self.bitmap(node, item, PropName::Icon, "icon");
            }
            GenName::RibbonPanel => {
                self.text(node, item, PropName::Label, "label");
            }
            GenName::StatusBar => {
                self.doc.append_text(item, "fields", "1");
            }
            _ => {}
        }

        self.style_pos_size(node, item, implied);
        self.window_settings(node, item);
        result
    }
}

fn join_flags<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .flat_map(|flags| flags.split('|'))
        .map(str::trim)
        .filter(|flag| !flag.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}
