//! A small XML document arena.
//!
//! The XRC builder needs more than an event stream: it removes elements after
//! creating them and walks back up through parents to compute tree book page
//! depths. Elements and comments live in a flat `Vec` with parent links, and the
//! finished document is written out with `quick-xml`.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use formgen_codegen::XrcOptions;

use crate::error::{Result, XrcError};

/// Index of an element or comment in an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlId(usize);

#[derive(Debug, Clone)]
enum XmlKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        text: Option<String>,
        children: Vec<XmlId>,
    },
    Comment(String),
}

#[derive(Debug, Clone)]
struct XmlNode {
    parent: Option<XmlId>,
    kind: XmlKind,
}

/// How the serialized document is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    TwoSpaces,
    /// Everything on one line.
    None,
}

impl Indent {
    pub fn from_options(options: &XrcOptions) -> Self {
        if options.no_whitespace {
            Indent::None
        } else if options.indent_with_spaces {
            Indent::TwoSpaces
        } else {
            Indent::Tab
        }
    }
}

/// An XML document under construction.
///
/// Removed nodes stay in the arena but are no longer reachable from the
/// document, so ids handed out earlier never dangle.
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
    top: Vec<XmlId>,
}

impl XmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level element.
    pub fn append_root(&mut self, name: &str) -> XmlId {
        let id = self.push(None, element(name));
        self.top.push(id);
        id
    }

    /// Append a top-level comment.
    pub fn append_root_comment(&mut self, text: &str) -> XmlId {
        let id = self.push(None, XmlKind::Comment(text.to_string()));
        self.top.push(id);
        id
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<XmlId> {
        self.top.iter().copied().find(|id| self.name(*id).is_some())
    }

    /// Append an element as the last child of `parent`.
    pub fn append_child(&mut self, parent: XmlId, name: &str) -> XmlId {
        let id = self.push(Some(parent), element(name));
        self.attach(parent, id);
        id
    }

    /// Append `<name>text</name>` to `parent`.
    pub fn append_text(&mut self, parent: XmlId, name: &str, text: impl Into<String>) -> XmlId {
        let id = self.append_child(parent, name);
        self.set_text(id, text);
        id
    }

    pub fn append_comment(&mut self, parent: XmlId, text: &str) -> XmlId {
        let id = self.push(Some(parent), XmlKind::Comment(text.to_string()));
        self.attach(parent, id);
        id
    }

    /// Detach `child` from `parent`. Returns false when it wasn't a child.
    pub fn remove_child(&mut self, parent: XmlId, child: XmlId) -> bool {
        let removed = match self.nodes.get_mut(parent.0).map(|node| &mut node.kind) {
            Some(XmlKind::Element { children, .. }) => match children.iter().position(|id| *id == child) {
                Some(index) => {
                    children.remove(index);
                    true
                }
                None => false,
            },
            _ => false,
        };
        if removed {
            self.nodes[child.0].parent = None;
        }
        removed
    }

    /// Set an attribute, replacing any earlier value.
    pub fn set_attribute(&mut self, id: XmlId, name: &str, value: impl Into<String>) {
        if let Some(XmlKind::Element { attributes, .. }) = self.nodes.get_mut(id.0).map(|node| &mut node.kind) {
            let value = value.into();
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value,
                None => attributes.push((name.to_string(), value)),
            }
        }
    }

    pub fn attribute(&self, id: XmlId, name: &str) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            XmlKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            XmlKind::Comment(_) => None,
        }
    }

    pub fn set_text(&mut self, id: XmlId, value: impl Into<String>) {
        if let Some(XmlKind::Element { text, .. }) = self.nodes.get_mut(id.0).map(|node| &mut node.kind) {
            *text = Some(value.into());
        }
    }

    pub fn text(&self, id: XmlId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            XmlKind::Element { text, .. } => text.as_deref(),
            XmlKind::Comment(_) => None,
        }
    }

    /// Element name, `None` for comments.
    pub fn name(&self, id: XmlId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            XmlKind::Element { name, .. } => Some(name),
            XmlKind::Comment(_) => None,
        }
    }

    pub fn comment(&self, id: XmlId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            XmlKind::Comment(text) => Some(text),
            XmlKind::Element { .. } => None,
        }
    }

    pub fn parent(&self, id: XmlId) -> Option<XmlId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: XmlId) -> &[XmlId] {
        match self.nodes.get(id.0).map(|node| &node.kind) {
            Some(XmlKind::Element { children, .. }) => children,
            _ => &[],
        }
    }

    pub fn first_child_named(&self, id: XmlId, name: &str) -> Option<XmlId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.name(*child) == Some(name))
    }

    /// Text of the first child element called `name`.
    pub fn child_text(&self, id: XmlId, name: &str) -> Option<&str> {
        self.first_child_named(id, name).and_then(|child| self.text(child))
    }

    /// Every attached element called `name`, in document order.
    pub fn find_all(&self, name: &str) -> Vec<XmlId> {
        let mut found = Vec::new();
        let mut stack: Vec<XmlId> = self.top.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.name(id) == Some(name) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        found
    }

    /// Serialize the document, starting with `<?xml version="1.0"?>`.
    pub fn to_xml(&self, indent: Indent) -> Result<String> {
        let mut writer = match indent {
            Indent::Tab => Writer::new_with_indent(Vec::new(), b'\t', 1),
            Indent::TwoSpaces => Writer::new_with_indent(Vec::new(), b' ', 2),
            Indent::None => Writer::new(Vec::new()),
        };
        write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", None, None)))?;
        for id in &self.top {
            self.write_node(&mut writer, *id)?;
        }
        let mut xml = String::from_utf8(writer.into_inner())?;
        if indent != Indent::None {
            xml.push('\n');
        }
        Ok(xml)
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: XmlId) -> Result<()> {
        match &self.nodes[id.0].kind {
            XmlKind::Comment(text) => write_event(writer, Event::Comment(BytesText::from_escaped(text.as_str()))),
            XmlKind::Element {
                name,
                attributes,
                text,
                children,
            } => {
                let mut start = BytesStart::new(name.as_str());
                for (key, value) in attributes {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
                if text.is_none() && children.is_empty() {
                    return write_event(writer, Event::Empty(start));
                }
                write_event(writer, Event::Start(start))?;
                if let Some(text) = text {
                    write_event(writer, Event::Text(BytesText::new(text)))?;
                }
                for child in children {
                    self.write_node(writer, *child)?;
                }
                write_event(writer, Event::End(BytesEnd::new(name.as_str())))
            }
        }
    }

    fn push(&mut self, parent: Option<XmlId>, kind: XmlKind) -> XmlId {
        let id = XmlId(self.nodes.len());
        self.nodes.push(XmlNode { parent, kind });
        id
    }

    fn attach(&mut self, parent: XmlId, child: XmlId) {
        if let Some(XmlKind::Element { children, .. }) = self.nodes.get_mut(parent.0).map(|node| &mut node.kind) {
            children.push(child);
        }
    }
}

fn element(name: &str) -> XmlKind {
    XmlKind::Element {
        name: name.to_string(),
        attributes: Vec::new(),
        text: None,
        children: Vec::new(),
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|err| XrcError::Xml(err.to_string()))
}
