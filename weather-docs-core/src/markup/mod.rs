//! A small mutable XML tree for Flare topics, TOCs and snippets.
//!
//! Parsing and serialization go through `quick-xml`; this module only keeps
//! the tree and the handful of lookups the assembler needs.

use std::{fs, path::Path};

use tracing::debug;

use crate::{Error, Result};

mod xml;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Set `key`, replacing an existing value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Concatenated text of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First element named `name`, this one included, in document order.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.find_where(&|el| el.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.find_where_mut(&|el| el.name == name)
    }

    pub fn find_by_id(&self, name: &str, id: &str) -> Option<&Element> {
        self.find_where(&|el| el.name == name && el.attr("id") == Some(id))
    }

    pub fn find_by_id_mut(&mut self, name: &str, id: &str) -> Option<&mut Element> {
        self.find_where_mut(&|el| el.name == name && el.attr("id") == Some(id))
    }

    /// Every element named `name`, in document order.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in self.elements() {
            child.collect_named(name, found);
        }
    }

    fn find_where<F: Fn(&Element) -> bool>(&self, pred: &F) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.elements().find_map(|child| child.find_where(pred))
    }

    fn find_where_mut<F: Fn(&Element) -> bool>(&mut self, pred: &F) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if let Some(found) = el.find_where_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) | Node::CData(t) => out.push_str(t),
            Node::Element(el) => collect_text(&el.children, out),
            Node::Comment(_) => {}
        }
    }
}

/// A parsed markup file: an optional XML declaration and one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub declaration: bool,
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { declaration: true, root }
    }

    /// Parse markup; a leading byte-order mark is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        xml::parse(text.strip_prefix('\u{feff}').unwrap_or(text))
    }

    pub fn to_xml(&self) -> Result<String> {
        xml::serialize(self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text).map_err(|e| match e {
            Error::Markup(msg) => Error::Markup(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Load `path`, first writing `template` there if the file does not exist.
    pub fn load_or_create(path: &Path, template: impl FnOnce() -> Document) -> Result<Self> {
        if !path.is_file() {
            debug!(path = %path.display(), "creating from template");
            template().save(path)?;
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_normalized(path, &self.to_xml()?)
    }

    pub fn find_section_mut(&mut self, name: &str, id: Option<&str>) -> Result<&mut Element> {
        let found = match id {
            Some(id) => self.root.find_by_id_mut(name, id),
            None => self.root.find_mut(name),
        };
        found.ok_or_else(|| Error::missing_section(name, id))
    }
}

/// Write `text` to `path` with `\r\n` collapsed to `\n`, creating parent
/// directories as needed.
pub fn write_normalized(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, text.replace("\r\n", "\n")).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote document");
    Ok(())
}
