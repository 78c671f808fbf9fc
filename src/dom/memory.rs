//! Arena-backed in-memory document.
//!
//! Elements live in a flat arena and reference their children by index.
//! Replacing an element's content detaches its children; detached elements
//! stay in the arena but are unreachable from the root, so queries (which
//! walk from the root) never see them.

use std::fmt::Write as _;

use super::{Dom, Selector};

/// Handle to an element of a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    content: Content,
    children: Vec<usize>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            styles: Vec::new(),
            content: Content::Text(String::new()),
            children: Vec::new(),
        }
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Attribute(name) => self.attributes.iter().any(|(n, _)| n == name),
        }
    }
}

/// In-memory document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDom {
    nodes: Vec<Element>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new("main")
    }
}

impl MemoryDom {
    /// Creates a document whose root element has the given tag.
    #[must_use]
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Element::new(root_tag)],
        }
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a child element with the given classes and placeholder text.
    pub fn append(&mut self, parent: NodeId, tag: &str, classes: &[&str], text: &str) -> NodeId {
        let mut element = Element::new(tag);
        element.classes = classes.iter().map(|c| (*c).to_string()).collect();
        element.content = Content::Text(text.to_string());
        let id = self.nodes.len();
        self.nodes.push(element);
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        NodeId(id)
    }

    /// Text content of an element and its descendants. Markup set through
    /// [`Dom::set_html`] contributes its text with tags removed.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node.0, &mut out);
        out
    }

    /// Raw markup previously set on the element, if any.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.content {
            Content::Html(html) => Some(html),
            Content::Text(_) => None,
        }
    }

    /// Value of an inline style property.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(node.0)?
            .styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Value of an attribute.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(node.0)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serializes the reachable tree as indented HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_element(0, 0, &mut out);
        out
    }

    fn collect_text(&self, idx: usize, out: &mut String) {
        let Some(el) = self.nodes.get(idx) else {
            return;
        };
        match &el.content {
            Content::Text(text) => out.push_str(text),
            Content::Html(html) => out.push_str(&strip_tags(html)),
        }
        for &child in &el.children {
            self.collect_text(child, out);
        }
    }

    fn walk(&self, from: usize, selector: &Selector<'_>, include_self: bool, out: &mut Vec<usize>) {
        let Some(el) = self.nodes.get(from) else {
            return;
        };
        if include_self && el.matches(selector) {
            out.push(from);
        }
        for &child in &el.children {
            self.walk(child, selector, true, out);
        }
    }

    fn find(&self, from: usize, selector: &str, include_self: bool) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.walk(from, &selector, include_self, &mut out);
        out.into_iter().map(NodeId).collect()
    }

    fn replace_content(&mut self, node: NodeId, content: Content) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.children.clear();
            el.content = content;
        }
    }

    fn write_element(&self, idx: usize, depth: usize, out: &mut String) {
        let Some(el) = self.nodes.get(idx) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", el.tag);
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&el.classes.join(" ")));
        }
        for (name, value) in &el.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        if !el.styles.is_empty() {
            let style = el
                .styles
                .iter()
                .map(|(p, v)| format!("{p}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape_attr(&style));
        }
        out.push('>');

        match &el.content {
            Content::Text(text) => out.push_str(&escape_text(text)),
            Content::Html(html) => out.push_str(html),
        }

        if el.children.is_empty() {
            let _ = writeln!(out, "</{}>", el.tag);
        } else {
            out.push('\n');
            for &child in &el.children {
                self.write_element(child, depth + 1, out);
            }
            let _ = writeln!(out, "{indent}</{}>", el.tag);
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.find(0, selector, true).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.find(0, selector, true)
    }

    fn query_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        self.find(scope.0, selector, false).into_iter().next()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.replace_content(node, Content::Text(text.to_string()));
    }

    fn set_html(&mut self, node: NodeId, html: &str) {
        self.replace_content(node, Content::Html(html.to_string()));
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(el) = self.nodes.get_mut(node.0) else {
            return;
        };
        match el.styles.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_string(),
            None => el.styles.push((property.to_string(), value.to_string())),
        }
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.styles.retain(|(p, _)| p != property);
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.nodes.get_mut(node.0) else {
            return;
        };
        match el.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
