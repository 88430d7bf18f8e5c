//! Mutable element tree for SVG documents.

use quick_xml::escape::{escape, unescape};
use std::borrow::Cow;
use std::io::{self, Write};

/// A single attribute with its resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name as written, e.g. `inkscape:label`.
    pub name: String,
    /// Namespace URI; `None` for unprefixed attributes.
    pub namespace: Option<String>,
    pub local_name: String,
    /// Unescaped value.
    pub value: String,
}

impl Attribute {
    /// Creates an unprefixed attribute.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            local_name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// A child node of an element, or a prolog/epilog node of a document.
///
/// Text-like variants hold content exactly as it appeared in the source,
/// still escaped, so unknown entities survive serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    /// Processing instruction or XML declaration body, without `<?` `?>`.
    Instruction(String),
    DocType(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Node::Element(element) => element.write_to(out),
            Node::Text(raw) => out.write_all(raw.as_bytes()),
            Node::CData(raw) => write!(out, "<![CDATA[{}]]>", raw),
            Node::Comment(raw) => write!(out, "<!--{}-->", raw),
            Node::Instruction(raw) => write!(out, "<?{}?>", raw),
            Node::DocType(raw) => write!(out, "<!DOCTYPE {}>", raw),
        }
    }
}

/// An XML element with namespace-resolved name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    pub(crate) fn from_parts(
        name: String,
        namespace: Option<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        let local_name = super::namespace::split_qname(&name).1.to_string();
        Self {
            name,
            namespace,
            local_name,
            attributes,
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Qualified name as written in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Namespace-aware name check.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == Some(namespace)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up an unprefixed attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Looks up an attribute by namespace URI and local name.
    pub fn attribute_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name && a.namespace.as_deref() == Some(namespace))
            .map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Sets an unprefixed attribute, replacing any existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.is_none() && a.name == name)
        {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Removes an unprefixed attribute, returning its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|a| a.namespace.is_none() && a.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Returns the child at `index` if it is an element.
    pub fn child_element(&self, index: usize) -> Option<&Element> {
        self.children.get(index).and_then(Node::as_element)
    }

    pub fn child_element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index).and_then(Node::as_element_mut)
    }

    /// Iterates `(index, element)` over direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.as_element().map(|e| (i, e)))
    }

    /// Text before the first non-text child, unescaped.
    ///
    /// Returns `None` when the element starts with a child node or is empty.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        let leading: Vec<&str> = self
            .children
            .iter()
            .map_while(|node| match node {
                Node::Text(raw) => Some(raw.as_str()),
                _ => None,
            })
            .collect();

        match leading.as_slice() {
            [] => None,
            [raw] => Some(unescape(*raw).unwrap_or(Cow::Borrowed(*raw))),
            parts => {
                let raw = parts.concat();
                let text = unescape(&raw).map(Cow::into_owned).unwrap_or_else(|_| raw.clone());
                Some(Cow::Owned(text))
            }
        }
    }

    /// Replaces the leading text, keeping child elements and what follows them.
    pub fn set_text(&mut self, text: &str) {
        let leading = self
            .children
            .iter()
            .take_while(|node| matches!(node, Node::Text(_)))
            .count();
        self.children.drain(..leading);
        if !text.is_empty() {
            self.children.insert(0, Node::Text(escape(text).into_owned()));
        }
    }

    /// Visits this element and every descendant with the given name,
    /// depth first in document order.
    pub fn visit_named_mut<F>(&mut self, namespace: &str, local_name: &str, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        if self.is(namespace, local_name) {
            visit(self);
        }
        for child in self.children.iter_mut() {
            if let Node::Element(element) = child {
                element.visit_named_mut(namespace, local_name, visit);
            }
        }
    }

    /// Collects references to this element and descendants with the given name.
    pub fn find_all<'a>(&'a self, namespace: &str, local_name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(namespace, local_name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, namespace: &str, local_name: &str, found: &mut Vec<&'a Element>) {
        if self.is(namespace, local_name) {
            found.push(self);
        }
        for (_, element) in self.child_elements() {
            element.collect_named(namespace, local_name, found);
        }
    }

    pub(crate) fn set_self_closing(&mut self, self_closing: bool) {
        self.self_closing = self_closing;
    }

    pub(crate) fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "<{}", self.name)?;
        for attr in &self.attributes {
            write!(out, " {}=\"{}\"", attr.name, escape(&attr.value))?;
        }

        if self.children.is_empty() && self.self_closing {
            return out.write_all(b"/>");
        }

        out.write_all(b">")?;
        for child in &self.children {
            child.write_to(out)?;
        }
        write!(out, "</{}>", self.name)
    }
}
