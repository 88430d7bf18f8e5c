//! Namespace URIs and prefix scoping for the SVG document model.

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Inkscape namespace URI (`inkscape:label`, `inkscape:groupmode`).
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Splits a qualified name into `(prefix, local_name)`.
pub fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// Stack of in-scope namespace declarations.
///
/// Each element pushes one frame holding the declarations found on its
/// start tag; the frame is popped when the element closes.
#[derive(Debug, Default)]
pub struct NamespaceScope {
    frames: Vec<Vec<(Option<String>, String)>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a frame with the given `(prefix, uri)` declarations.
    /// A `None` prefix declares the default namespace.
    pub fn push(&mut self, declarations: Vec<(Option<String>, String)>) {
        self.frames.push(declarations);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Resolves a prefix to its namespace URI, innermost declaration first.
    pub fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some("xml") {
            return Some(XML_NS);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
            // xmlns="" undeclares the default namespace
            .filter(|uri| !uri.is_empty())
    }
}
