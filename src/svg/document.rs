//! SVG document parsing and serialization.

use super::element::{Attribute, Element, Node};
use super::namespace::{split_qname, NamespaceScope};
use crate::error::SvgError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// An owned, mutable SVG document.
///
/// Nodes before and after the root element (declaration, comments,
/// doctype) are kept so the document serializes back close to its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl SvgDocument {
    /// Parses an SVG document from text.
    ///
    /// # Errors
    ///
    /// - Malformed XML (mismatched tags, bad attributes)
    /// - No root element, or more than one
    pub fn parse(text: &str) -> Result<Self, SvgError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = Reader::from_str(text);

        let mut scope = NamespaceScope::new();
        let mut open: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let node = match reader.read_event()? {
                Event::Start(start) => {
                    open.push(open_element(&start, &mut scope)?);
                    continue;
                }
                Event::Empty(start) => {
                    let mut element = open_element(&start, &mut scope)?;
                    scope.pop();
                    element.set_self_closing(true);
                    Node::Element(element)
                }
                Event::End(end) => {
                    let element = open.pop().ok_or_else(|| {
                        SvgError::UnbalancedEnd(String::from_utf8_lossy(end.name().as_ref()).into_owned())
                    })?;
                    scope.pop();
                    Node::Element(element)
                }
                Event::Text(text) => Node::Text(String::from_utf8_lossy(&text).into_owned()),
                Event::CData(data) => Node::CData(String::from_utf8_lossy(&data).into_owned()),
                Event::Comment(comment) => Node::Comment(String::from_utf8_lossy(&comment).into_owned()),
                Event::Decl(decl) => Node::Instruction(String::from_utf8_lossy(&decl).into_owned()),
                Event::PI(pi) => Node::Instruction(String::from_utf8_lossy(&pi).into_owned()),
                Event::DocType(doctype) => {
                    Node::DocType(String::from_utf8_lossy(&doctype).trim().to_string())
                }
                Event::Eof => break,
            };

            match (open.last_mut(), node) {
                (Some(parent), node) => parent.children_mut().push(node),
                (None, Node::Element(element)) => {
                    if root.is_some() {
                        return Err(SvgError::MultipleRoots);
                    }
                    root = Some(element);
                }
                (None, node) if root.is_none() => prolog.push(node),
                (None, node) => epilog.push(node),
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(SvgError::Unclosed(unclosed.name().to_string()));
        }
        let root = root.ok_or(SvgError::MissingRoot)?;

        debug!(
            "Parsed SVG document: root=<{}>, children={}",
            root.name(),
            root.children().len()
        );

        Ok(Self {
            prolog,
            root,
            epilog,
        })
    }

    /// Reads and parses an SVG file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SvgError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serializes the document as UTF-8 XML.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for node in &self.prolog {
            node.write_to(out)?;
        }
        self.root.write_to(out)?;
        for node in &self.epilog {
            node.write_to(out)?;
        }
        Ok(())
    }

    pub fn to_xml_string(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Builds an element from a start tag, pushing its namespace frame onto `scope`.
fn open_element(start: &BytesStart<'_>, scope: &mut NamespaceScope) -> Result<Element, SvgError> {
    let mut raw_attributes = Vec::new();
    let mut declarations = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();

        if name == "xmlns" {
            declarations.push((None, value.clone()));
        } else if let Some(prefix) = name.strip_prefix("xmlns:") {
            declarations.push((Some(prefix.to_string()), value.clone()));
        }
        raw_attributes.push((name, value));
    }
    scope.push(declarations);

    let attributes = raw_attributes
        .into_iter()
        .map(|(name, value)| {
            let (prefix, local) = split_qname(&name);
            let namespace = match prefix {
                Some("xmlns") => None,
                Some(prefix) => scope.resolve(Some(prefix)).map(str::to_string),
                None => None,
            };
            Attribute {
                local_name: local.to_string(),
                name: name.clone(),
                namespace,
                value,
            }
        })
        .collect();

    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let namespace = scope
        .resolve(split_qname(&name).0)
        .map(str::to_string);

    Ok(Element::from_parts(name, namespace, attributes))
}
