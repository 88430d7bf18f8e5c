//! Owned SVG document model.
//!
//! Parses SVG text into a mutable element tree with namespace-resolved
//! names, and writes it back out. Only what layer export needs is modeled:
//! elements, attributes, and opaque text-like nodes kept verbatim.

pub mod document;
pub mod element;
pub mod namespace;

pub use document::SvgDocument;
pub use element::{Attribute, Element, Node};
pub use namespace::{INKSCAPE_NS, SVG_NS};
