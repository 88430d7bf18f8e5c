//! Top-level layer operations: enumeration, classification, visibility and
//! slide-number stamping.

use crate::svg::{Element, SvgDocument, INKSCAPE_NS, SVG_NS};
use tracing::debug;

/// Style value that hides a layer.
pub const DISPLAY_NONE: &str = "display:none";

/// Attribute tagging a text run that currently holds a stamped slide number.
pub const SLIDE_NUMBER_MARKER: &str = "slidenumber";

/// Text a slide-number run holds outside of an export.
pub const DEFAULT_PLACEHOLDER: &str = "$sn";

/// Position of a layer among the root element's child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

impl LayerId {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn element(self, document: &SvgDocument) -> Option<&Element> {
        document.root().child_element(self.0)
    }

    pub fn element_mut(self, document: &mut SvgDocument) -> Option<&mut Element> {
        document.root_mut().child_element_mut(self.0)
    }

    /// The layer's `inkscape:label`, if any.
    pub fn label(self, document: &SvgDocument) -> Option<&str> {
        self.element(document)?.attribute_ns(INKSCAPE_NS, "label")
    }

    pub fn is_hidden(self, document: &SvgDocument) -> bool {
        self.element(document)
            .and_then(|e| e.attribute("style"))
            .is_some_and(|style| style == DISPLAY_NONE)
    }

    /// Overwrites the layer's style with `display:none`.
    pub fn hide(self, document: &mut SvgDocument) {
        if let Some(element) = self.element_mut(document) {
            element.set_attribute("style", DISPLAY_NONE);
        }
    }

    /// Removes the layer's style attribute entirely.
    pub fn unhide(self, document: &mut SvgDocument) {
        if let Some(element) = self.element_mut(document) {
            element.remove_attribute("style");
        }
    }

    /// Writes `slide_number` into every `tspan` of the layer whose text is the
    /// placeholder, tagging it for [`LayerId::reset_slide_numbers`]. Whitespace
    /// around the placeholder is kept.
    ///
    /// Returns the number of runs stamped.
    pub fn stamp_slide_number(self, document: &mut SvgDocument, slide_number: u32, placeholder: &str) -> usize {
        let Some(element) = self.element_mut(document) else {
            return 0;
        };

        let number = slide_number.to_string();
        let mut stamped = 0;
        element.visit_named_mut(SVG_NS, "tspan", &mut |tspan| {
            let stamped_text = tspan
                .text()
                .filter(|text| text.trim() == placeholder)
                .map(|text| replace_trimmed(&text, &number));
            if let Some(text) = stamped_text {
                tspan.set_text(&text);
                tspan.set_attribute(SLIDE_NUMBER_MARKER, &number);
                stamped += 1;
            }
        });
        stamped
    }

    /// Restores every marked `tspan` of the layer to the placeholder, keeping
    /// its surrounding whitespace, and drops the marker. Returns the number of
    /// runs reset.
    pub fn reset_slide_numbers(self, document: &mut SvgDocument, placeholder: &str) -> usize {
        let Some(element) = self.element_mut(document) else {
            return 0;
        };

        let mut reset = 0;
        element.visit_named_mut(SVG_NS, "tspan", &mut |tspan| {
            if tspan.remove_attribute(SLIDE_NUMBER_MARKER).is_some() {
                let restored = replace_trimmed(&tspan.text().unwrap_or_default(), placeholder);
                tspan.set_text(&restored);
                reset += 1;
            }
        });
        reset
    }
}

/// Replaces `text` with `with`, keeping leading and trailing whitespace.
fn replace_trimmed(text: &str, with: &str) -> String {
    let start = text.len() - text.trim_start().len();
    let end = start + text[start..].trim_end().len();
    format!("{}{}{}", &text[..start], with, &text[end..])
}

/// The top-level layers of a document, in document order.
///
/// Computed once per run; layer ids stay valid as long as the root's child
/// list is not restructured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSet {
    layers: Vec<LayerId>,
}

impl LayerSet {
    /// Collects the direct `svg:g` children of the root element.
    pub fn enumerate(document: &SvgDocument) -> Self {
        let layers: Vec<LayerId> = document
            .root()
            .child_elements()
            .filter(|(_, element)| element.is(SVG_NS, "g"))
            .map(|(index, _)| LayerId(index))
            .collect();

        debug!("Enumerated {} top-level layers", layers.len());
        Self { layers }
    }

    pub fn ids(&self) -> &[LayerId] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers whose label differs from both the background and title labels.
    pub fn slide_layers(&self, document: &SvgDocument, background: &str, title: &str) -> Vec<LayerId> {
        self.layers
            .iter()
            .copied()
            .filter(|layer| {
                let label = layer.label(document);
                label != Some(background) && label != Some(title)
            })
            .collect()
    }

    /// First layer whose label equals `name`.
    pub fn find_by_label(&self, document: &SvgDocument, name: &str) -> Option<LayerId> {
        self.layers
            .iter()
            .copied()
            .find(|layer| layer.label(document) == Some(name))
    }

    pub fn hide_all(&self, document: &mut SvgDocument) {
        for layer in &self.layers {
            layer.hide(document);
        }
    }
}
