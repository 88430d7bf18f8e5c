//! Export options and output directory validation.

use crate::error::{ExportError, Result};
use crate::layers::DEFAULT_PLACEHOLDER;
use std::path::{is_separator, PathBuf};

/// Options controlling one export run.
///
/// All three labels default to the empty string, matching the Inkscape
/// dialog defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Label of the layer shown behind every ordinary slide.
    pub background_layer: String,
    /// Label of the layer exported last as slide `0`.
    pub title_layer: String,
    /// Directory receiving `<n>.pdf` files.
    pub output_directory: String,
    /// Text that marks a slide-number run.
    pub placeholder: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            background_layer: String::new(),
            title_layer: String::new(),
            output_directory: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl ExportOptions {
    pub fn new(
        background_layer: impl Into<String>,
        title_layer: impl Into<String>,
        output_directory: impl Into<String>,
    ) -> Self {
        Self {
            background_layer: background_layer.into(),
            title_layer: title_layer.into(),
            output_directory: output_directory.into(),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Checks the output directory has a non-empty parent component.
    ///
    /// This only rejects bare names like `slides` and the empty string; it
    /// does not check that the directory exists.
    pub fn validate(&self) -> Result<PathBuf> {
        validate_output_directory(&self.output_directory)
    }

    /// Path of the PDF for `slide_number`.
    pub fn output_path(&self, slide_number: u32) -> PathBuf {
        PathBuf::from(&self.output_directory).join(format!("{}.pdf", slide_number))
    }
}

/// Accepts a directory path only if it contains a separator, so that its
/// parent component is non-empty.
pub fn validate_output_directory(directory: &str) -> Result<PathBuf> {
    if directory.chars().any(is_separator) {
        Ok(PathBuf::from(directory))
    } else {
        Err(ExportError::InvalidOutputDirectory(directory.to_string()))
    }
}
