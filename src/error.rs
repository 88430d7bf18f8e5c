//! Error types for slide export.

use std::io;
use std::path::PathBuf;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors raised while exporting a presentation.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Output directory is empty or has no parent component.
    #[error("Please provide a valid output directory. (got {0:?})")]
    InvalidOutputDirectory(String),

    /// The input document could not be read or parsed.
    #[error("Failed to load document: {0}")]
    Document(#[from] SvgError),

    /// Scratch file creation or serialization failed.
    #[error("Failed to write scratch document: {0}")]
    Scratch(#[source] io::Error),

    /// The converter did not produce the slide.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Errors raised while parsing or writing an SVG document.
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Document has more than one root element")]
    MultipleRoots,

    #[error("Unexpected end tag </{0}>")]
    UnbalancedEnd(String),

    #[error("Unclosed element <{0}>")]
    Unclosed(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by a [`crate::converter::SlideConverter`].
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The converter process could not be started.
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The converter process exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },

    /// The converter reported success but wrote nothing.
    #[error("Converter produced no output at {}", .0.display())]
    OutputMissing(PathBuf),

    /// In-process rendering failed.
    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
