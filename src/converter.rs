//! SVG to PDF converters for exported slides.
//!
//! The default converter shells out to the Inkscape binary, the same program
//! hosting the extension. `Svg2PdfConverter` renders in-process with
//! svg2pdf for hosts where launching Inkscape is not possible.

use crate::error::ConvertError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Turns a serialized SVG file into a PDF file.
#[cfg_attr(test, mockall::automock)]
pub trait SlideConverter {
    /// Converts the SVG at `svg_path` and writes the PDF to `pdf_path`.
    fn convert(&self, svg_path: &Path, pdf_path: &Path) -> Result<(), ConvertError>;
}

/// Command line dialect of the Inkscape binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InkscapeCli {
    /// Inkscape 1.x: `--export-type=pdf --export-filename=OUT IN`
    #[default]
    Modern,
    /// Inkscape 0.92: `--export-pdf=OUT IN`
    Legacy,
}

/// Converter that runs the Inkscape binary once per slide.
#[derive(Debug, Clone)]
pub struct InkscapeConverter {
    program: PathBuf,
    cli: InkscapeCli,
}

impl InkscapeConverter {
    pub fn new(program: impl Into<PathBuf>, cli: InkscapeCli) -> Self {
        Self {
            program: program.into(),
            cli,
        }
    }

    /// Builds the argument list for one conversion.
    pub fn arguments(&self, svg_path: &Path, pdf_path: &Path) -> Vec<String> {
        let output = pdf_path.display();
        let mut args = match self.cli {
            InkscapeCli::Modern => vec![
                "--export-type=pdf".to_string(),
                format!("--export-filename={}", output),
            ],
            InkscapeCli::Legacy => vec![format!("--export-pdf={}", output)],
        };
        args.push(svg_path.display().to_string());
        args
    }
}

impl Default for InkscapeConverter {
    fn default() -> Self {
        Self::new("inkscape", InkscapeCli::default())
    }
}

impl SlideConverter for InkscapeConverter {
    fn convert(&self, svg_path: &Path, pdf_path: &Path) -> Result<(), ConvertError> {
        let program = self.program.display().to_string();
        let args = self.arguments(svg_path, pdf_path);
        info!("Running converter: {} {}", program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{} stdout: {}", program, stdout.trim());
        }

        if !output.status.success() {
            return Err(ConvertError::ExitStatus {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // Inkscape exits 0 on some export failures
        if !pdf_path.exists() {
            return Err(ConvertError::OutputMissing(pdf_path.to_path_buf()));
        }

        Ok(())
    }
}

/// In-process slide converter for machines without Inkscape.
///
/// Each slide page takes the document's width and height. Text is laid out
/// with the system fonts, so output can differ from Inkscape's where the
/// deck relies on fonts or features usvg does not resolve.
pub struct Svg2PdfConverter {
    resources_dir: Option<PathBuf>,
}

impl Svg2PdfConverter {
    /// Creates a converter whose relative references (linked images)
    /// resolve against `resources_dir`.
    pub fn new(resources_dir: Option<PathBuf>) -> Self {
        Self { resources_dir }
    }

    /// Renders one serialized slide and writes the PDF to `pdf_path`.
    ///
    /// Fails with [`ConvertError::Render`] when usvg rejects the document or
    /// the page would have no area, and with [`ConvertError::Io`] when the
    /// PDF cannot be written.
    pub fn convert_str(&self, svg_content: &str, pdf_path: &Path) -> Result<(), ConvertError> {
        debug!("Rendering slide with svg2pdf: output={}", pdf_path.display());

        let mut options = usvg::Options::default();
        options.resources_dir = self.resources_dir.clone();
        options.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(svg_content, &options)
            .map_err(|e| ConvertError::Render(format!("usvg rejected the slide: {}", e)))?;

        let size = tree.size();
        if size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(ConvertError::Render(format!(
                "Slide page has no area: {}x{}",
                size.width(),
                size.height()
            )));
        }

        debug!("Slide page size: {}x{}", size.width(), size.height());

        let pdf_data = svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        );

        fs::write(pdf_path, &pdf_data)?;

        info!("Wrote {} ({} bytes)", pdf_path.display(), pdf_data.len());
        Ok(())
    }
}

impl Default for Svg2PdfConverter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SlideConverter for Svg2PdfConverter {
    fn convert(&self, svg_path: &Path, pdf_path: &Path) -> Result<(), ConvertError> {
        let svg_content = fs::read_to_string(svg_path)?;
        self.convert_str(&svg_content, pdf_path)
    }
}
