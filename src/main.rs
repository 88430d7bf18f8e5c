//! Slide Export Inkscape Extension
//!
//! Inkscape runs this binary with the current document saved to a temporary
//! SVG file and the dialog parameters as `--Name=value` flags.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `SLIDE_EXPORT_CONVERTER`: `inkscape` (default) or `svg2pdf`
//! - `SLIDE_EXPORT_INKSCAPE`: Inkscape binary (default: inkscape)
//! - `RUST_LOG`: Log level (default: warn)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use slide_export::config::ExportOptions;
use slide_export::converter::{InkscapeCli, InkscapeConverter, SlideConverter, Svg2PdfConverter};
use slide_export::exporter::SlideExporter;
use slide_export::layers::DEFAULT_PLACEHOLDER;
use slide_export::svg::SvgDocument;
use slide_export::{telemetry, ExportError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ConverterKind {
    /// Run the Inkscape binary per slide
    Inkscape,
    /// Convert in-process with svg2pdf
    Svg2pdf,
}

#[derive(Parser, Debug)]
#[command(name = "slide-export")]
#[command(about = "Export presentation layers as numbered PDF slides", long_about = None)]
struct Cli {
    /// Name of background layer
    #[arg(short = 'b', long = "Background", default_value = "")]
    background_layer: String,

    /// Name of title slide layer
    #[arg(short = 't', long = "TitleSlide", default_value = "")]
    title_layer: String,

    /// Full path to directory where individual pdf slides will be saved
    #[arg(short = 'o', long = "OutputDirectory", default_value = "")]
    output_directory: String,

    /// Text marking slide-number runs
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    /// SVG to PDF backend
    #[arg(long, value_enum, env = "SLIDE_EXPORT_CONVERTER", default_value = "inkscape")]
    converter: ConverterKind,

    /// Inkscape binary used by the inkscape backend
    #[arg(long, env = "SLIDE_EXPORT_INKSCAPE", default_value = "inkscape")]
    inkscape: PathBuf,

    /// Use the Inkscape 0.92 command line (--export-pdf)
    #[arg(long)]
    legacy_inkscape: bool,

    /// Write a JSON report of the run
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the final document to stdout
    #[arg(long)]
    emit_document: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Selected object ids passed by Inkscape; unused
    #[arg(long = "id", hide = true)]
    _selected_ids: Vec<String>,

    /// Node-tool selection passed by Inkscape; unused
    #[arg(long = "selected-nodes", hide = true)]
    _selected_nodes: Vec<String>,

    /// SVG document to export
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init_tracing(cli.log_json) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            // Configuration errors are shown to the user as-is.
            if let Some(ExportError::InvalidOutputDirectory(_)) = e.downcast_ref::<ExportError>() {
                eprintln!("{}", e);
            } else {
                error!("{:#}", e);
                eprintln!("slide-export: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    info!(
        "Configuration: input={}, background={:?}, title={:?}, output={:?}, converter={:?}",
        cli.input.display(),
        cli.background_layer,
        cli.title_layer,
        cli.output_directory,
        cli.converter
    );

    let options = ExportOptions::new(cli.background_layer, cli.title_layer, cli.output_directory)
        .with_placeholder(cli.placeholder);
    // Fail before reading the document, as Inkscape users fix this first.
    options.validate()?;

    let mut document = SvgDocument::from_file(&cli.input)
        .map_err(ExportError::from)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let converter: Box<dyn SlideConverter> = match cli.converter {
        ConverterKind::Inkscape => {
            let dialect = if cli.legacy_inkscape {
                InkscapeCli::Legacy
            } else {
                InkscapeCli::Modern
            };
            Box::new(InkscapeConverter::new(cli.inkscape, dialect))
        }
        ConverterKind::Svg2pdf => {
            let resources_dir = cli.input.parent().map(PathBuf::from);
            Box::new(Svg2PdfConverter::new(resources_dir))
        }
    };

    let report = SlideExporter::new(&options, converter.as_ref()).run(&mut document)?;

    if let Some(path) = &cli.report {
        report.write_json(path)?;
    }

    if cli.emit_document {
        let mut stdout = io::stdout().lock();
        document
            .write_to(&mut stdout)
            .and_then(|()| stdout.flush())
            .context("Failed to write document to stdout")?;
    }

    if report.failed_count() > 0 {
        for job in report.failed() {
            warn!(
                "Slide {} ({}) failed: {}",
                job.slide_number,
                job.display_label(),
                job.error.as_deref().unwrap_or("unknown error")
            );
        }
        eprintln!(
            "slide-export: {} of {} slides failed to export",
            report.failed_count(),
            report.slides.len()
        );
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_inkscape_invocation() {
        let cli = Cli::try_parse_from([
            "slide-export",
            "--Background=Background",
            "--TitleSlide=Title",
            "--OutputDirectory=/tmp/deck",
            "in.svg",
        ])
        .unwrap();

        assert_eq!(cli.background_layer, "Background");
        assert_eq!(cli.title_layer, "Title");
        assert_eq!(cli.output_directory, "/tmp/deck");
        assert_eq!(cli.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(cli.input, PathBuf::from("in.svg"));
    }

    #[test]
    fn test_selection_arguments_are_accepted() {
        let cli = Cli::try_parse_from([
            "slide-export",
            "--id=rect1",
            "--id=text2",
            "--selected-nodes=path1:0:1",
            "--OutputDirectory=/tmp/deck",
            "in.svg",
        ])
        .unwrap();

        assert_eq!(cli._selected_ids, vec!["rect1", "text2"]);
        assert_eq!(cli._selected_nodes, vec!["path1:0:1"]);
        assert_eq!(cli.output_directory, "/tmp/deck");
    }

    #[test]
    fn test_missing_parameters_default_to_empty() {
        let cli = Cli::try_parse_from(["slide-export", "in.svg"]).unwrap();

        assert_eq!(cli.background_layer, "");
        assert_eq!(cli.title_layer, "");
        assert_eq!(cli.output_directory, "");
    }
}
