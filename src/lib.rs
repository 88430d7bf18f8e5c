//! Slide Export Library
//!
//! Exports the top-level layers of an Inkscape presentation as individually
//! numbered PDF slides. The `slide-export` binary is the Inkscape extension
//! entry point; this library holds everything it drives.
//!
//! ## Module Overview
//!
//! - `svg`: owned, mutable SVG document model
//! - `layers`: layer enumeration, classification, visibility and slide numbers
//! - `exporter`: per-slide export sequence and the run driver
//! - `converter`: Inkscape and svg2pdf backends for SVG to PDF conversion
//! - `report`: per-slide job records and the run report
//! - `config`: export options and output directory validation
//! - `telemetry`: tracing setup and structured slide logs
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use slide_export::{
//!     config::ExportOptions,
//!     converter::InkscapeConverter,
//!     exporter::SlideExporter,
//!     svg::SvgDocument,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut document = SvgDocument::from_file("deck.svg")?;
//!     let options = ExportOptions::new("Background", "Title", "/tmp/deck");
//!     let converter = InkscapeConverter::default();
//!
//!     let report = SlideExporter::new(&options, &converter).run(&mut document)?;
//!     assert_eq!(report.failed_count(), 0);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod exporter;
pub mod layers;
pub mod report;
pub mod svg;
pub mod telemetry;

pub use error::{ConvertError, ExportError, SvgError};
