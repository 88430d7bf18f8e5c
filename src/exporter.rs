//! Slide exporter: turns the layers of a presentation into numbered PDFs.

use crate::config::ExportOptions;
use crate::converter::SlideConverter;
use crate::error::{ExportError, Result};
use crate::layers::{LayerId, LayerSet};
use crate::report::{ExportReport, SlideJob};
use crate::svg::SvgDocument;
use crate::telemetry;
use std::io::Write;
use tracing::{debug, info, warn};

/// Slide number of the title slide; ordinary slides count from `1`.
pub const TITLE_SLIDE_NUMBER: u32 = 0;

/// Exports presentation layers one slide at a time.
///
/// Each slide is fully processed (visibility, stamping, conversion, reset)
/// before the next one starts.
pub struct SlideExporter<'a> {
    options: &'a ExportOptions,
    converter: &'a dyn SlideConverter,
}

impl<'a> SlideExporter<'a> {
    pub fn new(options: &'a ExportOptions, converter: &'a dyn SlideConverter) -> Self {
        Self { options, converter }
    }

    /// Exports every ordinary slide in document order with the background
    /// shown, then the title layer (if one matches) without it.
    ///
    /// # Errors
    ///
    /// Only an invalid output directory is fatal. Per-slide failures are
    /// recorded in the returned report and the run continues.
    pub fn run(&self, document: &mut SvgDocument) -> Result<ExportReport> {
        let output_directory = self.options.validate()?;
        if !output_directory.is_dir() {
            warn!(
                "Output directory {} does not exist; slides will fail to export",
                output_directory.display()
            );
        }

        let layers = LayerSet::enumerate(document);
        let slides = layers.slide_layers(
            document,
            &self.options.background_layer,
            &self.options.title_layer,
        );
        info!(
            "Exporting {} slide layers of {} top-level layers",
            slides.len(),
            layers.len()
        );

        let mut report = ExportReport::new();
        for (slide_number, slide) in (1_u32..).zip(slides) {
            report.push(self.export_layer(document, &layers, slide, slide_number, true));
        }

        match layers.find_by_label(document, &self.options.title_layer) {
            Some(title) => {
                let job = self.export_layer(document, &layers, title, TITLE_SLIDE_NUMBER, false);
                report.push(job);
            }
            None => debug!("No title layer labeled {:?}", self.options.title_layer),
        }

        report.finish();
        telemetry::record_run_summary(&report);
        Ok(report)
    }

    /// Exports one layer as `<slide_number>.pdf`.
    ///
    /// Stamped slide numbers are reset afterwards whatever the conversion
    /// outcome; the document keeps only the visibility changes.
    pub fn export_layer(
        &self,
        document: &mut SvgDocument,
        layers: &LayerSet,
        layer: LayerId,
        slide_number: u32,
        show_background: bool,
    ) -> SlideJob {
        let background = layers.find_by_label(document, &self.options.background_layer);

        layers.hide_all(document);
        if show_background {
            if let Some(background) = background {
                background.unhide(document);
            }
        }
        layer.unhide(document);

        let mut job = SlideJob::new(
            layer.label(document).map(str::to_string),
            slide_number,
            self.options.output_path(slide_number),
            show_background && background.is_some(),
        );

        let placeholder = self.options.placeholder.as_str();
        job.stamped_runs = layer.stamp_slide_number(document, slide_number, placeholder);
        if let Some(background) = background {
            job.stamped_runs += background.stamp_slide_number(document, slide_number, placeholder);
        }

        let result = self.save_as_pdf(document, &job);

        layer.reset_slide_numbers(document, placeholder);
        if let Some(background) = background {
            background.reset_slide_numbers(document, placeholder);
        }

        match result {
            Ok(()) => job.mark_exported(),
            Err(e) => job.mark_failed(e.to_string()),
        }
        telemetry::record_slide_telemetry(&job);
        job
    }

    /// Serializes the document to a scratch file and converts it.
    ///
    /// The scratch file is removed before returning, whether or not the
    /// conversion succeeded.
    fn save_as_pdf(&self, document: &SvgDocument, job: &SlideJob) -> Result<()> {
        let mut scratch = tempfile::Builder::new()
            .prefix("slide-export-")
            .suffix(".svg")
            .tempfile()
            .map_err(ExportError::Scratch)?;

        document
            .write_to(&mut scratch)
            .and_then(|()| scratch.flush())
            .map_err(ExportError::Scratch)?;

        // Close our handle so the converter can open the file on any platform.
        let scratch = scratch.into_temp_path();
        debug!(
            "Wrote scratch document {} for slide {}",
            scratch.display(),
            job.slide_number
        );

        let result = self.converter.convert(&scratch, &job.output_path);

        if let Err(e) = scratch.close() {
            warn!("Failed to remove scratch document: {}", e);
        }

        result.map_err(ExportError::from)
    }
}
