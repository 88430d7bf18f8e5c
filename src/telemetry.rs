//! Structured logging for export runs.

use crate::report::{ExportReport, SlideJob, SlideStatus};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Slides slower than this are logged as a warning.
const SLOW_SLIDE_MS: i64 = 5000;

/// Initializes the tracing subscriber.
///
/// Logs go to stderr: Inkscape reads an effect's stdout as the resulting
/// document and shows stderr to the user. The filter comes from `RUST_LOG`
/// and defaults to `warn` so a clean run stays silent.
pub fn init_tracing(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

/// Records the outcome of a single slide export.
pub fn record_slide_telemetry(job: &SlideJob) {
    let duration_ms = job.duration_ms().unwrap_or_default();

    match job.status {
        SlideStatus::Exported => {
            info!(
                label = %job.display_label(),
                slide_number = job.slide_number,
                output = %job.output_path.display(),
                stamped_runs = job.stamped_runs,
                background_shown = job.background_shown,
                duration_ms = duration_ms,
                "Slide exported"
            );

            if duration_ms > SLOW_SLIDE_MS {
                warn!(
                    label = %job.display_label(),
                    duration_ms = duration_ms,
                    "Slide export exceeded performance threshold (5000ms)"
                );
            }
        }
        SlideStatus::Failed => {
            error!(
                label = %job.display_label(),
                slide_number = job.slide_number,
                output = %job.output_path.display(),
                error = job.error.as_deref().unwrap_or("unknown error"),
                "Slide export failed"
            );
        }
        SlideStatus::Pending => {
            warn!(
                label = %job.display_label(),
                slide_number = job.slide_number,
                "Slide export did not finish"
            );
        }
    }
}

/// Records the summary line for a finished run.
pub fn record_run_summary(report: &ExportReport) {
    let duration_ms = report
        .finished_at
        .map(|finished| finished.signed_duration_since(report.started_at).num_milliseconds())
        .unwrap_or_default();

    info!(
        slides = report.slides.len(),
        exported = report.exported_count(),
        failed = report.failed_count(),
        duration_ms = duration_ms,
        "Export run complete"
    );
}
