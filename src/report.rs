//! Per-slide job records and the run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One slide export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideJob {
    /// Layer label; `None` for unlabeled layers.
    pub label: Option<String>,
    pub slide_number: u32,
    pub output_path: PathBuf,
    pub background_shown: bool,
    /// Number of text runs that received the slide number.
    pub stamped_runs: usize,
    pub status: SlideStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideStatus {
    Pending,
    Exported,
    Failed,
}

impl fmt::Display for SlideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideStatus::Pending => write!(f, "pending"),
            SlideStatus::Exported => write!(f, "exported"),
            SlideStatus::Failed => write!(f, "failed"),
        }
    }
}

impl SlideJob {
    pub fn new(label: Option<String>, slide_number: u32, output_path: PathBuf, background_shown: bool) -> Self {
        Self {
            label,
            slide_number,
            output_path,
            background_shown,
            stamped_runs: 0,
            status: SlideStatus::Pending,
            started_at: Utc::now(),
            finished_at: None,
            error: None,
        }
    }

    pub fn mark_exported(&mut self) {
        self.status = SlideStatus::Exported;
        self.finished_at = Some(Utc::now());
        self.error = None;
    }

    pub fn mark_failed(&mut self, error: String) {
        self.status = SlideStatus::Failed;
        self.finished_at = Some(Utc::now());
        self.error = Some(error);
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| finished.signed_duration_since(self.started_at).num_milliseconds())
    }

    /// Label for log lines; unlabeled layers show as `<unlabeled>`.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("<unlabeled>")
    }
}

/// Outcome of a whole export run, in export order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub slides: Vec<SlideJob>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ExportReport {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn push(&mut self, job: SlideJob) {
        self.slides.push(job);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn exported_count(&self) -> usize {
        self.count(SlideStatus::Exported)
    }

    pub fn failed_count(&self) -> usize {
        self.count(SlideStatus::Failed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &SlideJob> {
        self.slides.iter().filter(|job| job.status == SlideStatus::Failed)
    }

    fn count(&self, status: SlideStatus) -> usize {
        self.slides.iter().filter(|job| job.status == status).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        use anyhow::Context;

        let json = self.to_json().context("Failed to serialize export report")?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write report to {}", path.as_ref().display()))?;
        Ok(())
    }
}

impl Default for ExportReport {
    fn default() -> Self {
        Self::new()
    }
}
