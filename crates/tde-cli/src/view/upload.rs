//! Uploading a metadata-summary file to an existing dataset

use crate::api::{MetadataUpload, RegistryBackend};
use crate::error::{CliError, Result};
use crate::view::single_flight::FlightGuard;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tde_common::types::{FileGroupSummary, UploadSummary};
use tracing::{info, warn};

/// Message used when the backend gave no reason
pub const UPLOAD_FAILED: &str = "Upload failed";

/// Where the upload dialog stands
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadOutcome {
    #[default]
    Idle,
    Success { summary: UploadSummary },
    Error { message: String },
}

impl UploadOutcome {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Idle => "How to update Data Registry",
            Self::Success { .. } => "Upload successful",
            Self::Error { .. } => "Upload error",
        }
    }

    /// Message for a failed upload: the backend's detail, or a generic one
    fn from_error(error: &CliError) -> Self {
        Self::Error {
            message: error.server_detail().unwrap_or(UPLOAD_FAILED).to_string(),
        }
    }
}

fn group_line(group: &FileGroupSummary, kind: &str, patterns: &str, unit: &str) -> String {
    format!(
        "{} new {kind} files ({patterns}) were registered with {}{unit}",
        group.count, group.total_size
    )
}

/// One line per file category of an upload summary
pub fn summary_lines(summary: &UploadSummary) -> Vec<String> {
    let unit = summary.file_size_unit.as_str();
    vec![
        group_line(&summary.raw_files, "raw", "*.fastq, *.fasta", unit),
        group_line(&summary.processed_files, "processed", "*.cram, *.bam", unit),
        group_line(&summary.summarised_files, "summarised", "*.vcf, *.maf", unit),
    ]
}

/// Runs metadata uploads one at a time and remembers the last result
#[derive(Debug, Default)]
pub struct UploadController {
    outcome: Mutex<UploadOutcome>,
    in_flight: AtomicBool,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UploadOutcome> {
        self.outcome.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn outcome(&self) -> UploadOutcome {
        self.lock().clone()
    }

    pub fn title(&self) -> &'static str {
        self.lock().title()
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Back to `Idle` (dialog closed)
    pub fn reset(&self) {
        *self.lock() = UploadOutcome::Idle;
    }

    /// Send `upload` and record the outcome
    ///
    /// Backend failures become [`UploadOutcome::Error`]; only a second
    /// upload started while one is running is returned as `Err`, and it
    /// leaves the recorded outcome alone.
    pub async fn upload(
        &self,
        backend: &dyn RegistryBackend,
        upload: MetadataUpload,
    ) -> Result<UploadOutcome> {
        let _flight = FlightGuard::acquire(&self.in_flight, "metadata upload")?;
        let dataset_id = upload.dataset_id;

        let outcome = match backend.upload_file_metadata(upload).await {
            Ok(summary) => {
                info!(dataset_id, raw = summary.raw_files.count, "Metadata summary uploaded");
                UploadOutcome::Success { summary }
            },
            Err(e) => {
                warn!(error = %e, dataset_id, "Metadata upload failed");
                UploadOutcome::from_error(&e)
            },
        };

        *self.lock() = outcome.clone();
        Ok(outcome)
    }
}
