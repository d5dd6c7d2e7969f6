//! Per-file metadata: flattening, type filtering, and totals

use crate::api::RegistryBackend;
use crate::error::Result;
use crate::view::sequence::{RequestSequence, Ticket};
use serde::Serialize;
use tde_common::types::{FileMetadataEntry, NOT_AVAILABLE};
use tracing::{debug, warn};

/// Filter value that matches every file type
pub const ALL_TYPES: &str = "All";

/// File types the dashboard offers as filters
pub const FILE_TYPE_OPTIONS: [&str; 4] = [ALL_TYPES, "Raw", "Processed", "Summarised"];

/// A file's metadata as a fixed-shape row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatFile {
    pub id: i64,
    #[serde(rename = "file_type")]
    pub file_type: String,
    pub file_name: String,
    pub file_size: String,
    pub organisation: String,
    pub patient_id: String,
    pub sample_id: String,
}

impl FlatFile {
    fn empty(id: i64, file_type: &str) -> Self {
        Self {
            id,
            file_type: file_type.to_string(),
            file_name: NOT_AVAILABLE.to_string(),
            file_size: NOT_AVAILABLE.to_string(),
            organisation: NOT_AVAILABLE.to_string(),
            patient_id: NOT_AVAILABLE.to_string(),
            sample_id: NOT_AVAILABLE.to_string(),
        }
    }

    /// Target field for a backend metadata key
    fn slot(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "file_name" => Some(&mut self.file_name),
            "file_size" => Some(&mut self.file_size),
            "organization" => Some(&mut self.organisation),
            "patient_id" => Some(&mut self.patient_id),
            "sample_id" => Some(&mut self.sample_id),
            _ => None,
        }
    }

    /// `file_size` as a number; non-numeric values count as 0
    pub fn size_value(&self) -> f64 {
        parse_size(&self.file_size)
    }
}

/// One row per entry, in input order
///
/// Unknown keys are ignored; a repeated key keeps its last value.
pub fn flatten(entries: &[FileMetadataEntry]) -> Vec<FlatFile> {
    entries
        .iter()
        .map(|entry| {
            let mut file = FlatFile::empty(entry.id, &entry.file_type);
            for pair in &entry.metadata {
                if let Some(slot) = file.slot(&pair.metadata_key) {
                    slot.clone_from(&pair.metadata_value);
                }
            }
            file
        })
        .collect()
}

/// Files whose type matches `file_type` case-insensitively; `"All"` keeps everything
pub fn filter_by_type(files: &[FlatFile], file_type: &str) -> Vec<FlatFile> {
    if file_type == ALL_TYPES {
        return files.to_vec();
    }

    files
        .iter()
        .filter(|file| file.file_type.to_lowercase() == file_type.to_lowercase())
        .cloned()
        .collect()
}

/// Parse a reported size leniently
pub fn parse_size(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite())
        .unwrap_or(0.0)
}

/// Count and summed size of a set of files
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FileAggregate {
    pub count: usize,
    pub total_size: f64,
}

pub fn aggregate(files: &[FlatFile]) -> FileAggregate {
    FileAggregate {
        count: files.len(),
        total_size: files.iter().fold(0.0, |total, file| total + file.size_value()),
    }
}

/// Heading over the file table, e.g. `Raw Files View (3 – 1200.5)`
pub fn summary_line(file_type: &str, aggregate: &FileAggregate) -> String {
    format!(
        "{} Files View ({} – {})",
        file_type, aggregate.count, aggregate.total_size
    )
}

/// Ticket for one file fetch, keyed by dataset id
pub type FilesTicket = Ticket<i64>;

/// State of a dataset's file table
pub struct FilesViewModel {
    dataset_id: i64,
    files: Vec<FlatFile>,
    file_type: String,
    sequence: RequestSequence,
}

impl FilesViewModel {
    pub fn new(dataset_id: i64) -> Self {
        Self {
            dataset_id,
            files: Vec::new(),
            file_type: ALL_TYPES.to_string(),
            sequence: RequestSequence::new(),
        }
    }

    pub fn dataset_id(&self) -> i64 {
        self.dataset_id
    }

    /// Switch to another dataset; earlier fetches become stale
    pub fn select_dataset(&mut self, dataset_id: i64) -> FilesTicket {
        if dataset_id != self.dataset_id {
            self.dataset_id = dataset_id;
            self.files.clear();
        }
        self.begin_load()
    }

    pub fn begin_load(&mut self) -> FilesTicket {
        self.sequence.issue(self.dataset_id)
    }

    /// Apply a fetch result; returns whether it was current
    pub fn finish_load(
        &mut self,
        ticket: FilesTicket,
        result: Result<Vec<FileMetadataEntry>>,
    ) -> Result<bool> {
        if !self.sequence.is_current(&ticket) {
            debug!(dataset_id = ticket.key(), "Dropping superseded file metadata response");
            return Ok(false);
        }

        match result {
            Ok(entries) => {
                self.files = flatten(&entries);
                Ok(true)
            },
            Err(e) => {
                warn!(error = %e, dataset_id = ticket.key(), "Failed to fetch dataset files");
                Err(e)
            },
        }
    }

    /// Fetch the selected dataset's files
    pub async fn refresh(&mut self, backend: &dyn RegistryBackend) -> Result<bool> {
        let ticket = self.begin_load();
        let result = backend.dataset_files_metadata(ticket.key()).await;
        self.finish_load(ticket, result)
    }

    pub fn set_file_type(&mut self, file_type: impl Into<String>) {
        self.file_type = file_type.into();
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn files(&self) -> &[FlatFile] {
        &self.files
    }

    /// Files passing the current type filter
    pub fn visible(&self) -> Vec<FlatFile> {
        filter_by_type(&self.files, &self.file_type)
    }

    pub fn aggregate(&self) -> FileAggregate {
        aggregate(&self.visible())
    }

    pub fn summary_line(&self) -> String {
        summary_line(&self.file_type, &self.aggregate())
    }
}
