//! Records exchanged with the data registry backend
//!
//! These mirror the JSON the backend sends. Deserialization is deliberately
//! forgiving about scalar types and timestamps: a record with an odd field is
//! still displayed, it just shows a fallback value for that field.

pub mod lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown for any file attribute the backend did not report
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Datasets
// ============================================================================

/// A named, site-located collection of scientific files belonging to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One `key`/`value` pair attached to a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub key: String,
    #[serde(default, deserialize_with = "lenient::scalar_string")]
    pub value: String,
}

/// Response of `GET /datasets_with_metadata/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetWithMetadata {
    #[serde(flatten)]
    pub dataset: Dataset,
    #[serde(default)]
    pub metadata: Vec<DatasetMetadata>,
}

// ============================================================================
// Files
// ============================================================================

/// One `metadata_key`/`metadata_value` pair attached to a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadataPair {
    pub metadata_key: String,
    #[serde(default, deserialize_with = "lenient::scalar_string")]
    pub metadata_value: String,
}

/// A file record as returned by `GET /dataset_files_metadata/{id}`
///
/// `file_type` is kept as the backend spells it (`Raw`, `Processed`,
/// `Summarised`, ...); comparisons against it are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadataEntry {
    pub id: i64,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub metadata: Vec<FileMetadataPair>,
}

// ============================================================================
// Project summaries
// ============================================================================

/// Aggregate counts and size for a project or one of its datasets
///
/// Older backends report `total_size_kb`; newer ones `total_size_bytes`.
/// Either field is only honoured when it holds a JSON number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeBearing {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_size_bytes: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_size_kb: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub file_count: u64,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub patient_count: u64,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub sample_count: u64,
}

/// Per-dataset row of a project summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub dataset_id: i64,
    #[serde(default)]
    pub dataset_name: String,
    #[serde(flatten)]
    pub size: SizeBearing,
}

/// Response of `GET /projects/{id}/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: i64,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub totals: SizeBearing,
    #[serde(default)]
    pub datasets: Vec<DatasetSummary>,
}

// ============================================================================
// Metadata upload
// ============================================================================

/// Count and size of one category of newly registered files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileGroupSummary {
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub total_size: f64,
}

/// What the backend registered from an uploaded metadata-summary file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    #[serde(default)]
    pub raw_files: FileGroupSummary,
    #[serde(default)]
    pub processed_files: FileGroupSummary,
    #[serde(default)]
    pub summarised_files: FileGroupSummary,
    #[serde(default)]
    pub file_size_unit: String,
}

/// Response of `POST /ingest/upload_file_metadata`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub summary: UploadSummary,
}

// ============================================================================
// Errors
// ============================================================================

/// Body of a non-2xx response
///
/// `detail` is usually a string, but validation failures carry a list of
/// objects, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// The user-facing message, if the backend supplied one
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
