//! API endpoint URL builders
//!
//! `base_url` is expected without a trailing slash; [`ApiClient`] normalises it.
//!
//! [`ApiClient`]: crate::api::ApiClient

/// Dataset collection, optionally filtered by project
pub fn datasets_url(base_url: &str, project_id: Option<i64>) -> String {
    match project_id {
        Some(id) => format!("{}/datasets/?project_id={}", base_url, id),
        None => format!("{}/datasets/", base_url),
    }
}

/// Dataset creation (multipart POST)
pub fn create_dataset_url(base_url: &str) -> String {
    format!("{}/datasets/", base_url)
}

/// Per-file metadata of one dataset
pub fn dataset_files_metadata_url(base_url: &str, dataset_id: i64) -> String {
    format!("{}/dataset_files_metadata/{}", base_url, dataset_id)
}

/// One dataset with its key/value metadata
pub fn dataset_with_metadata_url(base_url: &str, dataset_id: i64) -> String {
    format!("{}/datasets_with_metadata/{}", base_url, dataset_id)
}

/// Metadata-summary upload (multipart POST)
pub fn upload_file_metadata_url(base_url: &str) -> String {
    format!("{}/ingest/upload_file_metadata", base_url)
}

/// Aggregate summary of one project
pub fn project_summary_url(base_url: &str, project_id: i64) -> String {
    format!("{}/projects/{}/summary", base_url, project_id)
}
