//! The seam between view models and the registry backend

use crate::api::types::{CreateDatasetRequest, MetadataUpload};
use crate::error::Result;
use async_trait::async_trait;
use tde_common::types::{
    Dataset, DatasetWithMetadata, FileMetadataEntry, ProjectSummary, UploadSummary,
};

/// Everything the dashboard asks of the backend
///
/// Each method is a single attempt; callers decide how to report failures.
#[async_trait]
pub trait RegistryBackend: Send + Sync {
    /// `GET /datasets/`, optionally restricted to one project
    async fn list_datasets(&self, project_id: Option<i64>) -> Result<Vec<Dataset>>;

    /// `POST /datasets/` as multipart form data
    async fn create_dataset(&self, request: CreateDatasetRequest) -> Result<Dataset>;

    /// `GET /dataset_files_metadata/{id}`
    async fn dataset_files_metadata(&self, dataset_id: i64) -> Result<Vec<FileMetadataEntry>>;

    /// `GET /datasets_with_metadata/{id}`
    async fn dataset_with_metadata(&self, dataset_id: i64) -> Result<DatasetWithMetadata>;

    /// `POST /ingest/upload_file_metadata` as multipart form data
    async fn upload_file_metadata(&self, upload: MetadataUpload) -> Result<UploadSummary>;

    /// `GET /projects/{id}/summary`
    async fn project_summary(&self, project_id: i64) -> Result<ProjectSummary>;
}
