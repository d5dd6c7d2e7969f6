//! Shared helpers for integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tde_cli::api::{
    CreateDatasetRequest, Dataset, DatasetWithMetadata, FileGroupSummary, FileMetadataEntry,
    MetadataUpload, ProjectSummary, RegistryBackend, UploadSummary,
};
use tde_cli::{CliError, Result};
use tempfile::TempDir;
use tokio::sync::Notify;

/// Backend JSON for one dataset
pub fn dataset_json(id: i64, project_id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "project_id": project_id,
        "name": name,
        "abstract": format!("Abstract of {name}"),
        "site": "WEHI Milton",
        "created_at": "2024-11-02T10:15:00"
    })
}

pub fn dataset(id: i64, project_id: i64, name: &str) -> Dataset {
    serde_json::from_value(dataset_json(id, project_id, name)).unwrap_or_else(|e| panic!("{e}"))
}

/// The `tde` binary pointed at `server_url`, isolated from the user's config
///
/// Uses an empty config file inside `home`; tests may point `TDE_CONFIG_FILE`
/// elsewhere.
pub fn tde(server_url: &str, home: &TempDir) -> Command {
    let config = home.path().join("empty.toml");
    std::fs::write(&config, "").unwrap_or_else(|e| panic!("{e}"));

    let mut cmd = Command::cargo_bin("tde").unwrap_or_else(|e| panic!("{e}"));
    cmd.env("TDE_CONFIG_FILE", config)
        .env_remove("TDE_API_BASE_URL")
        .env_remove("TDE_PAGE_SIZE")
        .env_remove("TDE_API_TIMEOUT_SECS")
        .env_remove("LOG_LEVEL")
        .env("NO_COLOR", "1")
        .arg("--server-url")
        .arg(server_url);
    cmd
}

/// In-memory backend whose `create_dataset` can be held open
#[derive(Default)]
pub struct FakeBackend {
    pub datasets: Mutex<Vec<Dataset>>,
    pub create_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    /// Backend `detail` returned by `upload_file_metadata` instead of a summary
    pub upload_error: Option<String>,
    /// Signalled when `create_dataset` or `upload_file_metadata` starts
    pub entered: Notify,
    /// Both write calls wait for this when `hold` is set
    pub release: Notify,
    pub hold: bool,
}

impl FakeBackend {
    pub fn with_datasets(datasets: Vec<Dataset>) -> Self {
        Self {
            datasets: Mutex::new(datasets),
            ..Self::default()
        }
    }

    pub fn holding(mut self) -> Self {
        self.hold = true;
        self
    }

    pub fn failing_uploads(mut self, detail: impl Into<String>) -> Self {
        self.upload_error = Some(detail.into());
        self
    }

    async fn wait_if_held(&self) {
        self.entered.notify_one();
        if self.hold {
            self.release.notified().await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Dataset>> {
        self.datasets.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RegistryBackend for FakeBackend {
    async fn list_datasets(&self, project_id: Option<i64>) -> Result<Vec<Dataset>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lock()
            .iter()
            .filter(|d| project_id.is_none_or(|p| d.project_id == p))
            .cloned()
            .collect())
    }

    async fn create_dataset(&self, request: CreateDatasetRequest) -> Result<Dataset> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held().await;

        let project_id = request
            .get("project_id")
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| CliError::validation("project_id missing"))?;
        let mut datasets = self.lock();
        let id = datasets.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        let created = Dataset {
            id,
            project_id,
            name: request.get("name").unwrap_or_default().to_string(),
            abstract_text: request.get("abstract").unwrap_or_default().to_string(),
            site: request.get("site").unwrap_or_default().to_string(),
            created_at: None,
        };
        datasets.push(created.clone());
        Ok(created)
    }

    async fn dataset_files_metadata(&self, _dataset_id: i64) -> Result<Vec<FileMetadataEntry>> {
        Ok(Vec::new())
    }

    async fn dataset_with_metadata(&self, dataset_id: i64) -> Result<DatasetWithMetadata> {
        self.lock()
            .iter()
            .find(|d| d.id == dataset_id)
            .map(|d| DatasetWithMetadata {
                dataset: d.clone(),
                metadata: Vec::new(),
            })
            .ok_or_else(|| CliError::network(Some(404), "Dataset not found"))
    }

    async fn upload_file_metadata(&self, upload: MetadataUpload) -> Result<UploadSummary> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held().await;

        match &self.upload_error {
            Some(detail) => Err(CliError::network(Some(422), detail.clone())),
            None => Ok(UploadSummary {
                raw_files: FileGroupSummary {
                    count: upload.contents.len() as u64,
                    total_size: 1.5,
                },
                file_size_unit: "GB".to_string(),
                ..UploadSummary::default()
            }),
        }
    }

    async fn project_summary(&self, project_id: i64) -> Result<ProjectSummary> {
        Err(CliError::network(Some(404), format!("Project {project_id} not found")))
    }
}
