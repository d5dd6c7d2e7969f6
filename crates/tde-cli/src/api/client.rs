//! HTTP API client for the TDE backend
//!
//! Every call is a single attempt. Non-2xx answers are turned into
//! [`CliError::Network`] using the backend's `{ "detail": ... }` body when
//! there is one; 2xx answers that do not decode become [`CliError::Parse`].

use crate::api::backend::RegistryBackend;
use crate::api::endpoints;
use crate::api::types::*;
use crate::config::Config;
use crate::error::{CliError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// API client for the TDE backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(CliError::config("API base URL cannot be empty"));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.server_url(), config.timeout())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into the error the backend described
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        debug!(%url, status = status.as_u16(), %message, "Request rejected");
        return Err(CliError::network(Some(status.as_u16()), message));
    }

    serde_json::from_slice(&body).map_err(|e| CliError::parse(format!("{url}: {e}")))
}

#[async_trait]
impl RegistryBackend for ApiClient {
    #[instrument(skip(self))]
    async fn list_datasets(&self, project_id: Option<i64>) -> Result<Vec<Dataset>> {
        self.get_json(&endpoints::datasets_url(&self.base_url, project_id))
            .await
    }

    #[instrument(skip(self, request), fields(fields = ?request.field_names()))]
    async fn create_dataset(&self, request: CreateDatasetRequest) -> Result<Dataset> {
        let url = endpoints::create_dataset_url(&self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(request.into_form())
            .send()
            .await?;

        decode(response).await
    }

    #[instrument(skip(self))]
    async fn dataset_files_metadata(&self, dataset_id: i64) -> Result<Vec<FileMetadataEntry>> {
        self.get_json(&endpoints::dataset_files_metadata_url(&self.base_url, dataset_id))
            .await
    }

    #[instrument(skip(self))]
    async fn dataset_with_metadata(&self, dataset_id: i64) -> Result<DatasetWithMetadata> {
        self.get_json(&endpoints::dataset_with_metadata_url(&self.base_url, dataset_id))
            .await
    }

    #[instrument(skip(self, upload), fields(dataset_id = upload.dataset_id, file = %upload.file_name))]
    async fn upload_file_metadata(&self, upload: MetadataUpload) -> Result<UploadSummary> {
        let url = endpoints::upload_file_metadata_url(&self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(upload.into_form()?)
            .send()
            .await?;

        let body: UploadResponse = decode(response).await?;
        Ok(body.summary)
    }

    #[instrument(skip(self))]
    async fn project_summary(&self, project_id: i64) -> Result<ProjectSummary> {
        self.get_json(&endpoints::project_summary_url(&self.base_url, project_id))
            .await
    }
}
