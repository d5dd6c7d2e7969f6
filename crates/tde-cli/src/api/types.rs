//! API request types
//!
//! Response types are shared with the rest of the workspace and re-exported
//! from `tde_common::types`.

use crate::error::{CliError, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

pub use tde_common::types::{
    Dataset, DatasetMetadata, DatasetSummary, DatasetWithMetadata, ErrorBody, FileGroupSummary,
    FileMetadataEntry, FileMetadataPair, ProjectSummary, SizeBearing, UploadResponse,
    UploadSummary,
};

/// Multipart fields for `POST /datasets/`, in submission order
///
/// Optional fields are only recorded when they carry text, so the backend
/// never sees an empty string where it expects "not supplied".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatasetRequest {
    fields: Vec<(&'static str, String)>,
}

impl CreateDatasetRequest {
    /// Start a request for the given project
    pub fn new(project_id: i64) -> Self {
        Self {
            fields: vec![("project_id", project_id.to_string())],
        }
    }

    /// Add a field that is always sent
    pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Add a field only if it is non-empty after trimming
    pub fn optional_field(mut self, name: &'static str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() {
            self.fields.push((name, value.to_string()));
        }
        self
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Names of the fields that will be sent
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn into_form(self) -> Form {
        self.fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
    }
}

/// A metadata-summary file to attach to a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataUpload {
    pub dataset_id: i64,
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl MetadataUpload {
    pub fn new(dataset_id: i64, file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            dataset_id,
            file_name: file_name.into(),
            contents,
        }
    }

    /// Read a summary file from disk
    ///
    /// The contents must be JSON; anything else is rejected before upload.
    pub async fn from_path(dataset_id: i64, path: &Path) -> Result<Self> {
        let contents = tokio::fs::read(path).await?;

        if let Err(e) = serde_json::from_slice::<serde_json::Value>(&contents) {
            return Err(CliError::validation(format!(
                "'{}' is not a JSON metadata summary ({}). Upload the output.json produced by the metadata generator.",
                path.display(),
                e
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.json".to_string());

        Ok(Self::new(dataset_id, file_name, contents))
    }

    pub(crate) fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.contents)
            .file_name(self.file_name)
            .mime_str("application/json")?;

        Ok(Form::new()
            .part("file", part)
            .text("dataset_id", self.dataset_id.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_skip_blank_values() {
        let request = CreateDatasetRequest::new(2)
            .field("name", "X")
            .optional_field("location", "")
            .optional_field("raw_files", "   ")
            .optional_field("readme_files", " README.md ");

        assert_eq!(request.field_names(), vec!["project_id", "name", "readme_files"]);
        assert_eq!(request.get("readme_files"), Some("README.md"));
        assert_eq!(request.get("location"), None);
    }

    #[tokio::test]
    async fn test_metadata_upload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        std::fs::write(&path, r#"{"files": []}"#).unwrap();

        let upload = MetadataUpload::from_path(7, &path).await.unwrap();
        assert_eq!(upload.dataset_id, 7);
        assert_eq!(upload.file_name, "output.json");
    }

    #[tokio::test]
    async fn test_metadata_upload_rejects_non_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let err = MetadataUpload::from_path(7, &path).await.unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[tokio::test]
    async fn test_metadata_upload_missing_file() {
        let err = MetadataUpload::from_path(7, Path::new("/nonexistent/output.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
