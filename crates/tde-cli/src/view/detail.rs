//! A single dataset with its registered file patterns

use crate::view::snippet::SnippetLanguage;
use serde::Serialize;
use std::collections::BTreeMap;
use tde_common::types::{Dataset, DatasetWithMetadata};

/// Shown when a dataset has no name
pub const UNTITLED: &str = "Untitled Dataset";

/// Shown when a dataset has no abstract
pub const NO_ABSTRACT: &str =
    "No abstract provided for this dataset. Please update the record to include details.";

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_file_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Display id used when the dataset's rank in its project is unknown
pub fn fallback_display_id(dataset: &Dataset) -> String {
    format!("P{}-{:03}", dataset.project_id, dataset.id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetDetail {
    pub dataset: Dataset,
    pub display_id: String,
    /// Every metadata entry; a repeated key keeps its last value
    pub metadata: BTreeMap<String, String>,
    pub location: String,
    pub raw_files: Vec<String>,
    pub processed_files: Vec<String>,
    pub summary_files: Vec<String>,
    pub readme_files: Vec<String>,
}

impl DatasetDetail {
    pub fn from_response(response: DatasetWithMetadata) -> Self {
        // The first `location` entry counts; every other key takes the last one
        let location = response
            .metadata
            .iter()
            .find(|m| m.key == "location")
            .map(|m| m.value.clone())
            .unwrap_or_default();

        let metadata: BTreeMap<String, String> = response
            .metadata
            .into_iter()
            .map(|m| (m.key, m.value))
            .collect();

        let list = |key: &str| {
            metadata
                .get(key)
                .map(|value| split_file_list(value))
                .unwrap_or_default()
        };

        Self {
            display_id: fallback_display_id(&response.dataset),
            location,
            raw_files: list("raw_files"),
            processed_files: list("processed_files"),
            summary_files: list("summary_files"),
            readme_files: list("readme_files"),
            dataset: response.dataset,
            metadata,
        }
    }

    /// Use the id the dataset has in its project listing
    pub fn with_display_id(mut self, display_id: impl Into<String>) -> Self {
        self.display_id = display_id.into();
        self
    }

    pub fn name(&self) -> &str {
        non_blank(&self.dataset.name).unwrap_or(UNTITLED)
    }

    pub fn abstract_text(&self) -> &str {
        non_blank(&self.dataset.abstract_text).unwrap_or(NO_ABSTRACT)
    }

    /// Source listing the raw files under the dataset's location
    pub fn snippet(&self, language: SnippetLanguage) -> String {
        language.render(&self.location, &self.raw_files)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
