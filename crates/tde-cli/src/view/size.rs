//! Human-readable sizes for project summaries
//!
//! The breakpoints and precisions here are relied on byte-for-byte:
//! `0 B`, integer `KB`, one decimal `MB`, two decimals `GB`.

use serde::Serialize;
use tde_common::types::{ProjectSummary, SizeBearing};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Size in bytes, preferring `total_size_bytes` over the legacy `total_size_kb`
pub fn bytes_of(size: &SizeBearing) -> u64 {
    size.total_size_bytes
        .or_else(|| size.total_size_kb.map(|kb| kb * KB as f64))
        .map(to_whole_bytes)
        .unwrap_or(0)
}

fn to_whole_bytes(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Round half away from zero to `decimals` places, then print exactly that many
fn fixed(value: f64, decimals: i32) -> String {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", decimals.max(0) as usize, rounded)
}

/// Format a byte count for display
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let value = bytes as f64;
    if bytes >= GB {
        format!("{} GB", fixed(value / GB as f64, 2))
    } else if bytes >= MB {
        format!("{} MB", fixed(value / MB as f64, 1))
    } else {
        format!("{} KB", fixed(value / KB as f64, 0))
    }
}

/// One line of a project summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeRow {
    pub name: String,
    pub file_count: u64,
    pub patient_count: u64,
    pub sample_count: u64,
    pub size: String,
}

impl SizeRow {
    fn new(name: impl Into<String>, size: &SizeBearing) -> Self {
        Self {
            name: name.into(),
            file_count: size.file_count,
            patient_count: size.patient_count,
            sample_count: size.sample_count,
            size: format_size(bytes_of(size)),
        }
    }
}

/// A project summary ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummaryView {
    pub title: String,
    pub totals: SizeRow,
    pub datasets: Vec<SizeRow>,
}

impl From<&ProjectSummary> for ProjectSummaryView {
    fn from(summary: &ProjectSummary) -> Self {
        let title = if summary.project_name.trim().is_empty() {
            format!("Project {}", summary.project_id)
        } else {
            summary.project_name.clone()
        };

        Self {
            totals: SizeRow::new("Total", &summary.totals),
            datasets: summary
                .datasets
                .iter()
                .map(|d| SizeRow::new(d.dataset_name.clone(), &d.size))
                .collect(),
            title,
        }
    }
}
