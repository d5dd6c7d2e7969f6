//! Terminal rendering of view models
//!
//! Colour is an explicit [`Theme`] setting rather than global state, so the
//! same view renders identically in tests and in a pipe.

use crate::view::datasets::EMPTY_STATE;
use crate::view::size::SizeRow;
use crate::view::{DatasetDetail, DisplayDataset, FlatFile, Notification, ProjectSummaryView, Severity};
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};

/// Placeholder for a missing name or date
pub const MISSING: &str = "—";

/// Colour settings for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn badge(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn notification(&self, notification: &Notification) -> String {
        let (mark, message) = match notification.severity {
            Severity::Success => ("✓", notification.message.green()),
            Severity::Info => ("ℹ", notification.message.cyan()),
            Severity::Error => ("✗", notification.message.red()),
        };

        if self.color {
            format!("{} {}", mark, message)
        } else {
            format!("{} {}", mark, notification.message)
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
        if !self.color {
            table.force_no_tty();
        }
        table
    }
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() {
        MISSING
    } else {
        value
    }
}

/// The dataset listing; an empty page gets a single explanatory row
pub fn datasets_table(rows: &[DisplayDataset], theme: &Theme) -> Table {
    let mut table = theme.table();
    table.set_header(vec!["ID", "Name", "Site", "Created", ""]);

    if rows.is_empty() {
        table.add_row(vec![Cell::new(EMPTY_STATE)]);
        return table;
    }

    for row in rows {
        let created = row
            .dataset
            .created_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let badge = if row.is_new { theme.badge("NEW") } else { String::new() };

        table.add_row(vec![
            row.display_id.clone(),
            or_missing(&row.dataset.name).to_string(),
            or_missing(&row.dataset.site).to_string(),
            created,
            badge,
        ]);
    }

    table
}

pub fn files_table(files: &[FlatFile], theme: &Theme) -> Table {
    let mut table = theme.table();
    table.set_header(vec![
        "ID",
        "Type",
        "File name",
        "Size",
        "Organisation",
        "Patient",
        "Sample",
    ]);

    for file in files {
        table.add_row(vec![
            file.id.to_string(),
            file.file_type.clone(),
            file.file_name.clone(),
            file.file_size.clone(),
            file.organisation.clone(),
            file.patient_id.clone(),
            file.sample_id.clone(),
        ]);
    }

    table
}

fn size_cells(row: &SizeRow) -> Vec<String> {
    vec![
        row.name.clone(),
        row.file_count.to_string(),
        row.patient_count.to_string(),
        row.sample_count.to_string(),
        row.size.clone(),
    ]
}

/// Per-dataset rows followed by the project totals
pub fn project_table(view: &ProjectSummaryView, theme: &Theme) -> Table {
    let mut table = theme.table();
    table.set_header(vec!["Dataset", "Files", "Patients", "Samples", "Size"]);

    for row in &view.datasets {
        table.add_row(size_cells(row));
    }
    table.add_row(size_cells(&view.totals));

    table
}

fn file_list(files: &[String]) -> String {
    if files.is_empty() {
        MISSING.to_string()
    } else {
        files.join(", ")
    }
}

pub fn detail_table(detail: &DatasetDetail, theme: &Theme) -> Table {
    let mut table = theme.table();

    table.add_row(vec!["ID", detail.display_id.as_str()]);
    table.add_row(vec!["Name", detail.name()]);
    table.add_row(vec!["Site", or_missing(&detail.dataset.site)]);
    table.add_row(vec!["Abstract", detail.abstract_text()]);
    table.add_row(vec!["Location", or_missing(&detail.location)]);
    table.add_row(vec!["Raw files".to_string(), file_list(&detail.raw_files)]);
    table.add_row(vec!["Processed files".to_string(), file_list(&detail.processed_files)]);
    table.add_row(vec!["Summary files".to_string(), file_list(&detail.summary_files)]);
    table.add_row(vec!["Readme files".to_string(), file_list(&detail.readme_files)]);

    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tde_common::types::Dataset;

    fn row(id: i64, name: &str, is_new: bool) -> DisplayDataset {
        DisplayDataset {
            dataset: Dataset {
                id,
                project_id: 1,
                name: name.to_string(),
                abstract_text: String::new(),
                site: "WEHI".to_string(),
                created_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()),
            },
            display_id: format!("P1-{id}"),
            is_new,
        }
    }

    #[test]
    fn test_empty_listing_shows_empty_state() {
        let rendered = datasets_table(&[], &Theme::plain()).to_string();
        assert!(rendered.contains(EMPTY_STATE));
    }

    #[test]
    fn test_dataset_rows() {
        let rendered =
            datasets_table(&[row(1, "Lung WGS", true), row(2, "", false)], &Theme::plain())
                .to_string();
        assert!(rendered.contains("P1-1"));
        assert!(rendered.contains("2025-03-01"));
        assert!(rendered.contains("NEW"));
        assert!(rendered.contains(MISSING));
    }

    #[test]
    fn test_plain_notification() {
        let theme = Theme::plain();
        assert_eq!(theme.notification(&Notification::success("Saved")), "✓ Saved");
        assert_eq!(theme.notification(&Notification::error("Nope")), "✗ Nope");
    }
}
