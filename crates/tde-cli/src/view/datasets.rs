//! Dataset listing: display ids, "new" badges, and client-side pagination
//!
//! Display ids have the form `P{project_id}-{rank}`, where `rank` is the
//! 1-based position of the dataset's id among all datasets of the same
//! project in the fetched set. They are recomputed from scratch on every
//! fetch, never patched.

use crate::api::RegistryBackend;
use crate::error::{CliError, Result};
use crate::view::clock::{Clock, SystemClock};
use crate::view::sequence::{RequestSequence, Ticket};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tde_common::types::Dataset;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// How long after creation a dataset counts as new, in milliseconds
pub const NEW_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Page sizes offered to the user
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Row shown when a listing has no datasets
pub const EMPTY_STATE: &str = "No datasets available.";

/// A dataset ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayDataset {
    #[serde(flatten)]
    pub dataset: Dataset,
    #[serde(rename = "displayId")]
    pub display_id: String,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

/// Whether a dataset created at `created_at` is new as of `now`
///
/// True iff `0 <= now - created_at <= 1 day`. Timestamps in the future
/// (clock skew) and missing timestamps are not new.
pub fn is_new(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    created_at
        .map(|created| now.signed_duration_since(created).num_milliseconds())
        .is_some_and(|age| (0..=NEW_WINDOW_MS).contains(&age))
}

/// Sort by id and pair each dataset with its display id
fn assign_display_ids(mut datasets: Vec<Dataset>) -> Vec<(Dataset, String)> {
    datasets.sort_by_key(|d| d.id);

    // Ids arrive sorted, so each group is sorted too.
    let mut groups: HashMap<i64, Vec<i64>> = HashMap::new();
    for dataset in &datasets {
        groups.entry(dataset.project_id).or_default().push(dataset.id);
    }

    datasets
        .into_iter()
        .map(|dataset| {
            let rank = groups
                .get(&dataset.project_id)
                .map_or(0, |ids| ids.partition_point(|&id| id <= dataset.id));
            let display_id = format!("P{}-{}", dataset.project_id, rank);
            (dataset, display_id)
        })
        .collect()
}

/// Rank a fetched collection for display as of `now`
pub fn rank_datasets(datasets: Vec<Dataset>, now: DateTime<Utc>) -> Vec<DisplayDataset> {
    assign_display_ids(datasets)
        .into_iter()
        .map(|(dataset, display_id)| DisplayDataset {
            is_new: is_new(dataset.created_at, now),
            dataset,
            display_id,
        })
        .collect()
}

/// Result of offering a fetched collection to the view model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The rows were replaced
    Applied { count: usize },
    /// A newer fetch was issued meanwhile; the response was dropped
    Stale,
}

/// Ticket for one dataset fetch, keyed by the project filter it used
pub type LoadTicket = Ticket<Option<i64>>;

/// State of the dataset listing page
pub struct DatasetListViewModel {
    project_id: Option<i64>,
    rows: Vec<(Dataset, String)>,
    page: usize,
    page_size: usize,
    sequence: RequestSequence,
    clock: Arc<dyn Clock>,
}

impl DatasetListViewModel {
    /// A listing filtered to `project_id` (or all datasets), using wall-clock time
    pub fn new(project_id: Option<i64>, page_size: usize) -> Self {
        Self::with_clock(project_id, page_size, Arc::new(SystemClock))
    }

    pub fn with_clock(project_id: Option<i64>, page_size: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            project_id,
            rows: Vec::new(),
            page: 0,
            page_size: page_size.max(1),
            sequence: RequestSequence::new(),
            clock,
        }
    }

    pub fn project_id(&self) -> Option<i64> {
        self.project_id
    }

    /// Heading for the page
    pub fn title(&self) -> String {
        match self.project_id {
            Some(id) => format!("Datasets for Project {}", id),
            None => "All Datasets".to_string(),
        }
    }

    /// Change the project filter and issue the fetch ticket for it
    ///
    /// Any response still in flight for the previous filter becomes stale.
    pub fn set_project(&mut self, project_id: Option<i64>) -> LoadTicket {
        if self.project_id != project_id {
            self.project_id = project_id;
            self.page = 0;
        }
        self.begin_load()
    }

    /// Issue a ticket for fetching the current filter
    pub fn begin_load(&mut self) -> LoadTicket {
        self.sequence.issue(self.project_id)
    }

    /// Offer the outcome of a fetch
    ///
    /// Stale tickets are ignored whatever they carry. A failed current fetch
    /// leaves the previous rows untouched and is returned to the caller.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Dataset>>,
    ) -> Result<LoadOutcome> {
        if !self.sequence.is_current(&ticket) {
            debug!(
                seq = ticket.seq(),
                project_id = ?ticket.key(),
                "Dropping superseded dataset response"
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(datasets) => {
                self.rows = assign_display_ids(datasets);
                self.clamp_page();
                Ok(LoadOutcome::Applied {
                    count: self.rows.len(),
                })
            },
            Err(e) => {
                warn!(error = %e, project_id = ?ticket.key(), "Failed to fetch datasets");
                Err(e)
            },
        }
    }

    /// Fetch the current filter from the backend and apply it
    pub async fn refresh(&mut self, backend: &dyn RegistryBackend) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let result = backend.list_datasets(ticket.key()).await;
        self.finish_load(ticket, result)
    }

    /// Like [`refresh`](Self::refresh), for a view model shared between tasks
    ///
    /// The lock is not held across the network call.
    pub async fn refresh_shared(
        view: &Mutex<Self>,
        backend: &dyn RegistryBackend,
    ) -> Result<LoadOutcome> {
        let ticket = view.lock().await.begin_load();
        let result = backend.list_datasets(ticket.key()).await;
        view.lock().await.finish_load(ticket, result)
    }

    /// All rows, ranked, with "new" computed against the clock now
    pub fn rows(&self) -> Vec<DisplayDataset> {
        self.display(&self.rows)
    }

    /// Rows on the current page
    pub fn page_rows(&self) -> Vec<DisplayDataset> {
        let start = self.page.saturating_mul(self.page_size).min(self.rows.len());
        let end = start.saturating_add(self.page_size).min(self.rows.len());
        self.display(&self.rows[start..end])
    }

    fn display(&self, rows: &[(Dataset, String)]) -> Vec<DisplayDataset> {
        let now = self.clock.now();
        rows.iter()
            .map(|(dataset, display_id)| DisplayDataset {
                is_new: is_new(dataset.created_at, now),
                dataset: dataset.clone(),
                display_id: display_id.clone(),
            })
            .collect()
    }

    /// The largest rank currently shown for a project
    pub fn max_rank(&self, project_id: i64) -> usize {
        self.rows
            .iter()
            .filter(|(d, _)| d.project_id == project_id)
            .count()
    }

    pub fn display_id_of(&self, dataset_id: i64) -> Option<&str> {
        self.rows
            .iter()
            .find(|(d, _)| d.id == dataset_id)
            .map(|(_, display_id)| display_id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of datasets across all pages
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// Move to a zero-based page
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        let last = self.page_count().saturating_sub(1);
        if page > last {
            return Err(CliError::validation(format!(
                "Page {} does not exist; there are {} page(s)",
                page + 1,
                self.page_count().max(1)
            )));
        }
        self.page = page;
        Ok(())
    }

    /// Change rows per page; always returns to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(CliError::validation("Page size must be at least 1"));
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Human summary of the pagination position, e.g. `11–20 of 23`
    pub fn range_label(&self) -> String {
        if self.rows.is_empty() {
            return "0–0 of 0".to_string();
        }
        let start = self.page * self.page_size + 1;
        let end = ((self.page + 1) * self.page_size).min(self.rows.len());
        format!("{}–{} of {}", start, end, self.rows.len())
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count().saturating_sub(1));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::view::clock::FixedClock;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn dataset(id: i64, project_id: i64) -> Dataset {
        Dataset {
            id,
            project_id,
            name: format!("Dataset {id}"),
            abstract_text: String::new(),
            site: "WEHI".to_string(),
            created_at: Some(now() - Duration::days(30)),
        }
    }

    fn view_with(datasets: Vec<Dataset>, page_size: usize) -> DatasetListViewModel {
        let mut view =
            DatasetListViewModel::with_clock(None, page_size, Arc::new(FixedClock(now())));
        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(datasets)).unwrap();
        view
    }

    #[test]
    fn test_display_ids_rank_within_project() {
        let ranked = rank_datasets(
            vec![dataset(7, 2), dataset(3, 1), dataset(5, 2), dataset(4, 1), dataset(9, 1)],
            now(),
        );

        let ids: Vec<(i64, &str)> = ranked
            .iter()
            .map(|d| (d.dataset.id, d.display_id.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![(3, "P1-1"), (4, "P1-2"), (5, "P2-1"), (7, "P2-2"), (9, "P1-3")]
        );
    }

    #[test]
    fn test_is_new_window_edges() {
        let now = now();
        assert!(is_new(Some(now), now));
        assert!(is_new(Some(now - Duration::milliseconds(NEW_WINDOW_MS)), now));
        assert!(!is_new(Some(now - Duration::milliseconds(NEW_WINDOW_MS + 1)), now));
        assert!(!is_new(Some(now + Duration::seconds(1)), now));
        assert!(!is_new(None, now));
    }

    #[test]
    fn test_is_new_follows_the_clock_not_the_fetch() {
        let mut recent = dataset(1, 1);
        recent.created_at = Some(now() - Duration::hours(23));

        let fetched_at = view_with(vec![recent.clone()], 10);
        assert!(fetched_at.rows()[0].is_new);

        // Same rows, rendered two hours later.
        let later = now() + Duration::hours(2);
        let mut view =
            DatasetListViewModel::with_clock(None, 10, Arc::new(FixedClock(later)));
        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(vec![recent])).unwrap();
        assert!(!view.rows()[0].is_new);
    }

    #[test]
    fn test_pagination_slices_and_resets() {
        let mut view = view_with((1..=23).map(|id| dataset(id, 1)).collect(), 10);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.page_rows().len(), 10);

        view.set_page(2).unwrap();
        let last: Vec<i64> = view.page_rows().iter().map(|d| d.dataset.id).collect();
        assert_eq!(last, vec![21, 22, 23]);
        assert_eq!(view.range_label(), "21–23 of 23");

        view.set_page_size(5).unwrap();
        assert_eq!(view.page(), 0);
        assert_eq!(view.page_count(), 5);

        assert!(view.set_page(5).is_err());
        assert!(view.set_page_size(0).is_err());
    }

    #[test]
    fn test_empty_listing() {
        let view = view_with(Vec::new(), 10);
        assert!(view.is_empty());
        assert_eq!(view.total_count(), 0);
        assert_eq!(view.page_count(), 0);
        assert!(view.page_rows().is_empty());
        assert_eq!(view.range_label(), "0–0 of 0");
    }

    #[test]
    fn test_failed_fetch_keeps_previous_rows() {
        let mut view = view_with(vec![dataset(1, 1), dataset(2, 1)], 10);

        let ticket = view.begin_load();
        let result = view.finish_load(ticket, Err(CliError::network(Some(500), "boom")));
        assert!(result.is_err());
        assert_eq!(view.total_count(), 2);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut view = DatasetListViewModel::with_clock(Some(1), 10, Arc::new(FixedClock(now())));

        let slow = view.begin_load();
        let fresh = view.set_project(Some(2));
        assert_eq!(fresh.key(), Some(2));

        let applied = view.finish_load(fresh, Ok(vec![dataset(10, 2)])).unwrap();
        assert_eq!(applied, LoadOutcome::Applied { count: 1 });

        let stale = view.finish_load(slow, Ok(vec![dataset(1, 1), dataset(2, 1)])).unwrap();
        assert_eq!(stale, LoadOutcome::Stale);
        assert_eq!(view.rows()[0].display_id, "P2-1");

        // A stale failure is not reported either.
        let slow = view.begin_load();
        let _fresh = view.begin_load();
        assert_eq!(
            view.finish_load(slow, Err(CliError::network(None, "late"))).unwrap(),
            LoadOutcome::Stale
        );
    }

    #[test]
    fn test_refetch_clamps_page() {
        let mut view = view_with((1..=12).map(|id| dataset(id, 1)).collect(), 5);
        view.set_page(2).unwrap();

        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(vec![dataset(1, 1)])).unwrap();
        assert_eq!(view.page(), 0);
        assert_eq!(view.page_rows().len(), 1);
    }

    #[test]
    fn test_title() {
        assert_eq!(DatasetListViewModel::new(None, 10).title(), "All Datasets");
        assert_eq!(
            DatasetListViewModel::new(Some(4), 10).title(),
            "Datasets for Project 4"
        );
    }

    proptest! {
        #[test]
        fn prop_ranks_are_a_bijection_per_project(
            pairs in proptest::collection::hash_map(0i64..500, 1i64..5, 0..60)
        ) {
            let datasets: Vec<Dataset> =
                pairs.iter().map(|(&id, &project)| dataset(id, project)).collect();
            let ranked = rank_datasets(datasets, now());
            prop_assert_eq!(ranked.len(), pairs.len());

            let mut by_project: HashMap<i64, Vec<(i64, usize)>> = HashMap::new();
            for d in &ranked {
                let rank: usize = d
                    .display_id
                    .rsplit('-')
                    .next()
                    .unwrap()
                    .parse()
                    .unwrap();
                let prefix = format!("P{}-", d.dataset.project_id);
                prop_assert!(d.display_id.starts_with(&prefix));
                by_project.entry(d.dataset.project_id).or_default().push((d.dataset.id, rank));
            }

            for (_, mut members) in by_project {
                members.sort();
                let ranks: Vec<usize> = members.iter().map(|(_, r)| *r).collect();
                let expected: Vec<usize> = (1..=members.len()).collect();
                prop_assert_eq!(ranks, expected);
            }

            let ids: Vec<i64> = ranked.iter().map(|d| d.dataset.id).collect();
            let mut sorted = ids.clone();
            sorted.sort();
            prop_assert_eq!(&ids, &sorted);
            prop_assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
        }
    }
}
