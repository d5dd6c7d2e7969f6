//! Registering a new dataset
//!
//! The form is validated twice: callers should disable submission while
//! [`RegistrationForm::is_valid`] is false, and [`DatasetRegistrationController::submit`]
//! checks again before anything is sent.

use crate::api::{CreateDatasetRequest, RegistryBackend};
use crate::error::{CliError, Result};
use crate::view::datasets::{DatasetListViewModel, LoadOutcome};
use crate::view::notification::Notification;
use crate::view::single_flight::FlightGuard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex as StdMutex, MutexGuard, PoisonError};
use tde_common::types::Dataset;
use tde_common::TdeError;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Project used when the listing is not filtered to one
pub const DEFAULT_PROJECT_ID: i64 = 1;

/// The "Register New Dataset" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub title: String,
    pub abstract_text: String,
    pub site: String,
    /// Base directory of the raw data, e.g. `/project/genomics/lung_cancer_2024/`
    pub location: String,
    /// Raw file patterns, e.g. `*.fastq, *.fasta`
    pub raw: String,
    pub processed: String,
    pub summary: String,
    pub readme: String,
}

impl RegistrationForm {
    /// Title, abstract, and site are all non-blank
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Name the first required field that is blank
    pub fn validate(&self) -> tde_common::Result<()> {
        let required = [
            ("Title", &self.title),
            ("Abstract", &self.abstract_text),
            ("Site", &self.site),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((label, _)) => Err(TdeError::validation(format!("{label} is required"))),
            None => Ok(()),
        }
    }

    /// Build the sparse multipart request
    ///
    /// Optional fields are left out entirely when blank.
    pub fn to_request(&self, project_id: i64) -> tde_common::Result<CreateDatasetRequest> {
        self.validate()?;

        Ok(CreateDatasetRequest::new(project_id)
            .field("name", self.title.trim())
            .field("abstract", self.abstract_text.trim())
            .field("site", self.site.trim())
            .optional_field("location", &self.location)
            .optional_field("raw_files", &self.raw)
            .optional_field("processed_files", &self.processed)
            .optional_field("summary_files", &self.summary)
            .optional_field("readme_files", &self.readme))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A successful registration
#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    /// The record the backend created
    pub dataset: Dataset,
    /// Whether the listing was re-fetched afterwards
    pub refreshed: bool,
    pub notification: Notification,
}

/// Owns the form and submits it, one submission at a time
pub struct DatasetRegistrationController {
    project_id: i64,
    form: StdMutex<RegistrationForm>,
    in_flight: AtomicBool,
}

impl DatasetRegistrationController {
    /// A controller for the listing's project, or the default project
    pub fn new(project_id: Option<i64>) -> Self {
        Self {
            project_id: project_id.unwrap_or(DEFAULT_PROJECT_ID),
            form: StdMutex::new(RegistrationForm::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    fn lock_form(&self) -> MutexGuard<'_, RegistrationForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current form contents
    pub fn form(&self) -> RegistrationForm {
        self.lock_form().clone()
    }

    /// Edit the form in place
    pub fn edit(&self, f: impl FnOnce(&mut RegistrationForm)) {
        f(&mut self.lock_form());
    }

    /// Discard the form (dialog cancelled)
    pub fn cancel(&self) {
        self.lock_form().clear();
    }

    /// Whether a submission is currently running
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether the submit action should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.lock_form().is_valid()
    }

    /// Submit the form
    ///
    /// On success the listing is re-fetched from the backend (the new row's
    /// display id depends on the whole collection), the form is cleared, and
    /// a success notification names the title. On failure the form is kept
    /// for another attempt and nothing is added to the listing.
    pub async fn submit(
        &self,
        backend: &dyn RegistryBackend,
        listing: &Mutex<DatasetListViewModel>,
    ) -> Result<Registered> {
        let _flight = FlightGuard::acquire(&self.in_flight, "dataset registration")?;

        let form = self.form();
        let request = form.to_request(self.project_id)?;

        let dataset = backend.create_dataset(request).await?;
        info!(dataset_id = dataset.id, project_id = dataset.project_id, "Dataset registered");

        let refreshed = match DatasetListViewModel::refresh_shared(listing, backend).await {
            Ok(LoadOutcome::Applied { .. }) => true,
            Ok(LoadOutcome::Stale) => false,
            Err(e) => {
                warn!(error = %e, "Dataset registered but the listing could not be refreshed");
                false
            },
        };

        // Only clear what was submitted; edits made meanwhile survive.
        {
            let mut current = self.lock_form();
            if *current == form {
                current.clear();
            }
        }

        Ok(Registered {
            notification: Self::success_notification(&form.title),
            dataset,
            refreshed,
        })
    }

    pub fn success_notification(title: &str) -> Notification {
        Notification::success(format!("Dataset '{}' created successfully!", title.trim()))
    }

    /// The toast for a failed submission
    pub fn failure_notification(error: &CliError) -> Notification {
        match error {
            CliError::InFlight(_) => Notification::info(error.to_string()),
            CliError::Validation(msg) => Notification::error(msg.clone()),
            CliError::Common(TdeError::Validation(msg)) => Notification::error(msg.clone()),
            _ => match error.server_detail() {
                Some(detail) => Notification::error(format!(
                    "Failed to create dataset. Please try again. ({detail})"
                )),
                None => Notification::error("Failed to create dataset. Please try again."),
            },
        }
    }
}
