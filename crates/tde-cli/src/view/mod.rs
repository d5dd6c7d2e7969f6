//! View models
//!
//! Everything the dashboard derives from backend responses before display:
//! display ids and recency badges, flattened file rows, human-readable sizes,
//! code snippets, and the state behind the registration and upload actions.
//! Nothing in here knows how the result is drawn.

pub mod clock;
pub mod datasets;
pub mod detail;
pub mod files;
pub mod notification;
pub mod registration;
pub mod sequence;
pub mod size;
pub mod snippet;
pub mod upload;

mod single_flight;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datasets::{DatasetListViewModel, DisplayDataset, LoadOutcome};
pub use detail::DatasetDetail;
pub use files::{FileAggregate, FilesViewModel, FlatFile};
pub use notification::{Notification, Severity};
pub use registration::{DatasetRegistrationController, Registered, RegistrationForm};
pub use size::{bytes_of, format_size, ProjectSummaryView};
pub use snippet::{python_snippet, r_snippet, SnippetLanguage};
pub use upload::{UploadController, UploadOutcome};
