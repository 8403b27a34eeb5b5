//! Incident reporting services.
//!
//! # Services
//!
//! - `incident` - Command-to-modal and submission-to-alert orchestration
//! - `notifier` - Outcome DMs to the reporting user
//! - `submission` - Mapping of modal submissions to alerts

pub mod incident;
pub mod notifier;
pub mod submission;

pub use incident::IncidentService;
pub use notifier::{Notification, Notifier};
pub use submission::{SubmissionError, build_alert, extract_submission, map_submission};
