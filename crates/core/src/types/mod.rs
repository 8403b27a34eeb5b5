//! Core types for the incident bridge.
//!
//! This module provides the domain model shared between the Slack and
//! OpsGenie sides of the bridge.

pub mod alert;
pub mod incident;
pub mod priority;

pub use alert::{ALERT_SOURCE, ALERT_TAG, Alert, AlertCreationResult, Reporter, Team};
pub use incident::{ChannelContext, IncidentSubmission};
pub use priority::{ParseLevelError, Priority, Urgency, priority_for_urgency};
