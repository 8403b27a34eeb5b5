//! OpsGenie integration.
//!
//! Provides [`OpsGenieClient`] for raising alerts and checking connectivity.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_SETTLE_DELAY, OpsGenieClient, alert_alias};
pub use error::OpsGenieError;
pub use types::{ALERT_ENTITY, CreateAlertRequest, Responder};
