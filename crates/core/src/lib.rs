//! Incident Bridge Core - Shared domain types.
//!
//! This crate provides the types shared by the bridge components:
//! - `server` - Slack webhook receiver and OpsGenie alert client
//! - `cli` - Operator tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Urgency/priority mapping, alerts, and incident submissions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
