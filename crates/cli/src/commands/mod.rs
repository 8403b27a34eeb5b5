//! CLI command implementations.

pub mod config;
pub mod opsgenie;
pub mod sign;
