//! Incident Bridge server library.
//!
//! Receives Slack slash commands and interactions, opens an incident
//! report modal, and raises the submitted incident as an OpsGenie alert.
//!
//! The library exposes every component so the binary and the integration
//! tests can wire the same router against real or mocked upstreams.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod opsgenie;
pub mod routes;
pub mod services;
pub mod slack;
pub mod state;
