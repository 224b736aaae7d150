//! check_vspheredb_data crate
//!
//! Monitoring plugin that reads the host inventory collected by the vSphereDB module
//! straight from its MySQL database and turns it into plugin results: a status
//! (`OK`, `WARNING`, `CRITICAL`, `UNKNOWN`), a one-line summary and performance data.
//!
//! # Module Organization
//!
//! - [`checks`]: Thresholds, status evaluation, result aggregation and the per-metric checks
//! - [`inventory`]: Access to the vSphereDB tables
//! - [`commands`]: Command-line interface, configuration and the top-level exit handling

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod checks;
pub mod commands;
pub mod inventory;

pub use crate::commands::{Host, run};
