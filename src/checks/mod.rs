//! Threshold evaluation and result aggregation shared by every check.
//!
//! A check turns raw inventory figures into a [`CheckResult`]: it computes the measured
//! value, records it as [`Perfdata`], and classifies it against the user's
//! [`Thresholds`]. Multi-entity checks evaluate every entity separately and combine
//! the verdicts through [`Overall`].

pub mod adapters;
mod check_error;
mod check_result;
pub mod cpu;
pub mod datastore;
mod evaluator;
pub mod memory;
mod overall;
mod perfdata;
mod status;
pub mod temperature;
mod threshold;

pub use check_error::CheckError;
pub use check_result::CheckResult;
pub use evaluator::{
    Thresholds, cpu_usage_percent, datastore_usage_percent, evaluate, memory_usage_percent, scale_for_display,
};
pub use overall::Overall;
pub use perfdata::{Perfdata, PerfdataList};
pub use status::Status;
pub use threshold::Threshold;
