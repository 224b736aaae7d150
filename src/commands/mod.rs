//! Command-line interface of the plugin
//!
//! `run` parses the command line, resolves the connection settings (flags,
//! configuration file, credentials file), runs one check against the vSphereDB
//! database and reports its result. Each check is a subcommand:
//!
//! - **cpu**, **memory**: host utilization in percent
//! - **datastore**: used space of one datastore, or of all datastores of a vCenter
//! - **hba**, **nic**: minimum number of adapters
//! - **temperature**: reading of a host sensor
//!
//! Configuration is an optional TOML file (see `default_config.toml`) that can
//! change the connection defaults and every check's default thresholds.

mod check;
mod common;
mod config;
mod credentials;
mod host;
mod run;

pub use config::{Config, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use run::run;
