//! Settings shared by every check: database connection, credentials, configuration and logging.

use super::config::{Config, ThresholdConfig};
use super::credentials::Credentials;
use crate::Result;
use crate::checks::{CheckError, CheckResult, Thresholds};
use crate::inventory::{MySqlInventory, MySqlSettings};
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use core::time::Duration;
use ohno::{app_err, bail};

const LOG_TARGET: &str = "  common";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Connection and configuration arguments accepted by every check
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Host to check, or the vCenter for datastore checks (`%` wildcards allowed)
    #[arg(long, short = 'm', value_name = "NAME", global = true)]
    pub machine: Option<String>,

    /// Database host to connect to
    #[arg(long, short = 'H', value_name = "HOST", global = true)]
    pub host: Option<String>,

    /// Database port to connect to [default: 3306]
    #[arg(long, short = 'p', value_name = "PORT", global = true)]
    pub port: Option<u16>,

    /// Database name [default: vspheredb]
    #[arg(long, short = 'd', value_name = "NAME", global = true)]
    pub database: Option<String>,

    /// Database username [default: vspheredb]
    #[arg(long, short = 'u', value_name = "USER", global = true)]
    pub username: Option<String>,

    /// Database password [default: vspheredb]
    #[arg(long, short = 'P', value_name = "PASSWORD", global = true)]
    pub password: Option<String>,

    /// Path to a JSON credentials file, overriding username and password
    #[arg(long, short = 'f', value_name = "PATH", global = true)]
    pub credentials_file: Option<Utf8PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH", env = "CHECK_VSPHEREDB_CONFIG", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Seconds allowed for connecting and querying [default: 30]
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..), global = true)]
    pub timeout: Option<u64>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Warning and critical thresholds given on the command line
#[derive(Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Warning threshold, e.g. `80`, `10:`, `~:50` or `@10:20`
    #[arg(long, short = 'w', value_name = "THRESHOLD", allow_hyphen_values = true)]
    pub warning: Option<String>,

    /// Critical threshold, e.g. `90`, `5:`, `~:60` or `@10:20`
    #[arg(long, short = 'c', value_name = "THRESHOLD", allow_hyphen_values = true)]
    pub critical: Option<String>,
}

impl ThresholdArgs {
    /// Thresholds of a "too much is bad" metric, falling back to the configured ones.
    pub fn resolve(&self, configured: &ThresholdConfig) -> Result<Thresholds, CheckError> {
        let (warning, critical) = self.pick(configured);
        Thresholds::parse(Some(warning), Some(critical)).map_err(CheckError::Configuration)
    }

    /// Thresholds of a "fewer is worse" metric, falling back to the configured ones.
    pub fn resolve_minimum(&self, configured: &ThresholdConfig) -> Result<Thresholds, CheckError> {
        let (warning, critical) = self.pick(configured);
        Thresholds::parse_minimum(Some(warning), Some(critical)).map_err(CheckError::Configuration)
    }

    fn pick<'a>(&'a self, configured: &'a ThresholdConfig) -> (&'a str, &'a str) {
        (
            self.warning.as_deref().unwrap_or(&configured.warning),
            self.critical.as_deref().unwrap_or(&configured.critical),
        )
    }
}

/// Resolved settings of one plugin invocation.
#[derive(Debug)]
pub struct Common {
    pub machine: String,
    pub config: Config,
    settings: MySqlSettings,
    timeout: Duration,
}

impl Common {
    /// Resolve settings from the command line, the configuration file and the credentials file.
    ///
    /// Credentials file values win over command-line flags, which win over the
    /// configuration file, which wins over the built-in defaults.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let Some(machine) = args.machine.clone().filter(|m| !m.is_empty()) else {
            bail!("--machine flag is required");
        };

        let config = Config::load(args.config.as_deref())?;

        let Some(host) = args
            .host
            .clone()
            .or_else(|| config.database.host.clone())
            .filter(|h| !h.is_empty())
        else {
            bail!("--host flag is required");
        };

        let mut username = args.username.clone().unwrap_or_else(|| config.database.username.clone());
        let mut password = args.password.clone().unwrap_or_else(|| config.database.password.clone());

        if let Some(path) = args.credentials_file.as_deref().or(config.database.credentials_file.as_deref()) {
            log::debug!(target: LOG_TARGET, "Reading credentials from '{path}'");
            let credentials = Credentials::load(path)?;
            username = credentials.username;
            password = credentials.password;
        }

        let settings = MySqlSettings {
            host,
            port: args.port.unwrap_or(config.database.port),
            database: args.database.clone().unwrap_or_else(|| config.database.name.clone()),
            username,
            password,
        };

        let timeout = Duration::from_secs(args.timeout.unwrap_or(config.database.timeout));
        log::debug!(target: LOG_TARGET, "Checking '{machine}' using {settings:?}, timeout {}s", timeout.as_secs());

        Ok(Self {
            machine,
            config,
            settings,
            timeout,
        })
    }

    /// Connect to the database and run `check` against it, all within the configured timeout.
    pub async fn run_check<F>(&self, check: F) -> Result<CheckResult, CheckError>
    where
        F: AsyncFnOnce(&MySqlInventory) -> Result<CheckResult, CheckError>,
    {
        let work = async {
            let inventory = MySqlInventory::connect(&self.settings)
                .await
                .map_err(CheckError::DataAccess)?;
            let result = check(&inventory).await;
            inventory.close().await;
            result
        };

        tokio::time::timeout(self.timeout, work).await.map_err(|e| {
            CheckError::DataAccess(app_err!("check did not complete within {}s: {e}", self.timeout.as_secs()))
        })?
    }
}

/// Install the stderr logger for `log_level`; `RUST_LOG` can refine the filter.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when running more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .target(env_logger::Target::Stderr)
        .try_init();
}
