use crate::Result;
use crate::checks::Thresholds;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{app_err, bail};
use serde::Deserialize;
use std::fs;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Plugin configuration. A configuration file only needs to name the values it changes;
/// everything else comes from [`DEFAULT_CONFIG_TOML`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub cpu: ThresholdConfig,
    pub memory: ThresholdConfig,
    pub datastore: ThresholdConfig,

    /// Minimum number of host bus adapters
    pub hba: ThresholdConfig,

    /// Minimum number of network interfaces
    pub nic: ThresholdConfig,

    pub temperature: TemperatureConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database server; has no default and must come from here or `--host`
    #[serde(default)]
    pub host: Option<String>,
    pub port: u16,
    pub name: String,
    pub username: String,
    pub password: String,

    /// JSON file holding `username` and `password`, taking precedence over both
    #[serde(default)]
    pub credentials_file: Option<Utf8PathBuf>,

    /// Seconds allowed for connecting and querying
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    pub warning: String,
    pub critical: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemperatureConfig {
    pub warning: String,
    pub critical: String,

    /// Name of the host sensor to read
    pub sensor: String,
}

impl TemperatureConfig {
    /// The warning and critical ranges, without the sensor name.
    #[must_use]
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig {
            warning: self.warning.clone(),
            critical: self.critical.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file, or use the defaults when no file is given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|e| app_err!("could not read configuration file '{path}': {e}"))?;
        Self::parse(&text).map_err(|e| app_err!("invalid configuration file '{path}': {}", e.message()))
    }

    /// Parse configuration text layered over the defaults, then validate it
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, names unknown settings, or holds invalid values
    pub fn parse(text: &str) -> Result<Self> {
        let mut merged: toml::Table = toml::from_str(DEFAULT_CONFIG_TOML)
            .map_err(|e: toml::de::Error| app_err!("default configuration is not valid TOML: {}", e.message()))?;
        let overrides: toml::Table = toml::from_str(text).map_err(|e: toml::de::Error| toml_err(text, &e))?;
        merge_tables(&mut merged, overrides);

        let config: Self = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| app_err!("{}", e.message()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error naming the first setting that is out of range or does not parse
    pub fn validate(&self) -> Result<()> {
        if self.database.port == 0 {
            bail!("database.port must not be 0");
        }

        if self.database.timeout == 0 {
            bail!("database.timeout must be at least 1 second");
        }

        let temperature = self.temperature.thresholds();
        for (section, thresholds) in [
            ("cpu", &self.cpu),
            ("memory", &self.memory),
            ("datastore", &self.datastore),
            ("temperature", &temperature),
        ] {
            let _ = Thresholds::parse(Some(thresholds.warning.as_str()), Some(thresholds.critical.as_str()))
                .map_err(|e| app_err!("invalid thresholds in [{section}]: {}", e.message()))?;
        }

        for (section, thresholds) in [("hba", &self.hba), ("nic", &self.nic)] {
            let _ = Thresholds::parse_minimum(Some(thresholds.warning.as_str()), Some(thresholds.critical.as_str()))
                .map_err(|e| app_err!("invalid thresholds in [{section}]: {}", e.message()))?;
        }

        if self.temperature.sensor.trim().is_empty() {
            bail!("temperature.sensor must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

/// One-line description of a TOML syntax error, with the line it was found on.
fn toml_err(text: &str, e: &toml::de::Error) -> ohno::AppError {
    match e.span() {
        Some(span) => {
            let line = text.bytes().take(span.start).filter(|b| *b == b'\n').count() + 1;
            app_err!("TOML syntax error on line {line}: {}", e.message())
        }
        None => app_err!("TOML syntax error: {}", e.message()),
    }
}

/// Overlay `overrides` onto `base`, descending into tables present in both.
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        if let toml::Value::Table(table) = value {
            if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                merge_tables(base_table, table);
                continue;
            }
            let _ = base.insert(key, toml::Value::Table(table));
        } else {
            let _ = base.insert(key, value);
        }
    }
}
