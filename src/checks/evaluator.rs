//! Status evaluation against warning/critical thresholds, plus the usage ratios the checks report.

use super::{Status, Threshold};
use crate::Result;
use ohno::{app_err, bail};

/// Warning and critical thresholds of one metric. Either may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thresholds {
    pub warning: Option<Threshold>,
    pub critical: Option<Threshold>,
}

impl Thresholds {
    /// Parse the warning and critical ranges of a "too much is bad" metric.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending range if either fails to parse.
    pub fn parse(warning: Option<&str>, critical: Option<&str>) -> Result<Self> {
        Ok(Self {
            warning: warning.map(Threshold::parse).transpose()?,
            critical: critical.map(Threshold::parse).transpose()?,
        })
    }

    /// Parse the thresholds of a "fewer is worse" metric.
    ///
    /// The user gives plain minimum counts (`2`, `1`); each becomes the open range `N:`
    /// so that falling below the count is the violation.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending range if either fails to parse.
    pub fn parse_minimum(warning: Option<&str>, critical: Option<&str>) -> Result<Self> {
        let as_minimum = |spec: &str| Threshold::parse(&format!("{spec}:"));
        Ok(Self {
            warning: warning.map(as_minimum).transpose()?,
            critical: critical.map(as_minimum).transpose()?,
        })
    }

    #[must_use]
    pub fn evaluate(&self, value: f64) -> Status {
        evaluate(value, self.warning.as_ref(), self.critical.as_ref())
    }

    /// Evaluate an integer measurement.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "measurements are far below 2^53")]
    pub fn evaluate_integer(&self, value: i64) -> Status {
        self.evaluate(value as f64)
    }
}

/// Classify `value` against optional warning and critical thresholds.
///
/// A critical violation wins regardless of the warning threshold; the two are not
/// required to be nested. An absent threshold never raises the status.
#[must_use]
pub fn evaluate(value: f64, warning: Option<&Threshold>, critical: Option<&Threshold>) -> Status {
    if critical.is_some_and(|t| t.does_violate(value)) {
        Status::Critical
    } else if warning.is_some_and(|t| t.does_violate(value)) {
        Status::Warning
    } else {
        Status::Ok
    }
}

/// CPU usage in percent: `used * 100 / (cores * mhz)`, truncated toward zero.
///
/// # Errors
///
/// Returns an error if the host reports zero cores or zero MHz, or if the result does not fit in an `i64`.
pub fn cpu_usage_percent(used: i64, cores: i64, mhz: i64) -> Result<i64> {
    let capacity = i128::from(cores) * i128::from(mhz);
    if capacity == 0 {
        bail!("host reports {cores} CPU cores at {mhz} MHz, cannot compute CPU usage");
    }

    i64::try_from(i128::from(used) * 100 / capacity)
        .map_err(|e| app_err!("CPU usage percentage is out of range: {e}"))
}

/// Memory usage in percent: `used_mb * 100 / total_mb`, truncated toward zero.
///
/// # Errors
///
/// Returns an error if the host reports a memory size of zero, or if the result does not fit in an `i64`.
pub fn memory_usage_percent(used_mb: i64, total_mb: i64) -> Result<i64> {
    if total_mb == 0 {
        bail!("host reports a memory size of 0 MB, cannot compute memory usage");
    }

    i64::try_from(i128::from(used_mb) * 100 / i128::from(total_mb))
        .map_err(|e| app_err!("memory usage percentage is out of range: {e}"))
}

/// Datastore usage in percent: `(capacity - free) * 100 / capacity`, or 0 for a zero-capacity datastore.
#[must_use]
pub fn datastore_usage_percent(capacity: i64, free_space: i64) -> i64 {
    if capacity == 0 {
        return 0;
    }

    let percent = (i128::from(capacity) - i128::from(free_space)) * 100 / i128::from(capacity);
    i64::try_from(percent).unwrap_or(if percent < 0 { i64::MIN } else { i64::MAX })
}

/// Scale a raw MHz or MB figure to GHz or GB for display.
#[must_use]
pub const fn scale_for_display(value: i64) -> i64 {
    value / 1024
}
