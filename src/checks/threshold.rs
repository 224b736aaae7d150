//! Monitoring-plugin range syntax
//!
//! | spec    | violates when            |
//! |---------|--------------------------|
//! | `10`    | `v < 0` or `v > 10`      |
//! | `10:`   | `v < 10`                 |
//! | `~:10`  | `v > 10`                 |
//! | `10:20` | `v < 10` or `v > 20`     |
//! | `@10:20`| `10 <= v <= 20`          |

use crate::Result;
use core::fmt;
use core::str::FromStr;
use ohno::{app_err, bail};
use regex::Regex;
use std::sync::LazyLock;

static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(@)?(?:(~|[-+]?\d+(?:\.\d+)?)?(:))?([-+]?\d+(?:\.\d+)?)?$").expect("invalid regex"));

/// An acceptable value range parsed from range syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    /// Violation means "inside the range" instead of "outside the range"
    pub inverted: bool,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Threshold {
    /// Parse a range such as `80`, `2:`, `~:50`, `10:20` or `@10:20`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not range-shaped or if the lower bound exceeds the upper bound.
    pub fn parse(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        let Some(captures) = RANGE_REGEX.captures(trimmed) else {
            bail!("invalid threshold '{spec}'");
        };

        let lower = captures.get(2).map(|m| m.as_str());
        let upper = captures.get(4).map(|m| m.as_str());
        if lower.is_none() && upper.is_none() {
            bail!("invalid threshold '{spec}': no bound given");
        }

        let lower_bound = match lower {
            None => 0.0,
            Some("~") => f64::NEG_INFINITY,
            Some(text) => parse_bound(spec, text)?,
        };

        let upper_bound = match upper {
            None => f64::INFINITY,
            Some(text) => parse_bound(spec, text)?,
        };

        if lower_bound > upper_bound {
            return Err(app_err!(
                "invalid threshold '{spec}': lower bound {lower_bound} is greater than upper bound {upper_bound}"
            ));
        }

        Ok(Self {
            inverted: captures.get(1).is_some(),
            lower_bound,
            upper_bound,
        })
    }

    /// Whether `value` falls outside the acceptable range.
    #[must_use]
    pub fn does_violate(&self, value: f64) -> bool {
        let inside = value >= self.lower_bound && value <= self.upper_bound;
        if self.inverted { inside } else { !inside }
    }
}

fn parse_bound(spec: &str, text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|e| app_err!("invalid threshold '{spec}': '{text}' is not a number ({e})"))
}

impl FromStr for Threshold {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("@")?;
        }

        if self.lower_bound == f64::NEG_INFINITY {
            f.write_str("~:")?;
        } else if self.lower_bound != 0.0 || self.upper_bound.is_infinite() {
            write!(f, "{}:", self.lower_bound)?;
        }

        if self.upper_bound.is_finite() {
            write!(f, "{}", self.upper_bound)?;
        }

        Ok(())
    }
}
