use super::{Threshold, Thresholds};
use core::fmt;

/// A single labeled measurement reported alongside the check summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Perfdata {
    pub label: String,
    pub value: i64,
    pub unit: Option<&'static str>,
    pub warning: Option<Threshold>,
    pub critical: Option<Threshold>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Perfdata {
    /// A data point with no unit, thresholds or range.
    #[must_use]
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
            unit: None,
            warning: None,
            critical: None,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: &Thresholds) -> Self {
        self.warning = thresholds.warning;
        self.critical = thresholds.critical;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

impl fmt::Display for Perfdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, &self.label)?;
        write!(f, "={}{}", self.value, self.unit.unwrap_or_default())?;

        let fields = [
            self.warning.map(|t| t.to_string()),
            self.critical.map(|t| t.to_string()),
            self.min.map(|v| v.to_string()),
            self.max.map(|v| v.to_string()),
        ];

        // trailing empty fields are omitted
        let used = fields.iter().rposition(Option::is_some).map_or(0, |last| last + 1);
        for field in &fields[..used] {
            write!(f, ";{}", field.as_deref().unwrap_or_default())?;
        }

        Ok(())
    }
}

fn write_label(f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
    if label.chars().any(|c| c.is_whitespace() || c == '=' || c == '\'') {
        write!(f, "'{}'", label.replace('\'', "''"))
    } else {
        f.write_str(label)
    }
}

/// Ordered, append-only list of performance data for one check invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerfdataList {
    items: Vec<Perfdata>,
}

impl PerfdataList {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a data point. Labels must be unique within the list.
    pub fn push(&mut self, perfdata: Perfdata) {
        debug_assert!(
            !self.contains_label(&perfdata.label),
            "duplicate perfdata label '{}'",
            perfdata.label
        );
        self.items.push(perfdata);
    }

    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.items.iter().any(|p| p.label == label)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

}

impl fmt::Display for PerfdataList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, perfdata) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{perfdata}")?;
        }
        Ok(())
    }
}
