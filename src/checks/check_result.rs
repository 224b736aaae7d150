use super::{CheckError, Overall, PerfdataList, Status};
use core::fmt;

/// Final outcome of one check invocation, rendered as plugin output.
///
/// The first output line is `[STATUS] - summary | perfdata`; detail lines (one per
/// sub-check of a multi-entity check) follow on their own lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub status: Status,
    pub summary: String,
    pub details: Vec<String>,
    pub perfdata: PerfdataList,
}

impl CheckResult {
    /// A single-value result with no detail lines.
    #[must_use]
    pub fn new(status: Status, summary: impl Into<String>, perfdata: PerfdataList) -> Self {
        Self {
            status,
            summary: summary.into(),
            details: Vec::new(),
            perfdata,
        }
    }

    /// Build the result of a multi-entity check from its aggregated sub-checks.
    #[must_use]
    pub fn from_overall(overall: &Overall, perfdata: PerfdataList) -> Self {
        Self {
            status: overall.overall_status(),
            summary: overall.status_summary(),
            details: overall.summary_output().lines().map(str::to_string).collect(),
            perfdata,
        }
    }

    /// A result reporting that no verdict could be reached.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Status::Unknown, message, PerfdataList::new())
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

impl From<CheckError> for CheckResult {
    fn from(err: CheckError) -> Self {
        Self::unknown(err.to_string())
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] - {}", self.status, self.summary)?;
        if !self.perfdata.is_empty() {
            write!(f, " | {}", self.perfdata)?;
        }

        for line in &self.details {
            write!(f, "\n{line}")?;
        }

        Ok(())
    }
}
