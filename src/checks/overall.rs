use super::Status;
use core::fmt::Write;

/// Evaluation of one entity within a multi-entity check (e.g. one datastore).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Subcheck {
    output: String,
    status: Status,
}

/// Combines independent sub-check results into one verdict using a worst-status-wins rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overall {
    subchecks: Vec<Subcheck>,
}

impl Overall {
    /// An aggregator with no sub-checks yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { subchecks: Vec::new() }
    }

    /// Record the outcome of one entity; order of insertion is the order of output.
    pub fn add_subcheck(&mut self, output: impl Into<String>, status: Status) {
        self.subchecks.push(Subcheck {
            output: output.into(),
            status,
        });
    }

    /// The most severe status among the sub-checks, or `Unknown` when nothing was checked.
    #[must_use]
    pub fn overall_status(&self) -> Status {
        self.subchecks
            .iter()
            .map(|s| s.status)
            .reduce(Status::worst)
            .unwrap_or(Status::Unknown)
    }

    /// Count of sub-checks per state, most severe first, e.g. `states: warning=1 ok=2`.
    #[must_use]
    pub fn status_summary(&self) -> String {
        let mut summary = String::from("states:");
        for status in [Status::Critical, Status::Unknown, Status::Warning, Status::Ok] {
            let count = self.subchecks.iter().filter(|s| s.status == status).count();
            if count > 0 {
                let _ = write!(summary, " {}={count}", status.to_string().to_lowercase());
            }
        }
        summary
    }

    /// One line per sub-check, in insertion order.
    #[must_use]
    pub fn summary_output(&self) -> String {
        let mut output = String::new();
        for (index, subcheck) in self.subchecks.iter().enumerate() {
            if index > 0 {
                output.push('\n');
            }
            let _ = write!(output, "\\_ [{}] {}", subcheck.status, subcheck.output);
        }
        output
    }
}
