//! Number of host bus adapters and network interfaces of a host.
//!
//! Fewer adapters than expected is the failure: the thresholds are minimum counts,
//! built with [`Thresholds::parse_minimum`].

use super::{CheckError, CheckResult, Perfdata, PerfdataList, Thresholds};
use crate::inventory::Inventory;

/// Kind of adapter being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    Hba,
    Nic,
}

impl Adapter {
    const fn label(self) -> &'static str {
        match self {
            Self::Hba => "hbas",
            Self::Nic => "nics",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Hba => "HBAs",
            Self::Nic => "NICs",
        }
    }
}

/// Query the adapter count of `machine` and evaluate it.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the query fails or the host does not exist.
pub async fn run(
    inventory: &impl Inventory,
    adapter: Adapter,
    machine: &str,
    thresholds: &Thresholds,
) -> Result<CheckResult, CheckError> {
    let count = match adapter {
        Adapter::Hba => inventory.hba_count(machine).await,
        Adapter::Nic => inventory.nic_count(machine).await,
    }
    .map_err(CheckError::DataAccess)?;

    Ok(evaluate(adapter, count, thresholds))
}

/// Evaluate an adapter count against minimum-count thresholds.
#[must_use]
pub fn evaluate(adapter: Adapter, count: i64, thresholds: &Thresholds) -> CheckResult {
    let mut perfdata = PerfdataList::new();
    perfdata.push(Perfdata::new(adapter.label(), count).with_thresholds(thresholds));

    CheckResult::new(
        thresholds.evaluate_integer(count),
        format!("Number of {}: {count}", adapter.name()),
        perfdata,
    )
}
