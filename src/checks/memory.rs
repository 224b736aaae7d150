use super::{CheckError, CheckResult, Perfdata, PerfdataList, Thresholds, memory_usage_percent, scale_for_display};
use crate::inventory::{HostMemory, Inventory};
use ohno::app_err;

/// Query the memory statistics of `machine` and evaluate them.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the query fails or the statistics cannot be interpreted.
pub async fn run(inventory: &impl Inventory, machine: &str, thresholds: &Thresholds) -> Result<CheckResult, CheckError> {
    let memory = inventory.host_memory(machine).await.map_err(CheckError::DataAccess)?;
    evaluate(&memory, thresholds)
}

/// Classify memory usage as a percentage of the host's installed memory.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the host reports no memory.
pub fn evaluate(memory: &HostMemory, thresholds: &Thresholds) -> Result<CheckResult, CheckError> {
    let percent = memory_usage_percent(memory.overall_usage_mb, memory.memory_size_mb).map_err(CheckError::DataAccess)?;
    let usage_bytes = memory
        .overall_usage_mb
        .checked_mul(1024 * 1024)
        .ok_or_else(|| CheckError::DataAccess(app_err!("memory usage of {} MB is out of range", memory.overall_usage_mb)))?;

    let mut perfdata = PerfdataList::new();
    perfdata.push(Perfdata::new("usage", usage_bytes).with_unit("B"));
    perfdata.push(
        Perfdata::new("usage_percent", percent)
            .with_unit("%")
            .with_thresholds(thresholds)
            .with_range(0, 100),
    );

    Ok(CheckResult::new(
        thresholds.evaluate_integer(percent),
        format!(
            "Total Memory usage is {}GB ({percent}%)",
            scale_for_display(memory.overall_usage_mb)
        ),
        perfdata,
    ))
}
