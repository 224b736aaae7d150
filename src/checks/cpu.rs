use super::{CheckError, CheckResult, Perfdata, PerfdataList, Thresholds, cpu_usage_percent, scale_for_display};
use crate::inventory::{HostCpu, Inventory};

/// Query the CPU statistics of `machine` and evaluate them.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the query fails or the statistics cannot be interpreted.
pub async fn run(inventory: &impl Inventory, machine: &str, thresholds: &Thresholds) -> Result<CheckResult, CheckError> {
    let cpu = inventory.host_cpu(machine).await.map_err(CheckError::DataAccess)?;
    evaluate(&cpu, thresholds)
}

/// Classify CPU usage as a percentage of the host's total capacity.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the host reports no CPU capacity.
pub fn evaluate(cpu: &HostCpu, thresholds: &Thresholds) -> Result<CheckResult, CheckError> {
    let percent = cpu_usage_percent(cpu.overall_usage, cpu.cpu_cores, cpu.cpu_mhz).map_err(CheckError::DataAccess)?;

    let mut perfdata = PerfdataList::new();
    perfdata.push(Perfdata::new("usage", cpu.overall_usage));
    perfdata.push(Perfdata::new("usage_percent", percent).with_unit("%").with_thresholds(thresholds));
    perfdata.push(Perfdata::new("mhz", cpu.cpu_mhz));
    perfdata.push(Perfdata::new("cores", cpu.cpu_cores));

    Ok(CheckResult::new(
        thresholds.evaluate_integer(percent),
        format!(
            "Total CPU usage is {}GHz ({percent}%)",
            scale_for_display(cpu.overall_usage)
        ),
        perfdata,
    ))
}
