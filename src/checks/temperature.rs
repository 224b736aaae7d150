use super::{CheckError, CheckResult, Perfdata, PerfdataList, Thresholds};
use crate::inventory::Inventory;

/// Query the current reading of `sensor` on `machine` and evaluate it.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the query fails or the sensor does not exist.
pub async fn run(
    inventory: &impl Inventory,
    machine: &str,
    sensor: &str,
    thresholds: &Thresholds,
) -> Result<CheckResult, CheckError> {
    let reading = inventory
        .sensor_reading(machine, sensor)
        .await
        .map_err(CheckError::DataAccess)?;

    Ok(evaluate(reading, thresholds))
}

/// Evaluate a sensor reading in °C.
#[must_use]
pub fn evaluate(reading: i64, thresholds: &Thresholds) -> CheckResult {
    let mut perfdata = PerfdataList::new();
    perfdata.push(Perfdata::new("temp", reading).with_unit("C").with_thresholds(thresholds));

    CheckResult::new(
        thresholds.evaluate_integer(reading),
        format!("Temperature is {reading}°C"),
        perfdata,
    )
}
