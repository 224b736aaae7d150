//! Used space of one datastore, or of every datastore of a vCenter.

use super::{CheckError, CheckResult, Overall, Perfdata, PerfdataList, Status, Thresholds, datastore_usage_percent};
use crate::inventory::{DatastoreUsage, Inventory};
use ohno::app_err;

fn usage_perfdata(datastore: &DatastoreUsage, percent: i64, thresholds: &Thresholds) -> Perfdata {
    Perfdata::new(format!("{}_used", datastore.name), percent)
        .with_unit("%")
        .with_thresholds(thresholds)
        .with_range(0, 100)
}

/// Query one datastore of the vCenter `vcenter` and evaluate it.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the query fails or the datastore does not exist.
pub async fn run_single(
    inventory: &impl Inventory,
    vcenter: &str,
    name: &str,
    thresholds: &Thresholds,
) -> Result<CheckResult, CheckError> {
    let datastore = inventory.datastore(vcenter, name).await.map_err(CheckError::DataAccess)?;
    Ok(evaluate_single(&datastore, thresholds))
}

/// Query every datastore of the vCenter `vcenter` and evaluate them together.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if the query fails or two datastores share a name.
pub async fn run_all(inventory: &impl Inventory, vcenter: &str, thresholds: &Thresholds) -> Result<CheckResult, CheckError> {
    let datastores = inventory.datastores(vcenter).await.map_err(CheckError::DataAccess)?;
    evaluate_all(&datastores, thresholds)
}

/// Evaluate the used space of one datastore.
#[must_use]
pub fn evaluate_single(datastore: &DatastoreUsage, thresholds: &Thresholds) -> CheckResult {
    let percent = datastore_usage_percent(datastore.capacity, datastore.free_space);

    let mut perfdata = PerfdataList::new();
    perfdata.push(usage_perfdata(datastore, percent, thresholds));

    CheckResult::new(
        thresholds.evaluate_integer(percent),
        format!("Used storage space for datastore {}: {percent}%", datastore.name),
        perfdata,
    )
}

/// Evaluate each datastore on its own and combine the verdicts, worst status first.
///
/// An empty list yields `UNKNOWN`: nothing was checked.
///
/// # Errors
///
/// Returns [`CheckError::DataAccess`] if two datastores share a name, since their
/// performance data would be indistinguishable.
pub fn evaluate_all(datastores: &[DatastoreUsage], thresholds: &Thresholds) -> Result<CheckResult, CheckError> {
    if datastores.is_empty() {
        return Ok(CheckResult::new(Status::Unknown, "No datastores found", PerfdataList::new()));
    }

    let mut overall = Overall::new();
    let mut perfdata = PerfdataList::new();

    for datastore in datastores {
        let percent = datastore_usage_percent(datastore.capacity, datastore.free_space);
        let item = usage_perfdata(datastore, percent, thresholds);
        if perfdata.contains_label(&item.label) {
            return Err(CheckError::DataAccess(app_err!(
                "datastore '{}' appears more than once",
                datastore.name
            )));
        }

        perfdata.push(item);
        overall.add_subcheck(
            format!("Used storage for datastore {}: {percent}%", datastore.name),
            thresholds.evaluate_integer(percent),
        );
    }

    Ok(CheckResult::from_overall(&overall, perfdata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::FakeInventory;

    fn defaults() -> Thresholds {
        Thresholds::parse(Some("80"), Some("90")).unwrap()
    }

    fn datastore(name: &str, capacity: i64, free_space: i64) -> DatastoreUsage {
        DatastoreUsage {
            name: name.to_string(),
            capacity,
            free_space,
        }
    }

    #[test]
    fn test_single_datastore() {
        let result = evaluate_single(&datastore("ds1", 1000, 150), &defaults());
        assert_eq!(result.status, Status::Warning);
        insta::assert_snapshot!(result, @"[WARNING] - Used storage space for datastore ds1: 85% | ds1_used=85%;80;90;0;100");
    }

    #[test]
    fn test_zero_capacity_is_zero_percent() {
        let result = evaluate_single(&datastore("empty", 0, 0), &defaults());
        assert_eq!(result.status, Status::Ok);
        assert!(result.summary.ends_with(": 0%"));
    }

    #[test]
    fn test_all_datastores_aggregate() {
        let datastores = [
            datastore("ds1", 1000, 500),
            datastore("ds2", 1000, 50),
            datastore("ds3", 1000, 900),
        ];
        let result = evaluate_all(&datastores, &defaults()).unwrap();
        assert_eq!(result.status, Status::Critical);
        insta::assert_snapshot!(result, @r"
        [CRITICAL] - states: critical=1 ok=2 | ds1_used=50%;80;90;0;100 ds2_used=95%;80;90;0;100 ds3_used=10%;80;90;0;100
        \_ [OK] Used storage for datastore ds1: 50%
        \_ [CRITICAL] Used storage for datastore ds2: 95%
        \_ [OK] Used storage for datastore ds3: 10%
        ");
    }

    #[test]
    fn test_no_datastores_is_unknown() {
        let result = evaluate_all(&[], &defaults()).unwrap();
        assert_eq!(result.status, Status::Unknown);
        assert_eq!(result.to_string(), "[UNKNOWN] - No datastores found");
    }

    #[test]
    fn test_duplicate_name_is_a_data_error() {
        let datastores = [datastore("ds1", 1000, 500), datastore("ds1", 2000, 500)];
        let err = evaluate_all(&datastores, &defaults()).unwrap_err();
        assert!(matches!(err, CheckError::DataAccess(_)));
        assert!(err.to_string().contains("'ds1'"));
    }

    #[tokio::test]
    async fn test_run_single_and_all() {
        let inventory = FakeInventory {
            datastores: vec![datastore("ds1", 1000, 500), datastore("ds2", 1000, 950)],
            ..FakeInventory::default()
        };

        let single = run_single(&inventory, "vcenter1", "ds2", &defaults()).await.unwrap();
        assert_eq!(single.status, Status::Ok);
        assert!(single.summary.contains("ds2: 5%"));

        let all = run_all(&inventory, "vcenter1", &defaults()).await.unwrap();
        assert_eq!(all.status, Status::Ok);
        assert_eq!(all.details.len(), 2);

        let err = run_single(&inventory, "vcenter1", "ds9", &defaults()).await.unwrap_err();
        assert!(matches!(err, CheckError::DataAccess(_)));
    }
}
