//! Access to the inventory data collected by vSphereDB.
//!
//! The checks only see the [`Inventory`] trait: one typed method per query, each
//! returning the decoded row(s) or an error. [`MySqlInventory`] implements it over the
//! vSphereDB MySQL schema. Host queries match `machine` against the host name, datastore
//! queries match it against the vCenter name. Both use SQL `LIKE`, so `%` wildcards work.

#[cfg(test)]
mod fake;
mod mysql;

#[cfg(test)]
pub use fake::FakeInventory;
pub use mysql::{MySqlInventory, MySqlSettings};

use crate::Result;

/// CPU figures of one host, in MHz and cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCpu {
    pub overall_usage: i64,
    pub cpu_mhz: i64,
    pub cpu_cores: i64,
}

/// Memory figures of one host, in MB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostMemory {
    pub overall_usage_mb: i64,
    pub memory_size_mb: i64,
}

/// Capacity and free space of one datastore, in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastoreUsage {
    pub name: String,
    pub capacity: i64,
    pub free_space: i64,
}

/// Query interface over the vSphereDB inventory.
///
/// Single-row queries fail when no row matches.
#[expect(async_fn_in_trait, reason = "only used with concrete types on a current-thread runtime")]
pub trait Inventory {
    async fn host_cpu(&self, machine: &str) -> Result<HostCpu>;

    async fn host_memory(&self, machine: &str) -> Result<HostMemory>;

    /// Usage of the datastore `name` within the vCenter `vcenter`.
    async fn datastore(&self, vcenter: &str, name: &str) -> Result<DatastoreUsage>;

    /// Usage of every datastore within the vCenter `vcenter`, in database order. May be empty.
    async fn datastores(&self, vcenter: &str) -> Result<Vec<DatastoreUsage>>;

    async fn hba_count(&self, machine: &str) -> Result<i64>;

    async fn nic_count(&self, machine: &str) -> Result<i64>;

    /// Current reading of the sensor `sensor` on the host.
    async fn sensor_reading(&self, machine: &str, sensor: &str) -> Result<i64>;
}
