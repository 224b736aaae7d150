use super::{DatastoreUsage, HostCpu, HostMemory, Inventory};
use crate::Result;
use ohno::{app_err, bail};

/// In-memory inventory for tests. Absent data behaves like a query matching no row.
#[derive(Debug, Default)]
pub struct FakeInventory {
    pub cpu: Option<HostCpu>,
    pub memory: Option<HostMemory>,
    pub datastores: Vec<DatastoreUsage>,
    pub hbas: Option<i64>,
    pub nics: Option<i64>,
    pub sensors: Vec<(String, i64)>,

    /// When set, every query fails with this message.
    pub failure: Option<String>,
}

impl FakeInventory {
    fn check_failure(&self) -> Result<()> {
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(())
    }
}

fn missing(what: &str, machine: &str) -> ohno::AppError {
    app_err!("no {what} found matching '{machine}'")
}

impl Inventory for FakeInventory {
    async fn host_cpu(&self, machine: &str) -> Result<HostCpu> {
        self.check_failure()?;
        self.cpu.ok_or_else(|| missing("host", machine))
    }

    async fn host_memory(&self, machine: &str) -> Result<HostMemory> {
        self.check_failure()?;
        self.memory.ok_or_else(|| missing("host", machine))
    }

    async fn datastore(&self, _vcenter: &str, name: &str) -> Result<DatastoreUsage> {
        self.check_failure()?;
        self.datastores
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| missing("datastore", name))
    }

    async fn datastores(&self, _vcenter: &str) -> Result<Vec<DatastoreUsage>> {
        self.check_failure()?;
        Ok(self.datastores.clone())
    }

    async fn hba_count(&self, machine: &str) -> Result<i64> {
        self.check_failure()?;
        self.hbas.ok_or_else(|| missing("host", machine))
    }

    async fn nic_count(&self, machine: &str) -> Result<i64> {
        self.check_failure()?;
        self.nics.ok_or_else(|| missing("host", machine))
    }

    async fn sensor_reading(&self, machine: &str, sensor: &str) -> Result<i64> {
        self.check_failure()?;
        self.sensors
            .iter()
            .find(|(name, _)| name == sensor)
            .map(|(_, reading)| *reading)
            .ok_or_else(|| missing(&format!("sensor '{sensor}' on host"), machine))
    }
}
