use super::{DatastoreUsage, HostCpu, HostMemory, Inventory};
use crate::Result;
use core::fmt;
use ohno::app_err;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{ConnectOptions, Connection, MySqlConnection};
use std::time::Instant;
use tokio::sync::Mutex;

const LOG_TARGET: &str = "inventory";

const HOST_CPU_QUERY: &str = "SELECT CAST(hqs.overall_cpu_usage AS SIGNED), \
     CAST(hs.hardware_cpu_mhz AS SIGNED), \
     CAST(hs.hardware_cpu_cores AS SIGNED) \
     FROM host_quick_stats hqs \
     INNER JOIN host_system hs ON hqs.uuid = hs.uuid \
     WHERE hs.host_name LIKE ?";

const HOST_MEMORY_QUERY: &str = "SELECT CAST(hqs.overall_memory_usage_mb AS SIGNED), \
     CAST(hs.hardware_memory_size_mb AS SIGNED) \
     FROM host_quick_stats hqs \
     INNER JOIN host_system hs ON hqs.uuid = hs.uuid \
     WHERE hs.host_name LIKE ?";

const DATASTORE_QUERY: &str = "SELECT CAST(ds.capacity AS SIGNED), CAST(ds.free_space AS SIGNED) \
     FROM datastore ds \
     INNER JOIN vcenter vc ON ds.vcenter_uuid = vc.instance_uuid \
     INNER JOIN object o ON ds.uuid = o.uuid \
     WHERE o.object_name LIKE ? AND vc.name LIKE ?";

const DATASTORES_QUERY: &str = "SELECT o.object_name, CAST(ds.capacity AS SIGNED), CAST(ds.free_space AS SIGNED) \
     FROM datastore ds \
     INNER JOIN vcenter vc ON ds.vcenter_uuid = vc.instance_uuid \
     INNER JOIN object o ON ds.uuid = o.uuid \
     WHERE vc.name LIKE ?";

const HBA_COUNT_QUERY: &str = "SELECT CAST(hardware_num_hba AS SIGNED) FROM host_system WHERE host_name LIKE ?";

const NIC_COUNT_QUERY: &str = "SELECT CAST(hardware_num_nic AS SIGNED) FROM host_system WHERE host_name LIKE ?";

const SENSOR_QUERY: &str = "SELECT CAST(se.current_reading AS SIGNED) \
     FROM host_sensor se \
     INNER JOIN host_system hs ON se.host_uuid = hs.uuid \
     WHERE hs.host_name LIKE ? AND se.name LIKE ?";

/// Where and as whom to connect to the vSphereDB database.
#[derive(Clone, PartialEq, Eq)]
pub struct MySqlSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for MySqlSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// [`Inventory`] backed by a single connection to the vSphereDB MySQL database.
#[derive(Debug)]
pub struct MySqlInventory {
    conn: Mutex<MySqlConnection>,
}

impl MySqlInventory {
    /// Open a single connection to the database, failing on the first unsuccessful attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or refuses the credentials.
    pub async fn connect(settings: &MySqlSettings) -> Result<Self> {
        log::info!(
            target: LOG_TARGET,
            "Connecting to database '{}' on {}:{} as '{}'",
            settings.database,
            settings.host,
            settings.port,
            settings.username
        );

        let start = Instant::now();
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .database(&settings.database)
            .username(&settings.username)
            .password(&settings.password);

        let conn = options.connect().await.map_err(|e| {
            app_err!(
                "could not connect to database '{}' on {}:{}: {e}",
                settings.database,
                settings.host,
                settings.port
            )
        })?;

        log::debug!(target: LOG_TARGET, "Connected in {:.3}s", start.elapsed().as_secs_f64());
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Close the connection, telling the server the session is over.
    pub async fn close(self) {
        match self.conn.into_inner().close().await {
            Ok(()) => log::debug!(target: LOG_TARGET, "Closed database connection"),
            Err(e) => log::warn!(target: LOG_TARGET, "Could not close database connection cleanly: {e}"),
        }
    }

    async fn fetch_one_value(&self, query: &'static str, binds: &[&str], what: &str) -> Result<i64> {
        let mut q = sqlx::query_as::<_, (i64,)>(query);
        for value in binds {
            q = q.bind(*value);
        }

        log::debug!(target: LOG_TARGET, "Querying {what}");
        let mut conn = self.conn.lock().await;
        let row = q
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| app_err!("could not query {what}: {e}"))?;

        row.map(|(value,)| value).ok_or_else(|| app_err!("no {what} found matching {}", quoted(binds)))
    }
}

fn quoted(binds: &[&str]) -> String {
    binds.iter().map(|b| format!("'{b}'")).collect::<Vec<_>>().join(" / ")
}

impl Inventory for MySqlInventory {
    async fn host_cpu(&self, machine: &str) -> Result<HostCpu> {
        log::debug!(target: LOG_TARGET, "Querying CPU statistics of '{machine}'");
        let row = sqlx::query_as::<_, (i64, i64, i64)>(HOST_CPU_QUERY)
            .bind(machine)
            .fetch_optional(&mut *self.conn.lock().await)
            .await
            .map_err(|e| app_err!("could not query CPU statistics of '{machine}': {e}"))?;

        let (overall_usage, cpu_mhz, cpu_cores) = row.ok_or_else(|| app_err!("no host found matching '{machine}'"))?;
        Ok(HostCpu {
            overall_usage,
            cpu_mhz,
            cpu_cores,
        })
    }

    async fn host_memory(&self, machine: &str) -> Result<HostMemory> {
        log::debug!(target: LOG_TARGET, "Querying memory statistics of '{machine}'");
        let row = sqlx::query_as::<_, (i64, i64)>(HOST_MEMORY_QUERY)
            .bind(machine)
            .fetch_optional(&mut *self.conn.lock().await)
            .await
            .map_err(|e| app_err!("could not query memory statistics of '{machine}': {e}"))?;

        let (overall_usage_mb, memory_size_mb) = row.ok_or_else(|| app_err!("no host found matching '{machine}'"))?;
        Ok(HostMemory {
            overall_usage_mb,
            memory_size_mb,
        })
    }

    async fn datastore(&self, vcenter: &str, name: &str) -> Result<DatastoreUsage> {
        log::debug!(target: LOG_TARGET, "Querying datastore '{name}' of vCenter '{vcenter}'");
        let row = sqlx::query_as::<_, (i64, i64)>(DATASTORE_QUERY)
            .bind(name)
            .bind(vcenter)
            .fetch_optional(&mut *self.conn.lock().await)
            .await
            .map_err(|e| app_err!("could not query datastore '{name}': {e}"))?;

        // the label is the name the user asked for, even if it matched through a wildcard
        let (capacity, free_space) =
            row.ok_or_else(|| app_err!("no datastore '{name}' found in vCenter '{vcenter}'"))?;
        Ok(DatastoreUsage {
            name: name.to_string(),
            capacity,
            free_space,
        })
    }

    async fn datastores(&self, vcenter: &str) -> Result<Vec<DatastoreUsage>> {
        log::debug!(target: LOG_TARGET, "Querying all datastores of vCenter '{vcenter}'");
        let rows = sqlx::query_as::<_, (String, i64, i64)>(DATASTORES_QUERY)
            .bind(vcenter)
            .fetch_all(&mut *self.conn.lock().await)
            .await
            .map_err(|e| app_err!("could not query datastores of vCenter '{vcenter}': {e}"))?;

        log::debug!(target: LOG_TARGET, "Found {} datastores", rows.len());
        Ok(rows
            .into_iter()
            .map(|(name, capacity, free_space)| DatastoreUsage {
                name,
                capacity,
                free_space,
            })
            .collect())
    }

    async fn hba_count(&self, machine: &str) -> Result<i64> {
        self.fetch_one_value(HBA_COUNT_QUERY, &[machine], "HBA count of host").await
    }

    async fn nic_count(&self, machine: &str) -> Result<i64> {
        self.fetch_one_value(NIC_COUNT_QUERY, &[machine], "NIC count of host").await
    }

    async fn sensor_reading(&self, machine: &str, sensor: &str) -> Result<i64> {
        self.fetch_one_value(SENSOR_QUERY, &[machine, sensor], "sensor reading of host / sensor")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let settings = MySqlSettings {
            host: "db.example.com".to_string(),
            port: 3306,
            database: "vspheredb".to_string(),
            username: "monitor".to_string(),
            password: "s3cret".to_string(),
        };

        let debug = format!("{settings:?}");
        assert!(debug.contains("db.example.com"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_quoted_binds() {
        assert_eq!(quoted(&["esx1"]), "'esx1'");
        assert_eq!(quoted(&["esx1", "Inlet"]), "'esx1' / 'Inlet'");
    }

    #[test]
    fn test_queries_take_one_placeholder_per_bind() {
        let placeholders = |q: &str| q.matches('?').count();
        assert_eq!(placeholders(HOST_CPU_QUERY), 1);
        assert_eq!(placeholders(HOST_MEMORY_QUERY), 1);
        assert_eq!(placeholders(DATASTORE_QUERY), 2);
        assert_eq!(placeholders(DATASTORES_QUERY), 1);
        assert_eq!(placeholders(HBA_COUNT_QUERY), 1);
        assert_eq!(placeholders(NIC_COUNT_QUERY), 1);
        assert_eq!(placeholders(SENSOR_QUERY), 2);
    }
}
