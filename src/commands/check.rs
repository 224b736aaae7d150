use super::common::{Common, ThresholdArgs};
use crate::checks::adapters::Adapter;
use crate::checks::{CheckError, CheckResult, adapters, cpu, datastore, memory, temperature};
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Check CPU usage of a host, in percent of its total capacity
    Cpu(ThresholdArgs),

    /// Check memory usage of a host, in percent of its installed memory
    Memory(ThresholdArgs),

    /// Check used space of one datastore, or of every datastore of a vCenter
    Datastore(DatastoreArgs),

    /// Check the number of host bus adapters (thresholds are minimum counts)
    Hba(ThresholdArgs),

    /// Check the number of network interfaces (thresholds are minimum counts)
    Nic(ThresholdArgs),

    /// Check the reading of a host temperature sensor, in °C
    Temperature(TemperatureArgs),
}

#[derive(Args, Debug)]
pub struct DatastoreArgs {
    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Datastore to check; all datastores of the vCenter are checked when omitted
    #[arg(long, short = 's', value_name = "NAME")]
    pub datastore: Option<String>,
}

#[derive(Args, Debug)]
pub struct TemperatureArgs {
    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Sensor to read [default: System Board 1 Inlet Temp]
    #[arg(long, value_name = "NAME")]
    pub sensor: Option<String>,
}

impl CheckCommand {
    /// Resolve thresholds, then query the inventory and evaluate.
    ///
    /// Thresholds are resolved before connecting.
    pub async fn execute(&self, common: &Common) -> Result<CheckResult, CheckError> {
        let config = &common.config;
        let machine = common.machine.as_str();

        match self {
            Self::Cpu(args) => {
                let thresholds = args.resolve(&config.cpu)?;
                common
                    .run_check(async |inventory| cpu::run(inventory, machine, &thresholds).await)
                    .await
            }

            Self::Memory(args) => {
                let thresholds = args.resolve(&config.memory)?;
                common
                    .run_check(async |inventory| memory::run(inventory, machine, &thresholds).await)
                    .await
            }

            Self::Datastore(args) => {
                let thresholds = args.thresholds.resolve(&config.datastore)?;
                match args.datastore.as_deref().filter(|name| !name.is_empty()) {
                    Some(name) => {
                        common
                            .run_check(async |inventory| datastore::run_single(inventory, machine, name, &thresholds).await)
                            .await
                    }
                    None => {
                        common
                            .run_check(async |inventory| datastore::run_all(inventory, machine, &thresholds).await)
                            .await
                    }
                }
            }

            Self::Hba(args) => {
                let thresholds = args.resolve_minimum(&config.hba)?;
                common
                    .run_check(async |inventory| adapters::run(inventory, Adapter::Hba, machine, &thresholds).await)
                    .await
            }

            Self::Nic(args) => {
                let thresholds = args.resolve_minimum(&config.nic)?;
                common
                    .run_check(async |inventory| adapters::run(inventory, Adapter::Nic, machine, &thresholds).await)
                    .await
            }

            Self::Temperature(args) => {
                let thresholds = args.thresholds.resolve(&config.temperature.thresholds())?;
                let sensor = args.sensor.as_deref().unwrap_or(&config.temperature.sensor);
                common
                    .run_check(async |inventory| temperature::run(inventory, machine, sensor, &thresholds).await)
                    .await
            }
        }
    }
}
