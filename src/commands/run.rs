//! Command dispatch and the single point where the plugin reports and exits

use super::check::CheckCommand;
use super::common::{Common, CommonArgs, init_logging};
use crate::checks::{CheckError, CheckResult};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::error::ErrorKind;
use std::io::Write;

const LOG_TARGET: &str = "     run";

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "check_vspheredb_data", version, author, long_about = None)]
#[command(about = "Check vSphere hosts using the inventory data collected by the vSphereDB module")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: CheckCommand,
}

/// Parse command-line arguments, run the requested check, print its result and exit
///
/// The plugin output goes to the host's output stream and the process exits through
/// [`Host::exit`] with the plugin exit code: 0 for `OK`, 1 for `WARNING`, 2 for
/// `CRITICAL` and 3 for `UNKNOWN`. Any failure before a verdict is reached,
/// including invalid command-line usage, is reported as `UNKNOWN`. Help and version
/// requests exit with 0.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Failures are reported through the host rather than returned; the result is `Ok` once the host has been told to exit
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            {
                let mut output = host.output();
                let _ = write!(output, "{}", e.render());
                let _ = output.flush();
            }
            host.exit(0);
            return Ok(());
        }
        Err(e) => {
            let rendered = e.render().to_string();
            {
                let mut error = host.error();
                let _ = write!(error, "{rendered}");
                let _ = error.flush();
            }

            let message = rendered.lines().next().unwrap_or("invalid command line").trim_start_matches("error: ");
            report(host, &CheckResult::unknown(message));
            return Ok(());
        }
    };

    init_logging(cli.common.log_level);

    let result = match execute(&cli).await {
        Ok(result) => result,
        Err(e) => {
            log::error!(target: LOG_TARGET, "{}: {}", e.kind(), e.error());
            CheckResult::from(e)
        }
    };

    log::info!(target: LOG_TARGET, "Check finished with status {}", result.status);
    report(host, &result);
    Ok(())
}

async fn execute(cli: &Cli) -> Result<CheckResult, CheckError> {
    let common = Common::new(&cli.common).map_err(CheckError::Configuration)?;
    cli.command.execute(&common).await
}

fn report<H: Host>(host: &mut H, result: &CheckResult) {
    {
        let mut output = host.output();
        let _ = writeln!(output, "{result}");
        let _ = output.flush();
    }

    host.exit(result.exit_code());
}
