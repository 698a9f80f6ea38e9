//! Modem Probe CLI Application
//!
//! Nagios-compatible check command for Arris/Surfboard cable modems. It uses
//! the modem-probe library and adds the plumbing around it:
//! - Command-line flags and optional TOML config file
//! - The blocking HTTP fetch of the status page
//! - Severity-to-exit-code mapping for the monitoring system

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use modem_probe::{ProbeConfig, ProbeFunction, Report, Severity};

mod config;
mod fetch;

const DEFAULT_WARN: u32 = 75;
const DEFAULT_CRIT: u32 = 90;
const DEFAULT_NUM_CHANNELS: usize = 4;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Modem statistic to report on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Function {
    /// Signal-to-noise ratios of the downstream channels
    Snr,
    /// Power levels of the downstream channels
    Power,
    /// Overall operational status
    Status,
}

impl From<Function> for ProbeFunction {
    fn from(function: Function) -> Self {
        match function {
            Function::Snr => ProbeFunction::Snr,
            Function::Power => ProbeFunction::Power,
            Function::Status => ProbeFunction::Status,
        }
    }
}

/// Poll a cable modem for status information suitable for ingestion by a
/// Nagios compatible monitoring system.
#[derive(Parser, Debug)]
#[command(name = "check_modem")]
#[command(about = "Poll a cable modem's status page and report plugin severity", long_about = None)]
#[command(version)]
struct Args {
    /// Modem statistic on which to report
    #[arg(short, long, value_enum)]
    function: Function,

    /// Host name or IP address to query
    #[arg(short, long)]
    address: Option<String>,

    /// Warning threshold (default: 75)
    #[arg(short, long, value_name = "PERCENT")]
    warn: Option<u32>,

    /// Critical threshold (default: 90)
    #[arg(short, long, value_name = "PERCENT")]
    crit: Option<u32>,

    /// Number of bonding channels (default: 4)
    #[arg(short, long = "num", value_name = "COUNT")]
    num_channels: Option<usize>,

    /// HTTP timeout in seconds (default: 10)
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Path to configuration file (probe.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);
    log::debug!("check_modem v{} (library v{})", env!("CARGO_PKG_VERSION"), modem_probe::VERSION);

    // Every failure between here and the report is a plugin UNKNOWN, never
    // a bare process error: the monitoring system only understands the
    // status line and the exit code.
    let report = match run(&args) {
        Ok(report) => report,
        Err(e) => Report {
            severity: Severity::Unknown,
            message: format!("{} : {:#}", Severity::Unknown, e),
        },
    };

    println!("{}", report.message);
    ExitCode::from(report.severity.exit_code() as u8)
}

/// Resolve configuration, fetch the right page, and run the probe.
fn run(args: &Args) -> Result<Report> {
    let file = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::FileConfig::default(),
    };

    let address = args
        .address
        .clone()
        .or(file.modem.address)
        .context("no modem address configured (use --address or the config file)")?;

    let warn = args.warn.or(file.thresholds.warn).unwrap_or(DEFAULT_WARN);
    let crit = args.crit.or(file.thresholds.crit).unwrap_or(DEFAULT_CRIT);
    let num_channels = args
        .num_channels
        .or(file.modem.num_channels)
        .unwrap_or(DEFAULT_NUM_CHANNELS);
    let timeout = Duration::from_secs(
        args.timeout
            .or(file.modem.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
    );

    let probe_config = ProbeConfig::new()
        .with_function(args.function.into())
        .with_thresholds(warn, crit)
        .with_num_channels(num_channels);

    let page = match args.function {
        Function::Status => fetch::STATUS_PAGE,
        Function::Snr | Function::Power => fetch::SIGNAL_PAGE,
    };
    let html = fetch::fetch_page(&address, page, timeout)?;

    let report = modem_probe::run_probe(&html, &probe_config)?;
    log::info!("Probe verdict: {}", report.severity);
    Ok(report)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_function_mapping() {
        assert_eq!(ProbeFunction::from(Function::Snr), ProbeFunction::Snr);
        assert_eq!(ProbeFunction::from(Function::Power), ProbeFunction::Power);
        assert_eq!(ProbeFunction::from(Function::Status), ProbeFunction::Status);
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from([
            "check_modem",
            "--function",
            "snr",
            "--address",
            "192.168.100.1",
            "-n",
            "8",
        ])
        .unwrap();
        assert_eq!(args.function, Function::Snr);
        assert_eq!(args.address.as_deref(), Some("192.168.100.1"));
        assert_eq!(args.num_channels, Some(8));
        assert_eq!(args.warn, None);
    }
}
