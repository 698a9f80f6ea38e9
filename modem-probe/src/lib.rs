//! Modem Probe Library
//!
//! A stateless library for turning an Arris/Surfboard cable modem's embedded
//! web status pages into a Nagios-compatible verdict.
//!
//! # Architecture
//!
//! The library implements the whole extraction-and-classification pipeline:
//! - Flattens the page's HTML tables into an ordered sequence of cleaned
//!   cell tokens
//! - Reconstructs the downstream bonding-channel grid into per-channel stats
//! - Applies a threshold policy (SNR or power) or the operational-status
//!   lookup, folding per-channel results into one severity
//! - Formats the one-line plugin report
//!
//! The library does NOT:
//! - Perform the HTTP fetch (the caller supplies raw HTML text)
//! - Parse command-line flags
//! - Exit the process
//!
//! All of that plumbing is in the application layer (modem-probe-cli).
//!
//! # Example Usage
//!
//! ```
//! use modem_probe::{run_probe, ProbeConfig, ProbeFunction, Severity};
//!
//! let html = r#"<table>
//!     <tr><td>Channel ID</td><td>1</td></tr>
//!     <tr><td>Signal to Noise Ratio</td><td>38 dB</td></tr>
//!     <tr><td>Power Level</td><td>3 dBmV</td></tr>
//!     <tr><td>Channel ID</td><td>2</td></tr>
//!     <tr><td>Channel ID</td><td>3</td></tr>
//! </table>"#;
//!
//! let config = ProbeConfig::new()
//!     .with_function(ProbeFunction::Snr)
//!     .with_num_channels(1);
//!
//! let report = run_probe(html, &config).unwrap();
//! assert_eq!(report.severity, Severity::Ok);
//! ```

// Public modules
pub mod config;
pub mod flatten;
pub mod policy;
pub mod report;
pub mod status;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use config::{ProbeConfig, ProbeFunction};
pub use report::MetricKind;
pub use types::{
    ChannelId, ChannelStats, ChannelTable, ProbeError, Report, Result, Severity, SignalTables,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run one full poll over an already-fetched HTML payload.
///
/// This is the main entry point: it flattens the page, then dispatches on the
/// configured function. `Snr` and `Power` go through the channel-table
/// reconstruction and the matching threshold policy; `Status` takes the
/// simpler label/value path over the index page.
pub fn run_probe(html: &str, config: &ProbeConfig) -> Result<Report> {
    log::debug!("Running probe function {:?}", config.function);
    let tokens = flatten::flatten_cells(html)?;
    log::trace!("Flattened page into {} tokens", tokens.len());

    match config.function {
        ProbeFunction::Status => status::evaluate_status(&tokens),
        ProbeFunction::Snr => {
            let tables = table::parse_signal_tables(&tokens, config.num_channels)?;
            policy::evaluate_snr(&tables.downstream)
        }
        ProbeFunction::Power => {
            let tables = table::parse_signal_tables(&tokens, config.num_channels)?;
            policy::evaluate_power(&tables.downstream)
        }
    }
}
