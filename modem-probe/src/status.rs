//! Operational status lookup
//!
//! The simple probe path: the index page is a plain label/value table, so
//! there is no grid to reconstruct. Pair up the flattened tokens, read the
//! "Cable Modem Status" row, and map the status string straight to a
//! severity.

use std::collections::HashMap;

use crate::types::{ProbeError, Report, Result, Severity};

/// Label of the operational status row on the index page
pub const STATUS_LABEL: &str = "Cable Modem Status";

const STATUS_OFFLINE: &str = "Offline";
const STATUS_OPERATIONAL: &str = "Operational";

/// Evaluate the index page tokens into a status report.
///
/// "Offline" is CRITICAL, "Operational" is OK, and any other status string
/// the firmware can show ("Scanning", "Ranging", ...) is UNKNOWN. A page
/// without the status row fails with [`ProbeError::Structure`].
pub fn evaluate_status(tokens: &[String]) -> Result<Report> {
    let mut statuses: HashMap<&str, &str> = HashMap::new();
    for pair in tokens.chunks_exact(2) {
        statuses.insert(pair[0].as_str(), pair[1].as_str());
    }

    let status = statuses.get(STATUS_LABEL).ok_or_else(|| {
        ProbeError::Structure(format!("{:?} row not found on status page", STATUS_LABEL))
    })?;

    let severity = match *status {
        STATUS_OFFLINE => Severity::Critical,
        STATUS_OPERATIONAL => Severity::Ok,
        _ => Severity::Unknown,
    };
    log::debug!("Modem status {:?} -> {}", status, severity);

    Ok(Report {
        severity,
        message: format!("{} : Status {}", severity, status),
    })
}
