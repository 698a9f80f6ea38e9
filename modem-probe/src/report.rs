//! Plugin report formatting
//!
//! Last stage of the pipeline. The line format is consumed by downstream
//! monitoring configs, so it is byte-for-byte stable, including the
//! separator after the final channel detail.

use std::fmt;

use crate::types::Severity;

/// Which metric family a report covers, as spelled in the report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    SignalToNoiseRatios,
    PowerLevels,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::SignalToNoiseRatios => write!(f, "Signal to Noise Ratios"),
            MetricKind::PowerLevels => write!(f, "Power Levels"),
        }
    }
}

/// Render the one-line plugin report:
/// `<SEVERITY> : <Metric Kind> : Channel <id> - <value> ; ...`
pub fn format_report(severity: Severity, kind: MetricKind, details: &[String]) -> String {
    let mut message = format!("{} : {} : ", severity, kind);
    for detail in details {
        message.push_str(detail);
        message.push_str(" ; ");
    }
    message
}
