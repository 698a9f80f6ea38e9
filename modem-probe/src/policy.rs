//! Threshold policies
//!
//! Third stage of the pipeline: scan every downstream channel and fold the
//! per-channel verdicts into one severity, escalation-only. Both ladders
//! reproduce the vendor's published limits literally, quirks included:
//!
//! - The SNR ladder's fourth condition re-tests the `-6..=15` dBmV power
//!   range instead of `-15..=-6`, so the low-power/snr<33 critical case the
//!   vendor guidance describes is never exercised. Kept as-is; changing it
//!   changes alerting behavior in the field.
//! - The power ladder has no OK path at all: an in-range reading that is
//!   neither near zero nor out of bounds lands on UNKNOWN. Also kept as-is.

use crate::report::{format_report, MetricKind};
use crate::types::{ChannelStats, ChannelTable, ProbeError, Report, Result, Severity};

/// Metric row label for received power on the signal page
pub const POWER_LEVEL_METRIC: &str = "Power Level";

/// Metric row label for signal-to-noise ratio on the signal page
pub const SNR_METRIC: &str = "Signal to Noise Ratio";

/// Parse the leading signed integer of a metric value string, the run
/// before its first space ("5 dBmV" → 5).
fn leading_int(raw: &str) -> Result<i64> {
    let field = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| ProbeError::Value("empty metric value".to_string()))?;
    field
        .parse::<i64>()
        .map_err(|_| ProbeError::Value(format!("metric value {:?} has no leading integer", raw)))
}

/// Look up a metric for a channel, failing when the grid did not deliver it.
fn channel_metric<'a>(stats: &'a ChannelStats, id: &str, metric: &str) -> Result<&'a str> {
    stats
        .get(metric)
        .ok_or_else(|| ProbeError::Structure(format!("channel {} has no {:?} entry", id, metric)))
}

/// Severity of one channel under the SNR ladder.
///
/// The four conditions are applied in their published order; a critical
/// condition wins over a matching warning condition for the same channel.
fn snr_channel_verdict(power: i64, snr: i64) -> Severity {
    let mut verdict = Severity::Ok;
    if (-6..=15).contains(&power) && snr <= 35 {
        verdict = verdict.escalate(Severity::Warning);
    }
    if (-6..=15).contains(&power) && snr < 30 {
        verdict = verdict.escalate(Severity::Critical);
    }
    if (-15..=-6).contains(&power) && snr <= 38 {
        verdict = verdict.escalate(Severity::Warning);
    }
    // The vendor ladder re-tests -6..=15 here rather than -15..=-6
    if (-6..=15).contains(&power) && snr < 33 {
        verdict = verdict.escalate(Severity::Critical);
    }
    verdict
}

/// Evaluate the SNR policy across all downstream channels.
///
/// Every channel's raw SNR reading goes into the report detail regardless
/// of the verdict.
pub fn evaluate_snr(table: &ChannelTable) -> Result<Report> {
    let mut overall = Severity::Ok;
    let mut details = Vec::with_capacity(table.len());

    for (id, stats) in table.iter() {
        let power_raw = channel_metric(stats, id, POWER_LEVEL_METRIC)?;
        let snr_raw = channel_metric(stats, id, SNR_METRIC)?;
        let power = leading_int(power_raw)?;
        let snr = leading_int(snr_raw)?;

        let verdict = snr_channel_verdict(power, snr);
        log::debug!(
            "Channel {}: power={} dBmV snr={} dB -> {}",
            id,
            power,
            snr,
            verdict
        );
        overall = overall.escalate(verdict);
        details.push(format!("Channel {} - {}", id, snr_raw));
    }

    Ok(Report {
        severity: overall,
        message: format_report(overall, MetricKind::SignalToNoiseRatios, &details),
    })
}

/// Evaluate the power policy across all downstream channels.
///
/// The ladder is applied as published: near-zero readings warn, out-of-range
/// readings are critical, and everything else is UNKNOWN. CRITICAL, once
/// reached, is final for the poll.
pub fn evaluate_power(table: &ChannelTable) -> Result<Report> {
    let mut overall = Severity::Ok;
    let mut details = Vec::with_capacity(table.len());

    for (id, stats) in table.iter() {
        let power_raw = channel_metric(stats, id, POWER_LEVEL_METRIC)?;
        let power = leading_int(power_raw)?;

        if power.abs() <= 11 && overall != Severity::Critical {
            overall = Severity::Warning;
        } else if power.abs() > 15 {
            overall = Severity::Critical;
        } else if overall != Severity::Critical {
            // No OK path in this ladder: in-range readings land here
            overall = Severity::Unknown;
        }
        log::debug!("Channel {}: power={} dBmV -> {}", id, power, overall);
        details.push(format!("Channel {} - {}", id, power_raw));
    }

    Ok(Report {
        severity: overall,
        message: format_report(overall, MetricKind::PowerLevels, &details),
    })
}
