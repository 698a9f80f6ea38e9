//! Core types for the modem probe library
//!
//! This module defines the entities the pipeline produces while turning a
//! status page into a verdict. Everything is rebuilt from scratch on each
//! poll; nothing carries state across invocations.

use std::collections::HashMap;
use std::fmt;

/// Result type for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Identifier of one downstream bonding channel, as printed on the page.
///
/// Opaque to the probe: it is only used to label report details and is
/// unique within a single poll.
pub type ChannelId = String;

/// Errors that can occur while extracting and classifying a status page
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to parse status page: {0}")]
    Parse(String),

    #[error("Unexpected page structure: {0}")]
    Structure(String),

    #[error("Invalid metric value: {0}")]
    Value(String),
}

/// Nagios plugin severity levels
///
/// Escalation order is OK < WARNING < CRITICAL: once an evaluation pass
/// reaches CRITICAL, later channels can never downgrade it. UNKNOWN sits
/// outside the escalation chain and marks readings the policies cannot
/// classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Process exit code per the plugin contract
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    /// Escalation rank. UNKNOWN ranks below the real verdicts so that it
    /// never displaces one during a fold.
    fn rank(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Unknown => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }

    /// Escalate to `next` if it is more severe, otherwise keep `self`.
    pub fn escalate(self, next: Severity) -> Severity {
        if next.rank() > self.rank() {
            next
        } else {
            self
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "OK"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Raw metric readings for one channel: metric name → value string as it
/// appears on the page (a number plus a unit suffix, e.g. "5 dBmV").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelStats {
    metrics: HashMap<String, String>,
}

impl ChannelStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a metric reading for this channel
    pub fn insert(&mut self, metric: String, value: String) {
        self.metrics.insert(metric, value);
    }

    /// Look up a metric's raw value string
    pub fn get(&self, metric: &str) -> Option<&str> {
        self.metrics.get(metric).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Per-channel stats for all downstream bonding channels.
///
/// Iteration order is the order the channels were discovered on the page,
/// which keeps report details stable across polls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelTable {
    channels: Vec<(ChannelId, ChannelStats)>,
}

impl ChannelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel in discovery order
    pub fn push(&mut self, id: ChannelId, stats: ChannelStats) {
        self.channels.push((id, stats));
    }

    /// Iterate channels in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChannelStats)> {
        self.channels.iter().map(|(id, stats)| (id.as_str(), stats))
    }

    /// Look up a channel by id
    pub fn get(&self, id: &str) -> Option<&ChannelStats> {
        self.channels
            .iter()
            .find(|(chan, _)| chan == id)
            .map(|(_, stats)| stats)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Output of the signal-page table reconstruction.
///
/// Current policies only read the downstream grid; the upstream token run
/// is carried along for callers that want it.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTables {
    /// Downstream bonding channels with their metric readings
    pub downstream: ChannelTable,
    /// Raw tokens of the upstream section, starting at its header sentinel
    pub upstream: Vec<String>,
}

/// The terminal artifact of one poll: a severity plus the one-line message
/// printed for the monitoring system.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
}
