//! Probe configuration types
//!
//! The probe is stateless: everything the pipeline needs for one poll is
//! passed in through a `ProbeConfig`. The CLI layer builds one from flags
//! and an optional config file.

use serde::{Deserialize, Serialize};

/// Which report the probe produces for one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeFunction {
    /// Signal-to-noise policy over the downstream channels
    Snr,
    /// Power-level policy over the downstream channels
    Power,
    /// Operational status lookup on the index page
    Status,
}

/// Configuration for one probe invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Statistic to report on
    #[serde(default = "default_function")]
    pub function: ProbeFunction,

    /// Warning threshold. Accepted for plugin interface compatibility; the
    /// vendor branch ladders carry their own fixed limits and do not read it.
    #[serde(default = "default_warn")]
    pub warn_threshold: u32,

    /// Critical threshold. Same caveat as `warn_threshold`.
    #[serde(default = "default_crit")]
    pub crit_threshold: u32,

    /// Number of downstream bonding channels on the signal page
    #[serde(default = "default_num_channels")]
    pub num_channels: usize,
}

fn default_function() -> ProbeFunction {
    ProbeFunction::Snr
}

fn default_warn() -> u32 {
    75
}

fn default_crit() -> u32 {
    90
}

fn default_num_channels() -> usize {
    4
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            function: default_function(),
            warn_threshold: default_warn(),
            crit_threshold: default_crit(),
            num_channels: default_num_channels(),
        }
    }
}

impl ProbeConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: select the probe function
    pub fn with_function(mut self, function: ProbeFunction) -> Self {
        self.function = function;
        self
    }

    /// Builder method: set warning/critical thresholds
    pub fn with_thresholds(mut self, warn: u32, crit: u32) -> Self {
        self.warn_threshold = warn;
        self.crit_threshold = crit;
        self
    }

    /// Builder method: set the downstream channel count
    pub fn with_num_channels(mut self, num_channels: usize) -> Self {
        self.num_channels = num_channels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ProbeConfig::new()
            .with_function(ProbeFunction::Power)
            .with_thresholds(60, 80)
            .with_num_channels(8);

        assert_eq!(config.function, ProbeFunction::Power);
        assert_eq!(config.warn_threshold, 60);
        assert_eq!(config.crit_threshold, 80);
        assert_eq!(config.num_channels, 8);
    }

    #[test]
    fn test_config_defaults() {
        let config = ProbeConfig::default();
        assert_eq!(config.function, ProbeFunction::Snr);
        assert_eq!(config.warn_threshold, 75);
        assert_eq!(config.crit_threshold, 90);
        assert_eq!(config.num_channels, 4);
    }
}
