//! Configuration file loading
//!
//! Everything in the file is optional; command-line flags take precedence
//! over file values, which take precedence over the built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Probe settings loaded from a TOML file (check_modem --config probe.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub modem: ModemSection,
    #[serde(default)]
    pub thresholds: ThresholdSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModemSection {
    /// Host name or IP address of the modem
    pub address: Option<String>,
    /// HTTP fetch timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Number of downstream bonding channels
    pub num_channels: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThresholdSection {
    pub warn: Option<u32>,
    pub crit: Option<u32>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
