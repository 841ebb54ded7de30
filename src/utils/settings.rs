use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::utils::constants::{
    DEFAULT_DEADLINE_SCAN_INTERVAL_SECONDS, DEFAULT_POSITION_CHANNEL_CAPACITY,
};

/// Tunables read from `settings.toml`. Credentials stay in the
/// environment; see `main`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_deadline_scan_interval_seconds")]
    pub deadline_scan_interval_seconds: u64,
    #[serde(default = "default_position_channel_capacity")]
    pub position_channel_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            deadline_scan_interval_seconds: default_deadline_scan_interval_seconds(),
            position_channel_capacity: default_position_channel_capacity(),
        }
    }
}

fn default_deadline_scan_interval_seconds() -> u64 {
    DEFAULT_DEADLINE_SCAN_INTERVAL_SECONDS
}

fn default_position_channel_capacity() -> usize {
    DEFAULT_POSITION_CHANNEL_CAPACITY
}

pub fn read_settings<P: AsRef<Path>>(path: P) -> Result<Settings, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let settings = toml::from_str(&raw)?;
    Ok(settings)
}
