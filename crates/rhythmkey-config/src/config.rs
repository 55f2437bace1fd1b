use std::path::Path;

use anyhow::Result;
use rhythmkey_model::DEFAULT_BUCKET_WIDTH;
use serde::{Deserialize, Serialize};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

fn default_terminators() -> Vec<u8> {
    vec![b'\n', b'\r']
}

/// Tool configuration (rhythmkey.json).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Config {
    /// Timing bucket width in milliseconds used for digests.
    pub salt: i64,
    /// `read` prints the digest instead of the token.
    pub hash: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Bytes that end a capture.
    pub terminators: Vec<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            salt: DEFAULT_BUCKET_WIDTH,
            hash: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            terminators: default_terminators(),
        }
    }
}

impl Config {
    /// Restore defaults for values that cannot be used.
    pub fn validate(&mut self) {
        if self.salt <= 0 {
            self.salt = DEFAULT_BUCKET_WIDTH;
        }
        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
        if self.terminators.is_empty() {
            self.terminators = default_terminators();
        }
    }

    /// Read config from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&data)?;
        config.validate();
        Ok(config)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
