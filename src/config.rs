//! Task server configuration, read from a TOML file.
//!
//! ```toml
//! data_dir = "data"
//! reset_utc_offset_hours = 8
//! log_filter = "disciple_tasks=debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::task::ResetClock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Directory holding `tasks.toml` and `names.toml`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Hours east of UTC at which the daily quota rolls over
    #[serde(default)]
    pub reset_utc_offset_hours: i32,
    /// Default tracing directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_filter() -> String {
    "disciple_tasks=info".to_string()
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            reset_utc_offset_hours: 0,
            log_filter: default_log_filter(),
        }
    }
}

impl TaskConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| format!("{:?}: {}", path, e))?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(-12..=14).contains(&self.reset_utc_offset_hours) {
            return Err(format!(
                "reset_utc_offset_hours must be between -12 and 14, got {}",
                self.reset_utc_offset_hours
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err("log_filter must not be empty".to_string());
        }
        Ok(())
    }

    pub fn reset_clock(&self) -> Result<ResetClock, String> {
        ResetClock::with_offset_hours(self.reset_utc_offset_hours)
    }
}
