use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Server configuration, read from a JSON file or built from defaults.
///
/// Snapshotting is active only when `snapshot_enabled` is set and
/// `snapshot_file` is non-empty; either one missing disables it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HakoConfig {
    pub host: String,
    pub port: u16,
    pub snapshot_file: String,
    pub snapshot_enabled: bool,
}

impl Default for HakoConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            snapshot_file: "hako-snapshot.dat".into(),
            snapshot_enabled: false,
        }
    }
}

impl HakoConfig {
    pub fn normalize_and_validate(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = Self::default().host;
        }
        if self.port == 0 {
            return Err(anyhow!("port must be in 1..=65535"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Snapshot file to use, when snapshotting is configured at all.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        if self.snapshot_enabled && !self.snapshot_file.trim().is_empty() {
            Some(PathBuf::from(&self.snapshot_file))
        } else {
            None
        }
    }
}

/// Load a configuration file, normalizing and validating the result.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<HakoConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut cfg: HakoConfig = serde_json::from_str(&content)?;
    cfg.normalize_and_validate()?;
    Ok(cfg)
}
