//! Application configuration loading.
//!
//! Agentdeck keeps a small TOML config file next to its state
//! directories. Missing file means first run: defaults are written out
//! so the user has something to edit.

use crate::paths::DeckPaths;
use agentdeck_core::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Credits granted per billing period unless configured otherwise
/// (30 days worth of TPU-seconds).
pub const DEFAULT_CREDITS_TOTAL: u64 = 2_592_000;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Credit budget per billing period
    #[serde(default = "default_credits_total")]
    pub credits_total: u64,
    /// Overrides the default state directory when set
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_credits_total() -> u64 {
    DEFAULT_CREDITS_TOTAL
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            credits_total: DEFAULT_CREDITS_TOTAL,
            data_dir: None,
        }
    }
}

impl DeckConfig {
    /// Loads the config from the default path
    /// (`~/.config/agentdeck/config.toml`), writing defaults on first run.
    pub fn load_default() -> Result<Self> {
        let path = DeckPaths::config_file().map_err(|e| DeckError::config(e.to_string()))?;
        Self::load_or_init(&path)
    }

    /// Loads the config from `path`.
    ///
    /// If the file does not exist or is empty, the default config is
    /// written to `path` and returned. A file that exists but cannot be
    /// read or parsed is an error; silently replacing a user-edited
    /// config would lose their settings.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            if !content.trim().is_empty() {
                let config: DeckConfig = toml::from_str(&content)?;
                return Ok(config);
            }
        }

        let config = DeckConfig::default();
        config.save(path)?;
        Ok(config)
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }
}
