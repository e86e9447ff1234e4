//! Unified path management for Agentdeck state files.
//!
//! All persistent state lives under one base directory so a single
//! installation owns a single store. Every storage component resolves
//! its location through this module rather than hardcoding paths.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Agentdeck.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/agentdeck/         # Base directory
/// ├── config.toml              # Application configuration
/// ├── store/                   # Key-value store (one JSON file per key)
/// │   ├── bots.json
/// │   ├── credits.json
/// │   ├── recent_activities.json
/// │   └── prefs.json
/// └── sessions/                # One JSON file per chat session
///     ├── <session-id>.json
///     └── active_session       # Active session id marker
/// ```
pub struct DeckPaths;

impl DeckPaths {
    /// Returns the Agentdeck base directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the base directory (e.g., `~/.config/agentdeck/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn base_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("agentdeck"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Returns the key-value store directory.
    pub fn store_dir() -> Result<PathBuf, PathError> {
        Ok(Self::base_dir()?.join("store"))
    }

    /// Returns the sessions directory.
    pub fn sessions_dir() -> Result<PathBuf, PathError> {
        Ok(Self::base_dir()?.join("sessions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_sessions_live_under_base() {
        let base = DeckPaths::base_dir().unwrap();
        assert!(DeckPaths::store_dir().unwrap().starts_with(&base));
        assert!(DeckPaths::sessions_dir().unwrap().starts_with(&base));
        assert_eq!(
            DeckPaths::config_file().unwrap().file_name().unwrap(),
            "config.toml"
        );
    }
}
