//! Editor configuration.

use crate::input::Modifiers;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Minimum number of visible rows, even for short sheets.
pub const DEFAULT_MIN_ROWS: u32 = 100;
/// Minimum number of visible columns (A..Z).
pub const DEFAULT_MIN_COLS: u32 = 26;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Parse(String),
}

/// Host platform, used to pick the "add another range" modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Linux,
    Windows,
}

impl Platform {
    /// Platform of the build target.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Command-click on mac, control-click elsewhere.
    pub fn is_additional_selection(self, modifiers: &Modifiers) -> bool {
        match self {
            Platform::Mac => modifiers.meta,
            Platform::Linux | Platform::Windows => modifiers.ctrl,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Settings for an annotation editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub platform: Platform,
    pub min_rows: u32,
    pub min_cols: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            min_rows: DEFAULT_MIN_ROWS,
            min_cols: DEFAULT_MIN_COLS,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
