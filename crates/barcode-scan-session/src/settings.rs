//! Host-side session settings that are not part of the wire configuration.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_true() -> bool {
    true
}

/// Behaviour switches chosen by the host environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Report a permission denial as `Error{"PERMISSION_NOT_GRANTED"}`.
    ///
    /// Simulated environments without a real camera set this to `false`:
    /// a denial then returns the session to `Idle` without a result.
    #[serde(default = "default_true")]
    pub enforce_permission: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            enforce_permission: true,
        }
    }
}

impl SessionSettings {
    /// Settings for simulators and test rigs.
    pub fn simulated() -> Self {
        Self {
            enforce_permission: false,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
