use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime switches. Every field has a default, so an empty file (or no
/// file) is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Store key used by quicksave/quickload.
    pub quicksave_key: String,
    /// Append conversational hints after commands.
    pub feedback_hints: bool,
    /// Let guardians with a pursuit AI chase the player.
    pub guardian_pursuit: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            quicksave_key: "tower_trial_quicksave".to_string(),
            feedback_hints: true,
            guardian_pursuit: true,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
