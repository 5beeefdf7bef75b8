//! Analyzer configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of strings on a standard six-string instrument.
pub const STRING_COUNT: usize = 6;

/// Highest digit a pattern cell may hold (the diagram shows five fret columns).
pub const MAX_CELL_FRET: u8 = 5;

/// Default upper bound for the base fret offset.
pub const DEFAULT_MAX_FRET: i32 = 18;

/// Largest `max_fret` a config may set; the diagram fretboard grows with it.
pub const MAX_CONFIG_FRET: i32 = 99;

/// Default marker for a muted string.
pub const DEFAULT_MUTE: char = 'X';

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable limits for pattern validation.
///
/// Missing JSON fields fall back to the defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Highest accepted base fret offset.
    pub max_fret: i32,
    /// Symbol marking a muted string.
    pub mute: char,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_fret: DEFAULT_MAX_FRET,
            mute: DEFAULT_MUTE,
        }
    }
}

impl AnalyzerConfig {
    /// Parses and checks a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_CONFIG_FRET).contains(&self.max_fret) {
            return Err(ConfigError::Invalid(format!(
                "max_fret must be between 0 and {}, got {}",
                MAX_CONFIG_FRET, self.max_fret
            )));
        }
        if self.mute.is_ascii_digit() {
            return Err(ConfigError::Invalid(format!(
                "mute marker must not be a digit, got '{}'",
                self.mute
            )));
        }
        Ok(())
    }
}
