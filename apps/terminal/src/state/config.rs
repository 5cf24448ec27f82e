//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tally_core::ERROR_INDICATOR;
use tracing::warn;

/// Default number of lines kept on the tape.
pub const DEFAULT_TAPE_LIMIT: usize = 50;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Text shown instead of a number after a fault
    pub error_indicator: String,

    /// Maximum tape lines (0 disables the tape)
    pub tape_limit: usize,

    /// How the driver prints responses
    pub output: OutputMode,
}

/// How the stdin driver prints responses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Just the display text, one line per input line
    #[default]
    Plain,

    /// One JSON object per input line
    Json,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(OutputMode::Plain),
            "json" => Ok(OutputMode::Json),
            other => Err(format!("unknown output mode '{}'", other)),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Plain => write!(f, "plain"),
            OutputMode::Json => write!(f, "json"),
        }
    }
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Error indicator: "Error"
    /// - Tape: 50 lines
    /// - Output: plain
    fn default() -> Self {
        ConfigState {
            error_indicator: ERROR_INDICATOR.to_string(),
            tape_limit: DEFAULT_TAPE_LIMIT,
            output: OutputMode::Plain,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_ERROR_INDICATOR`: Text shown for faults (e.g. "E")
    /// - `TALLY_TAPE_LIMIT`: Tape size (e.g. "100")
    /// - `TALLY_OUTPUT`: "plain" or "json"
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Invalid values are logged and
    /// the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(indicator) = lookup("TALLY_ERROR_INDICATOR") {
            if indicator.trim().is_empty() {
                warn!("TALLY_ERROR_INDICATOR is empty, keeping default");
            } else {
                config.error_indicator = indicator;
            }
        }

        if let Some(limit) = lookup("TALLY_TAPE_LIMIT") {
            match limit.trim().parse::<usize>() {
                Ok(limit) => config.tape_limit = limit,
                Err(e) => warn!(value = %limit, error = %e, "invalid TALLY_TAPE_LIMIT"),
            }
        }

        if let Some(output) = lookup("TALLY_OUTPUT") {
            match output.parse::<OutputMode>() {
                Ok(mode) => config.output = mode,
                Err(e) => warn!(value = %output, error = %e, "invalid TALLY_OUTPUT"),
            }
        }

        config
    }
}
