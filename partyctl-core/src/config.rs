use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PartyError, Result};

/// Party store used when neither flag, env nor config names one
pub const DEFAULT_ENDPOINT: &str = "https://pokemon-data.adaptable.app";

/// Configuration read from ~/.partyctl/config.toml
///
/// Every field is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyConfig {
    /// Base URL of the party store (without the `/party` suffix)
    pub endpoint: Option<String>,

    /// Per-request timeout. Absent means requests may wait forever.
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub sound: SoundConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Sound file played after a successful change (terminal bell if unset)
    pub path: Option<PathBuf>,

    /// Player command; defaults to afplay on macOS, aplay elsewhere
    pub player: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            player: None,
        }
    }
}

impl PartyConfig {
    /// Load config from ~/.partyctl/config.toml, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| PartyError::config(path, e.to_string()))?;

        Ok(config)
    }

    /// Get config file path: ~/.partyctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".partyctl/config.toml")
    }

    /// Directory holding config and the TUI log file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".partyctl")
    }

    /// Endpoint resolution. Priority: flag/env > config.toml > default
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> String {
        let endpoint = flag
            .map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        endpoint.trim_end_matches('/').to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
