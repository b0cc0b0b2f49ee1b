//! Tracing setup for the partyctl CLI
//!
//! Usage:
//!   partyctl --debug ...              # Debug logging to stderr
//!   RUST_LOG=partyctl_core=debug ...  # Fine-grained log control
//!
//! The TUI owns the terminal, so in TUI mode logs go to
//! ~/.partyctl/partyctl.log instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level if RUST_LOG is not set)
    pub debug: bool,
    /// Append logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize tracing based on configuration
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = env_filter(config.debug);

    match config.log_file {
        Some(ref path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(config.debug)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .compact()
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.debug) // Show targets in debug mode
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unusable_log_file_is_an_error() {
        // A regular file cannot be the log directory
        let not_a_dir = tempfile::NamedTempFile::new().unwrap();
        let config = TracingConfig {
            debug: false,
            log_file: Some(not_a_dir.path().join("partyctl.log")),
        };

        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to create"));
    }
}
