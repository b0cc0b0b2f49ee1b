//! Fire-and-forget notification played after a successful change

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;

use crate::config::SoundConfig;

/// Notification hook. Must return immediately and can never fail the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self);
}

/// Plays a sound file through an external player without waiting for it
#[derive(Debug, Clone)]
pub struct SoundNotifier {
    player: String,
    path: PathBuf,
}

impl SoundNotifier {
    pub fn new(player: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            path: path.into(),
        }
    }

    pub fn default_player() -> &'static str {
        if cfg!(target_os = "macos") {
            "afplay"
        } else {
            "aplay"
        }
    }
}

impl Notifier for SoundNotifier {
    fn notify(&self) {
        // Needs a tokio runtime to reap the child; outside one we just skip the sound
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::debug!("no runtime, skipping notification sound");
            return;
        }

        let spawned = tokio::process::Command::new(&self.player)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                tokio::spawn(async move {
                    let _ = child.wait().await;
                });
            }
            Err(e) => {
                tracing::debug!(player = %self.player, error = %e, "notification sound failed to start");
            }
        }
    }
}

/// Rings the terminal bell
#[derive(Debug, Clone, Copy, Default)]
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn notify(&self) {
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(b"\x07");
        let _ = stderr.flush();
    }
}

/// No notification at all
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self) {}
}

/// Pick a notifier from the `[sound]` config section
pub fn notifier_from_config(config: &SoundConfig) -> Box<dyn Notifier> {
    if !config.enabled {
        return Box::new(SilentNotifier);
    }

    match config.path {
        Some(ref path) => {
            let player = config
                .player
                .clone()
                .unwrap_or_else(|| SoundNotifier::default_player().to_string());
            Box::new(SoundNotifier::new(player, path.clone()))
        }
        None => Box::new(BellNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_player_does_not_panic() {
        let notifier = SoundNotifier::new("partyctl-no-such-player", "/nonexistent.wav");
        notifier.notify();
    }

    #[test]
    fn test_sound_outside_runtime_is_skipped() {
        SoundNotifier::new("partyctl-no-such-player", "/nonexistent.wav").notify();
    }
}
