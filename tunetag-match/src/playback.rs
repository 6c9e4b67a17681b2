//! Playback hand-off
//!
//! The matcher only hands the winning file to a notifier. What happens next
//! (logging, launching a player) is the notifier's business, and its failures
//! never change a match result that has already been reported.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{info, warn};
use tunetag_common::config::PlaybackConfig;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Player process could not be started
    #[error("Failed to launch player '{0}': {1}")]
    Launch(String, #[source] std::io::Error),

    /// Player exited unsuccessfully
    #[error("Player '{0}' exited with {1}")]
    PlayerFailed(String, String),
}

/// Receives the winning file after selection
pub trait PlaybackNotifier {
    fn play(&self, file: &Path) -> Result<(), PlaybackError>;
}

/// Logs the file instead of playing it
pub struct LogNotifier;

impl PlaybackNotifier for LogNotifier {
    fn play(&self, file: &Path) -> Result<(), PlaybackError> {
        info!("Playing: {}", file.display());
        Ok(())
    }
}

/// Does nothing
pub struct NoopNotifier;

impl PlaybackNotifier for NoopNotifier {
    fn play(&self, _file: &Path) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// Runs an external player and waits for it to finish
///
/// Invoked as `<command> <args...> <file>`.
pub struct CommandNotifier {
    command: String,
    args: Vec<String>,
}

impl CommandNotifier {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl PlaybackNotifier for CommandNotifier {
    fn play(&self, file: &Path) -> Result<(), PlaybackError> {
        info!("Playing: {} (via {})", file.display(), self.command);
        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(file)
            .status()
            .map_err(|e| PlaybackError::Launch(self.command.clone(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(PlaybackError::PlayerFailed(
                self.command.clone(),
                status.to_string(),
            ))
        }
    }
}

/// Pick a notifier from `[playback]`: external command if set, else logging
pub fn notifier_from_config(config: &PlaybackConfig) -> Box<dyn PlaybackNotifier> {
    match config.command.as_deref().map(str::trim) {
        Some(command) if !command.is_empty() => {
            Box::new(CommandNotifier::new(command, config.args.clone()))
        }
        _ => Box::new(LogNotifier),
    }
}

/// Hand the file to the notifier, logging any failure
///
/// Returns whether playback succeeded.
pub fn notify_playback(notifier: &dyn PlaybackNotifier, file: &Path) -> bool {
    match notifier.play(file) {
        Ok(()) => true,
        Err(e) => {
            warn!("Error playing {}: {}", file.display(), e);
            false
        }
    }
}
