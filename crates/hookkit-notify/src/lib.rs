//! Plays a short audio cue when the agent finishes a task.
//!
//! The player is chosen once per process from the current [`Platform`].
//! Nothing here returns an error: every attempt ends in a
//! [`PlaybackOutcome`] that the caller logs.

pub mod platform;
pub mod player;

pub use platform::Platform;
pub use player::{CommandPlayer, FallbackPlayer, MediaPlayerScript, PlaybackOutcome, Player};

use hookkit_config::NotifyConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Strategy table: the player used on each platform.
pub fn select_player(platform: Platform, temp_script: &Path) -> Box<dyn Player> {
    match platform {
        Platform::Windows => Box::new(MediaPlayerScript::new(temp_script)),
        Platform::MacOs => Box::new(CommandPlayer::new("afplay")),
        Platform::Other => Box::new(FallbackPlayer::new(vec![
            Box::new(CommandPlayer::new("paplay")),
            Box::new(CommandPlayer::new("aplay")),
        ])),
    }
}

pub struct Notifier {
    enabled: bool,
    audio: PathBuf,
    timeout: Duration,
    player: Box<dyn Player>,
}

impl Notifier {
    pub fn from_config(project_dir: &Path, config: &NotifyConfig) -> Self {
        let player = select_player(Platform::current(), &config.temp_script_path(project_dir));
        Self {
            enabled: config.enabled,
            audio: config.audio_path(project_dir),
            timeout: Duration::from_secs(config.timeout_secs),
            player,
        }
    }

    /// Replace the platform player.
    pub fn with_player(mut self, player: Box<dyn Player>) -> Self {
        self.player = player;
        self
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio
    }

    pub async fn notify(&self) -> PlaybackOutcome {
        if !self.enabled {
            debug!("completion sound disabled");
            return PlaybackOutcome::Disabled;
        }
        if !self.audio.is_file() {
            debug!(path = ?self.audio, "audio asset missing, skipping");
            return PlaybackOutcome::Skipped;
        }

        let outcome = self.player.play(&self.audio, self.timeout).await;
        match &outcome {
            PlaybackOutcome::Played { player } => {
                info!(player = %player, "played completion sound")
            }
            PlaybackOutcome::Failed { player, reason } => {
                warn!(player = %player, reason = %reason, "completion sound failed")
            }
            _ => {}
        }
        outcome
    }
}
