use async_trait::async_trait;
use hookkit_core::HookError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tracing::{debug, info};

/// How a playback attempt ended. Playback never raises errors; failures are
/// values the caller may log and drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Played { player: String },
    Failed { player: String, reason: String },
    /// The audio asset does not exist.
    Skipped,
    /// Playback is switched off in config.
    Disabled,
}

impl PlaybackOutcome {
    pub fn is_played(&self) -> bool {
        matches!(self, PlaybackOutcome::Played { .. })
    }

    /// Only a failed attempt is an error; skipping and disabling are not.
    pub fn into_result(self) -> hookkit_core::Result<()> {
        match self {
            PlaybackOutcome::Failed { player, reason } => {
                Err(HookError::Playback(format!("{player}: {reason}")))
            }
            _ => Ok(()),
        }
    }
}

/// One way of playing an audio file.
#[async_trait]
pub trait Player: Send + Sync {
    fn name(&self) -> &str;

    /// Attempt playback, bounded by `timeout`.
    async fn play(&self, audio: &Path, timeout: Duration) -> PlaybackOutcome;
}

// ── Command player ─────────────────────────────────────────────

/// Runs `<program> <args...> <audio>` and waits for it to exit.
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Player for CommandPlayer {
    fn name(&self) -> &str {
        &self.program
    }

    async fn play(&self, audio: &Path, timeout: Duration) -> PlaybackOutcome {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args).arg(audio);
        run_detached(&self.program, cmd, timeout).await
    }
}

/// Spawn with stdio detached and wait up to `timeout`. The child is killed
/// if it outlives the timeout.
async fn run_detached(
    player: &str,
    mut cmd: tokio::process::Command,
    timeout: Duration,
) -> PlaybackOutcome {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    let failed = |reason: String| PlaybackOutcome::Failed {
        player: player.to_string(),
        reason,
    };

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return failed(format!("not available: {e}")),
    };

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) if status.success() => PlaybackOutcome::Played {
            player: player.to_string(),
        },
        Ok(Ok(status)) => failed(format!("exited with {status}")),
        Ok(Err(e)) => failed(e.to_string()),
        Err(_) => failed(format!("timed out after {}ms", timeout.as_millis())),
    }
}

// ── Fallback chain ─────────────────────────────────────────────

/// Tries each player in order until one succeeds.
pub struct FallbackPlayer {
    name: String,
    players: Vec<Box<dyn Player>>,
}

impl FallbackPlayer {
    pub fn new(players: Vec<Box<dyn Player>>) -> Self {
        let name = players
            .iter()
            .map(|p| p.name().to_string())
            .collect::<Vec<_>>()
            .join(" || ");
        Self { name, players }
    }
}

#[async_trait]
impl Player for FallbackPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn play(&self, audio: &Path, timeout: Duration) -> PlaybackOutcome {
        let mut last = PlaybackOutcome::Failed {
            player: self.name.clone(),
            reason: "no players configured".into(),
        };
        for player in &self.players {
            let outcome = player.play(audio, timeout).await;
            if outcome.is_played() {
                return outcome;
            }
            debug!(player = player.name(), ?outcome, "player failed, trying next");
            last = outcome;
        }
        last
    }
}

// ── Windows media player script ────────────────────────────────

/// Plays through `System.Windows.Media.MediaPlayer` using a temporary
/// PowerShell script, which is deleted afterwards. If the script cannot be
/// written, the file is handed to the default handler via `start`.
pub struct MediaPlayerScript {
    script_path: PathBuf,
    fallback: CommandPlayer,
}

impl MediaPlayerScript {
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            fallback: CommandPlayer::with_args("cmd", ["/C", "start", ""]),
        }
    }

    /// PowerShell source that plays `audio` and waits long enough for a
    /// short cue to finish.
    pub fn render_script(audio: &Path) -> String {
        let audio = audio.to_string_lossy().replace('\\', "/");
        format!(
            "Add-Type -AssemblyName presentationCore\n\
             $player = New-Object System.Windows.Media.MediaPlayer\n\
             $player.Open(\"{audio}\")\n\
             $player.Play()\n\
             Start-Sleep -Seconds 2\n"
        )
    }
}

#[async_trait]
impl Player for MediaPlayerScript {
    fn name(&self) -> &str {
        "powershell"
    }

    async fn play(&self, audio: &Path, timeout: Duration) -> PlaybackOutcome {
        if let Err(e) = std::fs::write(&self.script_path, Self::render_script(audio)) {
            info!(
                path = ?self.script_path,
                error = %e,
                "cannot write playback script, using default handler"
            );
            return self.fallback.play(audio, timeout).await;
        }

        let mut cmd = tokio::process::Command::new("powershell");
        cmd.args(["-ExecutionPolicy", "Bypass", "-File"])
            .arg(&self.script_path);
        let outcome = run_detached("powershell", cmd, timeout).await;

        if let Err(e) = std::fs::remove_file(&self.script_path) {
            debug!(path = ?self.script_path, error = %e, "failed to remove playback script");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn missing_program_is_a_failure_value() {
        let player = CommandPlayer::new("hookkit-no-such-player");
        let outcome = player.play(Path::new("cue.mp3"), SHORT).await;
        match outcome {
            PlaybackOutcome::Failed { player, reason } => {
                assert_eq!(player, "hookkit-no-such-player");
                assert!(reason.starts_with("not available"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_decides_outcome() {
        let ok = CommandPlayer::new("true").play(Path::new("cue.mp3"), SHORT).await;
        assert_eq!(ok, PlaybackOutcome::Played { player: "true".into() });

        let bad = CommandPlayer::new("false").play(Path::new("cue.mp3"), SHORT).await;
        assert!(matches!(bad, PlaybackOutcome::Failed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_player_times_out() {
        let player = CommandPlayer::with_args("sh", ["-c", "sleep 5"]);
        let started = std::time::Instant::now();
        let outcome = player.play(Path::new("cue.mp3"), Duration::from_millis(100)).await;
        assert!(started.elapsed() < Duration::from_secs(4));
        match outcome {
            PlaybackOutcome::Failed { reason, .. } => assert!(reason.contains("timed out")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn fallback_tries_next_player() {
        let chain = FallbackPlayer::new(vec![
            Box::new(CommandPlayer::new("hookkit-no-such-player")),
            Box::new(CommandPlayer::new("true")),
        ]);
        assert_eq!(chain.name(), "hookkit-no-such-player || true");
        let outcome = chain.play(Path::new("cue.mp3"), SHORT).await;
        assert_eq!(outcome, PlaybackOutcome::Played { player: "true".into() });
    }

    #[tokio::test]
    async fn fallback_reports_last_failure() {
        let chain = FallbackPlayer::new(vec![
            Box::new(CommandPlayer::new("hookkit-missing-a")),
            Box::new(CommandPlayer::new("hookkit-missing-b")),
        ]);
        let outcome = chain.play(Path::new("cue.mp3"), SHORT).await;
        assert!(matches!(
            outcome,
            PlaybackOutcome::Failed { ref player, .. } if player == "hookkit-missing-b"
        ));
    }

    #[test]
    fn only_failures_are_errors() {
        assert!(PlaybackOutcome::Skipped.into_result().is_ok());
        assert!(PlaybackOutcome::Disabled.into_result().is_ok());
        let err = PlaybackOutcome::Failed {
            player: "aplay".into(),
            reason: "exited with 1".into(),
        }
        .into_result()
        .unwrap_err();
        assert_eq!(err.to_string(), "playback error: aplay: exited with 1");
    }

    #[test]
    fn script_uses_forward_slashes() {
        let script = MediaPlayerScript::render_script(Path::new(r"C:\proj\.claude\audio\down.mp3"));
        assert!(script.contains("$player.Open(\"C:/proj/.claude/audio/down.mp3\")"));
        assert!(script.starts_with("Add-Type -AssemblyName presentationCore\n"));
        assert!(script.contains("Start-Sleep -Seconds 2"));
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn script_is_removed_after_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join(".temp-play.ps1");
        let player = MediaPlayerScript::new(&script);
        let outcome = player.play(Path::new("cue.mp3"), SHORT).await;
        // powershell is normally absent here; either way the script is gone
        let _ = outcome;
        assert!(!script.exists());
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn unwritable_script_uses_default_handler() {
        let player = MediaPlayerScript::new("/nonexistent/dir/.temp-play.ps1");
        let outcome = player.play(Path::new("cue.mp3"), SHORT).await;
        assert!(matches!(
            outcome,
            PlaybackOutcome::Failed { ref player, .. } if player == "cmd"
        ));
    }
}
