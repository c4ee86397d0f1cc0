use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use hookkit_config::{ConfigLoader, HooksConfig};
use hookkit_core::{HookError, HookPayload, read_stdin, resolve_project_dir};

mod notify;
mod skills;
mod track;

pub use notify::{notify_complete, notify_complete_with};
pub use skills::suggest_skills;
pub use track::{track_edit, track_edit_with};

/// Host hook utilities: edit tracking, skill suggestions, completion sound
#[derive(Parser)]
#[command(name = "hookkit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to hookkit.toml (default: <project>/.claude/hookkit.toml)
    #[arg(short, long, global = true, env = "HOOKKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an edited file in the session tracking document (PostToolUse)
    TrackEdit,
    /// Suggest skills matching the submitted prompt (UserPromptSubmit)
    SuggestSkills,
    /// Play the task-completion sound (Stop)
    NotifyComplete,
    /// Show the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn reads_stdin(&self) -> bool {
        !matches!(self, Commands::Config { .. })
    }
}

/// Everything a hook command needs for one invocation.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub payload: HookPayload,
    pub project_dir: PathBuf,
    pub config: HooksConfig,
}

impl HookContext {
    pub fn new(payload: HookPayload, project_dir: impl Into<PathBuf>, config: HooksConfig) -> Self {
        Self {
            payload,
            project_dir: project_dir.into(),
            config,
        }
    }
}

impl Cli {
    pub async fn run(self) -> hookkit_core::Result<()> {
        // The stdin timeout is configurable, so config is loaded against the
        // env/cwd project root first and reloaded if the payload moves it.
        let initial_dir = resolve_project_dir(&HookPayload::default());
        let (mut loader, mut load_error) = load_config(self.config.as_deref(), &initial_dir);

        let payload = if self.command.reads_stdin() {
            HookPayload::parse(read_stdin(loader.config().input.stdin_timeout()).await)
        } else {
            HookPayload::default()
        };

        let project_dir = resolve_project_dir(&payload);
        if project_dir != initial_dir && self.config.is_none() {
            (loader, load_error) = load_config(None, &project_dir);
        }

        self.init_tracing(loader.config());

        if let Some(e) = load_error {
            warn!(
                path = ?loader.path(),
                error = %e,
                "ignoring invalid configuration, using defaults"
            );
        }
        for warning in loader.warnings() {
            warn!("{warning}");
        }
        debug!(project = ?project_dir, payload_bytes = payload.raw().len(), "hook invoked");

        let ctx = HookContext::new(payload, project_dir, loader.get());
        match self.command {
            Commands::TrackEdit => match track_edit(&ctx) {
                Some(output) => emit(&output),
                None => Ok(()),
            },
            Commands::SuggestSkills => emit(&suggest_skills(&ctx).render()),
            Commands::NotifyComplete => notify_complete(&ctx).await.into_result(),
            Commands::Config { json } => Self::cmd_config(&ctx.config, json),
        }
    }

    /// Resolve log level: --verbose > --quiet > --log-level > RUST_LOG > config
    fn init_tracing(&self, config: &HooksConfig) {
        let cli_level = if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            self.log_level.as_deref()
        };
        let filter = match cli_level {
            Some(level) => tracing_subscriber::EnvFilter::new(level),
            None => tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        };

        // stdout belongs to the host, so logs always go to stderr.
        let result = if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .with_target(true)
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
        };
        if let Err(e) = result {
            eprintln!("hookkit: logging unavailable: {e}");
        }
    }

    fn cmd_config(config: &HooksConfig, json: bool) -> hookkit_core::Result<()> {
        if json {
            emit(&format!("{}\n", serde_json::to_string_pretty(config)?))
        } else {
            let rendered =
                toml::to_string_pretty(config).map_err(|e| HookError::Config(e.to_string()))?;
            emit(&rendered)
        }
    }
}

/// Load config, falling back to defaults when the file is unusable. The
/// error is handed back so it can be logged once tracing is up.
fn load_config(explicit: Option<&Path>, project_dir: &Path) -> (ConfigLoader, Option<HookError>) {
    match ConfigLoader::load(explicit, project_dir) {
        Ok(loader) => (loader, None),
        Err(e) => {
            let path = ConfigLoader::resolve_path(explicit, project_dir);
            (ConfigLoader::defaults(path), Some(e))
        }
    }
}

/// Write hook output to stdout and flush it before the process exits.
fn emit(text: &str) -> hookkit_core::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_hook_subcommands() {
        let cli = Cli::try_parse_from(["hookkit", "track-edit"]).unwrap();
        assert!(matches!(cli.command, Commands::TrackEdit));
        assert!(cli.command.reads_stdin());

        let cli = Cli::try_parse_from(["hookkit", "suggest-skills", "-v"]).unwrap();
        assert!(matches!(cli.command, Commands::SuggestSkills));
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["hookkit", "config", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { json: true }));
        assert!(!cli.command.reads_stdin());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["hookkit", "notify-complete", "-v", "-q"]).is_err());
    }

    #[test]
    fn unusable_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hookkit.toml");
        std::fs::write(&path, "[input]\nstdin_timeout_ms = 0\n").unwrap();

        let (loader, error) = load_config(Some(&path), dir.path());
        assert!(error.is_some());
        assert_eq!(loader.path(), path.as_path());
        assert_eq!(loader.config().input.stdin_timeout_ms, 100);
    }

    #[test]
    fn missing_config_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let (_, error) = load_config(Some(&path), dir.path());
        assert!(error.is_none());
    }
}
