use hookkit_core::{HookError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::schema::{ConfigWarning, HooksConfig, SkillSource};

/// Loads the hookkit configuration for one invocation.
///
/// Hooks are short-lived, so there is no reload or watching: the file is
/// read once, env overrides are applied, and the result is validated.
pub struct ConfigLoader {
    config: HooksConfig,
    config_path: PathBuf,
    warnings: Vec<ConfigWarning>,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > HOOKKIT_CONFIG env > <project>/.claude/hookkit.toml
    pub fn resolve_path(explicit: Option<&Path>, project_dir: &Path) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("HOOKKIT_CONFIG") {
            if !p.is_empty() {
                return PathBuf::from(p);
            }
        }
        project_dir.join(".claude").join("hookkit.toml")
    }

    /// Load the config from disk, falling back to defaults when the file
    /// does not exist. Parse failures and validation errors are returned.
    pub fn load(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let config_path = Self::resolve_path(explicit, project_dir);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            Self::parse(&raw).map_err(|e| {
                HookError::Config(format!("failed to parse {}: {}", config_path.display(), e))
            })?
        } else {
            debug!(?config_path, "config file not found, using defaults");
            HooksConfig::default()
        };

        let config = Self::apply_env_overrides(config);
        let warnings = config
            .validate()
            .map_err(|reason| HookError::ConfigValidation {
                field: config_path.display().to_string(),
                reason,
            })?;

        Ok(Self {
            config,
            config_path,
            warnings,
        })
    }

    /// A loader holding the defaults (plus env overrides) for `config_path`.
    /// Used when the file on disk cannot be used.
    pub fn defaults(config_path: PathBuf) -> Self {
        Self {
            config: Self::apply_env_overrides(HooksConfig::default()),
            config_path,
            warnings: Vec::new(),
        }
    }

    pub fn parse(raw: &str) -> std::result::Result<HooksConfig, toml::de::Error> {
        toml::from_str::<HooksConfig>(raw)
    }

    /// Get a snapshot of the current config.
    pub fn get(&self) -> HooksConfig {
        self.config.clone()
    }

    pub fn config(&self) -> &HooksConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Non-fatal findings from validation, to be logged once tracing is up.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Apply env var overrides (HOOKKIT_LOG_LEVEL, HOOKKIT_SKILL_SOURCE, etc.)
    pub fn apply_env_overrides(config: HooksConfig) -> HooksConfig {
        Self::apply_env_overrides_with(config, |name| std::env::var(name).ok())
    }

    pub fn apply_env_overrides_with<F>(mut config: HooksConfig, env: F) -> HooksConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("HOOKKIT_LOG_LEVEL").filter(|v| !v.is_empty()) {
            config.logging.level = v;
        }
        if let Some(v) = env("HOOKKIT_SKILL_SOURCE") {
            if let Ok(source) = v.parse::<SkillSource>() {
                config.skills.source = source;
            }
        }
        if let Some(v) = env("HOOKKIT_AUDIO_FILE").filter(|v| !v.is_empty()) {
            config.notify.audio_file = PathBuf::from(v);
        }
        if let Some(v) = env("HOOKKIT_NOTIFY_ENABLED") {
            match v.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "no" | "off" => config.notify.enabled = false,
                "1" | "true" | "yes" | "on" => config.notify.enabled = true,
                _ => {}
            }
        }
        config
    }
}
