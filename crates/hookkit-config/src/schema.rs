use hookkit_core::resolve_in_project;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration, mapped from `hookkit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    pub input: InputConfig,
    pub tracker: TrackerConfig,
    pub skills: SkillsConfig,
    pub notify: NotifyConfig,
    pub logging: LoggingConfig,
}

// ── Input ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// How long to wait for the host to close stdin, in milliseconds.
    pub stdin_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            stdin_timeout_ms: 100,
        }
    }
}

impl InputConfig {
    pub fn stdin_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.stdin_timeout_ms)
    }
}

// ── Edit tracker ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Session tracking document, relative to the project root.
    pub tracking_file: PathBuf,
    /// Area classification table. Order matters; replaces the built-in
    /// table when set.
    pub areas: Vec<AreaConfig>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracking_file: PathBuf::from(".claude/.session-tracking.json"),
            areas: default_areas(),
        }
    }
}

impl TrackerConfig {
    pub fn tracking_path(&self, root: &Path) -> PathBuf {
        resolve_in_project(root, &self.tracking_file)
    }
}

/// One project area and the path patterns that place a file in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaConfig {
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl AreaConfig {
    fn new(name: &str, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// The built-in area table, applied to `/`-normalized paths.
pub fn default_areas() -> Vec<AreaConfig> {
    vec![
        AreaConfig::new("server", &[r"apps[/\\]server[/\\]", r"\.ts$"]),
        AreaConfig::new("admin", &[r"apps[/\\]admin[/\\]", r"\.(vue|ts|tsx)$"]),
        AreaConfig::new(
            "miniprogram",
            &[r"apps[/\\]miniprogram[/\\]", r"\.(js|wxml|wxss|json)$"],
        ),
        AreaConfig::new("prisma", &[r"prisma[/\\]", r"schema\.prisma$"]),
        AreaConfig::new("config", &[r"\.json$", r"\.yaml$", r"\.yml$", r"\.toml$"]),
        AreaConfig::new("docs", &[r"docs[/\\]", r"\.md$"]),
        AreaConfig::new(
            "tests",
            &[r"tests?[/\\]", r"\.test\.[tj]sx?$", r"\.spec\.[tj]sx?$"],
        ),
    ]
}

// ── Skills ─────────────────────────────────────────────────────

/// Where skill descriptors come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillSource {
    /// Front-matter descriptors when any exist, otherwise the legacy rules file.
    #[default]
    Auto,
    /// Per-skill `SKILL.md` documents only.
    Frontmatter,
    /// The single `skill-rules.json` document only.
    Legacy,
}

impl FromStr for SkillSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "frontmatter" | "front-matter" => Ok(Self::Frontmatter),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown skill source '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub source: SkillSource,
    /// Directory of per-skill descriptor folders.
    pub skills_dir: PathBuf,
    /// Legacy single rules document.
    pub rules_file: PathBuf,
    /// Auxiliary rule documents, listed for display only.
    pub rules_dir: PathBuf,
    /// Also scan `~/.claude/skills` after the project directory.
    pub include_user_skills: bool,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            source: SkillSource::Auto,
            skills_dir: PathBuf::from(".claude/skills"),
            rules_file: PathBuf::from(".claude/skills/skill-rules.json"),
            rules_dir: PathBuf::from(".claude/rules"),
            include_user_skills: true,
        }
    }
}

impl SkillsConfig {
    pub fn skills_path(&self, root: &Path) -> PathBuf {
        resolve_in_project(root, &self.skills_dir)
    }

    pub fn rules_file_path(&self, root: &Path) -> PathBuf {
        resolve_in_project(root, &self.rules_file)
    }

    pub fn rules_dir_path(&self, root: &Path) -> PathBuf {
        resolve_in_project(root, &self.rules_dir)
    }
}

// ── Notifier ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub enabled: bool,
    /// Audio cue played on task completion.
    pub audio_file: PathBuf,
    /// Temporary script location for platforms that play through a script.
    pub temp_script: PathBuf,
    /// Upper bound on a single playback attempt.
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            audio_file: PathBuf::from(".claude/audio/down.mp3"),
            temp_script: PathBuf::from(".claude/.temp-play.ps1"),
            timeout_secs: 10,
        }
    }
}

impl NotifyConfig {
    pub fn audio_path(&self, root: &Path) -> PathBuf {
        resolve_in_project(root, &self.audio_file)
    }

    pub fn temp_script_path(&self, root: &Path) -> PathBuf {
        resolve_in_project(root, &self.temp_script)
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            WarningSeverity::Error => "error",
            WarningSeverity::Warning => "warning",
        };
        write!(f, "{} {}: {}", label, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, " ({})", h)?;
        }
        Ok(())
    }
}

impl HooksConfig {
    /// Check the config for suspicious values. Returns `Err` listing every
    /// error-severity finding; warnings come back in `Ok`.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Stdin timeout ───
        if self.input.stdin_timeout_ms == 0 {
            warnings.push(ConfigWarning {
                field: "input.stdin_timeout_ms".into(),
                message: "timeout is 0, hook payloads would never be read".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 100".into()),
            });
        } else if self.input.stdin_timeout_ms > 5_000 {
            warnings.push(ConfigWarning {
                field: "input.stdin_timeout_ms".into(),
                message: format!(
                    "timeout {}ms may stall the host when nothing is piped",
                    self.input.stdin_timeout_ms
                ),
                severity: WarningSeverity::Warning,
                hint: Some("Hooks normally receive their payload within 100ms".into()),
            });
        }

        // ── Areas ───
        for (i, area) in self.tracker.areas.iter().enumerate() {
            if area.name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("tracker.areas[{i}].name"),
                    message: "area name is empty".into(),
                    severity: WarningSeverity::Error,
                    hint: None,
                });
            }
            if area.patterns.is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("tracker.areas[{i}].patterns"),
                    message: format!("area '{}' has no patterns and never matches", area.name),
                    severity: WarningSeverity::Warning,
                    hint: None,
                });
            }
        }

        // ── Notifier ───
        if self.notify.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                field: "notify.timeout_secs".into(),
                message: "timeout is 0, playback would always be cut off".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 10".into()),
            });
        }

        // ── Logging ───
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}
