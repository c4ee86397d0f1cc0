use thiserror::Error;

/// Unified error type for every hookkit crate.
#[derive(Error, Debug)]
pub enum HookError {
    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Skill errors ───────────────────────────────────────────
    #[error("frontmatter error: {0}")]
    Frontmatter(String),

    #[error("skill error: {0}")]
    Skill(String),

    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // ── Notifier errors ────────────────────────────────────────
    #[error("playback error: {0}")]
    Playback(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
