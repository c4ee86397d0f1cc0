//! # hookkit-config
//!
//! Configuration for the hookkit utilities. Reads `hookkit.toml` from the
//! project's `.claude` directory (or an explicit path), then applies
//! environment variable overrides. Every field has a default, so a missing
//! file is the normal case.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    AreaConfig, ConfigWarning, HooksConfig, InputConfig, LoggingConfig, NotifyConfig, SkillSource,
    SkillsConfig, TrackerConfig, WarningSeverity, default_areas,
};
