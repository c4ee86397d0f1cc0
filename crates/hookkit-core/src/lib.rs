//! # hookkit-core
//!
//! Shared vocabulary for the hookkit utilities: the unified error type,
//! stdin payload reading, and project-root resolution. Nothing here holds
//! state between invocations.

pub mod error;
pub mod input;
pub mod payload;
pub mod project;

pub use error::{HookError, Result};
pub use input::{DEFAULT_STDIN_TIMEOUT, read_stdin, read_with_timeout};
pub use payload::{HookPayload, env_fallback, env_fallback_with};
pub use project::{display_relative, resolve_in_project, resolve_project_dir};
