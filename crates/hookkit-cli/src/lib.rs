//! # hookkit-cli
//!
//! Command-line entry points invoked by the host's hook configuration.
//!
//! ## Commands
//!
//! - `hookkit track-edit` (PostToolUse): record the edited file and its areas
//! - `hookkit suggest-skills` (UserPromptSubmit): suggest skills for the prompt
//! - `hookkit notify-complete` (Stop): play the completion sound
//! - `hookkit config`: print the resolved configuration
//!
//! Hook output goes to stdout; logs go to stderr.

pub mod commands;

pub use commands::{Cli, HookContext};
