//! # hookkit-tracker
//!
//! Tracks which files were edited during a host session. Each edit is
//! classified into project areas by path pattern and merged into a small
//! JSON document that accumulates across invocations.

pub mod areas;
pub mod record;
pub mod store;

pub use areas::{AreaClassifier, OTHER_AREA};
pub use record::TrackingRecord;
pub use store::TrackingStore;

use chrono::Utc;
use hookkit_config::TrackerConfig;
use hookkit_core::{HookPayload, display_relative, env_fallback_with};
use std::path::{Path, PathBuf};
use tracing::info;

/// Env vars consulted when the payload names no file.
pub const FILE_PATH_ENV: [&str; 2] = ["TOOL_FILE_PATH", "FILE_PATH"];

/// Pick the edited file from the payload, falling back to the environment.
pub fn resolve_file_path(payload: &HookPayload) -> Option<String> {
    resolve_file_path_with(payload, |name| std::env::var(name).ok())
}

pub fn resolve_file_path_with<F>(payload: &HookPayload, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    payload
        .first_field(&[
            &["tool_input", "file_path"],
            &["tool_input", "path"],
            &["file_path"],
        ])
        .or_else(|| env_fallback_with(&FILE_PATH_ENV, env))
}

/// Result of tracking one edit, ready for display.
#[derive(Debug, Clone)]
pub struct TrackedEdit {
    pub relative_path: String,
    pub areas: Vec<String>,
    pub total_files: usize,
    pub newly_added: bool,
}

impl TrackedEdit {
    /// The status block printed after an edit.
    pub fn render(&self) -> String {
        format!(
            "\nEdit tracking:\n  -> {} [{}]\n  ({} files modified this session)\n",
            self.relative_path,
            self.areas.join(", "),
            self.total_files,
        )
    }
}

pub struct EditTracker {
    project_dir: PathBuf,
    classifier: AreaClassifier,
    store: TrackingStore,
}

impl EditTracker {
    pub fn new(project_dir: &Path, config: &TrackerConfig) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            classifier: AreaClassifier::new(&config.areas),
            store: TrackingStore::new(config.tracking_path(project_dir)),
        }
    }

    pub fn store(&self) -> &TrackingStore {
        &self.store
    }

    /// Classify `file_path` and merge it into the session record.
    pub fn track(&self, file_path: &str) -> TrackedEdit {
        let areas = self.classifier.classify(file_path);
        let mut newly_added = false;
        let record = self.store.update(|record| {
            newly_added = record.record_edit(file_path, &areas, Utc::now());
        });

        info!(
            file = file_path,
            areas = ?areas,
            total = record.file_count(),
            "tracked edit"
        );

        TrackedEdit {
            relative_path: display_relative(&self.project_dir, file_path),
            areas,
            total_files: record.file_count(),
            newly_added,
        }
    }
}
