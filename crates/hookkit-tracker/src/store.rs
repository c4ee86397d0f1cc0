use chrono::Utc;
use hookkit_core::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::record::TrackingRecord;

/// On-disk home of the session [`TrackingRecord`].
///
/// There is no locking. Invocations arrive one at a time from the host and
/// the last write wins.
pub struct TrackingStore {
    path: PathBuf,
}

impl TrackingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record. Returns `Ok(None)` when the file is absent.
    pub fn read(&self) -> Result<Option<TrackingRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// The stored record, or a fresh one if it is missing or unreadable.
    pub fn load(&self) -> TrackingRecord {
        match self.read() {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(path = ?self.path, "no tracking file, starting new session");
                TrackingRecord::new(Utc::now())
            }
            Err(e) => {
                debug!(
                    path = ?self.path,
                    error = %e,
                    "unreadable tracking file, starting new session"
                );
                TrackingRecord::new(Utc::now())
            }
        }
    }

    /// Write the full record as pretty JSON, creating parent directories.
    pub fn save(&self, record: &TrackingRecord) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load, apply `f`, and write back in one scoped step.
    ///
    /// Write failures are logged and swallowed; the updated record is
    /// returned either way.
    pub fn update<F>(&self, f: F) -> TrackingRecord
    where
        F: FnOnce(&mut TrackingRecord),
    {
        let mut record = self.load();
        f(&mut record);
        if let Err(e) = self.save(&record) {
            warn!(path = ?self.path, error = %e, "failed to write tracking file");
        }
        record
    }
}
