use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Files touched during one host session, persisted between invocations.
///
/// `modified_files` and `project_areas` are ordered sets: insertion order is
/// kept and entries never repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    pub session_id: String,
    #[serde(default)]
    pub modified_files: Vec<String>,
    #[serde(default)]
    pub project_areas: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl TrackingRecord {
    /// A fresh record whose session id is `now` in epoch milliseconds.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            session_id: now.timestamp_millis().to_string(),
            modified_files: Vec::new(),
            project_areas: Vec::new(),
            start_time: now,
            last_updated: now,
        }
    }

    /// Merge one classified edit into the record. Returns `true` when the
    /// path was not tracked before.
    pub fn record_edit(&mut self, path: &str, areas: &[String], now: DateTime<Utc>) -> bool {
        let added = if self.modified_files.iter().any(|f| f == path) {
            false
        } else {
            self.modified_files.push(path.to_string());
            true
        };

        for area in areas {
            if !self.project_areas.contains(area) {
                self.project_areas.push(area.clone());
            }
        }

        self.last_updated = now;
        added
    }

    pub fn file_count(&self) -> usize {
        self.modified_files.len()
    }
}
