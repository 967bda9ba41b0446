//! JSON snapshot persistence
//!
//! The whole system state (roster, board/proposal/feedback collections,
//! notifications) round-trips through a single JSON file: the persisted
//! mapping of entity-lists. Writes go through a temp file and rename so a
//! crash mid-save never leaves a torn snapshot.

use council_application::state::CouncilState;
use council_domain::{Notification, User};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from snapshot load/save
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the system persists between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub state: CouncilState,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Snapshot file reader/writer.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot. A missing file is a fresh start, not an error.
    pub fn load(&self) -> Result<Snapshot, SnapshotError> {
        if !self.path.exists() {
            debug!("no snapshot at {}, starting fresh", self.path.display());
            return Ok(Snapshot::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Persist the snapshot atomically (temp file + rename).
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        debug!("snapshot saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::{Task, User, UserRole};

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("council.json"));

        let snapshot = store.load().unwrap();
        assert!(snapshot.users.is_empty());
        assert!(snapshot.state.tasks.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("nested").join("council.json"));

        let mut snapshot = Snapshot::default();
        snapshot.users.push(User::new("2023-017", "Mei", UserRole::User, Utc::now()));
        snapshot
            .state
            .tasks
            .push(Task::new("Clean the lab", "benches too", "u1", "Wei", Utc::now()));

        store.save(&snapshot).unwrap();
        let restored = store.load().unwrap();

        assert_eq!(restored.users.len(), 1);
        assert_eq!(restored.users[0].name, "Mei");
        assert_eq!(restored.state.tasks[0].title, "Clean the lab");
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("council.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonSnapshotStore::new(path);
        assert!(matches!(store.load(), Err(SnapshotError::Parse(_))));
    }
}
