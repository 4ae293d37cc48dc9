use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::user::User;
use crate::stores::storage::{MemoryStorage, Storage};

/// Key the user sequence is stored under unless configured otherwise
pub const DEFAULT_SNAPSHOT_KEY: &str = "users";

/// Whole-sequence persistence for the user directory
pub trait SnapshotStore: Send + Sync {
    /// Read the last committed sequence. Absent or unreadable snapshots load as empty.
    fn load(&self) -> Vec<User>;

    /// Replace the stored sequence with `users`
    fn save(&self, users: &[User]) -> Result<()>;
}

/// JSON snapshot kept under a single key of a `Storage`
pub struct Snapshot<S> {
    storage: S,
    key: String,
}

impl<S: Storage> Snapshot<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_SNAPSHOT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl Snapshot<MemoryStorage> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<S: Storage> SnapshotStore for Snapshot<S> {
    fn load(&self) -> Vec<User> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read snapshot, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<User>>(&raw) {
            Ok(users) => {
                debug!(key = %self.key, users = users.len(), "Snapshot loaded");
                users
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Malformed snapshot, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, users: &[User]) -> Result<()> {
        let raw = serde_json::to_string(users).context("Failed to encode snapshot")?;
        self.storage
            .set_item(&self.key, &raw)
            .context(format!("Failed to write snapshot '{}'", self.key))?;

        debug!(key = %self.key, users = users.len(), "Snapshot committed");
        Ok(())
    }
}
