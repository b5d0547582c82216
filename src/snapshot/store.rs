//! Checkpoint stores and write throttling.
//!
//! The simulation never decides when to persist. A caller hands snapshots to
//! a [`CheckpointStore`]; wrapping it in [`Throttled`] drops writes that
//! arrive too soon after the last successful one for the same universe.

use super::{PersistError, RawUniverse, write_atomic};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Minimum gap between two checkpoints of one universe.
pub const DEFAULT_CHECKPOINT_INTERVAL_MS: i64 = 60_000;

/// Destination for universe snapshots.
pub trait CheckpointStore {
    /// Persist `snapshot` as the latest state of `universe_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be stored.
    fn put(&mut self, universe_id: &str, snapshot: &RawUniverse) -> Result<(), PersistError>;
}

/// Stores each universe as `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// File a universe id is stored in.
    #[must_use]
    pub fn path_for(&self, universe_id: &str) -> PathBuf {
        self.dir.join(format!("{universe_id}.json"))
    }

    /// Directory holding the snapshots.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CheckpointStore for FileStore {
    fn put(&mut self, universe_id: &str, snapshot: &RawUniverse) -> Result<(), PersistError> {
        let json = serde_json::to_vec(snapshot)?;
        write_atomic(&self.path_for(universe_id), &json)
    }
}

/// Result of a throttled checkpoint attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointOutcome {
    /// The snapshot was written.
    Saved,
    /// The previous write was too recent; nothing was written.
    Skipped {
        /// Milliseconds since the last successful write.
        since_last_ms: i64,
    },
}

/// Per-universe rate limiter in front of a store.
#[derive(Debug)]
pub struct Throttled<S> {
    inner: S,
    interval_ms: i64,
    last_saved: HashMap<String, i64>,
}

impl<S: CheckpointStore> Throttled<S> {
    /// Wrap `inner`, allowing one write per universe every `interval_ms`.
    #[must_use]
    pub fn new(inner: S, interval_ms: i64) -> Self {
        Self {
            inner,
            interval_ms,
            last_saved: HashMap::new(),
        }
    }

    /// Write `snapshot` unless the last write for `universe_id` was less than
    /// the interval before `now_ms`.
    ///
    /// A failed write does not count as the last write.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn checkpoint(
        &mut self,
        universe_id: &str,
        snapshot: &RawUniverse,
        now_ms: i64,
    ) -> Result<CheckpointOutcome, PersistError> {
        if let Some(&last) = self.last_saved.get(universe_id) {
            let since_last_ms = now_ms - last;
            if since_last_ms < self.interval_ms {
                debug!(universe_id, since_last_ms, "checkpoint skipped");
                return Ok(CheckpointOutcome::Skipped { since_last_ms });
            }
        }
        self.inner.put(universe_id, snapshot)?;
        self.last_saved.insert(universe_id.to_string(), now_ms);
        debug!(universe_id, "checkpoint saved");
        Ok(CheckpointOutcome::Saved)
    }

    /// The wrapped store.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}
