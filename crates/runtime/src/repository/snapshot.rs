//! Periodic frame, perception and memory snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use autoplay_core::{Frame, Memory, PerceptionSnapshot};

use crate::api::Result;

/// File name of the persisted memory inside the snapshot directory.
pub const MEMORY_FILE: &str = "memory.json";

/// Writes rate-limited snapshots into one directory.
///
/// Each snapshot is a `<unix>_<idx>.png` frame plus a `<unix>_<idx>.json`
/// perception record, and refreshes `memory.json`.
#[derive(Debug)]
pub struct SnapshotWriter {
    dir: PathBuf,
    interval_secs: f64,
    last_written: Option<f64>,
    index: u64,
}

impl SnapshotWriter {
    /// Create a writer, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>, interval_secs: f64) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            interval_secs,
            last_written: None,
            index: 0,
        })
    }

    pub fn memory_path(&self) -> PathBuf {
        self.dir.join(MEMORY_FILE)
    }

    /// Number of snapshots written so far.
    pub fn written(&self) -> u64 {
        self.index
    }

    pub fn is_due(&self, now: f64) -> bool {
        self.last_written
            .is_none_or(|last| now - last >= self.interval_secs)
    }

    /// Writes a snapshot if the interval elapsed. Returns the file stem used.
    pub fn maybe_write(
        &mut self,
        now: f64,
        frame: &Frame,
        snapshot: &PerceptionSnapshot,
        memory: &Memory,
    ) -> Result<Option<PathBuf>> {
        if !self.is_due(now) {
            return Ok(None);
        }

        let stem = self
            .dir
            .join(format!("{}_{:05}", now.floor() as i64, self.index));
        frame.save(stem.with_extension("png"))?;
        fs::write(stem.with_extension("json"), serde_json::to_vec(snapshot)?)?;
        self.flush_memory(memory)?;

        tracing::debug!(path = %stem.display(), "snapshot written");
        self.index += 1;
        self.last_written = Some(now);
        Ok(Some(stem))
    }

    /// Saves `memory` to `memory.json` regardless of the interval.
    pub fn flush_memory(&self, memory: &Memory) -> Result<()> {
        memory.save(self.memory_path())?;
        Ok(())
    }
}
