//! JSON persistence for [`Memory`].
//!
//! # File Format
//!
//! ```text
//! {
//!   "visited_cells": [u32...],                  packed cells, ascending
//!   "used_interactables": [[x, y, kind, t]...], sorted by (x, y, kind)
//!   "last_positions": [[x, y]...],              oldest first
//!   "last_progress_t": f64,
//!   "seen_hashes": [u64...],                    oldest first
//!   "recent_dialogs": [string...]               oldest first
//! }
//! ```
//!
//! Ordering is fixed so the same memory always serializes to the same bytes.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Memory, MemoryConfig, RingBuffer, pack_cell, unpack_cell};
use crate::clock::Clock;
use crate::error::Result;
use crate::types::{Cell, Interactable};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct MemoryRecord {
    visited_cells: Vec<u32>,
    used_interactables: Vec<(i32, i32, String, f64)>,
    last_positions: Vec<(i32, i32)>,
    last_progress_t: Option<f64>,
    seen_hashes: Vec<u64>,
    recent_dialogs: Vec<String>,
}

impl Memory {
    /// Serializes the persisted fields to JSON.
    ///
    /// Visited cells outside the packable range are logged and left out.
    pub fn to_json(&self) -> Result<String> {
        // Cell order differs from packed order once negative x is involved.
        let mut visited_cells: Vec<u32> = self
            .visited_cells
            .iter()
            .filter_map(|&cell| match pack_cell(cell) {
                Ok(packed) => Some(packed),
                Err(error) => {
                    tracing::warn!(%cell, %error, "visited cell not persisted");
                    None
                }
            })
            .collect();
        visited_cells.sort_unstable();

        let record = MemoryRecord {
            visited_cells,
            used_interactables: self
                .used_interactables
                .iter()
                .map(|(item, &t)| (item.cell.x, item.cell.y, item.kind.clone(), t))
                .collect(),
            last_positions: self.position_history.iter().map(|c| (c.x, c.y)).collect(),
            last_progress_t: Some(self.last_progress_t),
            seen_hashes: self.recent_fingerprints.iter().copied().collect(),
            recent_dialogs: self.recent_dialogs.iter().cloned().collect(),
        };
        Ok(serde_json::to_string(&record)?)
    }

    /// Restores memory from JSON produced by [`Memory::to_json`].
    ///
    /// Missing fields fall back to their empty values; a missing progress
    /// timestamp falls back to the clock's current time.
    pub fn from_json(json: &str, config: MemoryConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let record: MemoryRecord = serde_json::from_str(json)?;
        let mut memory = Memory::new(config, clock);

        memory.visited_cells = record.visited_cells.into_iter().map(unpack_cell).collect();
        memory.used_interactables = record
            .used_interactables
            .into_iter()
            .map(|(x, y, kind, t)| (Interactable::new(x, y, kind), t))
            .collect();
        memory.position_history = RingBuffer::from_iter_bounded(
            memory.config.position_capacity,
            record.last_positions.into_iter().map(Cell::from),
        );
        if let Some(t) = record.last_progress_t {
            memory.last_progress_t = t;
        }
        memory.recent_fingerprints =
            RingBuffer::from_iter_bounded(memory.config.fingerprint_capacity, record.seen_hashes);
        memory.recent_dialogs =
            RingBuffer::from_iter_bounded(memory.config.dialog_capacity, record.recent_dialogs);

        Ok(memory)
    }

    /// Writes the persisted form to `path` atomically.
    ///
    /// Parent directories are created as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        tracing::debug!(
            path = %path.display(),
            cells = self.visited_cells.len(),
            "saved memory"
        );
        Ok(())
    }

    /// Reads memory previously written by [`Memory::save`].
    pub fn load(path: impl AsRef<Path>, config: MemoryConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let memory = Self::from_json(&json, config, clock)?;

        tracing::debug!(
            path = %path.display(),
            cells = memory.visited_cells.len(),
            "loaded memory"
        );
        Ok(memory)
    }
}
