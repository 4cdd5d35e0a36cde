//! Durable session state of the agent.
//!
//! [`Memory`] tracks where the player has been, which interactables were
//! used, and when the session last made measurable progress. It is owned by
//! the runner and lent to the policy and navigator each tick.

mod packing;
mod persist;
mod ring_buffer;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::types::{Cell, Interactable, PerceptionSnapshot};

pub use packing::{pack_cell, unpack_cell};
pub use ring_buffer::RingBuffer;

/// Capacities and thresholds for [`Memory`].
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryConfig {
    pub position_capacity: usize,
    pub fingerprint_capacity: usize,
    pub dialog_capacity: usize,
    /// How many of the newest fingerprints a new one is compared against.
    pub novelty_window: usize,
    /// Consecutive ticks of absence before an interactable counts as resolved.
    pub miss_strikes: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            position_capacity: 30,
            fingerprint_capacity: 50,
            dialog_capacity: 5,
            novelty_window: 5,
            miss_strikes: 2,
        }
    }
}

/// Session memory of the autoplay agent.
///
/// Invariants:
/// - `visited_cells` only grows
/// - `position_history` never exceeds its capacity
/// - `last_progress_t` never decreases
/// - an interactable leaves the active set only once its miss counter
///   reaches `miss_strikes`
#[derive(Debug)]
pub struct Memory {
    config: MemoryConfig,
    clock: Arc<dyn Clock>,
    visited_cells: BTreeSet<Cell>,
    used_interactables: BTreeMap<Interactable, f64>,
    position_history: RingBuffer<Cell>,
    last_progress_t: f64,
    recent_fingerprints: RingBuffer<u64>,
    recent_dialogs: RingBuffer<String>,
    active_interactables: BTreeSet<Interactable>,
    miss_counts: BTreeMap<Interactable, u32>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(MemoryConfig::default(), Arc::new(SystemClock))
    }
}

impl Memory {
    pub fn new(config: MemoryConfig, clock: Arc<dyn Clock>) -> Self {
        let last_progress_t = clock.now();
        Self {
            position_history: RingBuffer::new(config.position_capacity),
            recent_fingerprints: RingBuffer::new(config.fingerprint_capacity),
            recent_dialogs: RingBuffer::new(config.dialog_capacity),
            config,
            clock,
            visited_cells: BTreeSet::new(),
            used_interactables: BTreeMap::new(),
            last_progress_t,
            active_interactables: BTreeSet::new(),
            miss_counts: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn visited_cells(&self) -> &BTreeSet<Cell> {
        &self.visited_cells
    }

    pub fn has_visited(&self, cell: Cell) -> bool {
        self.visited_cells.contains(&cell)
    }

    pub fn used_interactables(&self) -> &BTreeMap<Interactable, f64> {
        &self.used_interactables
    }

    pub fn is_used(&self, interactable: &Interactable) -> bool {
        self.used_interactables.contains_key(interactable)
    }

    pub fn position_history(&self) -> &RingBuffer<Cell> {
        &self.position_history
    }

    /// Newest recorded position, observed or dead-reckoned.
    pub fn current_position(&self) -> Option<Cell> {
        self.position_history.last().copied()
    }

    pub fn last_progress_t(&self) -> f64 {
        self.last_progress_t
    }

    pub fn recent_fingerprints(&self) -> &RingBuffer<u64> {
        &self.recent_fingerprints
    }

    pub fn recent_dialogs(&self) -> &RingBuffer<String> {
        &self.recent_dialogs
    }

    /// Interactables currently detected or still inside their miss grace period.
    pub fn active_interactables(&self) -> &BTreeSet<Interactable> {
        &self.active_interactables
    }

    /// Records that progress was made for `reason`.
    pub fn mark_progress(&mut self, reason: &str) {
        let now = self.clock.now();
        self.last_progress_t = self.last_progress_t.max(now);
        tracing::info!(reason, "progress");
    }

    /// Records a visit to `cell`; progress is marked only on the first visit.
    pub fn mark_visited(&mut self, cell: Cell) {
        if self.visited_cells.insert(cell) {
            self.mark_progress("visited new cell");
        }
        self.position_history.push(cell);
    }

    /// Records (or refreshes) the use of an interactable.
    pub fn mark_used_interactable(&mut self, interactable: &Interactable) {
        let now = self.clock.now();
        self.used_interactables.insert(interactable.clone(), now);
        self.mark_progress(&format!("used {}", interactable.kind));
    }

    /// True when the position history is full and spans at most one cell on
    /// both axes.
    pub fn is_stuck(&self) -> bool {
        if !self.position_history.is_full() {
            return false;
        }
        let mut cells = self.position_history.iter();
        let Some(first) = cells.next() else {
            return false;
        };
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for cell in cells {
            min_x = min_x.min(cell.x);
            max_x = max_x.max(cell.x);
            min_y = min_y.min(cell.y);
            max_y = max_y.max(cell.y);
        }
        max_x - min_x <= 1 && max_y - min_y <= 1
    }

    /// True when more than `timeout_secs` passed since the last progress.
    pub fn no_progress(&self, timeout_secs: f64) -> bool {
        self.clock.now() - self.last_progress_t > timeout_secs
    }

    /// Folds one tick of perception into memory.
    ///
    /// The observed position is recorded first, then novelty tracking runs.
    pub fn update(&mut self, snapshot: &PerceptionSnapshot) {
        if let Some(position) = snapshot.position {
            self.mark_visited(position);
        }
        self.update_progress(snapshot);
    }

    /// Updates the novelty trackers from `snapshot`.
    pub fn update_progress(&mut self, snapshot: &PerceptionSnapshot) {
        if let Some(fingerprint) = snapshot.fingerprint {
            let seen_recently = self
                .recent_fingerprints
                .recent(self.config.novelty_window)
                .any(|&seen| seen == fingerprint);
            if !seen_recently {
                self.mark_progress("screen hash changed");
            }
            self.recent_fingerprints.push(fingerprint);
        }

        self.track_interactables(&snapshot.interactables);

        if let Some(text) = snapshot.dialog_text.as_deref().filter(|t| !t.is_empty()) {
            if !self.recent_dialogs.iter().any(|seen| seen == text) {
                self.mark_progress("new dialog text");
            }
            self.recent_dialogs.push(text.to_owned());
        }
    }

    fn track_interactables(&mut self, detected: &[Interactable]) {
        let current: BTreeSet<Interactable> = detected.iter().cloned().collect();
        let mut resolved = Vec::new();

        for item in &self.active_interactables {
            if current.contains(item) {
                self.miss_counts.remove(item);
                continue;
            }
            let misses = self.miss_counts.entry(item.clone()).or_insert(0);
            *misses += 1;
            if *misses >= self.config.miss_strikes {
                resolved.push(item.clone());
            }
        }

        for item in &resolved {
            self.miss_counts.remove(item);
        }

        self.active_interactables = current;
        self.active_interactables
            .extend(self.miss_counts.keys().cloned());

        for item in resolved {
            tracing::debug!(%item, "interactable resolved");
            let now = self.clock.now();
            self.used_interactables.entry(item).or_insert(now);
            self.mark_progress("interactable disappeared");
        }
    }
}
