//! Repository layer for session data written to disk.
//!
//! Memory itself knows how to save and load its persisted form; this layer
//! decides where and when snapshots land.

mod snapshot;

pub use snapshot::{MEMORY_FILE, SnapshotWriter};
