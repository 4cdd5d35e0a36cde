//! Decision-engine state for the autoplay agent.
//!
//! Modules are organized by responsibility:
//! - [`types`] holds the per-tick records exchanged between components
//! - [`memory`] owns durable session state and its persisted form
//! - [`blocked`] turns consecutive frames into accumulated blocked time
//! - [`unblock`] provides the scripted escape pattern
//! - [`clock`] abstracts wall-clock time so timestamps are testable
pub mod blocked;
pub mod clock;
pub mod error;
pub mod memory;
pub mod types;
pub mod unblock;

pub use blocked::{BlockedConfig, BlockedStateTracker, Frame, motion_magnitude, similarity};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::MemoryError;
pub use memory::{Memory, MemoryConfig, RingBuffer, pack_cell, unpack_cell};
pub use types::{
    Action, Cell, Direction, Hand, Interactable, Key, PerceptionSnapshot, Primitive,
};
pub use unblock::UnblockRoutine;
