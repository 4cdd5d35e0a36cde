//! Lightweight behavior tree primitives for tick-driven decision making.
//!
//! The autoplay policy is a strict priority ladder: the first rung whose
//! guard holds produces the action for the tick. A [`Selector`] of
//! guarded [`Sequence`]s expresses exactly that, so the policy is built from
//! the nodes in this crate.
//!
//! - **No Running state**: every node resolves within a single tick
//! - **Borrowed contexts**: composites carry a lifetime so the blackboard can
//!   hold references to per-tick data
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Composite nodes: [`Sequence`], [`Selector`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod status;

pub use behavior::{Behavior, Node};
pub use composite::{Selector, Sequence};
pub use status::Status;
