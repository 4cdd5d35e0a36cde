//! Records exchanged between perception, memory, policy and navigation.

mod action;
mod grid;
mod perception;

pub use action::{Action, Hand, Key, Primitive};
pub use grid::{Cell, Direction};
pub use perception::{Interactable, PerceptionSnapshot};
