//! Condition nodes.
//!
//! Conditions inspect the snapshot and memory and return Success or Failure.
//! They never record an action.

use behavior_tree::{Behavior, Status};

use crate::providers::policy::PolicyContext;

/// A dialogue box is open.
pub struct InDialog;

impl Behavior<PolicyContext<'_>> for InDialog {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        Status::from_bool(ctx.snapshot.in_dialog)
    }
}

/// At least one menu choice was detected.
pub struct HasChoices;

impl Behavior<PolicyContext<'_>> for HasChoices {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        Status::from_bool(!ctx.snapshot.choices.is_empty())
    }
}

/// An unused interactable lies within one cell of the player.
pub struct HasReachableInteractable;

impl Behavior<PolicyContext<'_>> for HasReachableInteractable {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        Status::from_bool(ctx.reachable_interactable().is_some())
    }
}

/// The recent position history collapsed into a 2x2 box.
pub struct IsStuck;

impl Behavior<PolicyContext<'_>> for IsStuck {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        Status::from_bool(ctx.memory.is_stuck())
    }
}
