//! Action nodes.
//!
//! Each node records one [`Action`] in the context. Nodes that cannot build
//! their action fail so the ladder falls through to the next rung.

use autoplay_core::Action;
use behavior_tree::{Behavior, Status};

use crate::providers::policy::PolicyContext;

/// Advances the open dialogue and counts it as progress.
pub struct ConfirmDialog;

impl Behavior<PolicyContext<'_>> for ConfirmDialog {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        ctx.memory.mark_progress("dialogue advanced");
        ctx.set_action(Action::Confirm);
        Status::Success
    }
}

/// Picks the choice with the best keyword score.
pub struct SelectBestChoice;

impl Behavior<PolicyContext<'_>> for SelectBestChoice {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        match ctx.keywords.best_choice(&ctx.snapshot.choices) {
            Some(index) => {
                ctx.set_action(Action::SelectChoice { index });
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Walks to the reachable interactable and triggers it.
///
/// The target is marked used when the decision is made, before the input is
/// sent, so a failed interaction is not retried.
pub struct InteractWithReachable;

impl Behavior<PolicyContext<'_>> for InteractWithReachable {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        let Some(target) = ctx.reachable_interactable() else {
            return Status::Failure;
        };
        ctx.memory.mark_used_interactable(target);
        ctx.set_action(Action::MoveAndInteract {
            target: target.clone(),
        });
        Status::Success
    }
}

/// Emits the four-direction unstick probe.
pub struct ProbeUnstuck;

impl Behavior<PolicyContext<'_>> for ProbeUnstuck {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        ctx.set_action(Action::unstuck_probe());
        Status::Success
    }
}

/// One wall-following exploration step with the configured hand.
pub struct FollowWall;

impl Behavior<PolicyContext<'_>> for FollowWall {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        let hand = ctx.hand;
        ctx.set_action(Action::ExploreWallFollow { hand });
        Status::Success
    }
}

/// Does nothing this tick.
pub struct WaitInPlace;

impl Behavior<PolicyContext<'_>> for WaitInPlace {
    fn tick(&self, ctx: &mut PolicyContext) -> Status {
        ctx.set_action(Action::Wait);
        Status::Success
    }
}
