//! Ladder rungs.
//!
//! Each rung pairs one condition with one action, following the
//! `action_when_condition()` naming. [`ladder`] stacks them in priority
//! order.

use behavior_tree::Node;
use behavior_tree::builder::{guarded, selector};

use super::PolicyContext;
use super::nodes::{
    ConfirmDialog, FollowWall, HasChoices, HasReachableInteractable, InDialog,
    InteractWithReachable, IsStuck, ProbeUnstuck, SelectBestChoice, WaitInPlace,
};

/// Policy node over a context borrowing per-tick data for `'a`.
pub type PolicyNode<'a> = Node<'a, PolicyContext<'a>>;

/// Advance dialogue whenever a dialogue box is open.
pub fn confirm_when_in_dialog<'a>() -> PolicyNode<'a> {
    guarded(Box::new(InDialog), ConfirmDialog)
}

/// Pick the best menu choice whenever choices are on screen.
pub fn select_when_choices<'a>() -> PolicyNode<'a> {
    guarded(Box::new(HasChoices), SelectBestChoice)
}

/// Trigger an adjacent interactable that has not been used yet.
pub fn interact_when_reachable<'a>() -> PolicyNode<'a> {
    guarded(Box::new(HasReachableInteractable), InteractWithReachable)
}

/// Probe all four directions once the position history collapsed.
pub fn probe_when_stuck<'a>() -> PolicyNode<'a> {
    guarded(Box::new(IsStuck), ProbeUnstuck)
}

/// Wall-following exploration. Always succeeds.
pub fn explore<'a>() -> PolicyNode<'a> {
    Box::new(FollowWall)
}

/// Safe default if every rung above failed.
pub fn wait_fallback<'a>() -> PolicyNode<'a> {
    Box::new(WaitInPlace)
}

/// The full priority ladder: first matching rung wins.
pub fn ladder<'a>() -> PolicyNode<'a> {
    selector(vec![
        confirm_when_in_dialog(),
        select_when_choices(),
        interact_when_reachable(),
        probe_when_stuck(),
        explore(),
        wait_fallback(),
    ])
}
