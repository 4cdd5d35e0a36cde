//! Condition and action nodes for the policy ladder.

mod actions;
mod conditions;

pub use actions::{
    ConfirmDialog, FollowWall, InteractWithReachable, ProbeUnstuck, SelectBestChoice, WaitInPlace,
};
pub use conditions::{HasChoices, HasReachableInteractable, InDialog, IsStuck};
