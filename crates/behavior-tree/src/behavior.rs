//! Core behavior trait.
//!
//! [`Behavior`] is generic over the blackboard type `C`. Leaf nodes read the
//! blackboard to test a condition or write a decision into it.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this node against the given blackboard.
    ///
    /// Returns `Status::Success` when the node's condition held or its
    /// decision was recorded, `Status::Failure` otherwise.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Boxed node that may borrow data for `'n`.
///
/// Composites store their children as `Node`s so a tree can be assembled
/// over a context that itself borrows per-tick state.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

impl<C> Behavior<C> for Box<dyn Behavior<C> + '_> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
