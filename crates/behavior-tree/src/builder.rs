//! Builder utilities for ergonomic behavior tree construction.
//!
//! Shorthands for `Box::new(Sequence::new(vec![...]))` and friends.

use crate::{Behavior, Node, Selector, Sequence};

/// Creates a sequence node.
#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

/// Guards `action` behind `guard`: a two-child sequence.
///
/// This is the shape of a single rung in a priority ladder.
#[inline]
pub fn guarded<'n, C: 'n>(guard: Node<'n, C>, action: impl Behavior<C> + 'n) -> Node<'n, C> {
    sequence(vec![guard, Box::new(action)])
}
