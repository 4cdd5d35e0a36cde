//! Composite behavior nodes.
//!
//! [`Sequence`] (AND logic) and [`Selector`] (OR logic) control the flow over
//! several children. A selector of guarded sequences is a priority ladder.

use crate::{Behavior, Node, Status};

/// Executes child behaviors in order until one fails.
///
/// # Semantics
///
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
pub struct Sequence<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Sequence<'n, C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Executes child behaviors in order until one succeeds.
///
/// # Semantics
///
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// Children earlier in the list take priority over later ones.
pub struct Selector<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Selector<'n, C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }

    /// Number of rungs in this selector.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false; a selector is built with at least one child.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace {
        visited: Vec<&'static str>,
    }

    struct Mark(&'static str, Status);

    impl Behavior<Trace> for Mark {
        fn tick(&self, ctx: &mut Trace) -> Status {
            ctx.visited.push(self.0);
            self.1
        }
    }

    fn mark(name: &'static str, status: Status) -> Node<'static, Trace> {
        Box::new(Mark(name, status))
    }

    #[test]
    fn sequence_all_success() {
        let seq = Sequence::new(vec![
            mark("a", Status::Success),
            mark("b", Status::Success),
        ]);

        let mut ctx = Trace::default();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.visited, vec!["a", "b"]);
    }

    #[test]
    fn sequence_stops_on_first_failure() {
        let seq = Sequence::new(vec![
            mark("guard", Status::Failure),
            mark("decide", Status::Success),
        ]);

        let mut ctx = Trace::default();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.visited, vec!["guard"]);
    }

    #[test]
    fn selector_takes_first_successful_rung() {
        let sel = Selector::new(vec![
            mark("dialog", Status::Failure),
            mark("choice", Status::Success),
            mark("explore", Status::Success),
        ]);

        let mut ctx = Trace::default();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.visited, vec!["dialog", "choice"]);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let sel = Selector::new(vec![
            mark("a", Status::Failure),
            mark("b", Status::Failure),
        ]);

        let mut ctx = Trace::default();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
        assert_eq!(sel.len(), 2);
    }

    #[test]
    #[should_panic(expected = "Selector must have at least one child")]
    fn empty_selector_panics() {
        let _ = Selector::<Trace>::new(Vec::new());
    }
}
