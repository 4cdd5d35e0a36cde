//! Blackboard shared by the policy ladder nodes.

use autoplay_core::{Action, Hand, Interactable, Memory, PerceptionSnapshot};

use super::ChoiceKeywords;

/// Context for one policy evaluation.
///
/// Holds the tick's snapshot, the session memory and the agent settings.
/// The `'a` lifetime ties the context to the tick that created it; nodes
/// never keep it past a single `decide` call.
pub struct PolicyContext<'a> {
    pub snapshot: &'a PerceptionSnapshot,
    pub memory: &'a mut Memory,
    pub hand: Hand,
    pub keywords: &'a ChoiceKeywords,

    /// The decision recorded by an action node, `None` until one succeeds.
    action: Option<Action>,
}

impl<'a> PolicyContext<'a> {
    pub fn new(
        snapshot: &'a PerceptionSnapshot,
        memory: &'a mut Memory,
        hand: Hand,
        keywords: &'a ChoiceKeywords,
    ) -> Self {
        Self {
            snapshot,
            memory,
            hand,
            keywords,
            action: None,
        }
    }

    /// Records the decision. A later call replaces an earlier one.
    pub fn set_action(&mut self, action: Action) {
        self.action = Some(action);
    }

    pub fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// First detected interactable that is unused and within one cell.
    ///
    /// With no known player position the distance test is skipped.
    pub fn reachable_interactable(&self) -> Option<&'a Interactable> {
        let position = self.snapshot.position;
        self.snapshot.interactables.iter().find(|candidate| {
            !self.memory.is_used(candidate)
                && position.is_none_or(|pos| pos.manhattan(candidate.cell) <= 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use autoplay_core::{ManualClock, MemoryConfig};

    use super::*;

    fn memory() -> Memory {
        Memory::new(MemoryConfig::default(), Arc::new(ManualClock::new(0.0)))
    }

    #[test]
    fn reachable_skips_used_and_distant() {
        let snapshot = PerceptionSnapshot::new()
            .with_position(5, 5)
            .with_interactables(vec![
                Interactable::new(5, 6, "door"),
                Interactable::new(9, 9, "chest"),
                Interactable::new(4, 5, "npc"),
            ]);
        let mut memory = memory();
        memory.mark_used_interactable(&Interactable::new(5, 6, "door"));
        let keywords = ChoiceKeywords::default();

        let ctx = PolicyContext::new(&snapshot, &mut memory, Hand::Right, &keywords);

        assert_eq!(
            ctx.reachable_interactable(),
            Some(&Interactable::new(4, 5, "npc"))
        );
    }

    #[test]
    fn unknown_position_accepts_any_unused() {
        let snapshot =
            PerceptionSnapshot::new().with_interactables(vec![Interactable::new(40, 2, "sign")]);
        let mut memory = memory();
        let keywords = ChoiceKeywords::default();

        let ctx = PolicyContext::new(&snapshot, &mut memory, Hand::Right, &keywords);

        assert_eq!(
            ctx.reachable_interactable().map(|i| i.kind.as_str()),
            Some("sign")
        );
    }

    #[test]
    fn take_action_clears_slot() {
        let snapshot = PerceptionSnapshot::new();
        let mut memory = memory();
        let keywords = ChoiceKeywords::default();
        let mut ctx = PolicyContext::new(&snapshot, &mut memory, Hand::Left, &keywords);

        ctx.set_action(Action::Wait);
        assert!(ctx.has_action());
        assert_eq!(ctx.take_action(), Some(Action::Wait));
        assert!(!ctx.has_action());
    }
}
