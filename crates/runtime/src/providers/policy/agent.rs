use autoplay_core::{Action, Hand, Memory, PerceptionSnapshot};
use behavior_tree::Behavior;

use super::patterns::ladder;
use super::{ChoiceKeywords, PolicyContext};

/// Rule-based agent evaluating the priority ladder.
///
/// `decide` is deterministic for a given snapshot and memory. Its only side
/// effects are the memory updates tied to the chosen rung (dialogue progress,
/// optimistic interactable use).
#[derive(Clone, Debug, Default)]
pub struct Agent {
    hand: Hand,
    keywords: ChoiceKeywords,
}

impl Agent {
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            keywords: ChoiceKeywords::default(),
        }
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn decide(&self, snapshot: &PerceptionSnapshot, memory: &mut Memory) -> Action {
        let mut ctx = PolicyContext::new(snapshot, memory, self.hand, &self.keywords);
        let status = ladder().tick(&mut ctx);
        let action = ctx.take_action().unwrap_or(Action::Wait);
        tracing::debug!(?status, action = action.label(), "policy decided");
        action
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use autoplay_core::{Cell, Interactable, ManualClock, MemoryConfig};

    use super::*;

    fn memory_at(clock: &Arc<ManualClock>) -> Memory {
        Memory::new(MemoryConfig::default(), clock.clone())
    }

    #[test]
    fn dialogue_beats_choices() {
        let clock = Arc::new(ManualClock::new(10.0));
        let mut memory = memory_at(&clock);
        let snapshot = PerceptionSnapshot::new()
            .with_dialog(Some("Will you help?"))
            .with_choices(["Cancel", "Yes, continue"]);

        clock.advance(5.0);
        let action = Agent::default().decide(&snapshot, &mut memory);

        assert_eq!(action, Action::Confirm);
        assert_eq!(memory.last_progress_t(), 15.0);
    }

    #[test]
    fn selects_highest_scoring_choice() {
        let mut memory = Memory::default();
        let snapshot = PerceptionSnapshot::new().with_choices(["Cancel", "Yes, continue"]);

        let action = Agent::default().decide(&snapshot, &mut memory);

        assert_eq!(action, Action::SelectChoice { index: 1 });
    }

    #[test]
    fn interacts_with_adjacent_and_marks_used() {
        let mut memory = Memory::default();
        let door = Interactable::new(3, 4, "door");
        let snapshot = PerceptionSnapshot::new()
            .with_position(3, 3)
            .with_interactables(vec![door.clone()]);
        let agent = Agent::default();

        let first = agent.decide(&snapshot, &mut memory);
        assert_eq!(
            first,
            Action::MoveAndInteract {
                target: door.clone()
            }
        );
        assert!(memory.is_used(&door));

        let second = agent.decide(&snapshot, &mut memory);
        assert_eq!(second, Action::ExploreWallFollow { hand: Hand::Right });
    }

    #[test]
    fn distant_interactable_is_ignored() {
        let mut memory = Memory::default();
        let snapshot = PerceptionSnapshot::new()
            .with_position(0, 0)
            .with_interactables(vec![Interactable::new(2, 0, "chest")]);

        let action = Agent::new(Hand::Left).decide(&snapshot, &mut memory);

        assert_eq!(action, Action::ExploreWallFollow { hand: Hand::Left });
    }

    #[test]
    fn stuck_history_triggers_probe() {
        let mut memory = Memory::default();
        for i in 0..30 {
            memory.mark_visited(Cell::new(i % 2, 0));
        }

        let action = Agent::default().decide(&PerceptionSnapshot::new(), &mut memory);

        assert_eq!(action, Action::unstuck_probe());
    }

    #[test]
    fn explores_by_default() {
        let mut memory = Memory::default();
        let action = Agent::new(Hand::Left).decide(&PerceptionSnapshot::new(), &mut memory);
        assert_eq!(action, Action::ExploreWallFollow { hand: Hand::Left });
    }
}
