//! Turns a decided [`Action`] into input.

use autoplay_core::{Action, Key, Memory};

use crate::api::{InputDriver, InputError};
use crate::navigation::Navigator;

/// Executes `action` through `input`, updating `memory` for any movement.
pub fn dispatch(
    action: &Action,
    input: &mut dyn InputDriver,
    navigator: &Navigator,
    memory: &mut Memory,
) -> Result<(), InputError> {
    match action {
        Action::Confirm => input.confirm(),
        Action::SelectChoice { index } => {
            for _ in 0..*index {
                input.press(Key::Down)?;
            }
            input.confirm()
        }
        Action::MoveAndInteract { target } => {
            navigator.move_towards(input, memory, target.cell)?;
            input.interact()
        }
        Action::UnstuckSequence { steps } => navigator.execute_unstuck(input, steps),
        Action::ExploreWallFollow { hand } => navigator.wall_follow(input, memory, *hand),
        Action::Unblock { step } => navigator.execute_unstuck(input, std::slice::from_ref(step)),
        Action::Wait => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use autoplay_core::{Cell, Hand, Interactable, Primitive};

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Press(Key),
        Hold(Key),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl InputDriver for Recorder {
        fn press(&mut self, key: Key) -> Result<(), InputError> {
            self.0.push(Event::Press(key));
            Ok(())
        }

        fn hold(&mut self, key: Key, _duration: Duration) -> Result<(), InputError> {
            self.0.push(Event::Hold(key));
            Ok(())
        }
    }

    fn run(action: Action, memory: &mut Memory) -> Vec<Event> {
        let mut input = Recorder::default();
        dispatch(&action, &mut input, &Navigator::default(), memory).unwrap();
        input.0
    }

    #[test]
    fn select_choice_moves_cursor_then_confirms() {
        let events = run(Action::SelectChoice { index: 2 }, &mut Memory::default());
        assert_eq!(
            events,
            vec![
                Event::Press(Key::Down),
                Event::Press(Key::Down),
                Event::Press(Key::Confirm)
            ]
        );
    }

    #[test]
    fn first_choice_confirms_immediately() {
        let events = run(Action::SelectChoice { index: 0 }, &mut Memory::default());
        assert_eq!(events, vec![Event::Press(Key::Confirm)]);
    }

    #[test]
    fn move_and_interact_walks_then_interacts() {
        let mut memory = Memory::default();
        memory.mark_visited(Cell::new(1, 1));

        let events = run(
            Action::MoveAndInteract {
                target: Interactable::new(1, 2, "npc"),
            },
            &mut memory,
        );

        assert_eq!(
            events,
            vec![Event::Hold(Key::Down), Event::Press(Key::Interact)]
        );
        assert_eq!(memory.current_position(), Some(Cell::new(1, 2)));
    }

    #[test]
    fn explore_uses_memory_position() {
        let mut memory = Memory::default();
        memory.mark_visited(Cell::new(4, 4));

        let events = run(Action::ExploreWallFollow { hand: Hand::Right }, &mut memory);

        assert_eq!(events, vec![Event::Hold(Key::Up)]);
    }

    #[test]
    fn unblock_menu_step_presses_menu() {
        let events = run(
            Action::Unblock {
                step: Primitive::Menu,
            },
            &mut Memory::default(),
        );
        assert_eq!(events, vec![Event::Press(Key::Menu)]);
    }

    #[test]
    fn wait_sends_nothing() {
        assert!(run(Action::Wait, &mut Memory::default()).is_empty());
    }
}
