//! Movement primitives.
//!
//! Every step is a short directional hold so perception can be re-evaluated
//! between ticks. Memory is updated by dead reckoning: the predicted next cell
//! is recorded without re-observing the screen.

use std::time::Duration;

use autoplay_core::{Cell, Direction, Hand, Key, Memory, Primitive};

use crate::api::{InputDriver, InputError};

/// Default hold duration for one movement step.
pub const STEP_DURATION: Duration = Duration::from_millis(150);

/// Upper bound on steps issued by a single `move_towards` call.
pub const MAX_APPROACH_STEPS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    step: Duration,
    max_steps: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(STEP_DURATION)
    }
}

impl Navigator {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            max_steps: MAX_APPROACH_STEPS,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Walks toward `target`, resolving the x axis before the y axis.
    ///
    /// Does nothing while the player position is unknown.
    pub fn move_towards(
        &self,
        input: &mut dyn InputDriver,
        memory: &mut Memory,
        target: Cell,
    ) -> Result<(), InputError> {
        for _ in 0..self.max_steps {
            let Some(current) = memory.current_position() else {
                tracing::debug!(%target, "approach skipped, position unknown");
                return Ok(());
            };
            let Some(direction) = Direction::toward(current, target) else {
                return Ok(());
            };
            self.walk(input, memory, current, direction)?;
        }
        Ok(())
    }

    /// One wall-following step.
    ///
    /// Takes the first unvisited neighbour in `hand` order, or the first
    /// direction in that order when every neighbour was already visited.
    pub fn wall_follow(
        &self,
        input: &mut dyn InputDriver,
        memory: &mut Memory,
        hand: Hand,
    ) -> Result<(), InputError> {
        let Some(current) = memory.current_position() else {
            tracing::debug!(%hand, "wall follow skipped, position unknown");
            return Ok(());
        };
        let order = hand.probe_order();
        let direction = order
            .into_iter()
            .find(|&direction| !memory.has_visited(current.step(direction)))
            .unwrap_or(order[0]);
        self.walk(input, memory, current, direction)
    }

    /// Plays `steps` in order: holds for directions, taps otherwise.
    pub fn execute_unstuck(
        &self,
        input: &mut dyn InputDriver,
        steps: &[Primitive],
    ) -> Result<(), InputError> {
        for &step in steps {
            match step.direction() {
                Some(direction) => input.hold(Key::from(direction), self.step)?,
                None if step == Primitive::Interact => input.interact()?,
                None => input.press(Key::Menu)?,
            }
        }
        Ok(())
    }

    fn walk(
        &self,
        input: &mut dyn InputDriver,
        memory: &mut Memory,
        from: Cell,
        direction: Direction,
    ) -> Result<(), InputError> {
        input.hold(Key::from(direction), self.step)?;
        memory.mark_visited(from.step(direction));
        Ok(())
    }
}
