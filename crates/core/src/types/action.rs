use serde::{Deserialize, Serialize};

use super::{Direction, Interactable};

/// Which wall the explorer keeps contact with.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    #[default]
    Right,
}

impl Hand {
    /// Neighbour examination order for wall-following.
    ///
    /// `Up` is always first so exploration keeps a deterministic bias.
    pub fn probe_order(self) -> [Direction; 4] {
        match self {
            Hand::Right => [Direction::Up, Direction::Right, Direction::Down, Direction::Left],
            Hand::Left => [Direction::Up, Direction::Left, Direction::Down, Direction::Right],
        }
    }
}

/// Logical keys understood by the input driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Interact,
    Menu,
}

impl From<Direction> for Key {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Key::Up,
            Direction::Down => Key::Down,
            Direction::Left => Key::Left,
            Direction::Right => Key::Right,
        }
    }
}

/// Smallest scripted input step used by unstick probes and the unblock routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Up,
    Right,
    Down,
    Left,
    Interact,
    Menu,
}

impl Primitive {
    /// The direction held for movement primitives, `None` for taps.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Primitive::Up => Some(Direction::Up),
            Primitive::Right => Some(Direction::Right),
            Primitive::Down => Some(Direction::Down),
            Primitive::Left => Some(Direction::Left),
            Primitive::Interact | Primitive::Menu => None,
        }
    }
}

impl From<Direction> for Primitive {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Primitive::Up,
            Direction::Right => Primitive::Right,
            Direction::Down => Primitive::Down,
            Direction::Left => Primitive::Left,
        }
    }
}

/// High-level decision for one tick.
///
/// Produced by the policy (or the unblock override) and consumed by the
/// dispatcher, which matches every variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Advance the open dialogue.
    Confirm,
    /// Pick the choice at `index` (detected vertical order).
    SelectChoice { index: usize },
    /// Walk to the interactable and trigger it.
    MoveAndInteract { target: Interactable },
    /// Fixed probe executed when recent positions collapsed into one cell.
    UnstuckSequence { steps: Vec<Primitive> },
    /// One wall-following exploration step.
    ExploreWallFollow { hand: Hand },
    /// One element of the scripted unblock routine.
    Unblock { step: Primitive },
    /// Do nothing this tick.
    Wait,
}

impl Action {
    /// The four-direction probe used to escape a collapsed position history.
    pub fn unstuck_probe() -> Self {
        Action::UnstuckSequence {
            steps: vec![Primitive::Up, Primitive::Right, Primitive::Down, Primitive::Left],
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Confirm => "confirm",
            Action::SelectChoice { .. } => "select_choice",
            Action::MoveAndInteract { .. } => "move_and_interact",
            Action::UnstuckSequence { .. } => "unstuck_sequence",
            Action::ExploreWallFollow { .. } => "explore_wall_follow",
            Action::Unblock { .. } => "unblock",
            Action::Wait => "wait",
        }
    }
}
