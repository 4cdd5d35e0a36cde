use std::fmt;

use serde::{Deserialize, Serialize};

use super::Cell;

/// A detected object the agent may approach and trigger (door, NPC, item).
///
/// Identity is the `(x, y, kind)` triple; the same kind at another cell is a
/// different interactable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interactable {
    pub cell: Cell,
    pub kind: String,
}

impl Interactable {
    pub fn new(x: i32, y: i32, kind: impl Into<String>) -> Self {
        Self {
            cell: Cell::new(x, y),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for Interactable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.cell)
    }
}

/// Everything observed about the game in one tick.
///
/// Built once by snapshot assembly and only ever handed out by shared
/// reference afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptionSnapshot {
    pub in_dialog: bool,
    pub dialog_text: Option<String>,
    /// Choice lines in detected top-to-bottom order.
    pub choices: Vec<String>,
    pub position: Option<Cell>,
    pub interactables: Vec<Interactable>,
    pub fingerprint: Option<u64>,
}

impl PerceptionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialog(mut self, text: Option<&str>) -> Self {
        self.in_dialog = true;
        self.dialog_text = text.map(str::to_owned);
        self
    }

    pub fn with_choices<S: Into<String>>(mut self, choices: impl IntoIterator<Item = S>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Cell::new(x, y));
        self
    }

    pub fn with_interactables(mut self, interactables: Vec<Interactable>) -> Self {
        self.interactables = interactables;
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: u64) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }
}
