//! Contracts for the OS- and library-backed collaborators.
//!
//! The runner owns one instance of each, constructed once per session and
//! lent by reference to whoever needs it during a tick.

use std::time::Duration;

use autoplay_core::{Cell, Frame, Interactable, Key};

use super::errors::{CaptureError, InputError, PerceptionError};

/// Rectangle in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Locates the game window and grabs its pixels.
pub trait WindowCapture {
    /// Full window contents.
    fn screenshot(&mut self) -> Result<Frame, CaptureError>;

    /// Contents of `region`, relative to the window origin.
    fn screenshot_region(&mut self, region: Region) -> Result<Frame, CaptureError>;

    /// Window bounds in screen coordinates.
    fn bbox(&mut self) -> Result<Region, CaptureError>;
}

/// Reads dialogue and choice text from frames.
pub trait TextReader {
    fn detect_dialog(&mut self, frame: &Frame) -> Result<bool, PerceptionError>;

    fn read_dialog_text(&mut self, frame: &Frame) -> Result<Option<String>, PerceptionError>;

    /// Choice lines in top-to-bottom order; empty when confidence is too low.
    fn detect_choices(&mut self, frame: &Frame) -> Result<Vec<String>, PerceptionError>;

    /// Reads all text in `frame`; used on cropped dialogue regions.
    fn read_full(&mut self, frame: &Frame) -> Result<String, PerceptionError>;
}

/// Template and edge based scene understanding.
pub trait SceneAnalyzer {
    fn locate_player(&mut self, frame: &Frame) -> Result<Option<Cell>, PerceptionError>;

    fn find_interactables(&mut self, frame: &Frame) -> Result<Vec<Interactable>, PerceptionError>;

    /// 64-bit fingerprint of the frame's visual content.
    fn screen_hash(&mut self, frame: &Frame) -> Result<u64, PerceptionError>;
}

/// Emits synthetic key events to the game window.
pub trait InputDriver {
    /// Press and release `key` once.
    fn press(&mut self, key: Key) -> Result<(), InputError>;

    /// Hold `key` down for `duration`.
    fn hold(&mut self, key: Key, duration: Duration) -> Result<(), InputError>;

    fn interact(&mut self) -> Result<(), InputError> {
        self.press(Key::Interact)
    }

    fn confirm(&mut self) -> Result<(), InputError> {
        self.press(Key::Confirm)
    }
}

/// The session's collaborator set.
pub struct Collaborators {
    pub capture: Box<dyn WindowCapture>,
    pub reader: Box<dyn TextReader>,
    pub analyzer: Box<dyn SceneAnalyzer>,
    pub input: Box<dyn InputDriver>,
}
