//! Scripted collaborators shared by the runtime integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use autoplay_core::{Cell, Frame, Interactable, Key, ManualClock};
use autoplay_runtime::{
    CaptureError, Collaborators, InputDriver, InputError, PerceptionError, Region, RunnerConfig,
    SceneAnalyzer, TextReader, WindowCapture,
};
use image::{Rgb, RgbImage};

/// Textured frame; `inverted` flips every channel so the scene reads as changed.
pub fn frame(inverted: bool) -> Frame {
    RgbImage::from_fn(64, 48, |x, y| {
        let v = (((x / 4) + (y / 4)) % 2 * 160 + (x * 3 + y * 5) % 64) as u8;
        let p = [v, v / 2, 255 - v];
        if inverted {
            Rgb([255 - p[0], 255 - p[1], 255 - p[2]])
        } else {
            Rgb(p)
        }
    })
}

/// What the fake game shows; tests mutate it between ticks.
#[derive(Debug)]
pub struct Scene {
    /// Frames served in order; the last one repeats. `None` fails the capture.
    pub frames: VecDeque<Option<Frame>>,
    pub last_frame: Frame,
    pub dialog: bool,
    pub dialog_text: Option<String>,
    pub choices: Vec<String>,
    pub position: Option<Cell>,
    pub interactables: Vec<Interactable>,
    pub hash: u64,
    pub vision_broken: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            frames: VecDeque::new(),
            last_frame: frame(false),
            dialog: false,
            dialog_text: None,
            choices: Vec::new(),
            position: None,
            interactables: Vec::new(),
            hash: 1,
            vision_broken: false,
        }
    }
}

pub type SharedScene = Arc<Mutex<Scene>>;
pub type KeyLog = Arc<Mutex<Vec<Key>>>;

struct FakeCapture(SharedScene);

impl WindowCapture for FakeCapture {
    fn screenshot(&mut self) -> Result<Frame, CaptureError> {
        let mut scene = self.0.lock().unwrap();
        match scene.frames.pop_front() {
            Some(Some(frame)) => {
                scene.last_frame = frame.clone();
                Ok(frame)
            }
            Some(None) => Err(CaptureError::WindowNotFound("rmmz-game".into())),
            None => Ok(scene.last_frame.clone()),
        }
    }

    fn screenshot_region(&mut self, region: Region) -> Result<Frame, CaptureError> {
        Ok(Frame::new(region.width.max(1), region.height.max(1)))
    }

    fn bbox(&mut self) -> Result<Region, CaptureError> {
        Ok(Region::new(0, 0, 64, 48))
    }
}

struct FakeReader(SharedScene);

impl TextReader for FakeReader {
    fn detect_dialog(&mut self, _frame: &Frame) -> Result<bool, PerceptionError> {
        Ok(self.0.lock().unwrap().dialog)
    }

    fn read_dialog_text(&mut self, _frame: &Frame) -> Result<Option<String>, PerceptionError> {
        Ok(self.0.lock().unwrap().dialog_text.clone())
    }

    fn detect_choices(&mut self, _frame: &Frame) -> Result<Vec<String>, PerceptionError> {
        Ok(self.0.lock().unwrap().choices.clone())
    }

    fn read_full(&mut self, _frame: &Frame) -> Result<String, PerceptionError> {
        Ok(String::new())
    }
}

struct FakeAnalyzer(SharedScene);

impl SceneAnalyzer for FakeAnalyzer {
    fn locate_player(&mut self, _frame: &Frame) -> Result<Option<Cell>, PerceptionError> {
        let scene = self.0.lock().unwrap();
        if scene.vision_broken {
            return Err(PerceptionError::Vision("player template missing".into()));
        }
        Ok(scene.position)
    }

    fn find_interactables(&mut self, _frame: &Frame) -> Result<Vec<Interactable>, PerceptionError> {
        let scene = self.0.lock().unwrap();
        if scene.vision_broken {
            return Err(PerceptionError::Vision("edge map empty".into()));
        }
        Ok(scene.interactables.clone())
    }

    fn screen_hash(&mut self, _frame: &Frame) -> Result<u64, PerceptionError> {
        Ok(self.0.lock().unwrap().hash)
    }
}

struct RecordingInput(KeyLog);

impl InputDriver for RecordingInput {
    fn press(&mut self, key: Key) -> Result<(), InputError> {
        self.0.lock().unwrap().push(key);
        Ok(())
    }

    fn hold(&mut self, key: Key, _duration: Duration) -> Result<(), InputError> {
        self.0.lock().unwrap().push(key);
        Ok(())
    }
}

/// Handles to a fake game wired into a collaborator set.
pub struct Harness {
    pub scene: SharedScene,
    pub keys: KeyLog,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new() -> (Self, Collaborators) {
        let scene: SharedScene = Arc::new(Mutex::new(Scene::default()));
        let keys: KeyLog = Arc::new(Mutex::new(Vec::new()));
        let collaborators = Collaborators {
            capture: Box::new(FakeCapture(scene.clone())),
            reader: Box::new(FakeReader(scene.clone())),
            analyzer: Box::new(FakeAnalyzer(scene.clone())),
            input: Box::new(RecordingInput(keys.clone())),
        };
        let harness = Self {
            scene,
            keys,
            clock: Arc::new(ManualClock::new(1_700_000_000.0)),
        };
        (harness, collaborators)
    }

    pub fn take_keys(&self) -> Vec<Key> {
        std::mem::take(&mut *self.keys.lock().unwrap())
    }

    pub fn scene(&self) -> std::sync::MutexGuard<'_, Scene> {
        self.scene.lock().unwrap()
    }
}

pub fn config() -> RunnerConfig {
    RunnerConfig {
        unblock_after_secs: 3.0,
        ..RunnerConfig::default()
    }
}
