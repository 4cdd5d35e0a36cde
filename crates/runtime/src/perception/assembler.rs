use autoplay_core::{Cell, Frame, Interactable, PerceptionSnapshot};

use super::{Perceived, PerceptionReport, Signal};
use crate::api::{PerceptionError, Region, SceneAnalyzer, TextReader, WindowCapture};

/// Where the dialogue box sits, relative to the window size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialogRegion {
    /// Fraction of the window height where the box starts.
    pub top: f64,
    /// Pixels added around the box on every side that has room.
    pub margin: u32,
}

impl Default for DialogRegion {
    fn default() -> Self {
        Self {
            top: 0.6,
            margin: 10,
        }
    }
}

impl DialogRegion {
    /// The crop rectangle for a `width` x `height` window.
    pub fn within(&self, width: u32, height: u32) -> Region {
        let margin = i64::from(self.margin);
        let y1 = ((f64::from(height) * self.top) as i64 - margin).max(0);
        let y2 = i64::from(height) + margin;
        let x1 = margin;
        let x2 = i64::from(width) - margin;
        Region {
            x: x1 as i32,
            y: y1 as i32,
            width: (x2 - x1).max(0) as u32,
            height: (y2 - y1).max(0) as u32,
        }
    }
}

/// Text half of a snapshot. Defaults to "nothing read" on skipped OCR ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextObservation {
    pub in_dialog: bool,
    pub dialog_text: Option<String>,
    pub choices: Vec<String>,
}

/// Scene half of a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneObservation {
    pub position: Option<Cell>,
    pub interactables: Vec<Interactable>,
    pub fingerprint: Option<u64>,
}

/// Builds snapshots from collaborator output.
#[derive(Clone, Debug, Default)]
pub struct SnapshotAssembler {
    region: DialogRegion,
}

impl SnapshotAssembler {
    pub fn new(region: DialogRegion) -> Self {
        Self { region }
    }

    pub fn region(&self) -> DialogRegion {
        self.region
    }

    /// Runs OCR over `frame`.
    ///
    /// When a dialogue is detected but no text comes back, the dialogue box is
    /// captured again through `capture` and read in full.
    pub fn read_text(
        &self,
        frame: &Frame,
        capture: &mut dyn WindowCapture,
        reader: &mut dyn TextReader,
        report: &mut PerceptionReport,
    ) -> TextObservation {
        let in_dialog = report.record(
            Signal::Dialog,
            Perceived::or_default(reader.detect_dialog(frame)),
        );

        let mut dialog_text = None;
        if in_dialog {
            dialog_text = report.record(
                Signal::DialogText,
                Perceived::or_default(reader.read_dialog_text(frame)),
            );
            if dialog_text.is_none() {
                let fallback = self.read_dialog_box(frame, capture, reader);
                dialog_text = report.record(Signal::DialogText, Perceived::or_default(fallback));
            }
        }

        let choices = report.record(
            Signal::Choices,
            Perceived::or_default(reader.detect_choices(frame)),
        );

        TextObservation {
            in_dialog,
            dialog_text,
            choices,
        }
    }

    fn read_dialog_box(
        &self,
        frame: &Frame,
        capture: &mut dyn WindowCapture,
        reader: &mut dyn TextReader,
    ) -> Result<Option<String>, PerceptionError> {
        let region = self.region.within(frame.width(), frame.height());
        let crop = capture
            .screenshot_region(region)
            .map_err(PerceptionError::Region)?;
        let text = reader.read_full(&crop)?;
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_owned()))
    }

    /// Runs scene analysis over `frame`.
    pub fn analyze_scene(
        &self,
        frame: &Frame,
        analyzer: &mut dyn SceneAnalyzer,
        report: &mut PerceptionReport,
    ) -> SceneObservation {
        let position = report.record(
            Signal::Position,
            Perceived::or_default(analyzer.locate_player(frame)),
        );
        let interactables = report.record(
            Signal::Interactables,
            Perceived::or_default(analyzer.find_interactables(frame)),
        );
        let fingerprint = report.record(
            Signal::Fingerprint,
            Perceived::or_default(analyzer.screen_hash(frame).map(Some)),
        );

        SceneObservation {
            position,
            interactables,
            fingerprint,
        }
    }

    pub fn assemble(&self, text: TextObservation, scene: SceneObservation) -> PerceptionSnapshot {
        PerceptionSnapshot {
            in_dialog: text.in_dialog,
            dialog_text: text.dialog_text,
            choices: text.choices,
            position: scene.position,
            interactables: scene.interactables,
            fingerprint: scene.fingerprint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CaptureError;

    #[test]
    fn dialog_region_covers_bottom_of_window() {
        let region = DialogRegion::default().within(816, 624);
        assert_eq!(region, Region::new(10, 364, 796, 270));
    }

    #[test]
    fn dialog_region_clamps_tiny_windows() {
        let region = DialogRegion::default().within(12, 10);
        assert_eq!(region.x, 10);
        assert_eq!(region.y, 0);
        assert_eq!(region.width, 0);
    }

    struct StubCapture {
        regions: Vec<Region>,
        fail: bool,
    }

    impl WindowCapture for StubCapture {
        fn screenshot(&mut self) -> Result<Frame, CaptureError> {
            Ok(Frame::new(32, 32))
        }

        fn screenshot_region(&mut self, region: Region) -> Result<Frame, CaptureError> {
            self.regions.push(region);
            if self.fail {
                return Err(CaptureError::WindowNotFound("game".into()));
            }
            Ok(Frame::new(region.width.max(1), region.height.max(1)))
        }

        fn bbox(&mut self) -> Result<Region, CaptureError> {
            Ok(Region::new(0, 0, 32, 32))
        }
    }

    struct StubReader {
        dialog: bool,
        text: Option<String>,
        full: String,
        choices: Result<Vec<String>, ()>,
    }

    impl TextReader for StubReader {
        fn detect_dialog(&mut self, _frame: &Frame) -> Result<bool, PerceptionError> {
            Ok(self.dialog)
        }

        fn read_dialog_text(&mut self, _frame: &Frame) -> Result<Option<String>, PerceptionError> {
            Ok(self.text.clone())
        }

        fn detect_choices(&mut self, _frame: &Frame) -> Result<Vec<String>, PerceptionError> {
            self.choices
                .clone()
                .map_err(|()| PerceptionError::Ocr("low confidence".into()))
        }

        fn read_full(&mut self, _frame: &Frame) -> Result<String, PerceptionError> {
            Ok(self.full.clone())
        }
    }

    fn reader(dialog: bool, text: Option<&str>, full: &str) -> StubReader {
        StubReader {
            dialog,
            text: text.map(str::to_owned),
            full: full.to_owned(),
            choices: Ok(Vec::new()),
        }
    }

    #[test]
    fn reads_dialog_text_directly() {
        let assembler = SnapshotAssembler::default();
        let mut capture = StubCapture {
            regions: Vec::new(),
            fail: false,
        };
        let mut reader = reader(true, Some("Hello"), "unused");
        let mut report = PerceptionReport::new();

        let text = assembler.read_text(&Frame::new(32, 32), &mut capture, &mut reader, &mut report);

        assert!(text.in_dialog);
        assert_eq!(text.dialog_text.as_deref(), Some("Hello"));
        assert!(capture.regions.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn falls_back_to_dialog_box_crop() {
        let assembler = SnapshotAssembler::default();
        let mut capture = StubCapture {
            regions: Vec::new(),
            fail: false,
        };
        let mut reader = reader(true, None, "  Welcome, traveller \n");
        let mut report = PerceptionReport::new();

        let text = assembler.read_text(&Frame::new(100, 100), &mut capture, &mut reader, &mut report);

        assert_eq!(text.dialog_text.as_deref(), Some("Welcome, traveller"));
        assert_eq!(capture.regions, vec![Region::new(10, 50, 80, 60)]);
    }

    #[test]
    fn failed_crop_degrades_to_no_text() {
        let assembler = SnapshotAssembler::default();
        let mut capture = StubCapture {
            regions: Vec::new(),
            fail: true,
        };
        let mut reader = reader(true, None, "never read");
        let mut report = PerceptionReport::new();

        let text = assembler.read_text(&Frame::new(64, 64), &mut capture, &mut reader, &mut report);

        assert!(text.in_dialog);
        assert_eq!(text.dialog_text, None);
        assert!(report.is_degraded(Signal::DialogText));
    }

    #[test]
    fn no_dialog_skips_text_but_reads_choices() {
        let assembler = SnapshotAssembler::default();
        let mut capture = StubCapture {
            regions: Vec::new(),
            fail: false,
        };
        let mut reader = reader(false, Some("stale"), "");
        reader.choices = Ok(vec!["Yes".into(), "No".into()]);
        let mut report = PerceptionReport::new();

        let text = assembler.read_text(&Frame::new(32, 32), &mut capture, &mut reader, &mut report);

        assert!(!text.in_dialog);
        assert_eq!(text.dialog_text, None);
        assert_eq!(text.choices, vec!["Yes".to_owned(), "No".to_owned()]);
    }

    #[test]
    fn choice_failure_degrades_to_empty() {
        let assembler = SnapshotAssembler::default();
        let mut capture = StubCapture {
            regions: Vec::new(),
            fail: false,
        };
        let mut reader = reader(false, None, "");
        reader.choices = Err(());
        let mut report = PerceptionReport::new();

        let text = assembler.read_text(&Frame::new(32, 32), &mut capture, &mut reader, &mut report);

        assert!(text.choices.is_empty());
        assert!(report.is_degraded(Signal::Choices));
    }

    struct BrokenAnalyzer;

    impl SceneAnalyzer for BrokenAnalyzer {
        fn locate_player(&mut self, _frame: &Frame) -> Result<Option<Cell>, PerceptionError> {
            Ok(Some(Cell::new(3, 4)))
        }

        fn find_interactables(
            &mut self,
            _frame: &Frame,
        ) -> Result<Vec<Interactable>, PerceptionError> {
            Err(PerceptionError::Vision("edge map empty".into()))
        }

        fn screen_hash(&mut self, _frame: &Frame) -> Result<u64, PerceptionError> {
            Ok(0xABCD)
        }
    }

    #[test]
    fn scene_failures_degrade_individually() {
        let assembler = SnapshotAssembler::default();
        let mut report = PerceptionReport::new();

        let scene = assembler.analyze_scene(&Frame::new(8, 8), &mut BrokenAnalyzer, &mut report);
        let snapshot = assembler.assemble(TextObservation::default(), scene);

        assert_eq!(snapshot.position, Some(Cell::new(3, 4)));
        assert!(snapshot.interactables.is_empty());
        assert_eq!(snapshot.fingerprint, Some(0xABCD));
        assert_eq!(report.signals().collect::<Vec<_>>(), vec![Signal::Interactables]);
    }
}
