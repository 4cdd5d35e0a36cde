use autoplay_core::Frame;
use autoplay_runtime::{PerceptionError, TextReader};

/// Text reader for hosts without an OCR engine: never sees a dialog.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTextReader;

impl NoopTextReader {
    pub fn new(langs: &str) -> Self {
        tracing::warn!(%langs, "no OCR backend, dialogue and choices will not be read");
        Self
    }
}

impl TextReader for NoopTextReader {
    fn detect_dialog(&mut self, _frame: &Frame) -> Result<bool, PerceptionError> {
        Ok(false)
    }

    fn read_dialog_text(&mut self, _frame: &Frame) -> Result<Option<String>, PerceptionError> {
        Ok(None)
    }

    fn detect_choices(&mut self, _frame: &Frame) -> Result<Vec<String>, PerceptionError> {
        Ok(Vec::new())
    }

    fn read_full(&mut self, _frame: &Frame) -> Result<String, PerceptionError> {
        Ok(String::new())
    }
}
