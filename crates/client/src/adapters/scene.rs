use autoplay_core::{Cell, Frame, Interactable};
use autoplay_runtime::{PerceptionError, SceneAnalyzer};
use image::imageops::{self, FilterType};

/// Difference hash: 64 bits from a 9x8 grayscale thumbnail, one bit per
/// horizontally adjacent pair.
pub fn dhash(frame: &Frame) -> u64 {
    let gray = imageops::grayscale(frame);
    let thumb = imageops::resize(&gray, 9, 8, FilterType::Triangle);

    let mut hash = 0u64;
    for y in 0..8 {
        for x in 0..8 {
            let left = thumb.get_pixel(x, y)[0];
            let right = thumb.get_pixel(x + 1, y)[0];
            hash = (hash << 1) | u64::from(left > right);
        }
    }
    hash
}

/// Fingerprints frames without locating anything on the grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct DHashSceneAnalyzer;

impl SceneAnalyzer for DHashSceneAnalyzer {
    fn locate_player(&mut self, _frame: &Frame) -> Result<Option<Cell>, PerceptionError> {
        Ok(None)
    }

    fn find_interactables(&mut self, _frame: &Frame) -> Result<Vec<Interactable>, PerceptionError> {
        Ok(Vec::new())
    }

    fn screen_hash(&mut self, frame: &Frame) -> Result<u64, PerceptionError> {
        Ok(dhash(frame))
    }
}
