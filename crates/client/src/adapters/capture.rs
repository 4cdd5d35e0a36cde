use std::fs;
use std::path::{Path, PathBuf};

use autoplay_core::Frame;
use autoplay_runtime::{CaptureError, Region, WindowCapture};

/// Replays a directory of PNG frames as if they were window captures.
///
/// Frames are served in file-name order; after the last one the final frame
/// repeats, which looks like a frozen window to the runner.
pub struct FrameDirCapture {
    frames: Vec<PathBuf>,
    cursor: usize,
    current: Option<Frame>,
}

impl FrameDirCapture {
    pub fn open(dir: impl AsRef<Path>, title: impl Into<String>) -> Result<Self, CaptureError> {
        let dir = dir.as_ref();
        let title = title.into();

        let entries = fs::read_dir(dir).map_err(|_| CaptureError::WindowNotFound(title.clone()))?;
        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
            .collect();
        if frames.is_empty() {
            return Err(CaptureError::WindowNotFound(title));
        }
        frames.sort();

        tracing::info!(window = %title, dir = %dir.display(), frames = frames.len(), "replaying frames");
        Ok(Self {
            frames,
            cursor: 0,
            current: None,
        })
    }

    fn load(&self, index: usize) -> Result<Frame, CaptureError> {
        let path = &self.frames[index];
        image::open(path)
            .map(|image| image.to_rgb8())
            .map_err(|e| CaptureError::Backend(format!("{}: {e}", path.display())))
    }
}

impl WindowCapture for FrameDirCapture {
    fn screenshot(&mut self) -> Result<Frame, CaptureError> {
        let frame = self.load(self.cursor)?;
        self.cursor = (self.cursor + 1).min(self.frames.len() - 1);
        self.current = Some(frame.clone());
        Ok(frame)
    }

    fn screenshot_region(&mut self, region: Region) -> Result<Frame, CaptureError> {
        if self.current.is_none() {
            self.screenshot()?;
        }
        let Some(frame) = &self.current else {
            return Err(CaptureError::Backend("no frame captured".to_owned()));
        };

        let x = u32::try_from(region.x.max(0)).unwrap_or(0).min(frame.width());
        let y = u32::try_from(region.y.max(0)).unwrap_or(0).min(frame.height());
        let width = region.width.min(frame.width() - x);
        let height = region.height.min(frame.height() - y);
        if width == 0 || height == 0 {
            return Err(CaptureError::Backend(format!(
                "region {region:?} outside {}x{} frame",
                frame.width(),
                frame.height()
            )));
        }
        Ok(image::imageops::crop_imm(frame, x, y, width, height).to_image())
    }

    fn bbox(&mut self) -> Result<Region, CaptureError> {
        let (width, height) = match &self.current {
            Some(frame) => frame.dimensions(),
            None => self.load(0)?.dimensions(),
        };
        Ok(Region::new(0, 0, width, height))
    }
}
