//! Unified error types surfaced by the runtime API.
//!
//! Capture failures skip the tick, perception failures degrade to defaults,
//! input and persistence failures are reported per tick without ending the
//! loop.
use thiserror::Error;

pub use autoplay_core::MemoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("memory persistence failed")]
    Persistence(#[from] MemoryError),

    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("failed to encode snapshot frame")]
    SnapshotFrame(#[from] image::ImageError),

    #[error("failed to encode snapshot perception")]
    SnapshotJson(#[from] serde_json::Error),
}

/// Window discovery or pixel capture failed.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("window {0:?} not found")]
    WindowNotFound(String),

    #[error("capture backend unavailable: {0}")]
    Backend(String),
}

/// OCR or scene analysis failed on a captured frame.
#[derive(Debug, Error)]
pub enum PerceptionError {
    #[error("text recognition failed: {0}")]
    Ocr(String),

    #[error("scene analysis failed: {0}")]
    Vision(String),

    #[error("dialogue region capture failed")]
    Region(#[source] CaptureError),
}

/// Synthetic input could not be delivered.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input backend failed: {0}")]
    Backend(String),
}
