//! Error types raised by core state handling.

use thiserror::Error;

/// Errors surfaced while persisting or restoring [`crate::Memory`].
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cell ({x}, {y}) is outside the packable 16-bit range")]
    CellOutOfRange { x: i32, y: i32 },
}

pub type Result<T> = std::result::Result<T, MemoryError>;
