//! Public runtime API surface.
//!
//! Error types and the collaborator contracts live here so adapters (window
//! capture, OCR, scene analysis, input emulation) depend on nothing else.

pub mod collaborators;
pub mod errors;

pub use collaborators::{
    Collaborators, InputDriver, Region, SceneAnalyzer, TextReader, WindowCapture,
};
pub use errors::{CaptureError, InputError, PerceptionError, Result, RuntimeError};
