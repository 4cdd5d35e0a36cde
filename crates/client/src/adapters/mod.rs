//! Collaborator implementations shipped with the binary.
//!
//! Real window capture, OCR and synthetic input are platform services; these
//! adapters cover what can run anywhere: frame replay from disk, a perceptual
//! hash for scene fingerprints, and an input sink that only logs.

mod capture;
mod input;
mod scene;
mod text;

pub use capture::FrameDirCapture;
pub use input::LoggingInputDriver;
pub use scene::DHashSceneAnalyzer;
pub use text::NoopTextReader;
