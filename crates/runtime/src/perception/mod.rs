//! Per-tick perception assembly.
//!
//! Collaborator outputs are folded into one [`PerceptionSnapshot`]. Failed
//! signals degrade to their defaults and are listed in a
//! [`PerceptionReport`] instead of aborting the tick.
//!
//! [`PerceptionSnapshot`]: autoplay_core::PerceptionSnapshot

mod assembler;
mod outcome;
mod schedule;

pub use assembler::{DialogRegion, SceneObservation, SnapshotAssembler, TextObservation};
pub use outcome::{Perceived, PerceptionReport, Signal};
pub use schedule::OcrSchedule;
