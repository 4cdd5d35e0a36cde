//! Runtime orchestration for the autoplay decision engine.
//!
//! This crate wires the collaborator traits, perception assembly, policy and
//! navigation into the per-tick [`Runner`] loop.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes error types and the collaborator traits adapters implement
//! - [`perception`] assembles one [`PerceptionSnapshot`] per tick
//! - [`providers`] hosts the policy that turns a snapshot into an [`Action`]
//! - [`navigation`] turns movement decisions into key presses
//! - [`repository`] writes periodic frame/perception/memory snapshots
//! - [`runner`] owns all mutable session state and drives the loop
//!
//! [`PerceptionSnapshot`]: autoplay_core::PerceptionSnapshot
//! [`Action`]: autoplay_core::Action
pub mod api;
pub mod config;
pub mod dispatch;
pub mod navigation;
pub mod perception;
pub mod providers;
pub mod repository;
pub mod runner;

pub use api::{
    CaptureError, Collaborators, InputDriver, InputError, PerceptionError, Region, Result,
    RuntimeError, SceneAnalyzer, TextReader, WindowCapture,
};
pub use config::RunnerConfig;
pub use dispatch::dispatch;
pub use navigation::Navigator;
pub use perception::{OcrSchedule, Perceived, PerceptionReport, Signal, SnapshotAssembler};
pub use providers::policy::{Agent, ChoiceKeywords};
pub use repository::SnapshotWriter;
pub use runner::{DecisionSource, Runner, TickReport, TickTimings};
