//! The per-tick capture/decide/act loop.
//!
//! [`Runner`] exclusively owns the session state (memory, blocked tracker,
//! unblock cursor, OCR schedule) and the collaborators. One tick runs
//! strictly in order:
//!
//! ```text
//! capture → OCR (scheduled) → scene analysis → Memory::update
//!         → blocked time → policy or unblock override → dispatch
//! ```
//!
//! A failed tick is logged and skipped; the loop keeps going until the
//! shutdown future resolves, then flushes memory.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use autoplay_core::{
    Action, BlockedStateTracker, Clock, Frame, Memory, PerceptionSnapshot, UnblockRoutine,
};
use tokio::time::MissedTickBehavior;

use crate::api::{Collaborators, Result};
use crate::config::RunnerConfig;
use crate::dispatch::dispatch;
use crate::navigation::Navigator;
use crate::perception::{OcrSchedule, PerceptionReport, SnapshotAssembler, TextObservation};
use crate::providers::policy::Agent;
use crate::repository::SnapshotWriter;

/// Which component produced a tick's action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionSource {
    Policy,
    /// Blocked time reached the timeout; the unblock routine took over.
    Unblock,
}

/// Wall time spent in each stage of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickTimings {
    pub capture: Duration,
    pub ocr: Duration,
    pub cv: Duration,
    pub policy: Duration,
    pub control: Duration,
}

impl TickTimings {
    pub fn total(&self) -> Duration {
        self.capture + self.ocr + self.cv + self.policy + self.control
    }
}

/// Everything a completed tick observed and decided.
#[derive(Debug)]
pub struct TickReport {
    pub frame: Frame,
    pub snapshot: PerceptionSnapshot,
    pub perception: PerceptionReport,
    pub action: Action,
    pub source: DecisionSource,
    pub blocked_seconds: f64,
    /// Whether OCR ran this tick.
    pub ocr_ran: bool,
    /// False in dry-run mode.
    pub dispatched: bool,
    pub timings: TickTimings,
}

pub struct Runner {
    config: RunnerConfig,
    collaborators: Collaborators,
    clock: Arc<dyn Clock>,
    memory: Memory,
    tracker: BlockedStateTracker,
    unblock: UnblockRoutine,
    agent: Agent,
    navigator: Navigator,
    assembler: SnapshotAssembler,
    schedule: OcrSchedule,
    snapshots: Option<SnapshotWriter>,
    last_tick: Option<f64>,
    stalled: bool,
}

impl Runner {
    /// Builds a runner for one session.
    ///
    /// With a snapshot directory, memory is restored from its `memory.json`
    /// when present. A file that fails to load is logged and replaced by
    /// fresh memory.
    pub fn new(
        config: RunnerConfig,
        collaborators: Collaborators,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let snapshots = match &config.snapshot_dir {
            Some(dir) => Some(SnapshotWriter::new(dir, config.snapshot_interval_secs)?),
            None => None,
        };

        let memory = match &snapshots {
            Some(writer) if writer.memory_path().exists() => {
                let path = writer.memory_path();
                match Memory::load(&path, config.memory_config(), clock.clone()) {
                    Ok(memory) => {
                        tracing::info!(
                            path = %path.display(),
                            visited = memory.visited_cells().len(),
                            "memory restored"
                        );
                        memory
                    }
                    Err(error) => {
                        tracing::warn!(path = %path.display(), %error, "memory load failed, starting fresh");
                        Memory::new(config.memory_config(), clock.clone())
                    }
                }
            }
            _ => Memory::new(config.memory_config(), clock.clone()),
        };

        Ok(Self {
            tracker: BlockedStateTracker::new(config.blocked_config()),
            unblock: UnblockRoutine::new(),
            agent: Agent::new(config.wall_hand),
            navigator: Navigator::new(config.step_duration()),
            assembler: SnapshotAssembler::default(),
            schedule: OcrSchedule::new(config.ocr_low_fps, config.ocr_widened_every),
            snapshots,
            last_tick: None,
            stalled: false,
            config,
            collaborators,
            clock,
            memory,
        })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn blocked_seconds(&self) -> f64 {
        self.tracker.blocked_seconds()
    }

    pub fn ocr_schedule(&self) -> &OcrSchedule {
        &self.schedule
    }

    pub fn snapshots(&self) -> Option<&SnapshotWriter> {
        self.snapshots.as_ref()
    }

    /// Runs one tick. An `Err` means the tick was skipped.
    ///
    /// `dt` for blocked-time accounting is the clock time since the previous
    /// captured tick (zero on the first one).
    pub fn step(&mut self) -> Result<TickReport> {
        let now = self.clock.now();
        let mut timings = TickTimings::default();

        let started = Instant::now();
        let frame = self.collaborators.capture.screenshot()?;
        timings.capture = started.elapsed();

        // A skipped capture leaves the previous tick as the reference.
        let dt = self.last_tick.map_or(0.0, |last| (now - last).max(0.0));
        self.last_tick = Some(now);

        let mut perception = PerceptionReport::new();
        let ocr_ran = self.schedule.due();
        let started = Instant::now();
        let text = if ocr_ran {
            self.assembler.read_text(
                &frame,
                self.collaborators.capture.as_mut(),
                self.collaborators.reader.as_mut(),
                &mut perception,
            )
        } else {
            TextObservation::default()
        };
        timings.ocr = started.elapsed();

        let started = Instant::now();
        let scene =
            self.assembler
                .analyze_scene(&frame, self.collaborators.analyzer.as_mut(), &mut perception);
        timings.cv = started.elapsed();

        let snapshot = self.assembler.assemble(text, scene);
        self.memory.update(&snapshot);
        let blocked_seconds = self.tracker.observe(&frame, dt);

        let started = Instant::now();
        let (action, source) = if blocked_seconds >= self.config.unblock_after_secs {
            let step = self.unblock.next_step();
            (Action::Unblock { step }, DecisionSource::Unblock)
        } else {
            (
                self.agent.decide(&snapshot, &mut self.memory),
                DecisionSource::Policy,
            )
        };
        timings.policy = started.elapsed();

        tracing::info!(
            in_dialog = snapshot.in_dialog,
            dialog = snapshot.dialog_text.as_deref().unwrap_or(""),
            choices = snapshot.choices.len(),
            position = ?snapshot.position,
            interactables = snapshot.interactables.len(),
            fingerprint = ?snapshot.fingerprint,
            "perception"
        );
        tracing::info!(action = ?action, source = ?source, blocked_seconds, "action");

        let started = Instant::now();
        let dispatched = if self.config.dry_run {
            false
        } else {
            dispatch(
                &action,
                self.collaborators.input.as_mut(),
                &self.navigator,
                &mut self.memory,
            )?;
            true
        };
        timings.control = started.elapsed();

        tracing::debug!(
            capture = ?timings.capture,
            ocr = ?timings.ocr,
            cv = ?timings.cv,
            policy = ?timings.policy,
            control = ?timings.control,
            total = ?timings.total(),
            "timings"
        );

        Ok(TickReport {
            frame,
            snapshot,
            perception,
            action,
            source,
            blocked_seconds,
            ocr_ran,
            dispatched,
            timings,
        })
    }

    /// One loop iteration: step, snapshot, progress check, OCR pacing.
    ///
    /// Never fails; a skipped tick yields `None`.
    pub fn cycle(&mut self) -> Option<TickReport> {
        let started = Instant::now();

        let report = match self.step() {
            Ok(report) => Some(report),
            Err(error) => {
                tracing::warn!(%error, "tick skipped");
                None
            }
        };

        if let (Some(report), Some(writer)) = (&report, self.snapshots.as_mut()) {
            let now = self.clock.now();
            if let Err(error) = writer.maybe_write(now, &report.frame, &report.snapshot, &self.memory)
            {
                tracing::warn!(%error, "snapshot failed");
            }
        }

        let stalled = self.memory.no_progress(self.config.progress_timeout_secs);
        if stalled && !self.stalled {
            tracing::warn!(
                timeout_secs = self.config.progress_timeout_secs,
                last_progress_t = self.memory.last_progress_t(),
                "no progress"
            );
        }
        self.stalled = stalled;

        let elapsed = started.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            1.0 / elapsed
        } else {
            f64::INFINITY
        };
        self.schedule.advance(fps);
        tracing::debug!(fps, ocr_every = self.schedule.every(), "tick done");

        report
    }

    /// Ticks at the configured rate until `shutdown` resolves, then flushes
    /// memory.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.config.tick_period());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            window = %self.config.window_title,
            hz = self.config.tick_hz(),
            dry_run = self.config.dry_run,
            "runner started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("runner stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.cycle();
                }
            }
        }

        if let Err(error) = self.flush() {
            tracing::error!(%error, "final memory flush failed");
        }
    }

    /// Saves memory into the snapshot directory, if one is configured.
    pub fn flush(&self) -> Result<()> {
        if let Some(writer) = &self.snapshots {
            writer.flush_memory(&self.memory)?;
            tracing::info!(path = %writer.memory_path().display(), "memory flushed");
        }
        Ok(())
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        if let Err(error) = self.flush() {
            tracing::error!(%error, "memory flush during unwind failed");
        }
    }
}
