//! Runner configuration and environment loader.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use autoplay_core::{BlockedConfig, Hand, MemoryConfig};

/// Tick rate bounds for the loop.
pub const MIN_TICK_HZ: u32 = 10;
pub const MAX_TICK_HZ: u32 = 15;

/// Settings for one autoplay session.
#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    /// Title of the game window to capture.
    pub window_title: String,
    /// OCR language set, `+` separated.
    pub langs: String,
    pub wall_hand: Hand,
    /// Compute decisions without sending any input.
    pub dry_run: bool,
    /// Enables periodic frame, perception and memory snapshots.
    pub snapshot_dir: Option<PathBuf>,
    pub tick_hz: u32,
    pub similarity_threshold: f64,
    pub motion_threshold: f64,
    /// Blocked time after which the unblock routine overrides the policy.
    pub unblock_after_secs: f64,
    /// Hold duration of one movement step.
    pub step_secs: f64,
    pub miss_strikes: u32,
    /// Idle time after which a no-progress warning is logged.
    pub progress_timeout_secs: f64,
    pub snapshot_interval_secs: f64,
    pub ocr_low_fps: f64,
    pub ocr_widened_every: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let blocked = BlockedConfig::default();
        let memory = MemoryConfig::default();
        Self {
            window_title: "rmmz-game".to_owned(),
            langs: "eng+jpn".to_owned(),
            wall_hand: Hand::Right,
            dry_run: false,
            snapshot_dir: None,
            tick_hz: 12,
            similarity_threshold: blocked.similarity_threshold,
            motion_threshold: blocked.motion_threshold,
            unblock_after_secs: 8.0,
            step_secs: 0.15,
            miss_strikes: memory.miss_strikes,
            progress_timeout_secs: 60.0,
            snapshot_interval_secs: 1.0,
            ocr_low_fps: 6.0,
            ocr_widened_every: 3,
        }
    }
}

impl RunnerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AUTOPLAY_WINDOW` - Game window title (default: rmmz-game)
    /// - `AUTOPLAY_LANGS` - OCR languages (default: eng+jpn)
    /// - `AUTOPLAY_WALL_HAND` - `left` or `right` (default: right)
    /// - `AUTOPLAY_DRY_RUN` - Suppress input (default: false)
    /// - `AUTOPLAY_SNAPSHOT_DIR` - Snapshot directory (default: none)
    /// - `AUTOPLAY_TICK_HZ` - Loop rate, clamped to 10..=15 (default: 12)
    /// - `AUTOPLAY_SIMILARITY_THRESHOLD` - Blocked similarity (default: 0.995)
    /// - `AUTOPLAY_MOTION_THRESHOLD` - Blocked motion ceiling (default: 0.2)
    /// - `AUTOPLAY_UNBLOCK_AFTER` - Seconds before unblocking (default: 8.0)
    /// - `AUTOPLAY_STEP_SECS` - Movement hold duration (default: 0.15)
    /// - `AUTOPLAY_MISS_STRIKES` - Interactable miss hysteresis (default: 2)
    /// - `AUTOPLAY_PROGRESS_TIMEOUT` - No-progress warning (default: 60)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(title) = read_env::<String>("AUTOPLAY_WINDOW") {
            config.window_title = title;
        }
        if let Some(langs) = read_env::<String>("AUTOPLAY_LANGS") {
            config.langs = langs;
        }
        if let Some(hand) = read_env::<Hand>("AUTOPLAY_WALL_HAND") {
            config.wall_hand = hand;
        }
        if let Some(dry_run) = read_env_bool("AUTOPLAY_DRY_RUN") {
            config.dry_run = dry_run;
        }
        if let Some(dir) = read_env::<PathBuf>("AUTOPLAY_SNAPSHOT_DIR") {
            config.snapshot_dir = Some(dir);
        }
        if let Some(hz) = read_env::<u32>("AUTOPLAY_TICK_HZ") {
            config.tick_hz = hz;
        }
        if let Some(threshold) = read_env::<f64>("AUTOPLAY_SIMILARITY_THRESHOLD") {
            config.similarity_threshold = threshold;
        }
        if let Some(threshold) = read_env::<f64>("AUTOPLAY_MOTION_THRESHOLD") {
            config.motion_threshold = threshold;
        }
        if let Some(secs) = read_env::<f64>("AUTOPLAY_UNBLOCK_AFTER") {
            config.unblock_after_secs = secs;
        }
        if let Some(secs) = read_env::<f64>("AUTOPLAY_STEP_SECS") {
            config.step_secs = secs;
        }
        if let Some(strikes) = read_env::<u32>("AUTOPLAY_MISS_STRIKES") {
            config.miss_strikes = strikes.max(1);
        }
        if let Some(secs) = read_env::<f64>("AUTOPLAY_PROGRESS_TIMEOUT") {
            config.progress_timeout_secs = secs;
        }

        config
    }

    /// Tick rate clamped into the supported range.
    pub fn tick_hz(&self) -> u32 {
        self.tick_hz.clamp(MIN_TICK_HZ, MAX_TICK_HZ)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_hz()))
    }

    pub fn step_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.step_secs).unwrap_or(crate::navigation::STEP_DURATION)
    }

    pub fn blocked_config(&self) -> BlockedConfig {
        BlockedConfig {
            similarity_threshold: self.similarity_threshold,
            motion_threshold: self.motion_threshold,
        }
    }

    pub fn memory_config(&self) -> MemoryConfig {
        MemoryConfig {
            miss_strikes: self.miss_strikes.max(1),
            ..MemoryConfig::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
