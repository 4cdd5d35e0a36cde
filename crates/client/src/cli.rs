//! Command-line surface.

use std::path::PathBuf;

use autoplay_core::Hand;
use autoplay_runtime::RunnerConfig;
use clap::{Args, Parser, Subcommand};

/// Autoplay agent for tile-grid RPGs
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Plays a tile-grid game by watching its window", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the capture/decide/act loop
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Title of the game window
    #[arg(long)]
    pub window: Option<String>,

    /// Compute decisions but send no input
    #[arg(long)]
    pub dry_run: bool,

    /// Debug-level logging
    #[arg(long)]
    pub debug: bool,

    /// OCR languages, `+` separated (e.g. eng+jpn)
    #[arg(long)]
    pub lang: Option<String>,

    /// Wall-following hand
    #[arg(long, value_parser = ["left", "right"])]
    pub wall_hand: Option<String>,

    /// Directory for periodic frame/perception/memory snapshots
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    /// Directory of PNG frames to replay (defaults to the window title)
    #[arg(long)]
    pub frames: Option<PathBuf>,
}

impl RunArgs {
    /// Flags override whatever the environment configured.
    pub fn apply(&self, config: &mut RunnerConfig) {
        if let Some(window) = &self.window {
            config.window_title = window.clone();
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if let Some(lang) = &self.lang {
            config.langs = lang.clone();
        }
        if let Some(hand) = self.wall_hand.as_deref().and_then(|h| h.parse::<Hand>().ok()) {
            config.wall_hand = hand;
        }
        if let Some(dir) = &self.snapshot_dir {
            config.snapshot_dir = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "autoplay",
            "run",
            "--window",
            "My Game",
            "--dry-run",
            "--wall-hand",
            "left",
            "--lang",
            "eng",
            "--snapshot-dir",
            "/tmp/snaps",
        ])
        .unwrap();
        let Command::Run(args) = cli.command;

        let mut config = RunnerConfig::default();
        args.apply(&mut config);

        assert_eq!(config.window_title, "My Game");
        assert!(config.dry_run);
        assert_eq!(config.wall_hand, Hand::Left);
        assert_eq!(config.langs, "eng");
        assert_eq!(config.snapshot_dir, Some(PathBuf::from("/tmp/snaps")));
    }

    #[test]
    fn rejects_unknown_hand() {
        assert!(Cli::try_parse_from(["autoplay", "run", "--wall-hand", "both"]).is_err());
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = RunnerConfig::default();
        RunArgs::default().apply(&mut config);
        assert_eq!(config, RunnerConfig::default());
    }
}
