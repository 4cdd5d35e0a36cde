//! `autoplay` binary: parses flags, installs logging, wires adapters into a
//! [`Runner`] and ticks until Ctrl-C.

mod adapters;
mod cli;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use autoplay_core::SystemClock;
use autoplay_runtime::{Collaborators, Runner, RunnerConfig};
use clap::Parser;

use adapters::{DHashSceneAnalyzer, FrameDirCapture, LoggingInputDriver, NoopTextReader};
use cli::{Cli, Command, RunArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let mut config = RunnerConfig::from_env();
    args.apply(&mut config);

    let _guard = logging::setup_logging(
        &logging::log_dir(config.snapshot_dir.as_deref()),
        args.debug,
    )?;

    let frames = args
        .frames
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.window_title));
    let capture = FrameDirCapture::open(&frames, &config.window_title)
        .with_context(|| format!("cannot capture from {}", frames.display()))?;

    let collaborators = Collaborators {
        capture: Box::new(capture),
        reader: Box::new(NoopTextReader::new(&config.langs)),
        analyzer: Box::new(DHashSceneAnalyzer),
        input: Box::new(LoggingInputDriver::default()),
    };

    let mut runner = Runner::new(config, collaborators, Arc::new(SystemClock))
        .context("failed to start runner")?;

    runner
        .run(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::error!(%error, "cannot listen for Ctrl-C");
            }
        })
        .await;

    Ok(())
}
