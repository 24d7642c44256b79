//! Cat Runner entry point
//!
//! Runs a headless, autopiloted session and prints the final snapshot as JSON.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use cat_runner::Tuning;
use cat_runner::platform::{Headless, HostCallbacks};
use cat_runner::sim::{GameEvent, GameState};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cat-runner",
    about = "Headless autopiloted endless runner; prints the final snapshot as JSON"
)]
struct Cli {
    /// Balance table (JSON). Missing fields take defaults.
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Run seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Frame cap (36000 is ten minutes at 60 Hz)
    #[arg(long, default_value_t = 36_000)]
    frames: u32,
}

/// Host that logs what a UI would show
#[derive(Default)]
struct Telemetry {
    final_score: Option<u64>,
    stages_completed: u32,
    hits: u32,
}

impl HostCallbacks for Telemetry {
    fn on_game_over(&mut self, score: u64) {
        self.final_score = Some(score);
    }

    fn on_stage_complete(&mut self, stage: u32) {
        self.stages_completed += 1;
        log::info!("Milestone: stage {} reached", stage);
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Hit { .. } => self.hits += 1,
            GameEvent::StageReached { stage, speed } => {
                log::debug!("Stage {} at speed {:.1}", stage, speed);
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    log::info!("Cat Runner (headless) starting...");

    let tuning = match &cli.tuning {
        Some(path) => Tuning::from_path(path)
            .with_context(|| format!("Failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut state =
        GameState::with_tuning(cli.seed, tuning).context("Tuning table is not usable")?;
    state.set_assets_ready(true);

    let mut host = Telemetry::default();
    let mut runner = Headless::new(state).autopilot(true);
    let frames = runner.run(cli.frames, &mut host);

    match host.final_score {
        Some(score) => log::info!(
            "Run over after {} frames: score {}, {} milestones, {} absorbed hits",
            frames,
            score,
            host.stages_completed,
            host.hits
        ),
        None => log::info!(
            "Stopped after {} frames at score {} (stage {})",
            frames,
            runner.state.progression.score,
            runner.state.progression.stage
        ),
    }

    let json = serde_json::to_string_pretty(&runner.state.snapshot())
        .context("Failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["cat-runner"]).unwrap();
        assert_eq!(cli.seed, 12345);
        assert_eq!(cli.frames, 36_000);
        assert!(cli.tuning.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_numbers() {
        assert!(Cli::try_parse_from(["cat-runner", "--seed", "abc"]).is_err());
        assert!(Cli::try_parse_from(["cat-runner", "--frames", "-5"]).is_err());
        let cli = Cli::try_parse_from(["cat-runner", "--seed", "7", "--frames", "10"]).unwrap();
        assert_eq!((cli.seed, cli.frames), (7, 10));
    }

    #[test]
    fn test_missing_tuning_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "cat-runner",
            "--tuning",
            "/nonexistent/cat-runner-tuning.json",
            "--frames",
            "1",
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load tuning"));
    }
}
