//! Letter Drop headless runner
//!
//! Plays one autopilot session on a simulated 60 Hz clock and prints the
//! final snapshot as JSON. `RUST_LOG=debug` shows every spawn and catch.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use letter_drop::audio::{AudioManager, LogBackend};
use letter_drop::consts::FRAME_MS;
use letter_drop::platform::{Game, HeadlessHost, HostStats};
use letter_drop::sim::{GamePhase, Snapshot};
use letter_drop::GameConfig;

#[derive(Parser)]
#[command(name = "letter-drop")]
#[command(about = "Run a headless Letter Drop session with the autopilot")]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many frames even if the game is not over
    #[arg(short, long, default_value_t = 60 * 60 * 10)]
    frames: u64,

    /// JSON config file; missing keys use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    frames: u64,
    stats: &'a HostStats,
    snapshot: Snapshot<'a>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Letter Drop (headless) starting, seed {seed}");

    let audio = AudioManager::new(LogBackend, config.audio.clone());
    let mut game = Game::new(config, seed, HeadlessHost::new(audio));
    game.set_autopilot(true);
    game.start();

    let mut frame = 0;
    while frame < args.frames && game.state().phase != GamePhase::GameOver {
        if game.state().phase == GamePhase::Idle {
            // An auto-restart lands in Idle; press start again
            game.start();
        }
        game.frame(frame as f64 * FRAME_MS);
        frame += 1;
    }
    log::info!(
        "Finished after {frame} frames: score {}, phase {:?}",
        game.state().score,
        game.state().phase
    );

    let report = Report {
        seed,
        frames: frame,
        stats: &game.host().stats,
        snapshot: game.state().snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
