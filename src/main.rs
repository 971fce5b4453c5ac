//! Lane Hopper headless driver
//!
//! Runs the autopilot against a session and prints the outcome as JSON.
//! Usage: `lane-hopper [seed] [settings.json]`

use lane_hopper::sim::autopilot_intent;
use lane_hopper::{GameError, GameSession, Settings};

/// Frames simulated per run
const FRAMES_PER_RUN: u32 = 20_000;
/// Frames between autopilot moves
const FRAMES_PER_INTENT: u32 = 8;
/// Runs before giving up
const MAX_RUNS: u32 = 3;

fn main() {
    env_logger::init();
    log::info!("Lane Hopper (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .map_err(|e| GameError::InvalidSettings(format!("bad seed {s:?}: {e}")))?,
        None => 1,
    };
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| GameError::InvalidSettings(format!("cannot read {path}: {e}")))?;
            Settings::from_json(&json)?
        }
        None => Settings::default(),
    };

    let mut session = GameSession::new(settings, seed)?;

    for run in 1..=MAX_RUNS {
        for frame in 0..FRAMES_PER_RUN {
            if frame % FRAMES_PER_INTENT == 0 {
                if let Some(direction) = autopilot_intent(session.state()) {
                    session.handle_intent(direction)?;
                }
            }
            session.tick();
            for event in session.drain_events() {
                log::debug!("{:?}", event);
            }
            if session.is_game_over() {
                break;
            }
        }

        let snap = session.snapshot();
        log::info!(
            "Run {} ended: score {}, high score {}, game over: {}",
            run,
            snap.score,
            snap.high_score,
            snap.is_game_over
        );
        if !snap.is_game_over || run == MAX_RUNS {
            break;
        }
        session.restart()?;
    }

    let snap = session.snapshot();
    let summary = serde_json::json!({
        "seed": snap.seed,
        "score": snap.score,
        "high_score": snap.high_score,
        "is_game_over": snap.is_game_over,
        "player": snap.player,
        "camera_row": snap.camera_row,
        "live_tiles": snap.tiles.len(),
        "live_rafts": snap.rafts.len(),
        "high_scores": session.high_scores(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
