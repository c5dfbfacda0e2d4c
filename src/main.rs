//! Durian Drop headless demo driver
//!
//! Runs the simulation at a fixed 60 Hz frame delta with a scripted dropper
//! sweeping the arena, and logs what the sim reports. Useful for watching a
//! run without a renderer attached, and as a reference host loop.

use std::path::Path;

use durian_drop::consts::*;
use durian_drop::sim::{step, GameEvent, GameState, RunOutcome, StepInput};
use durian_drop::{HighScore, Tuning};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xD00D);
    let tuning = Tuning::load(Path::new("tuning.json"));
    let score_path = Path::new(HighScore::FILE_NAME);
    let mut best = HighScore::load(score_path);

    let mut state = GameState::new(seed, best.best, tuning);
    state.start_run();
    log::info!("Run started (seed {seed}, best {})", best.best);

    // Sweep the dropper back and forth across the arena
    let mut dropper_x = ARENA_WIDTH / 2.0;
    let mut sweep_dir = 1.0f32;

    let mut final_frame = MAX_FRAMES;
    for frame in 0..MAX_FRAMES {
        dropper_x += sweep_dir * 180.0 * FRAME_DT;
        if !(100.0..=ARENA_WIDTH - 100.0).contains(&dropper_x) {
            sweep_dir = -sweep_dir;
            dropper_x = dropper_x.clamp(100.0, ARENA_WIDTH - 100.0);
        }

        let input = StepInput {
            drop_x: Some(dropper_x),
            pause: false,
        };
        let report = step(&mut state, &input, FRAME_DT);

        for event in &report.events {
            match event {
                GameEvent::Dropped { tier } => log::debug!("dropped tier {tier}"),
                GameEvent::Merged { pos, tier, pitch } => log::info!(
                    "merged into tier {tier} at ({:.0}, {:.0}), pitch {pitch:.2}",
                    pos.x,
                    pos.y
                ),
                GameEvent::HighScore { score } => {
                    // Write-through: the sim signals, the host persists
                    best.record(*score);
                    best.save(score_path);
                }
            }
        }

        if let Some(outcome) = report.outcome {
            let label = match outcome {
                RunOutcome::Victory => "victory",
                RunOutcome::GameOver => "game over",
            };
            log::info!("{label} after {} frames", frame + 1);
            final_frame = frame + 1;
            break;
        }
    }

    println!(
        "score {} (best {}), {} fruits on the board after {} frames",
        state.score,
        state.high_score,
        state.active_fruits(),
        final_frame,
    );
}
