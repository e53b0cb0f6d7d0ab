//! Headless blockfall runner (default binary).
//!
//! Plays a game without a display: every new piece is rotated and shifted to a
//! pseudo-random column, then dropped with speed-up held. Stops at game over or
//! after the piece budget, and prints the result.
//!
//! Usage: `blockfall [--seed N] [--pieces N] [--save] [--load]`

use anyhow::{anyhow, Result};

use blockfall::core::{Playfield, SimpleRng};
use blockfall::session::{GameSession, Phase, SessionConfig, SessionEvent};
use blockfall::types::FIELD_WIDTH;

/// Simulated seconds per update
const TICK_SECS: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    seed: u32,
    pieces: u32,
    save: bool,
    load: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            pieces: 200,
            save: false,
            load: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--pieces" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --pieces"))?;
                config.pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --pieces value: {}", v))?;
            }
            "--save" => config.save = true,
            "--load" => config.load = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let run = parse_args(&args)?;

    let config = SessionConfig::from_env();
    let mut session = GameSession::new(&config, Playfield::with_seed(run.seed));
    if run.load && !session.quick_load() {
        return Err(anyhow!(
            "could not load {}",
            session.quick_save_path().display()
        ));
    }

    // separate stream so column choice does not disturb the piece sequence
    let mut placement = SimpleRng::new(run.seed.wrapping_add(0x9E37_79B9));
    let mut dropped = 0u32;
    let mut lines = 0usize;

    while session.phase() == Phase::Running {
        match session.update(TICK_SECS)? {
            SessionEvent::Spawned => {
                if dropped >= run.pieces {
                    break;
                }
                dropped += 1;
                let rotation = placement.next_range(4) as i32;
                let dx = placement.next_range(FIELD_WIDTH as u32) as i32 - 5;
                session.move_piece(0, rotation);
                session.move_piece(dx, 0);
                session.set_speed_up(true);
            }
            SessionEvent::Locked { cleared_rows, .. } => {
                lines += cleared_rows.len();
            }
            SessionEvent::GameOver => {
                println!("Game over after {} pieces", dropped);
            }
            SessionEvent::Fell | SessionEvent::Idle => {}
        }
    }

    println!("Score: {}", session.score());
    println!("Lines: {}", lines);
    println!("Cells on field: {}", session.playfield().grid().occupied_count());

    if run.save && !session.quick_save() {
        return Err(anyhow!("nothing to save"));
    }
    Ok(())
}
