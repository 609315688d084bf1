//! Horde Shooter headless runner
//!
//! Drives the simulation with the autopilot and logs how the run goes.
//! Usage: `horde-shooter [TUNING] [--seed N] [--seconds N]`

use std::path::PathBuf;

use clap::Parser;
use horde_shooter::Tuning;
use horde_shooter::sim::{GameEvent, GameState, TickInput, tick};

/// Fixed step for the headless run
const STEP: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "horde-shooter")]
#[command(about = "Run the zombie horde simulation headless on autopilot")]
struct Args {
    /// Balance overrides as JSON; built-in defaults when omitted
    tuning: Option<PathBuf>,
    /// RNG seed for zombie spawns
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60)]
    seconds: u32,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Horde Shooter (headless) starting...");

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args.seed;

    let mut state = GameState::with_tuning(seed, tuning);
    log::info!("Started new game with seed: {seed}");

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let ticks_per_second = (1.0 / STEP).round() as u32;
    let mut best_score = 0;

    for second in 1..=args.seconds {
        for _ in 0..ticks_per_second {
            tick(&mut state, &input, STEP);
            best_score = best_score.max(state.score);
            for event in &state.events {
                if let GameEvent::SessionReset { final_score } = event {
                    log::warn!("Player died at {second}s with score {final_score}");
                }
            }
        }
        log::info!(
            "t={second:>3}s score={:>4} zombies={:>3} hp={:>5.1} clip={}/{}",
            state.display_score(),
            state.zombie_handler.len(),
            state.player.body.health,
            state.player.gun.clip,
            state.player.gun.clip_size,
        );
    }

    log::info!(
        "Done: best score {} over {} deaths",
        best_score * horde_shooter::consts::DISPLAY_SCORE_MULTIPLIER,
        state.deaths
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["horde-shooter"]).unwrap();
        assert!(args.tuning.is_none());
        assert_eq!(args.seed, 0x5EED);
        assert_eq!(args.seconds, 60);
    }

    #[test]
    fn test_args_tuning_and_seed() {
        let args =
            Args::try_parse_from(["horde-shooter", "balance.json", "--seed", "42"]).unwrap();
        assert_eq!(args.tuning, Some(PathBuf::from("balance.json")));
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        let err = Args::try_parse_from(["horde-shooter", "--seed", "not-a-seed"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        // A stray second positional is an error too, not a silently ignored seed
        assert!(Args::try_parse_from(["horde-shooter", "t.json", "not-a-seed"]).is_err());
    }
}
