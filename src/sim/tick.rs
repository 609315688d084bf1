//! Frame tick
//!
//! Core game loop: player, then shots, then the horde, all on one shared dt.

use glam::Vec2;

use super::actor::Actor;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Reload key pressed this tick
    pub reload: bool,
    /// Pause toggle pressed this tick
    pub pause: bool,
    /// Trigger pulled this tick
    pub fire: bool,
    /// Pointer position in normalized space
    pub pointer: Vec2,
    /// Idle/demo mode - AI aims and shoots
    pub idle_mode: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle. The phase at the start of the tick decides whether
    // the frame runs: the pausing tick still plays, the resuming tick does not.
    let was_playing = state.phase == GamePhase::Playing;
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at score {}", state.score);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
        }
    }
    if !was_playing {
        return;
    }

    // A run that ended last tick starts over before anything moves
    if state.player.is_dead() {
        let final_score = state.score;
        state.reset_objects();
        state.deaths += 1;
        state.events.push(GameEvent::SessionReset { final_score });
        log::info!(
            "Player died with score {} (display {}), starting over",
            final_score,
            final_score * crate::consts::DISPLAY_SCORE_MULTIPLIER
        );
    }

    let dt = dt.max(0.0);
    state.time_ticks += 1;
    state.time += dt as f64;
    let now = state.time;

    let autopilot;
    let input = if input.idle_mode {
        autopilot = idle_input(state);
        &autopilot
    } else {
        input
    };

    let player_tick = state.player.update(
        input,
        dt,
        now,
        &mut state.shot_handler,
        &mut state.zombie_handler,
    );
    if player_tick.shot.fired() {
        state.events.push(GameEvent::ShotFired {
            target: player_tick.shot.target(),
        });
    }
    if player_tick.damage_taken > 0.0 {
        state.events.push(GameEvent::PlayerHurt {
            amount: player_tick.damage_taken,
        });
    }
    if player_tick.reload_started {
        state.events.push(GameEvent::ReloadStarted);
    }

    state.shot_handler.update(now, &mut state.zombie_handler);

    let horde = state.zombie_handler.update(
        dt,
        now,
        state.score,
        &state.player,
        &mut state.rng,
    );
    state.score += horde.killed.len() as u64;
    state
        .events
        .extend(horde.spawned.iter().map(|&id| GameEvent::ZombieSpawned { id }));
    state
        .events
        .extend(horde.killed.iter().map(|&id| GameEvent::ZombieKilled { id }));
}

/// Autopilot: stand still, aim at the nearest zombie and keep pulling the trigger
fn idle_input(state: &GameState) -> TickInput {
    let target = state.zombie_handler.nearest_to(state.player.pos());
    TickInput {
        pointer: target.map_or(state.player.pos() + Vec2::X, |z| z.pos()),
        fire: target.is_some(),
        ..Default::default()
    }
}
