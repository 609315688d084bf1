//! Session state: everything one run of the game owns
//!
//! Dying throws the whole run away; the seeded RNG and the clock carry on.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::EntityId;
use super::player::Player;
use super::shots::ShotHandler;
use super::zombie::ZombieHandler;
use crate::consts::DISPLAY_SCORE_MULTIPLIER;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
}

/// Things that happened during the last tick, for audio/FX collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { target: Option<EntityId> },
    ReloadStarted,
    ZombieSpawned { id: EntityId },
    ZombieKilled { id: EntityId },
    PlayerHurt { amount: f32 },
    SessionReset { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table every entity is built from
    pub tuning: Tuning,
    /// Spawn-position RNG
    pub rng: Pcg32,
    /// Zombies killed this run
    pub score: u64,
    /// Seconds of unpaused play since the session was created
    pub time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    pub shot_handler: ShotHandler,
    pub zombie_handler: ZombieHandler,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Number of runs lost so far
    pub deaths: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::new(&tuning),
            shot_handler: ShotHandler::new(),
            zombie_handler: ZombieHandler::new(tuning.zombie.clone(), tuning.spawn.clone()),
            events: Vec::new(),
            deaths: 0,
            tuning,
        }
    }

    /// (Re)create the player, shots and horde, and zero the score
    pub fn reset_objects(&mut self) {
        self.player = Player::new(&self.tuning);
        self.shot_handler = ShotHandler::new();
        self.zombie_handler =
            ZombieHandler::new(self.tuning.zombie.clone(), self.tuning.spawn.clone());
        self.score = 0;
    }

    /// Score as shown on screen
    pub fn display_score(&self) -> u64 {
        self.score * DISPLAY_SCORE_MULTIPLIER
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::Actor;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.zombie_handler.is_empty());
        assert!(state.shot_handler.is_empty());
        assert_eq!(state.player.health(), 100.0);
    }

    #[test]
    fn test_reset_objects() {
        let mut state = GameState::new(42);
        state.score = 12;
        state.player.body.health = -3.0;
        state.player.gun.clip = 2;
        state.zombie_handler.time_until_spawn = -4.0;

        state.reset_objects();
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::new(&state.tuning));
        assert_eq!(state.zombie_handler.time_until_spawn, 0.0);
    }

    #[test]
    fn test_display_score() {
        let mut state = GameState::new(1);
        state.score = 7;
        assert_eq!(state.display_score(), 70);
    }

    #[test]
    fn test_custom_tuning_reaches_entities() {
        let mut tuning = Tuning::default();
        tuning.pistol.clip_size = 3;
        tuning.player.max_health = 50.0;
        let state = GameState::with_tuning(1, tuning);
        assert_eq!(state.player.gun.clip, 3);
        assert_eq!(state.player.body.max_health, 50.0);
    }
}
