//! Read-only view of one tick for the renderer and HUD

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, EntityId};
use super::state::{GamePhase, GameState};
use super::weapon::PistolState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// `None` while standing still
    pub running_time: Option<f32>,
    /// Muzzle anchor, for drawing the gun
    pub hand_pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZombieSnapshot {
    pub id: EntityId,
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub running_time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotSnapshot {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoSnapshot {
    pub clip: u32,
    pub clip_size: u32,
    pub reloading: f32,
    pub reload_time: f32,
    pub state: PistolState,
    /// Ammo bar fill in [0, 1]
    pub fill: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub display_score: u64,
    pub player: PlayerSnapshot,
    pub ammo: AmmoSnapshot,
    pub zombies: Vec<ZombieSnapshot>,
    pub shots: Vec<ShotSnapshot>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let gun = &player.gun;

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            score: state.score,
            display_score: state.display_score(),
            player: PlayerSnapshot {
                pos: player.pos(),
                rotation: player.rotation(),
                radius: player.radius(),
                health: player.health(),
                max_health: player.max_health(),
                running_time: player.running_time,
                hand_pos: player.hand_pos(),
            },
            ammo: AmmoSnapshot {
                clip: gun.clip,
                clip_size: gun.clip_size,
                reloading: gun.reloading,
                reload_time: gun.reload_time,
                state: gun.state(),
                fill: gun.ammo_fraction(),
            },
            zombies: state
                .zombie_handler
                .zombies
                .iter()
                .map(|z| ZombieSnapshot {
                    id: z.id,
                    pos: z.pos(),
                    rotation: z.rotation(),
                    radius: z.radius(),
                    health: z.health(),
                    max_health: z.max_health(),
                    running_time: z.running_time,
                })
                .collect(),
            shots: state
                .shot_handler
                .shots
                .iter()
                .map(|s| {
                    let (from, to) = s.endpoints();
                    ShotSnapshot { from, to }
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
