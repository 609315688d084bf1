//! The player: WASD movement, mouse aim, pistol, and contact damage from zombies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, EntityId};
use super::geometry;
use super::shots::ShotHandler;
use super::tick::TickInput;
use super::weapon::{Aim, Pistol};
use super::zombie::ZombieHandler;
use crate::angle_between;
use crate::consts::DIAGONAL_FACTOR;
use crate::tuning::Tuning;

/// Seconds per frame of the run cycle
const RUN_FRAME_TIME: f32 = 0.1;

/// Result of pulling the trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Trigger not pulled, or the gun was empty or reloading
    #[default]
    NotFired,
    Miss,
    Hit(EntityId),
}

impl ShotOutcome {
    pub fn fired(self) -> bool {
        self != ShotOutcome::NotFired
    }

    /// Target of a fired shot; `None` for a miss or no shot
    pub fn target(self) -> Option<EntityId> {
        match self {
            ShotOutcome::Hit(id) => Some(id),
            ShotOutcome::NotFired | ShotOutcome::Miss => None,
        }
    }
}

/// What one player update did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTick {
    pub shot: ShotOutcome,
    pub reload_started: bool,
    /// Total contact damage taken
    pub damage_taken: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Normalized units per second
    pub velocity: f32,
    /// Seconds spent moving; `None` while standing still
    pub running_time: Option<f32>,
    /// Muzzle anchor in radius units, before rotation
    pub hand_offset: Vec2,
    pub gun: Pistol,
    /// Direction requested this tick (unscaled)
    pub last_movement: Vec2,
}

impl Actor for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl Player {
    /// A fresh player in the middle of the field
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: Body::new(
                Vec2::splat(0.5),
                tuning.player.radius,
                tuning.player.max_health,
            ),
            velocity: tuning.player.velocity,
            running_time: None,
            hand_offset: tuning.player.hand_offset,
            gun: Pistol::new(&tuning.pistol),
            last_movement: Vec2::ZERO,
        }
    }

    /// Full per-tick update, in order: move, aim, fire, take hits, reload
    pub fn update(
        &mut self,
        input: &TickInput,
        dt: f32,
        now: f64,
        shots: &mut ShotHandler,
        zombies: &mut ZombieHandler,
    ) -> PlayerTick {
        self.move_by(input, dt);
        self.keep_on_screen();
        self.rotate(input.pointer);
        self.update_run_timer();

        let shot = if input.fire {
            self.shoot(input.pointer, zombies, now, shots)
        } else {
            ShotOutcome::NotFired
        };
        let damage_taken = self.take_damage(zombies);
        let reload_started = self.gun.update(input.reload, dt);

        if let Some(running_time) = self.running_time.as_mut() {
            *running_time += dt;
        }

        PlayerTick {
            shot,
            reload_started,
            damage_taken,
        }
    }

    /// Step along the held direction; diagonals are scaled to axial speed
    pub fn move_by(&mut self, input: &TickInput, dt: f32) {
        let mut movement = Vec2::ZERO;
        if input.up {
            movement.y -= 1.0;
        }
        if input.down {
            movement.y += 1.0;
        }
        if input.left {
            movement.x -= 1.0;
        }
        if input.right {
            movement.x += 1.0;
        }
        self.last_movement = movement;

        let multiplier = if movement.x != 0.0 && movement.y != 0.0 {
            DIAGONAL_FACTOR
        } else {
            1.0
        };
        self.body.pos += movement * dt * self.velocity * multiplier;
    }

    /// Face the pointer
    pub fn rotate(&mut self, pointer: Vec2) {
        self.body.rotation = angle_between(self.body.pos, pointer);
    }

    /// Start the run clock when moving from rest; clear it when idle
    pub fn update_run_timer(&mut self) {
        if self.last_movement != Vec2::ZERO {
            if self.running_time.is_none() {
                self.running_time = Some(0.0);
            }
        } else {
            self.running_time = None;
        }
    }

    /// Muzzle anchor: the hand offset rotated with the player
    pub fn hand_pos(&self) -> Vec2 {
        let hand = self.body.pos + self.hand_offset * self.body.radius;
        geometry::rotate_around(hand, self.body.pos, self.body.rotation)
    }

    /// Fire the pistol; the new shot goes straight into the handler
    pub fn shoot(
        &mut self,
        pointer: Vec2,
        zombies: &ZombieHandler,
        now: f64,
        shots: &mut ShotHandler,
    ) -> ShotOutcome {
        let aim = Aim {
            origin: self.hand_pos(),
            shooter: self.body.pos,
            rotation: self.body.rotation,
            pointer,
        };
        let Some(shot) = self.gun.shoot(&aim, zombies, now) else {
            return ShotOutcome::NotFired;
        };
        let outcome = shot.target.map_or(ShotOutcome::Miss, ShotOutcome::Hit);
        shots.add_shot(shot);
        outcome
    }

    /// Every zombie touching the player and off cool-down lands a hit
    pub fn take_damage(&mut self, zombies: &mut ZombieHandler) -> f32 {
        let mut total = 0.0;
        for zombie in &mut zombies.zombies {
            let touching = geometry::circles_overlap(
                self.body.pos,
                self.body.radius,
                zombie.body.pos,
                zombie.body.radius,
            );
            if touching && zombie.can_hit() {
                self.body.health -= zombie.damage;
                total += zombie.damage;
                zombie.register_hit();
            }
        }
        total
    }

    /// Run-cycle frame; `None` while standing still
    pub fn anim_frame(&self, num_frames: usize) -> Option<usize> {
        let running_time = self.running_time?;
        if num_frames == 0 {
            return Some(0);
        }
        let cycle = RUN_FRAME_TIME * num_frames as f32;
        let frame = ((running_time % cycle) / RUN_FRAME_TIME) as usize;
        Some(frame.min(num_frames - 1))
    }
}
