//! Horde Shooter - a top-down zombie survival shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, shots, zombies, session state)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors
//!
//! Everything lives in a normalized unit square; the renderer scales it to pixels.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Player hit-circle radius (normalized units)
    pub const PLAYER_RADIUS: f32 = 0.02;
    /// Player speed (normalized units per second)
    pub const PLAYER_VELOCITY: f32 = 0.15;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Muzzle anchor in player-local space, multiplied by the radius
    pub const PLAYER_HAND_OFFSET: (f32, f32) = (0.6, 0.41);
    /// Diagonal movement scale: 1 - (1 - 1/sqrt(2))
    pub const DIAGONAL_FACTOR: f32 = 1.0 - 0.29289;

    /// Pistol clip capacity
    pub const PISTOL_CLIP_SIZE: u32 = 8;
    /// Seconds to reload
    pub const PISTOL_RELOAD_TIME: f32 = 0.8;
    pub const PISTOL_SHOT_DAMAGE: f32 = 30.0;
    /// Seconds a shot stays on screen
    pub const PISTOL_SHOT_SHOW_TIME: f32 = 0.05;
    /// Length of the forward ray used for hit-testing
    pub const SHOT_RAY_LENGTH: f32 = 1.4;

    pub const ZOMBIE_RADIUS: f32 = 0.015;
    pub const ZOMBIE_DAMAGE: f32 = 10.0;
    /// Seconds between two contact hits from the same zombie
    pub const ZOMBIE_HIT_COOL_DOWN: f32 = 0.2;
    /// Zombies stop walking at this fraction of the combined radii
    pub const ZOMBIE_MELEE_RANGE: f32 = 0.75;
    pub const ZOMBIE_BASE_VELOCITY: f32 = 0.1;
    /// Score needed for +1 unit/s of zombie speed
    pub const ZOMBIE_VELOCITY_SCORE_DIVISOR: f32 = 1000.0;
    pub const ZOMBIE_MAX_VELOCITY: f32 = 3.0;
    pub const ZOMBIE_BASE_HEALTH: f32 = 24.0;
    /// Score needed for +1x zombie health
    pub const ZOMBIE_HEALTH_SCORE_DIVISOR: f32 = 5.0;

    /// Spawn interval at score 0 (seconds)
    pub const SPAWN_BASE_INTERVAL: f32 = 2.0;
    /// Score at which the spawn rate has doubled
    pub const SPAWN_SCORE_DIVISOR: f32 = 50.0;

    /// Score readout multiplier
    pub const DISPLAY_SCORE_MULTIPLIER: u64 = 10;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit direction for a facing angle
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Facing angle from one point toward another
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
