//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! tuning file only needs the values it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    pub velocity: f32,
    pub max_health: f32,
    /// Muzzle anchor in radius units, before rotation
    pub hand_offset: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            velocity: PLAYER_VELOCITY,
            max_health: PLAYER_MAX_HEALTH,
            hand_offset: Vec2::new(PLAYER_HAND_OFFSET.0, PLAYER_HAND_OFFSET.1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PistolTuning {
    pub clip_size: u32,
    pub reload_time: f32,
    pub shot_damage: f32,
    pub show_time: f32,
    pub ray_length: f32,
}

impl Default for PistolTuning {
    fn default() -> Self {
        Self {
            clip_size: PISTOL_CLIP_SIZE,
            reload_time: PISTOL_RELOAD_TIME,
            shot_damage: PISTOL_SHOT_DAMAGE,
            show_time: PISTOL_SHOT_SHOW_TIME,
            ray_length: SHOT_RAY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombieTuning {
    pub radius: f32,
    pub damage: f32,
    pub hit_cool_down: f32,
    pub melee_range: f32,
    pub base_velocity: f32,
    pub velocity_score_divisor: f32,
    pub max_velocity: f32,
    pub base_health: f32,
    pub health_score_divisor: f32,
}

impl Default for ZombieTuning {
    fn default() -> Self {
        Self {
            radius: ZOMBIE_RADIUS,
            damage: ZOMBIE_DAMAGE,
            hit_cool_down: ZOMBIE_HIT_COOL_DOWN,
            melee_range: ZOMBIE_MELEE_RANGE,
            base_velocity: ZOMBIE_BASE_VELOCITY,
            velocity_score_divisor: ZOMBIE_VELOCITY_SCORE_DIVISOR,
            max_velocity: ZOMBIE_MAX_VELOCITY,
            base_health: ZOMBIE_BASE_HEALTH,
            health_score_divisor: ZOMBIE_HEALTH_SCORE_DIVISOR,
        }
    }
}

impl ZombieTuning {
    /// Walking speed for a zombie spawned at `score`
    pub fn velocity_at(&self, score: u64) -> f32 {
        (self.base_velocity + score as f32 / self.velocity_score_divisor).min(self.max_velocity)
    }

    /// Max health for a zombie spawned at `score`
    pub fn max_health_at(&self, score: u64) -> f32 {
        self.base_health * (1.0 + score as f32 / self.health_score_divisor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub base_interval: f32,
    pub score_divisor: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_interval: SPAWN_BASE_INTERVAL,
            score_divisor: SPAWN_SCORE_DIVISOR,
        }
    }
}

impl SpawnTuning {
    /// Seconds between spawns at `score`; shrinks as score grows but never hits 0
    pub fn interval_at(&self, score: u64) -> f32 {
        self.base_interval / (score as f32 / self.score_divisor + 1.0)
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub pistol: PistolTuning,
    pub zombie: ZombieTuning,
    pub spawn: SpawnTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        fn non_negative(value: f32, field: &'static str) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a non-negative number",
                })
            }
        }

        positive(self.player.radius, "player.radius")?;
        if self.player.radius >= 0.5 {
            return Err(ConfigError::Invalid {
                field: "player.radius",
                reason: "must be smaller than half the field",
            });
        }
        positive(self.player.velocity, "player.velocity")?;
        positive(self.player.max_health, "player.max_health")?;

        if self.pistol.clip_size == 0 {
            return Err(ConfigError::Invalid {
                field: "pistol.clip_size",
                reason: "must be at least 1",
            });
        }
        positive(self.pistol.reload_time, "pistol.reload_time")?;
        positive(self.pistol.show_time, "pistol.show_time")?;
        positive(self.pistol.ray_length, "pistol.ray_length")?;

        positive(self.zombie.radius, "zombie.radius")?;
        non_negative(self.zombie.damage, "zombie.damage")?;
        positive(self.zombie.hit_cool_down, "zombie.hit_cool_down")?;
        non_negative(self.zombie.melee_range, "zombie.melee_range")?;
        positive(self.zombie.base_velocity, "zombie.base_velocity")?;
        positive(self.zombie.velocity_score_divisor, "zombie.velocity_score_divisor")?;
        positive(self.zombie.base_health, "zombie.base_health")?;
        positive(self.zombie.health_score_divisor, "zombie.health_score_divisor")?;
        if self.zombie.max_velocity < self.zombie.base_velocity {
            return Err(ConfigError::Invalid {
                field: "zombie.max_velocity",
                reason: "must not be below zombie.base_velocity",
            });
        }

        positive(self.spawn.base_interval, "spawn.base_interval")?;
        positive(self.spawn.score_divisor, "spawn.score_divisor")?;
        Ok(())
    }
}
