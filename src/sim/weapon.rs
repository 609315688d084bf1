//! Pistol and its hitscan shots
//!
//! A shot is resolved the moment it is fired: the nearest zombie on the firing
//! line (and in front of the player) becomes its target. Damage lands on the next
//! shot-handler update, once. The shot then lingers briefly so the beam can be drawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::EntityId;
use super::geometry;
use crate::tuning::PistolTuning;
use crate::{angle_between, direction, normalize_angle};

/// Anything a shot can hurt
pub trait Damageable {
    fn take_damage(&mut self, amount: f32);
}

/// What a shot needs to know about a potential target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
}

/// Lookup of live targets, by value
///
/// Shots hold ids, never references, so a culled target simply stops resolving.
pub trait DamageTargets {
    fn candidates(&self) -> Vec<TargetInfo>;
    fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable>;
}

/// Where the shooter stands and looks when pulling the trigger
#[derive(Debug, Clone, Copy)]
pub struct Aim {
    /// Muzzle (hand anchor)
    pub origin: Vec2,
    /// Shooter center
    pub shooter: Vec2,
    /// Shooter facing (radians)
    pub rotation: f32,
    /// Pointer position in normalized space
    pub pointer: Vec2,
}

/// Derived pistol state for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PistolState {
    Idle,
    Empty,
    Reloading,
}

/// Semi-automatic pistol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pistol {
    pub clip: u32,
    pub clip_size: u32,
    /// Seconds a full reload takes
    pub reload_time: f32,
    /// Seconds of reload remaining (0 = not reloading)
    pub reloading: f32,
    pub shot_damage: f32,
    pub show_time: f32,
    pub ray_length: f32,
}

impl Default for Pistol {
    fn default() -> Self {
        Self::new(&PistolTuning::default())
    }
}

impl Pistol {
    pub fn new(tuning: &PistolTuning) -> Self {
        Self {
            clip: tuning.clip_size,
            clip_size: tuning.clip_size,
            reload_time: tuning.reload_time,
            reloading: 0.0,
            shot_damage: tuning.shot_damage,
            show_time: tuning.show_time,
            ray_length: tuning.ray_length,
        }
    }

    pub fn state(&self) -> PistolState {
        if self.reloading > 0.0 {
            PistolState::Reloading
        } else if self.clip == 0 {
            PistolState::Empty
        } else {
            PistolState::Idle
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.clip > 0 && self.reloading <= 0.0
    }

    /// Per-tick reload step. Returns true when a reload started this tick.
    ///
    /// The clip is refilled when the reload starts; `reloading` only gates firing.
    pub fn update(&mut self, reload_pressed: bool, dt: f32) -> bool {
        let manual = reload_pressed && self.clip < self.clip_size;
        let automatic = self.clip == 0;
        let started = (manual || automatic) && self.reloading <= 0.0;
        if started {
            self.reloading = self.reload_time;
            self.clip = self.clip_size;
            log::debug!("Reload started (manual: {manual})");
        }
        self.reloading = (self.reloading - dt).max(0.0);
        started
    }

    /// Pull the trigger. No shot (and no ammo spent) when empty or reloading.
    pub fn shoot(&mut self, aim: &Aim, targets: &impl DamageTargets, now: f64) -> Option<Shot> {
        if !self.can_shoot() {
            return None;
        }
        self.clip -= 1;
        Some(Shot::fire(aim, targets, now, self))
    }

    /// Ammo bar fill: reload progress while reloading, clip fraction otherwise
    pub fn ammo_fraction(&self) -> f32 {
        if self.reloading > 0.0 {
            1.0 - self.reloading / self.reload_time
        } else {
            self.clip as f32 / self.clip_size as f32
        }
    }
}

/// One hitscan shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Muzzle position at fire time
    pub origin: Vec2,
    /// Beam end: the target's center on a hit, the far ray point on a miss
    pub aim_point: Vec2,
    pub spawn_time: f64,
    pub show_duration: f32,
    pub damage: f32,
    /// Resolved once at fire time
    pub target: Option<EntityId>,
    /// Damage step already ran
    pub resolved: bool,
}

impl Shot {
    fn fire(aim: &Aim, targets: &impl DamageTargets, now: f64, pistol: &Pistol) -> Self {
        let ray_point = aim.origin + direction(aim.rotation) * pistol.ray_length;
        let hit = find_target(aim, ray_point, &targets.candidates());

        log::trace!("Shot fired at {:?}, target {:?}", aim.rotation, hit.map(|t| t.id));

        Self {
            origin: aim.origin,
            aim_point: hit.map_or(ray_point, |t| t.pos),
            spawn_time: now,
            show_duration: pistol.show_time,
            damage: pistol.shot_damage,
            target: hit.map(|t| t.id),
            resolved: false,
        }
    }

    /// Still drawable at `now`
    pub fn is_valid(&self, now: f64) -> bool {
        now - self.spawn_time <= self.show_duration as f64
    }

    /// Apply damage on the first call only. Returns the id that took damage.
    pub fn update(&mut self, targets: &mut impl DamageTargets) -> Option<EntityId> {
        if self.resolved {
            return None;
        }
        self.resolved = true;

        let id = self.target?;
        let Some(target) = targets.target_mut(id) else {
            log::trace!("Shot target {id:?} is gone");
            return None;
        };
        target.take_damage(self.damage);
        Some(id)
    }

    /// Beam endpoints for drawing
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (self.origin, self.aim_point)
    }
}

/// Closest target to the shooter that lies on the firing line and is no more than
/// 90° away from the pointer direction
fn find_target(aim: &Aim, ray_point: Vec2, candidates: &[TargetInfo]) -> Option<TargetInfo> {
    let pointer_angle = angle_between(aim.shooter, aim.pointer);

    candidates
        .iter()
        .filter(|t| geometry::point_line_distance(t.pos, aim.origin, ray_point) <= t.radius)
        .filter(|t| {
            let target_angle = angle_between(aim.shooter, t.pos);
            normalize_angle(pointer_angle - target_angle).abs() <= std::f32::consts::FRAC_PI_2
        })
        .min_by(|a, b| {
            let da = geometry::distance(aim.shooter, a.pos);
            let db = geometry::distance(aim.shooter, b.pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied()
}
