//! Owner of every live shot

use serde::{Deserialize, Serialize};

use super::actor::EntityId;
use super::weapon::{DamageTargets, Shot};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotHandler {
    pub shots: Vec<Shot>,
}

impl ShotHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shot(&mut self, shot: Shot) {
        self.shots.push(shot);
    }

    /// Drop expired shots, then let each remaining shot deal its damage.
    /// Returns the ids that were hit this tick.
    pub fn update(&mut self, now: f64, targets: &mut impl DamageTargets) -> Vec<EntityId> {
        self.validate_shots(now);
        self.shots
            .iter_mut()
            .filter_map(|shot| shot.update(&mut *targets))
            .collect()
    }

    fn validate_shots(&mut self, now: f64) {
        self.shots.retain(|shot| shot.is_valid(now));
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}
