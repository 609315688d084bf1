//! Zombies and the horde spawner
//!
//! Zombies walk straight at the player and scale with the score at the moment they
//! spawn. The handler spawns on a countdown that shrinks as the score grows, and
//! turns every dead zombie into one point of score.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, EntityId};
use super::geometry;
use super::weapon::{DamageTargets, Damageable, TargetInfo};
use crate::tuning::{SpawnTuning, ZombieTuning};
use crate::{angle_between, direction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zombie {
    pub id: EntityId,
    pub body: Body,
    /// Normalized units per second, fixed at spawn
    pub velocity: f32,
    pub spawn_time: f64,
    /// Animation clock
    pub running_time: f32,
    /// Contact damage per hit
    pub damage: f32,
    /// Seconds until this zombie may hit the player again
    pub hit_cool_down: f32,
    /// Cool-down applied after each contact hit
    pub hit_cool_down_time: f32,
    melee_range: f32,
}

impl Actor for Zombie {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Damageable for Zombie {
    fn take_damage(&mut self, amount: f32) {
        self.body.health -= amount;
    }
}

impl Zombie {
    /// A zombie scaled for `score`, standing at the origin
    pub fn new(id: EntityId, tuning: &ZombieTuning, score: u64, now: f64) -> Self {
        Self {
            id,
            body: Body::new(Vec2::ZERO, tuning.radius, tuning.max_health_at(score)),
            velocity: tuning.velocity_at(score),
            spawn_time: now,
            running_time: 0.0,
            damage: tuning.damage,
            hit_cool_down: 0.0,
            hit_cool_down_time: tuning.hit_cool_down,
            melee_range: tuning.melee_range,
        }
    }

    /// A zombie scaled for `score`, placed just outside a random edge
    pub fn spawn(
        id: EntityId,
        tuning: &ZombieTuning,
        score: u64,
        now: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let mut zombie = Self::new(id, tuning, score, now);
        zombie.body.pos = spawn_position(tuning.radius, rng);
        zombie
    }

    /// Face the target and walk toward it until within melee range
    pub fn advance(&mut self, target: Vec2, target_radius: f32, dt: f32) {
        self.body.rotation = angle_between(self.body.pos, target);
        let distance = geometry::distance(self.body.pos, target);
        if distance >= (self.body.radius + target_radius) * self.melee_range {
            self.body.pos += direction(self.body.rotation) * self.velocity * dt;
        }
    }

    pub fn update(&mut self, target: Vec2, target_radius: f32, dt: f32) {
        self.advance(target, target_radius, dt);
        self.hit_cool_down = (self.hit_cool_down - dt).max(0.0);
        self.running_time += dt;
    }

    pub fn can_hit(&self) -> bool {
        self.hit_cool_down <= 0.0
    }

    /// Start the cool-down after landing a hit
    pub fn register_hit(&mut self) {
        self.hit_cool_down = self.hit_cool_down_time;
    }

    /// Walk-cycle frame, 7 frames per second
    pub fn anim_frame(&self, num_frames: usize) -> usize {
        if num_frames == 0 {
            return 0;
        }
        ((7.0 * self.running_time) % num_frames as f32) as usize
    }
}

/// A point just outside the unit square: uniform along one of the four edges
pub fn spawn_position(radius: f32, rng: &mut impl Rng) -> Vec2 {
    let along = rng.random::<f32>();
    let edge = if rng.random_bool(0.5) {
        -radius
    } else {
        1.0 + radius
    };
    if rng.random_bool(0.5) {
        Vec2::new(edge, along)
    } else {
        Vec2::new(along, edge)
    }
}

/// What one handler update did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HordeTick {
    pub spawned: Vec<EntityId>,
    pub killed: Vec<EntityId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZombieHandler {
    pub zombies: Vec<Zombie>,
    /// Spawn countdown; negative values are owed spawns
    pub time_until_spawn: f32,
    pub tuning: ZombieTuning,
    pub spawn: SpawnTuning,
    next_id: u32,
}

impl ZombieHandler {
    pub fn new(tuning: ZombieTuning, spawn: SpawnTuning) -> Self {
        Self {
            zombies: Vec::new(),
            time_until_spawn: 0.0,
            tuning,
            spawn,
            next_id: 1,
        }
    }

    /// Allocate a new zombie id
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn, cull the dead, then move everyone toward the player
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        score: u64,
        player: &impl Actor,
        rng: &mut impl Rng,
    ) -> HordeTick {
        let spawned = self.spawn_due(dt, now, score, rng);
        let killed = self.validate();
        let (target, target_radius) = (player.pos(), player.radius());
        for zombie in &mut self.zombies {
            zombie.update(target, target_radius, dt);
        }
        HordeTick { spawned, killed }
    }

    /// Pay off whole seconds of spawn debt. A long frame spawns a burst, each
    /// spawn adding one interval back to the countdown.
    fn spawn_due(&mut self, dt: f32, now: f64, score: u64, rng: &mut impl Rng) -> Vec<EntityId> {
        let spawn_count = if self.time_until_spawn < 0.0 {
            (-self.time_until_spawn).floor() as u32
        } else {
            0
        };
        self.time_until_spawn -= dt;
        let interval = self.spawn.interval_at(score);

        let mut spawned = Vec::with_capacity(spawn_count as usize);
        for _ in 0..spawn_count {
            let id = self.next_id();
            let zombie = Zombie::spawn(id, &self.tuning, score, now, rng);
            log::debug!(
                "Spawned zombie {} at ({:.3}, {:.3}), hp {:.1}, speed {:.3}",
                id.0,
                zombie.body.pos.x,
                zombie.body.pos.y,
                zombie.body.max_health,
                zombie.velocity
            );
            self.zombies.push(zombie);
            self.time_until_spawn += interval;
            spawned.push(id);
        }
        spawned
    }

    /// Forget every dead zombie, returning their ids
    fn validate(&mut self) -> Vec<EntityId> {
        let mut killed = Vec::new();
        self.zombies.retain(|zombie| {
            if zombie.is_dead() {
                killed.push(zombie.id);
                false
            } else {
                true
            }
        });
        for id in &killed {
            log::debug!("Zombie {} killed", id.0);
        }
        killed
    }

    pub fn get(&self, id: EntityId) -> Option<&Zombie> {
        self.zombies.iter().find(|z| z.id == id)
    }

    pub fn nearest_to(&self, pos: Vec2) -> Option<&Zombie> {
        self.zombies.iter().min_by(|a, b| {
            let da = geometry::distance(pos, a.body.pos);
            let db = geometry::distance(pos, b.body.pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    pub fn len(&self) -> usize {
        self.zombies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zombies.is_empty()
    }
}

impl DamageTargets for ZombieHandler {
    fn candidates(&self) -> Vec<TargetInfo> {
        self.zombies
            .iter()
            .map(|z| TargetInfo {
                id: z.id,
                pos: z.body.pos,
                radius: z.body.radius,
            })
            .collect()
    }

    fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
        self.zombies
            .iter_mut()
            .find(|z| z.id == id)
            .map(|z| z as &mut dyn Damageable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Target(Body);

    impl Actor for Target {
        fn body(&self) -> &Body {
            &self.0
        }
        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }
    }

    fn player_at_center() -> Target {
        Target(Body::new(Vec2::splat(0.5), 0.02, 100.0))
    }

    fn handler() -> ZombieHandler {
        ZombieHandler::new(ZombieTuning::default(), SpawnTuning::default())
    }

    #[test]
    fn test_difficulty_at_spawn() {
        let tuning = ZombieTuning::default();
        let z0 = Zombie::new(EntityId(1), &tuning, 0, 0.0);
        assert!((z0.body.max_health - 24.0).abs() < 1e-4);
        assert_eq!(z0.body.health, z0.body.max_health);
        assert!((z0.velocity - 0.1).abs() < 1e-6);

        let z50 = Zombie::new(EntityId(2), &tuning, 50, 0.0);
        assert!((z50.velocity - 0.15).abs() < 1e-6);
        assert!(z50.body.max_health > z0.body.max_health);

        let z_late = Zombie::new(EntityId(3), &tuning, 10_000_000, 0.0);
        assert!((z_late.velocity - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_positions_on_boundary() {
        let mut rng = Pcg32::seed_from_u64(7);
        let r = 0.015;
        // left, right, top, bottom
        let mut edge_hits = [0u32; 4];
        for _ in 0..200 {
            let p = spawn_position(r, &mut rng);
            let on_x_edge = (p.x == -r || p.x == 1.0 + r) && (0.0..=1.0).contains(&p.y);
            let on_y_edge = (p.y == -r || p.y == 1.0 + r) && (0.0..=1.0).contains(&p.x);
            assert!(on_x_edge || on_y_edge, "not on an edge: {p:?}");
            if p.x == -r {
                edge_hits[0] += 1;
            } else if p.x == 1.0 + r {
                edge_hits[1] += 1;
            } else if p.y == -r {
                edge_hits[2] += 1;
            } else {
                edge_hits[3] += 1;
            }
        }
        assert!(
            edge_hits.iter().all(|&hits| hits > 0),
            "some edge never used: {edge_hits:?}"
        );
    }

    #[test]
    fn test_first_spawn_waits_for_a_full_second_of_debt() {
        let mut zombies = handler();
        let mut rng = Pcg32::seed_from_u64(1);
        let player = player_at_center();

        let mut now = 0.0;
        for _ in 0..4 {
            now += 0.25;
            let tick = zombies.update(0.25, now, 0, &player, &mut rng);
            assert!(tick.spawned.is_empty());
        }
        // One full second owed
        assert_eq!(zombies.time_until_spawn, -1.0);
        now += 0.25;
        let tick = zombies.update(0.25, now, 0, &player, &mut rng);
        assert_eq!(tick.spawned.len(), 1);
        assert!((zombies.time_until_spawn - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_long_frame_spawns_a_burst() {
        let mut zombies = handler();
        let mut rng = Pcg32::seed_from_u64(1);
        let player = player_at_center();

        zombies.update(5.0, 5.0, 0, &player, &mut rng);
        assert!(zombies.is_empty());
        let tick = zombies.update(0.0, 5.0, 0, &player, &mut rng);
        assert_eq!(tick.spawned.len(), 5);
        assert_eq!(zombies.len(), 5);
        assert!((zombies.time_until_spawn - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_interval_shrinks_with_score() {
        let mut zombies = handler();
        let mut rng = Pcg32::seed_from_u64(1);
        let player = player_at_center();

        zombies.time_until_spawn = -1.0;
        zombies.update(0.0, 0.0, 50, &player, &mut rng);
        assert!((zombies.time_until_spawn - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_dead_zombies_are_culled() {
        let mut zombies = handler();
        let mut rng = Pcg32::seed_from_u64(1);
        let player = player_at_center();
        for _ in 0..3 {
            let id = zombies.next_id();
            zombies
                .zombies
                .push(Zombie::spawn(id, &ZombieTuning::default(), 0, 0.0, &mut rng));
        }
        zombies.zombies[0].take_damage(30.0);
        zombies.zombies[2].take_damage(24.0);

        let tick = zombies.update(0.016, 0.0, 0, &player, &mut rng);
        assert_eq!(tick.killed, vec![EntityId(1), EntityId(3)]);
        assert_eq!(zombies.len(), 1);
        assert!(zombies.get(EntityId(2)).is_some());
    }

    #[test]
    fn test_pursuit_stops_in_melee_range() {
        let tuning = ZombieTuning::default();
        let mut zombie = Zombie::new(EntityId(1), &tuning, 0, 0.0);
        zombie.body.pos = Vec2::new(0.1, 0.5);
        zombie.advance(Vec2::new(0.5, 0.5), 0.02, 1.0);
        assert!((zombie.body.pos - Vec2::new(0.2, 0.5)).length() < 1e-5);
        assert!(zombie.body.rotation.abs() < 1e-6);

        // 0.75 * (0.015 + 0.02) = 0.02625
        zombie.body.pos = Vec2::new(0.48, 0.5);
        zombie.advance(Vec2::new(0.5, 0.5), 0.02, 1.0);
        assert_eq!(zombie.body.pos, Vec2::new(0.48, 0.5));
    }

    #[test]
    fn test_cool_down_and_clock() {
        let mut zombie = Zombie::new(EntityId(1), &ZombieTuning::default(), 0, 0.0);
        zombie.body.pos = Vec2::new(0.5, 0.5);
        zombie.register_hit();
        assert!(!zombie.can_hit());
        zombie.update(Vec2::new(0.5, 0.5), 0.02, 0.15);
        assert!(!zombie.can_hit());
        zombie.update(Vec2::new(0.5, 0.5), 0.02, 0.15);
        assert!(zombie.can_hit());
        assert_eq!(zombie.hit_cool_down, 0.0);
        assert!((zombie.running_time - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_anim_frame() {
        let mut zombie = Zombie::new(EntityId(1), &ZombieTuning::default(), 0, 0.0);
        zombie.running_time = 0.5;
        assert_eq!(zombie.anim_frame(8), 3);
        zombie.running_time = 1.2;
        assert_eq!(zombie.anim_frame(8), 0);
        assert_eq!(zombie.anim_frame(0), 0);
    }

    #[test]
    fn test_damage_targets_lookup() {
        let mut zombies = handler();
        let id = zombies.next_id();
        zombies
            .zombies
            .push(Zombie::new(id, &ZombieTuning::default(), 0, 0.0));
        assert_eq!(zombies.candidates().len(), 1);
        assert!(zombies.target_mut(id).is_some());
        assert!(zombies.target_mut(EntityId(99)).is_none());
    }

    proptest! {
        #[test]
        fn prop_difficulty_is_monotonic(s1 in 0u64..100_000, delta in 1u64..100_000) {
            let tuning = ZombieTuning::default();
            let s2 = s1 + delta;
            let a = Zombie::new(EntityId(1), &tuning, s1, 0.0);
            let b = Zombie::new(EntityId(2), &tuning, s2, 0.0);
            prop_assert!(b.velocity >= a.velocity);
            prop_assert!(b.velocity <= tuning.max_velocity);
            prop_assert!(b.body.max_health > a.body.max_health);
        }

        #[test]
        fn prop_cull_count_matches_dead(hp in proptest::collection::vec(-50.0f32..50.0, 0..20)) {
            let mut zombies = handler();
            let mut rng = Pcg32::seed_from_u64(3);
            for h in &hp {
                let id = zombies.next_id();
                let mut z = Zombie::new(id, &ZombieTuning::default(), 0, 0.0);
                z.body.health = *h;
                zombies.zombies.push(z);
            }
            let dead = hp.iter().filter(|h| **h <= 0.0).count();
            let tick = zombies.update(0.0, 0.0, 0, &player_at_center(), &mut rng);
            prop_assert_eq!(tick.killed.len(), dead);
            prop_assert_eq!(zombies.len(), hp.len() - dead);
        }
    }
}
