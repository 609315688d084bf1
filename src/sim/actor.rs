//! Shared capability for anything with a position, size, facing and health

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry;

/// Stable handle for an entity; never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Position, hit-circle, facing and health of one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Hit-circle radius; also the visual scale
    pub radius: f32,
    /// Facing angle (radians)
    pub rotation: f32,
    pub health: f32,
    pub max_health: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, max_health: f32) -> Self {
        Self {
            pos,
            radius,
            rotation: 0.0,
            health: max_health,
            max_health,
        }
    }
}

/// Implemented by the player and zombies; shared behavior comes for free
pub trait Actor {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }

    fn rotation(&self) -> f32 {
        self.body().rotation
    }

    fn health(&self) -> f32 {
        self.body().health
    }

    fn max_health(&self) -> f32 {
        self.body().max_health
    }

    fn is_dead(&self) -> bool {
        self.body().health <= 0.0
    }

    /// Fill fraction for the health bar, in [0, 1]
    fn health_fraction(&self) -> f32 {
        health_fraction(self.body())
    }

    /// Clamp the hit-circle into the field
    fn keep_on_screen(&mut self) {
        let body = self.body_mut();
        body.pos = geometry::keep_in_unit_square(body.pos, body.radius);
    }
}

pub fn health_fraction(body: &Body) -> f32 {
    if body.max_health <= 0.0 {
        return 0.0;
    }
    (body.health.max(0.0) / body.max_health).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(Body);

    impl Actor for Dummy {
        fn body(&self) -> &Body {
            &self.0
        }
        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }
    }

    #[test]
    fn test_health_fraction_clamps_negative() {
        let mut d = Dummy(Body::new(Vec2::splat(0.5), 0.1, 40.0));
        assert_eq!(d.health_fraction(), 1.0);
        d.body_mut().health = 10.0;
        assert!((d.health_fraction() - 0.25).abs() < 1e-6);
        d.body_mut().health = -5.0;
        assert_eq!(d.health_fraction(), 0.0);
        assert!(d.is_dead());
    }

    #[test]
    fn test_keep_on_screen() {
        let mut d = Dummy(Body::new(Vec2::new(-1.0, 2.0), 0.1, 1.0));
        d.keep_on_screen();
        assert!((d.pos() - Vec2::new(0.1, 0.9)).length() < 1e-6);
    }
}
