//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, one dt per tick shared by every entity
//! - Seeded RNG only
//! - Session state passed explicitly, never global
//! - No rendering or platform dependencies

pub mod actor;
pub mod geometry;
pub mod player;
pub mod shots;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod weapon;
pub mod zombie;

pub use actor::{Actor, Body, EntityId};
pub use player::{Player, ShotOutcome};
pub use shots::ShotHandler;
pub use snapshot::Snapshot;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use weapon::{Damageable, DamageTargets, Pistol, PistolState, Shot};
pub use zombie::{Zombie, ZombieHandler};
