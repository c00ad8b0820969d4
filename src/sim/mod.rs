//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `update`
//! - Seeded RNG only
//! - Stable iteration order (spawn order, which is entity ID order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod player;
pub mod state;
pub mod tick;
pub mod wave;
pub mod weapon;

pub use collision::{RayHit, beam_hits, circles_overlap, project_onto_ray, within_blast};
pub use entity::{Entity, EntityKind};
pub use player::{Direction, Player};
pub use state::{Engine, GamePhase};
pub use tick::{TickInput, tick};
pub use wave::{EnemyRoll, WavePlan, roll_enemy, spawn_points};
pub use weapon::{ProjectileBlueprint, ProjectileType, Weapon, default_loadout};
