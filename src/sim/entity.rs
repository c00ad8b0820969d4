//! Shared entity record
//!
//! Player, enemies and bullets all carry the same physical state. What
//! differs (friction, homing, contact damage, expiry) is selected by the
//! [`EntityKind`] tag rather than by separate types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use super::weapon::ProjectileBlueprint;
use crate::consts::*;

/// Capability tag carrying the per-kind data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Friction-damped movement, takes contact damage
    Player,
    /// Homes on the player and hurts it on contact
    Enemy {
        /// Contact damage dealt to the player per tick of overlap
        damage: u32,
        /// Scales acceleration and top speed
        level: f32,
        /// Difficulty tier at spawn time
        difficulty: u32,
    },
    /// Travels in a straight line until it hits, leaves the board or runs out of range
    Bullet {
        damage: u32,
        explosive: bool,
        /// Muzzle point, for range expiry
        origin: Vec2,
        max_range: f32,
    },
}

/// Physical state shared by every body in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    /// Collision bound
    pub radius: f32,
    /// Zero means dead
    pub hit_points: u32,
}

impl Entity {
    pub fn player(pos: Vec2, radius: f32, hit_points: u32) -> Self {
        Self {
            id: 0,
            kind: EntityKind::Player,
            pos,
            vel: Vec2::ZERO,
            radius,
            hit_points,
        }
    }

    pub fn enemy(
        id: u32,
        pos: Vec2,
        radius: f32,
        hit_points: u32,
        damage: u32,
        level: f32,
        difficulty: u32,
    ) -> Self {
        Self {
            id,
            kind: EntityKind::Enemy {
                damage,
                level,
                difficulty,
            },
            pos,
            vel: Vec2::ZERO,
            radius,
            hit_points,
        }
    }

    /// A live bullet leaving `origin` with velocity `vel`
    pub fn bullet(
        id: u32,
        origin: Vec2,
        vel: Vec2,
        blueprint: &ProjectileBlueprint,
        max_range: f32,
    ) -> Self {
        Self {
            id,
            kind: EntityKind::Bullet {
                damage: blueprint.damage,
                explosive: blueprint.explosive,
                origin,
                max_range,
            },
            pos: origin,
            vel,
            radius: blueprint.radius,
            hit_points: 1,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hit_points == 0
    }

    pub fn kill(&mut self) {
        self.hit_points = 0;
    }

    pub fn is_explosive(&self) -> bool {
        matches!(self.kind, EntityKind::Bullet { explosive: true, .. })
    }

    /// Damage this entity deals when it touches something
    pub fn contact_damage(&self) -> u32 {
        match self.kind {
            EntityKind::Player => 0,
            EntityKind::Enemy { damage, .. } | EntityKind::Bullet { damage, .. } => damage,
        }
    }

    /// Integrate one tick of movement
    pub fn advance(&mut self) {
        self.pos += self.vel;
        if self.kind == EntityKind::Player {
            self.vel *= PLAYER_FRICTION;
            if self.vel.length() < PLAYER_STOP_SPEED {
                self.vel = Vec2::ZERO;
            }
        }
    }

    /// Take damage (clamped at zero hit points) and get pushed away from `source`
    pub fn hit(&mut self, damage: u32, source: Vec2) {
        self.hit_points = self.hit_points.saturating_sub(damage);
        let away = (self.pos - source).normalize_or_zero();
        self.vel += away * KNOCKBACK_IMPULSE;
    }

    /// Whether the two collision circles touch
    pub fn overlaps(&self, other: &Entity) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    /// Resolve contact with `other`, from this entity's side
    ///
    /// - enemy struck by a bullet: enemy takes the bullet's damage, the bullet is spent
    /// - player touched by an enemy: player takes the enemy's contact damage
    ///
    /// Any other pairing does nothing.
    pub fn collide(&mut self, other: &mut Entity) {
        match (self.kind, other.kind) {
            (EntityKind::Enemy { .. }, EntityKind::Bullet { damage, .. }) => {
                self.hit(damage, other.pos);
                other.kill();
            }
            (EntityKind::Player, EntityKind::Enemy { damage, .. }) => {
                self.hit(damage, other.pos);
            }
            _ => {}
        }
    }

    /// Steer an enemy toward `target`, capped at its level's top speed
    pub fn seek(&mut self, target: Vec2) {
        if let EntityKind::Enemy { level, .. } = self.kind {
            let dir = (target - self.pos).normalize_or_zero();
            self.vel += dir * level;
            self.vel = self.vel.clamp_length_max(level * ENEMY_SPEED_PER_LEVEL);
        }
    }

    /// A bullet that left the board or outran its weapon's range
    pub fn has_expired(&self, board: Vec2) -> bool {
        match self.kind {
            EntityKind::Bullet {
                origin, max_range, ..
            } => {
                let off_board = self.pos.x < 0.0
                    || self.pos.y < 0.0
                    || self.pos.x > board.x
                    || self.pos.y > board.y;
                off_board || self.pos.distance(origin) > max_range
            }
            _ => false,
        }
    }
}
