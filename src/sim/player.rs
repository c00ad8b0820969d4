//! The player's ship
//!
//! Wraps the shared [`Entity`] record with the weapon inventory and the
//! reload clock. Times passed in are the engine's session clock in seconds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::weapon::Weapon;

/// A held movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Unit impulse for this direction (screen space, +y is down)
    pub fn impulse(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// The player's ship: body, weapon inventory and reload clock
#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    /// Never empty: seeded with the starting weapon
    weapons: Vec<Weapon>,
    current_weapon: usize,
    /// Session time of the last shot, `None` until the first one
    last_fire: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, hit_points: u32, weapon: Weapon) -> Self {
        Self {
            entity: Entity::player(pos, radius, hit_points),
            weapons: vec![weapon],
            current_weapon: 0,
            last_fire: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.entity.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.entity.vel
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.entity.radius
    }

    #[inline]
    pub fn hit_points(&self) -> u32 {
        self.entity.hit_points
    }

    pub fn is_dead(&self) -> bool {
        self.entity.is_dead()
    }

    /// Add one unit impulse. Called once per held direction, so diagonals
    /// are not renormalized.
    pub fn accelerate(&mut self, direction: Direction) {
        self.entity.vel += direction.impulse();
    }

    /// Integrate with friction
    pub fn advance(&mut self) {
        self.entity.advance();
    }

    pub fn zero_x_velocity(&mut self) {
        self.entity.vel.x = 0.0;
    }

    pub fn zero_y_velocity(&mut self) {
        self.entity.vel.y = 0.0;
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn current_weapon_index(&self) -> usize {
        self.current_weapon
    }

    pub fn current_weapon(&self) -> &Weapon {
        &self.weapons[self.current_weapon]
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    pub fn change_next_weapon(&mut self) {
        self.current_weapon = (self.current_weapon + 1) % self.weapons.len();
    }

    pub fn change_prev_weapon(&mut self) {
        self.current_weapon = (self.current_weapon + self.weapons.len() - 1) % self.weapons.len();
    }

    pub fn change_weapon(&mut self, next: bool) {
        if next {
            self.change_next_weapon();
        } else {
            self.change_prev_weapon();
        }
    }

    /// Start the current weapon's cooldown at `now`
    pub fn reload_weapon(&mut self, now: f64) {
        self.last_fire = Some(now);
    }

    /// Fraction of the current weapon's cooldown elapsed since the last
    /// shot, in [0, 1]. 1.0 means ready.
    pub fn weapon_reload_status(&self, now: f64) -> f32 {
        let cooldown = f64::from(self.current_weapon().fire_cooldown);
        match self.last_fire {
            _ if cooldown <= 0.0 => 1.0,
            None => 1.0,
            Some(last) => ((now - last) / cooldown).clamp(0.0, 1.0) as f32,
        }
    }

    /// Build a bullet from the current weapon heading at `cursor`
    ///
    /// Does not check reload status. Returns `None` when the cursor sits on
    /// the player (no direction to fire in). The caller assigns the id.
    pub fn fire_bullet(&self, cursor: Vec2) -> Option<Entity> {
        let dir = (cursor - self.pos()).try_normalize()?;
        let weapon = self.current_weapon();
        Some(Entity::bullet(
            0,
            self.pos(),
            dir * weapon.blueprint.speed,
            &weapon.blueprint,
            weapon.max_range,
        ))
    }
}
