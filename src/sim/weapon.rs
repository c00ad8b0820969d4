//! Weapon descriptors
//!
//! Weapons are immutable values owned by the player's inventory. A weapon
//! either spawns a travelling bullet or resolves an instant beam.

use serde::{Deserialize, Serialize};

/// How a weapon delivers damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileType {
    /// Spawns a moving bullet entity
    Bullet,
    /// Instant, infinite-range ray (no entity)
    Beam,
}

/// Physical and damage template for whatever a weapon fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileBlueprint {
    pub radius: f32,
    pub damage: u32,
    /// Units per tick
    pub speed: f32,
    pub explosive: bool,
}

impl ProjectileBlueprint {
    pub fn new(radius: f32, damage: u32, speed: f32, explosive: bool) -> Self {
        Self {
            radius,
            damage,
            speed,
            explosive,
        }
    }
}

/// A named weapon: delivery kind, cooldown, range and projectile template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub projectile_type: ProjectileType,
    /// Seconds between shots (0 = fire every tick)
    pub fire_cooldown: f32,
    /// Distance a bullet may travel from its muzzle point before expiring
    pub max_range: f32,
    pub blueprint: ProjectileBlueprint,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        projectile_type: ProjectileType,
        fire_cooldown: f32,
        max_range: f32,
        blueprint: ProjectileBlueprint,
    ) -> Self {
        Self {
            name: name.into(),
            projectile_type,
            fire_cooldown,
            max_range,
            blueprint,
        }
    }

    /// Check the descriptor is usable, naming the first bad field
    pub fn validate(&self) -> Result<(), String> {
        if !self.fire_cooldown.is_finite() || self.fire_cooldown < 0.0 {
            return Err(format!("weapon {:?} has an invalid cooldown", self.name));
        }
        if !self.max_range.is_finite() || self.max_range <= 0.0 {
            return Err(format!("weapon {:?} has an invalid range", self.name));
        }
        let bp = &self.blueprint;
        if !bp.radius.is_finite() || bp.radius < 0.0 {
            return Err(format!("weapon {:?} has an invalid projectile radius", self.name));
        }
        if !bp.speed.is_finite() || bp.speed < 0.0 {
            return Err(format!("weapon {:?} has an invalid projectile speed", self.name));
        }
        Ok(())
    }
}

/// The stock loadout, in inventory order
pub fn default_loadout() -> Vec<Weapon> {
    vec![
        Weapon::new(
            "Pistol",
            ProjectileType::Bullet,
            0.3,
            1000.0,
            ProjectileBlueprint::new(10.0, 1, 10.0, false),
        ),
        Weapon::new(
            "Sniper",
            ProjectileType::Bullet,
            0.0,
            1000.0,
            ProjectileBlueprint::new(10.0, 100, 30.0, false),
        ),
        Weapon::new(
            "Rifle",
            ProjectileType::Bullet,
            0.2,
            400.0,
            ProjectileBlueprint::new(15.0, 30, 25.0, false),
        ),
        Weapon::new(
            "Laser",
            ProjectileType::Beam,
            0.0,
            200.0,
            ProjectileBlueprint::new(5.0, 10, 0.0, false),
        ),
        // Direct hits do nothing, the blast does the work
        Weapon::new(
            "Rocket",
            ProjectileType::Bullet,
            0.01,
            1500.0,
            ProjectileBlueprint::new(15.0, 0, 20.0, true),
        ),
    ]
}
