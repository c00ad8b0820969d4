//! Engine state and read-only views
//!
//! The engine owns every entity in the session. Hosts read it between ticks
//! through the accessors here and mutate it only through the entry points in
//! [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::player::Player;
use super::wave::{WavePlan, spawn_points};
use super::weapon::{ProjectileType, Weapon};
use crate::consts::*;
use crate::error::EngineError;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player died. Terminal: no further ticks are processed.
    GameOver,
}

/// The whole simulation of one session
#[derive(Debug, Clone)]
pub struct Engine {
    pub(super) board: Vec2,
    pub(super) player: Player,
    /// Live bullets, in spawn order
    pub(super) bullets: Vec<Entity>,
    /// Live enemies, in spawn order
    pub(super) enemies: Vec<Entity>,
    /// Perimeter points fixed at construction
    pub(super) spawns: Vec<Vec2>,
    /// Explosion centres waiting to be drawn once
    pub(super) explosions: Vec<Vec2>,
    /// Session clock (seconds). f64 so a 1/60 s step still registers after days.
    pub(super) elapsed: f64,
    /// Session time of the last wave
    pub(super) last_wave: f64,
    pub(super) score: u64,
    pub(super) phase: GamePhase,
    pub(super) rng: Pcg32,
    seed: u64,
    next_id: u32,
}

impl Engine {
    /// Build a session from validated settings
    pub fn new(settings: &Settings) -> Result<Self, EngineError> {
        settings.validate()?;

        let board = Vec2::new(settings.board_width, settings.board_height);
        let start = settings.player_start.unwrap_or(board / 2.0);

        let mut loadout = settings.weapons.iter().cloned();
        let first = loadout.next().ok_or_else(|| {
            EngineError::InvalidConfiguration("weapon loadout is empty".to_string())
        })?;
        let mut player = Player::new(start, PLAYER_RADIUS, PLAYER_HIT_POINTS, first);
        for weapon in loadout {
            player.add_weapon(weapon);
        }

        let spawns = spawn_points(board);
        log::info!(
            "Session started: board {}x{}, {} spawn points, seed {}",
            board.x,
            board.y,
            spawns.len(),
            settings.seed
        );

        Ok(Self {
            board,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            spawns,
            explosions: Vec::new(),
            elapsed: 0.0,
            last_wave: 0.0,
            score: 0,
            phase: GamePhase::Playing,
            rng: Pcg32::seed_from_u64(settings.seed),
            seed: settings.seed,
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub(super) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn board_dimensions(&self) -> Vec2 {
        self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.pos()
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Entity] {
        &self.bullets
    }

    pub fn spawn_points(&self) -> &[Vec2] {
        &self.spawns
    }

    /// Explosions since the last [`Engine::clear_explosions`]
    pub fn explosions(&self) -> &[Vec2] {
        &self.explosions
    }

    /// Called by the host once it has drawn the pending explosions
    pub fn clear_explosions(&mut self) {
        self.explosions.clear();
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn current_weapon(&self) -> &Weapon {
        self.player.current_weapon()
    }

    pub fn current_projectile_type(&self) -> ProjectileType {
        self.player.current_weapon().projectile_type
    }

    /// Reload progress of the current weapon in [0, 1]
    pub fn weapon_reload_status(&self) -> f32 {
        self.player.weapon_reload_status(self.elapsed)
    }

    /// Whether the current weapon may fire now
    pub fn reloaded(&self) -> bool {
        self.weapon_reload_status() >= 1.0
    }

    /// Insert an enemy directly (scripted encounters, tests)
    pub fn add_enemy(
        &mut self,
        pos: Vec2,
        radius: f32,
        hit_points: u32,
        damage: u32,
        level: f32,
    ) -> u32 {
        let id = self.next_entity_id();
        let difficulty = WavePlan::at(self.elapsed).difficulty;
        self.enemies.push(Entity::enemy(id, pos, radius, hit_points, damage, level, difficulty));
        id
    }

    /// Insert a bullet, assigning it a fresh id
    pub fn add_bullet(&mut self, mut bullet: Entity) -> u32 {
        let id = self.next_entity_id();
        bullet.id = id;
        self.bullets.push(bullet);
        id
    }
}
