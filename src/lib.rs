//! Shooter Sim - game-state engine for a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, weapons, collisions, waves)
//! - `settings`: Session configuration loaded from JSON
//! - `error`: Configuration errors
//!
//! Rendering, input capture and audio live outside this crate. A host feeds
//! held directions and cursor positions in through [`sim::tick`] and reads
//! positions, health and score back out of [`sim::Engine`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::EngineError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default board dimensions
    pub const BOARD_WIDTH: f32 = 2400.0;
    pub const BOARD_HEIGHT: f32 = 1600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_HIT_POINTS: u32 = 50;
    /// Velocity multiplier applied to the player every tick
    pub const PLAYER_FRICTION: f32 = 0.9;
    /// Below this speed the player's velocity snaps to zero
    pub const PLAYER_STOP_SPEED: f32 = 0.1;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 10.0;
    pub const ENEMY_CONTACT_DAMAGE: u32 = 10;
    /// Top speed per unit of enemy level (units/tick)
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 10.0;

    /// Velocity added to an entity pushed away by a hit (units/tick)
    pub const KNOCKBACK_IMPULSE: f32 = 5.0;

    /// Explosion reach beyond the target's own radius
    pub const BLAST_RADIUS: f32 = 50.0;
    pub const BLAST_ENEMY_DAMAGE: u32 = 40;
    pub const BLAST_PLAYER_DAMAGE: u32 = 10;

    /// Longest step a single update may advance the session clock (seconds)
    pub const MAX_TICK_DT: f32 = 120.0;

    /// Seconds between enemy waves
    pub const WAVE_INTERVAL: f64 = 5.0;
    /// One extra enemy per wave every this many seconds
    pub const WAVE_GROWTH_PERIOD: f64 = 30.0;
    /// Difficulty rises one tier every this many seconds
    pub const DIFFICULTY_PERIOD: f64 = 20.0;
    pub const MAX_DIFFICULTY: u32 = 5;
    /// Upper bound (inclusive) of enemy health per difficulty tier
    pub const HEALTH_PER_DIFFICULTY: u32 = 20;
    /// Enemy level is rolled from [BASE_LEVEL, BASE_LEVEL + difficulty * LEVEL_PER_DIFFICULTY]
    pub const BASE_LEVEL: f32 = 0.1;
    pub const LEVEL_PER_DIFFICULTY: f32 = 0.18;

    /// Each board edge is split into this many spawn intervals
    pub const SPAWN_DIVISIONS: u32 = 20;

    /// Score awarded per destroyed enemy
    pub const KILL_SCORE: u64 = 10;
}
