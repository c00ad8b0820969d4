//! Enemy wave planning
//!
//! Waves arrive on a fixed timer. How many enemies a wave holds and how
//! tough they are both grow with session time, difficulty capping out at
//! [`MAX_DIFFICULTY`].

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Perimeter points enemies may appear at
///
/// Each edge is cut into [`SPAWN_DIVISIONS`] equal steps. Top and bottom
/// edges include the corners; the side edges skip them so no point repeats.
pub fn spawn_points(board: Vec2) -> Vec<Vec2> {
    let divisions = SPAWN_DIVISIONS;
    let x_unit = board.x / divisions as f32;
    let y_unit = board.y / divisions as f32;

    let mut points = Vec::with_capacity(4 * divisions as usize);
    for i in 0..=divisions {
        let x = i as f32 * x_unit;
        points.push(Vec2::new(x, 0.0));
        points.push(Vec2::new(x, board.y));
    }
    for i in 1..divisions {
        let y = i as f32 * y_unit;
        points.push(Vec2::new(0.0, y));
        points.push(Vec2::new(board.x, y));
    }
    points
}

/// Size and toughness of the wave due at a given session time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePlan {
    pub count: u32,
    /// 1..=MAX_DIFFICULTY
    pub difficulty: u32,
}

impl WavePlan {
    pub fn at(elapsed: f64) -> Self {
        let elapsed = elapsed.max(0.0);
        let count = 1 + (elapsed / WAVE_GROWTH_PERIOD).floor() as u32;
        let difficulty = (1 + (elapsed / DIFFICULTY_PERIOD).floor() as u32).min(MAX_DIFFICULTY);
        Self { count, difficulty }
    }

    /// Highest health an enemy of this wave can roll (inclusive)
    pub fn max_health(&self) -> u32 {
        self.difficulty * HEALTH_PER_DIFFICULTY
    }

    /// Highest level an enemy of this wave can roll
    pub fn max_level(&self) -> f32 {
        BASE_LEVEL + self.difficulty as f32 * LEVEL_PER_DIFFICULTY
    }
}

/// Randomized stats for one spawned enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyRoll {
    pub spawn: Vec2,
    pub health: u32,
    pub level: f32,
}

/// Pick a spawn point and roll health and level for one enemy of `plan`
///
/// Health is uniform over `0..=max_health`. `spawns` must not be empty.
pub fn roll_enemy<R: Rng>(rng: &mut R, plan: &WavePlan, spawns: &[Vec2]) -> EnemyRoll {
    let spawn = spawns[rng.random_range(0..spawns.len())];
    let health = rng.random_range(0..=plan.max_health());
    let level = BASE_LEVEL + plan.difficulty as f32 * rng.random::<f32>() * LEVEL_PER_DIFFICULTY;
    EnemyRoll {
        spawn,
        health,
        level,
    }
}
