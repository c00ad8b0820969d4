//! Shooter Sim headless driver
//!
//! Runs a session with a simple autopilot standing in for the player and
//! logs how it went. Usage: `shooter-sim [settings.json]`.

use std::collections::BTreeSet;

use glam::Vec2;

use shooter_sim::consts::SIM_DT;
use shooter_sim::sim::{Direction, Engine, TickInput, tick};
use shooter_sim::{EngineError, Settings};

/// Ten simulated minutes
const MAX_TICKS: u32 = 60 * 60 * 10;
/// Ticks between autopilot weapon switches
const SWITCH_EVERY: u32 = 600;
/// Enemies closer than this make the autopilot back off
const PANIC_DISTANCE: f32 = 150.0;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), EngineError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut engine = Engine::new(&settings)?;

    let mut ticks = 0;
    let mut shots = 0;
    while !engine.is_game_over() && ticks < MAX_TICKS {
        let input = autopilot(&engine, ticks);
        if tick(&mut engine, &input, SIM_DT).is_some() {
            shots += 1;
        }
        // Nothing to draw here, so drop them straight away
        engine.clear_explosions();
        ticks += 1;
    }

    log::info!(
        "Finished after {:.1}s ({} ticks): score {}, {} shots, {} enemies alive, player hp {}",
        engine.elapsed(),
        ticks,
        engine.score(),
        shots,
        engine.enemies().len(),
        engine.player().hit_points()
    );
    Ok(())
}

/// Circle the board centre, back away from close enemies and shoot at the nearest one
fn autopilot(engine: &Engine, ticks: u32) -> TickInput {
    let pos = engine.player_position();
    let nearest = engine
        .enemies()
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .partial_cmp(&b.pos.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos);

    let heading = match nearest {
        Some(enemy) if enemy.distance(pos) < PANIC_DISTANCE => pos - enemy,
        _ => {
            let orbit = (ticks as f32 * SIM_DT * 0.5).sin_cos();
            let target = engine.board_dimensions() / 2.0 + Vec2::new(orbit.1, orbit.0) * 200.0;
            target - pos
        }
    };

    TickInput {
        moves: directions_toward(heading),
        shoot: nearest.filter(|_| engine.reloaded()),
        switch_weapon: (ticks > 0 && ticks.is_multiple_of(SWITCH_EVERY)).then_some(true),
    }
}

fn directions_toward(heading: Vec2) -> BTreeSet<Direction> {
    let mut moves = BTreeSet::new();
    if heading.x < -1.0 {
        moves.insert(Direction::Left);
    } else if heading.x > 1.0 {
        moves.insert(Direction::Right);
    }
    if heading.y < -1.0 {
        moves.insert(Direction::Up);
    } else if heading.y > 1.0 {
        moves.insert(Direction::Down);
    }
    moves
}
