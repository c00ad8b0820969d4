//! Per-frame simulation
//!
//! One [`Engine::update`] per rendered frame. Steps run in a fixed order:
//! input, boundary clamp, movement, collisions, spawning, death sweep.
//! Shots and weapon switches arrive through [`Engine::handle_shoot`] and
//! [`Engine::change_weapon`], or all together through [`tick`].

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::{beam_hits, within_blast};
use super::entity::Entity;
use super::player::Direction;
use super::state::{Engine, GamePhase};
use super::wave::{WavePlan, roll_enemy};
use super::weapon::{ProjectileBlueprint, ProjectileType};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys currently held
    pub moves: BTreeSet<Direction>,
    /// Fire the current weapon at this world-space point
    pub shoot: Option<Vec2>,
    /// Cycle the inventory (true = next, false = previous)
    pub switch_weapon: Option<bool>,
}

/// Advance the engine by one frame: weapon switch, shot, then update
///
/// Returns what was fired, if anything.
pub fn tick(engine: &mut Engine, input: &TickInput, dt: f32) -> Option<ProjectileType> {
    if let Some(next) = input.switch_weapon {
        engine.change_weapon(next);
    }
    let fired = input.shoot.and_then(|cursor| engine.handle_shoot(cursor));
    engine.update(&input.moves, dt);
    fired
}

impl Engine {
    /// Advance the session clock by `dt` seconds and run one frame
    pub fn update(&mut self, moves: &BTreeSet<Direction>, dt: f32) {
        if self.phase == GamePhase::GameOver {
            return;
        }

        if dt.is_finite() && dt > 0.0 {
            self.elapsed += f64::from(dt.min(MAX_TICK_DT));
        }

        // Enemies chase where the player was at the start of the frame
        let player_pos = self.player.pos();
        for &direction in moves {
            self.player.accelerate(direction);
        }
        self.handle_player_at_boundary();

        self.player.advance();
        for bullet in &mut self.bullets {
            bullet.advance();
            if bullet.has_expired(self.board) {
                bullet.kill();
            }
        }
        for enemy in &mut self.enemies {
            enemy.seek(player_pos);
            enemy.advance();
        }

        self.handle_collisions();
        self.spawn_enemies();
        self.handle_deaths();
    }

    /// Fire the current weapon at `cursor`
    ///
    /// Nothing happens (and `None` comes back) while the weapon is reloading,
    /// after game over, or when the cursor sits on the player.
    pub fn handle_shoot(&mut self, cursor: Vec2) -> Option<ProjectileType> {
        if self.phase == GamePhase::GameOver || !self.reloaded() {
            return None;
        }

        let weapon = self.player.current_weapon();
        let projectile_type = weapon.projectile_type;
        match projectile_type {
            ProjectileType::Bullet => {
                let bullet = self.player.fire_bullet(cursor)?;
                self.add_bullet(bullet);
            }
            ProjectileType::Beam => {
                let blueprint = weapon.blueprint;
                if !self.shoot_beam(cursor, &blueprint) {
                    return None;
                }
            }
        }
        self.player.reload_weapon(self.elapsed);
        Some(projectile_type)
    }

    /// Resolve an instant beam from the player through `cursor`
    ///
    /// Every enemy ahead of the player whose circle the beam clips takes the
    /// blueprint damage and is pushed along the beam. Returns false when the
    /// cursor gives no direction.
    pub fn shoot_beam(&mut self, cursor: Vec2, blueprint: &ProjectileBlueprint) -> bool {
        let origin = self.player.pos();
        let Some(dir) = (cursor - origin).try_normalize() else {
            return false;
        };
        for enemy in &mut self.enemies {
            if beam_hits(origin, dir, blueprint.radius, enemy.pos, enemy.radius) {
                let source = enemy.pos - dir;
                enemy.hit(blueprint.damage, source);
            }
        }
        true
    }

    /// Cycle the weapon inventory
    pub fn change_weapon(&mut self, next: bool) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.player.change_weapon(next);
        log::debug!("Switched to {}", self.player.current_weapon().name);
    }

    /// Splash damage around `center`, recorded for the host to draw
    pub fn explode(&mut self, center: Vec2) {
        let mut caught = 0;
        for enemy in &mut self.enemies {
            if within_blast(center, BLAST_RADIUS, enemy.pos, enemy.radius) {
                enemy.hit(BLAST_ENEMY_DAMAGE, center);
                caught += 1;
            }
        }
        let player = &mut self.player.entity;
        if within_blast(center, BLAST_RADIUS, player.pos, player.radius) {
            player.hit(BLAST_PLAYER_DAMAGE, center);
        }
        self.explosions.push(center);
        log::debug!("Explosion at {center} caught {caught} enemies");
    }

    /// Stop the player at the board edge
    ///
    /// An axis is zeroed when the next step would carry the player's circle
    /// past an edge while moving outward.
    fn handle_player_at_boundary(&mut self) {
        let pos = self.player.pos();
        let vel = self.player.vel();
        let radius = self.player.radius();
        let next = pos + vel;

        let past_top = next.y - radius < 0.0 && vel.y < 0.0;
        let past_bottom = next.y + radius > self.board.y && vel.y > 0.0;
        if past_top || past_bottom {
            self.player.zero_y_velocity();
        }
        let past_left = next.x - radius < 0.0 && vel.x < 0.0;
        let past_right = next.x + radius > self.board.x && vel.x > 0.0;
        if past_left || past_right {
            self.player.zero_x_velocity();
        }
    }

    fn handle_collisions(&mut self) {
        self.handle_enemy_bullet_collision();
        self.handle_enemy_player_collision();
    }

    /// Each live bullet strikes at most one enemy: the first live,
    /// overlapping one in spawn order.
    fn handle_enemy_bullet_collision(&mut self) {
        for bullet in &mut self.bullets {
            if bullet.is_dead() {
                continue;
            }
            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|enemy| !enemy.is_dead() && enemy.overlaps(bullet))
            {
                enemy.collide(bullet);
            }
        }
    }

    /// Contact damage every tick an enemy overlaps the player
    fn handle_enemy_player_collision(&mut self) {
        for enemy in &mut self.enemies {
            if self.player.entity.overlaps(enemy) {
                self.player.entity.collide(enemy);
            }
        }
    }

    /// Release a wave once the wave timer has run out
    fn spawn_enemies(&mut self) {
        if self.elapsed - self.last_wave <= WAVE_INTERVAL {
            return;
        }

        let plan = WavePlan::at(self.elapsed);
        for _ in 0..plan.count {
            let roll = roll_enemy(&mut self.rng, &plan, &self.spawns);
            let id = self.next_entity_id();
            self.enemies.push(Entity::enemy(
                id,
                roll.spawn,
                ENEMY_RADIUS,
                roll.health,
                ENEMY_CONTACT_DAMAGE,
                roll.level,
                plan.difficulty,
            ));
            log::trace!(
                "Enemy {} at {} (hp {}, level {:.2})",
                id,
                roll.spawn,
                roll.health,
                roll.level
            );
        }
        self.last_wave = self.elapsed;
        log::info!(
            "Wave at {:.1}s: {} enemies, difficulty {}",
            self.elapsed,
            plan.count,
            plan.difficulty
        );
    }

    /// Remove the dead: explosive bullets go off first, each enemy scores,
    /// and a dead player ends the session.
    fn handle_deaths(&mut self) {
        let blasts: Vec<Vec2> = self
            .bullets
            .iter()
            .filter(|b| b.is_dead() && b.is_explosive())
            .map(|b| b.pos)
            .collect();
        self.bullets.retain(|b| !b.is_dead());
        for center in blasts {
            self.explode(center);
        }

        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_dead());
        let killed = (before - self.enemies.len()) as u64;
        self.score += killed * KILL_SCORE;

        if self.player.is_dead() {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over at {:.1}s with score {}",
                self.elapsed,
                self.score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::entity::EntityKind;

    const BOARD: f32 = 1000.0;

    fn engine() -> Engine {
        Engine::new(&Settings {
            board_width: BOARD,
            board_height: BOARD,
            seed: 12345,
            ..Settings::default()
        })
        .unwrap()
    }

    fn select(engine: &mut Engine, name: &str) {
        for _ in 0..engine.player().weapons().len() {
            if engine.current_weapon().name == name {
                return;
            }
            engine.change_weapon(true);
        }
        panic!("no weapon named {name}");
    }

    fn no_moves() -> BTreeSet<Direction> {
        BTreeSet::new()
    }

    /// Bullet parked at `pos`, not moving
    fn parked_bullet(pos: Vec2, damage: u32, explosive: bool) -> Entity {
        let bp = ProjectileBlueprint::new(5.0, damage, 0.0, explosive);
        Entity::bullet(0, pos, Vec2::ZERO, &bp, 1000.0)
    }

    #[test]
    fn test_update_moves_player() {
        let mut engine = engine();
        let start = engine.player_position();
        let moves = BTreeSet::from([Direction::Up, Direction::Right]);
        engine.update(&moves, SIM_DT);
        assert_eq!(engine.player_position(), start + Vec2::new(1.0, -1.0));
        assert!((engine.player().vel() - Vec2::new(0.9, -0.9)).length() < 1e-6);
    }

    #[test]
    fn test_boundary_stops_outward_motion() {
        let mut engine = Engine::new(&Settings {
            board_width: BOARD,
            board_height: BOARD,
            player_start: Some(Vec2::new(10.5, 500.0)),
            ..Settings::default()
        })
        .unwrap();
        let left = BTreeSet::from([Direction::Left]);
        for _ in 0..50 {
            engine.update(&left, SIM_DT);
            assert!(engine.player_position().x - engine.player().radius() >= 0.0);
        }
        // Moving back inward is still allowed
        let right = BTreeSet::from([Direction::Right]);
        engine.update(&right, SIM_DT);
        assert!(engine.player_position().x > 10.5);
    }

    #[test]
    fn test_bullet_hits_only_first_enemy() {
        let mut engine = engine();
        let a = engine.add_enemy(Vec2::new(100.0, 100.0), 10.0, 50, 10, 0.1);
        let b = engine.add_enemy(Vec2::new(104.0, 100.0), 10.0, 50, 10, 0.1);
        engine.add_bullet(parked_bullet(Vec2::new(102.0, 100.0), 20, false));

        engine.handle_collisions();

        let hp = |id| engine.enemies().iter().find(|e| e.id == id).unwrap().hit_points;
        assert_eq!(hp(a), 30);
        assert_eq!(hp(b), 50);
        assert!(engine.bullets()[0].is_dead());
    }

    #[test]
    fn test_contact_damage_every_tick() {
        let mut engine = engine();
        let pos = engine.player_position();
        engine.add_enemy(pos + Vec2::new(5.0, 0.0), 10.0, 50, 10, 0.1);

        engine.handle_collisions();
        assert_eq!(engine.player().hit_points(), 40);
        engine.handle_collisions();
        assert_eq!(engine.player().hit_points(), 30);
    }

    #[test]
    fn test_explosion_splash() {
        let mut engine = engine();
        let center = Vec2::new(300.0, 300.0);
        let near = engine.add_enemy(center + Vec2::new(55.0, 0.0), 10.0, 100, 10, 0.1);
        let edge = engine.add_enemy(center + Vec2::new(0.0, 60.0), 10.0, 100, 10, 0.1);
        let far = engine.add_enemy(center + Vec2::new(70.0, 0.0), 10.0, 100, 10, 0.1);

        engine.explode(center);

        let hp = |id| engine.enemies().iter().find(|e| e.id == id).unwrap().hit_points;
        assert_eq!(hp(near), 60);
        assert_eq!(hp(edge), 60);
        assert_eq!(hp(far), 100);
        assert_eq!(engine.player().hit_points(), PLAYER_HIT_POINTS);
        assert_eq!(engine.explosions(), &[center]);
    }

    #[test]
    fn test_explosion_hurts_player_by_ten() {
        let mut engine = engine();
        let pos = engine.player_position();
        engine.explode(pos + Vec2::new(30.0, 0.0));
        assert_eq!(engine.player().hit_points(), PLAYER_HIT_POINTS - 10);
    }

    #[test]
    fn test_explosive_bullet_detonates_on_death() {
        let mut engine = engine();
        let target = Vec2::new(200.0, 200.0);
        engine.add_enemy(target, 10.0, 30, 10, 0.1);
        engine.add_enemy(target + Vec2::new(40.0, 0.0), 10.0, 30, 10, 0.1);
        engine.add_bullet(parked_bullet(target, 0, true));

        engine.update(&no_moves(), SIM_DT);

        assert!(engine.bullets().is_empty());
        assert_eq!(engine.explosions().len(), 1);
        assert!(engine.enemies().is_empty());
        assert_eq!(engine.score(), 20);
    }

    #[test]
    fn test_rocket_flies_and_explodes() {
        let mut engine = engine();
        select(&mut engine, "Rocket");
        let pos = engine.player_position();
        engine.add_enemy(pos + Vec2::new(200.0, 0.0), 10.0, 30, 10, 0.0);

        assert_eq!(engine.handle_shoot(pos + Vec2::new(1.0, 0.0)), Some(ProjectileType::Bullet));
        for _ in 0..20 {
            engine.update(&no_moves(), SIM_DT);
        }
        assert_eq!(engine.explosions().len(), 1);
        assert!(engine.enemies().is_empty());
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn test_beam_hits_everything_ahead() {
        let mut engine = engine();
        select(&mut engine, "Laser");
        let pos = engine.player_position();
        let ahead = engine.add_enemy(pos + Vec2::new(100.0, 0.0), 10.0, 50, 10, 0.1);
        let far_ahead = engine.add_enemy(pos + Vec2::new(400.0, 12.0), 10.0, 50, 10, 0.1);
        let behind = engine.add_enemy(pos - Vec2::new(100.0, 0.0), 10.0, 50, 10, 0.1);
        let wide = engine.add_enemy(pos + Vec2::new(100.0, 40.0), 10.0, 50, 10, 0.1);

        let fired = engine.handle_shoot(pos + Vec2::new(10.0, 0.0));
        assert_eq!(fired, Some(ProjectileType::Beam));
        assert!(engine.bullets().is_empty());

        let enemy = |id| engine.enemies().iter().find(|e| e.id == id).unwrap().clone();
        assert_eq!(enemy(ahead).hit_points, 40);
        assert_eq!(enemy(far_ahead).hit_points, 40);
        assert_eq!(enemy(behind).hit_points, 50);
        assert_eq!(enemy(wide).hit_points, 50);
        // Pushed along the beam
        assert!(enemy(ahead).vel.x > 0.0);
        assert!(enemy(ahead).vel.y.abs() < 1e-5);
    }

    #[test]
    fn test_shot_gated_by_reload() {
        let mut engine = engine();
        select(&mut engine, "Pistol");
        let cursor = engine.player_position() + Vec2::new(0.0, -100.0);

        assert_eq!(engine.handle_shoot(cursor), Some(ProjectileType::Bullet));
        assert_eq!(engine.weapon_reload_status(), 0.0);
        assert_eq!(engine.handle_shoot(cursor), None);
        assert_eq!(engine.bullets().len(), 1);

        // Pistol cooldown is 0.3s
        engine.update(&no_moves(), 0.31);
        assert!(engine.reloaded());
        assert_eq!(engine.handle_shoot(cursor), Some(ProjectileType::Bullet));
        assert_eq!(engine.bullets().len(), 2);
    }

    #[test]
    fn test_zero_cooldown_fires_every_call() {
        let mut engine = engine();
        select(&mut engine, "Sniper");
        let cursor = engine.player_position() + Vec2::new(100.0, 0.0);
        for _ in 0..3 {
            assert_eq!(engine.handle_shoot(cursor), Some(ProjectileType::Bullet));
        }
        assert_eq!(engine.bullets().len(), 3);
    }

    #[test]
    fn test_bullet_expires_at_range() {
        let mut engine = engine();
        select(&mut engine, "Rifle");
        let pos = engine.player_position();
        engine.handle_shoot(pos + Vec2::new(1.0, 0.0));
        // Rifle: 25 units/tick, 400 range. Board edge is 500 away.
        for _ in 0..16 {
            engine.update(&no_moves(), SIM_DT);
        }
        assert_eq!(engine.bullets().len(), 1);
        engine.update(&no_moves(), SIM_DT);
        assert!(engine.bullets().is_empty());
    }

    #[test]
    fn test_spawn_scaling_at_65_seconds() {
        let mut engine = engine();
        engine.update(&no_moves(), 65.0);

        let spawned = engine.enemies();
        // Zero-health rolls die in the same sweep and score
        let dead = (engine.score() / KILL_SCORE) as usize;
        assert_eq!(spawned.len() + dead, 3);
        for enemy in spawned {
            assert!(enemy.hit_points <= 80);
            let EntityKind::Enemy { level, difficulty, damage } = enemy.kind else {
                panic!("not an enemy");
            };
            assert_eq!(difficulty, 4);
            assert_eq!(damage, ENEMY_CONTACT_DAMAGE);
            assert!((0.1..=0.82 + 1e-6).contains(&level));
            assert!(engine.spawn_points().contains(&enemy.pos));
        }
    }

    #[test]
    fn test_waves_follow_timer() {
        let mut engine = engine();
        engine.update(&no_moves(), 5.0);
        assert!(engine.enemies().is_empty(), "not strictly past 5s yet");
        engine.update(&no_moves(), 0.5);
        let first = engine.enemies().len() as u64 + engine.score() / KILL_SCORE;
        assert_eq!(first, 1);
        engine.update(&no_moves(), 1.0);
        let after = engine.enemies().len() as u64 + engine.score() / KILL_SCORE;
        assert_eq!(after, 1, "timer restarts after a wave");
    }

    #[test]
    fn test_clock_keeps_running_in_long_sessions() {
        let mut engine = engine();
        engine.elapsed = 600_000.0;
        engine.last_wave = 600_000.0;

        for _ in 0..60 {
            engine.update(&no_moves(), SIM_DT);
        }
        let advanced = engine.elapsed() - 600_000.0;
        assert!((advanced - 1.0).abs() < 1e-6, "clock advanced {advanced}");

        // Just past the 5s wave interval
        for _ in 0..250 {
            engine.update(&no_moves(), SIM_DT);
        }
        let spawned = engine.enemies().len() as u64 + engine.score() / KILL_SCORE;
        assert!(spawned > 0, "no wave after 5s");
    }

    #[test]
    fn test_weapon_reloads_in_long_sessions() {
        let mut engine = engine();
        engine.elapsed = 600_000.0;
        engine.last_wave = 600_000.0;
        select(&mut engine, "Pistol");
        let cursor = engine.player_position() + Vec2::new(0.0, -100.0);

        assert_eq!(engine.handle_shoot(cursor), Some(ProjectileType::Bullet));
        assert!(!engine.reloaded());
        // Pistol cooldown 0.3s = 18 ticks
        for _ in 0..19 {
            engine.update(&no_moves(), SIM_DT);
        }
        assert!(engine.reloaded());
    }

    #[test]
    fn test_huge_dt_is_capped() {
        let mut engine = engine();
        engine.update(&no_moves(), f32::MAX);
        assert_eq!(engine.elapsed(), f64::from(MAX_TICK_DT));
        let plan = WavePlan::at(engine.elapsed());
        let spawned = engine.enemies().len() as u64 + engine.score() / KILL_SCORE;
        assert_eq!(spawned, u64::from(plan.count));
        assert_eq!(plan.count, 5);
    }

    #[test]
    fn test_score_counts_every_kind_of_kill() {
        let mut engine = engine();
        let pos = engine.player_position();

        // Bullet kill
        engine.add_enemy(Vec2::new(100.0, 100.0), 10.0, 5, 10, 0.0);
        engine.add_bullet(parked_bullet(Vec2::new(100.0, 100.0), 10, false));
        // Beam kill
        engine.add_enemy(pos + Vec2::new(0.0, 150.0), 10.0, 10, 10, 0.0);
        // Explosion kill
        engine.add_enemy(Vec2::new(800.0, 800.0), 10.0, 40, 10, 0.0);
        engine.add_bullet(parked_bullet(Vec2::new(810.0, 800.0), 0, true));
        // Survivor
        engine.add_enemy(Vec2::new(100.0, 800.0), 10.0, 500, 10, 0.0);

        select(&mut engine, "Laser");
        assert_eq!(engine.handle_shoot(pos + Vec2::new(0.0, 10.0)), Some(ProjectileType::Beam));
        // Rocket stand-in dies on contact with the third enemy
        engine.update(&no_moves(), SIM_DT);

        assert_eq!(engine.score(), 30);
        assert_eq!(engine.enemies().len(), 1);
    }

    #[test]
    fn test_player_death_is_terminal() {
        let mut engine = engine();
        let pos = engine.player_position();
        engine.add_enemy(pos, 10.0, 1000, 100, 0.0);
        engine.update(&no_moves(), SIM_DT);
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert!(engine.is_game_over());

        let frozen = engine.player_position();
        let clock = engine.elapsed();
        let moves = BTreeSet::from([Direction::Down]);
        engine.update(&moves, 10.0);
        assert_eq!(engine.player_position(), frozen);
        assert_eq!(engine.elapsed(), clock);
        assert_eq!(engine.handle_shoot(pos + Vec2::X), None);
        let index = engine.player().current_weapon_index();
        engine.change_weapon(true);
        assert_eq!(engine.player().current_weapon_index(), index);
    }

    #[test]
    fn test_tick_switches_then_fires() {
        let mut engine = engine();
        let pos = engine.player_position();
        engine.add_enemy(pos + Vec2::new(100.0, 0.0), 10.0, 50, 10, 0.0);
        let input = TickInput {
            switch_weapon: Some(false),
            shoot: Some(pos + Vec2::new(50.0, 0.0)),
            ..Default::default()
        };
        // Previous from Pistol wraps to Rocket
        assert_eq!(tick(&mut engine, &input, SIM_DT), Some(ProjectileType::Bullet));
        assert_eq!(engine.current_weapon().name, "Rocket");
        assert_eq!(engine.bullets().len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut engine1 = engine();
        let mut engine2 = engine();

        let inputs = [
            TickInput {
                moves: BTreeSet::from([Direction::Left]),
                ..Default::default()
            },
            TickInput {
                shoot: Some(Vec2::new(0.0, 0.0)),
                ..Default::default()
            },
            TickInput {
                switch_weapon: Some(true),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..120 {
            for input in &inputs {
                tick(&mut engine1, input, 0.25);
                tick(&mut engine2, input, 0.25);
            }
        }

        assert_eq!(engine1.enemies(), engine2.enemies());
        assert_eq!(engine1.bullets(), engine2.bullets());
        assert_eq!(engine1.score(), engine2.score());
        assert_eq!(engine1.player_position(), engine2.player_position());
    }
}
