//! Enemy entry growth, enemy random walk and tilt-driven player motion

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, Player};
use crate::is_finite_vec;
use crate::tuning::Tuning;

/// Grow an entering enemy toward its size cap; the cap for every enemy rises by
/// one multiple of its own fully grown size each `growth_step_secs`.
pub fn enter_hive(enemy: &mut Enemy, t: u32, growth_step_secs: u32) {
    if enemy.in_hive {
        return;
    }
    let cap = (1 + t / growth_step_secs.max(1)) * enemy.fully_grown;
    if enemy.age < cap {
        enemy.age += 1;
    } else {
        enemy.in_hive = true;
        log::debug!("enemy #{} in hive at age {}", enemy.id, enemy.age);
    }
}

/// Nudge one velocity component, pulling it back when over the cap
fn nudge(v: i32, cap: f32, step: i32, rng: &mut impl Rng) -> i32 {
    if v as f32 > cap {
        v - rng.random_range(0..=step)
    } else if (v as f32) < -cap {
        v + rng.random_range(0..=step)
    } else {
        v + rng.random_range(-step..=step)
    }
}

/// Flip a component that is carrying the enemy further out of `[0, max]`
fn reflect(pos: f32, v: i32, max: f32) -> i32 {
    if (pos < 0.0 && v < 0) || (pos > max && v > 0) {
        -v
    } else {
        v
    }
}

/// Random walk on even frames while in the hive
pub fn wander(enemy: &mut Enemy, frame: u64, arena: Vec2, speed_cap: f32, step: i32, rng: &mut impl Rng) {
    if !enemy.in_hive || enemy.dead || frame % 2 != 0 {
        return;
    }
    let vx = reflect(enemy.pos.x, nudge(enemy.speed.x, speed_cap, step, rng), arena.x);
    let vy = reflect(enemy.pos.y, nudge(enemy.speed.y, speed_cap, step, rng), arena.y);
    enemy.speed.x = vx;
    enemy.speed.y = vy;
    enemy.pos += enemy.speed.as_vec2();
}

/// Resting tilt captured at round start, so any holding angle is neutral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltCalibration {
    pub offset: Vec2,
    /// Per-axis `min(1 - offset, 1 + offset)`
    pub factor: Vec2,
}

impl Default for TiltCalibration {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            factor: Vec2::ONE,
        }
    }
}

impl TiltCalibration {
    pub fn capture(sample: Vec2) -> Self {
        if !is_finite_vec(sample) {
            return Self::default();
        }
        let axis = |o: f32| {
            let f = (1.0 - o).min(1.0 + o);
            if f > f32::EPSILON { f } else { 1.0 }
        };
        Self {
            offset: sample,
            factor: Vec2::new(axis(sample.x), axis(sample.y)),
        }
    }

    /// Map a raw sample into the symmetric `[-1, 1]` range
    pub fn normalize(&self, sample: Vec2) -> Vec2 {
        (sample - self.offset) / self.factor
    }
}

/// Displacement for one axis of normalized tilt
fn axis_step(u: f32, dead_zone: f32, max_speed: f32) -> f32 {
    if u.abs() <= dead_zone {
        0.0
    } else if u.abs() < 1.0 {
        u * max_speed
    } else {
        u.signum() * max_speed
    }
}

/// Move the player by normalized tilt plus jitter, clamped to the arena
pub fn steer_player(player: &mut Player, tilt: Vec2, tuning: &Tuning, rng: &mut impl Rng) {
    if player.half_dead {
        return;
    }
    let dx = axis_step(tilt.x, tuning.tilt_dead_zone, tuning.player_max_speed);
    let dy = axis_step(tilt.y, tuning.tilt_dead_zone, tuning.player_max_speed);
    let jitter = Vec2::new(
        rng.random_range(-1..=1) as f32,
        rng.random_range(-1..=1) as f32,
    );
    let next = player.pos + Vec2::new(dx, dy) + jitter;
    player.pos = next.clamp(
        Vec2::ZERO,
        Vec2::new(tuning.arena_width, tuning.arena_height),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enter_grows_then_settles() {
        let mut enemy = Enemy::new(1, Vec2::ZERO, 150);
        let mut last = 0;
        for _ in 0..150 {
            enter_hive(&mut enemy, 0, BEE_GROWTH_STEP_SECS);
            assert!(enemy.age >= last);
            last = enemy.age;
        }
        assert_eq!(enemy.age, 150);
        assert!(!enemy.in_hive);
        enter_hive(&mut enemy, 0, BEE_GROWTH_STEP_SECS);
        assert!(enemy.in_hive);

        // Never re-enters growth
        enter_hive(&mut enemy, 10_000, BEE_GROWTH_STEP_SECS);
        assert_eq!(enemy.age, 150);
    }

    #[test]
    fn test_growth_cap_rises_every_step() {
        let mut enemy = Enemy::new(1, Vec2::ZERO, 200);
        for _ in 0..1000 {
            enter_hive(&mut enemy, 480, BEE_GROWTH_STEP_SECS);
        }
        assert_eq!(enemy.age, 600);
        assert!(enemy.in_hive);
        assert!((enemy.visual_size() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_wander_only_on_even_frames_in_hive() {
        let mut rng = Pcg32::seed_from_u64(1);
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 100.0), 150);
        enemy.speed = IVec2::new(2, 2);

        wander(&mut enemy, 0, arena, BASE_SPEED_CAP, BEE_SPEED, &mut rng);
        assert_eq!(enemy.pos, Vec2::new(100.0, 100.0));

        enemy.in_hive = true;
        wander(&mut enemy, 1, arena, BASE_SPEED_CAP, BEE_SPEED, &mut rng);
        assert_eq!(enemy.pos, Vec2::new(100.0, 100.0));

        wander(&mut enemy, 2, arena, BASE_SPEED_CAP, BEE_SPEED, &mut rng);
        assert_ne!(enemy.speed, IVec2::ZERO);
        assert_eq!(enemy.pos, Vec2::new(100.0, 100.0) + enemy.speed.as_vec2());
    }

    #[test]
    fn test_speed_pulled_back_over_cap() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..100 {
            let v = nudge(12, BASE_SPEED_CAP, BEE_SPEED, &mut rng);
            assert!(v == 11 || v == 12);
            let v = nudge(-12, BASE_SPEED_CAP, BEE_SPEED, &mut rng);
            assert!(v == -11 || v == -12);
        }
    }

    #[test]
    fn test_reflects_at_walls() {
        assert_eq!(reflect(-1.0, -2, 100.0), 2);
        assert_eq!(reflect(-1.0, 2, 100.0), 2);
        assert_eq!(reflect(101.0, 3, 100.0), -3);
        assert_eq!(reflect(50.0, 3, 100.0), 3);
    }

    #[test]
    fn test_calibration_symmetric_range() {
        let cal = TiltCalibration::capture(Vec2::new(0.5, -0.2));
        assert!((cal.factor.x - 0.5).abs() < 1e-6);
        assert!((cal.factor.y - 0.8).abs() < 1e-6);
        let n = cal.normalize(Vec2::new(1.0, -1.0));
        assert!((n.x - 1.0).abs() < 1e-6);
        assert!((n.y + 1.0).abs() < 1e-6);
        assert_eq!(cal.normalize(Vec2::new(0.5, -0.2)), Vec2::ZERO);
    }

    #[test]
    fn test_calibration_rejects_bad_sample() {
        assert_eq!(TiltCalibration::capture(Vec2::new(f32::NAN, 0.0)), TiltCalibration::default());
        // Fully tipped axis would divide by zero
        assert_eq!(TiltCalibration::capture(Vec2::new(1.0, 0.0)).factor.x, 1.0);
    }

    #[test]
    fn test_steer_dead_zone_and_saturation() {
        assert_eq!(axis_step(0.04, TILT_DEAD_ZONE, 10.0), 0.0);
        assert!((axis_step(0.5, TILT_DEAD_ZONE, 10.0) - 5.0).abs() < 1e-6);
        assert_eq!(axis_step(-3.0, TILT_DEAD_ZONE, 10.0), -10.0);
    }

    #[test]
    fn test_steer_clamped_and_frozen_when_half_dead() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut player = Player::new(Vec2::new(1.0, 1.0), 20.0, 3);
        for _ in 0..10 {
            steer_player(&mut player, Vec2::new(-1.0, -1.0), &tuning, &mut rng);
        }
        assert_eq!(player.pos, Vec2::ZERO);

        player.half_dead = true;
        let before = player.pos;
        steer_player(&mut player, Vec2::new(1.0, 1.0), &tuning, &mut rng);
        assert_eq!(player.pos, before);
    }
}
