//! BeeHive - a tilt-controlled arcade game set inside an enemy hive
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, state machines)
//! - `session`: Session API driving the simulation through platform ports
//! - `platform`: Tilt/sound/render/menu port abstraction
//! - `persistence`: High score storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::Session;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display frames per game-second (the sim is ticked once per display frame)
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Default arena dimensions (portrait phone, points)
    pub const ARENA_WIDTH: f32 = 375.0;
    pub const ARENA_HEIGHT: f32 = 667.0;
    /// Border kept clear of spawns
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_LIVES: u32 = 3;
    pub const PLAYER_DIAMETER: f32 = 20.0;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    pub const TILT_DEAD_ZONE: f32 = 0.05;
    /// Diameter gained on every second honeycomb
    pub const HONEYCOMB_GROWTH: f32 = 2.0;
    /// Age units per unit of diameter (drives the death spiral)
    pub const AGE_PER_DIAMETER: f32 = 10.0;
    /// Smallest diameter the player is clamped to
    pub const MIN_PLAYER_DIAMETER: f32 = 0.5;

    /// Enemy defaults
    pub const BEE_SPEED: i32 = 1;
    pub const BEE_MIN_GROWN: u32 = 150;
    pub const BEE_MAX_GROWN: u32 = 250;
    /// Visual size per unit of age
    pub const BEE_SIZE_PER_AGE: f32 = 0.1;
    /// Game-seconds between each step of the newborn size cap
    pub const BEE_GROWTH_STEP_SECS: u32 = 240;
    /// Age at which a dying enemy hits the floor
    pub const DEATH_FLOOR_AGE: u32 = 90;

    /// Enemy speed caps
    pub const BASE_SPEED_CAP: f32 = 3.0;
    pub const BUZZ_SPEED_CAP: f32 = 10.0;
    pub const THUNDER_SPEED_CAP: f32 = 0.5;
    pub const BUZZ_SECS: u32 = 5;
    pub const THUNDER_SECS: u32 = 7;

    /// Spawn periods (game-seconds)
    pub const ENEMY_FREQUENCY: u32 = 4;
    pub const FLOWER_FREQUENCY: u32 = 40;
    pub const HONEYCOMB_FREQUENCY: u32 = 6;
    pub const HEART_FREQUENCY: u32 = 90;
    pub const LIGHTNING_FREQUENCY: u32 = 90;
    pub const MUSHROOM_FREQUENCY: u32 = 100;
    /// One in this many flowers is the grow variant
    pub const GROW_FLOWER_ODDS: u32 = 4;

    /// Pickup lifetimes (game-seconds)
    pub const FLOWER_LIFETIME: u32 = 3;
    pub const PICKUP_LIFETIME: u32 = 5;

    /// Pickup visual sizes
    pub const FLOWER_SIZE: f32 = 8.0;
    pub const HONEYCOMB_SIZE: f32 = 12.0;
    pub const HEART_SIZE: f32 = 15.0;
    pub const LIGHTNING_SIZE: f32 = 15.0;
    pub const MUSHROOM_SIZE: f32 = 35.0;

    /// Thunderbolt charge slots (bottom-left HUD)
    pub const CHARGE_SLOT_ORIGIN_X: f32 = 20.0;
    pub const CHARGE_SLOT_Y: f32 = 20.0;
    pub const CHARGE_SLOT_SPACING: f32 = 30.0;
    pub const CHARGE_SLOT_WIDTH: f32 = 35.0;
    pub const CHARGE_SLOT_HEIGHT: f32 = 40.0;

    /// Particle burst
    pub const BURST_PARTICLES: usize = 10;
    pub const BURST_RING_RADIUS: f32 = 7.0;
    pub const MAX_PARTICLES: usize = 256;
}

/// Convert a duration in seconds to whole frames
#[inline]
pub fn secs_to_frames(secs: f32) -> u32 {
    (secs * consts::FRAMES_PER_SECOND as f32).round() as u32
}

/// Axis-aligned rectangle test with the rectangle given by its centre
#[inline]
pub fn rect_contains(center: Vec2, size: Vec2, point: Vec2) -> bool {
    let half = size * 0.5;
    point.x >= center.x - half.x
        && point.x <= center.x + half.x
        && point.y >= center.y - half.y
        && point.y <= center.y + half.y
}

/// True if both components are finite
#[inline]
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
