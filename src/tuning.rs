//! Game balance and arena configuration
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A JSON
//! file may override any subset of fields; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Spawn periods in game-seconds, one per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frequencies {
    pub enemy: u32,
    pub flower: u32,
    pub honeycomb: u32,
    pub heart: u32,
    pub lightning: u32,
    pub mushroom: u32,
}

impl Default for Frequencies {
    fn default() -> Self {
        Self {
            enemy: ENEMY_FREQUENCY,
            flower: FLOWER_FREQUENCY,
            honeycomb: HONEYCOMB_FREQUENCY,
            heart: HEART_FREQUENCY,
            lightning: LIGHTNING_FREQUENCY,
            mushroom: MUSHROOM_FREQUENCY,
        }
    }
}

/// Runtime-tunable gameplay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seed for the simulation RNG (each round derives its own stream)
    pub seed: u64,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub spawn_margin: f32,

    // === Player ===
    pub player_lives: u32,
    pub player_diameter: f32,
    pub player_max_speed: f32,
    pub tilt_dead_zone: f32,
    pub honeycomb_growth: f32,

    // === Enemies ===
    pub bee_speed: i32,
    pub bee_growth_step_secs: u32,
    pub base_speed_cap: f32,
    pub buzz_speed_cap: f32,
    pub buzz_secs: u32,
    pub thunder_speed_cap: f32,
    pub thunder_secs: u32,

    // === Spawning ===
    pub frequencies: Frequencies,
    pub grow_flower_odds: u32,
    pub flower_lifetime: u32,
    pub pickup_lifetime: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0x6265_6568_6976_6521,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            spawn_margin: SPAWN_MARGIN,

            player_lives: PLAYER_LIVES,
            player_diameter: PLAYER_DIAMETER,
            player_max_speed: PLAYER_MAX_SPEED,
            tilt_dead_zone: TILT_DEAD_ZONE,
            honeycomb_growth: HONEYCOMB_GROWTH,

            bee_speed: BEE_SPEED,
            bee_growth_step_secs: BEE_GROWTH_STEP_SECS,
            base_speed_cap: BASE_SPEED_CAP,
            buzz_speed_cap: BUZZ_SPEED_CAP,
            buzz_secs: BUZZ_SECS,
            thunder_speed_cap: THUNDER_SPEED_CAP,
            thunder_secs: THUNDER_SECS,

            frequencies: Frequencies::default(),
            grow_flower_odds: GROW_FLOWER_ODDS,
            flower_lifetime: FLOWER_LIFETIME,
            pickup_lifetime: PICKUP_LIFETIME,
        }
    }
}

impl Tuning {
    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let f = &self.frequencies;
        if [f.enemy, f.flower, f.honeycomb, f.heart, f.lightning, f.mushroom].contains(&0) {
            return Err(TuningError::Invalid {
                field: "frequencies",
                reason: "every spawn period must be at least one second",
            });
        }
        // The enemy spawner fires on second 1 and re-arms on second 2
        if f.enemy < 3 {
            return Err(TuningError::Invalid {
                field: "frequencies.enemy",
                reason: "enemy period must be at least three seconds",
            });
        }
        if self.spawn_margin < 0.0 {
            return Err(TuningError::Invalid {
                field: "spawn_margin",
                reason: "must not be negative",
            });
        }
        if self.arena_width <= 2.0 * self.spawn_margin || self.arena_height <= 2.0 * self.spawn_margin {
            return Err(TuningError::Invalid {
                field: "arena",
                reason: "arena must be larger than twice the spawn margin",
            });
        }
        if self.base_speed_cap <= 0.0 || self.buzz_speed_cap <= 0.0 || self.thunder_speed_cap <= 0.0 {
            return Err(TuningError::Invalid {
                field: "speed_cap",
                reason: "speed caps must be positive",
            });
        }
        if self.player_diameter <= 0.0 {
            return Err(TuningError::Invalid {
                field: "player_diameter",
                reason: "must be positive",
            });
        }
        if self.grow_flower_odds == 0 || self.bee_growth_step_secs == 0 || self.bee_speed < 0 {
            return Err(TuningError::Invalid {
                field: "grow_flower_odds",
                reason: "odds and growth step must be positive, bee speed non-negative",
            });
        }
        Ok(())
    }
}
