//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One tick per display frame, game-seconds derived from the frame counter
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies (effects leave as `GameEvent`s)

pub mod collision;
pub mod lifecycle;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timeline;

pub use collision::{EnemyContact, overlaps};
pub use motion::TiltCalibration;
pub use spawn::{DebouncedSpawner, PeriodicSpawner, Spawners};
pub use state::{
    Enemy, FlowerKind, GameEvent, GamePhase, GameState, Particle, Pickup, PickupKind, Player,
    StunWindows,
};
pub use tick::{TickInput, spend_charge_at, tick};
pub use timeline::{Timeline, TimelineAction, TimelineKind};
