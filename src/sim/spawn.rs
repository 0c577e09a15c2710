//! Timed-window spawning of enemies and pickups
//!
//! The game-second counter `t` is sampled every frame but only changes once per
//! second, so each spawner keeps an explicit armed flag and fires at most once
//! per window.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, FlowerKind, GameEvent, GameState, Pickup, PickupKind};
use crate::consts::*;
use crate::tuning::Frequencies;

/// One-shot-per-period spawner for pickups.
///
/// At each period start a spawn offset `o` in `[1, F]` is drawn and the spawner
/// is armed; it fires once at `t == start + o`. An offset of `F` lands on the
/// next period's first second, which fires before that period re-arms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodicSpawner {
    pub period: u32,
    pub armed: bool,
    pub offset: u32,
    /// Extra draw in `[1, variants]` made alongside the offset
    pub variant: u32,
    pub window_start: Option<u32>,
}

impl PeriodicSpawner {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            armed: false,
            offset: 0,
            variant: 1,
            window_start: None,
        }
    }

    /// Returns the variant draw when a spawn is due at game-second `t`
    pub fn poll(&mut self, t: u32, variants: u32, rng: &mut impl Rng) -> Option<u32> {
        let due = self.armed && self.window_start.is_some_and(|start| t == start + self.offset);
        let fired = if due {
            self.armed = false;
            Some(self.variant)
        } else {
            None
        };

        if t % self.period == 0 && self.window_start != Some(t) {
            self.window_start = Some(t);
            self.armed = true;
            self.offset = rng.random_range(1..=self.period);
            self.variant = rng.random_range(1..=variants.max(1));
        }
        fired
    }
}

/// Enemy spawner: fires on second 1 of each period, re-arms on second 2
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebouncedSpawner {
    pub period: u32,
    pub armed: bool,
}

impl DebouncedSpawner {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            armed: true,
        }
    }

    pub fn poll(&mut self, t: u32) -> bool {
        match t % self.period {
            1 if self.armed => {
                self.armed = false;
                true
            }
            2 => {
                self.armed = true;
                false
            }
            _ => false,
        }
    }
}

/// Scheduler state for every spawnable kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawners {
    pub enemy: DebouncedSpawner,
    pub flower: PeriodicSpawner,
    pub honeycomb: PeriodicSpawner,
    pub heart: PeriodicSpawner,
    pub lightning: PeriodicSpawner,
    pub mushroom: PeriodicSpawner,
}

impl Spawners {
    pub fn new(frequencies: &Frequencies) -> Self {
        Self {
            enemy: DebouncedSpawner::new(frequencies.enemy),
            flower: PeriodicSpawner::new(frequencies.flower),
            honeycomb: PeriodicSpawner::new(frequencies.honeycomb),
            heart: PeriodicSpawner::new(frequencies.heart),
            lightning: PeriodicSpawner::new(frequencies.lightning),
            mushroom: PeriodicSpawner::new(frequencies.mushroom),
        }
    }
}

/// Uniform position inside the arena, kept clear of the inset margin
fn random_inset_position(state: &mut GameState) -> Vec2 {
    let margin = state.tuning.spawn_margin;
    let arena = state.arena();
    Vec2::new(
        state.rng.random_range(margin..=arena.x - margin),
        state.rng.random_range(margin..=arena.y - margin),
    )
}

/// One of the four inset corners
fn random_corner(state: &mut GameState) -> Vec2 {
    let margin = state.tuning.spawn_margin;
    let arena = state.arena();
    let x = if state.rng.random_bool(0.5) {
        margin
    } else {
        arena.x - margin
    };
    let y = if state.rng.random_bool(0.5) {
        margin
    } else {
        arena.y - margin
    };
    Vec2::new(x, y)
}

fn spawn_pickup(state: &mut GameState, kind: PickupKind) {
    let pos = random_inset_position(state);
    let id = state.next_entity_id();
    state.pickups.push(Pickup {
        id,
        kind,
        pos,
        born_at: state.frame,
    });
    log::debug!("t={} spawned {:?} #{} at {:?}", state.t, kind, id, pos);
    state.events.push(GameEvent::PickupSpawned { id, kind });
}

/// Run every spawner for the current frame
pub fn spawn_entities(state: &mut GameState) {
    let t = state.t;

    if state.spawners.enemy.poll(t) {
        let pos = random_corner(state);
        let fully_grown = state.rng.random_range(BEE_MIN_GROWN..=BEE_MAX_GROWN);
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, pos, fully_grown));
        log::debug!("t={} enemy #{} entering at {:?}", t, id, pos);
        state.events.push(GameEvent::EnemySpawned { id });
    }

    let odds = state.tuning.grow_flower_odds;
    if let Some(variant) = state.spawners.flower.poll(t, odds, &mut state.rng) {
        let kind = if variant == 1 {
            FlowerKind::Grow
        } else {
            FlowerKind::AttackOnly
        };
        spawn_pickup(state, PickupKind::Flower(kind));
    }
    if state.spawners.honeycomb.poll(t, 1, &mut state.rng).is_some() {
        spawn_pickup(state, PickupKind::Honeycomb);
    }
    if state.spawners.heart.poll(t, 1, &mut state.rng).is_some() {
        spawn_pickup(state, PickupKind::Heart);
    }
    if state.spawners.lightning.poll(t, 1, &mut state.rng).is_some() {
        spawn_pickup(state, PickupKind::Lightning);
    }
    if state.spawners.mushroom.poll(t, 1, &mut state.rng).is_some() {
        spawn_pickup(state, PickupKind::Mushroom);
    }
}
