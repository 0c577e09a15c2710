//! Fixed-rate simulation tick
//!
//! Core game loop that advances the hive by one display frame.

use glam::Vec2;

use super::collision::{resolve_enemy_contact, resolve_pickup_contact};
use super::lifecycle::{
    advance_enemy_death, advance_player_death, advance_player_timelines, expire_stun_windows,
    fade_particles, release_thunder,
};
use super::motion::{TiltCalibration, enter_hive, steer_player, wander};
use super::spawn::spawn_entities;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{is_finite_vec, rect_contains};

/// Input for a single tick, sampled once at the top of the frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Raw device tilt, each axis roughly in [-1, 1]
    pub tilt: Vec2,
}

/// Advance the game state by one frame.
///
/// Order: clock, round-end check, player motion, stun windows, spawning,
/// player death and timelines, enemies (grow, walk, contact, death), pickups
/// (contact, expiry), invariant check.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.t = (state.frame / FRAMES_PER_SECOND as u64) as u32;

    if state.player.dead {
        state.phase = GamePhase::GameOver;
        log::info!("Round over at t={} with score {}", state.t, state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
        return;
    }

    // Player motion
    if state.frame == 0 {
        state.calibration = TiltCalibration::capture(input.tilt);
    }
    if is_finite_vec(input.tilt) {
        let tilt = state.calibration.normalize(input.tilt);
        steer_player(&mut state.player, tilt, &state.tuning, &mut state.rng);
    } else {
        log::warn!("Ignoring invalid tilt sample {:?}", input.tilt);
    }

    expire_stun_windows(state);
    spawn_entities(state);

    advance_player_death(state);
    advance_player_timelines(state);
    fade_particles(state);

    // Enemies: removal happens in place, so only step past survivors
    let arena = state.arena();
    let mut i = 0;
    while i < state.enemies.len() {
        let (t, frame, cap) = (state.t, state.frame, state.speed_cap);
        let growth_step = state.tuning.bee_growth_step_secs;
        let step = state.tuning.bee_speed;
        {
            let enemy = &mut state.enemies[i];
            enter_hive(enemy, t, growth_step);
            wander(enemy, frame, arena, cap, step, &mut state.rng);
        }
        resolve_enemy_contact(state, i);
        if !advance_enemy_death(state, i) {
            i += 1;
        }
    }

    // Pickups
    let mut i = 0;
    while i < state.pickups.len() {
        if resolve_pickup_contact(state, i) {
            continue;
        }
        if state.pickups[i].is_expired(state.frame, &state.tuning) {
            let pickup = state.pickups.remove(i);
            state.events.push(GameEvent::PickupExpired {
                id: pickup.id,
                kind: pickup.kind,
            });
            continue;
        }
        i += 1;
    }

    state.enforce_invariants();
    state.frame += 1;
}

/// Spend the thunderbolt charge whose HUD slot contains `point`.
///
/// Only the first (lowest) matching slot is spent; the rest shift down one
/// slot. Returns `false`, with no state change, when no slot is hit.
pub fn spend_charge_at(state: &mut GameState, point: Vec2) -> bool {
    if state.phase != GamePhase::Playing || !is_finite_vec(point) {
        return false;
    }
    let size = Vec2::new(CHARGE_SLOT_WIDTH, CHARGE_SLOT_HEIGHT);
    let hit = (0..state.player.charges)
        .any(|slot| rect_contains(GameState::charge_slot_center(slot), size, point));
    if !hit {
        return false;
    }

    state.player.charges -= 1;
    release_thunder(state);
    log::debug!("t={} thunder released", state.t);
    state.events.push(GameEvent::ThunderReleased {
        charges_left: state.player.charges,
    });
    true
}
