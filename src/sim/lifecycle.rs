//! Timed state transitions: death spirals, blink timelines, stun windows
//!
//! Enemies and the player reuse their `age` counter for the death spiral.
//! Enemies can only start dying once in the hive, so entry growth is always
//! finished before the counter starts falling.

use std::f32::consts::TAU;

use glam::Vec2;

use super::state::{GameEvent, GameState};
use super::timeline::{Timeline, TimelineAction};
use crate::consts::*;

/// Displacement for one tick of the tailspin at counter value `age`
pub fn spiral_step(age: u32, fully_grown: u32) -> Vec2 {
    let radius = 12.0 * 0.5 * age as f32 / fully_grown.max(1) as f32;
    let a1 = age as f32 * TAU / 15.0;
    let a2 = (age + 1) as f32 * TAU / 15.0;
    Vec2::new(a2.cos() - a1.cos(), a2.sin() - a1.sin()) * radius
}

/// Advance a dying enemy. Returns `true` on the frame it hits the floor,
/// at which point it has been removed from the live set.
pub fn advance_enemy_death(state: &mut GameState, index: usize) -> bool {
    let Some(enemy) = state.enemies.get_mut(index) else {
        return false;
    };
    if !enemy.dying {
        return false;
    }
    let r = enemy.age;
    if r > DEATH_FLOOR_AGE {
        enemy.pos += spiral_step(r, enemy.fully_grown);
        enemy.age -= 1;
    }
    if r == DEATH_FLOOR_AGE {
        enemy.dead = true;
        let enemy = state.enemies.remove(index);
        log::debug!("enemy #{} down at {:?}", enemy.id, enemy.pos);
        state.spawn_burst(enemy.pos);
        state.events.push(GameEvent::EnemyDied {
            id: enemy.id,
            pos: enemy.pos,
        });
        return true;
    }
    false
}

/// Advance the player's death sequence: spiral while above the floor, then
/// explode and start the fade that ends in `dead`.
pub fn advance_player_death(state: &mut GameState) {
    let player = &mut state.player;
    if !player.dying || player.half_dead {
        return;
    }
    let r = player.age;
    if r > DEATH_FLOOR_AGE {
        player.pos += spiral_step(r, player.fully_grown);
        player.age -= 1;
    }
    if r > 0 && r <= DEATH_FLOOR_AGE {
        player.half_dead = true;
        player.age = 0;
        player.body = Some(Timeline::death_fade());
        let pos = player.pos;
        log::debug!("t={} player exploded", state.t);
        state.spawn_burst(pos);
        state.events.push(GameEvent::PlayerExploded);
    }
}

/// Step both player timelines and apply whatever they fire
pub fn advance_player_timelines(state: &mut GameState) {
    let mut fired = Vec::new();
    let player = &mut state.player;
    for slot in [&mut player.body, &mut player.core] {
        let Some(timeline) = slot.as_mut() else {
            continue;
        };
        timeline.advance(&mut fired);
        // A finished fade-out stays so the body remains invisible
        if timeline.is_finished() && timeline.alpha() >= 1.0 {
            *slot = None;
        }
    }

    for action in fired {
        match action {
            TimelineAction::ClearImmunity => player.immune = false,
            TimelineAction::ClearAttack => player.attack = false,
            TimelineAction::HalveSize => player.scale_diameter(0.5),
            TimelineAction::MarkDead => {
                player.dead = true;
                log::info!("t={} player dead", state.t);
                state.events.push(GameEvent::PlayerDead);
            }
        }
    }
}

/// Revert the speed cap once a stun window has run its full length. Buzz is
/// checked before thunder, so thunder's revert wins when both lapse together.
pub fn expire_stun_windows(state: &mut GameState) {
    let frame = state.frame;
    let lapsed = |since: Option<u64>, secs: u32| {
        since.is_some_and(|s| frame.saturating_sub(s) >= secs as u64 * FRAMES_PER_SECOND as u64)
    };
    if lapsed(state.stun.buzz_since, state.tuning.buzz_secs) {
        state.speed_cap = state.tuning.base_speed_cap;
        state.stun.buzz_since = None;
        log::debug!("t={} hive calmed", state.t);
    }
    if lapsed(state.stun.thunder_since, state.tuning.thunder_secs) {
        state.speed_cap = state.tuning.base_speed_cap;
        state.stun.thunder_since = None;
        log::debug!("t={} thunder wore off", state.t);
    }
}

/// Start the pacify window
pub fn release_thunder(state: &mut GameState) {
    state.speed_cap = state.tuning.thunder_speed_cap;
    state.stun.thunder_since = Some(state.frame);
}

/// Fade particles and drop the spent ones
pub fn fade_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.age_frames += 1;
        particle.alpha = 1.0 - particle.age_frames as f32 / particle.life_frames.max(1) as f32;
    }
    state.particles.retain(|p| p.age_frames < p.life_frames);
}
