//! Player contact tests and their effects
//!
//! Two entities touch when their centres are closer than the mean of their
//! visual sizes. Every live entity is tested against the player once per frame.

use glam::Vec2;

use super::state::{FlowerKind, GameEvent, GameState, PickupKind};
use super::timeline::{Timeline, TimelineAction, TimelineKind};

/// Centre-distance overlap test on visual sizes
#[inline]
pub fn overlaps(p1: Vec2, s1: f32, p2: Vec2, s2: f32) -> bool {
    p1.distance(p2) < 0.5 * (s1 + s2)
}

/// Outcome of testing the player against one enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    None,
    /// Player lost a life
    Damaged,
    /// Enemy was knocked into its death spiral
    Killed,
}

/// Test the player against `state.enemies[index]` and apply damage or a kill
pub fn resolve_enemy_contact(state: &mut GameState, index: usize) -> EnemyContact {
    let Some(enemy) = state.enemies.get(index) else {
        return EnemyContact::None;
    };
    let player = &state.player;
    if !overlaps(player.pos, player.visual_size(), enemy.pos, enemy.visual_size()) {
        return EnemyContact::None;
    }

    if !player.immune && !player.attack && !enemy.dying && player.lives > 0 {
        damage_player(state);
        return EnemyContact::Damaged;
    }

    if player.attack && enemy.in_hive && !enemy.dying {
        let id = enemy.id;
        state.enemies[index].dying = true;
        log::debug!("enemy #{} knocked out", id);
        state.events.push(GameEvent::EnemyKilled { id });
        return EnemyContact::Killed;
    }

    EnemyContact::None
}

/// Lose a life: stir the hive and blink immune, or begin the death sequence
fn damage_player(state: &mut GameState) {
    debug_assert!(state.player.lives > 0, "damage applied with no lives left");
    let player = &mut state.player;
    player.lives = player.lives.saturating_sub(1);

    if player.lives > 0 {
        player.immune = true;
        player.body = Some(Timeline::immunity());
        state.speed_cap = state.tuning.buzz_speed_cap;
        state.stun.buzz_since = Some(state.frame);
        log::debug!("t={} player hit, {} lives left", state.t, player.lives);
        state.events.push(GameEvent::PlayerHit {
            lives_left: player.lives,
        });
    } else {
        player.dying = true;
        log::info!("t={} player out of lives", state.t);
        state.events.push(GameEvent::PlayerDying);
    }
}

/// Test the player against `state.pickups[index]`; a collected pickup is
/// removed immediately and `true` is returned.
pub fn resolve_pickup_contact(state: &mut GameState, index: usize) -> bool {
    let Some(pickup) = state.pickups.get(index) else {
        return false;
    };
    let player = &state.player;
    if !overlaps(player.pos, player.visual_size(), pickup.pos, pickup.kind.visual_size()) {
        return false;
    }

    let pickup = state.pickups.remove(index);
    log::debug!("t={} collected {:?} #{}", state.t, pickup.kind, pickup.id);
    match pickup.kind {
        PickupKind::Flower(kind) => collect_flower(state, kind),
        PickupKind::Honeycomb => collect_honeycomb(state),
        PickupKind::Heart => {
            let player = &mut state.player;
            if player.is_alive() {
                player.lives += 1;
            }
            state.events.push(GameEvent::HeartCollected {
                lives: player.lives,
            });
        }
        PickupKind::Lightning => {
            state.player.charges += 1;
            state.events.push(GameEvent::LightningCollected {
                charges: state.player.charges,
            });
        }
        PickupKind::Mushroom => {
            state.player.scale_diameter(0.5);
            state.events.push(GameEvent::MushroomCollected);
        }
    }
    true
}

/// Enter attack mode. A running grow sequence is wound back first so the
/// doubling never stacks.
fn collect_flower(state: &mut GameState, kind: FlowerKind) {
    let player = &mut state.player;
    let still_doubled = player.core.take().is_some_and(|running| {
        running.kind == TimelineKind::GrowAttack
            && running.pending_actions().any(|a| a == TimelineAction::HalveSize)
    });
    if still_doubled {
        player.scale_diameter(0.5);
    }

    player.attack = true;
    player.core = Some(match kind {
        FlowerKind::Grow => {
            player.scale_diameter(2.0);
            Timeline::grow_attack()
        }
        FlowerKind::AttackOnly => Timeline::attack(),
    });
    state.events.push(GameEvent::FlowerCollected(kind));
}

/// Score a point; every even score grows the player
fn collect_honeycomb(state: &mut GameState) {
    state.player.honeycombs_collected += 1;
    state.score += 1;
    if state.score % 2 == 0 {
        state.player.grow(state.tuning.honeycomb_growth);
    }
    state.events.push(GameEvent::HoneycombCollected { score: state.score });
    if state.high_score.record(state.score) {
        state.events.push(GameEvent::NewHighScore(state.score));
    }
}
