// Recording fakes shared by the session scenarios.
#![allow(dead_code)]

use std::collections::VecDeque;

use beehive::audio::SoundCue;
use beehive::persistence::MemoryStore;
use beehive::platform::{Menu, Platform, Sprite};
use beehive::sim::{Enemy, Pickup, PickupKind};
use beehive::{Session, Tuning};
use glam::Vec2;

/// One `render_entity` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Render {
    pub sprite: Sprite,
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
}

// Platform that replays queued tilts and records every outbound call.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    pub tilts: VecDeque<Vec2>,
    pub sounds: Vec<SoundCue>,
    pub menus: Vec<Menu>,
    pub renders: Vec<Render>,
}

impl Platform for RecordingPlatform {
    fn sample_tilt(&mut self) -> Vec2 {
        self.tilts.pop_front().unwrap_or(Vec2::ZERO)
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn render_entity(&mut self, sprite: Sprite, id: u32, pos: Vec2, size: f32, alpha: f32) {
        self.renders.push(Render {
            sprite,
            id,
            pos,
            size,
            alpha,
        });
    }

    fn present_menu(&mut self, menu: &Menu) {
        self.menus.push(menu.clone());
    }
}

pub type TestSession = Session<RecordingPlatform, MemoryStore>;

// Session on default tuning with a started round.
pub fn started(best: u32) -> TestSession {
    let mut session = Session::new(
        Tuning::default(),
        RecordingPlatform::default(),
        MemoryStore::with_score(best),
    );
    session.new_game();
    session
}

// Drop a fully grown enemy right on top of the player.
pub fn enemy_on_player(session: &mut TestSession) {
    let state = session.state_mut();
    let id = state.next_entity_id();
    let mut enemy = Enemy::new(id, state.player.pos, 150);
    enemy.age = 150;
    enemy.in_hive = true;
    state.enemies.push(enemy);
}

// Drop a pickup right on top of the player.
pub fn pickup_on_player(session: &mut TestSession, kind: PickupKind) {
    let state = session.state_mut();
    let id = state.next_entity_id();
    let born_at = state.frame;
    state.pickups.push(Pickup {
        id,
        kind,
        pos: state.player.pos,
        born_at,
    });
}

// Tick with the scheduler's own spawns swept away after each frame.
pub fn tick_quiet(session: &mut TestSession, frames: u32) {
    for _ in 0..frames {
        session.tick();
        let state = session.state_mut();
        state.enemies.clear();
        state.pickups.clear();
    }
}
