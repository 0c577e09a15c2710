//! Platform abstraction layer
//!
//! The session talks to the outside world only through `Platform`:
//! - Tilt sampling (input)
//! - Sound playback
//! - Sprite rendering
//! - Menus

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::SoundCue;
use crate::sim::FlowerKind;

/// Visual kinds the renderer has to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    PlayerBody,
    /// Inner glow shown while attack mode blinks
    PlayerCore,
    Enemy,
    Flower(FlowerKind),
    Honeycomb,
    Heart,
    Lightning,
    Mushroom,
    /// Thunderbolt charge in the HUD
    Charge,
    Particle,
}

/// A menu screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub subtitle: String,
    pub options: Vec<String>,
}

impl Menu {
    /// Title screen shown before the first round
    pub fn title(high_score: u32) -> Self {
        Self {
            title: "Beehive".to_string(),
            subtitle: format!("Highscore: {}", high_score),
            options: vec!["New Game".to_string()],
        }
    }

    /// Screen shown when a round ends
    pub fn game_over(score: u32) -> Self {
        Self {
            title: "Game Over".to_string(),
            subtitle: format!("Score: {}", score),
            options: vec!["New Game".to_string()],
        }
    }
}

/// Outbound effects and inbound input for one frame driver
pub trait Platform {
    /// Raw device tilt, each axis roughly in [-1, 1]
    fn sample_tilt(&mut self) -> Vec2;

    fn play_sound(&mut self, cue: SoundCue);

    /// Draw one sprite. `id` is stable for the lifetime of the entity.
    fn render_entity(&mut self, sprite: Sprite, id: u32, pos: Vec2, size: f32, alpha: f32);

    fn present_menu(&mut self, menu: &Menu);
}

/// Platform without a screen or speaker, driven by a wandering tilt.
///
/// Used by the native binary to play rounds unattended.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    rng: Pcg32,
    tilt: Vec2,
    frames: u64,
    sounds_played: u64,
    sprites_drawn: u64,
    menus: Vec<Menu>,
}

impl HeadlessPlatform {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tilt: Vec2::ZERO,
            frames: 0,
            sounds_played: 0,
            sprites_drawn: 0,
            menus: Vec::new(),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sounds_played(&self) -> u64 {
        self.sounds_played
    }

    pub fn sprites_drawn(&self) -> u64 {
        self.sprites_drawn
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }
}

impl Platform for HeadlessPlatform {
    fn sample_tilt(&mut self) -> Vec2 {
        // Drift a little each frame, like a hand holding the phone
        let drift = Vec2::new(
            self.rng.random_range(-0.05..=0.05),
            self.rng.random_range(-0.05..=0.05),
        );
        self.tilt = (self.tilt + drift).clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        self.frames += 1;
        self.tilt
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds_played += 1;
        log::debug!("sound {}", cue.id());
    }

    fn render_entity(&mut self, _sprite: Sprite, _id: u32, _pos: Vec2, _size: f32, _alpha: f32) {
        self.sprites_drawn += 1;
    }

    fn present_menu(&mut self, menu: &Menu) {
        log::info!("[{}] {}", menu.title, menu.subtitle);
        self.menus.push(menu.clone());
    }
}
