//! Game session
//!
//! Owns one `GameState` at a time and wires it to a `Platform` and a
//! `HighScoreStore`. Simulation events are drained every frame and turned
//! into sounds, menus and high score writes. Nothing here returns an error:
//! storage faults are logged and play carries on.

use glam::Vec2;

use crate::audio::SoundCue;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::platform::{Menu, Platform, Sprite};
use crate::sim::{self, GameEvent, GamePhase, GameState, PickupKind, TickInput};
use crate::tuning::Tuning;

/// Sprite for a pickup kind
fn pickup_sprite(kind: PickupKind) -> Sprite {
    match kind {
        PickupKind::Flower(flower) => Sprite::Flower(flower),
        PickupKind::Honeycomb => Sprite::Honeycomb,
        PickupKind::Heart => Sprite::Heart,
        PickupKind::Lightning => Sprite::Lightning,
        PickupKind::Mushroom => Sprite::Mushroom,
    }
}

pub struct Session<P: Platform, S: HighScoreStore> {
    tuning: Tuning,
    platform: P,
    store: S,
    high_score: HighScore,
    state: GameState,
    round: u64,
}

impl<P: Platform, S: HighScoreStore> Session<P, S> {
    /// Load the high score and show the title menu
    pub fn new(tuning: Tuning, mut platform: P, store: S) -> Self {
        let high_score = HighScore::load_from(&store);
        platform.present_menu(&Menu::title(high_score.best()));
        let state = GameState::new(&tuning, tuning.seed, high_score);
        Self {
            tuning,
            platform,
            store,
            high_score,
            state,
            round: 0,
        }
    }

    /// Throw away the current round and start a fresh one
    pub fn new_game(&mut self) {
        self.round += 1;
        let seed = self.tuning.seed.wrapping_add(self.round);
        self.state = GameState::new(&self.tuning, seed, self.high_score);
        self.state.begin_round();
        log::info!("Round {} (seed {})", self.round, seed);
    }

    /// Advance one display frame
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        let input = TickInput {
            tilt: self.platform.sample_tilt(),
        };
        sim::tick(&mut self.state, &input);
        self.flush_events();
        self.render();
    }

    /// Handle a tap on the screen. Returns `true` if a charge was spent.
    pub fn on_tap(&mut self, point: Vec2) -> bool {
        let spent = sim::spend_charge_at(&mut self.state, point);
        if spent {
            self.flush_events();
        }
        spent
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub fn current_score(&self) -> u32 {
        self.state.score
    }

    pub fn current_lives(&self) -> u32 {
        self.state.player.lives
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn flush_events(&mut self) {
        for event in std::mem::take(&mut self.state.events) {
            if let Some(cue) = SoundCue::for_event(&event) {
                self.platform.play_sound(cue);
            }
            match event {
                GameEvent::NewHighScore(score) => {
                    self.high_score = self.state.high_score;
                    log::info!("New high score {}", score);
                    self.high_score.save_to(&mut self.store);
                }
                GameEvent::GameOver { score } => {
                    self.platform.present_menu(&Menu::game_over(score));
                }
                _ => {}
            }
        }
    }

    fn render(&mut self) {
        let state = &self.state;
        let platform = &mut self.platform;

        for (i, particle) in state.particles.iter().enumerate() {
            platform.render_entity(
                Sprite::Particle,
                i as u32,
                particle.pos,
                particle.size,
                particle.alpha,
            );
        }
        for pickup in &state.pickups {
            platform.render_entity(
                pickup_sprite(pickup.kind),
                pickup.id,
                pickup.pos,
                pickup.kind.visual_size(),
                1.0,
            );
        }
        for enemy in &state.enemies {
            platform.render_entity(Sprite::Enemy, enemy.id, enemy.pos, enemy.visual_size(), 1.0);
        }

        let player = &state.player;
        platform.render_entity(
            Sprite::PlayerBody,
            0,
            player.pos,
            player.visual_size(),
            player.body_alpha(),
        );
        if player.attack {
            platform.render_entity(
                Sprite::PlayerCore,
                0,
                player.pos,
                player.visual_size(),
                player.core_alpha(),
            );
        }

        let slot = Vec2::new(CHARGE_SLOT_WIDTH, CHARGE_SLOT_HEIGHT);
        for i in 0..player.charges {
            platform.render_entity(
                Sprite::Charge,
                i,
                GameState::charge_slot_center(i),
                slot.max_element(),
                1.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::HeadlessPlatform;

    fn session(best: u32) -> Session<HeadlessPlatform, MemoryStore> {
        Session::new(
            Tuning::default(),
            HeadlessPlatform::new(1),
            MemoryStore::with_score(best),
        )
    }

    #[test]
    fn test_title_menu_on_construction() {
        let session = session(8);
        assert_eq!(session.platform().menus(), &[Menu::title(8)]);
        assert_eq!(session.high_score(), 8);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_tick_before_new_game_is_noop() {
        let mut session = session(0);
        session.tick();
        assert_eq!(session.state().frame, 0);
        assert_eq!(session.platform().frames(), 0);
    }

    #[test]
    fn test_new_game_resets() {
        let mut session = session(0);
        session.new_game();
        for _ in 0..600 {
            session.tick();
        }
        session.new_game();
        let state = session.state();
        assert!(state.enemies.is_empty());
        assert!(state.pickups.is_empty());
        assert_eq!(session.current_lives(), PLAYER_LIVES);
        assert_eq!(session.current_score(), 0);
        assert_eq!(session.round(), 2);
    }

    #[test]
    fn test_events_drained_each_frame() {
        let mut session = session(0);
        session.new_game();
        for _ in 0..120 {
            session.tick();
            assert!(session.state().events.is_empty());
        }
        assert!(session.platform().sprites_drawn() > 0);
    }

    #[test]
    fn test_failed_save_keeps_running() {
        let mut session = Session::new(
            Tuning::default(),
            HeadlessPlatform::new(1),
            MemoryStore::failing(),
        );
        session.new_game();
        let pos = session.state().player.pos;
        let state = session.state_mut();
        let id = state.next_entity_id();
        state.pickups.push(crate::sim::Pickup {
            id,
            kind: PickupKind::Honeycomb,
            pos,
            born_at: 0,
        });
        session.tick();
        assert_eq!(session.current_score(), 1);
        assert_eq!(session.high_score(), 1);
    }
}
