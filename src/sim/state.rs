//! Game state and core simulation types
//!
//! The session owns one `GameState` per round; every entity lives in one of its
//! collections and is gone once removed from it.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::motion::TiltCalibration;
use super::spawn::Spawners;
use super::timeline::Timeline;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::is_finite_vec;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start menu shown, no round running
    Menu,
    /// Active gameplay
    Playing,
    /// Death sequence finished, round ended
    GameOver,
}

/// The player's bee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub diameter: f32,
    pub lives: u32,
    pub honeycombs_collected: u32,
    /// Held thunderbolt charges (one HUD slot each)
    pub charges: u32,
    pub immune: bool,
    pub attack: bool,
    pub dying: bool,
    pub half_dead: bool,
    pub dead: bool,
    /// Death spiral counter, re-derived from the diameter
    pub age: u32,
    pub fully_grown: u32,
    /// Blink on the body: immunity, then the death fade
    pub body: Option<Timeline>,
    /// Blink on the core: attack mode
    pub core: Option<Timeline>,
}

impl Player {
    pub fn new(pos: Vec2, diameter: f32, lives: u32) -> Self {
        let mut player = Self {
            pos,
            diameter,
            lives,
            honeycombs_collected: 0,
            charges: 0,
            immune: false,
            attack: false,
            dying: false,
            half_dead: false,
            dead: false,
            age: 0,
            fully_grown: 0,
            body: None,
            core: None,
        };
        player.rederive_age();
        player
    }

    /// Collision size
    pub fn visual_size(&self) -> f32 {
        self.diameter
    }

    pub fn body_alpha(&self) -> f32 {
        self.body.as_ref().map_or(1.0, Timeline::alpha)
    }

    pub fn core_alpha(&self) -> f32 {
        self.core.as_ref().map_or(1.0, Timeline::alpha)
    }

    /// Keep the death counter in step with the current size.
    /// Frozen once the death sequence has begun.
    pub fn rederive_age(&mut self) {
        if self.dying {
            return;
        }
        self.age = (self.diameter * AGE_PER_DIAMETER).round() as u32;
        self.fully_grown = self.age;
    }

    pub fn scale_diameter(&mut self, factor: f32) {
        self.diameter = (self.diameter * factor).max(MIN_PLAYER_DIAMETER);
        self.rederive_age();
    }

    pub fn grow(&mut self, amount: f32) {
        self.diameter += amount;
        self.rederive_age();
    }

    /// Not in any stage of the death sequence
    pub fn is_alive(&self) -> bool {
        !self.dying && !self.half_dead && !self.dead
    }
}

/// An enemy bee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Integer-stepped velocity (right, up)
    pub speed: IVec2,
    /// Grows while entering, shrinks while dying
    pub age: u32,
    pub fully_grown: u32,
    pub in_hive: bool,
    pub dying: bool,
    pub dead: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, fully_grown: u32) -> Self {
        Self {
            id,
            pos,
            speed: IVec2::ZERO,
            age: 0,
            fully_grown,
            in_hive: false,
            dying: false,
            dead: false,
        }
    }

    pub fn visual_size(&self) -> f32 {
        BEE_SIZE_PER_AGE * self.age as f32
    }
}

/// Flower variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowerKind {
    /// Attack mode only
    AttackOnly,
    /// Attack mode with the player doubled in size
    Grow,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Flower(FlowerKind),
    Honeycomb,
    Heart,
    Lightning,
    Mushroom,
}

impl PickupKind {
    pub fn visual_size(&self) -> f32 {
        match self {
            PickupKind::Flower(_) => FLOWER_SIZE,
            PickupKind::Honeycomb => HONEYCOMB_SIZE,
            PickupKind::Heart => HEART_SIZE,
            PickupKind::Lightning => LIGHTNING_SIZE,
            PickupKind::Mushroom => MUSHROOM_SIZE,
        }
    }

    /// Game-seconds the pickup stays before expiring
    pub fn lifetime(&self, tuning: &Tuning) -> u32 {
        match self {
            PickupKind::Flower(_) => tuning.flower_lifetime,
            _ => tuning.pickup_lifetime,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    /// Frame it appeared on
    pub born_at: u64,
}

impl Pickup {
    /// Gone once its lifetime in game-seconds has fully elapsed
    pub fn is_expired(&self, frame: u64, tuning: &Tuning) -> bool {
        let lifetime = self.kind.lifetime(tuning) as u64 * FRAMES_PER_SECOND as u64;
        frame.saturating_sub(self.born_at) >= lifetime
    }
}

/// Fading dust particle from a death burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub age_frames: u32,
    pub life_frames: u32,
}

/// Timed modifiers on the enemy speed cap (frame each started)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StunWindows {
    pub buzz_since: Option<u64>,
    pub thunder_since: Option<u64>,
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerHit { lives_left: u32 },
    PlayerDying,
    EnemySpawned { id: u32 },
    EnemyKilled { id: u32 },
    EnemyDied { id: u32, pos: Vec2 },
    PickupSpawned { id: u32, kind: PickupKind },
    PickupExpired { id: u32, kind: PickupKind },
    FlowerCollected(FlowerKind),
    HoneycombCollected { score: u32 },
    NewHighScore(u32),
    HeartCollected { lives: u32 },
    LightningCollected { charges: u32 },
    MushroomCollected,
    ThunderReleased { charges_left: u32 },
    PlayerExploded,
    PlayerDead,
    GameOver { score: u32 },
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Frames simulated this round
    pub frame: u64,
    /// Game-second counter derived from `frame`
    pub t: u32,
    pub calibration: TiltCalibration,
    /// Current enemy speed cap
    pub speed_cap: f32,
    pub stun: StunWindows,
    pub score: u32,
    pub high_score: HighScore,
    pub player: Player,
    /// Live enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Live pickups (spawn order)
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub spawners: Spawners,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh state for a round; starts in `GamePhase::Menu`
    pub fn new(tuning: &Tuning, seed: u64, high_score: HighScore) -> Self {
        let center = Vec2::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0);
        Self {
            tuning: tuning.clone(),
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            frame: 0,
            t: 0,
            calibration: TiltCalibration::default(),
            speed_cap: tuning.base_speed_cap,
            stun: StunWindows::default(),
            score: 0,
            high_score,
            player: Player::new(center, tuning.player_diameter, tuning.player_lives),
            enemies: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            spawners: Spawners::new(&tuning.frequencies),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn begin_round(&mut self) {
        self.phase = GamePhase::Playing;
        log::info!(
            "Round started: arena {}x{}, lives {}",
            self.tuning.arena_width,
            self.tuning.arena_height,
            self.player.lives
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.tuning.arena_width, self.tuning.arena_height)
    }

    /// Centre of HUD slot `index`
    pub fn charge_slot_center(index: u32) -> Vec2 {
        Vec2::new(
            CHARGE_SLOT_ORIGIN_X + index as f32 * CHARGE_SLOT_SPACING,
            CHARGE_SLOT_Y,
        )
    }

    /// Ring of dust particles around `center`
    pub fn spawn_burst(&mut self, center: Vec2) {
        let life_frames = FRAMES_PER_SECOND;
        for i in 0..BURST_PARTICLES {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = (i as f32 / 5.0) * std::f32::consts::PI;
            let size = self.rng.random_range(3..=7) as f32;
            self.particles.push(Particle {
                pos: center + Vec2::new(angle.cos(), angle.sin()) * BURST_RING_RADIUS,
                size,
                alpha: 1.0,
                age_frames: 0,
                life_frames,
            });
        }
    }

    /// Check end-of-frame invariants: assert in debug, repair in release
    pub fn enforce_invariants(&mut self) {
        let player_ok = is_finite_vec(self.player.pos) && self.player.diameter > 0.0;
        let enemies_ok = self.enemies.iter().all(|e| is_finite_vec(e.pos));
        let pickups_ok = self.pickups.iter().all(|p| is_finite_vec(p.pos));
        debug_assert!(player_ok, "player state corrupted: {:?}", self.player);
        debug_assert!(enemies_ok, "enemy collection holds a non-finite position");
        debug_assert!(pickups_ok, "pickup collection holds a non-finite position");

        if !player_ok {
            log::error!("Repairing player state");
            if !is_finite_vec(self.player.pos) {
                self.player.pos = self.arena() / 2.0;
            }
            if !(self.player.diameter > 0.0) {
                self.player.diameter = MIN_PLAYER_DIAMETER;
                self.player.rederive_age();
            }
        }
        if !enemies_ok {
            log::error!("Rebuilding enemy collection");
            self.enemies.clear();
        }
        if !pickups_ok {
            log::error!("Rebuilding pickup collection");
            self.pickups.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, 7, HighScore::new(12));
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.enemies.is_empty());
        assert!(state.pickups.is_empty());
        assert_eq!(state.player.lives, PLAYER_LIVES);
        assert_eq!(state.player.age, 200);
        assert_eq!(state.player.fully_grown, 200);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score.best(), 12);
        assert_eq!(state.speed_cap, BASE_SPEED_CAP);
    }

    #[test]
    fn test_age_frozen_while_dying() {
        let mut player = Player::new(Vec2::ZERO, 20.0, 1);
        player.dying = true;
        player.scale_diameter(0.5);
        assert_eq!(player.diameter, 10.0);
        assert_eq!(player.age, 200);
    }

    #[test]
    fn test_pickup_expiry_window() {
        let tuning = Tuning::default();
        let flower = Pickup {
            id: 1,
            kind: PickupKind::Flower(FlowerKind::AttackOnly),
            pos: Vec2::ZERO,
            born_at: 600,
        };
        assert!(!flower.is_expired(779, &tuning));
        assert!(flower.is_expired(780, &tuning));

        let heart = Pickup {
            kind: PickupKind::Heart,
            ..flower
        };
        assert!(!heart.is_expired(899, &tuning));
        assert!(heart.is_expired(900, &tuning));
    }

    #[test]
    fn test_burst_spawns_ring() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 1, HighScore::default());
        state.spawn_burst(Vec2::new(100.0, 100.0));
        assert_eq!(state.particles.len(), BURST_PARTICLES);
        for p in &state.particles {
            assert!((p.pos.distance(Vec2::new(100.0, 100.0)) - BURST_RING_RADIUS).abs() < 1e-3);
            assert!((3.0..=7.0).contains(&p.size));
        }
    }

    #[test]
    fn test_slot_centers() {
        assert_eq!(GameState::charge_slot_center(0), Vec2::new(20.0, 20.0));
        assert_eq!(GameState::charge_slot_center(2), Vec2::new(80.0, 20.0));
    }
}
