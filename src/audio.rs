//! Sound cue catalogue
//!
//! Playback belongs to the platform; the game only names the cue to play.

use crate::sim::{FlowerKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player stung by an enemy
    PlayerHit,
    /// Last life lost, player starts falling
    PlayerFall,
    /// Enemy knocked out in attack mode
    EnemyKnockout,
    /// Enemy hit the floor
    EnemyCrash,
    /// Player hit the floor
    PlayerCrash,
    /// Flower collected
    FlowerPowerup,
    /// Honeycomb collected
    Coin,
    /// Heart collected
    ExtraLife,
    /// Lightning collected or thunder released
    Thunder,
    /// Mushroom collected
    Shrink,
}

impl SoundCue {
    /// Stable identifier handed to the platform
    pub fn id(&self) -> &'static str {
        match self {
            SoundCue::PlayerHit => "player_hit",
            SoundCue::PlayerFall => "player_fall",
            SoundCue::EnemyKnockout => "enemy_knockout",
            SoundCue::EnemyCrash => "enemy_crash",
            SoundCue::PlayerCrash => "player_crash",
            SoundCue::FlowerPowerup => "flower_powerup",
            SoundCue::Coin => "coin",
            SoundCue::ExtraLife => "extra_life",
            SoundCue::Thunder => "thunder",
            SoundCue::Shrink => "shrink",
        }
    }

    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerHit { .. } => Some(SoundCue::PlayerHit),
            GameEvent::PlayerDying => Some(SoundCue::PlayerFall),
            GameEvent::EnemyKilled { .. } => Some(SoundCue::EnemyKnockout),
            GameEvent::EnemyDied { .. } => Some(SoundCue::EnemyCrash),
            GameEvent::PlayerExploded => Some(SoundCue::PlayerCrash),
            GameEvent::FlowerCollected(FlowerKind::AttackOnly | FlowerKind::Grow) => {
                Some(SoundCue::FlowerPowerup)
            }
            GameEvent::HoneycombCollected { .. } => Some(SoundCue::Coin),
            GameEvent::HeartCollected { .. } => Some(SoundCue::ExtraLife),
            GameEvent::LightningCollected { .. } | GameEvent::ThunderReleased { .. } => {
                Some(SoundCue::Thunder)
            }
            GameEvent::MushroomCollected => Some(SoundCue::Shrink),
            GameEvent::EnemySpawned { .. }
            | GameEvent::PickupSpawned { .. }
            | GameEvent::PickupExpired { .. }
            | GameEvent::NewHighScore(_)
            | GameEvent::PlayerDead
            | GameEvent::GameOver { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_events() {
        assert_eq!(SoundCue::for_event(&GameEvent::PlayerDead), None);
        assert_eq!(SoundCue::for_event(&GameEvent::NewHighScore(4)), None);
    }

    #[test]
    fn test_event_cues() {
        assert_eq!(
            SoundCue::for_event(&GameEvent::HoneycombCollected { score: 1 }),
            Some(SoundCue::Coin)
        );
        assert_eq!(
            SoundCue::for_event(&GameEvent::ThunderReleased { charges_left: 0 }),
            Some(SoundCue::Thunder)
        );
        assert_eq!(SoundCue::Coin.id(), "coin");
    }
}
