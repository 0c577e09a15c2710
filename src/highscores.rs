//! High score tracking
//!
//! Best honeycomb count across rounds. Loaded once at startup and written
//! back through a `HighScoreStore` whenever a round beats it.

use serde::{Deserialize, Serialize};

use crate::persistence::HighScoreStore;

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a score. Returns `true` if it became the new best.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from a store. Failures are not fatal: the best starts at 0.
    pub fn load_from(store: &impl HighScoreStore) -> Self {
        match store.load() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self::new(best)
            }
            Err(e) => {
                log::warn!("Could not load high score, starting fresh: {}", e);
                Self::default()
            }
        }
    }

    /// Write the current best to a store. Returns `false` if the write failed.
    pub fn save_to(&self, store: &mut impl HighScoreStore) -> bool {
        match store.persist(self.best) {
            Ok(()) => {
                log::info!("High score saved ({})", self.best);
                true
            }
            Err(e) => {
                log::error!("Could not save high score {}: {}", self.best, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_only_strictly_higher() {
        let mut high = HighScore::new(10);
        assert!(!high.record(10));
        assert!(!high.record(3));
        assert_eq!(high.best(), 10);
        assert!(high.record(11));
        assert_eq!(high.best(), 11);
    }

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!HighScore::default().qualifies(0));
        assert!(HighScore::default().qualifies(1));
    }

    #[test]
    fn test_load_failure_defaults() {
        let high = HighScore::load_from(&MemoryStore::failing());
        assert_eq!(high.best(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let mut store = MemoryStore::default();
        assert!(HighScore::new(5).save_to(&mut store));
        assert_eq!(HighScore::load_from(&store).best(), 5);
        assert!(!HighScore::new(5).save_to(&mut MemoryStore::failing()));
    }
}
