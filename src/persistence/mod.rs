//! High score persistence
//!
//! A single number survives between sessions. Backends:
//! - `FileStore`: small JSON file next to the binary (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//! - `MemoryStore`: in-process, for tests and headless runs

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default save file name for the native build
pub const DEFAULT_SAVE_FILE: &str = ".beehive_highscore";

/// Errors from a high score backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed high score record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct Record {
    high_score: u32,
}

/// Somewhere the best score can be kept between sessions
pub trait HighScoreStore {
    /// Read the stored high score; a store that was never written yields 0
    fn load(&self) -> Result<u32, StorageError>;

    /// Replace the stored high score
    fn persist(&mut self, score: u32) -> Result<(), StorageError>;
}

/// JSON file backend
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_FILE)
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u32, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: Record = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn persist(&mut self, score: u32) -> Result<(), StorageError> {
        let json = serde_json::to_string(&Record { high_score: score })?;
        fs::write(&self.path, json)?;
        log::debug!("High score {} written to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u32>,
    writes: usize,
    failing: bool,
}

impl MemoryStore {
    /// Store pre-loaded with a high score
    pub fn with_score(score: u32) -> Self {
        Self {
            score: Some(score),
            ..Self::default()
        }
    }

    /// Store whose every operation fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Last persisted value, if any
    pub fn stored(&self) -> Option<u32> {
        self.score
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        Ok(self.score.unwrap_or(0))
    }

    fn persist(&mut self, score: u32) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        self.score = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// Browser LocalStorage backend
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "beehive_highscore";

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("no LocalStorage".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u32, StorageError> {
        let item = Self::storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?;
        match item {
            Some(json) => Ok(serde_json::from_str::<Record>(&json)?.high_score),
            None => Ok(0),
        }
    }

    fn persist(&mut self, score: u32) -> Result<(), StorageError> {
        let json = serde_json::to_string(&Record { high_score: score })?;
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("beehive-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.persist(42).unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), 42);
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"high_score":42}"#);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::with_score(7);
        assert_eq!(store.load().unwrap(), 7);
        store.persist(9).unwrap();
        assert_eq!(store.stored(), Some(9));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_failing_store() {
        let mut store = MemoryStore::failing();
        assert!(store.load().is_err());
        assert!(store.persist(1).is_err());
        assert_eq!(store.writes(), 0);
    }
}
