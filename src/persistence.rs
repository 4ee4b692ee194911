#![warn(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

// Fallback high score location when no user data directory is available
const HIGH_SCORE_FILE_PATH: &str = "highscore.toml";

/// Where the best score survives between sessions.
pub trait HighScoreStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError>;
    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// Keeps the high score in a small TOML file.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the per-user data directory, or `configured` when given.
    #[must_use]
    pub fn from_config(configured: Option<&Path>) -> Self {
        match configured {
            Some(path) => Self::new(path),
            None => Self::new(default_high_score_path()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let contents = fs::read_to_string(&self.path)?;
        let file: HighScoreFile = toml::from_str(&contents)?;
        Ok(file.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = toml::to_string(&HighScoreFile { high_score: score })?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-process store with no backing file, for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    high_score: u32,
    pub saves: usize,
    // Simulates unavailable storage when set
    pub fail: bool,
}

impl MemoryHighScoreStore {
    #[must_use]
    pub fn with_score(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stored(&self) -> u32 {
        self.high_score
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Unavailable);
        }
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Unavailable);
        }
        self.high_score = score;
        self.saves += 1;
        Ok(())
    }
}

fn default_high_score_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("pastelpop").join("highscore.toml")
    } else {
        PathBuf::from(HIGH_SCORE_FILE_PATH)
    }
}
