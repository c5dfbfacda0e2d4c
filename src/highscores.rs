//! High score persistence
//!
//! A single best-score value, loaded once at startup. The simulation only
//! compares against it and signals; the host owning this value performs the
//! write-through when a run ends above the stored best.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted best score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Default file name next to the executable
    pub const FILE_NAME: &'static str = "highscore.json";

    /// Load the stored best, falling back to zero if the file is missing or
    /// unreadable. A corrupt score file is never fatal.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(scores) => scores,
                Err(err) => {
                    log::warn!("Ignoring malformed high score file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No high score file at {}, starting fresh", path.display());
                Self::default()
            }
        }
    }

    /// Persist the current best
    pub fn save(&self, path: &Path) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::error!("Failed to save high score to {}: {err}", path.display());
                } else {
                    log::info!("High score saved ({})", self.best);
                }
            }
            Err(err) => log::error!("Failed to serialize high score: {err}"),
        }
    }

    /// Whether a finished run's score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && score > self.best
    }

    /// Record a score if it qualifies. Returns true when the best changed.
    pub fn record(&mut self, score: u64) -> bool {
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }
}
