//! High score table
//!
//! Lives as long as the process does; restarting a run keeps it, restarting
//! the program does not.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Rows advanced
    pub score: u32,
    /// Seed the run was generated from
    pub seed: u64,
    /// Frames the run lasted
    pub ticks: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether a finished run would make the table
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_some_and(|e| score > e.score))
    }

    /// Record a finished run; returns the rank achieved (1-indexed) or None
    pub fn add_score(&mut self, score: u32, seed: u64, ticks: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // Descending; a tie lands after the earlier run
        let index = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(index, HighScoreEntry { score, seed, ticks });
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Run scored {} (rank {})", score, index + 1);

        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far, 0 when empty
    pub fn top_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}
