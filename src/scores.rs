//! Session score table
//!
//! Tracks the top runs of the current session, in memory only. Scores are not
//! persisted anywhere - they die with the process.

use serde::Serialize;

/// Maximum number of entries to keep
pub const MAX_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    /// Final score
    pub score: u32,
    /// Gems collected during the run
    pub gems: u32,
    /// Run length in ticks
    pub ticks: u64,
}

/// Session leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionScores {
    pub entries: Vec<ScoreEntry>,
}

impl SessionScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the table
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None if
    /// the score didn't qualify.
    pub fn record(&mut self, score: u32, gems: u32, ticks: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry { score, gems, ticks };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score of the session (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
