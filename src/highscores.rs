//! Best rounds of the current session
//!
//! Held in memory only; nothing survives the process.

use serde::{Deserialize, Serialize};

/// Maximum number of rounds to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Blocks destroyed
    pub score: u32,
    /// Cleared every block
    pub won: bool,
    /// 1-based round number within the session
    pub round: u32,
}

/// Session leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    rounds_played: u32,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds finished this session, ranked or not
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished round.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn record_round(&mut self, score: u32, won: bool) -> Option<usize> {
        self.rounds_played += 1;
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            won,
            round: self.rounds_played,
        };

        // Ties keep the earlier round ahead
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

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_not_ranked() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record_round(0, false), None);
        assert!(scores.is_empty());
        assert_eq!(scores.rounds_played(), 1);
    }

    #[test]
    fn test_ranking_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record_round(10, false), Some(1));
        assert_eq!(scores.record_round(84, true), Some(1));
        assert_eq!(scores.record_round(10, false), Some(3));
        assert_eq!(scores.top_score(), Some(84));
        assert_eq!(scores.entries[0].round, 2);
        assert_eq!(scores.entries[1].round, 1);
    }

    #[test]
    fn test_capacity() {
        let mut scores = HighScores::new();
        for s in 1..=(MAX_HIGH_SCORES as u32 + 5) {
            scores.record_round(s, false);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(1));
        assert_eq!(scores.top_score(), Some(MAX_HIGH_SCORES as u32 + 5));
    }
}
