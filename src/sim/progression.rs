//! Lives, score and the block ledger for one round

use serde::{Deserialize, Serialize};

use super::collision::CollisionEvent;
use super::state::{Block, BlockId, Playfield, RoundPhase, block_grid};
use crate::tuning::Tuning;

/// What a collision did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    NoChange,
    BlockDestroyed(BlockId),
    LifeLost,
    RoundWon,
    RoundLost,
}

impl Outcome {
    /// Phase the round must move to, if any
    pub fn next_phase(self) -> Option<RoundPhase> {
        match self {
            Outcome::RoundWon => Some(RoundPhase::RoundOver { won: true }),
            Outcome::RoundLost => Some(RoundPhase::RoundOver { won: false }),
            Outcome::LifeLost => Some(RoundPhase::AwaitingServe),
            Outcome::NoChange | Outcome::BlockDestroyed(_) => None,
        }
    }
}

/// Round counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionCounters {
    pub lives: u32,
    pub score: u32,
    pub remaining_blocks: u32,
}

/// Owns the counters and the block grid of the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionTracker {
    counters: ProgressionCounters,
    blocks: Vec<Block>,
}

impl ProgressionTracker {
    /// Fresh round: full lives, zero score, full grid
    pub fn new(tuning: &Tuning, field: &Playfield) -> Self {
        Self::with_blocks(
            tuning.initial_lives,
            block_grid(field, tuning.block_columns, tuning.block_rows),
        )
    }

    pub fn with_blocks(lives: u32, blocks: Vec<Block>) -> Self {
        let remaining_blocks = blocks.iter().filter(|b| b.alive).count() as u32;
        Self {
            counters: ProgressionCounters {
                lives,
                score: 0,
                remaining_blocks,
            },
            blocks,
        }
    }

    pub fn counters(&self) -> ProgressionCounters {
        self.counters
    }

    pub fn lives(&self) -> u32 {
        self.counters.lives
    }

    pub fn score(&self) -> u32 {
        self.counters.score
    }

    pub fn remaining_blocks(&self) -> u32 {
        self.counters.remaining_blocks
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Apply one recognized contact made while playing
    pub fn apply_collision(&mut self, event: CollisionEvent) -> Outcome {
        match event {
            CollisionEvent::Floor => {
                self.counters.lives = self.counters.lives.saturating_sub(1);
                if self.counters.lives == 0 {
                    Outcome::RoundLost
                } else {
                    Outcome::LifeLost
                }
            }
            CollisionEvent::Block(id) => self.destroy_block(id),
            CollisionEvent::Paddle | CollisionEvent::Wall | CollisionEvent::Unrecognized => {
                Outcome::NoChange
            }
        }
    }

    fn destroy_block(&mut self, id: BlockId) -> Outcome {
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            log::warn!("Contact with unknown block {:?}", id);
            return Outcome::NoChange;
        };
        if !block.alive {
            return Outcome::NoChange;
        }

        block.alive = false;
        self.counters.score += 1;
        self.counters.remaining_blocks = self.counters.remaining_blocks.saturating_sub(1);
        log::debug!(
            "Block ({}, {}) destroyed, {} left",
            block.column,
            block.row,
            self.counters.remaining_blocks
        );

        if self.counters.remaining_blocks == 0 {
            Outcome::RoundWon
        } else {
            Outcome::BlockDestroyed(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(lives: u32, columns: u32, rows: u32) -> ProgressionTracker {
        let tuning = Tuning {
            initial_lives: lives,
            block_columns: columns,
            block_rows: rows,
            ..Default::default()
        };
        ProgressionTracker::new(&tuning, &Playfield::default())
    }

    #[test]
    fn test_last_life_loses_round() {
        let mut t = tracker(1, 12, 7);
        assert_eq!(t.apply_collision(CollisionEvent::Floor), Outcome::RoundLost);
        assert_eq!(t.lives(), 0);
    }

    #[test]
    fn test_floor_with_lives_left() {
        let mut t = tracker(2, 12, 7);
        let outcome = t.apply_collision(CollisionEvent::Floor);
        assert_eq!(outcome, Outcome::LifeLost);
        assert_eq!(t.lives(), 1);
        assert_eq!(outcome.next_phase(), Some(RoundPhase::AwaitingServe));
    }

    #[test]
    fn test_floor_at_zero_lives_stays_lost() {
        let mut t = tracker(0, 1, 1);
        assert_eq!(t.apply_collision(CollisionEvent::Floor), Outcome::RoundLost);
        assert_eq!(t.lives(), 0);
    }

    #[test]
    fn test_last_block_wins_round() {
        let mut t = tracker(3, 1, 1);
        let outcome = t.apply_collision(CollisionEvent::Block(BlockId(0)));
        assert_eq!(outcome, Outcome::RoundWon);
        assert_eq!(t.remaining_blocks(), 0);
        assert_eq!(t.score(), 1);
        assert_eq!(outcome.next_phase(), Some(RoundPhase::RoundOver { won: true }));
    }

    #[test]
    fn test_block_never_double_counted() {
        let mut t = tracker(3, 2, 1);
        assert_eq!(
            t.apply_collision(CollisionEvent::Block(BlockId(1))),
            Outcome::BlockDestroyed(BlockId(1))
        );
        assert_eq!(t.apply_collision(CollisionEvent::Block(BlockId(1))), Outcome::NoChange);
        assert_eq!(t.score(), 1);
        assert_eq!(t.remaining_blocks(), 1);
        assert!(!t.block(BlockId(1)).unwrap().alive);
    }

    #[test]
    fn test_unknown_block_ignored() {
        let mut t = tracker(3, 2, 1);
        assert_eq!(t.apply_collision(CollisionEvent::Block(BlockId(99))), Outcome::NoChange);
        assert_eq!(t.remaining_blocks(), 2);
    }

    #[test]
    fn test_feedback_only_contacts() {
        let mut t = tracker(3, 2, 2);
        let before = t.counters();
        for event in [
            CollisionEvent::Paddle,
            CollisionEvent::Wall,
            CollisionEvent::Unrecognized,
        ] {
            assert_eq!(t.apply_collision(event), Outcome::NoChange);
            assert_eq!(Outcome::NoChange.next_phase(), None);
        }
        assert_eq!(t.counters(), before);
    }
}
