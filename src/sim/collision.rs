//! Contact classification
//!
//! The physics engine reports that two bodies began touching, tagged only by
//! category. This turns that pair into something the round cares about.

use serde::{Deserialize, Serialize};

use super::state::BlockId;

/// Physics body categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    Ball,
    Floor,
    Block,
    Paddle,
    Wall,
}

impl BodyCategory {
    pub const ALL: [BodyCategory; 5] = [
        BodyCategory::Ball,
        BodyCategory::Floor,
        BodyCategory::Block,
        BodyCategory::Paddle,
        BodyCategory::Wall,
    ];

    /// Category bitmask; also the canonical ordering (ball lowest)
    pub fn bitmask(self) -> u32 {
        match self {
            BodyCategory::Ball => 1 << 0,
            BodyCategory::Floor => 1 << 1,
            BodyCategory::Block => 1 << 2,
            BodyCategory::Paddle => 1 << 3,
            BodyCategory::Wall => 1 << 4,
        }
    }
}

/// Game meaning of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    Floor,
    Wall,
    Block(BlockId),
    Paddle,
    Unrecognized,
}

/// Order a pair so the lower bitmask comes first
#[inline]
pub fn canonical_pair(a: BodyCategory, b: BodyCategory) -> (BodyCategory, BodyCategory) {
    if a.bitmask() <= b.bitmask() { (a, b) } else { (b, a) }
}

/// Classify a contact between two bodies.
///
/// Argument order does not matter. Only pairs involving exactly one ball are
/// recognized; a block contact without a block reference is unrecognized.
pub fn classify(a: BodyCategory, b: BodyCategory, block: Option<BlockId>) -> CollisionEvent {
    let (first, second) = canonical_pair(a, b);
    if first != BodyCategory::Ball {
        return CollisionEvent::Unrecognized;
    }

    match second {
        BodyCategory::Floor => CollisionEvent::Floor,
        BodyCategory::Wall => CollisionEvent::Wall,
        BodyCategory::Paddle => CollisionEvent::Paddle,
        BodyCategory::Block => match block {
            Some(id) => CollisionEvent::Block(id),
            None => {
                log::warn!("Ball-block contact without a block reference");
                CollisionEvent::Unrecognized
            }
        },
        BodyCategory::Ball => CollisionEvent::Unrecognized,
    }
}

/// Paddle brushing the border; feedback only, never progression
#[inline]
pub fn is_paddle_wall(a: BodyCategory, b: BodyCategory) -> bool {
    canonical_pair(a, b) == (BodyCategory::Paddle, BodyCategory::Wall)
}
