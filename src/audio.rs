//! Sound cues
//!
//! The host owns playback. The core only decides which cue accompanies a
//! collision or round change, and only when sounds are switched on.

use serde::{Deserialize, Serialize};

use crate::sim::CollisionEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits border
    WallHit,
    /// Block breaks
    BlockBreak,
    /// Ball fell past the paddle
    LifeLost,
    /// Ball served
    Launch,
    /// Every block cleared
    RoundWon,
    /// Out of lives
    GameOver,
    /// Paddle scraped the border
    PaddleWall,
}

impl SoundEffect {
    /// Cue that accompanies a classified contact
    pub fn for_collision(event: CollisionEvent) -> Option<Self> {
        match event {
            CollisionEvent::Paddle => Some(SoundEffect::PaddleHit),
            CollisionEvent::Wall => Some(SoundEffect::WallHit),
            CollisionEvent::Block(_) => Some(SoundEffect::BlockBreak),
            CollisionEvent::Floor => Some(SoundEffect::LifeLost),
            CollisionEvent::Unrecognized => None,
        }
    }
}

/// Gate between the round logic and the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCues {
    enabled: bool,
}

impl AudioCues {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// The cue to emit, if sounds are on
    pub fn cue(&self, effect: SoundEffect) -> Option<SoundEffect> {
        self.enabled.then_some(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BlockId;

    #[test]
    fn test_collision_cues() {
        assert_eq!(
            SoundEffect::for_collision(CollisionEvent::Block(BlockId(3))),
            Some(SoundEffect::BlockBreak)
        );
        assert_eq!(SoundEffect::for_collision(CollisionEvent::Unrecognized), None);
    }

    #[test]
    fn test_muted_cues_are_dropped() {
        assert_eq!(AudioCues::new(false).cue(SoundEffect::WallHit), None);
        assert_eq!(
            AudioCues::new(true).cue(SoundEffect::WallHit),
            Some(SoundEffect::WallHit)
        );
    }
}
