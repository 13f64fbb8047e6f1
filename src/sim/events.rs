//! Outbound notifications for the presentation layer
//!
//! The core never holds the scene. It emits one-way events into a sink the
//! host provides; the host mutates nodes, plays audio, and so on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{BlockId, RoundPhase};
use crate::audio::SoundEffect;

/// Center-screen message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Banner {
    TapToPlay,
    YouWon,
    GameOver,
    Hidden,
}

/// Scene mutation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    PhaseChanged(RoundPhase),
    ScoreChanged(u32),
    /// Lives display refilled for a new round
    LivesChanged(u32),
    LifeLost { remaining: u32 },
    /// A fresh ball was placed on the paddle
    BallReposition { ball_id: u32, position: Vec2 },
    BlockDestroyed(BlockId),
    /// Serve impulse
    Launch(Vec2),
    VelocityCorrection(Vec2),
    DampingChanged(f32),
    PaddleMoved(f32),
    Prompt(Banner),
    Sound(SoundEffect),
}

/// Receiver for scene events
pub trait SceneSink {
    fn emit(&mut self, event: SceneEvent);
}

impl SceneSink for Vec<SceneEvent> {
    fn emit(&mut self, event: SceneEvent) {
        self.push(event);
    }
}

/// Discards everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SceneSink for NullSink {
    fn emit(&mut self, _event: SceneEvent) {}
}
