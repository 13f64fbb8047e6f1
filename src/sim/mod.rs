//! Deterministic round logic
//!
//! Everything between the engine's raw callbacks and the scene. This module
//! must stay pure and deterministic:
//! - Seeded RNG only
//! - Single-threaded, frame-driven entry points
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod governor;
pub mod progression;
pub mod round;
pub mod session;
pub mod state;

pub use collision::{BodyCategory, CollisionEvent, canonical_pair, classify, is_paddle_wall};
pub use events::{Banner, NullSink, SceneEvent, SceneSink};
pub use governor::{BallGovernor, Regulation};
pub use progression::{Outcome, ProgressionCounters, ProgressionTracker};
pub use round::{PhaseActions, RoundState, Transition, is_valid_transition};
pub use session::{SessionController, TickInput};
pub use state::{Ball, Block, BlockId, BlockKind, Paddle, Playfield, RoundPhase, block_grid};
