//! Breakout core - round progression and ball governance for a brick breaker
//!
//! Rendering, input capture and rigid-body physics belong to the host engine.
//! This crate decides what the engine's raw ticks and contacts mean.
//!
//! Core modules:
//! - `sim`: Deterministic round logic (classification, governor, state machine)
//! - `settings`: Player preferences passed in at session start
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cues emitted alongside collisions
//! - `highscores`: Best rounds of the current session

pub mod audio;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{InvalidTransition, SettingsError, TuningError};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (points)
    pub const PLAYFIELD_WIDTH: f32 = 320.0;
    pub const PLAYFIELD_HEIGHT: f32 = 568.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    /// Paddle rests at this fraction of the playfield height
    pub const PADDLE_Y_FRACTION: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;

    /// Impulse magnitude per axis for launch and stall correction
    pub const SPEED_FACTOR: f32 = 3.0;
    /// An axis at or below this speed counts as stalled
    pub const MIN_AXIS_SPEED: f32 = 10.0;
    /// Above this speed the ball is damped
    pub const MAX_SPEED: f32 = 400.0;
    /// Linear damping applied while over `MAX_SPEED`
    pub const OVERSPEED_DAMPING: f32 = 0.4;

    /// Round defaults
    pub const INITIAL_LIVES: u32 = 3;
    pub const BLOCK_COLUMNS: u32 = 12;
    pub const BLOCK_ROWS: u32 = 7;
    pub const BLOCK_WIDTH: f32 = 24.0;
    pub const BLOCK_HEIGHT: f32 = 12.0;
    /// Top row sits at this fraction of the playfield height
    pub const BLOCK_TOP_FRACTION: f32 = 0.85;

    /// Accelerometer input
    pub const TILT_THRESHOLD: f32 = 0.2;
    pub const TILT_GAIN: f32 = 40.0;
}
