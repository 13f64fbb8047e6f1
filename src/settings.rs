//! Player preferences
//!
//! Produced and persisted by the host; the core only reads them, once, at
//! session start.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Input mode for the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleControl {
    /// Finger drags the paddle
    #[default]
    Touch,
    /// Device tilt steers the paddle
    Accelerometer,
}

impl PaddleControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleControl::Touch => "Touch",
            PaddleControl::Accelerometer => "Accelerometer",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Steer the paddle by tilting the device instead of dragging
    pub use_accelerometer: bool,
    /// Gates sound cues only, never round logic
    pub sounds_on: bool,
    /// Emit a cue when the paddle touches the border
    pub paddle_wall_feedback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_accelerometer: false,
            sounds_on: true,
            paddle_wall_feedback: false,
        }
    }
}

impl Settings {
    /// Current paddle input mode
    pub fn paddle_control(&self) -> PaddleControl {
        if self.use_accelerometer {
            PaddleControl::Accelerometer
        } else {
            PaddleControl::Touch
        }
    }

    /// Decode settings handed over by the host. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!(
            "Settings loaded (paddle: {}, sounds: {})",
            settings.paddle_control().as_str(),
            settings.sounds_on
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }
}
