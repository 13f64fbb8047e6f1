//! Data-driven game balance
//!
//! Defaults match `consts`. A host may ship a JSON override; absent fields
//! keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Largest grid a round may lay out
pub const MAX_BLOCKS: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-axis impulse for launch and stall correction
    pub speed_factor: f32,
    /// Axis speed at or below which a correction fires
    pub min_axis_speed: f32,
    /// Speed above which damping kicks in
    pub max_speed: f32,
    /// Damping used while over `max_speed`
    pub overspeed_damping: f32,
    pub initial_lives: u32,
    pub block_columns: u32,
    pub block_rows: u32,
    /// Minimum |accel.x| before tilt moves the paddle
    pub tilt_threshold: f32,
    /// Paddle travel per unit of accel.y
    pub tilt_gain: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed_factor: SPEED_FACTOR,
            min_axis_speed: MIN_AXIS_SPEED,
            max_speed: MAX_SPEED,
            overspeed_damping: OVERSPEED_DAMPING,
            initial_lives: INITIAL_LIVES,
            block_columns: BLOCK_COLUMNS,
            block_rows: BLOCK_ROWS,
            tilt_threshold: TILT_THRESHOLD,
            tilt_gain: TILT_GAIN,
        }
    }
}

impl Tuning {
    /// Blocks laid out at round start, `None` on overflow
    pub fn block_count(&self) -> Option<u32> {
        self.block_columns.checked_mul(self.block_rows)
    }

    /// Decode and validate a tuning override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            self.speed_factor,
            self.min_axis_speed,
            self.max_speed,
            self.overspeed_damping,
            self.tilt_threshold,
            self.tilt_gain,
        ];
        if !floats.iter().all(|v| v.is_finite()) {
            return Err(TuningError::Invalid("tuning values must be finite"));
        }
        if self.speed_factor <= 0.0 {
            return Err(TuningError::Invalid("speed_factor must be positive"));
        }
        if self.min_axis_speed < 0.0 {
            return Err(TuningError::Invalid("min_axis_speed must not be negative"));
        }
        if self.max_speed <= self.min_axis_speed {
            return Err(TuningError::Invalid("max_speed must exceed min_axis_speed"));
        }
        if self.overspeed_damping <= 0.0 {
            return Err(TuningError::Invalid("overspeed_damping must be positive"));
        }
        match self.block_count() {
            Some(0) => return Err(TuningError::Invalid("block grid is empty")),
            Some(count) if count <= MAX_BLOCKS => {}
            _ => return Err(TuningError::Invalid("block grid is too large")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.block_count(), Some(84));
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_override_keeps_other_defaults() {
        let tuning = Tuning::from_json(r#"{"initial_lives": 5, "block_rows": 2}"#).unwrap();
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.block_count(), Some(24));
        assert_eq!(tuning.max_speed, MAX_SPEED);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let err = Tuning::from_json(r#"{"block_columns": 0}"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let err = Tuning::from_json(r#"{"block_columns": 70000, "block_rows": 70000}"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let tuning = Tuning {
            block_columns: MAX_BLOCKS + 1,
            block_rows: 1,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let broken = [
            Tuning { min_axis_speed: f32::NAN, ..Default::default() },
            Tuning { speed_factor: f32::INFINITY, ..Default::default() },
            Tuning { max_speed: f32::NAN, ..Default::default() },
            Tuning { overspeed_damping: f32::NAN, ..Default::default() },
            Tuning { tilt_threshold: f32::NAN, ..Default::default() },
            Tuning { tilt_gain: f32::NEG_INFINITY, ..Default::default() },
        ];
        for tuning in broken {
            assert!(tuning.validate().is_err(), "{tuning:?}");
        }
    }

    #[test]
    fn test_rejects_zero_damping() {
        let tuning = Tuning {
            overspeed_damping: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
