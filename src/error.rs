//! Error taxonomy
//!
//! Nothing here reaches the player. Phase-invalid requests from input are
//! silently ignored by the session; these types surface only to developers.

use thiserror::Error;

use crate::sim::RoundPhase;

/// A round-state transition outside the allowed table
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid round transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: RoundPhase,
    pub to: RoundPhase,
}

/// Settings could not be decoded
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tuning could not be decoded or holds unusable values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}
