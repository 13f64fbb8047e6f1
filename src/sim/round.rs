//! Round state machine
//!
//! A closed set of phases with a fixed transition table. Phase-specific work
//! (banners, resting the ball, launching, governing) is delegated through
//! `PhaseActions`, so the machine never holds the session that owns it.

use super::events::Banner;
use super::state::RoundPhase;
use crate::error::InvalidTransition;

/// Side effects the machine asks its owner to perform
pub trait PhaseActions {
    /// Called after the phase changes, before entry actions
    fn phase_changed(&mut self, phase: RoundPhase);
    fn show_banner(&mut self, banner: Banner);
    /// Recreate the ball resting on the paddle
    fn rest_ball_on_paddle(&mut self);
    /// Apply the serve impulse
    fn launch_ball(&mut self);
    /// Run the speed governor for this tick
    fn regulate_ball(&mut self, dt: f32);
}

/// Whether `from -> to` is in the transition table
pub fn is_valid_transition(from: RoundPhase, to: RoundPhase) -> bool {
    use RoundPhase::*;
    matches!(
        (from, to),
        (AwaitingFirstTouch, Playing)
            | (AwaitingServe, Playing)
            | (Playing, AwaitingServe)
            | (Playing, RoundOver { .. })
            | (RoundOver { .. }, AwaitingFirstTouch)
    )
}

/// A completed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: RoundPhase,
    pub to: RoundPhase,
}

#[derive(Debug, Clone)]
pub struct RoundState {
    phase: RoundPhase,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    /// Machine parked in `AwaitingFirstTouch`; call `begin` to run its entry
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::AwaitingFirstTouch,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn can_enter(&self, to: RoundPhase) -> bool {
        is_valid_transition(self.phase, to)
    }

    /// Run the entry actions of the initial phase
    pub fn begin(&mut self, actions: &mut impl PhaseActions) {
        actions.phase_changed(self.phase);
        Self::on_enter(None, self.phase, actions);
    }

    /// Move to `to`, running exit actions of the old phase and entry actions
    /// of the new one. The phase is left untouched on error.
    pub fn enter(
        &mut self,
        to: RoundPhase,
        actions: &mut impl PhaseActions,
    ) -> Result<Transition, InvalidTransition> {
        let from = self.phase;
        if !is_valid_transition(from, to) {
            return Err(InvalidTransition { from, to });
        }

        Self::on_exit(from, to, actions);
        self.phase = to;
        log::debug!("Round phase {:?} -> {:?}", from, to);
        actions.phase_changed(to);
        Self::on_enter(Some(from), to, actions);

        Ok(Transition { from, to })
    }

    /// Per-tick action of the current phase
    pub fn update(&mut self, dt: f32, actions: &mut impl PhaseActions) {
        match self.phase {
            RoundPhase::AwaitingFirstTouch | RoundPhase::AwaitingServe => {
                actions.rest_ball_on_paddle();
            }
            RoundPhase::Playing => actions.regulate_ball(dt),
            RoundPhase::RoundOver { .. } => {}
        }
    }

    fn on_exit(from: RoundPhase, to: RoundPhase, actions: &mut impl PhaseActions) {
        if from == RoundPhase::AwaitingFirstTouch && to == RoundPhase::Playing {
            actions.show_banner(Banner::Hidden);
        }
    }

    fn on_enter(from: Option<RoundPhase>, to: RoundPhase, actions: &mut impl PhaseActions) {
        match to {
            RoundPhase::AwaitingFirstTouch => {
                actions.show_banner(Banner::TapToPlay);
                actions.rest_ball_on_paddle();
            }
            RoundPhase::AwaitingServe => actions.rest_ball_on_paddle(),
            RoundPhase::Playing => {
                if matches!(
                    from,
                    Some(RoundPhase::AwaitingServe | RoundPhase::AwaitingFirstTouch)
                ) {
                    actions.launch_ball();
                }
            }
            RoundPhase::RoundOver { won } => {
                actions.show_banner(if won { Banner::YouWon } else { Banner::GameOver });
                actions.rest_ball_on_paddle();
            }
        }
    }
}
