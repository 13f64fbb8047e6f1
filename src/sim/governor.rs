//! Ball speed governor
//!
//! Runs every tick while the ball is in play. It never touches collision
//! response; it only kicks a stalled axis back into motion and asks the
//! physics integrator to bleed off excess speed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Result of one governor pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regulation {
    /// Corrected velocity, if either axis was kicked
    pub velocity: Option<Vec2>,
    pub x_corrected: bool,
    pub y_corrected: bool,
    /// Linear damping the ball should carry from now on
    pub damping: f32,
}

/// Per-tick velocity policy with an injected random source
#[derive(Debug, Clone)]
pub struct BallGovernor<R = Pcg32> {
    speed_factor: f32,
    min_axis_speed: f32,
    max_speed: f32,
    overspeed_damping: f32,
    rng: R,
}

impl BallGovernor<Pcg32> {
    /// Governor with a seeded PCG stream
    pub fn seeded(tuning: &Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> BallGovernor<R> {
    pub fn with_rng(tuning: &Tuning, rng: R) -> Self {
        Self {
            speed_factor: tuning.speed_factor,
            min_axis_speed: tuning.min_axis_speed,
            max_speed: tuning.max_speed,
            overspeed_damping: tuning.overspeed_damping,
            rng,
        }
    }

    /// `+speed_factor` or `-speed_factor` with equal odds
    fn random_direction(&mut self) -> f32 {
        if self.rng.random_bool(0.5) {
            -self.speed_factor
        } else {
            self.speed_factor
        }
    }

    /// Serve impulse: each axis independently gets a random sign
    pub fn launch(&mut self) -> Vec2 {
        let x = self.random_direction();
        let y = self.random_direction();
        Vec2::new(x, y)
    }

    /// Inspect the ball's velocity and decide this tick's corrections.
    ///
    /// A stalled axis (speed at or below the minimum) is replaced by a fresh
    /// random-signed kick; x is drawn before y. Damping is non-zero only while
    /// the speed exceeds the maximum.
    pub fn regulate(&mut self, vel: Vec2) -> Regulation {
        let x_speed = vel.x.abs();
        let y_speed = vel.y.abs();
        let speed = vel.length();

        let mut corrected = vel;
        let x_corrected = x_speed <= self.min_axis_speed;
        if x_corrected {
            corrected.x = self.random_direction();
        }
        let y_corrected = y_speed <= self.min_axis_speed;
        if y_corrected {
            corrected.y = self.random_direction();
        }

        let damping = if speed > self.max_speed {
            self.overspeed_damping
        } else {
            0.0
        };

        Regulation {
            velocity: (x_corrected || y_corrected).then_some(corrected),
            x_corrected,
            y_corrected,
            damping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::{prop_assert, prop_assert_eq, proptest};

    const SEED: u64 = 0xB10C;

    fn governor() -> BallGovernor {
        BallGovernor::seeded(&Tuning::default(), SEED)
    }

    /// Replays the sign draws the governor will make
    fn expected_signs(count: usize) -> Vec<f32> {
        let mut rng = Pcg32::seed_from_u64(SEED);
        (0..count)
            .map(|_| if rng.random_bool(0.5) { -1.0 } else { 1.0 })
            .collect()
    }

    #[test]
    fn test_launch_uses_seeded_signs() {
        let signs = expected_signs(2);
        let vel = governor().launch();
        assert_eq!(vel, Vec2::new(signs[0] * SPEED_FACTOR, signs[1] * SPEED_FACTOR));
    }

    #[test]
    fn test_launch_covers_all_quadrants() {
        let mut gov = governor();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let v = gov.launch();
            assert_eq!(v.x.abs(), SPEED_FACTOR);
            assert_eq!(v.y.abs(), SPEED_FACTOR);
            seen.insert((v.x > 0.0, v.y > 0.0));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_stalled_x_is_kicked() {
        let signs = expected_signs(1);
        let reg = governor().regulate(Vec2::new(2.0, 300.0));
        assert!(reg.x_corrected);
        assert!(!reg.y_corrected);
        let vel = reg.velocity.unwrap();
        assert_eq!(vel.x.abs(), SPEED_FACTOR);
        assert_eq!(vel.x, signs[0] * SPEED_FACTOR);
        assert_eq!(vel.y, 300.0);
    }

    #[test]
    fn test_both_axes_can_fire_together() {
        let reg = governor().regulate(Vec2::ZERO);
        assert!(reg.x_corrected && reg.y_corrected);
        let vel = reg.velocity.unwrap();
        assert_eq!(vel.abs(), Vec2::splat(SPEED_FACTOR));
    }

    #[test]
    fn test_boundary_counts_as_stalled() {
        let reg = governor().regulate(Vec2::new(-MIN_AXIS_SPEED, 200.0));
        assert!(reg.x_corrected);
    }

    #[test]
    fn test_healthy_velocity_untouched() {
        let reg = governor().regulate(Vec2::new(120.0, -150.0));
        assert_eq!(reg.velocity, None);
        assert_eq!(reg.damping, 0.0);
    }

    #[test]
    fn test_overspeed_damping() {
        let mut gov = governor();
        // 270-360 triangle: speed 450
        let reg = gov.regulate(Vec2::new(270.0, 360.0));
        assert_eq!(reg.damping, OVERSPEED_DAMPING);
        // 210-280 triangle: speed 350
        let reg = gov.regulate(Vec2::new(210.0, 280.0));
        assert_eq!(reg.damping, 0.0);
    }

    proptest! {
        #[test]
        fn corrected_axes_leave_with_speed_factor(vx in -500.0f32..500.0, vy in -500.0f32..500.0) {
            let reg = governor().regulate(Vec2::new(vx, vy));
            let vel = reg.velocity.unwrap_or(Vec2::new(vx, vy));
            if reg.x_corrected {
                prop_assert_eq!(vel.x.abs(), SPEED_FACTOR);
            } else {
                prop_assert_eq!(vel.x, vx);
            }
            if reg.y_corrected {
                prop_assert_eq!(vel.y.abs(), SPEED_FACTOR);
            } else {
                prop_assert_eq!(vel.y, vy);
            }
            prop_assert!(reg.damping == 0.0 || reg.damping == OVERSPEED_DAMPING);
        }
    }
}
