//! Breakout headless driver
//!
//! Plays rounds against a scripted contact source instead of a physics
//! engine, logging what the core decides. Useful for eyeballing tuning.
//!
//! Usage: `breakout [seed] [tuning.json]`

use std::process::ExitCode;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use breakout_core::sim::{
    BlockId, BodyCategory, NullSink, Outcome, RoundPhase, SessionController, TickInput,
};
use breakout_core::{Settings, Tuning};

/// Frame time of the scripted engine (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames before the driver gives up on a round
const MAX_FRAMES: u32 = 60 * 60 * 10;
const ROUNDS: u32 = 3;

type Contact = (BodyCategory, BodyCategory, Option<BlockId>);

/// Stand-in for the physics engine: random contacts and a drifting velocity
struct ScriptedEngine {
    rng: Pcg32,
    velocity: Vec2,
}

impl ScriptedEngine {
    fn new(seed: u64) -> Self {
        Self {
            // Separate stream from the session's governor
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            velocity: Vec2::ZERO,
        }
    }

    /// Contacts produced this frame
    fn contacts(&mut self, alive: &[BlockId]) -> Vec<Contact> {
        let roll: u32 = self.rng.random_range(0..100);
        let contact = match roll {
            0..=5 if !alive.is_empty() => {
                let id = alive[self.rng.random_range(0..alive.len())];
                (BodyCategory::Block, BodyCategory::Ball, Some(id))
            }
            6..=8 => {
                self.velocity.x = -self.velocity.x * 1.1;
                (BodyCategory::Ball, BodyCategory::Wall, None)
            }
            9..=10 => {
                self.velocity.y = -self.velocity.y * 1.2;
                (BodyCategory::Paddle, BodyCategory::Ball, None)
            }
            11 => (BodyCategory::Ball, BodyCategory::Floor, None),
            12 => (BodyCategory::Paddle, BodyCategory::Wall, None),
            _ => return Vec::new(),
        };
        vec![contact]
    }
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, String> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let seed = match args.get(1).map(|s| s.parse::<u64>()) {
        None => 1,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed {:?}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };
    let tuning = match load_tuning(args.get(2).map(String::as_str)) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Tuning rejected: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = SessionController::new(Settings::default(), tuning, seed, NullSink);
    let mut engine = ScriptedEngine::new(seed);
    log::info!("Session initialized with seed: {}", seed);

    for round in 1..=ROUNDS {
        let mut frames = 0;
        while !matches!(session.phase(), RoundPhase::RoundOver { .. }) && frames < MAX_FRAMES {
            frames += 1;

            if session.request_serve() {
                engine.velocity = session.ball().vel * 60.0;
            }

            let alive: Vec<BlockId> = session
                .blocks()
                .iter()
                .filter(|b| b.alive)
                .map(|b| b.id)
                .collect();
            for (a, b, block) in engine.contacts(&alive) {
                if session.on_contact(a, b, block) == Outcome::LifeLost {
                    engine.velocity = Vec2::ZERO;
                }
            }

            // Damping bleeds speed the way the integrator would
            engine.velocity *= 1.0 - session.damping() * FRAME_DT;
            let input = TickInput {
                dt: FRAME_DT,
                ball_velocity: engine.velocity,
                ball_position: session.ball().pos + engine.velocity * FRAME_DT,
                ..Default::default()
            };
            session.on_tick(&input);
            if session.phase() == RoundPhase::Playing {
                engine.velocity = session.ball().vel;
            }
        }

        let counters = session.counters();
        println!(
            "Round {}: {:?} after {} frames - score {}, lives {}, blocks left {}",
            round,
            session.phase(),
            frames,
            counters.score,
            counters.lives,
            counters.remaining_blocks
        );
        session.request_new_round();
    }

    if let Some(best) = session.highscores().top_score() {
        println!("Best round this session: {}", best);
    }
    ExitCode::SUCCESS
}
