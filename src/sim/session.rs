//! Session controller
//!
//! Entry points for the host engine. Within a frame the host delivers every
//! contact through `on_contact` first and then calls `on_tick` once, so a
//! life loss or round end is already reflected when the governor would run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{BodyCategory, CollisionEvent, classify, is_paddle_wall};
use super::events::{Banner, SceneEvent, SceneSink};
use super::governor::BallGovernor;
use super::progression::{Outcome, ProgressionCounters, ProgressionTracker};
use super::round::{PhaseActions, RoundState};
use super::state::{Ball, Block, BlockId, Paddle, Playfield, RoundPhase};
use crate::audio::{AudioCues, SoundEffect};
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Ball position as integrated by the physics engine
    pub ball_position: Vec2,
    /// Ball velocity as integrated by the physics engine
    pub ball_velocity: Vec2,
    /// Horizontal finger drag since the previous frame
    pub paddle_drag: f32,
    /// Accelerometer reading (x, y), if available
    pub tilt: Option<Vec2>,
}

/// Everything the phase actions touch, kept apart from the state machine
struct Table<S, R> {
    field: Playfield,
    paddle: Paddle,
    ball: Ball,
    next_ball_id: u32,
    damping: f32,
    governor: BallGovernor<R>,
    audio: AudioCues,
    sink: S,
}

impl<S: SceneSink, R: Rng> Table<S, R> {
    fn play(&mut self, effect: SoundEffect) {
        if let Some(effect) = self.audio.cue(effect) {
            self.sink.emit(SceneEvent::Sound(effect));
        }
    }

    fn move_paddle(&mut self, dx: f32) {
        let before = self.paddle.x;
        self.paddle.move_by(dx, &self.field);
        if self.paddle.x != before {
            self.sink.emit(SceneEvent::PaddleMoved(self.paddle.x));
        }
    }
}

impl<S: SceneSink, R: Rng> PhaseActions for Table<S, R> {
    fn phase_changed(&mut self, phase: RoundPhase) {
        self.sink.emit(SceneEvent::PhaseChanged(phase));
    }

    fn show_banner(&mut self, banner: Banner) {
        self.sink.emit(SceneEvent::Prompt(banner));
    }

    fn rest_ball_on_paddle(&mut self) {
        let id = self.next_ball_id;
        self.next_ball_id += 1;
        self.ball = Ball::on_paddle(id, &self.paddle);
        // A new body starts undamped
        self.damping = 0.0;
        self.sink.emit(SceneEvent::BallReposition {
            ball_id: id,
            position: self.ball.pos,
        });
    }

    fn launch_ball(&mut self) {
        let impulse = self.governor.launch();
        self.ball.vel += impulse;
        log::info!("Ball {} served with {:?}", self.ball.id, impulse);
        self.sink.emit(SceneEvent::Launch(impulse));
        self.play(SoundEffect::Launch);
    }

    fn regulate_ball(&mut self, _dt: f32) {
        let regulation = self.governor.regulate(self.ball.vel);
        if let Some(vel) = regulation.velocity {
            log::debug!("Governor corrected {:?} -> {:?}", self.ball.vel, vel);
            self.ball.vel = vel;
            self.sink.emit(SceneEvent::VelocityCorrection(vel));
        }
        if regulation.damping != self.damping {
            log::debug!(
                "Ball {} at speed {:.1}, damping {}",
                self.ball.id,
                self.ball.speed(),
                regulation.damping
            );
            self.damping = regulation.damping;
            self.sink.emit(SceneEvent::DampingChanged(regulation.damping));
        }
    }
}

/// Top-level orchestrator for one play session
pub struct SessionController<S, R = Pcg32> {
    settings: Settings,
    tuning: Tuning,
    round: RoundState,
    progression: ProgressionTracker,
    highscores: HighScores,
    table: Table<S, R>,
}

impl<S: SceneSink> SessionController<S> {
    /// New session with a seeded impulse generator. `tuning` is assumed valid.
    pub fn new(settings: Settings, tuning: Tuning, seed: u64, sink: S) -> Self {
        let governor = BallGovernor::seeded(&tuning, seed);
        Self::with_governor(settings, tuning, governor, sink)
    }
}

impl<S: SceneSink, R: Rng> SessionController<S, R> {
    /// New session drawing impulse signs from `rng`
    pub fn with_rng(settings: Settings, tuning: Tuning, rng: R, sink: S) -> Self {
        let governor = BallGovernor::with_rng(&tuning, rng);
        Self::with_governor(settings, tuning, governor, sink)
    }

    fn with_governor(
        settings: Settings,
        tuning: Tuning,
        governor: BallGovernor<R>,
        sink: S,
    ) -> Self {
        let field = Playfield::default();
        let paddle = Paddle::new(&field);
        let ball = Ball::on_paddle(0, &paddle);
        let mut session = Self {
            progression: ProgressionTracker::new(&tuning, &field),
            round: RoundState::new(),
            highscores: HighScores::new(),
            table: Table {
                field,
                paddle,
                ball,
                next_ball_id: 1,
                damping: 0.0,
                governor,
                audio: AudioCues::new(settings.sounds_on),
                sink,
            },
            settings,
            tuning,
        };
        session.start_round();
        session
    }

    fn start_round(&mut self) {
        log::info!(
            "Round started: {} lives, {} blocks",
            self.progression.lives(),
            self.progression.remaining_blocks()
        );
        self.round.begin(&mut self.table);
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn counters(&self) -> ProgressionCounters {
        self.progression.counters()
    }

    pub fn blocks(&self) -> &[Block] {
        self.progression.blocks()
    }

    pub fn ball(&self) -> &Ball {
        &self.table.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.table.paddle
    }

    pub fn playfield(&self) -> &Playfield {
        &self.table.field
    }

    /// Linear damping the ball currently carries
    pub fn damping(&self) -> f32 {
        self.table.damping
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn sink(&self) -> &S {
        &self.table.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.table.sink
    }

    /// Per-frame update: paddle input, then the current phase's tick action
    pub fn on_tick(&mut self, input: &TickInput) {
        if self.round.phase() == RoundPhase::Playing {
            self.table.ball.pos = input.ball_position;
            self.table.ball.vel = input.ball_velocity;
        }

        if self.settings.use_accelerometer {
            if let Some(tilt) = input.tilt {
                if tilt.x.abs() > self.tuning.tilt_threshold {
                    self.table.move_paddle(self.tuning.tilt_gain * tilt.y);
                }
            }
        } else if input.paddle_drag != 0.0 {
            self.table.move_paddle(input.paddle_drag);
        }

        self.round.update(input.dt, &mut self.table);
    }

    /// Contact-begin between two bodies. Progression only counts while playing.
    pub fn on_contact(
        &mut self,
        a: BodyCategory,
        b: BodyCategory,
        block: Option<BlockId>,
    ) -> Outcome {
        if is_paddle_wall(a, b) {
            if self.settings.paddle_wall_feedback {
                self.table.play(SoundEffect::PaddleWall);
            }
            return Outcome::NoChange;
        }

        if self.round.phase() != RoundPhase::Playing {
            return Outcome::NoChange;
        }

        let event = classify(a, b, block);
        if event == CollisionEvent::Unrecognized {
            return Outcome::NoChange;
        }

        let lives_before = self.progression.lives();
        let outcome = self.progression.apply_collision(event);
        self.report(event, outcome, lives_before);

        if let Some(next) = outcome.next_phase() {
            self.enter_internal(next);
            if let RoundPhase::RoundOver { won } = next {
                let score = self.progression.score();
                log::info!("Round over ({}), score {}", if won { "won" } else { "lost" }, score);
                if let Some(rank) = self.highscores.record_round(score, won) {
                    log::info!("Session rank #{}", rank);
                }
            }
        }

        outcome
    }

    /// Player wants to launch. Ignored unless the ball is waiting on the paddle.
    pub fn request_serve(&mut self) -> bool {
        if !self.round.can_enter(RoundPhase::Playing) {
            log::debug!("Serve ignored in {:?}", self.round.phase());
            return false;
        }
        self.enter_internal(RoundPhase::Playing);
        true
    }

    /// Player wants another round. Ignored unless the current one is over.
    pub fn request_new_round(&mut self) -> bool {
        if !self.round.can_enter(RoundPhase::AwaitingFirstTouch) {
            log::debug!("New round ignored in {:?}", self.round.phase());
            return false;
        }

        self.progression = ProgressionTracker::new(&self.tuning, &self.table.field);
        self.table.paddle = Paddle::new(&self.table.field);
        self.table.sink.emit(SceneEvent::ScoreChanged(0));
        self.table
            .sink
            .emit(SceneEvent::LivesChanged(self.progression.lives()));
        self.table.sink.emit(SceneEvent::PaddleMoved(self.table.paddle.x));
        self.enter_internal(RoundPhase::AwaitingFirstTouch);
        log::info!(
            "Round started: {} lives, {} blocks",
            self.progression.lives(),
            self.progression.remaining_blocks()
        );
        true
    }

    fn report(&mut self, event: CollisionEvent, outcome: Outcome, lives_before: u32) {
        let sink = &mut self.table.sink;
        if let CollisionEvent::Block(id) = event {
            if matches!(outcome, Outcome::BlockDestroyed(_) | Outcome::RoundWon) {
                sink.emit(SceneEvent::BlockDestroyed(id));
                sink.emit(SceneEvent::ScoreChanged(self.progression.score()));
            }
        }

        let lives = self.progression.lives();
        if lives < lives_before {
            sink.emit(SceneEvent::LifeLost { remaining: lives });
        }

        let cue = match outcome {
            Outcome::RoundLost => Some(SoundEffect::GameOver),
            Outcome::RoundWon => Some(SoundEffect::RoundWon),
            Outcome::NoChange if matches!(event, CollisionEvent::Block(_)) => None,
            _ => SoundEffect::for_collision(event),
        };
        if let Some(cue) = cue {
            self.table.play(cue);
        }
    }

    /// Transitions driven by the core itself. A rejection here is a bug.
    fn enter_internal(&mut self, to: RoundPhase) {
        if let Err(err) = self.round.enter(to, &mut self.table) {
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
            log::error!("{err}");
        }
    }
}
