//! Round entities and the phase enum
//!
//! Positions are in playfield points with the origin at the bottom-left.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Fresh round, "tap to begin" showing, ball resting on paddle
    AwaitingFirstTouch,
    /// A life was lost; ball resting on paddle until the next serve
    AwaitingServe,
    /// Ball in flight under the governor
    Playing,
    /// Round ended
    RoundOver { won: bool },
}

impl RoundPhase {
    /// Ball sits on the paddle and follows it
    pub fn ball_rests_on_paddle(&self) -> bool {
        !matches!(self, RoundPhase::Playing)
    }
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// A ball entity. Recreated on every reposition, so `id` changes per serve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Spawn a ball resting on top of the paddle
    pub fn on_paddle(id: u32, paddle: &Paddle) -> Self {
        let radius = BALL_RADIUS;
        Self {
            id,
            pos: Vec2::new(paddle.x, paddle.y + paddle.height / 2.0 + radius),
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Magnitude of the current velocity
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x
    pub x: f32,
    /// Center y (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered paddle near the bottom of the playfield
    pub fn new(field: &Playfield) -> Self {
        Self {
            x: field.width / 2.0,
            y: field.height * PADDLE_Y_FRACTION,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// Shift horizontally, keeping the whole paddle inside the playfield
    pub fn move_by(&mut self, dx: f32, field: &Playfield) {
        self.x += dx;
        self.clamp_to(field);
    }

    pub fn clamp_to(&mut self, field: &Playfield) {
        let half = self.width / 2.0;
        let max_x = (field.width - half).max(half);
        self.x = self.x.clamp(half, max_x);
    }
}

/// Opaque block identity handed to and from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Brick,
}

/// A block in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub column: u32,
    pub row: u32,
    pub kind: BlockKind,
    pub pos: Vec2,
    pub alive: bool,
}

/// Lay out `columns x rows` bricks centered horizontally, top row first.
/// Ids are assigned row-major starting at 0.
pub fn block_grid(field: &Playfield, columns: u32, rows: u32) -> Vec<Block> {
    let total_width = BLOCK_WIDTH * columns as f32;
    let x_offset = (field.width - total_width) / 2.0;
    let top = field.height * BLOCK_TOP_FRACTION;

    let mut blocks = Vec::with_capacity(columns as usize * rows as usize);
    for row in 0..rows {
        for column in 0..columns {
            blocks.push(Block {
                id: BlockId(row * columns + column),
                column,
                row,
                kind: BlockKind::Brick,
                pos: Vec2::new(
                    x_offset + (column as f32 + 0.5) * BLOCK_WIDTH,
                    top - BLOCK_HEIGHT * row as f32,
                ),
                alive: true,
            });
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_clamps_to_playfield() {
        let field = Playfield::default();
        let mut paddle = Paddle::new(&field);

        paddle.move_by(-1000.0, &field);
        assert_eq!(paddle.x, paddle.width / 2.0);

        paddle.move_by(5000.0, &field);
        assert_eq!(paddle.x, field.width - paddle.width / 2.0);
    }

    #[test]
    fn test_ball_rests_on_paddle_top() {
        let field = Playfield::default();
        let paddle = Paddle::new(&field);
        let ball = Ball::on_paddle(7, &paddle);
        assert_eq!(ball.id, 7);
        assert_eq!(ball.pos.x, paddle.x);
        assert_eq!(ball.pos.y, paddle.y + paddle.height / 2.0 + ball.radius);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.speed(), 0.0);

        let moving = Ball {
            vel: Vec2::new(30.0, -40.0),
            ..ball
        };
        assert_eq!(moving.speed(), 50.0);
    }

    #[test]
    fn test_block_grid_layout() {
        let field = Playfield::default();
        let blocks = block_grid(&field, 12, 7);
        assert_eq!(blocks.len(), 84);
        assert!(blocks.iter().all(|b| b.alive && b.kind == BlockKind::Brick));

        let last = blocks.last().unwrap();
        assert_eq!((last.column, last.row), (11, 6));
        assert_eq!(last.id, BlockId(83));

        // Row is centered
        let first = &blocks[0];
        let row_end = &blocks[11];
        let left_gap = first.pos.x - BLOCK_WIDTH / 2.0;
        let right_gap = field.width - (row_end.pos.x + BLOCK_WIDTH / 2.0);
        assert!((left_gap - right_gap).abs() < 0.001);
    }

    #[test]
    fn test_only_playing_frees_the_ball() {
        assert!(RoundPhase::AwaitingFirstTouch.ball_rests_on_paddle());
        assert!(RoundPhase::AwaitingServe.ball_rests_on_paddle());
        assert!(RoundPhase::RoundOver { won: false }.ball_rests_on_paddle());
        assert!(!RoundPhase::Playing.ball_rests_on_paddle());
    }
}
