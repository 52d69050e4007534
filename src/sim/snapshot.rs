//! Read-only frame snapshot handed to the presentation layer

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, PaddleSide, Rect, Rgb};
use super::state::{MatchPhase, Tally};
use super::tick::Game;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleView {
    pub side: PaddleSide,
    pub rect: Rect,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallView {
    pub center: IVec2,
    pub radius: i32,
    pub color: Rgb,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub width: i32,
    pub height: i32,
    pub phase: MatchPhase,
    pub paused: bool,
    pub paddles: Vec<PaddleView>,
    pub ball: BallView,
    pub tally: Tally,
    /// Set once a two-player match is over
    pub winner: Option<PaddleSide>,
}

impl Frame {
    pub fn capture(game: &Game) -> Self {
        let arena = &game.arena;
        Self {
            tick: game.time_ticks,
            width: arena.width,
            height: arena.height,
            phase: game.state().phase(),
            paused: game.is_paused(),
            paddles: arena
                .paddles
                .iter()
                .map(|p| PaddleView {
                    side: p.side,
                    rect: p.rect(),
                    color: p.color,
                })
                .collect(),
            ball: BallView {
                center: arena.ball.center(),
                radius: arena.ball.radius,
                color: arena.ball.color,
            },
            tally: game.state().tally(),
            winner: game.state().winner(),
        }
    }
}
