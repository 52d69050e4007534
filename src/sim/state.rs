//! Arena and match state
//!
//! The arena owns the bodies; the match state owns the counters and the
//! active flag. Neither knows about rendering or input devices.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Ball, Paddle, PaddleSide};
use crate::config::{Config, Variant};

/// Whether the match is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Active gameplay (including reset pauses)
    Playing,
    /// Terminal threshold reached; never left
    GameOver,
}

/// Playfield wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

/// Something that happened during a tick, for presentation/audio hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reflected off a wall
    WallBounce { wall: Wall },
    /// Ball touched a paddle; `snapped` when it was pushed back onto the face
    PaddleHit { side: PaddleSide, snapped: bool },
    /// A player took a point
    PointScored { scorer: PaddleSide, score: u32 },
    /// Ball fell through the open wall
    LifeLost { remaining: u32 },
    /// Bodies recentred; play resumes at `resume_tick`
    RoundReset { resume_tick: u64 },
    /// Terminal threshold reached
    MatchOver { winner: Option<PaddleSide> },
}

/// Fixed-size playfield and the bodies inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    /// Left then right (two-player), or the single bottom paddle (squash)
    pub paddles: Vec<Paddle>,
    pub ball: Ball,
}

impl Arena {
    /// Lay out the bodies at their home positions. The ball starts at rest;
    /// the session gives it a launch velocity.
    pub fn new(config: &Config) -> Self {
        let size = IVec2::new(config.paddle_width, config.paddle_height);
        let paddles = sides_for(config.variant)
            .iter()
            .map(|&side| Paddle::new(side, paddle_home(config, side), size, config.paddle_color))
            .collect();

        let (cx, cy) = config.ball_center();
        Self {
            width: config.width,
            height: config.height,
            paddles,
            ball: Ball::new(IVec2::new(cx, cy), config.ball_radius, config.ball_color),
        }
    }

    pub fn paddle(&self, side: PaddleSide) -> Option<&Paddle> {
        self.paddles.iter().find(|p| p.side == side)
    }

    pub fn paddle_mut(&mut self, side: PaddleSide) -> Option<&mut Paddle> {
        self.paddles.iter_mut().find(|p| p.side == side)
    }
}

/// Paddles present in each variant, in update order
pub fn sides_for(variant: Variant) -> &'static [PaddleSide] {
    match variant {
        Variant::TwoPlayer => &[PaddleSide::Left, PaddleSide::Right],
        Variant::Squash => &[PaddleSide::Bottom],
    }
}

/// Top-left corner of a paddle at match start
pub fn paddle_home(config: &Config, side: PaddleSide) -> IVec2 {
    let centered_top = (config.height - config.paddle_height) / 2;
    match side {
        PaddleSide::Left => IVec2::new(config.paddle_inset, centered_top),
        PaddleSide::Right => IVec2::new(
            config.width - config.paddle_width - config.paddle_inset,
            centered_top,
        ),
        PaddleSide::Bottom => IVec2::new(
            (config.width - config.paddle_width) / 2,
            config.height - config.paddle_height - config.paddle_inset,
        ),
    }
}

/// Score or lives counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tally {
    Points { left: u32, right: u32 },
    Lives { remaining: u32 },
}

/// Cumulative match counters and the active flag.
///
/// Only `record_point` and `lose_life` move the counters, and the phase goes
/// `Playing` to `GameOver` at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    tally: Tally,
    phase: MatchPhase,
    win_score: u32,
}

impl MatchState {
    pub fn new(config: &Config) -> Self {
        let tally = match config.variant {
            Variant::TwoPlayer => Tally::Points { left: 0, right: 0 },
            Variant::Squash => Tally::Lives {
                remaining: config.starting_lives,
            },
        };
        Self {
            tally,
            phase: MatchPhase::Playing,
            win_score: config.win_score,
        }
    }

    /// Pick a match up at a saved tally (replays, practice drills). The
    /// phase follows from the tally. `None` when the tally kind does not
    /// belong to the config's variant.
    pub fn resume(config: &Config, tally: Tally) -> Option<Self> {
        let over = match (config.variant, tally) {
            (Variant::TwoPlayer, Tally::Points { left, right }) => {
                left.max(right) >= config.win_score
            }
            (Variant::Squash, Tally::Lives { remaining }) => remaining == 0,
            _ => return None,
        };
        Some(Self {
            tally,
            phase: if over {
                MatchPhase::GameOver
            } else {
                MatchPhase::Playing
            },
            win_score: config.win_score,
        })
    }

    #[inline]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    #[inline]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    /// Credit a point. Returns the scorer's new total, or `None` once the
    /// match is over or when the tally has no points.
    pub fn record_point(&mut self, scorer: PaddleSide) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        let Tally::Points { left, right } = &mut self.tally else {
            return None;
        };
        let score = match scorer {
            PaddleSide::Left => left,
            PaddleSide::Right => right,
            PaddleSide::Bottom => return None,
        };
        *score += 1;
        let score = *score;
        if score >= self.win_score {
            self.phase = MatchPhase::GameOver;
        }
        Some(score)
    }

    /// Take a life. Returns the remaining count, or `None` once the match is
    /// over or when the tally has no lives.
    pub fn lose_life(&mut self) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        let Tally::Lives { remaining } = &mut self.tally else {
            return None;
        };
        *remaining = remaining.saturating_sub(1);
        let remaining = *remaining;
        if remaining == 0 {
            self.phase = MatchPhase::GameOver;
        }
        Some(remaining)
    }

    /// Side with the higher score once a two-player match has ended
    pub fn winner(&self) -> Option<PaddleSide> {
        if self.is_active() {
            return None;
        }
        match self.tally {
            Tally::Points { left, right } if left > right => Some(PaddleSide::Left),
            Tally::Points { left, right } if right > left => Some(PaddleSide::Right),
            _ => None,
        }
    }
}
