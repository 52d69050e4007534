//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, integer pixel arithmetic
//! - Seeded RNG only
//! - Fixed resolution order (paddles, then walls, then ball/paddle contact)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod lifecycle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::{Axis, Ball, Body, Paddle, PaddleSide, Rect, Rgb};
pub use collision::{ball_paddle_contact, clamp_paddle, closed_walls, reflect_off_wall, resolve};
pub use lifecycle::{RoundOutcome, ball_exit, reset_round, settle_round};
pub use snapshot::{BallView, Frame, PaddleView};
pub use state::{Arena, GameEvent, MatchPhase, MatchState, Tally, Wall, paddle_home, sides_for};
pub use tick::{Game, PaddleCommand, TickInput, TickReport, tick};
