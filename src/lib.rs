//! Paddle Arena - Pong and Squash simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, rounds, match state)
//! - `config`: Immutable per-match configuration and variant presets
//! - `driver`: Fixed-rate loop that feeds input in and hands frames out

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{Config, ConfigError, Variant};
pub use driver::{Driver, InputSource, Presenter, RunSummary};
pub use sim::{Frame, Game, GameEvent, TickInput};

/// Stock configuration constants of both variants
pub mod consts {
    use crate::sim::Rgb;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 120;
    /// Real-time pause after a round reset
    pub const RESTART_PAUSE_MS: u64 = 1000;
    /// Longest reset pause a config may ask for (one hour)
    pub const MAX_PAUSE_MS: u64 = 3_600_000;
    /// Largest playfield side in pixels
    pub const MAX_PLAYFIELD: i32 = 1 << 15;

    pub const PADDLE_COLOR: Rgb = Rgb(255, 40, 0); // red
    pub const BALL_COLOR: Rgb = Rgb(255, 255, 0); // yellow
    pub const BALL_RADIUS: i32 = 15;

    /// Two-player field and paddles
    pub const PONG_WIDTH: i32 = 640;
    pub const PONG_HEIGHT: i32 = 480;
    pub const PONG_PADDLE_WIDTH: i32 = 15;
    pub const PONG_PADDLE_HEIGHT: i32 = 100;
    pub const PONG_PADDLE_INSET: i32 = 50;
    pub const PONG_MIN_VELOCITY: i32 = 3;
    pub const PONG_MAX_VELOCITY: i32 = 5;
    pub const PONG_WIN_SCORE: u32 = 11;

    /// Single-player squash field and paddle
    pub const SQUASH_WIDTH: i32 = 480;
    pub const SQUASH_HEIGHT: i32 = 480;
    pub const SQUASH_PADDLE_WIDTH: i32 = 100;
    pub const SQUASH_PADDLE_HEIGHT: i32 = 15;
    pub const SQUASH_PADDLE_INSET: i32 = 15; // Paddle top at 450
    pub const SQUASH_MIN_VELOCITY: i32 = 1;
    pub const SQUASH_MAX_VELOCITY: i32 = 2;
    pub const SQUASH_LIVES: u32 = 3;
}
