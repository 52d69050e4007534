//! Fixed timestep simulation tick
//!
//! Each tick: apply paddle commands, integrate every body, resolve collisions,
//! then settle the round. A reset schedules a resume tick instead of sleeping,
//! so the driver keeps polling input (and Quit) through the pause.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Axis, Body, PaddleSide};
use super::collision;
use super::lifecycle::{self, RoundOutcome};
use super::snapshot::Frame;
use super::state::{Arena, GameEvent, MatchState, Tally};
use crate::config::{Config, ConfigError};

/// Discrete paddle control event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleCommand {
    Up,
    Down,
    Left,
    Right,
    /// Key released
    Stop,
}

impl PaddleCommand {
    /// Direction along `axis`: -1, 0 or +1. `None` when the command does not
    /// apply to a paddle sliding on that axis.
    pub fn direction(&self, axis: Axis) -> Option<i32> {
        match (self, axis) {
            (PaddleCommand::Stop, _) => Some(0),
            (PaddleCommand::Up, Axis::Y) | (PaddleCommand::Left, Axis::X) => Some(-1),
            (PaddleCommand::Down, Axis::Y) | (PaddleCommand::Right, Axis::X) => Some(1),
            _ => None,
        }
    }
}

/// Input for a single tick, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Paddle commands; a later command for the same paddle wins
    pub commands: Vec<(PaddleSide, PaddleCommand)>,
    /// Close request from the window/process
    pub quit: bool,
}

impl TickInput {
    pub fn command(mut self, side: PaddleSide, command: PaddleCommand) -> Self {
        self.commands.push((side, command));
        self
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Default::default()
        }
    }
}

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// Quit was requested; the driver should stop
    pub quit: bool,
    /// Bodies did not move this tick (reset pause or match over)
    pub frozen: bool,
}

/// One match: configuration, arena, counters, and the launch RNG
#[derive(Debug, Clone)]
pub struct Game {
    pub config: Config,
    pub arena: Arena,
    state: MatchState,
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// First tick that integrates again after a reset
    pub resume_at: Option<u64>,
    rng: Pcg32,
}

impl Game {
    /// Start a match. Fails fast on an invalid configuration.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut arena = Arena::new(&config);
        arena
            .ball
            .launch(&mut rng, config.min_velocity, config.max_velocity);
        let state = MatchState::new(&config);

        log::info!(
            "{} match started (seed {}, ball velocity {:?})",
            config.variant.as_str(),
            seed,
            arena.ball.vel()
        );

        Ok(Self {
            config,
            arena,
            state,
            seed,
            time_ticks: 0,
            resume_at: None,
            rng,
        })
    }

    /// Start a match at a saved tally. Fails when the tally kind does not
    /// match the variant.
    pub fn resume(config: Config, seed: u64, tally: Tally) -> Result<Self, ConfigError> {
        let mut game = Self::new(config, seed)?;
        game.state = MatchState::resume(&game.config, tally)
            .ok_or(ConfigError::TallyMismatch(game.config.variant))?;
        Ok(game)
    }

    /// Counters and phase, read-only
    #[inline]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Inside a reset pause
    pub fn is_paused(&self) -> bool {
        self.resume_at.is_some_and(|t| self.time_ticks + 1 < t)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Frame {
        Frame::capture(self)
    }

    /// Apply paddle commands as direct velocity writes
    fn apply_input(&mut self, input: &TickInput) {
        let speed = self.config.max_velocity;
        for &(side, command) in &input.commands {
            let Some(paddle) = self.arena.paddle_mut(side) else {
                log::debug!("Ignoring {:?} for absent {:?} paddle", command, side);
                continue;
            };
            match command.direction(paddle.side.axis()) {
                Some(dir) => paddle.drive(dir * speed),
                None => log::debug!("Ignoring {:?} for {:?} paddle", command, side),
            }
        }
    }
}

/// Advance the match by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput) -> TickReport {
    let mut report = TickReport {
        quit: input.quit,
        ..Default::default()
    };

    // Nothing mutates once the match is over
    if !game.is_active() {
        report.frozen = true;
        return report;
    }

    game.time_ticks += 1;
    game.apply_input(input);

    if let Some(resume_at) = game.resume_at {
        if game.time_ticks < resume_at {
            report.frozen = true;
            return report;
        }
        game.resume_at = None;
        log::debug!("Play resumed at tick {}", game.time_ticks);
    }

    for paddle in &mut game.arena.paddles {
        paddle.integrate();
    }
    game.arena.ball.integrate();

    collision::resolve(&mut game.arena, game.config.variant, &mut report.events);

    let outcome = lifecycle::settle_round(
        &mut game.arena,
        &mut game.state,
        &game.config,
        &mut game.rng,
        &mut report.events,
    );
    if outcome == RoundOutcome::Reset {
        let resume_tick = game
            .time_ticks
            .saturating_add(game.config.pause_ticks())
            .saturating_add(1);
        game.resume_at = Some(resume_tick);
        report.events.push(GameEvent::RoundReset { resume_tick });
    }

    log::trace!(
        "tick {}: ball {:?} vel {:?}",
        game.time_ticks,
        game.arena.ball.pos,
        game.arena.ball.vel
    );

    report
}
