//! Fixed-rate game loop
//!
//! Owns a `Game` and steps it exactly once per frame, pulling input from an
//! `InputSource` and handing every frame to a `Presenter`. Rendering, audio
//! and device polling live behind those two traits.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::sim::{Frame, Game, PaddleSide, Tally, TickInput, tick};

/// Supplies the input for each tick
pub trait InputSource {
    /// Poll input for the tick about to run
    fn poll(&mut self, tick: u64) -> TickInput;
}

/// Receives read-only frames
pub trait Presenter {
    fn present(&mut self, frame: &Frame);

    /// Called once more when the match ends; defaults to a plain present
    fn game_over(&mut self, frame: &Frame) {
        self.present(frame);
    }
}

/// No paddle commands, ever
#[derive(Debug, Clone, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, _tick: u64) -> TickInput {
        TickInput::default()
    }
}

/// Input keyed by tick number (replays and tests)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: BTreeMap<u64, TickInput>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, tick: u64, input: TickInput) -> Self {
        self.script.insert(tick, input);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> TickInput {
        self.script.remove(&tick).unwrap_or_default()
    }
}

/// Presenter that writes frames to the log
#[derive(Debug, Clone)]
pub struct LogPresenter {
    /// Log every Nth frame (0 = only the final frame)
    pub every: u64,
    pub frames_seen: u64,
}

impl LogPresenter {
    pub fn new(every: u64) -> Self {
        Self {
            every,
            frames_seen: 0,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &Frame) {
        self.frames_seen += 1;
        if self.every > 0 && frame.tick % self.every == 0 {
            match serde_json::to_string(frame) {
                Ok(json) => log::debug!("frame {}", json),
                Err(e) => log::warn!("Frame serialization failed: {}", e),
            }
        }
    }

    fn game_over(&mut self, frame: &Frame) {
        self.present(frame);
        match frame.winner {
            Some(side) => log::info!("{:?} player won {:?}", side, frame.tally),
            None => log::info!("Game over {:?}", frame.tally),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub tally: Tally,
    pub winner: Option<PaddleSide>,
    pub game_over: bool,
    pub quit: bool,
}

/// Frame-stepped driver around one match
pub struct Driver<I, P> {
    pub game: Game,
    pub input: I,
    pub presenter: P,
    max_ticks: Option<u64>,
}

impl<I: InputSource, P: Presenter> Driver<I, P> {
    pub fn new(game: Game, input: I, presenter: P) -> Self {
        Self {
            game,
            input,
            presenter,
            max_ticks: None,
        }
    }

    /// Stop after this many ticks even if the match is still running
    pub fn with_tick_limit(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Run in real time at the configured tick rate
    pub fn run(&mut self) -> RunSummary {
        self.run_loop(true)
    }

    /// Run as fast as possible
    pub fn run_unpaced(&mut self) -> RunSummary {
        self.run_loop(false)
    }

    fn run_loop(&mut self, paced: bool) -> RunSummary {
        let frame_time = self.game.config.tick_duration();
        let mut next_frame = Instant::now() + frame_time;
        let mut quit = false;

        while self.game.is_active() {
            if self.max_ticks.is_some_and(|max| self.game.time_ticks >= max) {
                log::info!("Tick limit reached at {}", self.game.time_ticks);
                break;
            }

            let input = self.input.poll(self.game.time_ticks + 1);
            let report = tick(&mut self.game, &input);
            if report.quit {
                log::info!("Quit requested at tick {}", self.game.time_ticks);
                quit = true;
                break;
            }
            for event in &report.events {
                log::trace!("event {:?}", event);
            }

            let frame = self.game.snapshot();
            self.presenter.present(&frame);
            if !self.game.is_active() {
                self.presenter.game_over(&frame);
                break;
            }

            if paced {
                // One tick per frame; a late frame is not caught up
                let now = Instant::now();
                if now < next_frame {
                    std::thread::sleep(next_frame - now);
                    next_frame += frame_time;
                } else {
                    next_frame = now + frame_time;
                }
            }
        }

        RunSummary {
            ticks: self.game.time_ticks,
            tally: self.game.state().tally(),
            winner: self.game.state().winner(),
            game_over: !self.game.is_active(),
            quit,
        }
    }
}
