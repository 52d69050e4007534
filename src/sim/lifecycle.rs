//! Round lifecycle: exits, scoring, resets
//!
//! A round ends when the ball is fully past the open wall. The counters move
//! toward the terminal threshold; below it the bodies are reset and play
//! pauses, at it the match ends with the bodies left where they are.

use glam::IVec2;
use rand::Rng;

use super::body::{Body, PaddleSide};
use super::state::{Arena, GameEvent, MatchState, Wall, paddle_home};
use crate::config::{Config, Variant};

/// What the lifecycle check decided for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Ball still in the field
    InPlay,
    /// Round lost below the threshold; bodies reset
    Reset,
    /// Terminal threshold reached
    MatchOver,
}

/// Open wall the ball has fully passed, if any
pub fn ball_exit(arena: &Arena, variant: Variant) -> Option<Wall> {
    let rect = arena.ball.rect();
    match variant {
        Variant::TwoPlayer if rect.right() < 0 => Some(Wall::Left),
        Variant::TwoPlayer if rect.left() > arena.width => Some(Wall::Right),
        Variant::Squash if rect.top() > arena.height => Some(Wall::Bottom),
        _ => None,
    }
}

/// Inspect the ball after collision resolution and apply any round end
pub fn settle_round<R: Rng>(
    arena: &mut Arena,
    state: &mut MatchState,
    config: &Config,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> RoundOutcome {
    let Some(wall) = ball_exit(arena, config.variant) else {
        return RoundOutcome::InPlay;
    };

    match wall {
        Wall::Left | Wall::Right => {
            // Ball out on one side is a point for the other
            let scorer = if wall == Wall::Left {
                PaddleSide::Right
            } else {
                PaddleSide::Left
            };
            if let Some(score) = state.record_point(scorer) {
                log::info!("{:?} scores ({})", scorer, score);
                events.push(GameEvent::PointScored { scorer, score });
            }
        }
        Wall::Bottom | Wall::Top => {
            if let Some(remaining) = state.lose_life() {
                log::info!("Life lost, {} remaining", remaining);
                events.push(GameEvent::LifeLost { remaining });
            }
        }
    }

    if state.is_active() {
        reset_round(arena, config, rng);
        RoundOutcome::Reset
    } else {
        let winner = state.winner();
        log::info!("Match over: {:?} (winner {:?})", state.tally(), winner);
        events.push(GameEvent::MatchOver { winner });
        RoundOutcome::MatchOver
    }
}

/// Put bodies back for a new round.
///
/// Paddle velocities are zeroed; the squash paddle is also recentred. The
/// ball returns to the field center with a fresh launch velocity.
pub fn reset_round<R: Rng>(arena: &mut Arena, config: &Config, rng: &mut R) {
    for paddle in &mut arena.paddles {
        paddle.stop();
        if config.variant == Variant::Squash {
            paddle.pos = paddle_home(config, paddle.side);
        }
    }

    let (cx, cy) = config.ball_center();
    arena.ball.set_center(IVec2::new(cx, cy));
    arena
        .ball
        .launch(rng, config.min_velocity, config.max_velocity);
    log::trace!("Round reset, ball velocity {:?}", arena.ball.vel());
}
