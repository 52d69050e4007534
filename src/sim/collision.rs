//! Collision detection and response
//!
//! One pass per tick, after integration, in fixed order:
//! paddle clamp, then ball wall reflection, then ball/paddle contact.
//! A paddle clamped against a wall is therefore already in its final spot
//! when the ball is tested against it.

use super::body::{Axis, Ball, Body, Paddle, PaddleSide};
use super::state::{Arena, GameEvent, Wall};
use crate::config::Variant;

/// Walls the ball bounces off; the remaining wall is open and ends the round
pub fn closed_walls(variant: Variant) -> &'static [Wall] {
    match variant {
        Variant::TwoPlayer => &[Wall::Top, Wall::Bottom],
        Variant::Squash => &[Wall::Left, Wall::Right, Wall::Top],
    }
}

/// Run the full resolution pass over the arena
pub fn resolve(arena: &mut Arena, variant: Variant, events: &mut Vec<GameEvent>) {
    let (width, height) = (arena.width, arena.height);

    for paddle in &mut arena.paddles {
        clamp_paddle(paddle, width, height);
    }

    for &wall in closed_walls(variant) {
        if reflect_off_wall(&mut arena.ball, wall, width, height) {
            log::debug!("Ball bounced off {:?} wall", wall);
            events.push(GameEvent::WallBounce { wall });
        }
    }

    for paddle in &arena.paddles {
        if let Some(snapped) = ball_paddle_contact(&mut arena.ball, paddle) {
            log::debug!("Ball hit {:?} paddle (snapped: {})", paddle.side, snapped);
            events.push(GameEvent::PaddleHit {
                side: paddle.side,
                snapped,
            });
        }
    }
}

/// Keep a paddle inside the playfield along its axis of travel
pub fn clamp_paddle(paddle: &mut Paddle, width: i32, height: i32) {
    let rect = paddle.rect();
    match paddle.side.axis() {
        Axis::Y => {
            if rect.top() < 0 {
                paddle.set_top(0);
            }
            if rect.bottom() > height {
                paddle.set_bottom(height);
            }
        }
        Axis::X => {
            if rect.left() < 0 {
                paddle.set_left(0);
            }
            if rect.right() > width {
                paddle.set_right(width);
            }
        }
    }
}

/// Clamp the ball to a wall and invert the matching velocity component.
///
/// Returns true when the ball was touching or beyond the wall.
pub fn reflect_off_wall(ball: &mut Ball, wall: Wall, width: i32, height: i32) -> bool {
    let rect = ball.rect();
    match wall {
        Wall::Top if rect.top() < 0 => {
            ball.set_top(0);
            ball.invert_velocity(Axis::Y);
        }
        Wall::Bottom if rect.bottom() > height => {
            ball.set_bottom(height);
            ball.invert_velocity(Axis::Y);
        }
        Wall::Left if rect.left() < 0 => {
            ball.set_left(0);
            ball.invert_velocity(Axis::X);
        }
        Wall::Right if rect.right() > width => {
            ball.set_right(width);
            ball.invert_velocity(Axis::X);
        }
        _ => return false,
    }
    true
}

/// Resolve ball/paddle overlap.
///
/// On any overlap the ball's velocity across the paddle face is inverted.
/// The ball is only snapped onto the face when its center lies within the
/// paddle's extent (inclusive), so a corner clip reverses the ball without
/// moving it and it may still overlap the paddle next tick.
///
/// Returns `None` without contact, else whether the ball was snapped.
pub fn ball_paddle_contact(ball: &mut Ball, paddle: &Paddle) -> Option<bool> {
    let face = paddle.rect();
    if !face.intersects(&ball.rect()) {
        return None;
    }

    let center = ball.center();
    let snapped = match paddle.side {
        PaddleSide::Left => {
            ball.invert_velocity(Axis::X);
            let on_face = (face.top()..=face.bottom()).contains(&center.y);
            if on_face {
                ball.set_left(face.right());
            }
            on_face
        }
        PaddleSide::Right => {
            ball.invert_velocity(Axis::X);
            let on_face = (face.top()..=face.bottom()).contains(&center.y);
            if on_face {
                ball.set_right(face.left());
            }
            on_face
        }
        PaddleSide::Bottom => {
            ball.invert_velocity(Axis::Y);
            let on_face = (face.left()..=face.right()).contains(&center.x);
            if on_face {
                ball.set_bottom(face.top());
            }
            on_face
        }
    };
    Some(snapped)
}
