//! Kinematic bodies: paddles and the ball
//!
//! Both are axis-aligned boxes in integer pixel space with an integer velocity
//! (pixels per tick). The ball's circle is carried by its bounding box.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Opaque display colour, passed through to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Velocity / movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether this rectangle lies inside `[0, width] x [0, height]`
    pub fn within(&self, width: i32, height: i32) -> bool {
        self.left() >= 0 && self.top() >= 0 && self.right() <= width && self.bottom() <= height
    }
}

/// Shared capability of every moving box in the arena
pub trait Body {
    fn pos(&self) -> IVec2;
    fn pos_mut(&mut self) -> &mut IVec2;
    fn size(&self) -> IVec2;
    fn vel(&self) -> IVec2;
    fn vel_mut(&mut self) -> &mut IVec2;

    /// Advance one tick: position += velocity, per axis, unchecked
    fn integrate(&mut self) {
        let vel = self.vel();
        *self.pos_mut() += vel;
    }

    /// Overwrite one velocity component
    fn set_velocity(&mut self, axis: Axis, value: i32) {
        let vel = self.vel_mut();
        match axis {
            Axis::X => vel.x = value,
            Axis::Y => vel.y = value,
        }
    }

    /// Negate one velocity component
    fn invert_velocity(&mut self, axis: Axis) {
        let current = match axis {
            Axis::X => self.vel().x,
            Axis::Y => self.vel().y,
        };
        self.set_velocity(axis, -current);
    }

    fn rect(&self) -> Rect {
        let (pos, size) = (self.pos(), self.size());
        Rect::new(pos.x, pos.y, size.x, size.y)
    }

    fn set_left(&mut self, left: i32) {
        self.pos_mut().x = left;
    }

    fn set_right(&mut self, right: i32) {
        let w = self.size().x;
        self.pos_mut().x = right - w;
    }

    fn set_top(&mut self, top: i32) {
        self.pos_mut().y = top;
    }

    fn set_bottom(&mut self, bottom: i32) {
        let h = self.size().y;
        self.pos_mut().y = bottom - h;
    }
}

/// Which wall a paddle guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddleSide {
    Left,
    Right,
    Bottom,
}

impl PaddleSide {
    /// Axis the paddle slides along
    pub fn axis(&self) -> Axis {
        match self {
            PaddleSide::Left | PaddleSide::Right => Axis::Y,
            PaddleSide::Bottom => Axis::X,
        }
    }
}

/// A player-controlled paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: PaddleSide,
    pub pos: IVec2,
    pub size: IVec2,
    pub vel: IVec2,
    pub color: Rgb,
}

impl Paddle {
    pub fn new(side: PaddleSide, pos: IVec2, size: IVec2, color: Rgb) -> Self {
        Self {
            side,
            pos,
            size,
            vel: IVec2::ZERO,
            color,
        }
    }

    /// Set the paddle's speed along its own axis (sign gives direction)
    pub fn drive(&mut self, speed: i32) {
        self.set_velocity(self.side.axis(), speed);
    }

    pub fn stop(&mut self) {
        self.vel = IVec2::ZERO;
    }
}

impl Body for Paddle {
    fn pos(&self) -> IVec2 {
        self.pos
    }
    fn pos_mut(&mut self) -> &mut IVec2 {
        &mut self.pos
    }
    fn size(&self) -> IVec2 {
        self.size
    }
    fn vel(&self) -> IVec2 {
        self.vel
    }
    fn vel_mut(&mut self) -> &mut IVec2 {
        &mut self.vel
    }
}

/// The ball; a circle represented by its square bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub radius: i32,
    pub vel: IVec2,
    pub color: Rgb,
}

impl Ball {
    pub fn new(center: IVec2, radius: i32, color: Rgb) -> Self {
        Self {
            pos: center - IVec2::splat(radius),
            radius,
            vel: IVec2::ZERO,
            color,
        }
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        self.pos + IVec2::splat(self.radius)
    }

    pub fn set_center(&mut self, center: IVec2) {
        self.pos = center - IVec2::splat(self.radius);
    }

    /// Give the ball a fresh random velocity.
    ///
    /// Each axis independently draws a magnitude from `[min, max]` and a sign,
    /// so no component is ever zero.
    pub fn launch<R: Rng>(&mut self, rng: &mut R, min: i32, max: i32) {
        self.vel = IVec2::new(
            random_component(rng, min, max),
            random_component(rng, min, max),
        );
    }
}

impl Body for Ball {
    fn pos(&self) -> IVec2 {
        self.pos
    }
    fn pos_mut(&mut self) -> &mut IVec2 {
        &mut self.pos
    }
    fn size(&self) -> IVec2 {
        IVec2::splat(2 * self.radius)
    }
    fn vel(&self) -> IVec2 {
        self.vel
    }
    fn vel_mut(&mut self) -> &mut IVec2 {
        &mut self.vel
    }
}

fn random_component<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    let magnitude = rng.random_range(min..=max);
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}
