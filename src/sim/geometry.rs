//! Axis-aligned rectangles and character hitboxes
//!
//! Screen coordinates: origin top-left, y grows downward. Every box is anchored
//! at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// (width, height)
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Which intersection test a hitbox uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitShape {
    #[default]
    Rect,
    /// Ellipse inscribed in the box
    Ellipse,
}

/// Collision geometry relative to the character's top-left anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub offset: Vec2,
    pub size: Vec2,
    pub shape: HitShape,
}

impl Hitbox {
    pub const fn rect(ox: f32, oy: f32, width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::new(ox, oy),
            size: Vec2::new(width, height),
            shape: HitShape::Rect,
        }
    }

    pub const fn ellipse(ox: f32, oy: f32, width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::new(ox, oy),
            size: Vec2::new(width, height),
            shape: HitShape::Ellipse,
        }
    }

    /// Place the hitbox at an anchor position
    pub fn at(&self, anchor: Vec2) -> WorldHitbox {
        WorldHitbox {
            bounds: Rect {
                pos: anchor + self.offset,
                size: self.size,
            },
            shape: self.shape,
        }
    }
}

/// A hitbox resolved to world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldHitbox {
    pub bounds: Rect,
    pub shape: HitShape,
}
