//! Axis-aligned geometry for platformer entities
//!
//! Screen coordinates: x grows to the right, y grows downwards. "Above" a
//! coordinate therefore means a smaller y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Half-plane tests of a point against a single coordinate
pub trait HalfPlane {
    fn is_left_of(&self, x: f32) -> bool;
    fn is_right_of(&self, x: f32) -> bool;
    fn is_above(&self, y: f32) -> bool;
    fn is_below(&self, y: f32) -> bool;
}

impl HalfPlane for Vec2 {
    #[inline]
    fn is_left_of(&self, x: f32) -> bool {
        self.x < x
    }

    #[inline]
    fn is_right_of(&self, x: f32) -> bool {
        self.x > x
    }

    #[inline]
    fn is_above(&self, y: f32) -> bool {
        self.y < y
    }

    #[inline]
    fn is_below(&self, y: f32) -> bool {
        self.y > y
    }
}

/// An axis-aligned bounding box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: Vec2,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(top_left: Vec2, width: f32, height: f32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.top_left.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn centre(&self) -> Vec2 {
        self.top_left + self.size() * 0.5
    }

    /// Strict intersection test; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Penetration depth on each axis, or `None` when the boxes are apart
    pub fn penetration(&self, other: &BoundingBox) -> Option<Vec2> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.right().min(other.right()) - self.left().max(other.left());
        let y = self.bottom().min(other.bottom()) - self.top().max(other.top());
        Some(Vec2::new(x, y))
    }

    pub fn translate_to(&mut self, top_left: Vec2) {
        self.top_left = top_left;
    }
}
