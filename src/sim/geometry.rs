//! Axis-aligned rectangles for the field, delete zone and inventory strip
//!
//! Screen-space convention: x grows right, y grows down.

use glam::Vec2;

/// Axis-aligned rectangle (bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrink by `amount` on every side.
    ///
    /// An axis too narrow for the inset collapses onto its center line, so the
    /// result always lies inside `self`.
    pub fn inset(&self, amount: f32) -> Rect {
        let amount = amount.max(0.0);
        let c = self.center();
        let (min_x, max_x) = if 2.0 * amount >= self.width() {
            (c.x, c.x)
        } else {
            (self.min.x + amount, self.max.x - amount)
        };
        let (min_y, max_y) = if 2.0 * amount >= self.height() {
            (c.y, c.y)
        } else {
            (self.min.y + amount, self.max.y - amount)
        };
        Rect {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Nearest point inside the rectangle
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Corners in (top-left, top-right, bottom-right, bottom-left) order
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}
