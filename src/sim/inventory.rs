//! Vacuum inventory and the capture strip layout
//!
//! Captured balls leave the field and wait in a strip along the bottom of the
//! window. Release is last-in, first-out.

use glam::Vec2;

use super::geometry::Rect;
use super::state::Ball;

/// Where inventory slots sit on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryLayout {
    /// The strip along the bottom of the window
    pub strip: Rect,
    /// Nominal slot cell size
    pub slot_size: f32,
    /// Horizontal gutter on each side of the strip
    pub padding: f32,
}

impl InventoryLayout {
    pub fn new(strip: Rect, slot_size: f32, padding: f32) -> Self {
        Self {
            strip,
            slot_size: slot_size.max(1.0),
            padding: padding.max(0.0),
        }
    }

    /// Number of slots per row
    pub fn columns(&self) -> usize {
        let width = self.strip.width().max(1.0);
        let usable = (width - 2.0 * self.padding.min(width / 2.0)).max(1.0);
        ((usable / self.slot_size) as usize).max(1)
    }

    /// Center of the slot for `index`.
    ///
    /// Slots fill left to right, then top to bottom. Rows that do not fit in the
    /// strip pile onto its last visible row.
    pub fn slot_position(&self, index: usize) -> Vec2 {
        let width = self.strip.width().max(1.0);
        let usable = (width - 2.0 * self.padding.min(width / 2.0)).max(1.0);
        let columns = self.columns();
        let slot_width = usable / columns as f32;
        let gutter = (width - usable) / 2.0;

        let col = index % columns;
        let row = index / columns;

        let x = self.strip.min.x + gutter + slot_width * (col as f32 + 0.5);
        let x = x.clamp(
            self.strip.min.x + slot_width / 2.0,
            (self.strip.max.x - slot_width / 2.0).max(self.strip.min.x + slot_width / 2.0),
        );

        let strip_height = self.strip.height();
        let slot_height = self.slot_size.min(strip_height.max(1.0));
        let max_offset = (strip_height - slot_height / 2.0).max(0.0);
        let row_offset = slot_height * (row as f32 + 0.5);
        let offset = if max_offset > 0.0 {
            row_offset.min(max_offset)
        } else {
            slot_height / 2.0
        };
        let y = (self.strip.min.y + offset).min(self.strip.max.y - slot_height / 2.0);

        Vec2::new(x, y)
    }
}

/// Balls held by the vacuum
#[derive(Debug, Clone)]
pub struct Inventory {
    balls: Vec<Ball>,
    pub layout: InventoryLayout,
}

impl Inventory {
    pub fn new(layout: InventoryLayout) -> Self {
        Self {
            balls: Vec::new(),
            layout,
        }
    }

    pub fn push(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Remove the most recently captured ball
    pub fn pop_last(&mut self) -> Option<Ball> {
        self.balls.pop()
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.balls.iter().any(|b| b.id == id)
    }

    /// Balls paired with the slot they are displayed in
    pub fn slots(&self) -> impl Iterator<Item = (Vec2, &Ball)> {
        self.balls
            .iter()
            .enumerate()
            .map(|(i, ball)| (self.layout.slot_position(i), ball))
    }
}
