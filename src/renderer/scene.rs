//! Scene assembly
//!
//! Turns a `SimState` into a triangle list. No GPU involved, so the output can
//! be checked in plain unit tests.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::CIRCLE_SEGMENTS;
use crate::sim::SimState;

/// Delete zone border thickness in pixels
const DELETE_ZONE_BORDER: f32 = 3.0;
/// Cursor ring thickness in pixels
const CURSOR_RING_WIDTH: f32 = 1.5;
/// Inventory balls are drawn no larger than this fraction of a slot
const SLOT_FILL: f32 = 0.42;

/// Per-frame view information that is not part of the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneView {
    /// Logical window size (field coordinates)
    pub size: Vec2,
    /// Cursor in field coordinates, if it is over the window
    pub cursor: Option<Vec2>,
    /// Vacuum button held
    pub vacuum: bool,
}

/// Build the full frame, back to front
pub fn build_scene(state: &SimState, view: &SceneView) -> Vec<Vertex> {
    let ball_tris = (CIRCLE_SEGMENTS * 3) as usize;
    let mut vertices =
        Vec::with_capacity(64 + (state.balls.len() + state.inventory.len() * 2) * ball_tris);

    // Play area
    vertices.extend(shapes::rect(&state.field, colors::PLAYFIELD));

    // Delete zone
    vertices.extend(shapes::rect(&state.delete_zone, colors::DELETE_ZONE));
    vertices.extend(shapes::rect_outline(
        &state.delete_zone,
        DELETE_ZONE_BORDER,
        colors::DELETE_ZONE_BORDER,
    ));

    // Inventory strip
    let layout = &state.inventory.layout;
    vertices.extend(shapes::rect(&layout.strip, colors::INVENTORY_STRIP));

    // Balls on the field
    for ball in &state.balls {
        vertices.extend(shapes::circle(
            ball.pos,
            ball.radius,
            ball.color.to_rgba(1.0),
            CIRCLE_SEGMENTS,
        ));
    }

    // Inventory balls in their slots
    let max_radius = layout.slot_size * SLOT_FILL;
    for (slot, ball) in state.inventory.slots() {
        vertices.extend(shapes::circle(
            slot,
            max_radius,
            colors::INVENTORY_SLOT,
            CIRCLE_SEGMENTS,
        ));
        vertices.extend(shapes::circle(
            slot,
            ball.radius.min(max_radius),
            ball.color.to_rgba(1.0),
            CIRCLE_SEGMENTS,
        ));
    }

    // Vacuum reach
    if let Some(cursor) = view.cursor {
        let color = if view.vacuum {
            colors::CURSOR_RING_ACTIVE
        } else {
            colors::CURSOR_RING
        };
        vertices.extend(shapes::ring(
            cursor,
            state.capture_radius - CURSOR_RING_WIDTH,
            state.capture_radius,
            color,
            CIRCLE_SEGMENTS * 2,
        ));
    }

    vertices
}

/// Short status line for the window title
pub fn hud_text(state: &SimState, fps: u32) -> String {
    format!(
        "Color Vacuum | Active balls: {} | Inventory: {} | {} fps | LMB vacuum, RMB release, Esc/Q quit",
        state.balls.len(),
        state.inventory.len(),
        fps
    )
}
