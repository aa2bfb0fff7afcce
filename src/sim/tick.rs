//! Fixed timestep simulation tick
//!
//! One call advances the sandbox by `dt` seconds:
//! move, mix, delete, capture, release. Rendering lives elsewhere.

use glam::Vec2;

use super::collision::{circle_contact, keep_in_bounds, separate};
use super::color::mix;
use super::state::{SimEvent, SimState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position in field coordinates
    pub cursor: Vec2,
    /// Vacuum button held
    pub vacuum: bool,
    /// Release one ball from the inventory (one-shot)
    pub release: bool,
    /// Velocity for the released ball; `None` picks a random one
    pub release_velocity: Option<Vec2>,
}

/// Advance the sandbox by one timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.time_ticks += 1;

    move_balls(state, dt);
    mix_touching(state);
    apply_delete_zone(state);

    if input.vacuum {
        capture_near(state, input.cursor);
    }
    if input.release {
        release_last(state, input.cursor, input.release_velocity);
    }
}

/// Integrate positions and bounce off the field walls
fn move_balls(state: &mut SimState, dt: f32) {
    let field = state.field;
    for ball in &mut state.balls {
        ball.pos += ball.vel * dt;
        keep_in_bounds(ball, &field);
    }
}

/// Blend colors of every overlapping pair and push the pair apart
fn mix_touching(state: &mut SimState) {
    let field = state.field;
    let count = state.balls.len();
    for j in 1..count {
        let (head, tail) = state.balls.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            let Some(contact) = circle_contact(a.pos, a.radius, b.pos, b.radius) else {
                continue;
            };
            let mixed = mix(a.color, b.color);
            a.color = mixed;
            b.color = mixed;
            separate(a, b, &contact);
            keep_in_bounds(a, &field);
            keep_in_bounds(b, &field);
            state.events.push(SimEvent::Mixed { a: a.id, b: b.id });
        }
    }
}

/// Replace every ball whose center sits in the delete zone
fn apply_delete_zone(state: &mut SimState) {
    let zone = state.delete_zone;
    let doomed: Vec<u32> = state
        .balls
        .iter()
        .filter(|b| zone.contains(b.pos))
        .map(|b| b.id)
        .collect();
    if doomed.is_empty() {
        return;
    }

    state.balls.retain(|b| !zone.contains(b.pos));
    for id in doomed {
        let replacement = state.spawn_random_ball();
        state.events.push(SimEvent::Deleted { id, replacement });
    }
}

/// Move every field ball within the capture radius into the inventory
fn capture_near(state: &mut SimState, cursor: Vec2) {
    let radius = state.capture_radius;
    let (captured, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.balls)
        .into_iter()
        .partition(|b| b.surface_distance(cursor) <= radius);
    state.balls = kept;

    for ball in captured {
        state.events.push(SimEvent::Captured { id: ball.id });
        state.inventory.push(ball);
    }
}

/// Put the most recently captured ball back on the field at the cursor
fn release_last(state: &mut SimState, cursor: Vec2, velocity: Option<Vec2>) {
    let Some(mut ball) = state.inventory.pop_last() else {
        return;
    };
    ball.pos = state.field.inset(ball.radius).clamp(cursor);
    ball.vel = match velocity {
        Some(v) => v,
        None => state.random_velocity(),
    };
    state.events.push(SimEvent::Released { id: ball.id });
    state.balls.push(ball);
}
