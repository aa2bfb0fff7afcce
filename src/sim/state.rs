//! Simulation state and core types
//!
//! `SimState` is the whole sandbox: field balls, inventory, geometry and the
//! seeded RNG. Nothing outside it is mutated by a tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::Color;
use super::geometry::Rect;
use super::inventory::{Inventory, InventoryLayout};
use crate::consts::RESPAWN_ATTEMPTS;
use crate::settings::Settings;

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: radius.max(0.0),
            color,
        }
    }

    /// Distance from `point` to the ball's rim (negative inside the ball)
    #[inline]
    pub fn surface_distance(&self, point: Vec2) -> f32 {
        self.pos.distance(point) - self.radius
    }
}

/// Something that happened during a tick, drained by the app for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Two touching balls took on a blended color
    Mixed { a: u32, b: u32 },
    /// A ball entered the delete zone and `replacement` was spawned for it
    Deleted { id: u32, replacement: u32 },
    /// The vacuum moved a ball into the inventory
    Captured { id: u32 },
    /// A ball left the inventory at the cursor
    Released { id: u32 },
}

/// Random velocity with uniform direction and speed in `speed_range`
pub fn random_velocity(rng: &mut impl Rng, speed_range: (f32, f32)) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let speed = rng.random_range(speed_range.0..=speed_range.1);
    Vec2::from_angle(angle) * speed
}

/// Random radius in `radius_range`
pub fn random_radius(rng: &mut impl Rng, radius_range: (f32, f32)) -> f32 {
    rng.random_range(radius_range.0..=radius_range.1)
}

/// Random center for a ball of `radius` inside `field` whose center avoids `avoid`.
///
/// Falls back to the farthest corner of the reachable area that lies outside
/// `avoid` when sampling keeps landing inside it. Only when every corner is
/// covered does the result end up inside `avoid`.
pub fn random_position(rng: &mut impl Rng, field: &Rect, avoid: &Rect, radius: f32) -> Vec2 {
    let area = field.inset(radius);
    for _ in 0..RESPAWN_ATTEMPTS {
        let p = Vec2::new(
            rng.random_range(area.min.x..=area.max.x),
            rng.random_range(area.min.y..=area.max.y),
        );
        if !avoid.contains(p) {
            return p;
        }
    }

    let target = avoid.center();
    let farthest = |a: &Vec2, b: &Vec2| {
        a.distance_squared(target)
            .total_cmp(&b.distance_squared(target))
    };
    let corners = area.corners();
    corners
        .iter()
        .filter(|&&c| !avoid.contains(c))
        .max_by(|a, b| farthest(*a, *b))
        .or_else(|| corners.iter().max_by(|a, b| farthest(*a, *b)))
        .copied()
        .unwrap_or(area.min)
}

/// Complete sandbox state (deterministic for a given seed and input trace)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Playfield bounds; ball centers never leave it
    pub field: Rect,
    /// Balls whose center enters this zone are replaced
    pub delete_zone: Rect,
    /// Vacuum capture radius around the cursor
    pub capture_radius: f32,
    /// Radius range for spawned balls
    pub radius_range: (f32, f32),
    /// Speed range for spawned and released balls
    pub speed_range: (f32, f32),
    /// Balls on the field (capture order follows this order)
    pub balls: Vec<Ball>,
    /// Balls held by the vacuum
    pub inventory: Inventory,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<SimEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// Create an empty sandbox from settings
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let width = settings.window_width as f32;
        let field_height = settings.field_height();
        let field = settings.field_rect();
        let delete_zone = settings.delete_zone_rect();

        let strip = Rect::new(
            Vec2::new(0.0, field_height),
            Vec2::new(width, settings.window_height as f32),
        );
        let layout = InventoryLayout::new(
            strip,
            settings.inventory_slot_size,
            settings.inventory_padding,
        );

        Self {
            seed,
            field,
            delete_zone,
            capture_radius: settings.capture_radius,
            radius_range: settings.ball_radius_range,
            speed_range: settings.ball_speed_range,
            balls: Vec::new(),
            inventory: Inventory::new(layout),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Create a sandbox populated with `settings.initial_balls` random balls
    pub fn populated(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::new(seed, settings);
        for _ in 0..settings.initial_balls {
            state.spawn_random_ball();
        }
        log::info!(
            "Spawned {} balls (seed {}, field {}x{})",
            state.balls.len(),
            seed,
            state.field.width(),
            state.field.height()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put a ball on the field; the position is clamped into the field
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> u32 {
        let id = self.next_entity_id();
        let pos = self.field.inset(radius).clamp(pos);
        self.balls.push(Ball::new(id, pos, vel, radius, color));
        id
    }

    /// Put a random ball somewhere on the field outside the delete zone
    pub fn spawn_random_ball(&mut self) -> u32 {
        let radius = random_radius(&mut self.rng, self.radius_range);
        let pos = random_position(&mut self.rng, &self.field, &self.delete_zone, radius);
        let vel = random_velocity(&mut self.rng, self.speed_range);
        let color = Color::random(&mut self.rng);
        self.spawn_ball(pos, vel, radius, color)
    }

    /// Random velocity from the sandbox RNG
    pub fn random_velocity(&mut self) -> Vec2 {
        random_velocity(&mut self.rng, self.speed_range)
    }

    /// Field balls plus inventory balls
    pub fn total_balls(&self) -> usize {
        self.balls.len() + self.inventory.len()
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
