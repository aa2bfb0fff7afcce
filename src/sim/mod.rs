//! Deterministic simulation module
//!
//! All sandbox logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (field order, then inventory order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod color;
pub mod geometry;
pub mod inventory;
pub mod state;
pub mod tick;

pub use collision::{Contact, circle_contact, circles_overlap, keep_in_bounds, reflect_velocity};
pub use color::{Color, mix};
pub use geometry::Rect;
pub use inventory::{Inventory, InventoryLayout};
pub use state::{Ball, SimEvent, SimState, random_position, random_radius, random_velocity};
pub use tick::{TickInput, tick};
