//! Color Vacuum - a ball mixing sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, color mixing, vacuum, delete zone)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Data-driven sandbox tuning
//! - `error`: Startup and configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AppError, GpuError, SettingsError};
pub use settings::Settings;

/// Sandbox configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth motion)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame we are willing to simulate in one go (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Attempts at finding a respawn position outside the delete zone
    pub const RESPAWN_ATTEMPTS: u32 = 32;

    /// Segments used when tessellating circles
    pub const CIRCLE_SEGMENTS: u32 = 32;

    /// Settings file looked up in the working directory
    pub const SETTINGS_FILE: &str = "color-vacuum.json";
}
