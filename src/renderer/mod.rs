//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat triangle list every frame and drawn with a
//! single vertex-colored pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{FrameFailure, RenderState};
pub use scene::{SceneView, build_scene, hud_text};
pub use vertex::Vertex;
