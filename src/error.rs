//! Error types
//!
//! The simulation itself cannot fail. Everything here is about getting a
//! window, a GPU and a valid settings file before the first frame.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while initialising the GPU.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Fatal application errors; any of them ends the process with a failure status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("rendering failed: {0}")]
    Render(#[from] wgpu::SurfaceError),
}
