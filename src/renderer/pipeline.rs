//! WebGPU render pipeline setup

use std::sync::Arc;

use glam::Vec2;
use winit::window::Window;

use super::vertex::{Vertex, colors, srgb_to_linear};
use crate::error::GpuError;

/// Initial vertex buffer capacity (vertices)
const INITIAL_VERTEX_CAPACITY: usize = 16 * 1024;

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    /// Vertices the current buffer can hold
    vertex_capacity: usize,
    pub vertex_count: u32,
    /// Surface size in pixels
    pub size: (u32, u32),
    /// Logical scene size the vertices are expressed in
    pub view_size: Vec2,
}

impl RenderState {
    /// Create instance, surface and adapter for `window`, then the pipeline
    pub async fn for_window(window: Arc<Window>, view_size: Vec2) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        Self::new(surface, &adapter, size.width, size.height, view_size).await
    }

    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        view_size: Vec2,
    ) -> Result<Self, GpuError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("color-vacuum-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::debug!("Surface formats: {:?}", surface_caps.formats);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;
        log::info!("Using surface format: {:?}", surface_format);

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Create pipeline
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            vertex_count: 0,
            size: (width, height),
            view_size,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size (after `Lost`/`Outdated`)
    pub fn reconfigure(&mut self) {
        self.resize(self.size.0, self.size.1);
    }

    /// Map a scene color into what the surface expects
    fn surface_color(&self, c: [f32; 4]) -> [f32; 4] {
        if self.config.format.is_srgb() {
            [srgb_to_linear(c[0]), srgb_to_linear(c[1]), srgb_to_linear(c[2]), c[3]]
        } else {
            c
        }
    }

    /// Upload vertices and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = scene_to_ndc(self.view_size, v.position[0], v.position[1]);
                Vertex::new(x, y, self.surface_color(v.color))
            })
            .collect();

        if ndc_vertices.len() > self.vertex_capacity {
            self.vertex_capacity = ndc_vertices.len().next_power_of_two();
            log::debug!("Growing vertex buffer to {} vertices", self.vertex_capacity);
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
        }
        if !ndc_vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&ndc_vertices));
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        let bg = self.surface_color(colors::BACKGROUND);
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// How the frame loop reacts to a frame that could not be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFailure {
    /// Surface went stale; reconfigure and try again next frame
    Reconfigure,
    /// Unrecoverable; stop the app
    Fatal,
    /// Drop this frame
    Skip,
}

impl FrameFailure {
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            _ => Self::Skip,
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Convert scene coordinates (pixels, y down) to normalized device coordinates
pub fn scene_to_ndc(view_size: Vec2, x: f32, y: f32) -> (f32, f32) {
    let w = view_size.x.max(1.0);
    let h = view_size.y.max(1.0);
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_to_ndc_corners() {
        let view = Vec2::new(1100.0, 720.0);
        assert_eq!(scene_to_ndc(view, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(scene_to_ndc(view, 1100.0, 720.0), (1.0, -1.0));
        assert_eq!(scene_to_ndc(view, 550.0, 360.0), (0.0, 0.0));
    }

    #[test]
    fn test_frame_failure_classification() {
        use wgpu::SurfaceError;
        assert_eq!(FrameFailure::classify(&SurfaceError::OutOfMemory), FrameFailure::Fatal);
        assert_eq!(FrameFailure::classify(&SurfaceError::Lost), FrameFailure::Reconfigure);
        assert_eq!(FrameFailure::classify(&SurfaceError::Outdated), FrameFailure::Reconfigure);
        assert_eq!(FrameFailure::classify(&SurfaceError::Timeout), FrameFailure::Skip);
    }
}
