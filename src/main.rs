//! Color Vacuum entry point
//!
//! Opens the window and runs the sandbox loop until the window is closed.

use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use color_vacuum::consts::*;
use color_vacuum::renderer::{FrameFailure, RenderState, SceneView, build_scene, hud_text};
use color_vacuum::sim::{SimEvent, SimState, TickInput, tick};
use color_vacuum::{AppError, Settings};

/// Seconds between window title refreshes
const HUD_REFRESH_SECS: f32 = 0.25;

/// Sandbox instance holding all state
struct App {
    settings: Settings,
    state: SimState,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    accumulator: f32,
    last_frame: Instant,
    /// Duration of the previous frame, used for flick velocity
    last_dt: f32,
    input: TickInput,
    /// Cursor in field coordinates, `None` while outside the window
    cursor: Option<Vec2>,
    /// Cursor position at the start of the current frame
    frame_start_cursor: Vec2,
    // FPS tracking
    frame_times: [Instant; 60],
    frame_index: usize,
    fps: u32,
    hud_timer: f32,
    /// Fatal error raised inside the event loop
    error: Option<AppError>,
}

impl App {
    fn new(settings: Settings, seed: u64) -> Self {
        let state = SimState::populated(seed, &settings);
        let now = Instant::now();
        Self {
            settings,
            state,
            window: None,
            render_state: None,
            accumulator: 0.0,
            last_frame: now,
            last_dt: SIM_DT,
            input: TickInput::default(),
            cursor: None,
            frame_start_cursor: Vec2::ZERO,
            frame_times: [now; 60],
            frame_index: 0,
            fps: 0,
            hud_timer: 0.0,
            error: None,
        }
    }

    fn view_size(&self) -> Vec2 {
        Vec2::new(
            self.settings.window_width as f32,
            self.settings.window_height as f32,
        )
    }

    /// Convert a physical cursor position to field coordinates
    fn to_field(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let Some(window) = &self.window else {
            return Vec2::new(position.x as f32, position.y as f32);
        };
        let size = window.inner_size();
        let scale = self.view_size()
            / Vec2::new(size.width.max(1) as f32, size.height.max(1) as f32);
        Vec2::new(position.x as f32, position.y as f32) * scale
    }

    /// Velocity of the cursor over the last frame, scaled down for a release
    fn flick_velocity(&self) -> Option<Vec2> {
        let cursor = self.cursor?;
        let dt = if self.last_dt > 0.0 { self.last_dt } else { SIM_DT };
        let flick = (cursor - self.frame_start_cursor) / dt / self.settings.spit_speed_divisor;
        (flick.length() >= self.settings.min_flick_speed).then_some(flick)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        self.error = Some(error);
        event_loop.exit();
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.release = false;
            self.input.release_velocity = None;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        for event in self.state.drain_events() {
            match event {
                SimEvent::Mixed { a, b } => log::trace!("Mixed {a} and {b}"),
                SimEvent::Deleted { id, replacement } => {
                    log::debug!("Ball {id} deleted, replaced by {replacement}")
                }
                SimEvent::Captured { id } => log::debug!("Captured ball {id}"),
                SimEvent::Released { id } => log::debug!("Released ball {id}"),
            }
        }

        // Track frame times for FPS
        let now = Instant::now();
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        let elapsed = now.duration_since(oldest).as_secs_f32();
        if elapsed > 0.0 {
            self.fps = (self.frame_times.len() as f32 / elapsed).round() as u32;
        }

        self.hud_timer += dt;
        if self.hud_timer >= HUD_REFRESH_SECS {
            self.hud_timer = 0.0;
            if let Some(window) = &self.window {
                window.set_title(&hud_text(&self.state, self.fps));
            }
        }
    }

    /// Render the current frame
    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let view = SceneView {
            size: self.view_size(),
            cursor: self.cursor,
            vacuum: self.input.vacuum,
        };
        let vertices = build_scene(&self.state, &view);

        let Some(render_state) = &mut self.render_state else {
            return;
        };
        let Err(e) = render_state.render(&vertices) else {
            return;
        };
        match FrameFailure::classify(&e) {
            FrameFailure::Reconfigure => render_state.reconfigure(),
            FrameFailure::Skip => log::warn!("Render error: {:?}", e),
            FrameFailure::Fatal => self.fail(event_loop, e.into()),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let quit = match &event.logical_key {
            Key::Named(NamedKey::Escape) => true,
            Key::Character(c) => c.eq_ignore_ascii_case("q"),
            _ => false,
        };
        if quit {
            log::info!("Quit requested");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Color Vacuum Playground")
            .with_inner_size(LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(window.clone());

        match pollster::block_on(RenderState::for_window(window.clone(), self.view_size())) {
            Ok(render_state) => self.render_state = Some(render_state),
            Err(e) => return self.fail(event_loop, e.into()),
        }

        self.last_frame = Instant::now();
        window.request_redraw();
        log::info!("Color Vacuum running!");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::CursorMoved { position, .. } => {
                let cursor = self.to_field(position);
                self.cursor = Some(cursor);
                self.input.cursor = cursor;
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput { state, button, .. } => match button {
                MouseButton::Left => {
                    self.input.vacuum = state == ElementState::Pressed;
                }
                MouseButton::Right if state == ElementState::Pressed => {
                    self.input.release = true;
                    self.input.release_velocity = self.flick_velocity();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.last_dt = dt;

                self.update(dt);
                self.render(event_loop);
                self.frame_start_cursor = self.input.cursor;
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run() -> Result<(), AppError> {
    let settings = Settings::load(Path::new(SETTINGS_FILE))?;
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("Sandbox seed: {}", seed);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, seed);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Color Vacuum starting...");

    if let Err(e) = run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
