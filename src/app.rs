//! Application event loop and frame driving.
//!
//! The frame driver owns the winit event loop and calls a [`Stage`] — the
//! user's scene — at two points: once at startup to build the scene, and
//! once per display refresh to advance it before rendering. Scene time is
//! accumulated in fixed `1 / frames_per_second` steps derived from the
//! monitor's refresh rate, so the animation is a deterministic function of
//! the frame count rather than of wall-clock jitter.
//!
//! Each frame runs strictly `update -> render` on this one thread; nothing
//! else touches the scene.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{context::Context, data_structures::scene_graph::Scene, renderer::Renderer};

const FALLBACK_FRAMES_PER_SECOND: f32 = 60.0;

/// A renderable scene driven by the application loop.
///
/// `build` runs once after the GPU context exists; load meshes and textures
/// through the renderer here and return the assembled scene. `update` runs
/// every frame with the accumulated scene time before the scene is drawn.
pub trait Stage {
    fn build(&mut self, ctx: &Context, renderer: &mut Renderer) -> anyhow::Result<Scene>;

    fn update(&mut self, scene: &mut Scene, time: f32);
}

struct AppState {
    ctx: Context,
    renderer: Renderer,
    scene: Scene,
    is_surface_configured: bool,
}

impl AppState {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.is_surface_configured = true;
            self.ctx.resize(width, height);
            self.renderer.resize(width, height);
        }
    }
}

struct App<S: Stage> {
    stage: S,
    state: Option<AppState>,
    init_error: Option<anyhow::Error>,
    time: f32,
    frames_per_second: f32,
}

impl<S: Stage> App<S> {
    fn new(stage: S) -> Self {
        Self {
            stage,
            state: None,
            init_error: None,
            time: 0.0,
            frames_per_second: FALLBACK_FRAMES_PER_SECOND,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let window = Arc::new(event_loop.create_window(Window::default_attributes())?);

        self.frames_per_second = window
            .current_monitor()
            .and_then(|monitor| monitor.refresh_rate_millihertz())
            .map(|millihertz| millihertz as f32 / 1000.0)
            .unwrap_or(FALLBACK_FRAMES_PER_SECOND);
        log::debug!("driving frames at {} fps", self.frames_per_second);

        let ctx = futures::executor::block_on(Context::new(window))?;
        let mut renderer = Renderer::new(&ctx);
        let scene = self.stage.build(&ctx, &mut renderer)?;

        Ok(AppState {
            ctx,
            renderer,
            scene,
            is_surface_configured: false,
        })
    }
}

impl<S: Stage> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        match self.init(event_loop) {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("app initialization failed: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                if !state.is_surface_configured {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }

                self.time += 1.0 / self.frames_per_second;
                self.stage.update(&mut state.scene, self.time);

                match state.renderer.render(&state.ctx, &state.scene, self.time) {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("unable to render: {e}");
                    }
                }

                state.ctx.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Run `stage` until the window is closed.
///
/// Setup failures (event loop, GPU context, asset loading in
/// [`Stage::build`]) are returned instead of aborting the process.
pub fn run<S: Stage>(stage: S) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(stage);
    event_loop.run_app(&mut app)?;

    match app.init_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
