use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    assets::{self, PendingAssets},
    config::AppConfig,
    error::{AppError, RenderError, SurfaceInitError},
    frame_loop::{FrameLoop, LoopControl},
    gfx::{
        camera::{CameraRig, PerspectiveCamera},
        rendering::{
            render_engine::RenderEngine,
            traits::{ResizeTarget, SceneRenderer},
        },
        scene::{builder, Scene},
    },
    ui::{debug_panel, UiManager},
    viewport::{framebuffer_scale, handle_resize, Viewport},
};

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Runs the event loop until the window closes.
    ///
    /// Returns the first fatal error, if any.
    pub fn run(self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(self.config);
        event_loop.run_app(&mut state)?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Wgpu renderer plus the debug overlay, bound to one window
struct WindowRenderer {
    window: Arc<Window>,
    engine: RenderEngine,
    ui: Option<UiManager>,
    logical_size: (f64, f64),
}

impl SceneRenderer for WindowRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.engine.update(camera.uniform());

        let window = &self.window;
        let result = match self.ui.as_mut() {
            Some(ui) => self.engine.render_frame(
                scene,
                Some(
                    |device: &wgpu::Device,
                     queue: &wgpu::Queue,
                     encoder: &mut wgpu::CommandEncoder,
                     view: &wgpu::TextureView| {
                        ui.draw(device, queue, encoder, window, view, debug_panel);
                    },
                ),
            ),
            None => self.engine.render_frame(
                scene,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            ),
        };

        match result {
            Ok(()) => Ok(()),
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.engine.reconfigure();
                Ok(())
            }
            Err(e @ RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => Err(e),
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                Ok(())
            }
        }
    }
}

impl ResizeTarget for WindowRenderer {
    fn set_size(&mut self, width: f64, height: f64) {
        self.logical_size = (width, height);
        self.engine.set_size(width, height);
        self.sync_ui();
    }

    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.engine.set_pixel_ratio(pixel_ratio);
        self.sync_ui();
    }
}

impl WindowRenderer {
    fn sync_ui(&mut self) {
        if let Some(ui) = self.ui.as_mut() {
            let (width, height) = self.logical_size;
            let (buffer_width, _) = self.engine.get_surface_size();
            ui.update_display_size(width, height, framebuffer_scale(width, buffer_width));
        }
    }
}

/// Everything that exists once the window is up
struct Running {
    window: Arc<Window>,
    renderer: WindowRenderer,
    frame_loop: FrameLoop,
    viewport: Viewport,
}

struct AppState {
    config: AppConfig,
    pending: Option<PendingAssets>,
    running: Option<Running>,
    error: Option<AppError>,
}

impl AppState {
    fn new(config: AppConfig) -> Self {
        // Assets start loading before the window exists
        let pending = assets::spawn_loader(config.assets.clone());
        Self {
            config,
            pending: Some(pending),
            running: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running, SurfaceInitError> {
        let (width, height) = self.config.initial_size;
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.title.clone())
                    .with_inner_size(LogicalSize::new(width, height)),
            )?,
        );

        let scale_factor = window.scale_factor();
        let size = window.inner_size().to_logical::<f64>(scale_factor);
        log::info!(
            "Window created at {}x{} (scale factor {})",
            size.width,
            size.height,
            scale_factor
        );

        let viewport = Viewport::new(size.width, size.height, scale_factor);
        let engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            size.width,
            size.height,
            viewport.pixel_ratio,
        ))?;

        let ui = self.config.show_debug_panel.then(|| {
            UiManager::new(
                engine.device(),
                engine.queue(),
                engine.surface_format(),
                &window,
                viewport.pixel_ratio,
            )
        });

        let rig = CameraRig::new(&self.config.camera, viewport.aspect());
        let mut scene = Scene::new();
        builder::add_camera(&mut scene, &rig.camera);

        let pending = self
            .pending
            .take()
            .unwrap_or_else(|| assets::spawn_loader(self.config.assets.clone()));
        let frame_loop = FrameLoop::new(scene, rig, pending, self.config.scene.clone());

        let mut renderer = WindowRenderer {
            window: window.clone(),
            engine,
            ui,
            logical_size: (size.width, size.height),
        };
        renderer.sync_ui();

        Ok(Running {
            window,
            renderer,
            frame_loop,
            viewport,
        })
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let ui_captured = match running.renderer.ui.as_mut() {
            Some(ui) => ui.handle_input(&running.window, window_id, &event),
            None => false,
        };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                running.frame_loop.stop_handle().stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    log::debug!("Window minimised, keeping the previous viewport");
                    return;
                }
                let scale_factor = running.window.scale_factor();
                let logical = size.to_logical::<f64>(scale_factor);
                handle_resize(
                    &mut running.viewport,
                    &mut running.frame_loop.camera_rig_mut().camera,
                    &mut running.renderer,
                    logical.width,
                    logical.height,
                    scale_factor,
                );
            }
            WindowEvent::RedrawRequested => match running.frame_loop.tick(&mut running.renderer) {
                LoopControl::Continue => running.window.request_redraw(),
                LoopControl::Stop => event_loop.exit(),
            },
            WindowEvent::ModifiersChanged(_) => {
                let height = running.window.inner_size().height as f32;
                running.frame_loop.camera_rig_mut().process_event(&event, height);
            }
            _ if !ui_captured => {
                // Cursor positions arrive in physical pixels
                let height = running.window.inner_size().height as f32;
                running.frame_loop.camera_rig_mut().process_event(&event, height);
            }
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_ref() {
            log::info!("Exiting after {} frames", running.frame_loop.frame_count());
        }
    }
}
