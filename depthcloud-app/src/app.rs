//! Application state and the winit event loop.

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use depthcloud_gpu::{DEPTH_FORMAT, FrameUniforms, Renderer, SurfaceWrapper, VoxelRenderer, wgpu};
use glam::{Mat4, Vec3};
use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::controls::CameraInput;
use crate::session::{GenerateParams, Session};
use crate::ui::{self, FrameStats, UiAction};

const FOV_Y_DEGREES: f32 = 65.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

/// Run the viewer until the window closes.
pub fn run(params: GenerateParams) -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let event_loop = EventLoop::new().map_err(|e| format!("Failed to create event loop: {e}"))?;
    let mut app = App::new(params);
    let run_result = event_loop.run_app(&mut app);
    let app_result = app.finish();
    run_result?;
    app_result
}

struct App {
    params: Option<GenerateParams>,
    state: Option<ViewerState>,
    error: Option<String>,
}

impl App {
    fn new(params: GenerateParams) -> Self {
        Self {
            params: Some(params),
            state: None,
            error: None,
        }
    }

    fn finish(self) -> Result<(), Box<dyn Error>> {
        if let Some(err) = self.error {
            Err(err.into())
        } else {
            Ok(())
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.state.is_some() || self.error.is_some() {
            return;
        }

        let params = self.params.take().expect("params already consumed");

        match ViewerState::new(event_loop, params) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                error!("Failed to initialize viewer: {err}");
                self.error = Some(err.to_string());
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.window.id() != window_id {
            return;
        }

        if state.handle_window_event(event_loop, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.window.inner_size();
                    state.resize(size);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("GPU Out of Memory - exiting");
                    event_loop.exit();
                }
                Err(e) => error!("Render error: {:?}", e),
            },
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.window.request_redraw();
        }
    }
}

struct ViewerState {
    window: Arc<Window>,
    renderer: Renderer,
    surface: SurfaceWrapper,
    voxels: VoxelRenderer,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    session: Session,
    controls: CameraInput,
    depth_view: wgpu::TextureView,
    last_frame: Instant,
}

impl ViewerState {
    fn new(
        event_loop: &winit::event_loop::ActiveEventLoop,
        params: GenerateParams,
    ) -> Result<Self, Box<dyn Error>> {
        let window_attributes = Window::default_attributes()
            .with_title("depthcloud")
            .with_inner_size(PhysicalSize::new(1600, 900));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let renderer = pollster::block_on(Renderer::new())?;
        let size = window.inner_size();

        let surface = renderer.instance().create_surface(window.clone())?;
        let surface = renderer.create_surface(surface, size.width, size.height)?;

        // Shader or pipeline validation failures are fatal here, before any
        // frame is rendered.
        let voxels = VoxelRenderer::new(renderer.device(), surface.format())?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx,
            egui::ViewportId::ROOT,
            window.as_ref(),
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            renderer.device(),
            surface.format(),
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        let depth_view = create_depth_view(renderer.device(), surface.width(), surface.height());

        info!("viewer initialized at {}x{}", size.width, size.height);

        Ok(Self {
            window,
            renderer,
            surface,
            voxels,
            egui_state,
            egui_renderer,
            session: Session::new(params),
            controls: CameraInput::new(),
            depth_view,
            last_frame: Instant::now(),
        })
    }

    /// Returns true when the event is fully handled here.
    fn handle_window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        event: &WindowEvent,
    ) -> bool {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
            ..
        } = event
        {
            event_loop.exit();
            return true;
        }

        let response = self.egui_state.on_window_event(&self.window, event);
        if response.repaint {
            self.window.request_redraw();
        }

        let ui_wants_pointer =
            response.consumed || self.egui_state.egui_ctx().wants_pointer_input();
        self.controls
            .handle_event(event, &mut self.session.camera, ui_wants_pointer)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.surface
            .resize(self.renderer.device(), new_size.width, new_size.height);
        self.depth_view =
            create_depth_view(self.renderer.device(), new_size.width, new_size.height);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let frame_seconds = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.session.poll_dialogs();

        // UI runs first so a Generate click rebuilds the cloud (and recenters
        // the camera) before this frame's matrices are written.
        let stats = FrameStats {
            fps: if frame_seconds > 0.0 {
                1.0 / frame_seconds
            } else {
                0.0
            },
            vertex_count: self.session.store.count(),
            max_depth: self.session.store.current().map(|c| c.max_depth),
        };

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.egui_state.egui_ctx().clone();
        let mut action = None;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            action = ui::draw(ctx, &mut self.session, stats);
        });
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        if action == Some(UiAction::Generate) && self.session.generate() {
            // The instance buffer is re-uploaded only once the store has
            // accepted the full cloud.
            if let Some(cloud) = self.session.store.current() {
                self.voxels.upload(self.renderer.device(), cloud);
            }
        }

        let aspect = self.surface.width() as f32 / self.surface.height() as f32;
        let projection = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
        let view = self.session.camera.view_matrix();
        let model = Mat4::from_scale(Vec3::splat(self.session.params.voxel_scale));
        self.voxels.prepare(
            self.renderer.queue(),
            &FrameUniforms::from_matrices(projection, view, model),
        );

        let surface_texture = self.surface.get_current_texture()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = self.renderer.device();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        self.voxels.render(
            &mut encoder,
            &surface_view,
            &self.depth_view,
            self.session.params.background,
        );

        // UI pass on top of the scene.
        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface.width(), self.surface.height()],
            pixels_per_point: full_output.pixels_per_point,
        };
        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, self.renderer.queue(), *id, delta);
        }
        let user_cmd_bufs = self.egui_renderer.update_buffers(
            device,
            self.renderer.queue(),
            &mut encoder,
            &paint_jobs,
            &screen,
        );
        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("UI Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen);
        }

        self.renderer
            .queue()
            .submit(user_cmd_bufs.into_iter().chain(Some(encoder.finish())));
        surface_texture.present();

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
