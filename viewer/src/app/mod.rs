//! The viewer application
//!
//! Owns the window, the [`FrameContext`] and the GPU state, and implements
//! [`ViewerApp`] for the event loop.

mod context;
pub mod event_loop;

pub use context::FrameContext;
pub use event_loop::{AppEventHandler, ViewerApp, run};

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use winit::event::{DeviceEvent, WindowEvent};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowAttributes};

use tessellab_core::{ActiveShader, InputAction, Settings, plan_frame, select_variant};

use crate::graphics::{GraphicsContext, SceneRenderer, ShaderVariantSet};
use crate::ui::SettingsPanel;

const WINDOW_TITLE: &str = "Tessellab";

/// Everything that needs a device. Field order is drop order.
struct Gpu {
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    renderer: SceneRenderer,
    variants: ShaderVariantSet,
    active_shader: ActiveShader,
    graphics: GraphicsContext,
}

pub struct App {
    settings: Settings,
    frame: FrameContext,
    panel: SettingsPanel,
    egui_ctx: egui::Context,
    gpu: Option<Gpu>,
    window: Option<Arc<Window>>,
    should_exit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            frame: FrameContext::new(&settings),
            settings,
            panel: SettingsPanel::new(),
            egui_ctx: egui::Context::default(),
            gpu: None,
            window: None,
            should_exit: false,
        }
    }

    /// Apply the pause state to the cursor and the settings panel
    fn apply_pause(&mut self, paused: bool) {
        self.panel.visible = paused;
        if let Some(window) = &self.window {
            set_cursor_captured(window, !paused);
        }
        tracing::info!("{}", if paused { "Paused" } else { "Resumed" });
    }

    fn handle_key(&mut self, event: &winit::event::KeyEvent) {
        let PhysicalKey::Code(key) = event.physical_key else {
            return;
        };
        let action = self
            .frame
            .key_event(key, event.state.is_pressed(), event.repeat);
        self.apply_action(action);
    }

    fn apply_action(&mut self, action: InputAction) {
        match action {
            InputAction::Quit => {
                tracing::info!("Quit requested");
                self.should_exit = true;
            }
            InputAction::PauseToggled(paused) => self.apply_pause(paused),
            InputAction::None => {}
        }
    }
}

/// Grab and hide the cursor, or release and show it.
///
/// Locked is tried first; platforms without it get Confined.
fn set_cursor_captured(window: &Window, captured: bool) {
    if captured {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("Failed to grab cursor: {}", e);
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        tracing::warn!("Failed to release cursor: {}", e);
    }
    window.set_cursor_visible(!captured);
}

impl ViewerApp for App {
    fn window_attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.window.width,
                self.settings.window.height,
            ))
    }

    fn on_window_created(&mut self, window: Arc<Window>) -> Result<()> {
        let graphics = GraphicsContext::new(window.clone(), self.settings.window.vsync)?;

        let mut variants = ShaderVariantSet::new(
            graphics.device(),
            graphics.surface_format(),
            graphics.supports_wireframe(),
        );
        let active_shader = ActiveShader::new(select_variant(&self.frame.config), &mut variants);

        let mesh = self.settings.scene.primitive.mesh();
        let renderer =
            SceneRenderer::new(&graphics, &variants, &mesh, self.settings.scene.clear_color);

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            graphics.device(),
            graphics.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        self.gpu = Some(Gpu {
            egui_state,
            egui_renderer,
            renderer,
            variants,
            active_shader,
            graphics,
        });

        let paused = self.frame.input.is_paused();
        self.panel.visible = paused;
        set_cursor_captured(&window, !paused);
        self.window = Some(window);

        tracing::info!(
            "Viewer ready: {:?}, {}x{}",
            self.settings.scene.primitive,
            self.settings.window.width,
            self.settings.window.height
        );
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key, .. } => self.handle_key(key),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.graphics.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.frame.input.release_all(),
            _ => {}
        }

        // The panel only takes input while paused
        if self.panel.visible
            && let (Some(gpu), Some(window)) = (&mut self.gpu, &self.window)
        {
            let response = gpu.egui_state.on_window_event(window, event);
            if response.repaint {
                window.request_redraw();
            }
        }

        false
    }

    fn on_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = *event {
            self.frame.input.mouse_motion(dx, dy);
        }
    }

    fn update_input(&mut self) {
        self.frame.advance(Instant::now());
    }

    fn render_frame(&mut self) -> Result<()> {
        let (Some(gpu), Some(window)) = (&mut self.gpu, &self.window) else {
            return Ok(());
        };

        gpu.active_shader
            .update(&self.frame.config, &mut gpu.variants);
        let plan = plan_frame(
            &self.frame.config,
            &self.frame.camera,
            gpu.graphics.aspect_ratio(),
            &gpu.renderer.counts(),
        );

        let surface_texture = match gpu.graphics.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(anyhow!("Surface out of memory"));
            }
            Err(e) => {
                tracing::warn!("Failed to get surface texture: {}", e);
                return Ok(());
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            gpu.graphics
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });

        gpu.renderer.render(
            &gpu.graphics,
            &mut encoder,
            &view,
            &plan,
            gpu.variants.bound(),
        );

        if self.panel.visible {
            let raw_input = gpu.egui_state.take_egui_input(window);
            let panel = &mut self.panel;
            let config = &mut self.frame.config;
            let full_output = self.egui_ctx.run(raw_input, |ctx| {
                if panel.show_as_window(ctx, config) {
                    tracing::trace!("Configuration changed: {:?}", config);
                }
            });

            gpu.egui_state
                .handle_platform_output(window, full_output.platform_output);

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [gpu.graphics.width(), gpu.graphics.height()],
                pixels_per_point: window.scale_factor() as f32,
            };

            let tris = self
                .egui_ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point);

            for (id, delta) in &full_output.textures_delta.set {
                gpu.egui_renderer.update_texture(
                    gpu.graphics.device(),
                    gpu.graphics.queue(),
                    *id,
                    delta,
                );
            }

            gpu.egui_renderer.update_buffers(
                gpu.graphics.device(),
                gpu.graphics.queue(),
                &mut encoder,
                &tris,
                &screen_descriptor,
            );

            {
                let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                let mut render_pass_static = render_pass.forget_lifetime();
                gpu.egui_renderer
                    .render(&mut render_pass_static, &tris, &screen_descriptor);
            }

            for id in &full_output.textures_delta.free {
                gpu.egui_renderer.free_texture(id);
            }
        }

        gpu.graphics
            .queue()
            .submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(())
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tessellab_core::FlyCamera;
    use winit::keyboard::KeyCode;

    use super::*;

    fn press(app: &mut App, key: KeyCode) {
        let action = app.frame.key_event(key, true, false);
        app.apply_action(action);
        app.frame.key_event(key, false, false);
    }

    #[test]
    fn test_pause_toggles_settings_panel() {
        let mut app = App::new(Settings::default());
        assert!(!app.panel.visible);

        press(&mut app, KeyCode::Space);
        assert!(app.panel.visible);
        assert!(app.frame.input.is_paused());

        press(&mut app, KeyCode::Space);
        assert!(!app.panel.visible);
        assert!(!app.frame.input.is_paused());
    }

    #[test]
    fn test_camera_frozen_while_panel_open() {
        let mut app = App::new(Settings::default());
        let start = Instant::now();
        app.frame.advance(start);

        press(&mut app, KeyCode::Space);
        app.frame.key_event(KeyCode::KeyW, true, false);
        app.frame.input.mouse_motion(10.0, 10.0);
        app.frame.input.mouse_motion(50.0, -20.0);
        app.frame.advance(start + Duration::from_secs(1));
        assert_eq!(app.frame.camera, FlyCamera::default());
        assert!(app.panel.visible);

        // Unpausing hands movement back to the camera
        press(&mut app, KeyCode::Space);
        app.frame.advance(start + Duration::from_secs(2));
        assert!(app.frame.camera.position.z < FlyCamera::default().position.z);
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut app = App::new(Settings::default());
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Escape);
        assert!(app.should_exit());
    }
}
