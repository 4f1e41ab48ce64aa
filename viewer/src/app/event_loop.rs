//! Application event loop
//!
//! Drives a [`ViewerApp`] from winit's `ApplicationHandler` callbacks and
//! carries a fatal error back out of [`run`].

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

/// Application behavior the event loop calls into.
pub trait ViewerApp {
    /// Attributes of the single window, created on first resume.
    fn window_attributes(&self) -> WindowAttributes;

    /// Called once the window exists.
    ///
    /// Initialize graphics and any window-dependent resources here.
    /// An error is fatal.
    fn on_window_created(&mut self, window: Arc<Window>) -> anyhow::Result<()>;

    /// Handle a window event.
    ///
    /// Return `true` if the event was consumed (prevents default handling).
    fn on_window_event(&mut self, event: &WindowEvent) -> bool;

    /// Handle a raw device event (mouse motion).
    fn on_device_event(&mut self, event: &DeviceEvent);

    /// Apply held input to the camera.
    ///
    /// Called once per frame before `render_frame()`.
    fn update_input(&mut self);

    /// Render one frame. An error is fatal.
    fn render_frame(&mut self) -> anyhow::Result<()>;

    /// Check if application should exit.
    fn should_exit(&self) -> bool;

    /// Request a redraw from the event loop.
    fn request_redraw(&self);
}

/// winit handler wrapping a [`ViewerApp`].
pub struct AppEventHandler<A: ViewerApp> {
    app: A,
    window_created: bool,
    error: Option<anyhow::Error>,
}

impl<A: ViewerApp> AppEventHandler<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            window_created: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl<A: ViewerApp> ApplicationHandler for AppEventHandler<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_created {
            return;
        }

        match event_loop.create_window(self.app.window_attributes()) {
            Ok(window) => {
                self.window_created = true;
                let window = Arc::new(window);
                if let Err(e) = self.app.on_window_created(window) {
                    self.fail(event_loop, e.context("Failed to initialize window"));
                }
            }
            Err(e) => {
                self.fail(
                    event_loop,
                    anyhow::Error::new(e).context("Failed to create window"),
                );
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.app.on_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.app.update_input();

                if let Err(e) = self.app.render_frame() {
                    self.fail(event_loop, e);
                    return;
                }
            }
            _ => {}
        }

        if self.app.should_exit() {
            event_loop.exit();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.app.on_device_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Continuous redraw; presentation paces the loop
        event_loop.set_control_flow(ControlFlow::Poll);
        self.app.request_redraw();
    }
}

/// Run the event loop until the window closes or the app asks to exit.
///
/// Returns the fatal error that stopped the loop, if any.
pub fn run<A: ViewerApp>(app: A) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;

    let mut handler = AppEventHandler::new(app);
    event_loop.run_app(&mut handler)?;

    match handler.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
