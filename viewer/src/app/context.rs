//! State shared by every frame

use std::time::Instant;

use tessellab_core::{Configuration, FlyCamera, InputAction, InputState, Settings};

/// Live configuration, camera and input owned by the app.
///
/// The settings panel writes `config`; the frame loop reads it.
pub struct FrameContext {
    pub config: Configuration,
    pub camera: FlyCamera,
    pub input: InputState,
    last_frame: Option<Instant>,
}

impl FrameContext {
    pub fn new(settings: &Settings) -> Self {
        Self {
            config: settings.scene.initial,
            camera: settings.camera.to_camera(),
            input: InputState::new(settings.input.clone()),
            last_frame: None,
        }
    }

    /// Seconds since the previous tick; zero on the first one.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        dt
    }

    pub fn key_event(
        &mut self,
        key: winit::keyboard::KeyCode,
        pressed: bool,
        repeat: bool,
    ) -> InputAction {
        self.input.key_event(key, pressed, repeat)
    }

    /// Advance the clock and move the camera by held input.
    pub fn advance(&mut self, now: Instant) {
        let dt = self.tick(now);
        self.input.update_camera(&mut self.camera, dt);
    }
}
