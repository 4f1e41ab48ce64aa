//! Keyboard and mouse input for the fly camera

mod bindings;
pub mod keycode_serde;
mod mouse;


pub use bindings::KeyBindings;
pub use mouse::MouseLook;

use glam::Vec2;
use hashbrown::HashMap;
use winit::keyboard::KeyCode;

use crate::camera::{FlyCamera, Movement};

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    /// Pause state flipped; carries the new state
    PauseToggled(bool),
}

/// Held keys, pause state and pending mouse look
#[derive(Debug)]
pub struct InputState {
    bindings: KeyBindings,
    keyboard_state: HashMap<KeyCode, bool>,
    mouse: MouseLook,
    pending_look: Vec2,
    paused: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keyboard_state: HashMap::new(),
            mouse: MouseLook::new(),
            pending_look: Vec2::ZERO,
            paused: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_pressed(&self, key: KeyCode) -> bool {
        self.keyboard_state.get(&key).copied().unwrap_or(false)
    }

    /// Record a keyboard event.
    ///
    /// Repeats still update held state but never toggle pause.
    pub fn key_event(&mut self, key: KeyCode, pressed: bool, repeat: bool) -> InputAction {
        self.keyboard_state.insert(key, pressed);
        if !pressed {
            return InputAction::None;
        }

        if key == self.bindings.quit {
            return InputAction::Quit;
        }
        if key == self.bindings.pause && !repeat {
            self.paused = !self.paused;
            self.pending_look = Vec2::ZERO;
            tracing::debug!("Paused: {}", self.paused);
            return InputAction::PauseToggled(self.paused);
        }
        InputAction::None
    }

    /// Record raw mouse motion. Tracked while paused, applied only when not.
    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        let offset = self.mouse.motion(dx, dy);
        if !self.paused {
            self.pending_look += offset.unwrap_or(Vec2::ZERO);
        }
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keyboard_state.clear();
    }

    /// Movement directions currently held
    pub fn held_movements(&self) -> impl Iterator<Item = Movement> + '_ {
        [
            Movement::Forward,
            Movement::Backward,
            Movement::Left,
            Movement::Right,
        ]
        .into_iter()
        .filter(|&m| {
            self.bindings
                .keys_for(m)
                .iter()
                .any(|&key| self.is_pressed(key))
        })
    }

    /// Apply held movement and pending mouse look to the camera.
    ///
    /// Does nothing while paused.
    pub fn update_camera(&mut self, camera: &mut FlyCamera, dt: f32) {
        if self.paused {
            return;
        }
        for movement in self.held_movements() {
            camera.translate(movement, dt);
        }
        let look = std::mem::take(&mut self.pending_look);
        if look != Vec2::ZERO {
            camera.rotate(look.x, look.y);
        }
    }
}
