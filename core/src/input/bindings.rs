//! Keyboard bindings

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use super::keycode_serde::{
    deserialize_keycode, deserialize_keycodes, serialize_keycode, serialize_keycodes,
};
use crate::camera::Movement;

/// Keys driving the viewer, stored by name in the `[input]` settings section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(
        serialize_with = "serialize_keycodes",
        deserialize_with = "deserialize_keycodes"
    )]
    pub forward: Vec<KeyCode>,
    #[serde(
        serialize_with = "serialize_keycodes",
        deserialize_with = "deserialize_keycodes"
    )]
    pub backward: Vec<KeyCode>,
    #[serde(
        serialize_with = "serialize_keycodes",
        deserialize_with = "deserialize_keycodes"
    )]
    pub left: Vec<KeyCode>,
    #[serde(
        serialize_with = "serialize_keycodes",
        deserialize_with = "deserialize_keycodes"
    )]
    pub right: Vec<KeyCode>,
    /// Toggles pause and the settings panel
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub pause: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            backward: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            pause: KeyCode::Space,
            quit: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Keys bound to a movement direction
    pub fn keys_for(&self, movement: Movement) -> &[KeyCode] {
        match movement {
            Movement::Forward => &self.forward,
            Movement::Backward => &self.backward,
            Movement::Left => &self.left,
            Movement::Right => &self.right,
        }
    }
}
