//! Mouse-look tracking
//!
//! Raw device motion is folded into a virtual cursor so the look offsets
//! behave like absolute cursor positions even while the pointer is locked.

use glam::{DVec2, Vec2};

#[derive(Debug, Clone, Copy, Default)]
pub struct MouseLook {
    cursor: DVec2,
    last: Option<DVec2>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw motion delta in pixels.
    ///
    /// Returns the look offset `(x, y)` with `y` positive when moving up.
    /// The first sample only sets the origin and returns `None`.
    pub fn motion(&mut self, dx: f64, dy: f64) -> Option<Vec2> {
        self.cursor += DVec2::new(dx, dy);
        let last = self.last.replace(self.cursor)?;
        let offset = Vec2::new((self.cursor.x - last.x) as f32, (last.y - self.cursor.y) as f32);
        Some(offset)
    }
}
