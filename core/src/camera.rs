//! First-person fly camera
//!
//! Yaw/pitch camera with view and projection matrix calculations. Angles
//! are stored in degrees; a yaw of -90 looks down -Z.

use glam::{Mat4, Vec3};

/// Default vertical field of view in degrees
pub const DEFAULT_CAMERA_FOV: f32 = 45.0;
/// Pitch is kept inside +/- this many degrees so the view never flips
pub const PITCH_LIMIT: f32 = 89.0;

const WORLD_UP: Vec3 = Vec3::Y;

/// Keyboard movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-fly camera state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Heading in degrees
    pub yaw: f32,
    /// Elevation in degrees
    pub pitch: f32,
    /// Movement speed in units per second
    pub speed: f32,
    /// Degrees per pixel of mouse motion
    pub sensitivity: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 5.0),
            yaw: -90.0,
            pitch: 0.0,
            speed: 2.5,
            sensitivity: 0.1,
            fov: DEFAULT_CAMERA_FOV,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl FlyCamera {
    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(WORLD_UP).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    /// Compute the view matrix (world-to-camera transform)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    /// Compute the projection matrix for a given aspect ratio
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            aspect_ratio.max(f32::EPSILON),
            self.near,
            self.far,
        )
    }

    /// Compute the combined view-projection matrix
    pub fn view_projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    /// Move along the view plane for `dt` seconds
    pub fn translate(&mut self, movement: Movement, dt: f32) {
        let step = self.speed * dt;
        match movement {
            Movement::Forward => self.position += self.front() * step,
            Movement::Backward => self.position -= self.front() * step,
            Movement::Left => self.position -= self.right() * step,
            Movement::Right => self.position += self.right() * step,
        }
    }

    /// Apply a mouse delta in pixels. Positive `dy` looks up.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_camera_faces_negative_z() {
        let camera = FlyCamera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 5.0));
        assert!(approx(camera.front(), Vec3::NEG_Z));
        assert!(approx(camera.right(), Vec3::X));
        assert!(approx(camera.up(), Vec3::Y));
        assert_eq!(camera.fov, DEFAULT_CAMERA_FOV);
    }

    #[test]
    fn test_view_matrix_puts_target_in_front() {
        let camera = FlyCamera::default();
        let view_space = camera.view_matrix().transform_point3(Vec3::new(0.0, 1.6, 0.0));
        // 5 units in front of the camera
        assert!((view_space.z + 5.0).abs() < 1e-4);
        assert!(view_space.x.abs() < 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::default();
        camera.rotate(0.0, 10_000.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.rotate(0.0, -100_000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_rotate_scales_by_sensitivity() {
        let mut camera = FlyCamera::default();
        camera.rotate(100.0, 50.0);
        assert!((camera.yaw - -80.0).abs() < 1e-4);
        assert!((camera.pitch - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_translate_moves_along_axes() {
        let mut camera = FlyCamera::default();
        camera.translate(Movement::Forward, 1.0);
        assert!(approx(camera.position, Vec3::new(0.0, 1.6, 2.5)));
        camera.translate(Movement::Right, 2.0);
        assert!(approx(camera.position, Vec3::new(5.0, 1.6, 2.5)));
        camera.translate(Movement::Left, 2.0);
        camera.translate(Movement::Backward, 1.0);
        assert!(approx(camera.position, Vec3::new(0.0, 1.6, 5.0)));
    }

    #[test]
    fn test_projection_handles_zero_aspect() {
        let camera = FlyCamera::default();
        let proj = camera.projection_matrix(0.0);
        assert!(proj.is_finite());
    }
}
