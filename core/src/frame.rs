//! Per-frame parameter feed
//!
//! Turns the live [`Configuration`] and the camera into everything a frame
//! submits: matrices, the object to draw, the draw call shape and the
//! tessellation uniforms.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::FlyCamera;
use crate::config::{Configuration, NormalMode};

/// Translation applied to the mesh in world space
pub const MODEL_TRANSLATION: Vec3 = Vec3::new(-1.0, 1.0, 0.0);
/// Non-uniform scale applied to the mesh before translation
pub const MODEL_SCALE: Vec3 = Vec3::new(2.5, 2.0, 2.5);

/// The mesh's model matrix (translate after scale)
pub fn model_matrix() -> Mat4 {
    Mat4::from_translation(MODEL_TRANSLATION) * Mat4::from_scale(MODEL_SCALE)
}

/// Matrices uploaded every frame
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformUniforms {
    pub view_projection: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for normals
    pub normal: [[f32; 4]; 4],
    /// Camera world position (w = 1)
    pub eye: [f32; 4],
}

impl TransformUniforms {
    pub fn new(view_projection: Mat4, model: Mat4, eye: Vec3) -> Self {
        Self {
            view_projection: view_projection.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
        }
    }
}

/// Tessellation control and evaluation parameters.
///
/// Layout matches the `Tessellation` uniform block in the WGSL sources.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TessellationUniforms {
    /// Camera world position (w unused)
    pub camera_position: [f32; 4],
    /// Inner level, then outer levels 0..2
    pub levels: [f32; 4],
    /// u/v/w weights, then the normal displacement multiplier
    pub weights: [f32; 4],
    /// Non-zero when level-of-detail scaling is on
    pub lod: u32,
    pub _pad: [u32; 3],
}

impl TessellationUniforms {
    /// Copy the tessellation fields out of a configuration. Values are not validated.
    pub fn new(config: &Configuration, camera_position: Vec3) -> Self {
        let [o0, o1, o2] = config.outer_levels;
        let [u, v, w] = config.weights;
        Self {
            camera_position: camera_position.extend(1.0).to_array(),
            levels: [config.inner_level, o0, o1, o2],
            weights: [u, v, w, config.normal_distance],
            lod: config.level_of_detail as u32,
            _pad: [0; 3],
        }
    }

    pub fn lod_enabled(&self) -> bool {
        self.lod != 0
    }

    pub fn camera_position(&self) -> Vec3 {
        let [x, y, z, _] = self.camera_position;
        Vec3::new(x, y, z)
    }

    pub fn inner_level(&self) -> f32 {
        self.levels[0]
    }

    pub fn outer_levels(&self) -> [f32; 3] {
        [self.levels[1], self.levels[2], self.levels[3]]
    }

    pub fn weights(&self) -> [f32; 3] {
        [self.weights[0], self.weights[1], self.weights[2]]
    }

    pub fn normal_distance(&self) -> f32 {
        self.weights[3]
    }
}

/// Element counts of the cached scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneCounts {
    pub index_count: u32,
    /// Control points, three per patch
    pub vertex_count: u32,
}

/// Shape of the draw submitted this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Indexed triangle list over the mesh vertices
    Indexed { index_count: u32 },
    /// Patch list over the control points
    Patches { vertex_count: u32 },
}

/// Everything a single frame submits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub transforms: TransformUniforms,
    /// Normal set of the object to draw
    pub object: NormalMode,
    pub draw: DrawCall,
    /// Present only when tessellating
    pub tessellation: Option<TessellationUniforms>,
    pub wireframe: bool,
}

/// Build this frame's plan.
pub fn plan_frame(
    config: &Configuration,
    camera: &FlyCamera,
    aspect_ratio: f32,
    counts: &SceneCounts,
) -> FramePlan {
    let transforms = TransformUniforms::new(
        camera.view_projection_matrix(aspect_ratio),
        model_matrix(),
        camera.position,
    );

    let (draw, tessellation) = if config.tessellation {
        (
            DrawCall::Patches {
                vertex_count: counts.vertex_count,
            },
            Some(TessellationUniforms::new(config, camera.position)),
        )
    } else {
        (
            DrawCall::Indexed {
                index_count: counts.index_count,
            },
            None,
        )
    };

    FramePlan {
        transforms,
        object: config.normal_mode,
        draw,
        tessellation,
        wireframe: config.wireframe,
    }
}
