//! Control stage: per-patch tessellation levels

use glam::{Mat4, Vec3};

use super::triangle::PatchLevels;
use crate::frame::TessellationUniforms;

/// Distance (world units) within which level-of-detail keeps full levels
pub const LOD_REFERENCE_DISTANCE: f32 = 4.0;

/// Level-of-detail factor in `[0, 1]` for a patch at `distance` from the camera
pub fn lod_factor(distance: f32) -> f32 {
    if distance <= 0.0 {
        return 1.0;
    }
    (LOD_REFERENCE_DISTANCE / distance).clamp(0.0, 1.0)
}

/// Scale a level toward 1 by a level-of-detail factor
pub fn scale_level(level: f32, factor: f32) -> f32 {
    1.0 + (level - 1.0) * factor
}

/// Levels for one patch.
///
/// `corners` are the patch's control-point positions in object space.
pub fn patch_levels(uniforms: &TessellationUniforms, model: &Mat4, corners: [Vec3; 3]) -> PatchLevels {
    let levels = PatchLevels {
        inner: uniforms.inner_level(),
        outer: uniforms.outer_levels(),
    };
    if !uniforms.lod_enabled() {
        return levels;
    }

    let centroid = model.transform_point3((corners[0] + corners[1] + corners[2]) / 3.0);
    let factor = lod_factor(centroid.distance(uniforms.camera_position()));
    PatchLevels {
        inner: scale_level(levels.inner, factor),
        outer: levels.outer.map(|l| scale_level(l, factor)),
    }
}
