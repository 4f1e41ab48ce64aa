//! Stage driver: control stage plus primitive generator over all patches

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::control::patch_levels;
use super::triangle::{PatchLevels, tessellate_triangle};
use crate::config::SpacingMode;
use crate::frame::TessellationUniforms;
use crate::geometry::ControlPoint;

/// Control points per patch
pub const PATCH_SIZE: usize = 3;

/// One generated vertex, consumed by the evaluation shader
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DomainVertex {
    pub barycentric: [f32; 3],
    /// Patch index; control points are `3 * patch .. 3 * patch + 3`
    pub patch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    spacing: SpacingMode,
    /// Bit patterns of each patch's inner and outer levels
    levels: Vec<[u32; 4]>,
}

impl CacheKey {
    fn new(spacing: SpacingMode, levels: &[PatchLevels]) -> Self {
        let levels = levels
            .iter()
            .map(|l| {
                [
                    l.inner.to_bits(),
                    l.outer[0].to_bits(),
                    l.outer[1].to_bits(),
                    l.outer[2].to_bits(),
                ]
            })
            .collect();
        Self { spacing, levels }
    }
}

/// Runs the fixed-function tessellation steps on the CPU and keeps the
/// last output until its inputs change.
#[derive(Debug, Default)]
pub struct TessellationStage {
    key: Option<CacheKey>,
    vertices: Vec<DomainVertex>,
    regenerations: u64,
}

impl TessellationStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generated vertices from the last [`update`](Self::update)
    pub fn vertices(&self) -> &[DomainVertex] {
        &self.vertices
    }

    /// How many times the output has been rebuilt
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// Tessellate every patch for this frame.
    ///
    /// Returns `true` when the output was regenerated and needs uploading.
    /// A trailing partial patch is ignored.
    pub fn update(
        &mut self,
        control_points: &[ControlPoint],
        uniforms: &TessellationUniforms,
        model: &Mat4,
        spacing: SpacingMode,
    ) -> bool {
        let levels: Vec<PatchLevels> = control_points
            .chunks_exact(PATCH_SIZE)
            .map(|patch| {
                let corners = [0, 1, 2].map(|i| {
                    let [x, y, z, _] = patch[i].position;
                    Vec3::new(x, y, z)
                });
                patch_levels(uniforms, model, corners)
            })
            .collect();

        let key = CacheKey::new(spacing, &levels);
        if self.key.as_ref() == Some(&key) {
            return false;
        }

        self.vertices.clear();
        for (patch, patch_levels) in levels.iter().enumerate() {
            let points = tessellate_triangle(patch_levels, spacing);
            self.vertices
                .extend(points.into_iter().map(|b| DomainVertex {
                    barycentric: b.to_array(),
                    patch: patch as u32,
                }));
        }

        tracing::trace!(
            "Tessellated {} patches into {} vertices ({:?} spacing)",
            levels.len(),
            self.vertices.len(),
            spacing
        );
        self.key = Some(key);
        self.regenerations += 1;
        true
    }
}
