//! Triangle-domain tessellation on the CPU
//!
//! wgpu exposes no tessellation stages, so the control stage and the
//! fixed-function primitive generator run here. The evaluation stage
//! runs in the tessellated WGSL program and consumes [`DomainVertex`]es.
//!
//! - [`spacing`] - level rounding and edge subdivision per spacing mode
//! - [`triangle`] - concentric-ring subdivision of the triangle domain
//! - [`control`] - per-patch levels with optional level of detail
//! - [`stage`] - driver over all patches with output caching

pub mod control;
pub mod spacing;
pub mod stage;
pub mod triangle;

#[cfg(test)]
mod tests;

pub use control::{LOD_REFERENCE_DISTANCE, lod_factor, patch_levels};
pub use spacing::{MAX_TESS_LEVEL, ResolvedLevel, edge_points, resolve_level};
pub use stage::{DomainVertex, PATCH_SIZE, TessellationStage};
pub use triangle::{PatchLevels, tessellate_triangle};
