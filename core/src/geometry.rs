//! Static mesh data
//!
//! Two primitives ship with the viewer, a single triangle and a unit quad.
//! Each has one set of positions, colors and indices plus two normal sets:
//! one with every normal on +Z and one where the normals fan outward.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::config::NormalMode;

/// Which mesh the scene is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    #[default]
    Triangle,
    Quad,
}

const TRIANGLE_POSITIONS: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]];
const TRIANGLE_COLORS: [[f32; 4]; 3] = [
    [0.8, 0.4, 0.4, 1.0],
    [0.7, 0.7, 0.4, 1.0],
    [0.4, 0.7, 0.7, 1.0],
];
const TRIANGLE_NORMALS: [[f32; 3]; 3] = [[0.0, 0.0, 1.0]; 3];
const TRIANGLE_SPREAD_NORMALS: [[f32; 3]; 3] = [
    [-0.59, -0.29, 0.75],
    [0.59, -0.29, 0.75],
    [0.0, 0.62, 0.78],
];
const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

const QUAD_POSITIONS: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];
const QUAD_COLORS: [[f32; 4]; 4] = [
    [0.8, 0.4, 0.4, 1.0],
    [0.7, 0.7, 0.4, 1.0],
    [0.4, 0.7, 0.7, 1.0],
    [0.7, 0.4, 0.7, 1.0],
];
const QUAD_NORMALS: [[f32; 3]; 4] = [[0.0, 0.0, 1.0]; 4];
const QUAD_SPREAD_NORMALS: [[f32; 3]; 4] = [
    [-0.61, -0.61, 0.49],
    [0.61, -0.61, 0.49],
    [0.61, 0.61, 0.49],
    [-0.61, 0.61, 0.49],
];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Interleaved vertex for the pass-through pipeline
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

/// One patch control point as laid out in the storage buffer the
/// evaluation shader reads. Every field is padded to a vec4.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ControlPoint {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub normal: [f32; 4],
}

/// Borrowed view over one primitive's arrays
#[derive(Debug, Clone, Copy)]
pub struct MeshData {
    pub positions: &'static [[f32; 3]],
    pub colors: &'static [[f32; 4]],
    normals: [&'static [[f32; 3]]; 2],
    pub indices: &'static [u32],
}

impl Primitive {
    pub fn mesh(self) -> MeshData {
        match self {
            Primitive::Triangle => MeshData {
                positions: &TRIANGLE_POSITIONS,
                colors: &TRIANGLE_COLORS,
                normals: [&TRIANGLE_NORMALS, &TRIANGLE_SPREAD_NORMALS],
                indices: &TRIANGLE_INDICES,
            },
            Primitive::Quad => MeshData {
                positions: &QUAD_POSITIONS,
                colors: &QUAD_COLORS,
                normals: [&QUAD_NORMALS, &QUAD_SPREAD_NORMALS],
                indices: &QUAD_INDICES,
            },
        }
    }
}

impl MeshData {
    pub fn normals(&self, mode: NormalMode) -> &'static [[f32; 3]] {
        self.normals[mode.index()]
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertices for the indexed draw
    pub fn vertices(&self, mode: NormalMode) -> Vec<MeshVertex> {
        let normals = self.normals(mode);
        self.positions
            .iter()
            .zip(self.colors)
            .zip(normals)
            .map(|((&position, &color), &normal)| MeshVertex {
                position,
                color,
                normal,
            })
            .collect()
    }

    /// Patch control points, one patch per index triple
    pub fn control_points(&self, mode: NormalMode) -> Vec<ControlPoint> {
        let normals = self.normals(mode);
        self.indices
            .iter()
            .map(|&i| {
                let i = i as usize;
                let [px, py, pz] = self.positions[i];
                let [nx, ny, nz] = normals[i];
                ControlPoint {
                    position: [px, py, pz, 1.0],
                    color: self.colors[i],
                    normal: [nx, ny, nz, 0.0],
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_line_up() {
        for primitive in [Primitive::Triangle, Primitive::Quad] {
            let mesh = primitive.mesh();
            assert_eq!(mesh.colors.len(), mesh.vertex_count());
            for mode in NormalMode::ALL {
                assert_eq!(mesh.normals(mode).len(), mesh.vertex_count());
            }
            assert_eq!(mesh.index_count() % 3, 0);
            assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        }
    }

    #[test]
    fn test_triangle_counts() {
        let mesh = Primitive::Triangle.mesh();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.control_points(NormalMode::Aligned).len(), 3);
    }

    #[test]
    fn test_quad_expands_to_two_patches() {
        let mesh = Primitive::Quad.mesh();
        let points = mesh.control_points(NormalMode::Aligned);
        assert_eq!(points.len(), 6);
        // Second patch is 0, 2, 3
        assert_eq!(points[3].position, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(points[4].position, [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(points[5].position, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_normal_modes_differ() {
        let mesh = Primitive::Triangle.mesh();
        let aligned = mesh.vertices(NormalMode::Aligned);
        let spread = mesh.vertices(NormalMode::Spread);
        assert!(aligned.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert_eq!(spread[2].normal, [0.0, 0.62, 0.78]);
        // Positions and colors are shared
        for (a, s) in aligned.iter().zip(&spread) {
            assert_eq!(a.position, s.position);
            assert_eq!(a.color, s.color);
        }
    }

    #[test]
    fn test_control_point_padding() {
        assert_eq!(std::mem::size_of::<ControlPoint>(), 48);
        let points = Primitive::Triangle.mesh().control_points(NormalMode::Spread);
        assert!(points.iter().all(|p| p.position[3] == 1.0 && p.normal[3] == 0.0));
    }
}
