//! Triangle-domain primitive generator
//!
//! Produces barycentric domain points for one patch as a triangle list.
//! Corner `i` of the domain is the unit vector along axis `i`, so the
//! u=0 edge runs from corner 1 to corner 2, v=0 from corner 2 to corner 0
//! and w=0 from corner 0 to corner 1.

use glam::Vec3;

use super::spacing::{ResolvedLevel, edge_points, resolve_level};
use crate::config::SpacingMode;

const CORNERS: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];
const CENTROID: Vec3 = Vec3::splat(1.0 / 3.0);

/// Inner and outer levels for one patch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchLevels {
    pub inner: f32,
    /// Levels for the u=0, v=0 and w=0 edges
    pub outer: [f32; 3],
}

impl PatchLevels {
    pub fn uniform(level: f32) -> Self {
        Self {
            inner: level,
            outer: [level; 3],
        }
    }

    /// Whether the patch is culled before subdivision
    pub fn is_discarded(&self) -> bool {
        self.outer.iter().any(|&l| l.is_nan() || l <= 0.0)
    }
}

/// Outer level index driving the ring side from corner `side` to `side + 1`
fn outer_for_side(side: usize) -> usize {
    (side + 2) % 3
}

/// Snap a point back onto the domain
fn on_domain(p: Vec3) -> Vec3 {
    let p = p.max(Vec3::ZERO);
    p / p.element_sum()
}

/// One side of a ring: its points from one ring corner to the next
struct Side {
    points: Vec<Vec3>,
    /// Parameter of each point along the side
    params: Vec<f32>,
}

impl Side {
    fn new(from: Vec3, to: Vec3, params: Vec<f32>) -> Self {
        let points = params.iter().map(|&t| on_domain(from.lerp(to, t))).collect();
        Self { points, params }
    }

    fn point(at: Vec3) -> Self {
        Self {
            points: vec![at],
            params: vec![0.5],
        }
    }

    fn segments(&self) -> usize {
        self.points.len() - 1
    }

    fn midpoint(&self, i: usize) -> f32 {
        (self.params[i] + self.params[i + 1]) * 0.5
    }
}

/// Fill the band between an outer and an inner side with triangles.
///
/// Both sides run in the same direction; the inner side lies toward the
/// centroid.
fn stitch(outer: &Side, inner: &Side, out: &mut Vec<Vec3>) {
    let (a, b) = (outer.segments(), inner.segments());
    let (mut i, mut j) = (0, 0);
    while i < a || j < b {
        let advance_outer = j == b || (i < a && outer.midpoint(i) <= inner.midpoint(j));
        if advance_outer {
            out.extend([outer.points[i], outer.points[i + 1], inner.points[j]]);
            i += 1;
        } else {
            out.extend([outer.points[i], inner.points[j + 1], inner.points[j]]);
            j += 1;
        }
    }
}

/// Subdivide the triangle domain.
///
/// Returns domain points as a triangle list with counter-clockwise winding
/// in (u, v, w) order. Discarded patches produce no points.
pub fn tessellate_triangle(levels: &PatchLevels, spacing: SpacingMode) -> Vec<Vec3> {
    if levels.is_discarded() {
        return Vec::new();
    }

    let outer: [ResolvedLevel; 3] = levels.outer.map(|l| resolve_level(l, spacing));
    let mut inner = resolve_level(levels.inner, spacing);

    if inner.segments == 1 {
        if outer.iter().all(|o| o.segments == 1) {
            return CORNERS.to_vec();
        }
        inner = resolve_level(1.0 + f32::EPSILON, spacing);
    }

    let n = inner.segments as usize;
    let inner_params = edge_points(inner, spacing);
    let mut out = Vec::new();

    // Ring k corners sit on the corner-to-centroid lines
    let ring_corners = |k: usize| -> [Vec3; 3] {
        let t = (2.0 * inner_params[k]).min(1.0);
        CORNERS.map(|c| on_domain(c.lerp(CENTROID, t)))
    };
    let ring_sides = |k: usize| -> [Side; 3] {
        let corners = ring_corners(k);
        let remaining = n - 2 * k;
        std::array::from_fn(|side| {
            let (from, to) = (corners[side], corners[(side + 1) % 3]);
            if remaining == 0 {
                return Side::point(from);
            }
            let params = if k == 0 {
                edge_points(outer[outer_for_side(side)], spacing)
            } else {
                let (lo, hi) = (inner_params[k], inner_params[n - k]);
                inner_params[k..=n - k]
                    .iter()
                    .map(|&p| (p - lo) / (hi - lo))
                    .collect()
            };
            Side::new(from, to, params)
        })
    };

    let mut outer_ring = ring_sides(0);
    for k in 1..=n / 2 {
        let inner_ring = ring_sides(k);
        for (o, i) in outer_ring.iter().zip(&inner_ring) {
            stitch(o, i, &mut out);
        }
        outer_ring = inner_ring;
    }

    if n % 2 == 1 {
        out.extend(ring_corners(n / 2));
    }

    out
}
