//! Tests for the triangle primitive generator and stage driver

use glam::{Mat4, Vec2, Vec3};

use super::*;
use crate::config::{Configuration, NormalMode, SpacingMode};
use crate::frame::{TessellationUniforms, model_matrix};
use crate::geometry::Primitive;

const DOMAIN_AREA: f32 = 0.5;

/// Signed area of a domain triangle, projected onto the (v, w) plane
fn signed_area(tri: &[Vec3]) -> f32 {
    let a = Vec2::new(tri[0].y, tri[0].z);
    let b = Vec2::new(tri[1].y, tri[1].z);
    let c = Vec2::new(tri[2].y, tri[2].z);
    0.5 * (b - a).perp_dot(c - a)
}

fn assert_covers_domain(points: &[Vec3], label: &str) {
    assert!(!points.is_empty(), "{label}: no output");
    assert_eq!(points.len() % 3, 0, "{label}: not a triangle list");

    for p in points {
        assert!(p.min_element() >= 0.0, "{label}: negative coordinate {p}");
        assert!((p.element_sum() - 1.0).abs() < 1e-5, "{label}: {p} off domain");
    }

    let mut total = 0.0;
    for tri in points.chunks_exact(3) {
        let area = signed_area(tri);
        assert!(area >= -1e-6, "{label}: flipped triangle {tri:?}");
        total += area;
    }
    assert!(
        (total - DOMAIN_AREA).abs() < 1e-4,
        "{label}: covered area {total}"
    );
}

fn triangle_count(levels: PatchLevels, spacing: SpacingMode) -> usize {
    tessellate_triangle(&levels, spacing).len() / 3
}

#[test]
fn test_single_triangle_at_level_one() {
    let points = tessellate_triangle(&PatchLevels::uniform(1.0), SpacingMode::Equal);
    assert_eq!(points, vec![Vec3::X, Vec3::Y, Vec3::Z]);

    let points = tessellate_triangle(&PatchLevels::uniform(1.0), SpacingMode::Odd);
    assert_eq!(points.len(), 3);
}

#[test]
fn test_discarded_patches_produce_nothing() {
    let zero_outer = PatchLevels {
        inner: 4.0,
        outer: [4.0, 0.0, 4.0],
    };
    assert!(tessellate_triangle(&zero_outer, SpacingMode::Equal).is_empty());

    let nan_outer = PatchLevels {
        inner: 4.0,
        outer: [f32::NAN, 4.0, 4.0],
    };
    assert!(tessellate_triangle(&nan_outer, SpacingMode::Even).is_empty());

    let negative = PatchLevels::uniform(-1.0);
    assert!(tessellate_triangle(&negative, SpacingMode::Odd).is_empty());
}

#[test]
fn test_equal_spacing_triangle_counts() {
    assert_eq!(triangle_count(PatchLevels::uniform(2.0), SpacingMode::Equal), 6);
    assert_eq!(triangle_count(PatchLevels::uniform(3.0), SpacingMode::Equal), 13);
    assert_eq!(triangle_count(PatchLevels::uniform(4.0), SpacingMode::Equal), 24);
}

#[test]
fn test_outer_levels_only_split_edges() {
    // Inner level 1 is bumped so the outer subdivision has somewhere to go
    let levels = PatchLevels {
        inner: 1.0,
        outer: [3.0, 1.0, 1.0],
    };
    let points = tessellate_triangle(&levels, SpacingMode::Equal);
    assert_covers_domain(&points, "inner 1 outer 3");
    // 5 outer segments fanned to the center
    assert_eq!(points.len() / 3, 5);
}

#[test]
fn test_outer_level_edge_mapping() {
    let levels = PatchLevels {
        inner: 2.0,
        outer: [4.0, 1.0, 1.0],
    };
    let points = tessellate_triangle(&levels, SpacingMode::Equal);
    // Outer level 0 splits the u = 0 edge into four
    let mut on_u_edge: Vec<f32> = points
        .iter()
        .filter(|p| p.x.abs() < 1e-6)
        .map(|p| p.y)
        .collect();
    on_u_edge.sort_by(f32::total_cmp);
    on_u_edge.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
    assert_eq!(on_u_edge.len(), 5);

    // The v = 0 edge is not subdivided
    let on_v_edge = points
        .iter()
        .filter(|p| p.y.abs() < 1e-6 && p.x > 1e-6 && p.z > 1e-6)
        .count();
    assert_eq!(on_v_edge, 0);
}

#[test]
fn test_coverage_for_every_spacing() {
    let samples = [1.0, 1.5, 2.0, 2.7, 3.0, 4.2, 5.0, 7.5, 12.0, 20.0];
    for spacing in SpacingMode::ALL {
        for &inner in &samples {
            for &outer in &samples {
                let levels = PatchLevels {
                    inner,
                    outer: [outer, inner, (outer + inner) * 0.5],
                };
                let label = format!("{spacing:?} inner {inner} outer {outer}");
                assert_covers_domain(&tessellate_triangle(&levels, spacing), &label);
            }
        }
    }
}

#[test]
fn test_higher_levels_never_reduce_output() {
    for spacing in SpacingMode::ALL {
        let mut previous = 0;
        for level in 1..=20 {
            let count = triangle_count(PatchLevels::uniform(level as f32), spacing);
            assert!(count >= previous, "{spacing:?} level {level}");
            previous = count;
        }
    }
}

#[test]
fn test_corners_are_preserved() {
    let points = tessellate_triangle(&PatchLevels::uniform(5.0), SpacingMode::Even);
    for corner in [Vec3::X, Vec3::Y, Vec3::Z] {
        assert!(points.iter().any(|p| p.distance(corner) < 1e-6));
    }
}

fn uniforms(config: Configuration) -> TessellationUniforms {
    TessellationUniforms::new(&config, Vec3::new(0.0, 1.6, 5.0))
}

fn tessellated(inner: f32, outer: f32) -> Configuration {
    Configuration {
        tessellation: true,
        inner_level: inner,
        outer_levels: [outer; 3],
        ..Default::default()
    }
}

#[test]
fn test_stage_tags_vertices_with_patch() {
    let points = Primitive::Quad.mesh().control_points(NormalMode::Aligned);
    let mut stage = TessellationStage::new();
    assert!(stage.update(
        &points,
        &uniforms(tessellated(2.0, 2.0)),
        &model_matrix(),
        SpacingMode::Equal
    ));

    let vertices = stage.vertices();
    assert_eq!(vertices.len(), 2 * 6 * 3);
    assert!(vertices[..18].iter().all(|v| v.patch == 0));
    assert!(vertices[18..].iter().all(|v| v.patch == 1));
}

#[test]
fn test_stage_caches_unchanged_levels() {
    let points = Primitive::Triangle.mesh().control_points(NormalMode::Aligned);
    let model = model_matrix();
    let mut stage = TessellationStage::new();

    assert!(stage.update(&points, &uniforms(tessellated(3.0, 2.0)), &model, SpacingMode::Odd));
    assert!(!stage.update(&points, &uniforms(tessellated(3.0, 2.0)), &model, SpacingMode::Odd));

    // Weights and displacement do not affect the generated domain
    let mut config = tessellated(3.0, 2.0);
    config.weights = [4.0, 1.0, 1.0];
    config.normal_distance = 2.0;
    assert!(!stage.update(&points, &uniforms(config), &model, SpacingMode::Odd));
    assert_eq!(stage.regenerations(), 1);

    assert!(stage.update(&points, &uniforms(tessellated(3.0, 2.0)), &model, SpacingMode::Even));
    assert!(stage.update(&points, &uniforms(tessellated(4.0, 2.0)), &model, SpacingMode::Even));
    assert_eq!(stage.regenerations(), 3);
}

#[test]
fn test_stage_drops_discarded_patches() {
    let points = Primitive::Triangle.mesh().control_points(NormalMode::Aligned);
    let mut stage = TessellationStage::new();
    stage.update(
        &points,
        &uniforms(tessellated(3.0, 0.0)),
        &Mat4::IDENTITY,
        SpacingMode::Equal,
    );
    assert!(stage.vertices().is_empty());
}
