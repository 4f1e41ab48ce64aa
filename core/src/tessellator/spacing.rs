//! Tessellation level resolution and edge subdivision

use crate::config::SpacingMode;

/// Largest tessellation level the primitive generator honours
pub const MAX_TESS_LEVEL: f32 = 64.0;

/// A level after clamping and rounding for a spacing mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLevel {
    /// Clamped fractional level
    pub level: f32,
    /// Number of segments the edge is split into
    pub segments: u32,
}

/// Clamp `level` to the spacing mode's range and round it to a segment count.
///
/// NaN resolves to the minimum level.
pub fn resolve_level(level: f32, spacing: SpacingMode) -> ResolvedLevel {
    let (min, max) = match spacing {
        SpacingMode::Equal => (1.0, MAX_TESS_LEVEL),
        SpacingMode::Odd => (1.0, MAX_TESS_LEVEL - 1.0),
        SpacingMode::Even => (2.0, MAX_TESS_LEVEL),
    };
    let level = if level.is_nan() { min } else { level.clamp(min, max) };

    let mut segments = level.ceil() as u32;
    match spacing {
        SpacingMode::Equal => {}
        SpacingMode::Odd if segments % 2 == 0 => segments += 1,
        SpacingMode::Even if segments % 2 == 1 => segments += 1,
        _ => {}
    }

    ResolvedLevel { level, segments }
}

/// Parameters in `[0, 1]` at which an edge is split.
///
/// Returns `segments + 1` monotone values starting at 0 and ending at 1.
/// Fractional levels produce `segments - 2` long segments and two equal
/// short ones placed symmetrically around the midpoint.
pub fn edge_points(resolved: ResolvedLevel, spacing: SpacingMode) -> Vec<f32> {
    let n = resolved.segments.max(1) as usize;
    let fractional = spacing != SpacingMode::Equal && resolved.level < n as f32;

    let lengths: Vec<f32> = if !fractional || n < 2 {
        vec![1.0; n]
    } else {
        let short = (resolved.level - (n - 2) as f32) / 2.0;
        let long_per_side = (n - 2) / 2;
        let mut lengths = vec![1.0; long_per_side];
        if n % 2 == 0 {
            lengths.extend([short, short]);
        } else {
            lengths.extend([short, 1.0, short]);
        }
        lengths.extend(std::iter::repeat_n(1.0, long_per_side));
        lengths
    };

    let total: f32 = lengths.iter().sum();
    let mut points = Vec::with_capacity(n + 1);
    let mut acc = 0.0;
    points.push(0.0);
    for length in &lengths[..n - 1] {
        acc += length;
        points.push(acc / total);
    }
    points.push(1.0);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_points(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_resolve_equal() {
        assert_eq!(resolve_level(1.0, SpacingMode::Equal).segments, 1);
        assert_eq!(resolve_level(2.3, SpacingMode::Equal).segments, 3);
        assert_eq!(resolve_level(0.2, SpacingMode::Equal).segments, 1);
        assert_eq!(resolve_level(100.0, SpacingMode::Equal).segments, 64);
    }

    #[test]
    fn test_resolve_odd() {
        assert_eq!(resolve_level(1.0, SpacingMode::Odd).segments, 1);
        assert_eq!(resolve_level(2.0, SpacingMode::Odd).segments, 3);
        assert_eq!(resolve_level(3.0, SpacingMode::Odd).segments, 3);
        assert_eq!(resolve_level(3.5, SpacingMode::Odd).segments, 5);
        let max = resolve_level(100.0, SpacingMode::Odd);
        assert_eq!(max.level, 63.0);
        assert_eq!(max.segments, 63);
    }

    #[test]
    fn test_resolve_even() {
        let low = resolve_level(1.0, SpacingMode::Even);
        assert_eq!(low.level, 2.0);
        assert_eq!(low.segments, 2);
        assert_eq!(resolve_level(3.0, SpacingMode::Even).segments, 4);
        assert_eq!(resolve_level(4.0, SpacingMode::Even).segments, 4);
        assert_eq!(resolve_level(100.0, SpacingMode::Even).segments, 64);
    }

    #[test]
    fn test_resolve_nan_uses_minimum() {
        assert_eq!(resolve_level(f32::NAN, SpacingMode::Equal).segments, 1);
        assert_eq!(resolve_level(f32::NAN, SpacingMode::Even).segments, 2);
    }

    #[test]
    fn test_equal_edge_points() {
        let points = edge_points(resolve_level(4.0, SpacingMode::Equal), SpacingMode::Equal);
        assert_points(&points, &[0.0, 0.25, 0.5, 0.75, 1.0]);

        // Fractional equal levels round up and stay uniform
        let points = edge_points(resolve_level(2.5, SpacingMode::Equal), SpacingMode::Equal);
        assert_points(&points, &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn test_odd_edge_points_fractional() {
        let points = edge_points(resolve_level(2.0, SpacingMode::Odd), SpacingMode::Odd);
        assert_points(&points, &[0.0, 0.25, 0.75, 1.0]);
    }

    #[test]
    fn test_odd_edge_points_integral() {
        let points = edge_points(resolve_level(3.0, SpacingMode::Odd), SpacingMode::Odd);
        assert_points(&points, &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn test_even_edge_points_fractional() {
        let points = edge_points(resolve_level(3.0, SpacingMode::Even), SpacingMode::Even);
        assert_points(&points, &[0.0, 1.0 / 3.0, 0.5, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn test_even_edge_points_minimum() {
        let points = edge_points(resolve_level(1.0, SpacingMode::Even), SpacingMode::Even);
        assert_points(&points, &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_edge_points_are_symmetric_and_monotone() {
        for spacing in SpacingMode::ALL {
            for tenth in 10..200 {
                let level = tenth as f32 / 10.0;
                let points = edge_points(resolve_level(level, spacing), spacing);
                assert_eq!(points[0], 0.0);
                assert_eq!(*points.last().unwrap(), 1.0);
                for pair in points.windows(2) {
                    assert!(pair[1] > pair[0], "{spacing:?} {level}: {points:?}");
                }
                let n = points.len() - 1;
                for i in 0..=n {
                    assert!((points[i] + points[n - i] - 1.0).abs() < 1e-5);
                }
            }
        }
    }
}
