//! Live render configuration
//!
//! The flat set of toggles and sliders the settings panel edits and the
//! frame loop reads every frame. Serde support exists so a startup
//! configuration can be supplied through the `[scene]` section of the
//! settings file; nothing is ever written back.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Valid range for inner/outer tessellation level sliders
pub const LEVEL_RANGE: RangeInclusive<f32> = 1.0..=20.0;
/// Valid range for the u/v/w barycentric weight sliders
pub const WEIGHT_RANGE: RangeInclusive<f32> = 0.0..=20.0;
/// Valid range for the normal displacement multiplier slider
pub const NORMAL_DISTANCE_RANGE: RangeInclusive<f32> = 0.0..=5.0;

/// Subdivision rule applied along each tessellated edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingMode {
    /// Integer segment count, all segments the same length
    #[default]
    Equal,
    /// Odd segment count with two shorter fractional segments
    Odd,
    /// Even segment count with two shorter fractional segments
    Even,
}

impl SpacingMode {
    pub const ALL: [SpacingMode; 3] = [SpacingMode::Equal, SpacingMode::Odd, SpacingMode::Even];

    /// Panel label
    pub fn label(self) -> &'static str {
        match self {
            SpacingMode::Equal => "Equal Spacing",
            SpacingMode::Odd => "Odd Spacing",
            SpacingMode::Even => "Even Spacing",
        }
    }
}

/// Which normal-vector data set the mesh is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    /// All normals point along +Z
    #[default]
    Aligned,
    /// Normals fan outward from the face
    Spread,
}

impl NormalMode {
    pub const ALL: [NormalMode; 2] = [NormalMode::Aligned, NormalMode::Spread];

    pub fn label(self) -> &'static str {
        match self {
            NormalMode::Aligned => "Z-align",
            NormalMode::Spread => "Spreading",
        }
    }

    /// Slot of the scene object built from this normal set
    pub fn index(self) -> usize {
        match self {
            NormalMode::Aligned => 0,
            NormalMode::Spread => 1,
        }
    }
}

/// Per-frame render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Draw through the tessellation pipeline instead of the pass-through one
    pub tessellation: bool,
    /// Rasterize as lines
    pub wireframe: bool,
    /// Scale tessellation levels by camera distance
    pub level_of_detail: bool,
    pub spacing: SpacingMode,
    pub inner_level: f32,
    /// Outer levels for the u=0, v=0 and w=0 edges
    pub outer_levels: [f32; 3],
    /// Barycentric weights for u, v and w
    pub weights: [f32; 3],
    pub normal_mode: NormalMode,
    /// Displacement along the interpolated normal
    pub normal_distance: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tessellation: false,
            wireframe: false,
            level_of_detail: false,
            spacing: SpacingMode::Equal,
            inner_level: 1.0,
            outer_levels: [1.0; 3],
            weights: [1.0; 3],
            normal_mode: NormalMode::Aligned,
            normal_distance: 0.0,
        }
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

impl Configuration {
    /// Copy with every numeric field clamped to its slider range.
    ///
    /// The panel never produces out-of-range values; this is applied to
    /// configurations that come from the settings file.
    pub fn clamped(&self) -> Self {
        Self {
            inner_level: clamp_to(self.inner_level, &LEVEL_RANGE),
            outer_levels: self.outer_levels.map(|l| clamp_to(l, &LEVEL_RANGE)),
            weights: self.weights.map(|w| clamp_to(w, &WEIGHT_RANGE)),
            normal_distance: clamp_to(self.normal_distance, &NORMAL_DISTANCE_RANGE),
            ..*self
        }
    }
}
