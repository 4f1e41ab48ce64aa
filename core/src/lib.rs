//! Tessellab Core - GPU-independent viewer logic
//!
//! Everything the viewer decides each frame lives here so it can be tested
//! without a window or a device.
//!
//! # Architecture
//!
//! - [`Configuration`] - Toggles and sliders edited by the settings panel
//! - [`ActiveShader`] - Picks one of four shader variants and rebinds on change
//! - [`plan_frame`] - Matrices, draw shape and tessellation uniforms per frame
//! - [`TessellationStage`] - CPU control stage and triangle primitive generator
//! - [`FlyCamera`] / [`InputState`] - First-person camera and its input
//! - [`settings`] - Startup settings from `config.toml`

pub mod camera;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod selector;
pub mod settings;
pub mod tessellator;

pub use camera::{FlyCamera, Movement};
pub use config::{Configuration, NormalMode, SpacingMode};
pub use frame::{DrawCall, FramePlan, SceneCounts, TessellationUniforms, TransformUniforms, plan_frame};
pub use geometry::{ControlPoint, MeshData, MeshVertex, Primitive};
pub use input::{InputAction, InputState, KeyBindings};
pub use selector::{ActiveShader, VariantBinder, VariantId, select_variant};
pub use settings::{Settings, SettingsError};
pub use tessellator::{DomainVertex, TessellationStage};
