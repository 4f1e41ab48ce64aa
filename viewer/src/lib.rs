//! Tessellab viewer
//!
//! Window, wgpu graphics and the settings panel around `tessellab-core`.
//!
//! - [`app`] - event loop and the [`App`] that owns all per-frame state
//! - [`graphics`] - device, shader variants and scene rendering
//! - [`ui`] - egui settings panel

pub mod app;
pub mod graphics;
pub mod ui;

pub use app::{App, run};

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";
