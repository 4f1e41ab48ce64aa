//! The four shader variants
//!
//! Built once at startup and dropped at shutdown. Binding a variant only
//! records which pipeline the next frame's passes use.

use tessellab_core::config::SpacingMode;
use tessellab_core::{VariantBinder, VariantId};

use super::pipeline::{Stages, create_frame_bind_group_layout, create_pipeline};
use super::shaders::create_module;

/// One compiled variant
pub struct ShaderVariant {
    pub id: VariantId,
    pub stages: Stages,
    fill: wgpu::RenderPipeline,
    /// Line-mode pipeline, when the device supports it
    wireframe: Option<wgpu::RenderPipeline>,
}

impl ShaderVariant {
    /// Pipeline for the requested polygon mode, falling back to fill
    pub fn pipeline(&self, wireframe: bool) -> &wgpu::RenderPipeline {
        match (&self.wireframe, wireframe) {
            (Some(lines), true) => lines,
            _ => &self.fill,
        }
    }

    /// Spacing the CPU stage runs with for this variant
    pub fn spacing(&self) -> Option<SpacingMode> {
        match self.stages {
            Stages::PassThrough => None,
            Stages::Tessellated(spacing) => Some(spacing),
        }
    }
}

/// All variants plus the one currently bound
pub struct ShaderVariantSet {
    variants: Vec<ShaderVariant>,
    bind_group_layout: wgpu::BindGroupLayout,
    bound: VariantId,
}

impl ShaderVariantSet {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        wireframe_supported: bool,
    ) -> Self {
        let bind_group_layout = create_frame_bind_group_layout(device);

        let variants = VariantId::ALL
            .into_iter()
            .map(|id| {
                let stages = Stages::for_variant(id);
                let module = create_module(device, id);
                let build = |mode| {
                    create_pipeline(device, surface_format, &bind_group_layout, &module, stages, mode)
                };
                ShaderVariant {
                    id,
                    stages,
                    fill: build(wgpu::PolygonMode::Fill),
                    wireframe: wireframe_supported.then(|| build(wgpu::PolygonMode::Line)),
                }
            })
            .collect();

        tracing::debug!("Created {} shader variants", VariantId::ALL.len());

        Self {
            variants,
            bind_group_layout,
            bound: VariantId::PassThrough,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn get(&self, id: VariantId) -> &ShaderVariant {
        &self.variants[id.index()]
    }

    /// The variant the next frame draws with
    pub fn bound(&self) -> &ShaderVariant {
        self.get(self.bound)
    }
}

impl VariantBinder for ShaderVariantSet {
    fn bind(&mut self, variant: VariantId) {
        tracing::info!("Binding shader variant {}", variant.name());
        self.bound = variant;
    }
}
