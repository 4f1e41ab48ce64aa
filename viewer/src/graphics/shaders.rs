//! WGSL shader sources
//!
//! The pass-through variant has its own program. The three tessellation
//! variants share the evaluation program; they differ in the spacing the
//! CPU primitive generator runs with.

use tessellab_core::VariantId;

/// Vertex + fragment program for the untessellated mesh
pub const PASSTHROUGH_WGSL: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/passthrough.wgsl"));

/// Evaluation + fragment program for generated domain vertices
pub const TESSELLATED_WGSL: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/tessellated.wgsl"));

/// Source for a variant
pub fn source_for(variant: VariantId) -> &'static str {
    if variant.is_tessellated() {
        TESSELLATED_WGSL
    } else {
        PASSTHROUGH_WGSL
    }
}

/// Compile a variant's program
pub fn create_module(device: &wgpu::Device, variant: VariantId) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(variant.name()),
        source: wgpu::ShaderSource::Wgsl(source_for(variant).into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse and validate WGSL with naga
    fn compile_and_validate(name: &str, source: &str) -> Result<naga::Module, String> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| format!("WGSL parse error in {}: {:?}", name, e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("Validation error in {}: {:?}", name, e))?;

        Ok(module)
    }

    fn entry_points(module: &naga::Module) -> Vec<(&str, naga::ShaderStage)> {
        module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect()
    }

    #[test]
    fn test_passthrough_compiles() {
        let module = compile_and_validate("passthrough.wgsl", PASSTHROUGH_WGSL).unwrap();
        let entries = entry_points(&module);
        assert!(entries.contains(&("vs", naga::ShaderStage::Vertex)));
        assert!(entries.contains(&("fs", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn test_tessellated_compiles() {
        let module = compile_and_validate("tessellated.wgsl", TESSELLATED_WGSL).unwrap();
        let entries = entry_points(&module);
        assert!(entries.contains(&("vs", naga::ShaderStage::Vertex)));
        assert!(entries.contains(&("fs", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn test_every_variant_has_a_source() {
        for variant in VariantId::ALL {
            let source = source_for(variant);
            assert!(source.contains("@vertex"));
            assert!(source.contains("@fragment"));
        }
        assert!(std::ptr::eq(
            source_for(VariantId::EqualSpacing),
            source_for(VariantId::EvenSpacing)
        ));
    }

    #[test]
    fn test_tessellated_reads_control_points() {
        assert!(TESSELLATED_WGSL.contains("var<storage, read> control_points"));
        assert!(!PASSTHROUGH_WGSL.contains("control_points"));
    }
}
