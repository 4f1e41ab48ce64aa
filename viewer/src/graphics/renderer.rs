//! Scene rendering
//!
//! Uploads the frame's uniforms, runs the CPU tessellation stage when the
//! bound variant needs it and records the scene pass.

use tessellab_core::frame::model_matrix;
use tessellab_core::{
    DomainVertex, DrawCall, FramePlan, MeshData, NormalMode, SceneCounts, TessellationStage,
    TessellationUniforms, TransformUniforms,
};

use super::scene_object::SceneObject;
use super::variants::ShaderVariant;
use super::{GraphicsContext, ShaderVariantSet};

/// Smallest domain vertex buffer, in vertices
const MIN_DOMAIN_CAPACITY: u64 = 1024;

/// Per-frame GPU state for the single scene
pub struct SceneRenderer {
    /// One object per normal mode, indexed by [`NormalMode::index`]
    objects: [SceneObject; 2],
    bind_groups: [wgpu::BindGroup; 2],
    transforms_buffer: wgpu::Buffer,
    tessellation_buffer: wgpu::Buffer,
    domain_buffer: wgpu::Buffer,
    domain_capacity: u64,
    domain_vertex_count: u32,
    stage: TessellationStage,
    clear_color: wgpu::Color,
}

fn create_domain_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Domain Vertices"),
        size: capacity * std::mem::size_of::<DomainVertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl SceneRenderer {
    pub fn new(
        graphics: &GraphicsContext,
        variants: &ShaderVariantSet,
        mesh: &MeshData,
        clear_color: [f64; 4],
    ) -> Self {
        let device = graphics.device();

        let objects = NormalMode::ALL.map(|mode| SceneObject::new(device, mesh, mode));

        let transforms_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Transform Uniforms"),
            size: std::mem::size_of::<TransformUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let tessellation_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Tessellation Uniforms"),
            size: std::mem::size_of::<TessellationUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_groups = [&objects[0], &objects[1]].map(|object| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: variants.bind_group_layout(),
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: transforms_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: tessellation_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: object.control_point_buffer().as_entire_binding(),
                    },
                ],
            })
        });

        let [r, g, b, a] = clear_color;
        Self {
            objects,
            bind_groups,
            transforms_buffer,
            tessellation_buffer,
            domain_buffer: create_domain_buffer(device, MIN_DOMAIN_CAPACITY),
            domain_capacity: MIN_DOMAIN_CAPACITY,
            domain_vertex_count: 0,
            stage: TessellationStage::new(),
            clear_color: wgpu::Color { r, g, b, a },
        }
    }

    /// Counts of the cached geometry; both normal modes share them
    pub fn counts(&self) -> SceneCounts {
        self.objects[0].counts()
    }

    /// Run the tessellation stage and upload its output if it changed
    fn prepare_domain(
        &mut self,
        graphics: &GraphicsContext,
        object: usize,
        uniforms: &TessellationUniforms,
        variant: &ShaderVariant,
    ) {
        let Some(spacing) = variant.spacing() else {
            return;
        };
        let changed = self.stage.update(
            self.objects[object].control_points(),
            uniforms,
            &model_matrix(),
            spacing,
        );
        if !changed {
            return;
        }

        let vertices = self.stage.vertices();
        let needed = vertices.len() as u64;
        if needed > self.domain_capacity {
            let capacity = needed.next_power_of_two();
            tracing::debug!("Growing domain vertex buffer to {} vertices", capacity);
            self.domain_buffer.destroy();
            self.domain_buffer = create_domain_buffer(graphics.device(), capacity);
            self.domain_capacity = capacity;
        }
        if !vertices.is_empty() {
            graphics
                .queue()
                .write_buffer(&self.domain_buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.domain_vertex_count = vertices.len() as u32;
    }

    /// Record the scene pass for one frame
    pub fn render(
        &mut self,
        graphics: &GraphicsContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        plan: &FramePlan,
        variant: &ShaderVariant,
    ) {
        let object = plan.object.index();
        let queue = graphics.queue();

        queue.write_buffer(
            &self.transforms_buffer,
            0,
            bytemuck::bytes_of(&plan.transforms),
        );
        if let Some(uniforms) = &plan.tessellation {
            queue.write_buffer(&self.tessellation_buffer, 0, bytemuck::bytes_of(uniforms));
            self.prepare_domain(graphics, object, uniforms, variant);
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: graphics.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(variant.pipeline(plan.wireframe));
        pass.set_bind_group(0, &self.bind_groups[object], &[]);

        match plan.draw {
            DrawCall::Indexed { index_count } if variant.spacing().is_none() => {
                let scene_object = &self.objects[object];
                pass.set_vertex_buffer(0, scene_object.vertex_buffer().slice(..));
                pass.set_index_buffer(
                    scene_object.index_buffer().slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..index_count, 0, 0..1);
            }
            DrawCall::Patches { .. } if variant.spacing().is_some() => {
                if self.domain_vertex_count > 0 {
                    pass.set_vertex_buffer(0, self.domain_buffer.slice(..));
                    pass.draw(0..self.domain_vertex_count, 0..1);
                }
            }
            draw => {
                tracing::warn!(
                    "Draw {:?} does not match bound variant {}, skipping",
                    draw,
                    variant.id.name()
                );
            }
        }
    }
}

impl Drop for SceneRenderer {
    fn drop(&mut self) {
        self.transforms_buffer.destroy();
        self.tessellation_buffer.destroy();
        self.domain_buffer.destroy();
    }
}
