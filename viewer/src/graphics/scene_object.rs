//! Cached GPU geometry for one normal mode

use wgpu::util::DeviceExt;

use tessellab_core::{ControlPoint, MeshData, NormalMode, SceneCounts};

/// Vertex, index and control-point buffers for the mesh drawn with one
/// normal set. Immutable after creation; buffers are destroyed on drop.
pub struct SceneObject {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    control_point_buffer: wgpu::Buffer,
    /// CPU copy for the tessellation control stage
    control_points: Vec<ControlPoint>,
    index_count: u32,
    vertex_count: u32,
}

impl SceneObject {
    pub fn new(device: &wgpu::Device, mesh: &MeshData, normal_mode: NormalMode) -> Self {
        let vertices = mesh.vertices(normal_mode);
        let control_points = mesh.control_points(normal_mode);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Indices"),
            contents: bytemuck::cast_slice(mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let control_point_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Control Points"),
            contents: bytemuck::cast_slice(&control_points),
            usage: wgpu::BufferUsages::STORAGE,
        });

        tracing::debug!(
            "Created scene object ({:?}): {} vertices, {} indices, {} control points",
            normal_mode,
            vertices.len(),
            mesh.index_count(),
            control_points.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count() as u32,
            vertex_count: control_points.len() as u32,
            control_point_buffer,
            control_points,
        }
    }

    pub fn counts(&self) -> SceneCounts {
        SceneCounts {
            index_count: self.index_count,
            vertex_count: self.vertex_count,
        }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn control_point_buffer(&self) -> &wgpu::Buffer {
        &self.control_point_buffer
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }
}

impl Drop for SceneObject {
    fn drop(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.control_point_buffer.destroy();
    }
}
