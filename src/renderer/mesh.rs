use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::renderer::MeshHandle;

/// Per-vertex data of a particle mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        // Position
        0 => Float32x3,
        // Normal
        1 => Float32x3,
        // UV
        2 => Float32x2,
    ];

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Layout of vertex buffer slot 0
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Unit quad facing +Z, centered on the origin
pub fn quad_geometry() -> ([MeshVertex; 4], [u32; 6]) {
    let normal = [0.0, 0.0, 1.0];
    let vertices = [
        MeshVertex::new([-0.5, -0.5, 0.0], normal, [0.0, 1.0]),
        MeshVertex::new([0.5, -0.5, 0.0], normal, [1.0, 1.0]),
        MeshVertex::new([0.5, 0.5, 0.0], normal, [1.0, 0.0]),
        MeshVertex::new([-0.5, 0.5, 0.0], normal, [0.0, 0.0]),
    ];
    (vertices, [0, 1, 2, 0, 2, 3])
}

/// Mesh uploaded to the GPU, drawable with instancing
///
/// Emitters borrow it at render time; loading and lifetime are up to the
/// caller.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, label: &str, vertices: &[MeshVertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "[GpuMesh::new] '{}' uploaded: {} vertices, {} indices",
            label,
            vertices.len(),
            indices.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Billboard quad used by smoke puffs
    pub fn quad(device: &wgpu::Device) -> Self {
        let (vertices, indices) = quad_geometry();
        Self::new(device, "Particle Quad", &vertices, &indices)
    }

    /// Bind the mesh geometry to vertex slot 0 and the index buffer
    pub fn bind<'a>(&'a self, encoder: &mut wgpu::RenderBundleEncoder<'a>) {
        encoder.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        encoder.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }
}

impl MeshHandle for GpuMesh {
    fn index_count(&self) -> u32 {
        self.index_count
    }
}
