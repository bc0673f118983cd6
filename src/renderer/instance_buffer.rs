//! wgpu backend for particle instance streaming.
//!
//! Each emitter owns four vertex buffers, one per instance array. Every
//! frame the full arrays are written again: when the pool size changes the
//! buffers are reallocated at the new size (the old allocation is released
//! once the GPU is done with it), otherwise the whole buffer is overwritten
//! through the queue's staging path. Neither path waits on draws still in
//! flight, which is what buffer orphaning achieves on older APIs.

use std::sync::Arc;

use glam::Mat4;

use crate::constants::instancing::{
    LIFE_LOCATION, LIFE_SLOT, ROTATION_LOCATION, ROTATION_SLOT, SCALE_LOCATION, SCALE_SLOT,
    TRANSLATION_LOCATION, TRANSLATION_SLOT,
};
use crate::error::{ParticleError, ParticleResult};
use crate::particles::InstanceArrays;
use crate::renderer::error::{buffer_allocation_error, check_buffer_size};
use crate::renderer::{DrawCall, GpuMesh, InstanceBackend};

const MAT4_SIZE: u64 = std::mem::size_of::<Mat4>() as u64;
const F32_SIZE: u64 = std::mem::size_of::<f32>() as u64;

const TRANSLATION_ATTRIBUTES: [wgpu::VertexAttribute; 4] = matrix_attributes(TRANSLATION_LOCATION);
const ROTATION_ATTRIBUTES: [wgpu::VertexAttribute; 4] = matrix_attributes(ROTATION_LOCATION);
const SCALE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    offset: 0,
    shader_location: SCALE_LOCATION,
    format: wgpu::VertexFormat::Float32,
}];
const LIFE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    offset: 0,
    shader_location: LIFE_LOCATION,
    format: wgpu::VertexFormat::Float32,
}];

/// A mat4 is fed to the shader as four consecutive vec4 columns
const fn matrix_attributes(first_location: u32) -> [wgpu::VertexAttribute; 4] {
    let mut attributes = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x4,
    }; 4];
    let mut column = 0;
    while column < 4 {
        attributes[column].offset = (column as u64) * 16;
        attributes[column].shader_location = first_location + column as u32;
        column += 1;
    }
    attributes
}

/// Vertex buffer layouts for slots 1..=4, advancing once per instance
///
/// Pipelines drawing particles list these after `MeshVertex::desc()`.
pub fn instance_layouts() -> [wgpu::VertexBufferLayout<'static>; 4] {
    [
        wgpu::VertexBufferLayout {
            array_stride: MAT4_SIZE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &TRANSLATION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: MAT4_SIZE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ROTATION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: F32_SIZE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &SCALE_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: F32_SIZE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &LIFE_ATTRIBUTES,
        },
    ]
}

/// Render state the particle draw is recorded against
///
/// Shader compilation and uniform wiring happen elsewhere; the pipeline
/// must have been built with `instance_layouts()`.
#[derive(Clone)]
pub struct ParticlePipeline {
    pub pipeline: Arc<wgpu::RenderPipeline>,
    /// Bound at group indices 0, 1, ... in order
    pub bind_groups: Vec<Arc<wgpu::BindGroup>>,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub sample_count: u32,
}

/// One of the four instance buffers
struct StreamBuffer {
    label: &'static str,
    element_size: u64,
    capacity: usize,
    buffer: wgpu::Buffer,
}

impl StreamBuffer {
    fn new(device: &wgpu::Device, label: &'static str, element_size: u64, capacity: usize) -> ParticleResult<Self> {
        let buffer = allocate_buffer(device, label, element_size * capacity.max(1) as u64)?;
        Ok(Self {
            label,
            element_size,
            capacity,
            buffer,
        })
    }

    /// Reallocate at exactly `count` elements if the size changed
    fn fit(&mut self, device: &wgpu::Device, count: usize) -> ParticleResult<()> {
        if count == self.capacity {
            return Ok(());
        }

        log::debug!(
            "[GpuInstanceBuffers] Reallocating '{}' for {} instances (was {})",
            self.label,
            count,
            self.capacity
        );
        self.buffer = allocate_buffer(device, self.label, self.element_size * count.max(1) as u64)?;
        self.capacity = count;
        Ok(())
    }

    fn write(&self, queue: &wgpu::Queue, bytes: &[u8]) {
        queue.write_buffer(&self.buffer, 0, bytes);
    }

    fn slice(&self, instances: u32) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..instances as u64 * self.element_size)
    }
}

/// Create a vertex buffer, surfacing allocation failures instead of
/// deferring them to the device's uncaptured-error handler
fn allocate_buffer(device: &wgpu::Device, label: &str, size: u64) -> ParticleResult<wgpu::Buffer> {
    check_buffer_size(label, size, device.limits().max_buffer_size)?;

    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());

    if let Some(error) = validation.or(out_of_memory) {
        log::error!("[GpuInstanceBuffers] Allocation of '{}' failed: {}", label, error);
        return Err(buffer_allocation_error(label, size, error));
    }
    Ok(buffer)
}

/// GPU-resident instance arrays for one emitter
pub struct GpuInstanceBuffers {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    translations: StreamBuffer,
    rotations: StreamBuffer,
    scales: StreamBuffer,
    lives: StreamBuffer,
    pipeline: Option<ParticlePipeline>,
    /// Draw recorded by the last `draw_instanced`
    bundle: Option<wgpu::RenderBundle>,
}

impl GpuInstanceBuffers {
    /// Allocate buffers for `capacity` instances
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, capacity: usize) -> ParticleResult<Self> {
        let translations = StreamBuffer::new(&device, "Particle Translations", MAT4_SIZE, capacity)?;
        let rotations = StreamBuffer::new(&device, "Particle Rotations", MAT4_SIZE, capacity)?;
        let scales = StreamBuffer::new(&device, "Particle Scales", F32_SIZE, capacity)?;
        let lives = StreamBuffer::new(&device, "Particle Lives", F32_SIZE, capacity)?;

        log::debug!(
            "[GpuInstanceBuffers::new] Allocated instance buffers for {} particles",
            capacity
        );

        Ok(Self {
            device,
            queue,
            translations,
            rotations,
            scales,
            lives,
            pipeline: None,
            bundle: None,
        })
    }

    pub fn with_pipeline(mut self, pipeline: ParticlePipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn set_pipeline(&mut self, pipeline: ParticlePipeline) {
        self.pipeline = Some(pipeline);
        self.bundle = None;
    }

    /// Instances the buffers currently hold
    pub fn capacity(&self) -> usize {
        self.translations.capacity
    }

    /// Render bundle holding the last instanced draw
    ///
    /// Execute it inside the frame's render pass:
    /// `pass.execute_bundles(buffers.bundle())`.
    pub fn bundle(&self) -> Option<&wgpu::RenderBundle> {
        self.bundle.as_ref()
    }

    pub fn translation_buffer(&self) -> &wgpu::Buffer {
        &self.translations.buffer
    }

    pub fn rotation_buffer(&self) -> &wgpu::Buffer {
        &self.rotations.buffer
    }

    pub fn scale_buffer(&self) -> &wgpu::Buffer {
        &self.scales.buffer
    }

    pub fn life_buffer(&self) -> &wgpu::Buffer {
        &self.lives.buffer
    }
}

impl InstanceBackend for GpuInstanceBuffers {
    type Mesh = GpuMesh;

    fn stream(&mut self, instances: &InstanceArrays) -> ParticleResult<()> {
        let count = instances.len();
        if count == 0 {
            return Ok(());
        }

        self.translations.fit(&self.device, count)?;
        self.rotations.fit(&self.device, count)?;
        self.scales.fit(&self.device, count)?;
        self.lives.fit(&self.device, count)?;

        self.translations.write(&self.queue, instances.translation_bytes());
        self.rotations.write(&self.queue, instances.rotation_bytes());
        self.scales.write(&self.queue, instances.scale_bytes());
        self.lives.write(&self.queue, instances.life_bytes());
        Ok(())
    }

    fn draw_instanced(&mut self, mesh: &GpuMesh, call: DrawCall) -> ParticleResult<()> {
        let pipeline = self.pipeline.as_ref().ok_or(ParticleError::MissingPipeline)?;
        let instances = call.instance_count.min(self.capacity() as u32);

        let bundle = {
            let mut encoder = self
                .device
                .create_render_bundle_encoder(&wgpu::RenderBundleEncoderDescriptor {
                    label: Some("Particle Instanced Draw"),
                    color_formats: &[Some(pipeline.color_format)],
                    depth_stencil: pipeline.depth_format.map(|format| {
                        wgpu::RenderBundleDepthStencil {
                            format,
                            depth_read_only: false,
                            stencil_read_only: true,
                        }
                    }),
                    sample_count: pipeline.sample_count,
                    multiview: None,
                });

            encoder.set_pipeline(&pipeline.pipeline);
            for (index, bind_group) in pipeline.bind_groups.iter().enumerate() {
                encoder.set_bind_group(index as u32, bind_group, &[]);
            }

            mesh.bind(&mut encoder);
            encoder.set_vertex_buffer(TRANSLATION_SLOT, self.translations.slice(instances));
            encoder.set_vertex_buffer(ROTATION_SLOT, self.rotations.slice(instances));
            encoder.set_vertex_buffer(SCALE_SLOT, self.scales.slice(instances));
            encoder.set_vertex_buffer(LIFE_SLOT, self.lives.slice(instances));
            encoder.draw_indexed(0..call.index_count, 0, 0..instances);

            encoder.finish(&wgpu::RenderBundleDescriptor {
                label: Some("Particle Bundle"),
            })
        };

        self.bundle = Some(bundle);
        Ok(())
    }
}

impl Drop for GpuInstanceBuffers {
    fn drop(&mut self) {
        log::debug!(
            "[GpuInstanceBuffers::drop] Releasing instance buffers ({} instances)",
            self.capacity()
        );
        self.bundle = None;
        self.translations.buffer.destroy();
        self.rotations.buffer.destroy();
        self.scales.buffer.destroy();
        self.lives.buffer.destroy();
    }
}
