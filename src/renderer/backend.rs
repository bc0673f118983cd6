//! Seams between the emitters and whatever draws them.

use crate::error::ParticleResult;
use crate::particles::InstanceArrays;

/// Geometry drawn once per particle
///
/// Emitters only borrow meshes for the duration of a render call.
pub trait MeshHandle {
    /// Number of indices submitted per instance
    fn index_count(&self) -> u32;
}

/// One instanced draw of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub index_count: u32,
    pub instance_count: u32,
}

/// Receives the per-instance arrays each frame and issues the draw
///
/// Implementations own the GPU-side copies of the four arrays. `stream`
/// always receives full arrays sized to the pool and must replace the
/// previous contents entirely.
pub trait InstanceBackend {
    type Mesh: MeshHandle;

    /// Discard the previous frame's instance data and upload `instances`
    fn stream(&mut self, instances: &InstanceArrays) -> ParticleResult<()>;

    /// Draw `mesh` once per instance using the last streamed arrays
    fn draw_instanced(&mut self, mesh: &Self::Mesh, call: DrawCall) -> ParticleResult<()>;
}
