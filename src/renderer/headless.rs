use crate::error::ParticleResult;
use crate::particles::InstanceArrays;
use crate::renderer::{DrawCall, InstanceBackend, MeshHandle};

/// Mesh stand-in that only knows its index count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessMesh {
    pub index_count: u32,
}

impl HeadlessMesh {
    /// Two-triangle quad
    pub fn quad() -> Self {
        Self { index_count: 6 }
    }
}

impl MeshHandle for HeadlessMesh {
    fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// Backend that keeps the streamed arrays on the CPU and records draws
///
/// Used when no GPU is around: tests, benchmarks and the demo binary.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    uploaded: InstanceArrays,
    draws: Vec<DrawCall>,
    frames_streamed: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the last upload
    pub fn uploaded(&self) -> &InstanceArrays {
        &self.uploaded
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn last_draw(&self) -> Option<DrawCall> {
        self.draws.last().copied()
    }

    pub fn frames_streamed(&self) -> u64 {
        self.frames_streamed
    }

    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl InstanceBackend for HeadlessBackend {
    type Mesh = HeadlessMesh;

    fn stream(&mut self, instances: &InstanceArrays) -> ParticleResult<()> {
        self.uploaded.clone_from(instances);
        self.frames_streamed += 1;
        Ok(())
    }

    fn draw_instanced(&mut self, _mesh: &HeadlessMesh, call: DrawCall) -> ParticleResult<()> {
        log::trace!(
            "[HeadlessBackend::draw_instanced] {} indices x {} instances",
            call.index_count,
            call.instance_count
        );
        self.draws.push(call);
        Ok(())
    }
}
