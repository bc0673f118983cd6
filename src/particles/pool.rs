use std::ops::Range;

use crate::particles::ParticleRecord;

/// How many inactive slots an emitter brings to life per update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthPolicy {
    /// `min(remaining, batch) * dt * rate` slots per update; the fractional
    /// part carries over to the next update
    TimeScaled { batch: usize, rate: f32 },
    /// Up to `batch` slots per update
    Batch { batch: usize },
}

/// Fixed-capacity particle arena
///
/// Slots `0..active` are live; the rest are zeroed and inactive. The active
/// count only grows, one bounded batch per update, until it reaches the
/// pool size. Shrinking the pool clamps it immediately.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    records: Vec<ParticleRecord>,
    active: usize,
    /// Slots owed by time-scaled growth
    spawn_accumulator: f32,
}

impl ParticlePool {
    pub fn new(size: usize) -> Self {
        Self {
            records: vec![ParticleRecord::ZERO; size],
            active: 0,
            spawn_accumulator: 0.0,
        }
    }

    /// Target particle count
    pub fn size(&self) -> usize {
        self.records.len()
    }

    /// Particles brought to life so far
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_full(&self) -> bool {
        self.active == self.records.len()
    }

    /// Change the pool size
    ///
    /// Growing appends zeroed records; shrinking truncates and clamps the
    /// active count.
    pub fn resize(&mut self, size: usize) {
        if size == self.records.len() {
            return;
        }

        log::debug!(
            "[ParticlePool::resize] {} -> {} slots ({} active)",
            self.records.len(),
            size,
            self.active
        );

        self.records.resize(size, ParticleRecord::ZERO);
        self.active = self.active.min(size);
        if self.is_full() {
            self.spawn_accumulator = 0.0;
        }
    }

    /// Activate the next batch of slots and return their indices
    ///
    /// The returned slots still hold whatever they held before; the caller
    /// is expected to initialize them.
    pub fn grow(&mut self, policy: GrowthPolicy, dt: f32) -> Range<usize> {
        let start = self.active;
        let remaining = self.records.len() - self.active;
        if remaining == 0 {
            self.spawn_accumulator = 0.0;
            return start..start;
        }

        let admitted = match policy {
            GrowthPolicy::TimeScaled { batch, rate } => {
                self.spawn_accumulator += remaining.min(batch) as f32 * dt.max(0.0) * rate;
                let whole = self.spawn_accumulator.floor();
                self.spawn_accumulator -= whole;
                whole as usize
            }
            GrowthPolicy::Batch { batch } => batch,
        }
        .min(remaining);

        self.active += admitted;
        if self.is_full() {
            self.spawn_accumulator = 0.0;
        }
        start..self.active
    }

    /// Zero every slot and start the ramp over
    pub fn reset(&mut self) {
        self.records.fill(ParticleRecord::ZERO);
        self.active = 0;
        self.spawn_accumulator = 0.0;
    }

    /// All slots, live and inactive
    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn live(&self) -> &[ParticleRecord] {
        &self.records[..self.active]
    }

    pub fn live_mut(&mut self) -> &mut [ParticleRecord] {
        &mut self.records[..self.active]
    }

    pub fn get(&self, index: usize) -> Option<&ParticleRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ParticleRecord> {
        self.records.get_mut(index)
    }

    /// Order the live slots farthest first for back-to-front blending
    pub fn sort_by_depth(&mut self) {
        self.live_mut()
            .sort_unstable_by(|a, b| b.distance_from_camera.total_cmp(&a.distance_from_camera));
    }
}
