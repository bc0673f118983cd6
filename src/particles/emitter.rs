use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::pool;
use crate::error::ParticleResult;
use crate::particles::{Behavior, FrameInput, InstanceArrays, ParticlePool, ParticleRecord};
use crate::renderer::{DrawCall, InstanceBackend, MeshHandle};

/// Per-emitter knobs read by the behaviors and by `render`
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterSettings {
    /// Spawn anchor in world space
    pub origin: Vec3,
    /// Height at which particles respawn (floor for rain, ceiling for smoke)
    pub height_threshold: f32,
    /// Upload billboard rotations; identity matrices otherwise
    pub use_rotations: bool,
    /// Depth-sort live particles before building instance data
    pub use_sorting: bool,
    /// Build the instance arrays on the rayon pool
    pub parallel_transform: bool,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            height_threshold: 0.0,
            use_rotations: true,
            use_sorting: true,
            parallel_transform: false,
        }
    }
}

/// Particle emitter that simulates a pool and draws it with one instanced call
///
/// `B` receives the instance arrays every frame; meshes are borrowed only
/// for the duration of `render`.
pub struct ParticleEmitter<B: InstanceBackend> {
    behavior: Behavior,
    pool: ParticlePool,
    settings: EmitterSettings,
    rng: StdRng,
    /// CPU mirrors of the streamed instance arrays
    instances: InstanceArrays,
    backend: B,
    warned_degenerate: bool,
}

impl<B: InstanceBackend> ParticleEmitter<B> {
    /// Create an emitter with the behavior's default settings and an entropy-seeded RNG
    pub fn new(behavior: Behavior, pool_size: usize, backend: B) -> Self {
        let settings = behavior.default_settings();
        Self::with_rng(behavior, settings, pool_size, backend, StdRng::from_entropy())
    }

    /// Create an emitter whose random draws are reproducible
    pub fn with_seed(behavior: Behavior, pool_size: usize, backend: B, seed: u64) -> Self {
        let settings = behavior.default_settings();
        Self::with_rng(behavior, settings, pool_size, backend, StdRng::seed_from_u64(seed))
    }

    /// Create an emitter with explicit settings
    pub fn with_settings(
        behavior: Behavior,
        settings: EmitterSettings,
        pool_size: usize,
        backend: B,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(behavior, settings, pool_size, backend, rng)
    }

    /// Coin rain with the demo pool size
    pub fn rain(backend: B) -> Self {
        Self::new(Behavior::rain(), pool::DEFAULT_POOL_SIZE, backend)
    }

    /// Blue smoke with the demo pool size
    pub fn smoke(backend: B) -> Self {
        Self::new(Behavior::smoke(), pool::DEFAULT_POOL_SIZE, backend)
    }

    fn with_rng(
        behavior: Behavior,
        settings: EmitterSettings,
        pool_size: usize,
        backend: B,
        rng: StdRng,
    ) -> Self {
        let pool_size = clamp_pool_size(pool_size);

        log::info!(
            "[ParticleEmitter::new] {} emitter with {} slots at {:?}",
            behavior.kind(),
            pool_size,
            settings.origin
        );

        Self {
            behavior,
            pool: ParticlePool::new(pool_size),
            settings,
            rng,
            instances: InstanceArrays::with_len(pool_size),
            backend,
            warned_degenerate: false,
        }
    }

    /// Advance the simulation by one frame
    ///
    /// Grows the active count by one batch, then respawns, integrates and
    /// re-orients every live particle.
    pub fn update(&mut self, frame: &FrameInput) {
        if self.pool.size() == 0 {
            return;
        }

        if !self.warned_degenerate && self.settings.height_threshold == self.settings.origin.y {
            log::warn!(
                "[ParticleEmitter::update] {} emitter threshold equals origin height {}; life stays at 0",
                self.behavior.kind(),
                self.settings.origin.y
            );
            self.warned_degenerate = true;
        }

        let admitted = self.pool.grow(self.behavior.growth_policy(), frame.dt);
        if !admitted.is_empty() {
            log::trace!(
                "[ParticleEmitter::update] {} activated slots {:?}",
                self.behavior.kind(),
                admitted
            );
        }
        for index in admitted {
            if let Some(particle) = self.pool.get_mut(index) {
                self.behavior.spawn(particle, &self.settings, &mut self.rng);
            }
        }

        self.behavior.begin_update();

        let behavior = &self.behavior;
        let settings = &self.settings;
        let rng = &mut self.rng;
        for particle in self.pool.live_mut() {
            behavior.step(particle, settings, frame, rng);
        }
    }

    /// Stream instance data for the whole pool and draw `mesh` once per slot
    ///
    /// Returns `None` without touching the backend when the pool is empty.
    pub fn render(&mut self, mesh: &B::Mesh) -> ParticleResult<Option<DrawCall>> {
        let size = self.pool.size();
        if size == 0 {
            return Ok(None);
        }

        if self.settings.use_sorting {
            self.pool.sort_by_depth();
        }

        self.instances.rebuild(
            self.pool.records(),
            self.settings.use_rotations,
            self.settings.parallel_transform,
        );
        self.backend.stream(&self.instances)?;

        let call = DrawCall {
            index_count: mesh.index_count(),
            instance_count: size as u32,
        };
        self.backend.draw_instanced(mesh, call)?;

        log::trace!(
            "[ParticleEmitter::render] {} emitter: {} instances ({} active)",
            self.behavior.kind(),
            size,
            self.pool.active()
        );
        Ok(Some(call))
    }

    /// Change the number of slots; takes effect on the next update
    pub fn set_pool_size(&mut self, size: usize) {
        let size = clamp_pool_size(size);
        self.pool.resize(size);
        self.instances.resize(size);
    }

    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }

    pub fn active_count(&self) -> usize {
        self.pool.active()
    }

    /// Every slot, live or not, in current pool order
    pub fn particles(&self) -> &[ParticleRecord] {
        self.pool.records()
    }

    pub fn live(&self) -> &[ParticleRecord] {
        self.pool.live()
    }

    /// Start the effect over with an empty pool; backend resources are kept
    pub fn reset(&mut self) {
        log::debug!("[ParticleEmitter::reset] {} emitter", self.behavior.kind());
        self.pool.reset();
        self.behavior.reset();
        self.warned_degenerate = false;
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EmitterSettings {
        self.warned_degenerate = false;
        &mut self.settings
    }

    pub fn instances(&self) -> &InstanceArrays {
        &self.instances
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

fn clamp_pool_size(size: usize) -> usize {
    if size > pool::MAX_POOL_SIZE {
        log::warn!(
            "[ParticleEmitter] Pool size {} clamped to {}",
            size,
            pool::MAX_POOL_SIZE
        );
    }
    size.min(pool::MAX_POOL_SIZE)
}
