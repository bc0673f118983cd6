use crate::config::SceneConfig;
use crate::error::ParticleResult;
use crate::particles::{Behavior, CurveRide, FrameInput, ParticleEmitter};
use crate::renderer::{DrawCall, InstanceBackend};

/// Meshes the scene's effects are drawn with, borrowed for one frame
pub struct SceneMeshes<'a, M> {
    /// Coin model
    pub rain: &'a M,
    /// Smoke puff quad
    pub smoke: &'a M,
}

/// What one scene frame did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub rain_active: usize,
    pub smoke_active: usize,
    pub rain_draw: Option<DrawCall>,
    pub smoke_draw: Option<DrawCall>,
    /// Progress of the djinn along its path, in [0, 1+)
    pub apparition_progress: f32,
}

impl FrameReport {
    pub fn draw_calls(&self) -> usize {
        self.rain_draw.is_some() as usize + self.smoke_draw.is_some() as usize
    }
}

/// The lamp demo: coin rain, smoke rising from the lamp and the djinn
/// riding out on the smoke
///
/// Re-enabling an effect restarts it from an empty pool. Pausing freezes
/// the simulation but keeps drawing the last state.
pub struct ParticleScene<B: InstanceBackend> {
    rain: ParticleEmitter<B>,
    smoke: ParticleEmitter<B>,
    apparition: CurveRide,
    rain_enabled: bool,
    smoke_enabled: bool,
    paused: bool,
}

impl<B: InstanceBackend> ParticleScene<B> {
    pub fn new(rain: ParticleEmitter<B>, smoke: ParticleEmitter<B>) -> Self {
        Self {
            rain,
            smoke,
            apparition: CurveRide::apparition(),
            rain_enabled: true,
            smoke_enabled: true,
            paused: false,
        }
    }

    /// Build both emitters from configuration
    ///
    /// `make_backend` is called once per emitter with its pool size.
    pub fn from_config<F>(config: &SceneConfig, mut make_backend: F) -> ParticleResult<Self>
    where
        F: FnMut(usize) -> ParticleResult<B>,
    {
        let rain_behavior = Behavior::rain();
        let rain = ParticleEmitter::with_settings(
            rain_behavior.clone(),
            config.rain.settings_for(&rain_behavior),
            config.rain.pool_size,
            make_backend(config.rain.pool_size)?,
            config.rain.seed,
        );

        let smoke_behavior = Behavior::smoke();
        let smoke = ParticleEmitter::with_settings(
            smoke_behavior.clone(),
            config.smoke.settings_for(&smoke_behavior),
            config.smoke.pool_size,
            make_backend(config.smoke.pool_size)?,
            config.smoke.seed,
        );

        let mut scene = Self::new(rain, smoke);
        scene.rain_enabled = config.rain_enabled;
        scene.smoke_enabled = config.smoke_enabled;
        Ok(scene)
    }

    /// Push new configuration into the running emitters
    ///
    /// Pool sizes and settings change in place; enable flags go through
    /// the same path as the toggles.
    pub fn apply_config(&mut self, config: &SceneConfig) {
        let rain_settings = config.rain.settings_for(self.rain.behavior());
        *self.rain.settings_mut() = rain_settings;
        self.rain.set_pool_size(config.rain.pool_size);

        let smoke_settings = config.smoke.settings_for(self.smoke.behavior());
        *self.smoke.settings_mut() = smoke_settings;
        self.smoke.set_pool_size(config.smoke.pool_size);

        self.set_rain_enabled(config.rain_enabled);
        self.set_smoke_enabled(config.smoke_enabled);
    }

    /// Update and draw every enabled effect, rain first
    pub fn frame(&mut self, input: &FrameInput, meshes: &SceneMeshes<'_, B::Mesh>) -> ParticleResult<FrameReport> {
        let mut report = FrameReport::default();

        if self.rain_enabled {
            if !self.paused {
                self.rain.update(input);
            }
            report.rain_draw = self.rain.render(meshes.rain)?;
        }

        if self.smoke_enabled {
            if !self.paused {
                self.smoke.update(input);
                self.apparition.advance(input.dt);
            }
            report.smoke_draw = self.smoke.render(meshes.smoke)?;
        }

        report.rain_active = self.rain.active_count();
        report.smoke_active = self.smoke.active_count();
        report.apparition_progress = self.apparition.progress();
        Ok(report)
    }

    pub fn set_rain_enabled(&mut self, enabled: bool) {
        if enabled && !self.rain_enabled {
            log::info!("[ParticleScene] Rain enabled");
            self.rain.reset();
        } else if !enabled && self.rain_enabled {
            log::info!("[ParticleScene] Rain disabled");
        }
        self.rain_enabled = enabled;
    }

    pub fn set_smoke_enabled(&mut self, enabled: bool) {
        if enabled && !self.smoke_enabled {
            log::info!("[ParticleScene] Smoke enabled");
            self.smoke.reset();
            self.apparition.reset();
        } else if !enabled && self.smoke_enabled {
            log::info!("[ParticleScene] Smoke disabled");
        }
        self.smoke_enabled = enabled;
    }

    pub fn toggle_rain(&mut self) {
        self.set_rain_enabled(!self.rain_enabled);
    }

    pub fn toggle_smoke(&mut self) {
        self.set_smoke_enabled(!self.smoke_enabled);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            log::info!("[ParticleScene] {}", if paused { "Paused" } else { "Resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn rain_enabled(&self) -> bool {
        self.rain_enabled
    }

    pub fn smoke_enabled(&self) -> bool {
        self.smoke_enabled
    }

    pub fn rain(&self) -> &ParticleEmitter<B> {
        &self.rain
    }

    pub fn rain_mut(&mut self) -> &mut ParticleEmitter<B> {
        &mut self.rain
    }

    pub fn smoke(&self) -> &ParticleEmitter<B> {
        &self.smoke
    }

    pub fn smoke_mut(&mut self) -> &mut ParticleEmitter<B> {
        &mut self.smoke
    }

    pub fn apparition(&self) -> &CurveRide {
        &self.apparition
    }
}
