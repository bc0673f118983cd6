//! TOML configuration for emitters and the demo scene.
//!
//! Every field is optional in the file; missing values fall back to the
//! demo defaults in `constants`.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{demo, pool};
use crate::error::{ParticleError, ParticleResult};
use crate::particles::{Behavior, EmitterSettings, FrameInput};

/// Configuration of a single emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub pool_size: usize,
    /// Spawn anchor; the behavior's default when absent
    pub origin: Option<Vec3>,
    /// Respawn height; the behavior's default when absent
    pub height_threshold: Option<f32>,
    pub use_rotations: bool,
    pub use_sorting: bool,
    pub parallel_transform: bool,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            pool_size: pool::DEFAULT_POOL_SIZE,
            origin: None,
            height_threshold: None,
            use_rotations: true,
            use_sorting: true,
            parallel_transform: false,
            seed: None,
        }
    }
}

impl EmitterConfig {
    /// Resolve the settings an emitter running `behavior` should use
    pub fn settings_for(&self, behavior: &Behavior) -> EmitterSettings {
        let defaults = behavior.default_settings();
        EmitterSettings {
            origin: self.origin.unwrap_or(defaults.origin),
            height_threshold: self.height_threshold.unwrap_or(defaults.height_threshold),
            use_rotations: self.use_rotations,
            use_sorting: self.use_sorting,
            parallel_transform: self.parallel_transform,
        }
    }

    fn validate(&self, section: &str) -> ParticleResult<()> {
        if self.pool_size > pool::MAX_POOL_SIZE {
            return Err(ParticleError::invalid_config(
                &format!("{}.pool_size", section),
                format!("{} exceeds the maximum of {}", self.pool_size, pool::MAX_POOL_SIZE),
            ));
        }
        if let Some(origin) = self.origin {
            if !origin.is_finite() {
                return Err(ParticleError::invalid_config(
                    &format!("{}.origin", section),
                    format!("{:?} is not finite", origin),
                ));
            }
        }
        if let Some(threshold) = self.height_threshold {
            if !threshold.is_finite() {
                return Err(ParticleError::invalid_config(
                    &format!("{}.height_threshold", section),
                    format!("{} is not finite", threshold),
                ));
            }
        }
        Ok(())
    }
}

/// Configuration of the two-effect demo scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub rain: EmitterConfig,
    pub smoke: EmitterConfig,
    pub rain_enabled: bool,
    pub smoke_enabled: bool,
    /// Frames the headless driver runs
    pub frames: u32,
    /// Fixed timestep in seconds
    pub dt: f32,
    pub camera_position: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rain: EmitterConfig::default(),
            smoke: EmitterConfig::default(),
            rain_enabled: true,
            smoke_enabled: true,
            frames: demo::FRAME_COUNT,
            dt: demo::FRAME_DT,
            camera_position: Vec3::from(demo::CAMERA_POSITION),
        }
    }
}

impl SceneConfig {
    /// Read and validate a TOML scene file
    pub fn load<P: AsRef<Path>>(path: P) -> ParticleResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ParticleError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&raw, path.to_path_buf())?;
        log::info!("[SceneConfig::load] Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML held in memory
    pub fn from_toml_str(raw: &str) -> ParticleResult<Self> {
        Self::parse(raw, PathBuf::from("<inline>"))
    }

    fn parse(raw: &str, path: PathBuf) -> ParticleResult<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|source| ParticleError::ConfigParse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ParticleResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ParticleError::invalid_config(
                "dt",
                format!("{} must be a positive number of seconds", self.dt),
            ));
        }
        if !self.camera_position.is_finite() {
            return Err(ParticleError::invalid_config(
                "camera_position",
                format!("{:?} is not finite", self.camera_position),
            ));
        }
        self.rain.validate("rain")?;
        self.smoke.validate("smoke")
    }

    /// Input for the first frame of a run
    pub fn first_frame(&self) -> FrameInput {
        FrameInput::new(0.0, self.dt, self.camera_position)
    }
}
