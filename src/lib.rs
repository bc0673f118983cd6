//! Instanced particle effects for the djinn lamp demo.
//!
//! Two effects share one emitter: a ballistic coin rain and a smoke plume
//! whose puffs follow randomized cubic Bézier curves. Emitters simulate on
//! the CPU and hand four per-instance arrays (translation, rotation,
//! scale, life) to an [`InstanceBackend`], which draws the whole pool with
//! a single instanced call. [`GpuInstanceBuffers`] is the wgpu backend;
//! [`HeadlessBackend`] records uploads and draws without a GPU.

pub mod config;
pub mod constants;
pub mod error;
pub mod particles;
pub mod renderer;

pub use config::{EmitterConfig, SceneConfig};
pub use error::{ParticleError, ParticleResult};
pub use particles::{
    Behavior, BehaviorKind, CurveRide, EmitterSettings, FrameInput, FrameReport, InstanceArrays,
    ParticleEmitter, ParticleRecord, ParticleScene, SceneMeshes,
};
pub use renderer::{
    DrawCall, GpuInstanceBuffers, GpuMesh, HeadlessBackend, HeadlessMesh, InstanceBackend,
    MeshHandle,
};
