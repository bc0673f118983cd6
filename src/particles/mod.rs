pub mod behavior;
pub mod billboard;
pub mod curve;
pub mod emitter;
pub mod frame;
pub mod instance_data;
pub mod particle;
pub mod pool;
pub mod rain;
pub mod scene;
pub mod smoke;

pub use behavior::{Behavior, BehaviorKind};
pub use billboard::{billboard_orientation, rotation_matrix, BillboardOrientation};
pub use curve::{cubic_bezier, polyline_point, sample_polyline, CurveRide};
pub use emitter::{EmitterSettings, ParticleEmitter};
pub use frame::FrameInput;
pub use instance_data::InstanceArrays;
pub use particle::ParticleRecord;
pub use pool::{GrowthPolicy, ParticlePool};
pub use rain::RainBehavior;
pub use scene::{FrameReport, ParticleScene, SceneMeshes};
pub use smoke::SmokeBehavior;
