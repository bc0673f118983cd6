pub mod backend;
pub mod error;
pub mod headless;
pub mod instance_buffer;
pub mod mesh;

pub use backend::{DrawCall, InstanceBackend, MeshHandle};
pub use headless::{HeadlessBackend, HeadlessMesh};
pub use instance_buffer::{instance_layouts, GpuInstanceBuffers, ParticlePipeline};
pub use mesh::{quad_geometry, GpuMesh, MeshVertex};
