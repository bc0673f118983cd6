// Djinn Particle Constants - SINGLE SOURCE OF TRUTH
//
// This file contains ALL tuning constants used by the emitters.
// Behaviors, the instance streamer and the config defaults all read from here.
//
// Do NOT sprinkle magic numbers through the behavior code!

/// Pool sizing and ramp-up
pub mod pool {
    /// Upper bound accepted from configuration
    pub const MAX_POOL_SIZE: usize = 1_000_000;

    /// Largest number of slots considered for activation in one update
    pub const GROWTH_BATCH: usize = 50;

    /// Rain ramp-up multiplier, applied to `batch * dt`
    pub const RAIN_GROWTH_RATE: f32 = 0.8;

    /// Pool size used by the demo for both effects
    pub const DEFAULT_POOL_SIZE: usize = 200;
}

/// Coin rain (ballistic) behavior
pub mod rain {
    /// Floor plane the coins fall onto; also the life reference height
    pub const HEIGHT_THRESHOLD: f32 = -3.439;

    /// Collision fires slightly above the floor
    pub const COLLISION_MARGIN: f32 = 0.001;

    /// Horizontal spread of the spawn box
    pub const SPAWN_SPREAD: f32 = 4.0;

    /// Initial downward speed
    pub const INITIAL_VELOCITY: [f32; 3] = [0.0, -10.0, 0.0];

    pub const GRAVITY: [f32; 3] = [0.0, -9.8, 0.0];

    pub const MIN_MASS: f32 = 0.5;

    /// Demo cloud height
    pub const DEFAULT_ORIGIN: [f32; 3] = [0.0, 20.0, 0.0];
}

/// Blue smoke (curve following) behavior
pub mod smoke {
    /// Ceiling above which smoke particles respawn
    pub const HEIGHT_THRESHOLD: f32 = 5.0;

    /// Per-update increase of the shared traversal counter
    pub const COUNTER_STEP: f32 = 0.01;

    /// Cap of the shared traversal counter
    pub const COUNTER_MAX: f32 = 4.8;

    pub const INITIAL_MASS: f32 = 0.02;
    pub const MAX_MASS: f32 = 0.7;

    /// Shared drift, used for both velocity and acceleration
    pub const DRIFT: [f32; 3] = [1.0, 1.0, 1.0];

    /// Life bands driving mass growth
    pub const YOUNG_LIFE: f32 = 0.7;
    pub const OLD_LIFE: f32 = 0.3;

    /// Mass added per update in each life band
    pub const YOUNG_GROWTH: f32 = 0.015;
    pub const MIDDLE_GROWTH: f32 = 0.05;
    pub const OLD_GROWTH: f32 = 0.1;

    /// Lamp tip
    pub const DEFAULT_ORIGIN: [f32; 3] = [0.0, 0.0, 0.0];
}

/// Cubic Bézier sampling
pub mod curve {
    /// Points in each cached polyline
    pub const SAMPLE_COUNT: usize = 10;

    /// Djinn apparition path control points
    pub const APPARITION_POINTS: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
        [5.0, 2.0, 0.0],
        [5.0, 5.0, 0.0],
    ];

    pub const APPARITION_COUNTER_STEP: f32 = 0.01;
    pub const APPARITION_COUNTER_LIMIT: f32 = 5.0;
}

/// Per-instance vertex attribute locations
pub mod instancing {
    /// First location of the translation matrix (4 consecutive vec4s)
    pub const TRANSLATION_LOCATION: u32 = 3;
    /// First location of the rotation matrix (4 consecutive vec4s)
    pub const ROTATION_LOCATION: u32 = 7;
    pub const SCALE_LOCATION: u32 = 11;
    pub const LIFE_LOCATION: u32 = 12;

    /// Vertex buffer slots; slot 0 belongs to the mesh
    pub const TRANSLATION_SLOT: u32 = 1;
    pub const ROTATION_SLOT: u32 = 2;
    pub const SCALE_SLOT: u32 = 3;
    pub const LIFE_SLOT: u32 = 4;
}

/// Demo frame driver
pub mod demo {
    pub const FRAME_DT: f32 = 0.016;
    pub const FRAME_COUNT: u32 = 600;
    pub const CAMERA_POSITION: [f32; 3] = [0.0, 3.0, 8.0];
}
