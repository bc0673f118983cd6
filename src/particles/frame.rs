use glam::Vec3;

/// Per-frame input supplied by the surrounding frame loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the demo started
    pub time: f32,
    /// Seconds since the previous frame
    pub dt: f32,
    /// Camera position in world space
    pub camera_position: Vec3,
}

impl FrameInput {
    pub fn new(time: f32, dt: f32, camera_position: Vec3) -> Self {
        Self {
            time,
            dt,
            camera_position,
        }
    }

    /// The input for the frame following this one, at a fixed step
    pub fn next(&self, dt: f32) -> Self {
        Self {
            time: self.time + dt,
            dt,
            camera_position: self.camera_position,
        }
    }
}
