use glam::Vec3;

use crate::constants::curve::SAMPLE_COUNT;

/// Individual particle slot in an emitter pool
///
/// Records are plain `Copy` data so the pool can respawn in place and sort
/// without touching the heap. Curve fields are only meaningful for
/// curve-following behaviors and are left zeroed by the others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    /// Position in world space
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Billboard rotation axis (unit length once spawned)
    pub rotation_axis: Vec3,
    /// Billboard rotation angle in degrees
    pub rotation_angle: f32,
    /// Render scale
    pub mass: f32,
    /// Vertical progress in [0, 1]; 0 marks a slot that needs respawning
    pub life: f32,
    /// Position along the cached curve
    pub curve_t: f32,
    /// Bézier control points p0..p3
    pub control_points: [Vec3; 4],
    /// Polyline sampled from the control points
    pub polyline: [Vec3; SAMPLE_COUNT],
    /// Depth sort key, refreshed every update
    pub distance_from_camera: f32,
}

impl ParticleRecord {
    /// Zero-valued, inactive record
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        velocity: Vec3::ZERO,
        acceleration: Vec3::ZERO,
        rotation_axis: Vec3::Y,
        rotation_angle: 0.0,
        mass: 0.0,
        life: 0.0,
        curve_t: 0.0,
        control_points: [Vec3::ZERO; 4],
        polyline: [Vec3::ZERO; SAMPLE_COUNT],
        distance_from_camera: 0.0,
    };

    /// A slot whose life has reached zero must be respawned before use
    pub fn is_dead(&self) -> bool {
        self.life == 0.0
    }

    /// Normalized height progress between `origin_y` and `threshold`
    ///
    /// 1 at the origin height, 0 at the threshold, clamped outside. Returns
    /// 0 when the two heights coincide.
    pub fn height_life(position_y: f32, origin_y: f32, threshold: f32) -> f32 {
        let span = threshold - origin_y;
        if span.abs() <= f32::EPSILON {
            return 0.0;
        }
        ((threshold - position_y) / span).clamp(0.0, 1.0)
    }

    /// Refresh orientation and depth key so the particle faces the camera
    pub fn face_camera(&mut self, camera_position: Vec3) {
        let orientation = super::billboard::billboard_orientation(self.position, camera_position);
        self.rotation_axis = orientation.axis;
        self.rotation_angle = orientation.angle.to_degrees();
        self.distance_from_camera = self.position.distance(camera_position);
    }
}

impl Default for ParticleRecord {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_dead() {
        let record = ParticleRecord::default();
        assert!(record.is_dead());
        assert_eq!(record.mass, 0.0);
        assert_eq!(record.position, Vec3::ZERO);
    }

    #[test]
    fn test_height_life_bounds() {
        // Falling from 20 toward the floor
        assert_eq!(ParticleRecord::height_life(20.0, 20.0, -3.439), 1.0);
        assert_eq!(ParticleRecord::height_life(-3.439, 20.0, -3.439), 0.0);
        assert_eq!(ParticleRecord::height_life(-10.0, 20.0, -3.439), 0.0);

        let upper = ParticleRecord::height_life(10.0, 20.0, -3.439);
        let lower = ParticleRecord::height_life(0.0, 20.0, -3.439);
        assert!(upper > lower);

        // Rising toward a ceiling
        let low = ParticleRecord::height_life(1.0, 0.0, 5.0);
        let high = ParticleRecord::height_life(4.0, 0.0, 5.0);
        assert!(low > high);
    }

    #[test]
    fn test_height_life_degenerate_span() {
        assert_eq!(ParticleRecord::height_life(3.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_face_camera_sets_distance() {
        let mut record = ParticleRecord {
            position: Vec3::new(0.0, 0.0, -4.0),
            ..ParticleRecord::ZERO
        };
        record.face_camera(Vec3::ZERO);
        assert!((record.distance_from_camera - 4.0).abs() < 1e-6);
        assert!(record.rotation_angle.abs() < 1e-4);
    }
}
