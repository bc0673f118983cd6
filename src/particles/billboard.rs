//! Camera-facing orientation for particle quads.
//!
//! Meshes are authored facing +Z. Each frame the orientation is rebuilt
//! from scratch so the quad turns from +Z toward the camera, independent of
//! how the particle itself is moving.

use glam::{Mat4, Vec3};

/// Direction particle meshes face before rotation
pub const REFERENCE_FORWARD: Vec3 = Vec3::Z;

/// Rotation turning `REFERENCE_FORWARD` toward the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardOrientation {
    /// Unit rotation axis
    pub axis: Vec3,
    /// Rotation angle in radians, in [0, π]
    pub angle: f32,
}

/// Compute the billboard rotation for a particle at `particle_position`.
///
/// `axis = Z × dir`, `angle = acos(Z · dir)` with `dir` the unit vector to the
/// camera. When the cross product vanishes (camera straight ahead, straight
/// behind, or on top of the particle) the axis falls back to +Y, which gives
/// the identity for angle 0 and a half turn for angle π.
pub fn billboard_orientation(particle_position: Vec3, camera_position: Vec3) -> BillboardOrientation {
    let Some(direction) = (camera_position - particle_position).try_normalize() else {
        return BillboardOrientation {
            axis: Vec3::Y,
            angle: 0.0,
        };
    };

    let angle = REFERENCE_FORWARD.dot(direction).clamp(-1.0, 1.0).acos();
    let axis = REFERENCE_FORWARD
        .cross(direction)
        .try_normalize()
        .unwrap_or(Vec3::Y);

    BillboardOrientation { axis, angle }
}

/// Rotation matrix for an axis and an angle in degrees
///
/// Non-unit or zero axes are tolerated; a zero axis yields the identity.
pub fn rotation_matrix(axis: Vec3, angle_degrees: f32) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, angle_degrees.to_radians()),
        None => Mat4::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_billboard_faces_camera() {
        let particle = Vec3::new(1.0, 2.0, -3.0);
        let camera = Vec3::new(-4.0, 5.0, 6.0);
        let orientation = billboard_orientation(particle, camera);

        let rotated = Mat4::from_axis_angle(orientation.axis, orientation.angle)
            .transform_vector3(REFERENCE_FORWARD);
        let expected = (camera - particle).normalize();
        assert!(rotated.abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_billboard_is_idempotent() {
        let particle = Vec3::new(0.3, -1.2, 7.5);
        let camera = Vec3::new(0.0, 3.0, 8.0);
        assert_eq!(
            billboard_orientation(particle, camera),
            billboard_orientation(particle, camera)
        );
    }

    #[test]
    fn test_billboard_degenerate_directions() {
        // Camera straight ahead: no rotation
        let ahead = billboard_orientation(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert!(ahead.angle.abs() < EPSILON);
        assert_eq!(ahead.axis, Vec3::Y);

        // Camera straight behind: half turn
        let behind = billboard_orientation(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));
        assert!((behind.angle - std::f32::consts::PI).abs() < EPSILON);
        let rotated = Mat4::from_axis_angle(behind.axis, behind.angle).transform_vector3(Vec3::Z);
        assert!(rotated.abs_diff_eq(Vec3::NEG_Z, EPSILON));

        // Camera inside the particle
        let inside = billboard_orientation(Vec3::ONE, Vec3::ONE);
        assert_eq!(inside.angle, 0.0);
        assert!(inside.axis.is_finite());
    }

    #[test]
    fn test_rotation_matrix_zero_axis() {
        assert_eq!(rotation_matrix(Vec3::ZERO, 45.0), Mat4::IDENTITY);
        let quarter = rotation_matrix(Vec3::new(0.0, 2.0, 0.0), 90.0);
        assert!(quarter
            .transform_vector3(Vec3::Z)
            .abs_diff_eq(Vec3::X, EPSILON));
    }
}
