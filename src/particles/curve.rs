//! Cubic Bézier curves and their cached polyline approximation.

use glam::Vec3;

use crate::constants::curve::{
    APPARITION_COUNTER_LIMIT, APPARITION_COUNTER_STEP, APPARITION_POINTS, SAMPLE_COUNT,
};

/// Evaluate `B(t) = (1−t)³p0 + 3(1−t)²t·p1 + 3(1−t)t²·p2 + t³p3`
pub fn cubic_bezier(control_points: &[Vec3; 4], t: f32) -> Vec3 {
    let [p0, p1, p2, p3] = *control_points;
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;

    p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
}

/// Sample the curve at `N` evenly spaced parameters, first and last included
pub fn sample_polyline<const N: usize>(control_points: &[Vec3; 4]) -> [Vec3; N] {
    let mut samples = [Vec3::ZERO; N];
    let last = N.saturating_sub(1).max(1) as f32;
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample = cubic_bezier(control_points, i as f32 / last);
    }
    samples
}

/// Point on the polyline at parameter `t`, clamped to [0, 1]
///
/// `t` is spread over the `N − 1` segments and blended linearly inside the
/// segment it falls in, so `t = 0` and `t = 1` land exactly on the first and
/// last samples.
pub fn polyline_point(polyline: &[Vec3], t: f32) -> Vec3 {
    match polyline.len() {
        0 => Vec3::ZERO,
        1 => polyline[0],
        len => {
            let segments = (len - 1) as f32;
            let scaled = t.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(len - 2);
            let blend = scaled - index as f32;
            polyline[index].lerp(polyline[index + 1], blend)
        }
    }
}

/// A point travelling once along a fixed curve with accelerating speed
///
/// Drives the djinn rising out of the lamp: progress advances by
/// `dt * counter` while the counter keeps growing, and stops at the end of
/// the path.
#[derive(Debug, Clone)]
pub struct CurveRide {
    control_points: [Vec3; 4],
    polyline: [Vec3; SAMPLE_COUNT],
    progress: f32,
    counter: f32,
    position: Vec3,
}

impl CurveRide {
    pub fn new(control_points: [Vec3; 4]) -> Self {
        let polyline = sample_polyline::<SAMPLE_COUNT>(&control_points);
        Self {
            control_points,
            polyline,
            progress: 0.0,
            counter: 0.0,
            position: polyline[0],
        }
    }

    /// Path used by the demo's apparition
    pub fn apparition() -> Self {
        Self::new(APPARITION_POINTS.map(Vec3::from))
    }

    pub fn advance(&mut self, dt: f32) {
        self.counter += APPARITION_COUNTER_STEP;
        if self.progress < 1.0 && self.counter < APPARITION_COUNTER_LIMIT {
            self.progress += dt * self.counter;
            self.position = polyline_point(&self.polyline, self.progress);
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Distance from the path origin relative to the end point, used as a uniform scale
    pub fn thickness(&self) -> f32 {
        let end = self.control_points[3].length();
        if end <= f32::EPSILON {
            return 0.0;
        }
        self.position.length() / end
    }

    /// Fades in over the first half of the ride and back out over the second
    pub fn transparency(&self) -> f32 {
        if self.progress < 0.5 {
            self.progress
        } else {
            1.0 - (self.progress - 0.5)
        }
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.counter = 0.0;
        self.position = self.polyline[0];
    }
}
