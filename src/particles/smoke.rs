use glam::Vec3;
use rand::Rng;

use crate::constants::{curve::SAMPLE_COUNT, pool, smoke};
use crate::particles::behavior::random_axis;
use crate::particles::curve::{polyline_point, sample_polyline};
use crate::particles::{EmitterSettings, FrameInput, GrowthPolicy, ParticleRecord};

/// Rising smoke plume following per-particle Bézier curves
///
/// Every particle gets its own randomized curve leaning up and out from the
/// emitter. All particles of one emitter share the traversal speed: the
/// counter grows once per update until it hits its cap.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeBehavior {
    /// Shared curve traversal speed multiplier
    counter: f32,
}

impl Default for SmokeBehavior {
    fn default() -> Self {
        Self { counter: 0.0 }
    }
}

/// Symmetric random value in (-scale, scale)
fn jitter<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> f32 {
    scale * (rng.gen::<f32>() - rng.gen::<f32>())
}

impl SmokeBehavior {
    pub fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy::Batch {
            batch: pool::GROWTH_BATCH,
        }
    }

    pub fn counter(&self) -> f32 {
        self.counter
    }

    /// Speed up curve traversal; called once per update, before the particle loop
    pub fn begin_update(&mut self) {
        self.counter = (self.counter + smoke::COUNTER_STEP).min(smoke::COUNTER_MAX);
    }

    pub fn reset(&mut self) {
        self.counter = 0.0;
    }

    pub fn above_ceiling(particle: &ParticleRecord, settings: &EmitterSettings) -> bool {
        particle.position.y > settings.height_threshold
    }

    pub fn spawn<R: Rng + ?Sized>(
        &self,
        particle: &mut ParticleRecord,
        settings: &EmitterSettings,
        rng: &mut R,
    ) {
        let drift = Vec3::from(smoke::DRIFT);
        particle.velocity = drift;
        particle.acceleration = drift;
        particle.mass = smoke::INITIAL_MASS;
        particle.rotation_axis = random_axis(rng);
        particle.rotation_angle = rng.gen::<f32>() * 360.0;
        particle.life = 1.0;
        particle.curve_t = 0.0;

        let origin = settings.origin;
        let p1 = Vec3::new(
            jitter(rng, 0.5),
            2.0 + jitter(rng, 0.7),
            jitter(rng, 0.5),
        );
        let p2 = Vec3::new(
            5.0 + jitter(rng, 2.5),
            2.0 + jitter(rng, 0.5),
            jitter(rng, 2.5),
        );
        let p3 = Vec3::new(5.0 + jitter(rng, 2.0), 5.0, jitter(rng, 2.0));

        particle.control_points = [origin, origin + p1, origin + p2, origin + p3];
        particle.polyline = sample_polyline::<SAMPLE_COUNT>(&particle.control_points);
        particle.position = polyline_point(&particle.polyline, 0.0);
    }

    /// Advance one smoke puff by one frame
    pub fn step<R: Rng + ?Sized>(
        &self,
        particle: &mut ParticleRecord,
        settings: &EmitterSettings,
        frame: &FrameInput,
        rng: &mut R,
    ) {
        if Self::above_ceiling(particle, settings) || particle.is_dead() {
            self.spawn(particle, settings, rng);
        }

        let dt = frame.dt;
        particle.curve_t += dt * self.counter;
        particle.position = polyline_point(&particle.polyline, particle.curve_t)
            + particle.velocity * dt
            + particle.acceleration * (dt * dt);
        particle.velocity += particle.acceleration * dt;

        if Self::above_ceiling(particle, settings) {
            self.spawn(particle, settings, rng);
        }

        particle.face_camera(frame.camera_position);
        particle.life = ParticleRecord::height_life(
            particle.position.y,
            settings.origin.y,
            settings.height_threshold,
        );
        Self::grow_mass(particle);
    }

    /// Puffs widen as they age, faster the older they get, up to a cap
    fn grow_mass(particle: &mut ParticleRecord) {
        let life = particle.life;
        if life > smoke::YOUNG_LIFE && life <= 1.0 {
            particle.mass += smoke::YOUNG_GROWTH;
        }
        if life < smoke::YOUNG_LIFE && life > smoke::OLD_LIFE {
            particle.mass += smoke::MIDDLE_GROWTH;
        }
        if life < smoke::OLD_LIFE && life > 0.0 && particle.mass < smoke::MAX_MASS {
            particle.mass += smoke::OLD_GROWTH;
        }
        particle.mass = particle.mass.min(smoke::MAX_MASS);
    }
}
