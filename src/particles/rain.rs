use glam::Vec3;
use rand::Rng;

use crate::constants::{pool, rain};
use crate::particles::behavior::random_axis;
use crate::particles::{EmitterSettings, FrameInput, GrowthPolicy, ParticleRecord};

/// Ballistic coin rain
///
/// Coins spawn in a wide box under the emitter, fall under gravity and
/// respawn as soon as they reach the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct RainBehavior {
    /// Horizontal size multiplier of the spawn box
    pub spread: f32,
    pub initial_velocity: Vec3,
    pub gravity: Vec3,
}

impl Default for RainBehavior {
    fn default() -> Self {
        Self {
            spread: rain::SPAWN_SPREAD,
            initial_velocity: Vec3::from(rain::INITIAL_VELOCITY),
            gravity: Vec3::from(rain::GRAVITY),
        }
    }
}

impl RainBehavior {
    pub fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy::TimeScaled {
            batch: pool::GROWTH_BATCH,
            rate: pool::RAIN_GROWTH_RATE,
        }
    }

    /// Height below which a coin counts as landed
    pub fn collision_height(settings: &EmitterSettings) -> f32 {
        settings.height_threshold + rain::COLLISION_MARGIN
    }

    pub fn collides(particle: &ParticleRecord, settings: &EmitterSettings) -> bool {
        particle.position.y < Self::collision_height(settings)
    }

    pub fn spawn<R: Rng + ?Sized>(
        &self,
        particle: &mut ParticleRecord,
        settings: &EmitterSettings,
        rng: &mut R,
    ) {
        let offset = Vec3::new(
            3.0 - rng.gen::<f32>() * 6.0,
            -rng.gen::<f32>(),
            3.0 - rng.gen::<f32>() * 6.0,
        );

        particle.position = settings.origin + offset * self.spread;
        particle.velocity = self.initial_velocity;
        particle.acceleration = self.gravity;
        particle.mass = rng.gen::<f32>() + rain::MIN_MASS;
        particle.rotation_axis = random_axis(rng);
        particle.rotation_angle = rng.gen::<f32>() * 360.0;
        particle.life = 1.0;
    }

    /// Advance one coin by one frame
    pub fn step<R: Rng + ?Sized>(
        &self,
        particle: &mut ParticleRecord,
        settings: &EmitterSettings,
        frame: &FrameInput,
        rng: &mut R,
    ) {
        if particle.is_dead() || Self::collides(particle, settings) {
            self.spawn(particle, settings, rng);
        }

        let dt = frame.dt;
        particle.position += particle.velocity * dt + particle.acceleration * (0.5 * dt * dt);
        particle.velocity += particle.acceleration * dt;

        // Never leave a coin under the floor until the next frame
        if Self::collides(particle, settings) {
            self.spawn(particle, settings, rng);
        }

        particle.face_camera(frame.camera_position);
        particle.life = ParticleRecord::height_life(
            particle.position.y,
            settings.origin.y,
            settings.height_threshold,
        );
    }
}
