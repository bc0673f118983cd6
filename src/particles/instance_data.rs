use glam::Mat4;
use rayon::prelude::*;

use crate::particles::billboard::rotation_matrix;
use crate::particles::ParticleRecord;

/// CPU mirrors of the four per-instance GPU arrays
///
/// Index `i` in every array describes pool slot `i`. The arrays are always
/// as long as the pool; inactive slots produce zero-scale instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceArrays {
    pub translations: Vec<Mat4>,
    pub rotations: Vec<Mat4>,
    pub scales: Vec<f32>,
    pub lives: Vec<f32>,
}

/// Model translation for one particle; dead slots stay at the identity
pub fn translation_for(particle: &ParticleRecord) -> Mat4 {
    if particle.is_dead() {
        Mat4::IDENTITY
    } else {
        Mat4::from_translation(particle.position)
    }
}

impl InstanceArrays {
    pub fn with_len(len: usize) -> Self {
        let mut arrays = Self::default();
        arrays.resize(len);
        arrays
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn resize(&mut self, len: usize) {
        self.translations.resize(len, Mat4::IDENTITY);
        self.rotations.resize(len, Mat4::IDENTITY);
        self.scales.resize(len, 0.0);
        self.lives.resize(len, 0.0);
    }

    /// Recompute every array from the pool
    ///
    /// `parallel` fans the per-slot work out over rayon; every slot is
    /// independent, so both paths produce identical arrays.
    pub fn rebuild(&mut self, particles: &[ParticleRecord], use_rotations: bool, parallel: bool) {
        self.resize(particles.len());

        if parallel {
            self.rebuild_parallel(particles, use_rotations);
        } else {
            self.rebuild_sequential(particles, use_rotations);
        }
    }

    fn rebuild_sequential(&mut self, particles: &[ParticleRecord], use_rotations: bool) {
        for (translation, particle) in self.translations.iter_mut().zip(particles) {
            *translation = translation_for(particle);
        }

        if use_rotations {
            for (rotation, particle) in self.rotations.iter_mut().zip(particles) {
                *rotation = rotation_matrix(particle.rotation_axis, particle.rotation_angle);
            }
        } else {
            self.rotations.fill(Mat4::IDENTITY);
        }

        for ((scale, life), particle) in self.scales.iter_mut().zip(self.lives.iter_mut()).zip(particles) {
            *scale = particle.mass;
            *life = particle.life;
        }
    }

    fn rebuild_parallel(&mut self, particles: &[ParticleRecord], use_rotations: bool) {
        self.translations
            .par_iter_mut()
            .zip(particles.par_iter())
            .for_each(|(translation, particle)| *translation = translation_for(particle));

        if use_rotations {
            self.rotations
                .par_iter_mut()
                .zip(particles.par_iter())
                .for_each(|(rotation, particle)| {
                    *rotation = rotation_matrix(particle.rotation_axis, particle.rotation_angle);
                });
        } else {
            self.rotations.par_iter_mut().for_each(|rotation| *rotation = Mat4::IDENTITY);
        }

        self.scales
            .par_iter_mut()
            .zip(particles.par_iter())
            .for_each(|(scale, particle)| *scale = particle.mass);

        self.lives
            .par_iter_mut()
            .zip(particles.par_iter())
            .for_each(|(life, particle)| *life = particle.life);
    }

    /// Raw bytes of the translation array, column-major
    pub fn translation_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.translations)
    }

    pub fn rotation_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rotations)
    }

    pub fn scale_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.scales)
    }

    pub fn life_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lives)
    }
}
