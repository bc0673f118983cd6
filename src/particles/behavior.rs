use std::fmt;

use glam::Vec3;
use rand::Rng;

use crate::constants::{rain, smoke};
use crate::particles::{
    EmitterSettings, FrameInput, GrowthPolicy, ParticleRecord, RainBehavior, SmokeBehavior,
};

/// Which update rule an emitter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Rain,
    Smoke,
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorKind::Rain => write!(f, "rain"),
            BehaviorKind::Smoke => write!(f, "smoke"),
        }
    }
}

/// Closed set of emitter behaviors
///
/// Particle records have the same shape for every behavior; fields a
/// behavior does not use stay zeroed.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Rain(RainBehavior),
    Smoke(SmokeBehavior),
}

impl Behavior {
    pub fn rain() -> Self {
        Behavior::Rain(RainBehavior::default())
    }

    pub fn smoke() -> Self {
        Behavior::Smoke(SmokeBehavior::default())
    }

    pub fn kind(&self) -> BehaviorKind {
        match self {
            Behavior::Rain(_) => BehaviorKind::Rain,
            Behavior::Smoke(_) => BehaviorKind::Smoke,
        }
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        match self {
            Behavior::Rain(rain) => rain.growth_policy(),
            Behavior::Smoke(smoke) => smoke.growth_policy(),
        }
    }

    /// Settings the demo uses for this behavior
    pub fn default_settings(&self) -> EmitterSettings {
        let (origin, height_threshold) = match self {
            Behavior::Rain(_) => (rain::DEFAULT_ORIGIN, rain::HEIGHT_THRESHOLD),
            Behavior::Smoke(_) => (smoke::DEFAULT_ORIGIN, smoke::HEIGHT_THRESHOLD),
        };
        EmitterSettings {
            origin: Vec3::from(origin),
            height_threshold,
            ..EmitterSettings::default()
        }
    }

    /// Per-emitter work done once per update, before any particle moves
    pub fn begin_update(&mut self) {
        if let Behavior::Smoke(smoke) = self {
            smoke.begin_update();
        }
    }

    pub fn spawn<R: Rng + ?Sized>(
        &self,
        particle: &mut ParticleRecord,
        settings: &EmitterSettings,
        rng: &mut R,
    ) {
        match self {
            Behavior::Rain(rain) => rain.spawn(particle, settings, rng),
            Behavior::Smoke(smoke) => smoke.spawn(particle, settings, rng),
        }
    }

    pub fn step<R: Rng + ?Sized>(
        &self,
        particle: &mut ParticleRecord,
        settings: &EmitterSettings,
        frame: &FrameInput,
        rng: &mut R,
    ) {
        match self {
            Behavior::Rain(rain) => rain.step(particle, settings, frame, rng),
            Behavior::Smoke(smoke) => smoke.step(particle, settings, frame, rng),
        }
    }

    pub fn reset(&mut self) {
        if let Behavior::Smoke(smoke) = self {
            smoke.reset();
        }
    }
}

/// Random unit vector with components drawn from (-1, 1]
pub(crate) fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        1.0 - 2.0 * rng.gen::<f32>(),
        1.0 - 2.0 * rng.gen::<f32>(),
        1.0 - 2.0 * rng.gen::<f32>(),
    )
    .try_normalize()
    .unwrap_or(Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_per_behavior() {
        let rain = Behavior::rain().default_settings();
        assert_eq!(rain.origin, Vec3::new(0.0, 20.0, 0.0));
        assert_eq!(rain.height_threshold, -3.439);

        let smoke = Behavior::smoke().default_settings();
        assert_eq!(smoke.origin, Vec3::ZERO);
        assert_eq!(smoke.height_threshold, 5.0);
    }

    #[test]
    fn test_growth_policies() {
        assert!(matches!(
            Behavior::rain().growth_policy(),
            GrowthPolicy::TimeScaled { batch: 50, .. }
        ));
        assert_eq!(
            Behavior::smoke().growth_policy(),
            GrowthPolicy::Batch { batch: 50 }
        );
    }

    #[test]
    fn test_only_smoke_keeps_update_state() {
        let mut behavior = Behavior::smoke();
        behavior.begin_update();
        behavior.begin_update();
        match &behavior {
            Behavior::Smoke(smoke) => assert!((smoke.counter() - 0.02).abs() < 1e-6),
            Behavior::Rain(_) => unreachable!(),
        }
        behavior.reset();
        assert_eq!(behavior, Behavior::smoke());

        let mut rain = Behavior::rain();
        rain.begin_update();
        assert_eq!(rain, Behavior::rain());
        assert_eq!(rain.kind().to_string(), "rain");
    }
}
