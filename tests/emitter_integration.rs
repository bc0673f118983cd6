/// Emitter Integration Tests
///
/// Drives rain and smoke emitters through many frames with the headless
/// backend and checks pool bookkeeping, bounds and what gets streamed.

use djinn_particles::constants::{rain, smoke};
use djinn_particles::{
    Behavior, DrawCall, FrameInput, HeadlessBackend, HeadlessMesh, ParticleEmitter,
};
use glam::{Mat4, Vec3};

const DT: f32 = 0.016;

fn camera() -> Vec3 {
    Vec3::new(0.0, 3.0, 8.0)
}

fn run_frames(emitter: &mut ParticleEmitter<HeadlessBackend>, frames: usize) -> FrameInput {
    let mut input = FrameInput::new(0.0, DT, camera());
    for _ in 0..frames {
        emitter.update(&input);
        input = input.next(DT);
    }
    input
}

#[test]
fn test_rain_reaches_pool_size_and_stays() {
    let mut emitter = ParticleEmitter::with_seed(Behavior::rain(), 200, HeadlessBackend::new(), 42);
    assert_eq!(emitter.settings().origin, Vec3::new(0.0, 20.0, 0.0));

    let mut input = FrameInput::new(0.0, DT, camera());
    let mut previous = 0;
    for _ in 0..2000 {
        emitter.update(&input);
        let active = emitter.active_count();
        assert!(active >= previous, "active count went down");
        assert!(active <= emitter.pool_size());
        previous = active;
        input = input.next(DT);
    }
    assert_eq!(emitter.active_count(), 200);

    for _ in 0..100 {
        emitter.update(&input);
        assert_eq!(emitter.active_count(), 200);
        input = input.next(DT);
    }
}

#[test]
fn test_rain_never_rests_below_floor() {
    let mut emitter = ParticleEmitter::with_seed(Behavior::rain(), 150, HeadlessBackend::new(), 7);
    let mut input = FrameInput::new(0.0, DT, camera());
    let floor = rain::HEIGHT_THRESHOLD + rain::COLLISION_MARGIN;

    for _ in 0..1500 {
        emitter.update(&input);
        for particle in emitter.live() {
            assert!(particle.position.y >= floor);
            assert!((0.0..=1.0).contains(&particle.life));
            assert!(particle.mass >= 0.5 && particle.mass < 1.5);
        }
        input = input.next(DT);
    }
}

#[test]
fn test_smoke_stays_under_ceiling() {
    let mut emitter = ParticleEmitter::with_seed(Behavior::smoke(), 200, HeadlessBackend::new(), 3);
    let mut input = FrameInput::new(0.0, DT, camera());

    for _ in 0..1000 {
        emitter.update(&input);
        for particle in emitter.live() {
            assert!(particle.position.y <= smoke::HEIGHT_THRESHOLD);
            assert!(particle.mass <= smoke::MAX_MASS);
            assert!((0.0..=1.0).contains(&particle.life));
        }
        input = input.next(DT);
    }
    assert_eq!(emitter.active_count(), 200);
}

#[test]
fn test_resize_during_simulation() {
    let mut emitter = ParticleEmitter::with_seed(Behavior::smoke(), 200, HeadlessBackend::new(), 5);
    let input = run_frames(&mut emitter, 10);
    assert_eq!(emitter.active_count(), 200);

    emitter.set_pool_size(40);
    assert_eq!(emitter.active_count(), 40);
    emitter.update(&input);
    let call = emitter.render(&HeadlessMesh::quad()).unwrap();
    assert_eq!(call.map(|c| c.instance_count), Some(40));
    assert_eq!(emitter.backend().uploaded().len(), 40);

    emitter.set_pool_size(120);
    assert_eq!(emitter.active_count(), 40);
    emitter.update(&input.next(DT));
    assert_eq!(emitter.active_count(), 90);
    assert!(emitter.particles()[90..].iter().all(|p| p.is_dead()));
}

#[test]
fn test_render_uploads_sorted_instances() {
    let mut emitter = ParticleEmitter::with_seed(Behavior::smoke(), 100, HeadlessBackend::new(), 8);
    run_frames(&mut emitter, 30);

    let call = emitter.render(&HeadlessMesh::quad()).unwrap();
    assert_eq!(
        call,
        Some(DrawCall {
            index_count: 6,
            instance_count: 100
        })
    );

    let live = emitter.live();
    assert!(live
        .windows(2)
        .all(|w| w[0].distance_from_camera >= w[1].distance_from_camera));

    let uploaded = emitter.backend().uploaded();
    for (i, particle) in live.iter().enumerate() {
        assert_eq!(uploaded.translations[i], Mat4::from_translation(particle.position));
        assert_eq!(uploaded.scales[i], particle.mass);
        assert_eq!(uploaded.lives[i], particle.life);
    }
}

#[test]
fn test_parallel_transform_matches_sequential() {
    let mut sequential = ParticleEmitter::with_seed(Behavior::rain(), 300, HeadlessBackend::new(), 21);
    let mut parallel = ParticleEmitter::with_seed(Behavior::rain(), 300, HeadlessBackend::new(), 21);
    parallel.settings_mut().parallel_transform = true;

    run_frames(&mut sequential, 500);
    run_frames(&mut parallel, 500);

    sequential.render(&HeadlessMesh::quad()).unwrap();
    parallel.render(&HeadlessMesh::quad()).unwrap();
    assert_eq!(sequential.backend().uploaded(), parallel.backend().uploaded());
}

#[test]
fn test_zero_sized_pool_short_circuits() {
    let mut emitter = ParticleEmitter::with_seed(Behavior::smoke(), 0, HeadlessBackend::new(), 1);
    run_frames(&mut emitter, 5);
    assert_eq!(emitter.active_count(), 0);
    assert_eq!(emitter.render(&HeadlessMesh::quad()).unwrap(), None);
    assert_eq!(emitter.backend().frames_streamed(), 0);
}

#[test]
fn test_degenerate_threshold_keeps_life_at_zero() {
    let mut emitter = ParticleEmitter::with_seed(Behavior::smoke(), 50, HeadlessBackend::new(), 4);
    emitter.settings_mut().height_threshold = 0.0;
    run_frames(&mut emitter, 3);
    assert!(emitter.live().iter().all(|p| p.life == 0.0));
}
