/// Scene Integration Tests
///
/// Runs the two-effect scene from configuration, including toggles,
/// pausing and loading a scene file from disk.

use djinn_particles::particles::SceneMeshes;
use djinn_particles::{HeadlessBackend, HeadlessMesh, ParticleScene, SceneConfig};
use std::fs;
use tempfile::TempDir;

fn seeded_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.rain.seed = Some(10);
    config.smoke.seed = Some(11);
    config
}

#[test]
fn test_scene_from_config_runs() {
    let config = seeded_config();
    let mut scene = ParticleScene::from_config(&config, |_| Ok(HeadlessBackend::new())).unwrap();

    let coin = HeadlessMesh { index_count: 96 };
    let quad = HeadlessMesh::quad();
    let meshes = SceneMeshes {
        rain: &coin,
        smoke: &quad,
    };

    let mut input = config.first_frame();
    let mut last = None;
    for _ in 0..config.frames {
        last = Some(scene.frame(&input, &meshes).unwrap());
        input = input.next(config.dt);
    }

    let report = last.unwrap();
    assert_eq!(report.draw_calls(), 2);
    assert_eq!(report.smoke_active, 200);
    assert!(report.rain_active > 0 && report.rain_active <= 200);
    assert_eq!(report.rain_draw.map(|d| d.index_count), Some(96));
    assert_eq!(report.smoke_draw.map(|d| d.instance_count), Some(200));
    assert!(scene.apparition().progress() > 0.0);
    assert_eq!(
        scene.rain().backend().frames_streamed(),
        config.frames as u64
    );
}

#[test]
fn test_disabled_effect_is_neither_updated_nor_drawn() {
    let mut config = seeded_config();
    config.rain_enabled = false;
    let mut scene = ParticleScene::from_config(&config, |_| Ok(HeadlessBackend::new())).unwrap();

    let quad = HeadlessMesh::quad();
    let meshes = SceneMeshes {
        rain: &quad,
        smoke: &quad,
    };
    let input = config.first_frame();
    for _ in 0..10 {
        let report = scene.frame(&input, &meshes).unwrap();
        assert!(report.rain_draw.is_none());
        assert_eq!(report.rain_active, 0);
    }
    assert_eq!(scene.rain().backend().frames_streamed(), 0);

    scene.set_rain_enabled(true);
    let report = scene.frame(&input, &meshes).unwrap();
    assert!(report.rain_draw.is_some());
}

#[test]
fn test_paused_scene_keeps_counts() {
    let config = seeded_config();
    let mut scene = ParticleScene::from_config(&config, |_| Ok(HeadlessBackend::new())).unwrap();
    let quad = HeadlessMesh::quad();
    let meshes = SceneMeshes {
        rain: &quad,
        smoke: &quad,
    };

    let input = config.first_frame();
    scene.frame(&input, &meshes).unwrap();
    scene.toggle_pause();
    assert!(scene.is_paused());

    let progress = scene.apparition().progress();
    for _ in 0..20 {
        let report = scene.frame(&input, &meshes).unwrap();
        assert_eq!(report.smoke_active, 50);
        assert_eq!(report.draw_calls(), 2);
    }
    assert_eq!(scene.apparition().progress(), progress);
}

#[test]
fn test_scene_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lamp.toml");
    fs::write(
        &path,
        r#"
        frames = 12
        dt = 0.02
        camera_position = [0.0, 5.0, 10.0]

        [rain]
        pool_size = 64
        use_sorting = false
        seed = 1

        [smoke]
        pool_size = 32
        parallel_transform = true
        seed = 2
        "#,
    )
    .unwrap();

    let config = SceneConfig::load(&path).unwrap();
    let mut scene = ParticleScene::from_config(&config, |_| Ok(HeadlessBackend::new())).unwrap();
    assert_eq!(scene.rain().pool_size(), 64);
    assert!(!scene.rain().settings().use_sorting);
    assert!(scene.smoke().settings().parallel_transform);

    let quad = HeadlessMesh::quad();
    let meshes = SceneMeshes {
        rain: &quad,
        smoke: &quad,
    };
    let report = scene.frame(&config.first_frame(), &meshes).unwrap();
    assert_eq!(report.smoke_active, 32);
    assert_eq!(report.smoke_draw.map(|d| d.instance_count), Some(32));
}
