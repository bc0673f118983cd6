//! Headless driver for the djinn lamp particle scene
//!
//! Usage: `djinn-particles [scene.toml]`
//!
//! Runs the configured number of fixed-step frames against the recording
//! backend and logs how both effects ramp up.

use anyhow::{Context, Result};
use djinn_particles::particles::SceneMeshes;
use djinn_particles::{HeadlessBackend, HeadlessMesh, ParticleScene, SceneConfig};

/// Frames between progress reports
const REPORT_INTERVAL: u32 = 60;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(&path)
            .with_context(|| format!("Failed to load scene config '{}'", path))?,
        None => {
            log::info!("No scene file given, using defaults");
            SceneConfig::default()
        }
    };

    let mut scene = ParticleScene::from_config(&config, |_| Ok(HeadlessBackend::new()))
        .context("Failed to create particle scene")?;

    let coin = HeadlessMesh { index_count: 768 };
    let quad = HeadlessMesh::quad();
    let meshes = SceneMeshes {
        rain: &coin,
        smoke: &quad,
    };

    log::info!(
        "Running {} frames at dt = {}s (rain: {}, smoke: {})",
        config.frames,
        config.dt,
        config.rain_enabled,
        config.smoke_enabled
    );

    let mut input = config.first_frame();
    let mut draw_calls = 0usize;
    for frame in 1..=config.frames {
        let report = scene
            .frame(&input, &meshes)
            .with_context(|| format!("Frame {} failed", frame))?;
        draw_calls += report.draw_calls();

        if frame % REPORT_INTERVAL == 0 || frame == config.frames {
            log::info!(
                "Frame {:>5}: rain {:>4}/{} active, smoke {:>4}/{} active, djinn at {:.2}",
                frame,
                report.rain_active,
                scene.rain().pool_size(),
                report.smoke_active,
                scene.smoke().pool_size(),
                report.apparition_progress
            );
        }
        input = input.next(config.dt);
    }

    log::info!(
        "Done: {} draw calls, {} rain uploads, {} smoke uploads",
        draw_calls,
        scene.rain().backend().frames_streamed(),
        scene.smoke().backend().frames_streamed()
    );
    Ok(())
}
