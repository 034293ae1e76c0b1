//! Terrarium demo application
//!
//! Builds a small scene — a reflective floor, a handful of tumbling models,
//! lights, and a stream of particles — then drives the engine's frame loop
//! headlessly against the recording device, logging what the GPU backend
//! would receive.

use std::sync::Arc;

use scene_engine::foundation::time::FixedStep;
use scene_engine::prelude::*;
use scene_engine::render::LightKind;

/// Frames the headless demo runs for
const DEMO_FRAMES: u32 = 600;

/// Chance per frame of spawning a new particle
const PARTICLE_RATE: f32 = 0.05;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "terrarium.toml".to_string());
    let config = AppConfig::load_or_default(&config_path)?;
    log::info!(
        "starting terrarium: {}x{}, seed {}, {} objects",
        config.window_width,
        config.window_height,
        config.seed,
        config.spawn_count
    );

    let mut scene = Scene::new(&config);
    populate(&mut scene, &config);

    let mut renderer = Renderer::new();
    renderer.resize(config.window_width, config.window_height);
    renderer.debug_enabled = true;

    let mut device = RecordingDevice::default();
    let mut clock = FixedStep::from_rate(config.frame_rate);

    for frame in 0..DEMO_FRAMES {
        // Scripted input: fly forward for the first two seconds.
        if frame == 0 {
            scene.input.handle(WindowEvent::Key {
                key: KeyCode::W,
                pressed: true,
            });
        }
        if frame == 120 {
            scene.input.handle(WindowEvent::Key {
                key: KeyCode::W,
                pressed: false,
            });
        }

        // Headless run: every frame advances exactly one period.
        clock.accumulate(clock.period());
        while clock.step() {
            scene.simulate(clock.period());
        }

        if scene.rng.test(PARTICLE_RATE) {
            scene.spawn_particle();
        }

        device.clear();
        renderer.render_frame(&mut device, &mut scene);

        if frame % 120 == 0 {
            log::info!(
                "frame {frame}: {} entities, {} batched instances, {} draw calls",
                scene.registry.len(),
                scene.batch().len(),
                device.draw_count()
            );
        }
    }

    log::info!(
        "demo finished after {DEMO_FRAMES} frames: {:.1}s simulated, {} entities alive",
        scene.time(),
        scene.registry.len()
    );
    Ok(())
}

/// Fill the scene: reflective floor, tumbling models, lights.
fn populate(scene: &mut Scene, config: &AppConfig) {
    // The floor mirrors the rest of the scene. A missing asset is not
    // fatal: fall back to a generated plane.
    match scene.spawn_reflective_model("floor.obj") {
        Ok(entity) => log::info!("floor loaded: {entity:?}"),
        Err(e) => {
            log::warn!("floor.obj unavailable ({e}), using generated plane");
            let entity = scene.spawn_with_mesh(Arc::new(Mesh::plane(12.0)));
            scene.set_reflective(entity);
        }
    }

    let names = ["gem.obj", "rock.obj"];
    for _ in 0..config.spawn_count {
        let name = *scene.rng.choose(&names);
        let entity = match scene.spawn_model(name) {
            Ok(entity) => entity,
            Err(e) => {
                log::warn!("{name} unavailable ({e}), using generated cube");
                scene.spawn_with_mesh(Arc::new(Mesh::cube(1.0)))
            }
        };

        let mut spawn_area = scene.bounds.bounds;
        spawn_area.set_size(spawn_area.width() * 0.6);
        let position = scene.rng.vec_in(&spawn_area);
        let rotation = scene.rng.rotation();
        let spin = scene.rng.vec(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let velocity = scene.rng.vec(Vec3::new(-2.0, 0.0, -2.0), Vec3::new(2.0, 3.0, 2.0));

        if let Some(model) = scene.registry.models.get_mut(entity) {
            model.position = position;
            model.rotation = rotation;
        }
        let mut body = Body::with_velocity(velocity);
        body.angular_velocity = spin;
        scene.registry.bodies.insert(entity, body);
    }

    // A warm sun plus a cool fill light.
    scene.spawn_light(
        Vec3::new(-0.7, -1.0, 0.3),
        Vec3::new(1.0, 0.96, 0.84),
        1.2,
        LightKind::Directional,
    );
    scene.spawn_light(
        Vec3::new(0.0, 8.0, 0.0),
        Vec3::new(0.4, 0.5, 1.0),
        2.5,
        LightKind::Point,
    );
}
