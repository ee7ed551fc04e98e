//! PvE demo application
//!
//! Runs the `pve_scene` headlessly: a camera orbits a spinning ship while a
//! scripted mouse drag plays out, then the exit key ends the run.
//!
//! Usage: `pve_app [config.toml|config.ron]`

mod pve_scene;

use scene_engine::config::ConfigError;
use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use thiserror::Error;

use pve_scene::PveScene;

const DEFAULT_CONFIG_PATH: &str = "pve_app.toml";
const FRAME_TIME: f32 = 1.0 / 60.0;
const EXIT_FRAME: u64 = 240;

#[derive(Error, Debug)]
enum PveError {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

struct PveApp {
    camera: Option<Entity>,
}

impl Application for PveApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing PvE demo...");
        let orbit = engine.config().orbit.clone();

        let scene = engine.scenes.create_scene(PveScene)?;
        self.camera = Some(pve_scene::populate(scene, &orbit)?);
        engine.scenes.activate_scene(PveScene::NAME)?;
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        let frame = engine.frame_count();
        if frame % 60 != 0 {
            return Ok(());
        }

        let Some(scene) = engine.scenes.get_scene(PveScene::NAME) else {
            return Err(AppError::Custom(format!("{} disappeared", PveScene::NAME)));
        };
        if let Some(camera) = self.camera {
            if let Some(transform) = scene.world().get_component::<TransformComponent>(camera) {
                let p = transform.position;
                log::info!("Frame {}: camera at ({:.2}, {:.2}, {:.2})", frame, p.x, p.y, p.z);
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let stats = engine.scenes.stats();
        log::info!(
            "Shutting down with {} scenes, {} entities, {} scripts",
            stats.scene_count,
            stats.entity_count,
            stats.script_count
        );
    }
}

/// Press, drag to the right over half a second, release, then press the exit key
fn scripted_platform() -> HeadlessPlatform {
    // The frame limit stops the run even when the config disables the exit key
    let mut platform = HeadlessPlatform::new(FRAME_TIME)
        .with_frame_limit(EXIT_FRAME + 60)
        .with_events_at(10, [AppEvent::MouseMoved { x: 400.0, y: 300.0 }])
        .with_events_at(
            11,
            [AppEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            }],
        );

    for step in 1..=30_u32 {
        let x = 400.0 + f64::from(step) * 15.0;
        let y = 300.0 - f64::from(step) * 2.0;
        platform = platform.with_events_at(11 + u64::from(step), [AppEvent::MouseMoved { x, y }]);
    }

    platform
        .with_events_at(
            42,
            [AppEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            }],
        )
        .with_events_at(
            EXIT_FRAME,
            [AppEvent::KeyInput {
                key: KeyCode::Escape,
                pressed: true,
            }],
        )
}

fn main() -> Result<(), PveError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = EngineConfig::load_or_default(&path)?;
    logging::init_with_filter(&config.logging.filter);
    log::info!("Loaded configuration from {}", path);

    let mut platform = scripted_platform();
    let mut app = PveApp { camera: None };
    Engine::run(config, &mut platform, &mut app)?;
    Ok(())
}
