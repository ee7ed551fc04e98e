//! # Scene Engine
//!
//! The entity/component/scene runtime of a small real-time 3D engine.
//!
//! ## Features
//!
//! - **Generation-checked entities**: stale handles are detected, never aliased
//! - **Typed components**: at most one per entity and kind, presence checked explicitly
//! - **Named scenes**: activation-scoped resources, per-frame update of every scene
//! - **Scripts**: behavior objects that own exactly one entity for their whole life
//! - **Orbit camera**: mouse-drag orbiting around a camera's target
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let scene = engine.scenes.register_scene(Scene::empty("pve_scene"))?;
//!         let camera = scene.world_mut().create_entity();
//!         scene.world_mut().add_component::<TransformComponent>(camera)?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut platform = HeadlessPlatform::new(1.0 / 60.0).with_frame_limit(600);
//!     Engine::run(config, &mut platform, &mut MyApp)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod config;
pub mod core;

pub mod ecs;
pub mod foundation;
pub mod input;
pub mod platform;
pub mod scene;
pub mod ui;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use crate::core::config::EngineConfig;
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{Config, OrbitCameraConfig},
        ecs::components::{
            AnimationComponent, CameraComponent, MaterialComponent, MeshComponent, NameComponent,
            TransformComponent,
        },
        ecs::{Component, ComponentKind, Entity, World},
        foundation::{
            math::{Spherical, Vec3},
            time::{Stopwatch, Timer},
        },
        input::{InputManager, KeyCode, MouseButton},
        platform::{HeadlessPlatform, Platform},
        scene::{
            OrbitCameraScript, Scene, SceneError, SceneHooks, SceneKind, SceneManager,
            SceneResources, Script, ScriptContext, ScriptError,
        },
        AppError, AppEvent, Application, Engine, EngineConfig, EngineError,
    };
}
