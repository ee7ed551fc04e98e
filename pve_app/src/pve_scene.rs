//! The PvE arena scene and its scripts

use scene_engine::ecs::components::{ClipId, MeshId, TextureId};
use scene_engine::prelude::*;

/// Clip the ship plays when it spawns
pub const IDLE_CLIP: ClipId = ClipId(0);

/// Name of the arena camera
pub const CAMERA_NAME: &str = "main_camera";

/// Arena scene: opens its HUD while active
pub struct PveScene;

impl SceneHooks for PveScene {
    fn on_activate(
        &mut self,
        resources: &mut SceneResources,
        ui: &scene_engine::ui::UIManager,
    ) -> Result<(), SceneError> {
        resources.open_document(ui, "pve_hud");
        Ok(())
    }

    fn on_deactivate(&mut self, resources: &mut SceneResources) {
        log::info!("Closing {} PvE HUD documents", resources.len());
    }

    fn update(
        &mut self,
        world: &mut World,
        _input: &InputManager,
        _delta_time: f32,
    ) -> Result<(), SceneError> {
        // The arena cannot run without something to look through
        if world.find_by_name(CAMERA_NAME).is_none() {
            return Err(SceneError::Custom(format!("{} lost its camera", PveScene::NAME)));
        }
        Ok(())
    }
}

impl SceneKind for PveScene {
    const NAME: &'static str = "pve_scene";
}

/// Spins its entity around the vertical axis
pub struct Spinner {
    /// Radians per second
    pub speed: f32,
}

impl Script for Spinner {
    fn on_start(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        let entity = ctx.entity();
        let world = ctx.world_mut();
        world.insert_component(entity, NameComponent::new("ship"))?;
        world.add_component::<TransformComponent>(entity)?;
        world.insert_component(entity, MeshComponent::new(MeshId(1)))?;
        world.insert_component(entity, MaterialComponent::new([TextureId(1), TextureId(2)]))?;
        world
            .add_component::<AnimationComponent>(entity)?
            .play(IDLE_CLIP)
            .map_err(|e| ScriptError::Custom(e.to_string()))?;
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>, delta_time: f32) -> Result<(), ScriptError> {
        let entity = ctx.entity();
        let transform = ctx
            .world_mut()
            .get_component_mut::<TransformComponent>(entity)
            .ok_or(ScriptError::MissingComponent {
                entity,
                kind: ComponentKind::Transform,
            })?;
        transform.rotation.y = (transform.rotation.y + self.speed * delta_time) % std::f32::consts::TAU;
        Ok(())
    }
}

/// Populate the arena: an orbiting camera and a spinning ship
pub fn populate(scene: &mut Scene, orbit: &OrbitCameraConfig) -> Result<Entity, AppError> {
    let world = scene.world_mut();
    let camera = world.create_entity();
    world.insert_component(camera, NameComponent::new(CAMERA_NAME))?;
    world.insert_component(
        camera,
        TransformComponent::from_position(Vec3::new(6.0, 3.0, 6.0)),
    )?;
    world.insert_component(
        camera,
        CameraComponent::perspective(60.0, 0.1, 500.0).with_target(Vec3::zeros()),
    )?;
    scene.attach_script(camera, OrbitCameraScript::new(orbit))?;

    scene.spawn_script(Spinner { speed: 1.0 });
    Ok(camera)
}
