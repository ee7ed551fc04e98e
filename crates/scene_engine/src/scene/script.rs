//! Scripts: per-entity behavior objects
//!
//! A script owns exactly one entity for its whole life. The owning [`Scene`]
//! creates or adopts the entity when the script is added and destroys it when
//! the script goes away, whether that happens through
//! [`Scene::destroy_script`], [`ScriptContext::destroy_self`] or the scene
//! itself being dropped.
//!
//! [`Scene`]: super::Scene
//! [`Scene::destroy_script`]: super::Scene::destroy_script

use thiserror::Error;

use crate::ecs::{ComponentKind, Entity, World, WorldError};
use crate::input::InputManager;

slotmap::new_key_type! {
    /// Handle to a script inside its scene
    pub struct ScriptId;
}

/// Errors a script reports from its hooks
#[derive(Error, Debug)]
pub enum ScriptError {
    /// World mutation failed
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// A component the script relies on is missing
    #[error("entity {entity:?} is missing its {kind:?} component")]
    MissingComponent {
        /// Entity that was checked
        entity: Entity,
        /// Kind that was absent
        kind: ComponentKind,
    },

    /// Custom script error
    #[error("{0}")]
    Custom(String),
}

/// Per-entity behavior
///
/// Implementations read input and component state through the context and
/// write component state for their own entity. Other entities are reachable
/// only through [`ScriptContext::world_mut`].
pub trait Script {
    /// Called once, right before the script's first update
    fn on_start(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Called every frame
    fn update(&mut self, ctx: &mut ScriptContext<'_>, delta_time: f32) -> Result<(), ScriptError>;
}

/// Request a script makes of the scene manager, applied after its scene updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneRequest {
    /// Activate the named scene
    Activate(String),
    /// Deactivate the named scene
    Deactivate(String),
    /// Unregister (and destroy) the named scene
    Unregister(String),
}

/// View of the scene a script runs in
pub struct ScriptContext<'a> {
    entity: Entity,
    scene_name: &'a str,
    world: &'a mut World,
    input: &'a InputManager,
    registered: bool,
    requests: &'a mut Vec<SceneRequest>,
    destroy_requested: bool,
}

impl<'a> ScriptContext<'a> {
    pub(crate) fn new(
        entity: Entity,
        scene_name: &'a str,
        world: &'a mut World,
        input: &'a InputManager,
        registered: bool,
        requests: &'a mut Vec<SceneRequest>,
    ) -> Self {
        Self {
            entity,
            scene_name,
            world,
            input,
            registered,
            requests,
            destroy_requested: false,
        }
    }

    /// The entity this script owns
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Name of the owning scene
    pub fn scene_name(&self) -> &'a str {
        self.scene_name
    }

    /// Shared view of the scene's world
    pub fn world(&self) -> &World {
        &*self.world
    }

    /// Mutable view of the scene's world
    pub fn world_mut(&mut self) -> &mut World {
        &mut *self.world
    }

    /// Application input state
    pub fn input(&self) -> &'a InputManager {
        self.input
    }

    /// Ask the scene to destroy this script, and with it its entity, once the
    /// current update pass finishes
    pub fn destroy_self(&mut self) {
        self.destroy_requested = true;
    }

    pub(crate) fn destroy_requested(&self) -> bool {
        self.destroy_requested
    }

    /// Access the scene manager that owns this script's scene.
    ///
    /// # Panics
    ///
    /// Panics if the scene is not registered with a scene manager.
    pub fn scene_manager(&mut self) -> SceneManagerProxy<'_> {
        assert!(
            self.registered,
            "script on {:?} asked for the scene manager, but scene '{}' is not registered with one",
            self.entity, self.scene_name
        );
        SceneManagerProxy {
            requests: &mut *self.requests,
        }
    }
}

/// Deferred handle to the scene manager, handed out by [`ScriptContext::scene_manager`]
///
/// Requests are applied in order once the requesting scene finishes its update.
/// Requests naming a scene that no longer exists are skipped with a warning.
pub struct SceneManagerProxy<'c> {
    requests: &'c mut Vec<SceneRequest>,
}

impl SceneManagerProxy<'_> {
    /// Activate a scene
    pub fn activate_scene(&mut self, name: impl Into<String>) {
        self.requests.push(SceneRequest::Activate(name.into()));
    }

    /// Deactivate a scene
    pub fn deactivate_scene(&mut self, name: impl Into<String>) {
        self.requests.push(SceneRequest::Deactivate(name.into()));
    }

    /// Unregister and destroy a scene
    pub fn unregister_scene(&mut self, name: impl Into<String>) {
        self.requests.push(SceneRequest::Unregister(name.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_queues_requests_in_order() {
        let mut world = World::new();
        let entity = world.create_entity();
        let input = InputManager::new();
        let mut requests = Vec::new();

        let mut ctx = ScriptContext::new(entity, "menu", &mut world, &input, true, &mut requests);
        ctx.scene_manager().activate_scene("pve_scene");
        ctx.scene_manager().unregister_scene("menu");
        drop(ctx);

        assert_eq!(
            requests,
            vec![
                SceneRequest::Activate("pve_scene".to_string()),
                SceneRequest::Unregister("menu".to_string()),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn test_scene_manager_requires_registration() {
        let mut world = World::new();
        let entity = world.create_entity();
        let input = InputManager::new();
        let mut requests = Vec::new();

        let mut ctx = ScriptContext::new(entity, "loose", &mut world, &input, false, &mut requests);
        ctx.scene_manager().activate_scene("anything");
    }

    #[test]
    fn test_destroy_self_flag() {
        let mut world = World::new();
        let entity = world.create_entity();
        let input = InputManager::new();
        let mut requests = Vec::new();

        let mut ctx = ScriptContext::new(entity, "scene", &mut world, &input, false, &mut requests);
        assert!(!ctx.destroy_requested());
        ctx.destroy_self();
        assert!(ctx.destroy_requested());
        assert_eq!(ctx.entity(), entity);
        assert!(ctx.world().contains(entity));
    }
}
