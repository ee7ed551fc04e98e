//! Scene: a named container of entities, components and scripts
//!
//! Entities and components live in the scene's [`World`] and persist across
//! activation toggles. Only side-channel resources (UI documents) are tied to
//! activation: `activate` acquires them through [`SceneHooks::on_activate`] and
//! `deactivate` releases every one of them.

use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use super::script::{Script, ScriptContext, ScriptError, ScriptId, SceneRequest};
use crate::ecs::systems::AnimationSystem;
use crate::ecs::{Entity, World, WorldError};
use crate::input::InputManager;
use crate::ui::{UIDocument, UIManager};

/// Scene errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// A scene with this name is already registered
    #[error("scene '{0}' is already registered")]
    DuplicateName(String),

    /// No scene with this name is registered
    #[error("scene '{0}' not found")]
    NotFound(String),

    /// The entity already belongs to a script
    #[error("entity {0:?} is already owned by a script")]
    EntityAlreadyScripted(Entity),

    /// World operation failed
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// A script hook failed
    #[error("script on {entity:?} in scene '{scene}' failed: {source}")]
    Script {
        /// Scene the script belongs to
        scene: String,
        /// Entity the script owns
        entity: Entity,
        /// Underlying script error
        source: ScriptError,
    },

    /// Scene-level logic failed
    #[error("scene logic error: {0}")]
    Custom(String),
}

/// Resources a scene holds while active
///
/// Everything in here is released when the scene deactivates.
#[derive(Debug, Default)]
pub struct SceneResources {
    documents: Vec<UIDocument>,
}

impl SceneResources {
    /// Open a UI document that stays open until the scene deactivates
    pub fn open_document(&mut self, ui: &UIManager, name: impl Into<String>) -> &UIDocument {
        let index = self.documents.len();
        self.documents.push(ui.create_document(name));
        &self.documents[index]
    }

    /// Documents currently held
    pub fn documents(&self) -> &[UIDocument] {
        &self.documents
    }

    /// Number of resources held
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether nothing is held
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.documents.clear();
    }
}

/// Scene-specific behavior
///
/// All hooks default to doing nothing, so a scene with no logic of its own is
/// just `Scene::empty`.
pub trait SceneHooks {
    /// Acquire scene-scoped resources
    fn on_activate(
        &mut self,
        _resources: &mut SceneResources,
        _ui: &UIManager,
    ) -> Result<(), SceneError> {
        Ok(())
    }

    /// Called before the scene's resources are released
    fn on_deactivate(&mut self, _resources: &mut SceneResources) {}

    /// Scene-owned per-frame logic, run before the scene's scripts
    fn update(
        &mut self,
        _world: &mut World,
        _input: &InputManager,
        _delta_time: f32,
    ) -> Result<(), SceneError> {
        Ok(())
    }
}

/// A concrete scene type with a static registry name
pub trait SceneKind: SceneHooks + 'static {
    /// Name the scene is registered under
    const NAME: &'static str;
}

struct NoHooks;

impl SceneHooks for NoHooks {}

struct ScriptSlot {
    entity: Entity,
    script: Box<dyn Script>,
    started: bool,
}

/// A named scene
pub struct Scene {
    name: String,
    scripts: SlotMap<ScriptId, ScriptSlot>,
    script_of: SecondaryMap<Entity, ScriptId>,
    resources: SceneResources,
    hooks: Box<dyn SceneHooks>,
    world: World,
    animation: AnimationSystem,
    active: bool,
    registered: bool,
    requests: Vec<SceneRequest>,
}

impl Scene {
    /// Create an inactive scene with the given hooks
    pub fn new(name: impl Into<String>, hooks: impl SceneHooks + 'static) -> Self {
        let name = name.into();
        log::debug!("Created scene '{}'", name);
        Self {
            name,
            scripts: SlotMap::with_key(),
            script_of: SecondaryMap::new(),
            resources: SceneResources::default(),
            hooks: Box::new(hooks),
            world: World::new(),
            animation: AnimationSystem::new(),
            active: false,
            registered: false,
            requests: Vec::new(),
        }
    }

    /// Create a scene with no logic of its own
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, NoHooks)
    }

    /// Create a scene named after its kind
    pub fn of<K: SceneKind>(kind: K) -> Self {
        Self::new(K::NAME, kind)
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the scene is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the scene is owned by a scene manager
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn set_registered(&mut self, registered: bool) {
        self.registered = registered;
    }

    /// The scene's world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The scene's world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Resources held while active
    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }

    /// Named-singleton lookup through the Name component
    pub fn find_entity_by_name(&self, name: &str) -> Option<Entity> {
        self.world.find_by_name(name)
    }

    /// Activate the scene. Does nothing if it is already active.
    ///
    /// If the activation hook fails, whatever it acquired is released and the
    /// scene stays inactive.
    pub fn activate(&mut self, ui: &UIManager) -> Result<(), SceneError> {
        if self.active {
            log::debug!("Scene '{}' already active", self.name);
            return Ok(());
        }

        if let Err(err) = self.hooks.on_activate(&mut self.resources, ui) {
            self.resources.clear();
            return Err(err);
        }

        self.active = true;
        log::debug!(
            "Activated scene '{}' ({} resources)",
            self.name,
            self.resources.len()
        );
        Ok(())
    }

    /// Deactivate the scene, releasing every activation resource. Does nothing
    /// if it is already inactive.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }

        self.hooks.on_deactivate(&mut self.resources);
        let released = self.resources.len();
        self.resources.clear();
        self.active = false;
        log::debug!("Deactivated scene '{}' ({} resources released)", self.name, released);
    }

    /// Create a fresh entity and bind a script to it
    pub fn spawn_script(&mut self, script: impl Script + 'static) -> ScriptId {
        let entity = self.world.create_entity();
        self.bind(entity, Box::new(script))
    }

    /// Bind a script to an existing entity.
    ///
    /// The script takes ownership of the entity: destroying the script destroys it.
    pub fn attach_script(
        &mut self,
        entity: Entity,
        script: impl Script + 'static,
    ) -> Result<ScriptId, SceneError> {
        if !self.world.contains(entity) {
            return Err(WorldError::StaleEntity(entity).into());
        }
        if self.script_of.contains_key(entity) {
            return Err(SceneError::EntityAlreadyScripted(entity));
        }
        Ok(self.bind(entity, Box::new(script)))
    }

    fn bind(&mut self, entity: Entity, script: Box<dyn Script>) -> ScriptId {
        let pinned = self.world.set_pinned(entity, true);
        debug_assert!(pinned, "binding a script to stale entity {entity:?}");
        let id = self.scripts.insert(ScriptSlot {
            entity,
            script,
            started: false,
        });
        self.script_of.insert(entity, id);
        log::debug!("Bound script {:?} to {:?} in scene '{}'", id, entity, self.name);
        id
    }

    /// Destroy a script and its entity. Returns false if the script was already gone.
    pub fn destroy_script(&mut self, id: ScriptId) -> bool {
        let Some(slot) = self.scripts.remove(id) else {
            return false;
        };
        self.script_of.remove(slot.entity);
        drop(slot.script);

        self.world.set_pinned(slot.entity, false);
        if let Err(err) = self.world.destroy_entity(slot.entity) {
            log::warn!("Entity of script {:?} could not be destroyed: {}", id, err);
        }
        log::debug!("Destroyed script {:?} in scene '{}'", id, self.name);
        true
    }

    /// Entity owned by a script
    pub fn script_entity(&self, id: ScriptId) -> Option<Entity> {
        self.scripts.get(id).map(|slot| slot.entity)
    }

    /// Script that owns an entity, if any
    pub fn script_of(&self, entity: Entity) -> Option<ScriptId> {
        self.script_of.get(entity).copied()
    }

    /// Number of live scripts
    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }

    /// Advance the scene by one frame.
    ///
    /// Runs the scene hooks, then every script in a stable order, then applies
    /// scripts' self-destruction requests, then advances animation state. A
    /// failing script stops the pass; its error is returned after pending
    /// destructions are applied.
    pub fn update(&mut self, input: &InputManager, delta_time: f32) -> Result<(), SceneError> {
        self.hooks.update(&mut self.world, input, delta_time)?;

        let ids: Vec<ScriptId> = self.scripts.keys().collect();
        let mut doomed = Vec::new();
        let mut result = Ok(());

        for id in ids {
            let Some(slot) = self.scripts.get_mut(id) else {
                continue;
            };
            let entity = slot.entity;
            let mut ctx = ScriptContext::new(
                entity,
                &self.name,
                &mut self.world,
                input,
                self.registered,
                &mut self.requests,
            );

            let outcome = if slot.started {
                slot.script.update(&mut ctx, delta_time)
            } else {
                slot.started = true;
                slot.script
                    .on_start(&mut ctx)
                    .and_then(|()| slot.script.update(&mut ctx, delta_time))
            };

            if ctx.destroy_requested() {
                doomed.push(id);
            }

            if let Err(source) = outcome {
                result = Err(SceneError::Script {
                    scene: self.name.clone(),
                    entity,
                    source,
                });
                break;
            }
        }

        for id in doomed {
            self.destroy_script(id);
        }
        result?;

        self.animation.update(&mut self.world);
        Ok(())
    }

    pub(crate) fn take_requests(&mut self) -> Vec<SceneRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        // Scripts and their entities go first, then activation resources; the
        // world and its remaining entities drop with the fields.
        let ids: Vec<ScriptId> = self.scripts.keys().collect();
        for id in ids {
            self.destroy_script(id);
        }
        self.deactivate();
        log::debug!("Dropped scene '{}'", self.name);
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("registered", &self.registered)
            .field("entities", &self.world.entity_count())
            .field("scripts", &self.scripts.len())
            .field("resources", &self.resources.len())
            .finish()
    }
}
