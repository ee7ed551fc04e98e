//! ECS World implementation
//!
//! The world is the component storage service scenes and scripts go through. It
//! owns every entity it creates and every component attached to them.

use slotmap::SlotMap;
use thiserror::Error;

use super::components::NameComponent;
use super::storage::ComponentStorage;
use super::{Component, ComponentKind, ComponentMask, Entity};

/// Errors from world mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The handle does not refer to a live entity in this world
    #[error("entity {0:?} is not alive in this world")]
    StaleEntity(Entity),

    /// The entity already has a component of this kind
    #[error("entity {entity:?} already has a {kind:?} component")]
    DuplicateComponent {
        /// Target entity
        entity: Entity,
        /// Kind that was already present
        kind: ComponentKind,
    },

    /// The entity belongs to a live script and only goes away with it
    #[error("entity {0:?} is owned by a script")]
    OwnedByScript(Entity),
}

#[derive(Debug, Default)]
struct EntityRecord {
    mask: ComponentMask,
    pinned: bool,
}

/// ECS World containing all entities and components
#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, EntityRecord>,
    storage: ComponentStorage,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity with no components
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.insert(EntityRecord::default());
        log::trace!("Created entity {:?}", entity);
        entity
    }

    /// Destroy an entity and every component attached to it.
    ///
    /// Entities owned by a script are refused and left untouched; they are
    /// destroyed together with their script.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), WorldError> {
        let record = self
            .entities
            .get(entity)
            .ok_or(WorldError::StaleEntity(entity))?;
        if record.pinned {
            return Err(WorldError::OwnedByScript(entity));
        }
        self.entities.remove(entity);
        self.storage.remove_all(entity);
        log::trace!("Destroyed entity {:?}", entity);
        Ok(())
    }

    /// Mark an entity as owned by a script, or release it again.
    ///
    /// Returns false for a stale handle.
    pub(crate) fn set_pinned(&mut self, entity: Entity, pinned: bool) -> bool {
        let Some(record) = self.entities.get_mut(entity) else {
            return false;
        };
        record.pinned = pinned;
        true
    }

    /// Whether the entity is owned by a script
    pub fn is_pinned(&self, entity: Entity) -> bool {
        self.entities.get(entity).is_some_and(|record| record.pinned)
    }

    /// Check whether the handle refers to a live entity
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Kinds attached to an entity, `None` for a stale handle
    pub fn component_mask(&self, entity: Entity) -> Option<ComponentMask> {
        self.entities.get(entity).map(|record| record.mask)
    }

    /// Check whether an entity has a component of the given kind
    pub fn has_kind(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.component_mask(entity)
            .is_some_and(|mask| mask.contains(kind.mask()))
    }

    /// Check whether an entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.has_kind(entity, T::KIND)
    }

    /// Attach a default-constructed component and return it for initialization
    pub fn add_component<T: Component + Default>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, WorldError> {
        self.insert_component(entity, T::default())
    }

    /// Attach a component value
    ///
    /// Fails when the entity is stale or already has a component of this kind; an
    /// entity holds at most one component per kind.
    pub fn insert_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<&mut T, WorldError> {
        let record = self
            .entities
            .get_mut(entity)
            .ok_or(WorldError::StaleEntity(entity))?;
        let bit = T::KIND.mask();
        if record.mask.contains(bit) {
            return Err(WorldError::DuplicateComponent {
                entity,
                kind: T::KIND,
            });
        }
        record.mask.insert(bit);

        let column = T::column_mut(&mut self.storage);
        column.insert(entity, component);
        column
            .get_mut(entity)
            .ok_or(WorldError::StaleEntity(entity))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::column(&self.storage).get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::column_mut(&mut self.storage).get_mut(entity)
    }

    /// Get a component the caller has already checked for.
    ///
    /// # Panics
    /// Panics if the entity has no component of type `T`.
    pub fn component<T: Component>(&self, entity: Entity) -> &T {
        match self.get_component(entity) {
            Some(component) => component,
            None => panic!("entity {entity:?} has no {:?} component", T::KIND),
        }
    }

    /// Mutable counterpart of [`World::component`].
    ///
    /// # Panics
    /// Panics if the entity has no component of type `T`.
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        match T::column_mut(&mut self.storage).get_mut(entity) {
            Some(component) => component,
            None => panic!("entity {entity:?} has no {:?} component", T::KIND),
        }
    }

    /// Detach and return a component
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let record = self.entities.get_mut(entity)?;
        record.mask.remove(T::KIND.mask());
        T::column_mut(&mut self.storage).remove(entity)
    }

    /// All entities with a component of type `T`, paired with that component
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        T::column(&self.storage).iter().collect()
    }

    /// All entities with a component of type `T`
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        T::column(&self.storage).keys().collect()
    }

    /// Number of components of the given kind across all entities
    pub fn component_count(&self, kind: ComponentKind) -> usize {
        self.storage.len_of(kind)
    }

    /// Find the entity carrying the given name, if any
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        NameComponent::column(&self.storage)
            .iter()
            .find(|(_, component)| component.as_str() == name)
            .map(|(entity, _)| entity)
    }

    /// Destroy every entity not owned by a script
    pub fn clear(&mut self) {
        let storage = &mut self.storage;
        self.entities.retain(|entity, record| {
            if !record.pinned {
                storage.remove_all(entity);
            }
            record.pinned
        });
    }
}
