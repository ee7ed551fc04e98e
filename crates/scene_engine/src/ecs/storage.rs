//! Component storage
//!
//! One dense column per component kind, keyed by generation-checked entity
//! handles. A stale handle never resolves in any column.

use slotmap::SecondaryMap;

use super::components::{
    AnimationComponent, CameraComponent, MaterialComponent, MeshComponent, NameComponent,
    TransformComponent,
};
use super::{Component, ComponentKind, Entity};

macro_rules! component_columns {
    ($($field:ident: $ty:ty => $kind:ident),* $(,)?) => {
        /// Typed component columns for every [`ComponentKind`]
        #[derive(Default)]
        pub struct ComponentStorage {
            $($field: SecondaryMap<Entity, $ty>,)*
        }

        impl ComponentStorage {
            /// Drop every component attached to `entity`
            pub fn remove_all(&mut self, entity: Entity) {
                $(self.$field.remove(entity);)*
            }

            /// Number of components stored under `kind`
            pub fn len_of(&self, kind: ComponentKind) -> usize {
                match kind {
                    $(ComponentKind::$kind => self.$field.len(),)*
                }
            }
        }

        $(
            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn column(storage: &ComponentStorage) -> &SecondaryMap<Entity, Self> {
                    &storage.$field
                }

                fn column_mut(storage: &mut ComponentStorage) -> &mut SecondaryMap<Entity, Self> {
                    &mut storage.$field
                }
            }
        )*
    };
}

component_columns! {
    transforms: TransformComponent => Transform,
    cameras: CameraComponent => Camera,
    meshes: MeshComponent => Mesh,
    materials: MaterialComponent => Material,
    names: NameComponent => Name,
    animations: AnimationComponent => Animation,
}
