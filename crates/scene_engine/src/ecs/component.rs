//! Component trait and component kinds

use bitflags::bitflags;
use slotmap::SecondaryMap;

use super::storage::ComponentStorage;
use super::Entity;

/// Every kind of component the world can store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Position and rotation
    Transform,
    /// Camera projection and orbit target
    Camera,
    /// Geometry reference
    Mesh,
    /// Texture references
    Material,
    /// Fixed-capacity display name
    Name,
    /// Animation clip play states
    Animation,
}

impl ComponentKind {
    /// All component kinds, in storage order
    pub const ALL: [Self; 6] = [
        Self::Transform,
        Self::Camera,
        Self::Mesh,
        Self::Material,
        Self::Name,
        Self::Animation,
    ];

    /// The presence bit used for this kind in a [`ComponentMask`]
    pub const fn mask(self) -> ComponentMask {
        match self {
            Self::Transform => ComponentMask::TRANSFORM,
            Self::Camera => ComponentMask::CAMERA,
            Self::Mesh => ComponentMask::MESH,
            Self::Material => ComponentMask::MATERIAL,
            Self::Name => ComponentMask::NAME,
            Self::Animation => ComponentMask::ANIMATION,
        }
    }
}

bitflags! {
    /// Set of component kinds attached to one entity
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentMask: u8 {
        /// Entity has a transform
        const TRANSFORM = 1 << 0;
        /// Entity has a camera
        const CAMERA = 1 << 1;
        /// Entity has a mesh
        const MESH = 1 << 2;
        /// Entity has a material
        const MATERIAL = 1 << 3;
        /// Entity has a name
        const NAME = 1 << 4;
        /// Entity has an animation set
        const ANIMATION = 1 << 5;
    }
}

impl ComponentMask {
    /// Iterate the kinds present in this mask
    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.mask()))
    }
}

/// Marker trait for components
///
/// Each component type maps to exactly one [`ComponentKind`] and one storage
/// column. Implementations are generated alongside [`ComponentStorage`].
pub trait Component: Sized + 'static {
    /// The kind this type is stored under
    const KIND: ComponentKind;

    /// Borrow this component's column
    fn column(storage: &ComponentStorage) -> &SecondaryMap<Entity, Self>;

    /// Mutably borrow this component's column
    fn column_mut(storage: &mut ComponentStorage) -> &mut SecondaryMap<Entity, Self>;
}
