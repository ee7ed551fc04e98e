//! ECS Components module
//!
//! Contains all engine components. Components are plain data; per-frame logic
//! that reads or writes them lives in [`crate::ecs::systems`] and in scripts.

pub mod transform;
pub mod camera;
pub mod renderable;
pub mod name;
pub mod animation;

pub use transform::TransformComponent;
pub use camera::{CameraComponent, Projection};
pub use renderable::{MaterialComponent, MeshComponent, MeshId, TextureId, MAX_MATERIAL_TEXTURES};
pub use name::{NameComponent, NAME_CAPACITY};
pub use animation::{AnimationCapacityError, AnimationComponent, ClipId, PlayState, MAX_ANIMATIONS};
