//! Entity-Component-System implementation
//!
//! Provides the component storage scenes are built on: generation-checked entity
//! handles, one typed column per component kind, and the per-frame systems that
//! operate on those columns.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod components;
pub mod systems;

pub use world::{World, WorldError};
pub use entity::Entity;
pub use component::{Component, ComponentKind, ComponentMask};
pub use storage::ComponentStorage;
