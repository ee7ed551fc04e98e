//! ECS Systems module

pub mod animation;
pub mod orbit_camera;

pub use animation::AnimationSystem;
pub use orbit_camera::OrbitCameraController;
