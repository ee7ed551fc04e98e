//! Built-in scripts

use super::script::{Script, ScriptContext, ScriptError};
use crate::core::config::OrbitCameraConfig;
use crate::ecs::systems::OrbitCameraController;

/// Runs an [`OrbitCameraController`] on the script's own entity
///
/// Entities without a camera are left alone, so the script can be attached
/// before the camera component is added.
#[derive(Debug, Default)]
pub struct OrbitCameraScript {
    controller: OrbitCameraController,
}

impl OrbitCameraScript {
    /// Create the script with the given orbit settings
    pub fn new(config: &OrbitCameraConfig) -> Self {
        Self {
            controller: OrbitCameraController::new(config),
        }
    }

    /// The underlying controller
    pub fn controller(&self) -> &OrbitCameraController {
        &self.controller
    }
}

impl Script for OrbitCameraScript {
    fn update(&mut self, ctx: &mut ScriptContext<'_>, delta_time: f32) -> Result<(), ScriptError> {
        let entity = ctx.entity();
        let input = ctx.input();
        self.controller.update(ctx.world_mut(), entity, input, delta_time);
        Ok(())
    }
}
