//! Scene system
//!
//! Named scenes owning entities, components and scripts, and the manager that
//! registers them and drives their per-frame update.
//!
//! Control flow for one frame:
//!
//! ```text
//! SceneManager::update
//!   └─ Scene::update (every registered scene, in name order)
//!        ├─ SceneHooks::update
//!        ├─ Script::update (every script, in slot order)
//!        ├─ deferred script destruction
//!        └─ AnimationSystem::update
//!   └─ apply the scene's queued SceneRequests
//! ```

#[allow(clippy::module_inception)]
pub mod scene;
pub mod scene_manager;
pub mod script;
pub mod scripts;

pub use scene::{Scene, SceneError, SceneHooks, SceneKind, SceneResources};
pub use scene_manager::{SceneManager, SceneStats};
pub use script::{
    SceneManagerProxy, SceneRequest, Script, ScriptContext, ScriptError, ScriptId,
};
pub use scripts::OrbitCameraScript;

#[cfg(test)]
mod tests;
