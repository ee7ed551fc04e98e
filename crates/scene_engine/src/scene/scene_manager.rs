//! Scene Manager
//!
//! Owns every registered [`Scene`] by name and drives their per-frame update.
//! Scenes are visited in name order, which is stable for the life of the
//! process; no scene may rely on running before or after another.
//!
//! Looking up a missing scene is a normal outcome (`None`). Unregistering a
//! missing scene is a caller bug and panics.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::scene::{Scene, SceneError, SceneKind};
use super::script::SceneRequest;
use crate::input::InputManager;
use crate::ui::UIManager;

/// Scene manager statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Registered scenes
    pub scene_count: usize,

    /// Scenes currently active
    pub active_scenes: usize,

    /// Live entities across all scenes
    pub entity_count: usize,

    /// Live scripts across all scenes
    pub script_count: usize,
}

/// Registry and per-frame driver for named scenes
#[derive(Debug, Default)]
pub struct SceneManager {
    scenes: BTreeMap<String, Scene>,
    ui: UIManager,
}

impl SceneManager {
    /// Create an empty scene manager with its own UI registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene manager sharing an existing UI registry
    pub fn with_ui(ui: UIManager) -> Self {
        Self {
            scenes: BTreeMap::new(),
            ui,
        }
    }

    /// UI registry scenes acquire documents from
    pub fn ui(&self) -> &UIManager {
        &self.ui
    }

    /// Take ownership of a scene.
    ///
    /// A second scene with an already-registered name is rejected and dropped,
    /// along with everything it owns.
    pub fn register_scene(&mut self, mut scene: Scene) -> Result<&mut Scene, SceneError> {
        match self.scenes.entry(scene.name().to_string()) {
            Entry::Occupied(entry) => {
                log::warn!("Rejected duplicate scene '{}'", entry.key());
                Err(SceneError::DuplicateName(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                log::info!("Registered scene '{}'", entry.key());
                scene.set_registered(true);
                Ok(entry.insert(scene))
            }
        }
    }

    /// Create and register a scene of kind `K` under `K::NAME`
    pub fn create_scene<K: SceneKind>(&mut self, kind: K) -> Result<&mut Scene, SceneError> {
        self.register_scene(Scene::of(kind))
    }

    /// Look up a scene by exact name
    pub fn get_scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Look up a scene by exact name, mutably
    pub fn get_scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Whether a scene with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Remove and destroy a scene.
    ///
    /// # Panics
    ///
    /// Panics if no scene with this name is registered. Check with
    /// [`SceneManager::get_scene`] first.
    pub fn unregister_scene(&mut self, name: &str) {
        let Some(mut scene) = self.scenes.remove(name) else {
            panic!("unregister_scene: no scene named '{name}' is registered");
        };
        scene.set_registered(false);
        drop(scene);
        log::info!("Unregistered scene '{}'", name);
    }

    /// Activate a scene by name
    pub fn activate_scene(&mut self, name: &str) -> Result<(), SceneError> {
        let scene = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| SceneError::NotFound(name.to_string()))?;
        scene.activate(&self.ui)
    }

    /// Deactivate a scene by name
    pub fn deactivate_scene(&mut self, name: &str) -> Result<(), SceneError> {
        let scene = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| SceneError::NotFound(name.to_string()))?;
        scene.deactivate();
        Ok(())
    }

    /// Update every registered scene, active or not.
    ///
    /// Requests scripts queued through their scene manager proxy are applied
    /// right after the requesting scene's update. The first failing scene ends
    /// the pass.
    pub fn update(&mut self, input: &InputManager, delta_time: f32) -> Result<(), SceneError> {
        let names: Vec<String> = self.scenes.keys().cloned().collect();

        for name in names {
            // A request from an earlier scene may have removed this one
            let Some(scene) = self.scenes.get_mut(&name) else {
                continue;
            };
            let result = scene.update(input, delta_time);
            let requests = scene.take_requests();
            let applied = self.apply_requests(requests);
            if let Err(err) = result {
                // The scene's own failure wins; a request failure is only logged
                if let Err(lost) = applied {
                    log::error!("Scene request from '{}' also failed: {}", name, lost);
                }
                return Err(err);
            }
            applied?;
        }

        Ok(())
    }

    fn apply_requests(&mut self, requests: Vec<SceneRequest>) -> Result<(), SceneError> {
        for request in requests {
            let outcome = match &request {
                SceneRequest::Activate(name) => self.activate_scene(name),
                SceneRequest::Deactivate(name) => self.deactivate_scene(name),
                SceneRequest::Unregister(name) => {
                    if self.contains(name) {
                        self.unregister_scene(name);
                        Ok(())
                    } else {
                        Err(SceneError::NotFound(name.clone()))
                    }
                }
            };

            match outcome {
                Err(SceneError::NotFound(name)) => {
                    log::warn!("Skipping {:?}: scene '{}' is not registered", request, name);
                }
                other => other?,
            }
        }
        Ok(())
    }

    /// Names of registered scenes, in update order
    pub fn scene_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.scenes.keys().map(String::as_str)
    }

    /// Number of registered scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scenes are registered
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Aggregate statistics
    pub fn stats(&self) -> SceneStats {
        self.scenes.values().fold(
            SceneStats {
                scene_count: self.scenes.len(),
                ..SceneStats::default()
            },
            |mut stats, scene| {
                stats.active_scenes += usize::from(scene.is_active());
                stats.entity_count += scene.world().entity_count();
                stats.script_count += scene.script_count();
                stats
            },
        )
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        while let Some((name, scene)) = self.scenes.pop_first() {
            drop(scene);
            log::debug!("Destroyed scene '{}' with its manager", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneHooks, SceneResources, Script, ScriptContext, ScriptError};

    struct Menu;

    impl SceneHooks for Menu {
        fn on_activate(
            &mut self,
            resources: &mut SceneResources,
            ui: &UIManager,
        ) -> Result<(), SceneError> {
            resources.open_document(ui, "main_menu");
            Ok(())
        }
    }

    impl SceneKind for Menu {
        const NAME: &'static str = "menu";
    }

    /// Switches from its own scene to `next` on the first frame
    struct Switcher {
        next: &'static str,
    }

    impl Script for Switcher {
        fn update(&mut self, ctx: &mut ScriptContext<'_>, _delta_time: f32) -> Result<(), ScriptError> {
            let current = ctx.scene_name().to_string();
            let mut manager = ctx.scene_manager();
            manager.deactivate_scene(current);
            manager.activate_scene(self.next);
            manager.unregister_scene("does_not_exist");
            Ok(())
        }
    }

    #[test]
    fn test_create_scene_uses_kind_name() {
        let mut manager = SceneManager::new();
        let scene = manager.create_scene(Menu).unwrap();
        assert_eq!(scene.name(), "menu");
        assert!(scene.is_registered());
        assert!(manager.contains("menu"));
    }

    #[test]
    fn test_activate_by_name() {
        let mut manager = SceneManager::new();
        manager.create_scene(Menu).unwrap();

        manager.activate_scene("menu").unwrap();
        assert_eq!(manager.ui().live_documents(), 1);
        assert_eq!(manager.stats().active_scenes, 1);

        manager.deactivate_scene("menu").unwrap();
        assert_eq!(manager.ui().live_documents(), 0);

        assert!(matches!(
            manager.activate_scene("missing"),
            Err(SceneError::NotFound(_))
        ));
    }

    #[test]
    fn test_script_requests_apply_after_update() {
        let mut manager = SceneManager::new();
        manager.create_scene(Menu).unwrap();
        manager.register_scene(Scene::empty("pve_scene")).unwrap();
        manager.activate_scene("menu").unwrap();
        manager
            .get_scene_mut("menu")
            .unwrap()
            .spawn_script(Switcher { next: "pve_scene" });

        manager.update(&InputManager::new(), 0.016).unwrap();

        assert!(!manager.get_scene("menu").unwrap().is_active());
        assert!(manager.get_scene("pve_scene").unwrap().is_active());
        assert_eq!(manager.ui().live_documents(), 0);
    }

    #[test]
    fn test_script_error_wins_over_failed_request() {
        struct NoHud;

        impl SceneHooks for NoHud {
            fn on_activate(
                &mut self,
                _resources: &mut SceneResources,
                _ui: &UIManager,
            ) -> Result<(), SceneError> {
                Err(SceneError::Custom("hud assets missing".to_string()))
            }
        }

        struct SwitchThenFail;

        impl Script for SwitchThenFail {
            fn update(&mut self, ctx: &mut ScriptContext<'_>, _delta_time: f32) -> Result<(), ScriptError> {
                ctx.scene_manager().activate_scene("hud");
                Err(ScriptError::Custom("lost the player".to_string()))
            }
        }

        let mut manager = SceneManager::new();
        manager.register_scene(Scene::new("hud", NoHud)).unwrap();
        manager
            .register_scene(Scene::empty("arena"))
            .unwrap()
            .spawn_script(SwitchThenFail);

        let err = manager.update(&InputManager::new(), 0.016).unwrap_err();
        assert!(matches!(err, SceneError::Script { ref scene, .. } if scene == "arena"));
        assert!(!manager.get_scene("hud").unwrap().is_active());
    }

    #[test]
    fn test_stats_and_names() {
        let mut manager = SceneManager::new();
        manager.register_scene(Scene::empty("b")).unwrap();
        let scene = manager.register_scene(Scene::empty("a")).unwrap();
        scene.world_mut().create_entity();
        scene.spawn_script(Switcher { next: "b" });

        assert_eq!(manager.scene_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            manager.stats(),
            SceneStats {
                scene_count: 2,
                active_scenes: 0,
                entity_count: 2,
                script_count: 1,
            }
        );
    }

    #[test]
    fn test_drop_tears_down_scripts_before_scene() {
        use std::cell::RefCell;
        use std::rc::Rc;

        type Log = Rc<RefCell<Vec<&'static str>>>;

        struct Logged(Log);

        impl SceneHooks for Logged {
            fn on_deactivate(&mut self, _resources: &mut SceneResources) {
                self.0.borrow_mut().push("resources");
            }
        }

        impl Drop for Logged {
            fn drop(&mut self) {
                self.0.borrow_mut().push("scene");
            }
        }

        struct Watcher(Log);

        impl Script for Watcher {
            fn update(&mut self, _ctx: &mut ScriptContext<'_>, _delta_time: f32) -> Result<(), ScriptError> {
                Ok(())
            }
        }

        impl Drop for Watcher {
            fn drop(&mut self) {
                self.0.borrow_mut().push("script");
            }
        }

        let log: Log = Rc::default();
        {
            let mut manager = SceneManager::new();
            let scene = manager
                .register_scene(Scene::new("arena", Logged(log.clone())))
                .unwrap();
            scene.spawn_script(Watcher(log.clone()));
            scene.spawn_script(Watcher(log.clone()));
            manager.activate_scene("arena").unwrap();
            manager.update(&InputManager::new(), 0.016).unwrap();
            assert!(log.borrow().is_empty());
        }

        assert_eq!(*log.borrow(), vec!["script", "script", "resources", "scene"]);
        assert_eq!(Rc::strong_count(&log), 1);
    }

    #[test]
    fn test_drop_releases_scene_resources() {
        let ui = UIManager::new();
        {
            let mut manager = SceneManager::with_ui(ui.clone());
            manager.create_scene(Menu).unwrap();
            manager.activate_scene("menu").unwrap();
            assert_eq!(ui.live_documents(), 1);
        }
        assert_eq!(ui.live_documents(), 0);
    }
}
