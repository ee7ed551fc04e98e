//! Animation state system

use crate::ecs::components::AnimationComponent;
use crate::ecs::World;

/// Advances clip play states once per frame.
///
/// `StartPlaying` is a one-frame trigger: every consumer sees it during the frame
/// it was requested, after which this system turns it into `Playing`.
#[derive(Debug, Default)]
pub struct AnimationSystem;

impl AnimationSystem {
    /// Create a new animation system
    pub fn new() -> Self {
        Self
    }

    /// Promote started clips on every entity. Returns the number of clips promoted.
    pub fn update(&self, world: &mut World) -> usize {
        let mut promoted = 0;
        for entity in world.entities_with::<AnimationComponent>() {
            if let Some(animation) = world.get_component_mut::<AnimationComponent>(entity) {
                promoted += animation.promote_started();
            }
        }
        if promoted > 0 {
            log::trace!("Promoted {} started animation clips", promoted);
        }
        promoted
    }
}
