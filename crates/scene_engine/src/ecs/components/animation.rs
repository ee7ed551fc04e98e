//! Animation component
//!
//! Tracks which animation clips are playing on an entity. Clip playback itself
//! (sampling keyframes, skinning) belongs to the renderer.

/// Maximum number of clips one entity can track
pub const MAX_ANIMATIONS: usize = 128;

/// Identifier of an animation clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ClipId(pub u32);

/// Playback state of one clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Clip is stopped
    #[default]
    NotPlaying,
    /// Clip is running
    Playing,
    /// Clip was requested this frame and starts from the beginning
    StartPlaying,
}

/// Error returned when an entity already tracks [`MAX_ANIMATIONS`] clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("animation component is full ({} clips)", MAX_ANIMATIONS)]
pub struct AnimationCapacityError;

/// ECS Animation component
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimationComponent {
    slots: Vec<(ClipId, PlayState)>,
}

impl AnimationComponent {
    /// Create an empty animation set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip in the `NotPlaying` state. Registering a known clip is a no-op.
    pub fn add_clip(&mut self, clip: ClipId) -> Result<(), AnimationCapacityError> {
        if self.slot(clip).is_some() {
            return Ok(());
        }
        if self.slots.len() >= MAX_ANIMATIONS {
            return Err(AnimationCapacityError);
        }
        self.slots.push((clip, PlayState::NotPlaying));
        Ok(())
    }

    /// Request a clip to start, registering it if needed
    pub fn play(&mut self, clip: ClipId) -> Result<(), AnimationCapacityError> {
        self.add_clip(clip)?;
        if let Some(index) = self.slot(clip) {
            self.slots[index].1 = PlayState::StartPlaying;
        }
        Ok(())
    }

    /// Stop a clip. Unknown clips are ignored.
    pub fn stop(&mut self, clip: ClipId) {
        if let Some(index) = self.slot(clip) {
            self.slots[index].1 = PlayState::NotPlaying;
        }
    }

    /// State of a clip, `None` when the clip was never registered
    pub fn state(&self, clip: ClipId) -> Option<PlayState> {
        self.slot(clip).map(|index| self.slots[index].1)
    }

    /// All tracked clips with their states
    pub fn clips(&self) -> &[(ClipId, PlayState)] {
        &self.slots
    }

    /// Number of clips in `Playing` or `StartPlaying`
    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, state)| *state != PlayState::NotPlaying)
            .count()
    }

    /// Turn every `StartPlaying` clip into `Playing`. Returns how many changed.
    pub fn promote_started(&mut self) -> usize {
        let mut promoted = 0;
        for (_, state) in &mut self.slots {
            if *state == PlayState::StartPlaying {
                *state = PlayState::Playing;
                promoted += 1;
            }
        }
        promoted
    }

    fn slot(&self, clip: ClipId) -> Option<usize> {
        self.slots.iter().position(|(id, _)| *id == clip)
    }
}
