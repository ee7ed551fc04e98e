//! Entity implementation

use slotmap::{new_key_type, Key};

new_key_type! {
    /// Entity identifier
    ///
    /// A generation-checked index into the owning [`World`](super::World). A handle
    /// kept past its entity's destruction never resolves to a different entity that
    /// later reuses the same slot.
    pub struct Entity;
}

impl Entity {
    /// Get the packed index/generation value, useful for logging
    pub fn id(&self) -> u64 {
        self.data().as_ffi()
    }
}
