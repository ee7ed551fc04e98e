//! UI System Module
//!
//! Scene-scoped UI documents. Only document lifetime is tracked here; layout and
//! drawing belong to the renderer.

pub mod manager;

pub use manager::{UIDocument, UIDocumentId, UIManager};
