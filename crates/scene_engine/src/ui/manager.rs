//! UI Manager
//!
//! Registry of live UI documents. Scenes open documents while active and hold
//! the returned [`UIDocument`] guard; dropping the guard closes the document.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Unique identifier for UI documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UIDocumentId(pub u64);

#[derive(Debug, Default)]
struct Registry {
    /// Open documents by ID
    documents: HashMap<UIDocumentId, String>,

    /// Next document ID
    next_id: u64,
}

/// Central UI document registry
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct UIManager {
    registry: Rc<RefCell<Registry>>,
}

impl UIManager {
    /// Create a new UI manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document; it stays open until the returned guard is dropped
    pub fn create_document(&self, name: impl Into<String>) -> UIDocument {
        let name = name.into();
        let mut registry = self.registry.borrow_mut();
        let id = UIDocumentId(registry.next_id);
        registry.next_id += 1;
        registry.documents.insert(id, name.clone());
        log::debug!("Opened UI document '{}' ({:?})", name, id);

        UIDocument {
            id,
            name,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of documents currently open
    pub fn live_documents(&self) -> usize {
        self.registry.borrow().documents.len()
    }

    /// Whether a document is still open
    pub fn is_open(&self, id: UIDocumentId) -> bool {
        self.registry.borrow().documents.contains_key(&id)
    }
}

/// Guard for an open UI document
#[derive(Debug)]
pub struct UIDocument {
    id: UIDocumentId,
    name: String,
    registry: Weak<RefCell<Registry>>,
}

impl UIDocument {
    /// Document ID
    pub fn id(&self) -> UIDocumentId {
        self.id
    }

    /// Document name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for UIDocument {
    fn drop(&mut self) {
        // The manager may already be gone during shutdown
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().documents.remove(&self.id);
            log::debug!("Closed UI document '{}' ({:?})", self.name, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_closes_document() {
        let ui = UIManager::new();
        let hud = ui.create_document("hud");
        let menu = ui.create_document("menu");
        assert_eq!(ui.live_documents(), 2);
        assert_ne!(hud.id(), menu.id());

        let hud_id = hud.id();
        drop(hud);
        assert!(!ui.is_open(hud_id));
        assert!(ui.is_open(menu.id()));
        assert_eq!(ui.live_documents(), 1);
    }

    #[test]
    fn test_clones_share_registry() {
        let ui = UIManager::new();
        let other = ui.clone();
        let _doc = other.create_document("hud");
        assert_eq!(ui.live_documents(), 1);
    }

    #[test]
    fn test_guard_outliving_manager() {
        let doc = {
            let ui = UIManager::new();
            ui.create_document("orphan")
        };
        assert_eq!(doc.name(), "orphan");
        drop(doc);
    }
}
