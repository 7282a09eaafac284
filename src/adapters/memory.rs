//! In-memory store.
//!
//! Implements [`DocumentStore`] and [`ConfigPort`] without touching the
//! filesystem.  Used for ephemeral sessions (`--ephemeral`) and tests.

use std::cell::{Cell, RefCell};

use crate::app::ports::{ConfigError, ConfigPort, DocumentStore, StorageError};
use crate::config::PetConfig;
use crate::records::Document;

#[derive(Default)]
pub struct MemoryStore {
    doc: RefCell<Option<Document>>,
    config: RefCell<Option<PetConfig>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `doc`.
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc: RefCell::new(Some(doc)),
            ..Self::default()
        }
    }

    /// Number of successful document saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Last saved document, if any.
    pub fn stored(&self) -> Option<Document> {
        self.doc.borrow().clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Document {
        self.doc.borrow().clone().unwrap_or_default()
    }

    fn save(&self, doc: &Document) -> Result<(), StorageError> {
        *self.doc.borrow_mut() = Some(doc.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self) -> Result<PetConfig, ConfigError> {
        Ok(self.config.borrow().clone().unwrap_or_default())
    }

    fn save(&self, config: &PetConfig) -> Result<(), ConfigError> {
        config.validate()?;
        *self.config.borrow_mut() = Some(config.clone());
        Ok(())
    }
}
