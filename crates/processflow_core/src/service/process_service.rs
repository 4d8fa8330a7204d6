//! Document use-case service.
//!
//! # Responsibility
//! - Provide save/list/remove entry points for editor and dashboard flows.
//! - Validate documents before persistence: non-empty title, checklist
//!   payload invariant on every block.
//! - Carry the viewer flows that write through the store (checklist toggle,
//!   share settings).
//!
//! # Invariants
//! - A validation failure aborts the operation with no state change.
//! - Writes on an absent document id are silent no-ops, matching the store.

use crate::model::block::BlockValidationError;
use crate::model::process::{Process, ShareSettings};
use crate::repo::process_repo::{ProcessStore, StoreError};
use crate::storage::KeyValueStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProcessServiceResult<T> = Result<T, ProcessServiceError>;

/// Document service error.
#[derive(Debug)]
pub enum ProcessServiceError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// A block violates its structural invariant.
    Block(BlockValidationError),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ProcessServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "document title must not be empty"),
            Self::Block(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProcessServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyTitle => None,
            Self::Block(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<BlockValidationError> for ProcessServiceError {
    fn from(value: BlockValidationError) -> Self {
        Self::Block(value)
    }
}

impl From<StoreError> for ProcessServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case wrapper over the document store.
pub struct ProcessService<S: KeyValueStore> {
    store: ProcessStore<S>,
}

impl<S: KeyValueStore> ProcessService<S> {
    pub fn new(store: ProcessStore<S>) -> Self {
        Self { store }
    }

    /// Validates and persists one document (upsert-by-id).
    ///
    /// # Contract
    /// - Title must be non-empty after trimming.
    /// - Every block must satisfy the checklist-payload invariant.
    /// - `last_updated` is stamped by the store regardless of input.
    pub fn save_document(&self, process: &Process) -> ProcessServiceResult<()> {
        if process.title.trim().is_empty() {
            return Err(ProcessServiceError::EmptyTitle);
        }
        process.blocks.validate()?;

        self.store.save(process)?;
        info!(
            "event=document_save module=service status=ok document_id={}",
            process.id
        );
        Ok(())
    }

    /// Returns all documents, seeding the sample on first access.
    pub fn list(&self) -> ProcessServiceResult<Vec<Process>> {
        Ok(self.store.list()?)
    }

    /// Finds one document by id.
    pub fn get(&self, id: &str) -> ProcessServiceResult<Option<Process>> {
        Ok(self.store.get(id)?)
    }

    /// Deletes one document by id. Silent no-op when absent.
    pub fn remove(&self, id: &str) -> ProcessServiceResult<()> {
        self.store.remove(id)?;
        Ok(())
    }

    /// Flips the favorite flag of one document.
    pub fn toggle_favorite(&self, id: &str) -> ProcessServiceResult<()> {
        Ok(self.store.toggle_favorite(id)?)
    }

    /// Replaces the sharing configuration of one document.
    ///
    /// No-op when the id is absent. Goes through `save`, so `last_updated`
    /// is refreshed.
    pub fn update_share_settings(
        &self,
        id: &str,
        settings: ShareSettings,
    ) -> ProcessServiceResult<()> {
        if let Some(mut process) = self.store.get(id)? {
            process.share_settings = settings;
            self.store.save(&process)?;
        }
        Ok(())
    }

    /// Flips one checklist item from the viewer and writes the result back.
    ///
    /// No-op when the document, block or item id is unknown.
    pub fn toggle_checklist_item(
        &self,
        id: &str,
        block_id: &str,
        item_id: &str,
    ) -> ProcessServiceResult<()> {
        if let Some(mut process) = self.store.get(id)? {
            process.blocks.toggle_item(block_id, item_id);
            self.store.save(&process)?;
        }
        Ok(())
    }
}
