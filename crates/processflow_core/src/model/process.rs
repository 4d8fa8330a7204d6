//! Process document aggregate.
//!
//! # Responsibility
//! - Wrap one ordered block list with document-level metadata.
//! - Serialize as the single persistence unit of the document store.
//!
//! # Invariants
//! - `id` is stable for the document lifetime.
//! - `last_updated` is stamped by the store on every save, never trusted
//!   from the caller.

use crate::model::block::BlockList;
use crate::model::generate_id;
use serde::{Deserialize, Serialize};

/// Who can open a shared document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareVisibility {
    /// Owner only.
    Private,
    /// Anyone holding the link.
    Link,
}

/// What a share-link recipient may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareRole {
    Viewer,
    Editor,
}

/// Sharing configuration of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSettings {
    pub visibility: ShareVisibility,
    pub role: ShareRole,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            visibility: ShareVisibility::Private,
            role: ShareRole::Viewer,
        }
    }
}

/// Top-level saved entity: title, description, metadata and ordered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Globally unique opaque id.
    pub id: String,
    /// Required non-empty on save (enforced by the service layer).
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub blocks: BlockList,
    /// Unix epoch milliseconds, refreshed by the store on every save.
    pub last_updated: i64,
    pub is_favorite: bool,
    pub share_settings: ShareSettings,
}

impl Process {
    /// Creates an unsaved document with a fresh id and empty block list.
    ///
    /// `last_updated` starts at zero and is stamped on first save.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            description: description.into(),
            category: "Geral".to_string(),
            tags: Vec::new(),
            blocks: BlockList::new(),
            last_updated: 0,
            is_favorite: false,
            share_settings: ShareSettings::default(),
        }
    }
}
