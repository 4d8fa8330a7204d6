//! Content blocks and the ordered block collection.
//!
//! # Responsibility
//! - Define the typed content units a process document is composed of.
//! - Provide the ordered editing surface: append, replace, remove, reorder,
//!   and checklist item sub-operations.
//!
//! # Invariants
//! - `checklist_items` is `Some` exactly when `kind == BlockType::Checklist`.
//! - Block order is caller-visible document reading order.
//! - Mutations keyed by an unknown block or item id are silent no-ops.

use crate::model::generate_id;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Content category of a single block.
///
/// For media kinds `content` holds a resource locator; for `Text` it holds
/// the literal text. `Checklist` blocks keep their payload in
/// `checklist_items` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Image,
    Video,
    Audio,
    Checklist,
}

/// One entry of a checklist block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Unique within the owning block.
    pub id: String,
    pub text: String,
    pub checked: bool,
}

impl ChecklistItem {
    /// Creates an empty unchecked item with a fresh id.
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            text: String::new(),
            checked: false,
        }
    }
}

impl Default for ChecklistItem {
    fn default() -> Self {
        Self::new()
    }
}

/// One typed unit of content inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Unique within the owning document.
    pub id: String,
    /// Serialized as `type` to match the persisted schema naming.
    #[serde(rename = "type")]
    pub kind: BlockType,
    /// Literal text or a resource locator, depending on `kind`.
    pub content: String,
    /// Present exactly when `kind == BlockType::Checklist`.
    #[serde(
        rename = "checklistItems",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub checklist_items: Option<Vec<ChecklistItem>>,
}

/// Structural validation failure for a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockValidationError {
    /// Block id is empty.
    EmptyId,
    /// Checklist block without an item list.
    ChecklistItemsMissing { block_id: String },
    /// Non-checklist block carrying checklist items.
    ChecklistItemsUnexpected { block_id: String },
}

impl Display for BlockValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "block id must not be empty"),
            Self::ChecklistItemsMissing { block_id } => {
                write!(f, "checklist block `{block_id}` has no item list")
            }
            Self::ChecklistItemsUnexpected { block_id } => {
                write!(f, "non-checklist block `{block_id}` carries checklist items")
            }
        }
    }
}

impl Error for BlockValidationError {}

impl Block {
    /// Creates a block with a fresh id and empty content.
    ///
    /// Checklist blocks start with exactly one empty unchecked item so the
    /// editor always has a row to type into.
    pub fn new(kind: BlockType) -> Self {
        let checklist_items = match kind {
            BlockType::Checklist => Some(vec![ChecklistItem::new()]),
            _ => None,
        };
        Self {
            id: generate_id(),
            kind,
            content: String::new(),
            checklist_items,
        }
    }

    /// Checks the checklist-payload invariant.
    pub fn validate(&self) -> Result<(), BlockValidationError> {
        if self.id.is_empty() {
            return Err(BlockValidationError::EmptyId);
        }
        match (self.kind, &self.checklist_items) {
            (BlockType::Checklist, None) => Err(BlockValidationError::ChecklistItemsMissing {
                block_id: self.id.clone(),
            }),
            (BlockType::Checklist, Some(_)) => Ok(()),
            (_, Some(_)) => Err(BlockValidationError::ChecklistItemsUnexpected {
                block_id: self.id.clone(),
            }),
            (_, None) => Ok(()),
        }
    }

    /// Appends one empty item. No-op unless this is a checklist block.
    pub fn add_item(&mut self) {
        if let Some(items) = self.checklist_items.as_mut() {
            items.push(ChecklistItem::new());
        }
    }

    /// Replaces an item's text by id. No-op on unknown id or non-checklist.
    pub fn update_item(&mut self, item_id: &str, text: impl Into<String>) {
        if let Some(item) = self.find_item_mut(item_id) {
            item.text = text.into();
        }
    }

    /// Flips an item's checked flag by id. No-op on unknown id.
    pub fn toggle_item(&mut self, item_id: &str) {
        if let Some(item) = self.find_item_mut(item_id) {
            item.checked = !item.checked;
        }
    }

    /// Removes an item by id. No-op on unknown id or non-checklist.
    pub fn remove_item(&mut self, item_id: &str) {
        if let Some(items) = self.checklist_items.as_mut() {
            items.retain(|item| item.id != item_id);
        }
    }

    fn find_item_mut(&mut self, item_id: &str) -> Option<&mut ChecklistItem> {
        self.checklist_items
            .as_mut()
            .and_then(|items| items.iter_mut().find(|item| item.id == item_id))
    }
}

/// Ordered block collection of one document.
///
/// Order is significant and caller-visible: it is the document reading order
/// and the order the editor renders. Reordering goes through [`move_to`],
/// which models a live drag interaction as discrete splice steps.
///
/// [`move_to`]: BlockList::move_to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockList(Vec<Block>);

impl BlockList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the blocks in display order.
    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    /// Finds one block by id.
    pub fn get(&self, block_id: &str) -> Option<&Block> {
        self.0.iter().find(|block| block.id == block_id)
    }

    /// Creates and appends a block of the given kind, returning it.
    pub fn append(&mut self, kind: BlockType) -> Block {
        let block = Block::new(kind);
        self.0.push(block.clone());
        block
    }

    /// Replaces the block whose id matches the patched block's id.
    ///
    /// Silent no-op when the id is absent. By convention the caller keeps
    /// `id` and `kind` stable across a patch; this is not enforced.
    pub fn update(&mut self, patched: Block) {
        if let Some(slot) = self.0.iter_mut().find(|block| block.id == patched.id) {
            *slot = patched;
        }
    }

    /// Removes the block with the matching id. Idempotent.
    pub fn remove(&mut self, block_id: &str) {
        self.0.retain(|block| block.id != block_id);
    }

    /// Relocates the block at `from` to position `to` in one splice step.
    ///
    /// This is remove-then-reinsert, not a swap: every block strictly between
    /// the two positions shifts by exactly one slot. The drag surface calls
    /// this each time the pointer crosses another block, so intermediate
    /// states are visible during the drag. Out-of-range or equal indices are
    /// a no-op.
    pub fn move_to(&mut self, from: usize, to: usize) {
        if from == to || from >= self.0.len() || to >= self.0.len() {
            return;
        }
        let block = self.0.remove(from);
        self.0.insert(to, block);
    }

    /// Appends one empty item to the given checklist block.
    pub fn add_item(&mut self, block_id: &str) {
        if let Some(block) = self.find_mut(block_id) {
            block.add_item();
        }
    }

    /// Edits one checklist item's text.
    pub fn update_item(&mut self, block_id: &str, item_id: &str, text: impl Into<String>) {
        if let Some(block) = self.find_mut(block_id) {
            block.update_item(item_id, text);
        }
    }

    /// Flips one checklist item's checked flag.
    pub fn toggle_item(&mut self, block_id: &str, item_id: &str) {
        if let Some(block) = self.find_mut(block_id) {
            block.toggle_item(item_id);
        }
    }

    /// Removes one checklist item.
    pub fn remove_item(&mut self, block_id: &str, item_id: &str) {
        if let Some(block) = self.find_mut(block_id) {
            block.remove_item(item_id);
        }
    }

    /// Validates every block's structural invariant.
    pub fn validate(&self) -> Result<(), BlockValidationError> {
        for block in &self.0 {
            block.validate()?;
        }
        Ok(())
    }

    fn find_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.0.iter_mut().find(|block| block.id == block_id)
    }
}

impl From<Vec<Block>> for BlockList {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
