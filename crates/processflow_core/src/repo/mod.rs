//! Repository layer over the injected key-value store.
//!
//! # Responsibility
//! - Map collection-level operations (list/save/remove) onto whole-value
//!   key reads and writes.
//! - Isolate the persisted JSON layout from service orchestration.
//!
//! # Invariants
//! - Repositories treat mutations on absent ids as silent no-ops, matching
//!   the upsert-by-identity contract of the editing surface.
//! - Corrupt persisted JSON is surfaced as an error, never masked.

pub mod process_repo;
pub mod user_repo;
