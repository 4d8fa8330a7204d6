//! Domain model for process documents and their collaborators.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep one block-centric document shape shared by editor and viewer flows.
//!
//! # Invariants
//! - Every entity is identified by an opaque stable `String` id.
//! - A document exclusively owns its block list and checklist items.

use uuid::Uuid;

pub mod block;
pub mod process;
pub mod user;

/// Generates a fresh globally-unique opaque identifier.
///
/// Shared by documents, blocks and checklist items. Seed data may carry
/// hand-written ids (`sample-1`, `b1`, ...), which is why identifiers stay
/// plain strings instead of `Uuid` values.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_id;
    use std::collections::HashSet;

    #[test]
    fn generate_id_yields_distinct_values() {
        let ids: HashSet<_> = (0..64).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 64);
    }
}
