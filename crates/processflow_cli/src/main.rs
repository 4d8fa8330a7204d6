//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `processflow_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use processflow_core::{open_store_in_memory, ProcessStore, SqliteKeyValueStore};

fn main() {
    // Exercise the full open -> seed -> list path against an in-memory store
    // so the probe stays side-effect free.
    let conn = open_store_in_memory().expect("in-memory store should open");
    let store = SqliteKeyValueStore::try_new(&conn).expect("migrated store should be ready");
    let documents = ProcessStore::new(store)
        .list()
        .expect("document list should load");

    println!(
        "processflow_core version={}",
        processflow_core::core_version()
    );
    println!("documents={}", documents.len());
}
