use processflow_core::{
    open_store, open_store_in_memory, BlockType, Process, ProcessService, ProcessServiceError,
    ProcessStore, ShareRole, ShareSettings, ShareVisibility, SqliteKeyValueStore,
};
use rusqlite::Connection;

fn store(conn: &Connection) -> ProcessStore<SqliteKeyValueStore<'_>> {
    ProcessStore::new(SqliteKeyValueStore::try_new(conn).unwrap())
}

fn service(conn: &Connection) -> ProcessService<SqliteKeyValueStore<'_>> {
    ProcessService::new(store(conn))
}

#[test]
fn first_read_seeds_exactly_one_sample_document() {
    let conn = open_store_in_memory().unwrap();
    let repo = store(&conn);

    let first = repo.list().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id, "sample-1");
    assert!(!first[0].blocks.is_empty());

    // The seed is persisted, not regenerated: a second read returns the
    // identical document, timestamps included.
    let second = repo.list().unwrap();
    assert_eq!(first, second);
}

#[test]
fn seed_survives_reopening_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("processflow.db");

    let first = {
        let conn = open_store(&path).unwrap();
        store(&conn).list().unwrap()
    };

    let conn = open_store(&path).unwrap();
    let second = store(&conn).list().unwrap();
    assert_eq!(first, second);
}

#[test]
fn save_stamps_last_updated_with_current_time() {
    let conn = open_store_in_memory().unwrap();
    let repo = store(&conn);

    let mut process = Process::new("Checklist de Deploy", "");
    process.last_updated = 42;
    repo.save(&process).unwrap();

    let stored = repo.get(&process.id).unwrap().unwrap();
    assert_ne!(stored.last_updated, 42);
    assert!(stored.last_updated > 1_600_000_000_000);
}

#[test]
fn save_is_an_upsert_by_id() {
    let conn = open_store_in_memory().unwrap();
    let repo = store(&conn);

    let mut process = Process::new("Primeira versão", "");
    repo.save(&process).unwrap();
    let count_after_insert = repo.list().unwrap().len();

    process.title = "Segunda versão".to_string();
    repo.save(&process).unwrap();

    let documents = repo.list().unwrap();
    assert_eq!(documents.len(), count_after_insert);
    assert_eq!(
        repo.get(&process.id).unwrap().unwrap().title,
        "Segunda versão"
    );
}

#[test]
fn remove_is_idempotent_and_silent_on_absent_ids() {
    let conn = open_store_in_memory().unwrap();
    let repo = store(&conn);

    let process = Process::new("Descartável", "");
    repo.save(&process).unwrap();
    let baseline = repo.list().unwrap().len();

    repo.remove(&process.id).unwrap();
    assert_eq!(repo.list().unwrap().len(), baseline - 1);

    repo.remove(&process.id).unwrap();
    repo.remove("never-existed").unwrap();
    assert_eq!(repo.list().unwrap().len(), baseline - 1);
}

#[test]
fn toggle_favorite_flips_in_place_without_stamping() {
    let conn = open_store_in_memory().unwrap();
    let repo = store(&conn);

    let process = Process::new("Favorito", "");
    repo.save(&process).unwrap();
    let saved = repo.get(&process.id).unwrap().unwrap();
    assert!(!saved.is_favorite);

    repo.toggle_favorite(&process.id).unwrap();
    let toggled = repo.get(&process.id).unwrap().unwrap();
    assert!(toggled.is_favorite);
    assert_eq!(toggled.last_updated, saved.last_updated);

    repo.toggle_favorite("never-existed").unwrap();
    assert!(repo.get(&process.id).unwrap().unwrap().is_favorite);
}

#[test]
fn service_rejects_blank_titles_without_state_change() {
    let conn = open_store_in_memory().unwrap();
    let svc = service(&conn);

    let baseline = svc.list().unwrap().len();
    let untitled = Process::new("   ", "descrição sem título");

    let err = svc.save_document(&untitled).unwrap_err();
    assert!(matches!(err, ProcessServiceError::EmptyTitle));
    assert_eq!(svc.list().unwrap().len(), baseline);
}

#[test]
fn service_rejects_blocks_violating_checklist_invariant() {
    let conn = open_store_in_memory().unwrap();
    let svc = service(&conn);

    let mut process = Process::new("Processo quebrado", "");
    let block = process.blocks.append(BlockType::Checklist);
    let mut broken = process.blocks.get(&block.id).unwrap().clone();
    broken.checklist_items = None;
    process.blocks.update(broken);

    let err = svc.save_document(&process).unwrap_err();
    assert!(matches!(err, ProcessServiceError::Block(_)));
    assert!(svc.get(&process.id).unwrap().is_none());
}

#[test]
fn update_share_settings_persists_and_ignores_unknown_ids() {
    let conn = open_store_in_memory().unwrap();
    let svc = service(&conn);

    let process = Process::new("Compartilhado", "");
    svc.save_document(&process).unwrap();

    let settings = ShareSettings {
        visibility: ShareVisibility::Link,
        role: ShareRole::Editor,
    };
    svc.update_share_settings(&process.id, settings).unwrap();

    let stored = svc.get(&process.id).unwrap().unwrap();
    assert_eq!(stored.share_settings, settings);

    // Unknown id: silent no-op.
    svc.update_share_settings("never-existed", settings).unwrap();
}

#[test]
fn viewer_checklist_toggle_writes_through() {
    let conn = open_store_in_memory().unwrap();
    let svc = service(&conn);

    // The seeded sample carries a checklist block with a checked first item.
    let sample = svc.get("sample-1").unwrap().unwrap();
    let checklist = sample.blocks.get("b2").unwrap();
    let item = &checklist.checklist_items.as_deref().unwrap()[1];
    assert!(!item.checked);

    svc.toggle_checklist_item("sample-1", "b2", &item.id).unwrap();

    let reloaded = svc.get("sample-1").unwrap().unwrap();
    let items = reloaded
        .blocks
        .get("b2")
        .unwrap()
        .checklist_items
        .as_deref()
        .unwrap();
    assert!(items[1].checked);

    // Unknown ids at any level: silent no-op.
    svc.toggle_checklist_item("sample-1", "b2", "nope").unwrap();
    svc.toggle_checklist_item("nope", "b2", &item.id).unwrap();
}

#[test]
fn document_serialization_uses_expected_wire_fields() {
    let conn = open_store_in_memory().unwrap();
    let repo = store(&conn);

    let sample = repo.get("sample-1").unwrap().unwrap();
    let json = serde_json::to_value(&sample).unwrap();

    assert_eq!(json["id"], "sample-1");
    assert_eq!(json["isFavorite"], true);
    assert!(json["lastUpdated"].is_i64());
    assert_eq!(json["shareSettings"]["visibility"], "private");
    assert_eq!(json["shareSettings"]["role"], "viewer");
    assert_eq!(json["blocks"][1]["type"], "checklist");
    assert_eq!(json["blocks"][1]["checklistItems"][0]["checked"], true);

    let decoded: Process = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, sample);
}
