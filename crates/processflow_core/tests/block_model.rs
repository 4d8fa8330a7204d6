use processflow_core::{Block, BlockList, BlockType, BlockValidationError, ChecklistItem};

fn list_of_texts(n: usize) -> (BlockList, Vec<String>) {
    let mut blocks = BlockList::new();
    let mut ids = Vec::new();
    for i in 0..n {
        let block = blocks.append(BlockType::Text);
        blocks.update(Block {
            content: format!("block {i}"),
            ..block.clone()
        });
        ids.push(block.id);
    }
    (blocks, ids)
}

fn order(blocks: &BlockList) -> Vec<String> {
    blocks.blocks().iter().map(|block| block.id.clone()).collect()
}

#[test]
fn append_creates_defaults_per_kind() {
    let mut blocks = BlockList::new();

    for kind in [
        BlockType::Text,
        BlockType::Image,
        BlockType::Video,
        BlockType::Audio,
    ] {
        let block = blocks.append(kind);
        assert_eq!(block.kind, kind);
        assert!(block.content.is_empty());
        assert!(block.checklist_items.is_none());
        assert!(block.validate().is_ok());
    }

    let checklist = blocks.append(BlockType::Checklist);
    let items = checklist.checklist_items.as_deref().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].text.is_empty());
    assert!(!items[0].checked);
}

#[test]
fn append_then_read_back_yields_block_at_tail() {
    let mut blocks = BlockList::new();
    blocks.append(BlockType::Text);
    let created = blocks.append(BlockType::Image);

    let tail = blocks.blocks().last().unwrap();
    assert_eq!(tail.id, created.id);
    assert_eq!(tail.kind, BlockType::Image);
    assert_eq!(blocks.len(), 2);
}

#[test]
fn update_replaces_exactly_one_block() {
    let (mut blocks, ids) = list_of_texts(3);

    let mut patched = blocks.get(&ids[1]).unwrap().clone();
    patched.content = "edited".to_string();
    blocks.update(patched);

    assert_eq!(blocks.len(), 3);
    assert_eq!(order(&blocks), ids);
    assert_eq!(blocks.get(&ids[0]).unwrap().content, "block 0");
    assert_eq!(blocks.get(&ids[1]).unwrap().content, "edited");
    assert_eq!(blocks.get(&ids[2]).unwrap().content, "block 2");
}

#[test]
fn update_with_unknown_id_is_a_no_op() {
    let (mut blocks, ids) = list_of_texts(2);
    let before = blocks.clone();

    let mut stray = Block::new(BlockType::Text);
    stray.content = "never stored".to_string();
    blocks.update(stray);

    assert_eq!(blocks, before);
    assert_eq!(order(&blocks), ids);
}

#[test]
fn remove_is_idempotent() {
    let (mut blocks, ids) = list_of_texts(3);

    blocks.remove(&ids[1]);
    assert_eq!(blocks.len(), 2);

    blocks.remove(&ids[1]);
    assert_eq!(blocks.len(), 2);
    assert_eq!(order(&blocks), vec![ids[0].clone(), ids[2].clone()]);
}

#[test]
fn move_to_splices_instead_of_swapping() {
    let (mut blocks, ids) = list_of_texts(4);

    // Dragging the first block past two others: everything in between
    // shifts up by exactly one slot.
    blocks.move_to(0, 2);
    assert_eq!(
        order(&blocks),
        vec![ids[1].clone(), ids[2].clone(), ids[0].clone(), ids[3].clone()]
    );

    blocks.move_to(3, 1);
    assert_eq!(
        order(&blocks),
        vec![ids[1].clone(), ids[3].clone(), ids[2].clone(), ids[0].clone()]
    );
}

#[test]
fn move_then_inverse_move_restores_order() {
    let (mut blocks, ids) = list_of_texts(5);

    blocks.move_to(1, 4);
    blocks.move_to(4, 1);
    assert_eq!(order(&blocks), ids);
}

#[test]
fn move_to_ignores_out_of_range_and_equal_indices() {
    let (mut blocks, ids) = list_of_texts(3);

    blocks.move_to(1, 1);
    blocks.move_to(3, 0);
    blocks.move_to(0, 3);
    assert_eq!(order(&blocks), ids);
}

#[test]
fn checklist_item_operations_key_by_id() {
    let mut blocks = BlockList::new();
    let checklist = blocks.append(BlockType::Checklist);
    let first_item = checklist.checklist_items.as_deref().unwrap()[0].id.clone();

    blocks.update_item(&checklist.id, &first_item, "configurar ambiente");
    blocks.toggle_item(&checklist.id, &first_item);
    blocks.add_item(&checklist.id);

    let stored = blocks.get(&checklist.id).unwrap();
    let items = stored.checklist_items.as_deref().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text, "configurar ambiente");
    assert!(items[0].checked);
    assert!(!items[1].checked);

    blocks.remove_item(&checklist.id, &first_item);
    let stored = blocks.get(&checklist.id).unwrap();
    assert_eq!(stored.checklist_items.as_deref().unwrap().len(), 1);
}

#[test]
fn checklist_item_operations_ignore_unknown_ids_and_non_checklists() {
    let mut blocks = BlockList::new();
    let text = blocks.append(BlockType::Text);
    let checklist = blocks.append(BlockType::Checklist);
    let before = blocks.clone();

    blocks.toggle_item(&text.id, "nope");
    blocks.update_item(&checklist.id, "nope", "ignored");
    blocks.remove_item(&checklist.id, "nope");
    blocks.add_item(&text.id);

    assert_eq!(blocks, before);
}

#[test]
fn validate_enforces_checklist_payload_invariant() {
    let mut checklist = Block::new(BlockType::Checklist);
    checklist.checklist_items = None;
    assert!(matches!(
        checklist.validate(),
        Err(BlockValidationError::ChecklistItemsMissing { .. })
    ));

    let mut text = Block::new(BlockType::Text);
    text.checklist_items = Some(vec![ChecklistItem::new()]);
    assert!(matches!(
        text.validate(),
        Err(BlockValidationError::ChecklistItemsUnexpected { .. })
    ));
}

#[test]
fn block_serialization_uses_expected_wire_fields() {
    let mut blocks = BlockList::new();
    let text = blocks.append(BlockType::Text);
    blocks.append(BlockType::Checklist);

    let json = serde_json::to_value(blocks.blocks()).unwrap();
    assert_eq!(json[0]["id"], text.id);
    assert_eq!(json[0]["type"], "text");
    assert_eq!(json[0]["content"], "");
    // Non-checklist blocks omit the item list entirely.
    assert!(json[0].get("checklistItems").is_none());

    assert_eq!(json[1]["type"], "checklist");
    assert_eq!(json[1]["checklistItems"].as_array().unwrap().len(), 1);
    assert_eq!(json[1]["checklistItems"][0]["checked"], false);

    let decoded: Vec<Block> = serde_json::from_value(json).unwrap();
    assert_eq!(BlockList::from(decoded), blocks);
}
