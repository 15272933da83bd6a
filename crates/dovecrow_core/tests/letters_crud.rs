use dovecrow_core::{
    LetterPatch, LetterStatus, LetterStore, NewLetter, SqliteStorage, StoreError,
};
use std::thread::sleep;
use std::time::Duration;
use uuid::Uuid;

fn store() -> LetterStore<SqliteStorage> {
    LetterStore::new(SqliteStorage::open_in_memory().unwrap())
}

fn letter_input(title: &str, content: &str) -> NewLetter {
    NewLetter {
        title: title.to_string(),
        content: content.to_string(),
        ..NewLetter::default()
    }
}

#[test]
fn save_and_get_round_trip_preserves_fields() {
    let mut store = store();

    let input = NewLetter {
        title: "First".to_string(),
        content: "body".to_string(),
        recipient: Some("Dove".to_string()),
        tags: Some(vec!["b".to_string(), "a".to_string()]),
    };
    let id = store.save_letter(input).unwrap();

    let loaded = store.get_letter(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "First");
    assert_eq!(loaded.content, "body");
    assert_eq!(loaded.status, LetterStatus::Active);
    assert_eq!(loaded.recipient.as_deref(), Some("Dove"));
    assert_eq!(
        loaded.tags,
        Some(vec!["b".to_string(), "a".to_string()]),
        "tag order is caller-defined and preserved"
    );
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn save_prepends_to_view_head_exactly_once() {
    let mut store = store();

    let first = store.save_letter(letter_input("first", "a")).unwrap();
    let second = store.save_letter(letter_input("second", "b")).unwrap();

    let ids: Vec<_> = store.letters().iter().map(|letter| letter.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(ids.iter().filter(|id| **id == second).count(), 1);
}

#[test]
fn load_letters_sorts_newest_first_and_replaces_view() {
    let mut store = store();

    let oldest = store.save_letter(letter_input("oldest", "a")).unwrap();
    sleep(Duration::from_millis(2));
    let middle = store.save_letter(letter_input("middle", "b")).unwrap();
    sleep(Duration::from_millis(2));
    let newest = store.save_letter(letter_input("newest", "c")).unwrap();

    store.load_letters().unwrap();

    let ids: Vec<_> = store.letters().iter().map(|letter| letter.id).collect();
    assert_eq!(ids, vec![newest, middle, oldest]);
    assert!(!store.is_loading());
}

#[test]
fn loaded_letters_round_trip_timestamps_as_equivalent_instants() {
    let mut store = store();

    let id = store.save_letter(letter_input("stamped", "body")).unwrap();
    let saved = store.letters()[0].clone();

    store.load_letters().unwrap();

    let reloaded = store
        .letters()
        .iter()
        .find(|letter| letter.id == id)
        .unwrap();
    assert_eq!(reloaded.created_at, saved.created_at);
    assert_eq!(reloaded.updated_at, saved.updated_at);
}

#[test]
fn update_merges_partial_fields_and_restamps() {
    let mut store = store();

    let id = store.save_letter(letter_input("draft", "body")).unwrap();
    let before = store.get_letter(id).unwrap().unwrap();

    sleep(Duration::from_millis(2));
    store
        .update_letter(
            id,
            LetterPatch {
                title: Some("final".to_string()),
                ..LetterPatch::default()
            },
        )
        .unwrap();

    let after = store.get_letter(id).unwrap().unwrap();
    assert_eq!(after.title, "final");
    assert_eq!(after.content, before.content);
    assert_eq!(after.status, before.status);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[test]
fn update_replaces_view_entry_in_place() {
    let mut store = store();

    let first = store.save_letter(letter_input("first", "a")).unwrap();
    let _second = store.save_letter(letter_input("second", "b")).unwrap();
    let _third = store.save_letter(letter_input("third", "c")).unwrap();

    store
        .update_letter(
            first,
            LetterPatch {
                content: Some("rewritten".to_string()),
                ..LetterPatch::default()
            },
        )
        .unwrap();

    // first was saved first, so it sits at the tail of the view.
    let entry = &store.letters()[2];
    assert_eq!(entry.id, first);
    assert_eq!(entry.content, "rewritten");
}

#[test]
fn update_unknown_id_fails_not_found_and_changes_nothing() {
    let mut store = store();

    let id = store.save_letter(letter_input("kept", "body")).unwrap();
    let before = store.get_letter(id).unwrap().unwrap();
    let missing = Uuid::new_v4();

    let err = store
        .update_letter(
            missing,
            LetterPatch {
                title: Some("ghost".to_string()),
                ..LetterPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(found) if found == missing));
    assert_eq!(store.letters().len(), 1);
    assert_eq!(store.get_letter(id).unwrap().unwrap(), before);
}

#[test]
fn seal_update_changes_only_status_and_updated_at() {
    let mut store = store();

    let id = store.save_letter(letter_input("kept", "body")).unwrap();
    let before = store.get_letter(id).unwrap().unwrap();

    sleep(Duration::from_millis(2));
    store.update_letter(id, LetterPatch::seal()).unwrap();

    let after = store.get_letter(id).unwrap().unwrap();
    assert_eq!(after.status, LetterStatus::Sealed);
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.id, before.id);
    assert_eq!(after.title, before.title);
    assert_eq!(after.content, before.content);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.recipient, before.recipient);
    assert_eq!(after.tags, before.tags);
}

#[test]
fn delete_removes_letter_from_view_and_storage() {
    let mut store = store();

    let id = store.save_letter(letter_input("doomed", "body")).unwrap();
    store.delete_letter(id).unwrap();

    assert!(store.get_letter(id).unwrap().is_none());
    assert!(store.letters().is_empty());
}

#[test]
fn delete_unknown_id_is_a_noop() {
    let mut store = store();

    let id = store.save_letter(letter_input("kept", "body")).unwrap();
    store.delete_letter(Uuid::new_v4()).unwrap();

    assert_eq!(store.letters().len(), 1);
    assert!(store.get_letter(id).unwrap().is_some());
}

#[test]
fn get_unknown_id_returns_none() {
    let store = store();
    assert!(store.get_letter(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn active_and_sealed_views_partition_by_status() {
    let mut store = store();

    let active_a = store.save_letter(letter_input("a", "1")).unwrap();
    let active_b = store.save_letter(letter_input("b", "2")).unwrap();
    let sealed = store.save_letter(letter_input("c", "3")).unwrap();
    store.update_letter(sealed, LetterPatch::seal()).unwrap();

    let active_ids: Vec<_> = store
        .active_letters()
        .iter()
        .map(|letter| letter.id)
        .collect();
    let sealed_ids: Vec<_> = store
        .sealed_letters()
        .iter()
        .map(|letter| letter.id)
        .collect();
    let all_ids: Vec<_> = store.letters().iter().map(|letter| letter.id).collect();

    assert!(active_ids.contains(&active_a));
    assert!(active_ids.contains(&active_b));
    assert!(!active_ids.contains(&sealed));
    assert_eq!(sealed_ids, vec![sealed]);
    for id in active_ids.iter().chain(sealed_ids.iter()) {
        assert!(all_ids.contains(id));
    }
}

#[test]
fn letters_survive_a_fresh_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("letters.db");

    let id = {
        let mut store = LetterStore::new(SqliteStorage::open(&path).unwrap());
        store.save_letter(letter_input("kept", "across sessions")).unwrap()
    };

    let mut store = LetterStore::new(SqliteStorage::open(&path).unwrap());
    assert!(store.letters().is_empty());

    store.load_letters().unwrap();
    assert_eq!(store.letters().len(), 1);
    assert_eq!(store.letters()[0].id, id);
    assert_eq!(store.letters()[0].content, "across sessions");
}
