use dovecrow_core::{
    CeremonyKind, CeremonyRequest, DraftInput, LetterPatch, LetterStore, NewLetter,
    SqliteStorage, StorageBackend, StorageError, StorageResult, StoreError, ViewEvent,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use uuid::Uuid;

/// Backend wrapper that rejects every call while the shared switch is on.
struct FlakyBackend {
    inner: SqliteStorage,
    failing: Rc<Cell<bool>>,
}

impl FlakyBackend {
    fn reject<T>(&self) -> StorageResult<T> {
        Err(StorageError::Unavailable("injected failure".to_string()))
    }
}

impl StorageBackend for FlakyBackend {
    fn get(&self, collection: &str, key: &str) -> StorageResult<Option<String>> {
        if self.failing.get() {
            return self.reject();
        }
        self.inner.get(collection, key)
    }

    fn set(&mut self, collection: &str, key: &str, value: &str) -> StorageResult<()> {
        if self.failing.get() {
            return self.reject();
        }
        self.inner.set(collection, key, value)
    }

    fn remove(&mut self, collection: &str, key: &str) -> StorageResult<()> {
        if self.failing.get() {
            return self.reject();
        }
        self.inner.remove(collection, key)
    }

    fn iterate(
        &self,
        collection: &str,
        visit: &mut dyn FnMut(&str, &str),
    ) -> StorageResult<()> {
        if self.failing.get() {
            return self.reject();
        }
        self.inner.iterate(collection, visit)
    }
}

fn flaky_store() -> (LetterStore<FlakyBackend>, Rc<Cell<bool>>) {
    let failing = Rc::new(Cell::new(false));
    let backend = FlakyBackend {
        inner: SqliteStorage::open_in_memory().unwrap(),
        failing: Rc::clone(&failing),
    };
    (LetterStore::new(backend), failing)
}

fn letter_input(title: &str) -> NewLetter {
    NewLetter {
        title: title.to_string(),
        content: "body".to_string(),
        ..NewLetter::default()
    }
}

#[test]
fn save_letter_propagates_backend_failure_and_leaves_view_unchanged() {
    let (mut store, failing) = flaky_store();
    store.save_letter(letter_input("kept")).unwrap();

    failing.set(true);
    let err = store.save_letter(letter_input("lost")).unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
    assert_eq!(store.letters().len(), 1);
    assert_eq!(store.letters()[0].title, "kept");
}

#[test]
fn load_letters_failure_still_resets_the_loading_flag() {
    let (mut store, failing) = flaky_store();
    store.save_letter(letter_input("kept")).unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event| {
        if let ViewEvent::Loading(flag) = event {
            sink.borrow_mut().push(*flag);
        }
    });

    failing.set(true);
    let err = store.load_letters().unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
    assert!(!store.is_loading());
    assert_eq!(*events.borrow(), vec![true, false]);
    assert_eq!(store.letters().len(), 1, "view keeps its previous contents");
}

#[test]
fn get_letter_propagates_backend_failure() {
    let (mut store, failing) = flaky_store();
    let id = store.save_letter(letter_input("kept")).unwrap();

    failing.set(true);
    let err = store.get_letter(id).unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
}

#[test]
fn update_letter_propagates_backend_failure_before_not_found() {
    let (mut store, failing) = flaky_store();

    failing.set(true);
    let err = store
        .update_letter(Uuid::new_v4(), LetterPatch::seal())
        .unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
}

#[test]
fn ceremony_record_write_failure_mutates_nothing() {
    let (mut store, failing) = flaky_store();
    let id = store.save_letter(letter_input("kept")).unwrap();

    failing.set(true);
    let err = store
        .perform_ceremony(CeremonyRequest {
            kind: CeremonyKind::Sea,
            letter_id: id,
            message: None,
        })
        .unwrap_err();
    failing.set(false);

    assert!(matches!(err, StoreError::Backend(_)));
    assert!(store.get_ceremony(id).unwrap().is_none());
    assert!(store.get_letter(id).unwrap().is_some());
}

#[test]
fn draft_save_propagates_backend_failure_without_touching_current() {
    let (mut store, failing) = flaky_store();

    failing.set(true);
    let err = store
        .save_draft(DraftInput {
            id: Uuid::new_v4(),
            title: "lost".to_string(),
            content: "text".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
    assert!(store.current_draft().is_none());
}
