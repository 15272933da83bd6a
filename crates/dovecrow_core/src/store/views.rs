//! Reactive view state and observer plumbing.
//!
//! # Responsibility
//! - Own the published views: letters, current draft, loading flag.
//! - Deliver change notifications synchronously with every view mutation.
//!
//! # Invariants
//! - Observers receive a snapshot of the changed view, never a live borrow.
//! - Derived letter views (active/sealed) follow from the letters snapshot.

use crate::model::draft::LetterDraft;
use crate::model::letter::Letter;

/// Handle returned by `subscribe`, used to unsubscribe.
pub type ObserverId = u64;

/// Change notification delivered to observers.
///
/// Each variant carries a snapshot of the view after the change took effect,
/// so consumers can re-render without re-borrowing the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The letters collection was replaced or mutated. Active/sealed
    /// projections derive from this snapshot by status.
    Letters(Vec<Letter>),
    /// The current draft was set or cleared.
    CurrentDraft(Option<LetterDraft>),
    /// The loading flag toggled.
    Loading(bool),
}

type ObserverCallback = Box<dyn FnMut(&ViewEvent)>;

struct Observer {
    id: ObserverId,
    callback: ObserverCallback,
}

/// View state owned by the store. Notification fires on every setter call,
/// including writes of an unchanged value.
pub(crate) struct Views {
    letters: Vec<Letter>,
    current_draft: Option<LetterDraft>,
    is_loading: bool,
    observers: Vec<Observer>,
    next_observer: ObserverId,
}

impl Views {
    pub(crate) fn new() -> Self {
        Self {
            letters: Vec::new(),
            current_draft: None,
            is_loading: false,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub(crate) fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub(crate) fn current_draft(&self) -> Option<&LetterDraft> {
        self.current_draft.as_ref()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub(crate) fn set_letters(&mut self, letters: Vec<Letter>) {
        self.letters = letters;
        self.emit_letters();
    }

    pub(crate) fn with_letters(&mut self, mutate: impl FnOnce(&mut Vec<Letter>)) {
        mutate(&mut self.letters);
        self.emit_letters();
    }

    pub(crate) fn set_current_draft(&mut self, draft: Option<LetterDraft>) {
        self.current_draft = draft;
        let event = ViewEvent::CurrentDraft(self.current_draft.clone());
        self.emit(event);
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.emit(ViewEvent::Loading(loading));
    }

    pub(crate) fn subscribe(
        &mut self,
        callback: impl FnMut(&ViewEvent) + 'static,
    ) -> ObserverId {
        let id = self.next_observer;
        self.next_observer += 1;
        self.observers.push(Observer {
            id,
            callback: Box::new(callback),
        });
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id != id);
        self.observers.len() != before
    }

    fn emit_letters(&mut self) {
        let event = ViewEvent::Letters(self.letters.clone());
        self.emit(event);
    }

    fn emit(&mut self, event: ViewEvent) {
        for observer in &mut self.observers {
            (observer.callback)(&event);
        }
    }
}
