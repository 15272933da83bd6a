//! Letter store: persistence plus reactive view state.
//!
//! # Responsibility
//! - Own the three persisted collections (letters, drafts, ceremonies) and
//!   the settings record behind one storage backend.
//! - Publish the reactive views the UI observes and notify on every change.
//!
//! # Invariants
//! - All view mutation happens through store operations; every successful
//!   mutating operation updates its view synchronously.
//! - Record payloads are JSON; date fields are reconstituted here on read,
//!   never by the backend.
//! - There is no transaction spanning multiple collection writes.

use crate::model::draft::LetterDraft;
use crate::model::letter::{Letter, LetterId, LetterValidationError};
use crate::storage::{StorageBackend, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod ceremonies;
pub mod drafts;
pub mod letters;
pub mod settings;
pub mod views;

pub use ceremonies::CeremonyRequest;
pub use drafts::DraftInput;
pub use letters::NewLetter;

use views::{ObserverId, ViewEvent, Views};

pub(crate) const LETTERS_COLLECTION: &str = "letters";
pub(crate) const DRAFTS_COLLECTION: &str = "drafts";
pub(crate) const CEREMONIES_COLLECTION: &str = "ceremonies";
pub(crate) const SETTINGS_COLLECTION: &str = "settings";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The referenced letter does not exist in storage.
    NotFound(LetterId),
    /// The underlying persistence call failed.
    Backend(StorageError),
    /// A record failed its own invariants.
    Validation(LetterValidationError),
    /// A persisted payload could not be decoded.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "letter not found: {id}"),
            Self::Backend(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted record data: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Backend(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Backend(value)
    }
}

impl From<LetterValidationError> for StoreError {
    fn from(value: LetterValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Persistence-and-view manager for the letter-writing session.
///
/// Constructed once per application session. Owns the backend and all
/// reactive view state; UI layers observe through [`LetterStore::subscribe`]
/// and read through the view accessors.
pub struct LetterStore<B: StorageBackend> {
    backend: B,
    views: Views,
}

impl<B: StorageBackend> LetterStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            views: Views::new(),
        }
    }

    /// All loaded letters. Newest first after a load; a freshly saved letter
    /// is prepended regardless of its timestamp.
    pub fn letters(&self) -> &[Letter] {
        self.views.letters()
    }

    /// Letters still open for editing.
    pub fn active_letters(&self) -> Vec<&Letter> {
        self.views
            .letters()
            .iter()
            .filter(|letter| letter.is_active())
            .collect()
    }

    /// Letters sealed by a dove ceremony.
    pub fn sealed_letters(&self) -> Vec<&Letter> {
        self.views
            .letters()
            .iter()
            .filter(|letter| letter.is_sealed())
            .collect()
    }

    /// The single draft currently bound to the editor view, if any.
    pub fn current_draft(&self) -> Option<&LetterDraft> {
        self.views.current_draft()
    }

    /// Whether a letters load is in flight.
    pub fn is_loading(&self) -> bool {
        self.views.is_loading()
    }

    /// Registers an observer for view changes. The callback runs
    /// synchronously inside the mutating operation, after the in-memory
    /// effect is applied.
    pub fn subscribe(&mut self, callback: impl FnMut(&ViewEvent) + 'static) -> ObserverId {
        self.views.subscribe(callback)
    }

    /// Removes a previously registered observer. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.views.unsubscribe(id)
    }
}

fn encode<T: Serialize>(record: &T) -> StoreResult<String> {
    serde_json::to_string(record)
        .map_err(|err| StoreError::InvalidData(format!("failed to serialize record: {err}")))
}

fn decode<T: DeserializeOwned>(collection: &str, key: &str, payload: &str) -> StoreResult<T> {
    serde_json::from_str(payload)
        .map_err(|err| StoreError::InvalidData(format!("record `{key}` in {collection}: {err}")))
}
