//! Letter operations for the store.
//!
//! # Responsibility
//! - Provide load/save/update/delete/get over the letters collection.
//! - Keep the reactive letters view in step with every successful mutation.
//!
//! # Invariants
//! - The loading flag is true for the duration of a load, regardless of
//!   success or failure.
//! - A freshly saved letter is prepended to the view without re-sorting.
//! - Updates replace the matching view entry in place, position unchanged.

use super::{decode, encode, LetterStore, StoreError, StoreResult, LETTERS_COLLECTION};
use crate::model::letter::{Letter, LetterId, LetterPatch, LetterStatus};
use crate::storage::StorageBackend;
use chrono::Utc;
use log::{error, info};
use std::time::Instant;
use uuid::Uuid;

/// Input fields for saving a new letter. Identity, status and timestamps
/// are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLetter {
    pub title: String,
    pub content: String,
    pub recipient: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl<B: StorageBackend> LetterStore<B> {
    /// Reads all persisted letters, sorts them newest first by creation
    /// time, and replaces the reactive collection.
    ///
    /// # Side effects
    /// - Toggles the loading view on entry and off on exit, even on failure.
    pub fn load_letters(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        self.views.set_loading(true);
        let result = self.load_letters_inner();
        self.views.set_loading(false);

        match &result {
            Ok(count) => info!(
                "event=letters_load module=store status=ok count={count} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=letters_load module=store status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }

        result.map(|_| ())
    }

    fn load_letters_inner(&mut self) -> StoreResult<usize> {
        let mut letters = Vec::new();
        let mut decode_failure: Option<StoreError> = None;
        self.backend
            .iterate(LETTERS_COLLECTION, &mut |key, payload| {
                if decode_failure.is_some() {
                    return;
                }
                match decode_letter(key, payload) {
                    Ok(letter) => letters.push(letter),
                    Err(err) => decode_failure = Some(err),
                }
            })?;
        if let Some(err) = decode_failure {
            return Err(err);
        }

        letters.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let count = letters.len();
        self.views.set_letters(letters);
        Ok(count)
    }

    /// Persists a new letter built from `input` and prepends it to the
    /// reactive collection. Returns the generated id.
    pub fn save_letter(&mut self, input: NewLetter) -> StoreResult<LetterId> {
        match self.save_letter_inner(input) {
            Ok(id) => Ok(id),
            Err(err) => {
                error!("event=letter_save module=store status=error error={err}");
                Err(err)
            }
        }
    }

    fn save_letter_inner(&mut self, input: NewLetter) -> StoreResult<LetterId> {
        let now = Utc::now();
        let letter = Letter {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
            status: LetterStatus::Active,
            recipient: input.recipient,
            tags: input.tags,
        };
        letter.validate()?;

        let payload = encode(&letter)?;
        self.backend
            .set(LETTERS_COLLECTION, &letter.id.to_string(), &payload)?;

        let id = letter.id;
        self.views.with_letters(|letters| letters.insert(0, letter));
        Ok(id)
    }

    /// Merges `patch` over the persisted letter, re-stamps `updated_at` and
    /// replaces the matching view entry in place.
    ///
    /// # Errors
    /// - `NotFound` when no letter with `id` is persisted.
    pub fn update_letter(&mut self, id: LetterId, patch: LetterPatch) -> StoreResult<()> {
        match self.update_letter_inner(id, patch) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("event=letter_update module=store status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    fn update_letter_inner(&mut self, id: LetterId, patch: LetterPatch) -> StoreResult<()> {
        let key = id.to_string();
        let Some(payload) = self.backend.get(LETTERS_COLLECTION, &key)? else {
            return Err(StoreError::NotFound(id));
        };

        let mut letter = decode_letter(&key, &payload)?;
        letter.apply_patch(patch);
        letter.updated_at = Utc::now();
        letter.validate()?;

        let encoded = encode(&letter)?;
        self.backend.set(LETTERS_COLLECTION, &key, &encoded)?;

        self.views.with_letters(|letters| {
            if let Some(slot) = letters.iter_mut().find(|entry| entry.id == id) {
                *slot = letter;
            }
        });
        Ok(())
    }

    /// Removes the persisted letter and drops it from the reactive
    /// collection. Absence of the id is not an error.
    pub fn delete_letter(&mut self, id: LetterId) -> StoreResult<()> {
        match self.delete_letter_inner(id) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("event=letter_delete module=store status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    fn delete_letter_inner(&mut self, id: LetterId) -> StoreResult<()> {
        self.backend.remove(LETTERS_COLLECTION, &id.to_string())?;
        self.views
            .with_letters(|letters| letters.retain(|entry| entry.id != id));
        Ok(())
    }

    /// Point lookup with timestamp reconstitution. `Ok(None)` when absent.
    pub fn get_letter(&self, id: LetterId) -> StoreResult<Option<Letter>> {
        match self.get_letter_inner(id) {
            Ok(found) => Ok(found),
            Err(err) => {
                error!("event=letter_get module=store status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    fn get_letter_inner(&self, id: LetterId) -> StoreResult<Option<Letter>> {
        let key = id.to_string();
        match self.backend.get(LETTERS_COLLECTION, &key)? {
            Some(payload) => Ok(Some(decode_letter(&key, &payload)?)),
            None => Ok(None),
        }
    }
}

fn decode_letter(key: &str, payload: &str) -> StoreResult<Letter> {
    let letter: Letter = decode(LETTERS_COLLECTION, key, payload)?;
    letter.validate()?;
    Ok(letter)
}
