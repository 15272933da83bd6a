//! Draft operations for the store.
//!
//! # Responsibility
//! - Persist in-progress letter content keyed by the draft's own id.
//! - Maintain the single current-draft reactive view.
//!
//! # Invariants
//! - Saving or loading a draft makes it the current draft, replacing any
//!   previous one even under a different id.
//! - Deleting a draft clears the current-draft view only when the current
//!   draft is the one deleted.

use super::{decode, encode, LetterStore, StoreResult, DRAFTS_COLLECTION};
use crate::model::draft::{DraftId, LetterDraft};
use crate::storage::StorageBackend;
use chrono::Utc;
use log::error;

/// Input fields for saving a draft. The id is caller-provided; the store
/// stamps `last_saved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftInput {
    pub id: DraftId,
    pub title: String,
    pub content: String,
}

impl<B: StorageBackend> LetterStore<B> {
    /// Persists the draft with a fresh `last_saved` stamp and makes it the
    /// current draft. Returns the stamped record.
    pub fn save_draft(&mut self, input: DraftInput) -> StoreResult<LetterDraft> {
        match self.save_draft_inner(input) {
            Ok(draft) => Ok(draft),
            Err(err) => {
                error!("event=draft_save module=store status=error error={err}");
                Err(err)
            }
        }
    }

    fn save_draft_inner(&mut self, input: DraftInput) -> StoreResult<LetterDraft> {
        let draft = LetterDraft {
            id: input.id,
            title: input.title,
            content: input.content,
            last_saved: Utc::now(),
        };

        let payload = encode(&draft)?;
        self.backend
            .set(DRAFTS_COLLECTION, &draft.id.to_string(), &payload)?;

        self.views.set_current_draft(Some(draft.clone()));
        Ok(draft)
    }

    /// Point lookup. When found, the draft becomes the current draft; when
    /// absent, current-draft state is left untouched.
    pub fn load_draft(&mut self, id: DraftId) -> StoreResult<Option<LetterDraft>> {
        match self.load_draft_inner(id) {
            Ok(found) => Ok(found),
            Err(err) => {
                error!("event=draft_load module=store status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    fn load_draft_inner(&mut self, id: DraftId) -> StoreResult<Option<LetterDraft>> {
        let key = id.to_string();
        match self.backend.get(DRAFTS_COLLECTION, &key)? {
            Some(payload) => {
                let draft: LetterDraft = decode(DRAFTS_COLLECTION, &key, &payload)?;
                self.views.set_current_draft(Some(draft.clone()));
                Ok(Some(draft))
            }
            None => Ok(None),
        }
    }

    /// Removes the persisted draft. Absence of the id is not an error.
    pub fn delete_draft(&mut self, id: DraftId) -> StoreResult<()> {
        match self.delete_draft_inner(id) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("event=draft_delete module=store status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    fn delete_draft_inner(&mut self, id: DraftId) -> StoreResult<()> {
        self.backend.remove(DRAFTS_COLLECTION, &id.to_string())?;

        // Deleting an unrelated draft leaves the one on screen alone.
        if self
            .views
            .current_draft()
            .is_some_and(|draft| draft.id == id)
        {
            self.views.set_current_draft(None);
        }
        Ok(())
    }
}
