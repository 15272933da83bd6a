//! Farewell ceremony operations for the store.
//!
//! # Responsibility
//! - Record each performed ceremony, keyed by the letter it farewells.
//! - Drive the letter lifecycle transition the ceremony stands for.
//!
//! # Invariants
//! - The ceremony record write and the letter mutation are two independent
//!   steps; a failure in the second leaves the record behind.
//! - Dove seals the letter (retained); sea deletes it (terminal).

use super::{decode, encode, LetterStore, StoreResult, CEREMONIES_COLLECTION};
use crate::model::ceremony::{CeremonyKind, FarewellCeremony};
use crate::model::letter::{LetterId, LetterPatch};
use crate::storage::StorageBackend;
use chrono::Utc;
use log::{error, info};

/// Input fields for performing a ceremony. The store stamps `performed_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CeremonyRequest {
    pub kind: CeremonyKind,
    pub letter_id: LetterId,
    pub message: Option<String>,
}

impl<B: StorageBackend> LetterStore<B> {
    /// Persists the ceremony record (overwriting any prior record for the
    /// same letter), then applies the letter transition: dove seals the
    /// letter, sea deletes it. Returns the stamped record.
    ///
    /// # Errors
    /// - `NotFound` when a dove ceremony targets a letter that does not
    ///   exist; the ceremony record has already been written at that point.
    pub fn perform_ceremony(
        &mut self,
        request: CeremonyRequest,
    ) -> StoreResult<FarewellCeremony> {
        let kind = kind_label(request.kind);
        let letter_id = request.letter_id;
        match self.perform_ceremony_inner(request) {
            Ok(record) => {
                info!(
                    "event=ceremony_perform module=store status=ok kind={kind} letter_id={letter_id}"
                );
                Ok(record)
            }
            Err(err) => {
                error!(
                    "event=ceremony_perform module=store status=error kind={kind} letter_id={letter_id} error={err}"
                );
                Err(err)
            }
        }
    }

    fn perform_ceremony_inner(
        &mut self,
        request: CeremonyRequest,
    ) -> StoreResult<FarewellCeremony> {
        let record = FarewellCeremony {
            kind: request.kind,
            letter_id: request.letter_id,
            performed_at: Utc::now(),
            message: request.message,
        };

        let payload = encode(&record)?;
        self.backend
            .set(CEREMONIES_COLLECTION, &record.letter_id.to_string(), &payload)?;

        match record.kind {
            CeremonyKind::Dove => {
                self.update_letter(record.letter_id, LetterPatch::seal())?;
            }
            CeremonyKind::Sea => {
                self.delete_letter(record.letter_id)?;
            }
        }

        Ok(record)
    }

    /// Point lookup with timestamp reconstitution. `Ok(None)` when no
    /// ceremony has been recorded for the letter.
    pub fn get_ceremony(&self, letter_id: LetterId) -> StoreResult<Option<FarewellCeremony>> {
        match self.get_ceremony_inner(letter_id) {
            Ok(found) => Ok(found),
            Err(err) => {
                error!(
                    "event=ceremony_get module=store status=error letter_id={letter_id} error={err}"
                );
                Err(err)
            }
        }
    }

    fn get_ceremony_inner(
        &self,
        letter_id: LetterId,
    ) -> StoreResult<Option<FarewellCeremony>> {
        let key = letter_id.to_string();
        match self.backend.get(CEREMONIES_COLLECTION, &key)? {
            Some(payload) => Ok(Some(decode(CEREMONIES_COLLECTION, &key, &payload)?)),
            None => Ok(None),
        }
    }
}

fn kind_label(kind: CeremonyKind) -> &'static str {
    match kind {
        CeremonyKind::Dove => "dove",
        CeremonyKind::Sea => "sea",
    }
}
