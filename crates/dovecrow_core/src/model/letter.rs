//! Letter domain model.
//!
//! # Responsibility
//! - Define the canonical persisted letter record and its lifecycle status.
//! - Provide patch-merge semantics for partial updates.
//!
//! # Invariants
//! - `id` is stable and never reused for another letter.
//! - `updated_at` is never earlier than `created_at`.
//! - Sealing retains the record; deletion removes it from storage entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a persisted letter.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type LetterId = Uuid;

/// Lifecycle status of a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    /// Editable and visible in the active view.
    Active,
    /// Retained but closed to further edits (dove ceremony).
    Sealed,
    /// Terminal marker. Deletion is physical, so no persisted record carries
    /// this status; it exists so a patch can express it.
    Deleted,
}

/// Canonical persisted letter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    /// Stable global ID used for storage keys and ceremony references.
    pub id: LetterId,
    pub title: String,
    pub content: String,
    /// Stamped once at save time.
    pub created_at: DateTime<Utc>,
    /// Re-stamped on every update. Never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
    pub status: LetterStatus,
    /// Optional addressee.
    pub recipient: Option<String>,
    /// Optional ordered tag list. Order is caller-defined and preserved.
    pub tags: Option<Vec<String>>,
}

/// Partial update over an existing letter. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<LetterStatus>,
    pub recipient: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl LetterPatch {
    /// Convenience patch that only moves the letter to `Sealed`.
    pub fn seal() -> Self {
        Self {
            status: Some(LetterStatus::Sealed),
            ..Self::default()
        }
    }
}

/// Validation failure for a letter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterValidationError {
    /// `updated_at` is earlier than `created_at`.
    UpdatedBeforeCreated {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

impl Display for LetterValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must be >= created_at ({created_at})"
            ),
        }
    }
}

impl Error for LetterValidationError {}

impl Letter {
    /// Checks record invariants.
    ///
    /// Called on write paths before persistence and on read paths after
    /// decoding, so invalid persisted state is rejected instead of masked.
    pub fn validate(&self) -> Result<(), LetterValidationError> {
        if self.updated_at < self.created_at {
            return Err(LetterValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Merges a partial update over this record.
    ///
    /// Does not touch timestamps; the store stamps `updated_at` separately.
    pub fn apply_patch(&mut self, patch: LetterPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(recipient) = patch.recipient {
            self.recipient = Some(recipient);
        }
        if let Some(tags) = patch.tags {
            self.tags = Some(tags);
        }
    }

    /// Returns whether this letter is open for editing.
    pub fn is_active(&self) -> bool {
        self.status == LetterStatus::Active
    }

    /// Returns whether this letter has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.status == LetterStatus::Sealed
    }
}
