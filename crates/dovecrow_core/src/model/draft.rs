//! Letter draft domain model.
//!
//! Drafts carry in-progress, unsaved letter content. They live in their own
//! collection, independent of finalized letters, and at most one draft is
//! "current" in the reactive view at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a draft. Caller-provided; a draft's identity is
/// independent of any letter id it may later be saved as.
pub type DraftId = Uuid;

/// Persisted in-progress letter content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterDraft {
    pub id: DraftId,
    pub title: String,
    pub content: String,
    /// Re-stamped on every save.
    pub last_saved: DateTime<Utc>,
}
