//! Farewell ceremony domain model.
//!
//! # Responsibility
//! - Define the audit record written when a letter is given its farewell.
//!
//! # Invariants
//! - Records are keyed by `letter_id`; a second ceremony on the same letter
//!   overwrites the first.
//! - The record references a letter but does not own it; once the letter is
//!   deleted the record remains and points at nothing.

use crate::model::letter::LetterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two symbolic farewells a letter can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeremonyKind {
    /// Release the dove: the letter is sealed and retained.
    Dove,
    /// Sink into the sea: the letter is removed entirely.
    Sea,
}

/// Audit record for one performed ceremony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarewellCeremony {
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: CeremonyKind,
    pub letter_id: LetterId,
    /// Stamped when the ceremony is performed.
    pub performed_at: DateTime<Utc>,
    /// Optional parting message left with the record.
    pub message: Option<String>,
}
