//! Core domain logic for Dove and Crow, a personal letter-writing app.
//! This crate is the single source of truth for letter lifecycle invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ceremony::{CeremonyKind, FarewellCeremony};
pub use model::draft::{DraftId, LetterDraft};
pub use model::letter::{Letter, LetterId, LetterPatch, LetterStatus, LetterValidationError};
pub use model::settings::{AppSettings, Theme};
pub use storage::{SqliteStorage, StorageBackend, StorageError, StorageResult};
pub use store::views::{ObserverId, ViewEvent};
pub use store::{CeremonyRequest, DraftInput, LetterStore, NewLetter, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
