//! Domain models for letters, drafts, ceremonies and settings.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep serialization shapes stable for the storage codec.
//!
//! # Invariants
//! - Every record is identified by a stable UUID-based id.
//! - Timestamps are `DateTime<Utc>` in memory and RFC 3339 in storage.

pub mod ceremony;
pub mod draft;
pub mod letter;
pub mod settings;
