//! crates/uniclass_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the organizer's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific implementations like the storage file or the assistant.

use crate::domain::Subject;
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Stored data could not be understood: {0}")]
    Corrupt(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The single durable location holding the entire subject collection.
///
/// Calls are synchronous; the store writes through on every mutation.
pub trait SubjectSlot: Send + Sync {
    /// Reads the persisted collection. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> PortResult<Option<Vec<Subject>>>;

    /// Replaces the persisted collection with `subjects`.
    fn save(&self, subjects: &[Subject]) -> PortResult<()>;
}

#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Produces a reply to `prompt` for a subject whose notes are `subject_notes`.
    async fn reply(&self, prompt: &str, subject_notes: &str) -> PortResult<String>;
}
