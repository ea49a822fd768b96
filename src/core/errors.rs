//! Shared error types for the engine.

use thiserror::Error;

use crate::store::StoreError;

/// Main error type for report generation.
///
/// A report is all-or-nothing: any of these aborts the whole document,
/// never a partially populated one. "No data" is not an error (see the
/// `Option` statistics on the summary types).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The root entity of a report request does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// Upstream store failure, surfaced unchanged. Retry policy belongs
    /// to the store client, not the engine.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
