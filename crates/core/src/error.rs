use crate::types::DbId;

/// Domain-level error type shared across the workspace.
///
/// Maps 1:1 onto HTTP semantics in the api crate's `AppError`, but stays
/// transport-agnostic here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity does not exist, or does not belong to the caller.
    /// Ownership failures use this variant too so non-owners cannot
    /// distinguish "absent" from "not yours".
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or out-of-range caller input. The message names the
    /// offending field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request is well-formed but conflicts with current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An invariant the domain relies on was broken.
    #[error("Internal error: {0}")]
    Internal(String),
}
