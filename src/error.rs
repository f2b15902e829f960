//! Service-level failures.

use thiserror::Error;

/// Failures surfaced by the entity services.
///
/// The HTTP layer maps each variant onto one status code; see
/// `api::error` for the mapping.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed field validation.
    #[error("{0}")]
    Validation(String),

    /// A referenced row does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The requested transition is not allowed in the current state.
    #[error("{0}")]
    Conflict(String),

    /// The breed catalog could not be consulted.
    #[error("breed lookup failed: {0}")]
    BreedLookup(String),

    /// Database or other unexpected failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}
