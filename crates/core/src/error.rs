//! Domain error type shared across crates.

use crate::types::DbId;

/// Errors raised by domain logic and propagated to the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by id matched no row visible to the caller.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Submitted form data failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}
