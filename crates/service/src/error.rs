//! Typed error enum for the service layer.

use catalog_core::CatalogError;
use catalog_storage::StorageError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Reading or writing the collection failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// No item matches the requested id.
    #[error("item '{id}' not found")]
    NotFound { id: String },

    /// Create payload failed validation.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<CatalogError> for ServiceError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => Self::Validation(msg),
        }
    }
}
