use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Create payload is missing a required field or carries a bad value.
    #[error("invalid item: {0}")]
    Validation(String),
}

pub type Result<T> = StdResult<T, CatalogError>;
