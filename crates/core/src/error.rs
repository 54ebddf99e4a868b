//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Closed set of failures a catalog operation can report.
///
/// Store drivers and IO errors are reduced to one of these before they reach
/// the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Input failed presence/type checks (missing field, bad number, malformed id).
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record exists for the requested id.
    #[error("not found")]
    NotFound,

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
