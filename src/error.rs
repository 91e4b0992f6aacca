//! Error types and handling for the nodesearch CLI

use serde::Serialize;
use std::fmt;

use crate::catalog::loader::CatalogError;

/// Application error types
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    CatalogLoadFailed(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::CatalogLoadFailed(msg) => write!(f, "Catalog load failed: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Get the stable error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::CatalogLoadFailed(_) => "catalog_load_failed",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert loader errors to AppError at the command boundary
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::CatalogLoadFailed(err.to_string())
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Validation for user-supplied free-text queries
pub fn validate_query(query: &str) -> Result<(), AppError> {
    // An empty query is meaningful: it selects the whole catalog.
    if query.len() > 500 {
        return Err(AppError::InvalidInput(
            "Query too long, maximum 500 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_valid() {
        assert!(validate_query("").is_ok());
    }

    #[test]
    fn test_query_length_limit() {
        assert!(validate_query(&"x".repeat(500)).is_ok());
        assert!(validate_query(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidInput("bad".into()).error_code(),
            "invalid_input"
        );
        assert_eq!(
            AppError::NotFound("missing".into()).error_code(),
            "not_found"
        );
    }
}
