//! Error types for the catalog service.

use crate::domain::ProductId;
use crate::ports::ExchangeError;

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Each variant carries the status code it is surfaced with, see
/// [`AppError::status`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid currency abbreviation: {0}")]
    InvalidCurrency(String),

    #[error("Product with id: {0} does not exist.")]
    ProductNotFound(ProductId),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            AppError::InvalidCurrency(_) | AppError::BadRequest(_) => 400,
            AppError::ProductNotFound(_) => 404,
            AppError::Internal(_) => 500,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_currency_message() {
        let err = AppError::InvalidCurrency("PLN".into());
        assert_eq!(err.to_string(), "Invalid currency abbreviation: PLN");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_product_not_found_message() {
        let err = AppError::ProductNotFound(ProductId::new(500));
        assert_eq!(err.to_string(), "Product with id: 500 does not exist.");
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn test_adapter_errors_are_internal() {
        let err: AppError = RepoError::Database("disk full".into()).into();
        assert_eq!(err.status(), 500);

        let err: AppError = ExchangeError::ServiceUnavailable("timeout".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
