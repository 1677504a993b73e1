use shared::ErrorCode;
use thiserror::Error;

/// Errors that stop a submission before any line item is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select at least one product")]
    EmptySelection,

    #[error("A sale is already being processed")]
    AlreadySubmitting,

    /// A selected id has no entry in the catalog snapshot
    #[error("Product not found: {0}")]
    UnknownProduct(String),
}

impl SubmitError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmitError::EmptySelection => ErrorCode::EmptySelection,
            SubmitError::AlreadySubmitting => ErrorCode::SaleInProgress,
            SubmitError::UnknownProduct(_) => ErrorCode::ProductNotFound,
        }
    }
}

/// Errors from interactive session edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Product is not selected: {0}")]
    NotSelected(String),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::UnknownProduct(_) => ErrorCode::ProductNotFound,
            SessionError::OutOfStock(_) => ErrorCode::OutOfStock,
            SessionError::NotSelected(_) => ErrorCode::ValidationFailed,
        }
    }
}

pub type SubmitResult<T> = Result<T, SubmitError>;
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_message_matches_code() {
        let err = SubmitError::EmptySelection;
        assert_eq!(err.to_string(), err.code().message());
    }

    #[test]
    fn test_session_error_codes() {
        assert_eq!(
            SessionError::OutOfStock("COLA".into()).code(),
            ErrorCode::OutOfStock
        );
        assert_eq!(
            SessionError::OutOfStock("COLA".into()).to_string(),
            "COLA is out of stock"
        );
    }
}
