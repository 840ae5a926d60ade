use thiserror::Error;

/// Error for profile operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileError {
    // Field validation errors
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("date_of_birth must be formatted as YYYY-MM-DD: {0}")]
    InvalidDateOfBirth(String),

    // Domain-level errors
    #[error("profile not found")]
    NotFound,

    // Infrastructure errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}
