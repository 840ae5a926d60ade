use auth::AuthenticationError;
use thiserror::Error;

/// Error for PrincipalId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalIdError {
    #[error("Invalid principal ID: {0}")]
    InvalidFormat(String),
}

/// Error for IdentityKey validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityKeyError {
    #[error("Email is required")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Top-level error for credential operations.
///
/// The `Display` text of `DuplicateIdentity`, `InvalidCredentials` and
/// `InvalidToken` is what clients see; it must stay generic.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidIdentityKey(#[from] IdentityKeyError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    // Domain-level errors
    #[error("identity already registered")]
    DuplicateIdentity,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("principal not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthenticationError> for CredentialError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => CredentialError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => {
                CredentialError::Internal(format!("Password verification failed: {}", e))
            }
            AuthenticationError::TokenError(e) => {
                CredentialError::Internal(format!("Token generation failed: {}", e))
            }
        }
    }
}
