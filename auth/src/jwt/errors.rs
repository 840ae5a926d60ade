use thiserror::Error;

/// Error type for token operations.
///
/// Every validation failure (malformed, wrong algorithm, bad signature,
/// expired, missing claims) is reported as `InvalidToken`. The message is
/// meant for logs and must not be returned to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
