use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Current token format version, carried in the `ver` claim.
pub const TOKEN_FORMAT_VERSION: u8 = 1;

/// Claims carried by a credential token.
///
/// Standard RFC 7519 claims (`sub`, `iat`, `exp`, `jti`) plus the principal's
/// email and role. All fields are required when decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Identity key of the principal, for display
    pub email: String,

    /// Role tag of the principal
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,

    /// Token format version
    pub ver: u8,
}

impl Claims {
    /// Create claims for a principal, valid for `validity` starting at `now`.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `email` - Identity key
    /// * `role` - Role tag
    /// * `now` - Issue instant
    /// * `validity` - Lifetime of the token
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + validity` is outside the representable range
    pub fn new(
        subject: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
        now: DateTime<Utc>,
        validity: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = now.checked_add_signed(validity).ok_or_else(|| {
            TokenError::EncodingFailed(format!("token validity out of range: {}", validity))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            email: email.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            ver: TOKEN_FORMAT_VERSION,
        })
    }

    /// A token is expired from the `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
