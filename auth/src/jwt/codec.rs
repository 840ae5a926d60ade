use std::collections::HashSet;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TOKEN_FORMAT_VERSION;
use super::errors::TokenError;

/// Default lifetime of an issued token.
pub const DEFAULT_TOKEN_VALIDITY_HOURS: i64 = 24;

/// Signed token codec.
///
/// Issues HS256 tokens and accepts nothing but HS256 tokens signed with the
/// same secret. Time is always passed in by the caller so expiry can be
/// checked against any clock.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenCodec {
    /// Create a new codec with a secret key and the default 24 hour validity.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity: Duration::hours(DEFAULT_TOKEN_VALIDITY_HOURS),
        }
    }

    /// Set the lifetime of issued tokens.
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Issue a signed token for a principal.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `email` - Identity key
    /// * `role` - Role tag
    /// * `now` - Issue instant; the token expires at `now + validity`
    ///
    /// # Returns
    /// Encoded token and the claims it carries
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: impl ToString,
        email: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, Claims), TokenError> {
        let claims = Claims::new(subject, email, role, now, self.validity)?;
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok((token, claims))
    }

    /// Validate a token and return its claims.
    ///
    /// Checks, in order: structure, algorithm, signature, expiry against `now`,
    /// and finally the shape of the payload.
    ///
    /// # Errors
    /// * `InvalidToken` - Any of the checks failed
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let header = decode_header(token)
            .map_err(|e| TokenError::InvalidToken(format!("malformed token: {}", e)))?;

        if header.alg != self.algorithm {
            return Err(TokenError::InvalidToken(format!(
                "unexpected signing algorithm: {:?}",
                header.alg
            )));
        }

        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock, without leeway
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string(), "sub".to_string()]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?
            .claims;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::InvalidToken("token is expired".to_string()));
        }

        if claims.ver != TOKEN_FORMAT_VERSION {
            return Err(TokenError::InvalidToken(format!(
                "unsupported token version: {}",
                claims.ver
            )));
        }

        if claims.sub.trim().is_empty() {
            return Err(TokenError::InvalidToken("missing subject".to_string()));
        }

        if claims.email.trim().is_empty() {
            return Err(TokenError::InvalidToken("missing email".to_string()));
        }

        Ok(claims)
    }
}
