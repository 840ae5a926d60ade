//! Authentication utilities library
//!
//! Provides the credential primitives of the identity service:
//! - Password hashing (Argon2id with a configurable work factor)
//! - Signed token issuance and validation (HS256 only)
//! - Authentication coordination
//!
//! Nothing in this crate performs I/O; time is always supplied by the caller.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_cost(HashingCost::new(64, 1, 1).unwrap());
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Utc;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let now = Utc::now();
//! let (token, _) = codec.issue(1, "alice@example.com", "CUSTOMER", now).unwrap();
//! let claims = codec.validate(&token, now).unwrap();
//! assert_eq!(claims.sub, "1");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, HashingCost};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!")
//!     .with_hashing_cost(HashingCost::new(64, 1, 1).unwrap());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let now = Utc::now();
//! let result = auth
//!     .authenticate("password123", &hash, 1, "alice@example.com", "CUSTOMER", now)
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token, now).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
