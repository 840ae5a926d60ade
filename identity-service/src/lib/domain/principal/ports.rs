use async_trait::async_trait;

use crate::principal::errors::CredentialError;
use crate::principal::models::AuthenticatedPrincipal;
use crate::principal::models::AuthenticatedSession;
use crate::principal::models::IdentityKey;
use crate::principal::models::LoginCommand;
use crate::principal::models::NewPrincipal;
use crate::principal::models::Principal;
use crate::principal::models::PrincipalId;
use crate::principal::models::RegisterCommand;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new principal and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated command containing identity key, password, role and profile
    ///
    /// # Returns
    /// Created principal together with a freshly issued token
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Identity key is already registered
    /// * `StoreUnavailable` - Database operation failed
    /// * `Internal` - Hashing or token signing failed
    async fn register(&self, command: RegisterCommand)
        -> Result<AuthenticatedSession, CredentialError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Raw email and password as submitted
    ///
    /// # Returns
    /// Authenticated principal together with a freshly issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identity or wrong password
    /// * `StoreUnavailable` - Database operation failed
    /// * `Internal` - Hashing or token signing failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, CredentialError>;

    /// Retrieve a principal by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `StoreUnavailable` - Database operation failed
    async fn get_principal(&self, id: PrincipalId) -> Result<Principal, CredentialError>;

    /// Validate a bearer token and extract the caller identity.
    ///
    /// Performs no storage I/O.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged, expired, or carries unusable claims
    fn verify_token(&self, token: &str) -> Result<AuthenticatedPrincipal, CredentialError>;
}

/// Persistence operations for principals.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Persist a new principal and its initial profile atomically.
    ///
    /// Uniqueness of the identity key is enforced by the store itself.
    ///
    /// # Arguments
    /// * `principal` - Principal data with an already hashed password
    ///
    /// # Returns
    /// Created principal with its store-assigned identifier
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Identity key is already registered
    /// * `StoreUnavailable` - Database operation failed
    async fn create(&self, principal: NewPrincipal) -> Result<Principal, CredentialError>;

    /// Retrieve principal by identity key.
    ///
    /// # Returns
    /// Optional principal (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Database operation failed
    async fn find_by_email(&self, email: &IdentityKey)
        -> Result<Option<Principal>, CredentialError>;

    /// Retrieve principal by identifier.
    ///
    /// # Returns
    /// Optional principal (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Database operation failed
    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<Principal>, CredentialError>;
}
