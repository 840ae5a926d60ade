use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::principal::errors::CredentialError;
use crate::principal::models::AuthenticatedPrincipal;
use crate::principal::models::AuthenticatedSession;
use crate::principal::models::IdentityKey;
use crate::principal::models::LoginCommand;
use crate::principal::models::NewPrincipal;
use crate::principal::models::Principal;
use crate::principal::models::PrincipalId;
use crate::principal::models::RegisterCommand;
use crate::principal::ports::CredentialServicePort;
use crate::principal::ports::PrincipalRepository;

/// Domain service implementation for credential operations.
///
/// Argon2 work runs on the blocking pool; the authenticator is shared with
/// those tasks through an `Arc`.
pub struct CredentialService<PR>
where
    PR: PrincipalRepository,
{
    repository: Arc<PR>,
    authenticator: Arc<Authenticator>,
}

impl<PR> CredentialService<PR>
where
    PR: PrincipalRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Principal persistence implementation
    /// * `authenticator` - Hasher and token codec configured with the signing secret
    ///
    /// # Returns
    /// Configured credential service instance
    pub fn new(repository: Arc<PR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<PR> CredentialServicePort for CredentialService<PR>
where
    PR: PrincipalRepository,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedSession, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| CredentialError::Internal(format!("Hashing task failed: {}", e)))?
                .map_err(|e| {
                    CredentialError::Internal(format!("Password hashing failed: {}", e))
                })?;

        let principal = self
            .repository
            .create(NewPrincipal {
                email: command.email,
                password_hash,
                role: command.role,
                profile: command.profile,
            })
            .await?;

        tracing::info!(
            principal_id = %principal.id,
            role = %principal.role,
            "Principal registered"
        );

        let result = self
            .authenticator
            .issue_token(
                principal.id,
                principal.email.as_str(),
                principal.role.as_str(),
                Utc::now(),
            )
            .map_err(|e| CredentialError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthenticatedSession::new(principal, result))
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, CredentialError> {
        let principal = match IdentityKey::new(&command.email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let now = Utc::now();

        let outcome = tokio::task::spawn_blocking(move || match principal {
            Some(principal) => authenticator
                .authenticate(
                    &password,
                    &principal.password_hash,
                    principal.id,
                    principal.email.as_str(),
                    principal.role.as_str(),
                    now,
                )
                .map(|result| AuthenticatedSession::new(principal, result)),
            None => {
                // Unknown identity still pays for one hash
                let _ = authenticator.hash_password(&password);
                Err(AuthenticationError::InvalidCredentials)
            }
        })
        .await
        .map_err(|e| CredentialError::Internal(format!("Verification task failed: {}", e)))?;

        match outcome {
            Ok(session) => {
                tracing::info!(principal_id = %session.principal.id, "Principal logged in");
                Ok(session)
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!("Login rejected: invalid credentials");
                Err(CredentialError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                Err(e.into())
            }
        }
    }

    async fn get_principal(&self, id: PrincipalId) -> Result<Principal, CredentialError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CredentialError::NotFound(id.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<AuthenticatedPrincipal, CredentialError> {
        let claims = self
            .authenticator
            .validate_token(token, Utc::now())
            .map_err(|e| {
                tracing::debug!(reason = %e, "Token rejected");
                CredentialError::InvalidToken
            })?;

        AuthenticatedPrincipal::try_from(claims)
    }
}
