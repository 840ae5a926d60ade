use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::update_profile::ProfileRequestBody;
use super::ApiError;
use super::ApiSuccess;
use super::PrincipalData;
use crate::domain::principal::models::AuthenticatedSession;
use crate::domain::principal::models::IdentityKey;
use crate::domain::principal::models::Password;
use crate::domain::principal::models::RegisterCommand;
use crate::domain::principal::models::Role;
use crate::domain::principal::ports::CredentialServicePort;
use crate::domain::profile::models::ProfileFields;
use crate::inbound::http::router::AppState;
use crate::principal::errors::CredentialError;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .credential_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    profile: Option<ProfileRequestBody>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let email = IdentityKey::new(&self.email).map_err(CredentialError::from)?;
        let password = Password::new(self.password).map_err(CredentialError::from)?;
        let role = match self.role {
            Some(role) => role.parse::<Role>().map_err(CredentialError::from)?,
            None => Role::default(),
        };
        let profile = match self.profile {
            Some(profile) => profile.try_into_fields()?,
            None => ProfileFields::default(),
        };

        Ok(RegisterCommand::new(email, password, role, profile))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub principal_id: i64,
    pub principal: PrincipalData,
}

impl From<AuthenticatedSession> for RegisterResponseData {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            token: session.access_token,
            expires_in: session.expires_in,
            principal_id: session.principal.id.0,
            principal: (&session.principal).into(),
        }
    }
}
