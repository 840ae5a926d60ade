use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::PrincipalData;
use crate::domain::principal::models::AuthenticatedSession;
use crate::domain::principal::models::LoginCommand;
use crate::domain::principal::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .credential_service
        .login(LoginCommand::new(body.email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub principal_id: i64,
    pub display_identity: String,
    pub principal: PrincipalData,
}

impl From<AuthenticatedSession> for LoginResponseData {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            token: session.access_token,
            expires_in: session.expires_in,
            principal_id: session.principal.id.0,
            display_identity: session.principal.email.as_str().to_string(),
            principal: (&session.principal).into(),
        }
    }
}
