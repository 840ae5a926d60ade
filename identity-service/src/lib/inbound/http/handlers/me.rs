use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::Role;
use crate::domain::principal::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Stored record of the caller named by the bearer token.
pub async fn me(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    state
        .credential_service
        .get_principal(principal.principal_id)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::OK, principal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub principal_id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for MeResponseData {
    fn from(principal: &Principal) -> Self {
        Self {
            principal_id: principal.id.0,
            email: principal.email.as_str().to_string(),
            role: principal.role,
            created_at: principal.created_at,
        }
    }
}
