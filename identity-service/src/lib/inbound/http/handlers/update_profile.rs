use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_profile::ProfileData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_profile(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    body: Result<Json<ProfileRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let Json(body) = body?;
    let command = UpdateProfileCommand::new(body.try_into_fields()?);

    state
        .profile_service
        .update_profile(principal.principal_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// Profile fields as submitted; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileRequestBody {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    date_of_birth: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl ProfileRequestBody {
    pub(super) fn try_into_fields(self) -> Result<ProfileFields, ProfileError> {
        ProfileFields::new(
            self.first_name,
            self.last_name,
            self.phone,
            self.address,
            self.date_of_birth,
            self.avatar_url,
        )
    }
}
