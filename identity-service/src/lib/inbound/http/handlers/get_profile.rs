use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::profile::models::Profile;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .get_profile(principal.principal_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub principal_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self {
            principal_id: profile.principal_id.0,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            date_of_birth: profile.date_of_birth,
            avatar_url: profile.avatar_url.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
