use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::principal::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Middleware that validates bearer tokens in front of protected routes.
///
/// On success the caller identity is stored in the request extensions,
/// where the `AuthenticatedPrincipal` extractor picks it up. Every failure
/// yields the same 401 body.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers()).ok_or_else(|| {
        tracing::warn!(path = %req.uri().path(), "Missing or malformed Authorization header");
        ApiError::unauthorized()
    })?;

    let principal = state.credential_service.verify_token(token).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), error = %e, "Bearer token rejected");
        ApiError::unauthorized()
    })?;

    tracing::debug!(principal_id = %principal.principal_id, "Request authenticated");
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Typed access to the identity established by [`authenticate`].
///
/// Rejects with 401 when the gate did not run for this route.
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}
