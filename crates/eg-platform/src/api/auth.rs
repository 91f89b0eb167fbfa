//! Auth API Endpoints
//!
//! - GET /login - Issue an access token for the authenticated caller
//! - GET /eventinfo - Role-specific event details (requires token)
//! - GET /me - Credential of the current bearer (requires token)

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::middleware::{AppState, Authenticated};
use crate::domain::{Credential, Role};
use crate::error::PlatformError;
use crate::service::TOKEN_TTL_SECS;

/// Login response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Access token
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Expiration time in seconds
    pub expires_in: i64,

    /// Absolute expiry (RFC 3339)
    pub expires_at: String,
}

/// Log in
///
/// Resolves the caller and returns a signed access token valid for five
/// minutes.
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Caller could not be authenticated"),
        (status = 500, description = "Token signing failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LoginResponse>, PlatformError> {
    let caller = state.authenticator.authenticate(&headers).await?;
    let issued = state.issuer.issue(&caller.identity, &caller.role)?;

    info!(identity = %caller.identity, role = %caller.role, "Login succeeded");

    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: TOKEN_TTL_SECS,
        expires_at: issued.expires_at.to_rfc3339(),
    }))
}

/// Event details for the bearer's role
#[utoipa::path(
    get,
    path = "/eventinfo",
    tag = "auth",
    responses(
        (status = 200, description = "Role-specific details", body = String),
        (status = 401, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn event_info(auth: Authenticated) -> String {
    event_details_for(auth.0.role_kind())
}

pub fn event_details_for(role: Role) -> String {
    format!("{}-level event details", role)
}

/// Current credential
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current credential", body = Credential),
        (status = 401, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn current_user(auth: Authenticated) -> Json<Credential> {
    Json(auth.0)
}
