//! API Middleware
//!
//! Authentication gate and extractors for Axum.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::api::common::ErrorVerbosity;
use crate::config::ServerConfig;
use crate::domain::Credential;
use crate::error::{PlatformError, Result};
use crate::service::{
    extract_bearer_token, AuthGate, CallerAuthenticator, EventRegistry, SigningSecret,
    StaticCallerAuthenticator, TokenIssuer, INVALID_TOKEN_MESSAGE,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub gate: Arc<AuthGate>,
    pub registry: Arc<EventRegistry>,
    pub authenticator: Arc<dyn CallerAuthenticator>,
    pub error_verbosity: ErrorVerbosity,
}

impl AppState {
    pub fn new(
        secret: SigningSecret,
        registry: EventRegistry,
        authenticator: Arc<dyn CallerAuthenticator>,
        error_verbosity: ErrorVerbosity,
    ) -> Self {
        let secret = Arc::new(secret);
        Self {
            issuer: Arc::new(TokenIssuer::new(secret.clone())),
            gate: Arc::new(AuthGate::new(secret)),
            registry: Arc::new(registry),
            authenticator,
            error_verbosity,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let authenticator = StaticCallerAuthenticator::new(
            config.login_identity.clone(),
            config.login_role.clone(),
        )?;

        Ok(Self::new(
            config.signing_secret.clone(),
            EventRegistry::new(config.duplicate_policy),
            Arc::new(authenticator),
            config.error_verbosity,
        ))
    }
}

/// Authentication gate
///
/// Verifies the bearer token and attaches the resulting `Credential` to the
/// request. Every failure yields the same 401 response.
pub async fn auth_gate(
    State(gate): State<Arc<AuthGate>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    let Some(token) = token else {
        warn!(path = %request.uri().path(), "Missing or unreadable Authorization header");
        return PlatformError::unauthorized(INVALID_TOKEN_MESSAGE).into_response();
    };

    let credential = match gate.authorize(token) {
        Ok(credential) => credential,
        Err(e) => {
            warn!(path = %request.uri().path(), "Rejected request with invalid access token");
            return e.into_response();
        }
    };

    request.extensions_mut().insert(credential);
    next.run(request).await
}

/// Extractor for authenticated requests
///
/// Reads the `Credential` attached by [`auth_gate`].
pub struct Authenticated(pub Credential);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = PlatformError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Credential>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| PlatformError::unauthorized(INVALID_TOKEN_MESSAGE))
    }
}
