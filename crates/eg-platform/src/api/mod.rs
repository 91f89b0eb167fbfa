//! API Layer
//!
//! REST API endpoints for the platform. Public routes (`/`, `/health`,
//! `/login`, docs) are open; everything else runs through the auth gate.

pub mod common;
pub mod middleware;
pub mod auth;
pub mod events;
pub mod openapi;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use common::*;
pub use middleware::{auth_gate, AppState, Authenticated};
pub use events::events_router;
pub use openapi::PlatformApiDoc;

/// Build the full platform router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/eventinfo", get(auth::event_info))
        .route("/me", get(auth::current_user))
        .merge(events_router())
        .route_layer(from_fn_with_state(state.gate.clone(), auth_gate));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/login", get(auth::login))
        .merge(protected)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", PlatformApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

async fn home() -> &'static str {
    "Welcome! Please login or register."
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "monitoring",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
