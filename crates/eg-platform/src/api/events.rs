//! Events API
//!
//! REST endpoints over the event registry. All routes sit behind the auth
//! gate.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

use crate::api::middleware::{AppState, Authenticated};
use crate::domain::Event;
use crate::error::PlatformError;

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = Event,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid token"),
        (status = 409, description = "Event id already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_event(
    State(state): State<AppState>,
    auth: Authenticated,
    body: Result<Json<Event>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), PlatformError> {
    let Json(event) = body.map_err(|r| state.error_verbosity.malformed_body(r))?;

    debug!(identity = %auth.0.identity, event_id = %event.id, "Creating event");
    let stored = state.registry.create(event)?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// List events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "All events, unordered", body = Vec<Event>),
        (status = 401, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.registry.list())
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/event/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 401, description = "Invalid token"),
        (status = 404, description = "Event not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, PlatformError> {
    Ok(Json(state.registry.get(&id)?))
}

/// Replace (or insert) an event
///
/// The stored event always takes the id from the path.
#[utoipa::path(
    put,
    path = "/event/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body = Event,
    responses(
        (status = 200, description = "Event stored", body = Event),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_event(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(id): Path<String>,
    body: Result<Json<Event>, JsonRejection>,
) -> Result<Json<Event>, PlatformError> {
    let Json(event) = body.map_err(|r| state.error_verbosity.malformed_body(r))?;

    debug!(identity = %auth.0.identity, event_id = %id, "Updating event");
    Ok(Json(state.registry.update(&id, event)))
}

/// Delete an event
///
/// Deleting an unknown id also succeeds.
#[utoipa::path(
    delete,
    path = "/event/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> StatusCode {
    debug!(identity = %auth.0.identity, event_id = %id, "Deleting event");
    state.registry.delete(&id);
    StatusCode::NO_CONTENT
}

/// Create events router
pub fn events_router() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/event/:id", get(get_event).put(update_event).delete(delete_event))
}
