//! OpenAPI Documentation
//!
//! Central OpenAPI specification for all platform APIs.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Platform API OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EventGate Platform API",
        version = "1.0.0",
        description = "Token login and the event registry"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "auth", description = "Token issuance and verification"),
        (name = "events", description = "Event registry"),
        (name = "monitoring", description = "Health")
    ),
    paths(
        // Auth API
        super::auth::login,
        super::auth::event_info,
        super::auth::current_user,
        // Events API
        super::events::create_event,
        super::events::list_events,
        super::events::get_event,
        super::events::update_event,
        super::events::delete_event,
        // Monitoring
        super::health,
    ),
    components(
        schemas(
            crate::domain::Event,
            crate::domain::Credential,
            super::auth::LoginResponse,
            super::common::ApiError,
            super::common::HealthResponse,
        )
    ),
    modifiers(&BearerSecurity)
)]
pub struct PlatformApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_event_paths() {
        let doc = PlatformApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/events"));
        assert!(doc.paths.paths.contains_key("/event/{id}"));
        assert!(doc.paths.paths.contains_key("/login"));
    }
}
