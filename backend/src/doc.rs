//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the domain schemas they exchange. The bearer scheme is declared as a
//! placeholder only; no route enforces it yet.
//!
//! The generated document backs Swagger UI (debug builds) and is exported
//! via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::ApiHealth;
use crate::domain::{Error, ErrorCode, User};

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Reserved for future authentication."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "User accounts API",
        description = "Create and look up user accounts, probe service health and request generated paragraphs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::read_user_by_email,
        crate::inbound::http::info::app_info,
        crate::inbound::http::paragraphs::paragraph_by_topic,
        crate::inbound::http::health::health,
    ),
    components(schemas(User, Error, ErrorCode, ApiHealth)),
    tags(
        (name = "users", description = "User account operations"),
        (name = "health", description = "Liveness and release information"),
        (name = "paragraphs", description = "Completion proxy")
    )
)]
pub struct ApiDoc;
