//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use erudio_core::ErrorResponse;
use erudio_hateoas::{Link, PageMetadata};
use erudio_service::{AccountCredentialsVO, BookVO, PersonVO, PersonVOV2, TokenVO};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Erudio REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Erudio REST API",
        version = "1.0.0",
        description = "People and books with HATEOAS links, served as JSON (HAL), XML, or YAML",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::auth_controller::sign_in,
        crate::controllers::auth_controller::refresh_token,
        crate::controllers::person_controller::find_all,
        crate::controllers::person_controller::find_by_name,
        crate::controllers::person_controller::find_by_id,
        crate::controllers::person_controller::create,
        crate::controllers::person_controller::update,
        crate::controllers::person_controller::disable,
        crate::controllers::person_controller::delete_person,
        crate::controllers::book_controller::find_all,
        crate::controllers::book_controller::find_by_id,
        crate::controllers::book_controller::create,
        crate::controllers::book_controller::update,
        crate::controllers::book_controller::delete_book,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            Link,
            PageMetadata,
            PersonVO,
            PersonVOV2,
            BookVO,
            AccountCredentialsVO,
            TokenVO,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Token sign-in and refresh"),
        (name = "person", description = "People, versions v1 and v2"),
        (name = "book", description = "Books"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /auth/signin"))
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
    fn test_document_lists_versioned_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/person/{version}/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/book/v1"));
        assert!(paths.iter().any(|p| p.as_str() == "/auth/signin"));
    }
}
