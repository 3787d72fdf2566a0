//! Main application router.

use crate::{
    controllers::{auth_controller, book_controller, health_controller, person_controller},
    middleware::{auth_middleware, logging_middleware, negotiate_errors},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, routing::get, Router};
use erudio_config::ServerConfig;
use erudio_service::{BookVO, PersonVO, PersonVOV2};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Everything under `/api` requires a bearer access token; `/auth` and the
/// health endpoints are public.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let api_router = Router::new()
        .nest("/person/v1", person_controller::router::<PersonVO>())
        .nest("/person/v2", person_controller::router::<PersonVOV2>())
        .nest("/book/v1", book_controller::router::<BookVO>())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .nest("/auth", auth_controller::router())
        .route("/", get(root))
        .with_state(state);

    if server_config.swagger_enabled {
        router = router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
        info!("Swagger UI enabled at /swagger-ui");
    }

    router
        .layer(middleware::from_fn(negotiate_errors))
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(middleware::from_fn(logging_middleware))
}

/// Creates a CORS layer from the configured origins.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Erudio REST API"
}
