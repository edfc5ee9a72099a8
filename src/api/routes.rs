//! Application route configuration.

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{car_routes, customer_routes, maintenance_routes};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{CORS_ALLOWED_HEADERS, CORS_ALLOWED_METHODS, DEFAULT_CORS_ORIGIN};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origin);

    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(customer_routes())
        .merge(car_routes())
        .merge(maintenance_routes())
        // Global middleware; CORS answers OPTIONS preflights itself
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for every route.
fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == DEFAULT_CORS_ORIGIN {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin '{}', allowing any origin", origin);
                AllowOrigin::any()
            }
        }
    };

    let methods: Vec<Method> = CORS_ALLOWED_METHODS
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();

    let headers: Vec<HeaderName> = CORS_ALLOWED_HEADERS
        .iter()
        .map(|&h| HeaderName::from_static(h))
        .collect();

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(methods)
        .allow_headers(headers)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: ServiceStatus {
                    status: "healthy",
                    error: None,
                },
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: ServiceStatus {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                },
            }),
        ),
    }
}
