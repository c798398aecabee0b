//! Main application configuration and router setup

use axum::{
    middleware,
    routing::get,
    routing::post,
    Router,
};
use tower_http::trace::TraceLayer;

use vellum_web::middleware::{cors_layer, request_id_middleware};
use vellum_web::WebError;

use crate::{context::UploadsContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api/v1".to_string(),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: UploadsContext, config: AppConfig) -> Router {
    let mut app = Router::new()
        // Health endpoint (no prefix)
        .route("/health", get(handlers::health_check))
        // API routes with prefix
        .nest(&config.api_prefix, create_api_router())
        .fallback(handle_not_found)
        .with_state(context);

    // Add middleware layers (applied in reverse order)
    if config.enable_cors {
        app = app.layer(cors_layer());
    }

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

async fn handle_not_found() -> WebError {
    WebError::not_found("The requested resource was not found")
}

/// Create unified API router
fn create_api_router() -> Router<UploadsContext> {
    Router::new()
        // The upload action
        .route("/upload", post(handlers::upload))
        // Supporting endpoints
        .route("/auth/token", get(handlers::get_edit_token))
        .route("/jobs", get(handlers::list_jobs))
        .route("/files/{name}", get(handlers::get_file).delete(handlers::delete_file))
        .route("/pages/{title}", get(handlers::get_page).delete(handlers::delete_page))
}
