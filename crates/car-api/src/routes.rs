//! # Routes
//!
//! Axum router configuration for the booking API.

use crate::handlers;
use crate::middleware::{log_request, require_session};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Largest accepted JSON body
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Create the main application router
///
/// Routes:
/// - GET  /                     - Greeting
/// - GET  /health               - Health check
/// - GET  /api/services         - List services
/// - GET  /api/service/{id}     - Title and price of one service
/// - POST /api/checkout         - Save a checkout
/// - GET  /api/checkouts/{uid}  - Checkouts of the session's user (cookie required)
/// - POST /api/jwt              - Issue session cookie
/// - POST /api/logout           - Clear session cookie
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    // Session-guarded routes
    let protected_routes = Router::new()
        .route("/checkouts/{uid}", get(handlers::list_checkouts))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api_routes = Router::new()
        // Catalog
        .route("/services", get(handlers::list_services))
        .route("/service/{id}", get(handlers::get_service))
        // Checkouts
        .route("/checkout", post(handlers::create_checkout))
        // Session
        .route("/jwt", post(handlers::issue_session))
        .route("/logout", post(handlers::clear_session))
        .merge(protected_routes);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        // Middleware (outermost first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
                .layer(middleware::from_fn(log_request)),
        )
        // State
        .with_state(state)
}

/// CORS policy from the configured origin list.
///
/// An empty list allows any origin without credentials; otherwise only the
/// listed origins, with credentials so the session cookie is sent.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!("Ignoring invalid origin {:?}: {}", origin, e))
                .ok()
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}
