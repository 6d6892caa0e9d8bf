// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Structure:
// - mod.rs: Router assembly and middleware
// - notifications.rs: POST /send
// - health.rs: Health check and metrics endpoints
// - middleware.rs: Outcome logging for /send
//
// ============================================================================

mod health;
mod middleware;
pub mod notifications;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;

/// Create the application router
pub fn create_router(app_context: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/send",
            post(notifications::send_notification)
                .route_layer(axum::middleware::from_fn(middleware::log_send_outcome)),
        )
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_context)
}
