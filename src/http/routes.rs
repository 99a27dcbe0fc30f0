use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Catalog browsing
        .route("/catalog", get(handlers::list_catalog))
        // Booking CRUD (proxied to the persistence collaborator)
        .route(
            "/bookings",
            post(handlers::create_booking).get(handlers::list_bookings),
        )
        .route("/bookings/history", get(handlers::booking_history))
        .route("/bookings/:booking_id", delete(handlers::cancel_booking))
        // Activity monitor
        .route("/sessions/active", get(handlers::active_session))
        // Concierge
        .route("/chat", post(handlers::chat))
        // The original deployment served browsers from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
