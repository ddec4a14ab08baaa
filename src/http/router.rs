//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Slot catalog
        .route("/slots", post(handlers::create_slot))
        .route("/slots", get(handlers::list_slots))
        .route("/slots/{slot_id}", patch(handlers::update_slot))
        .route("/slots/{slot_id}", delete(handlers::delete_slot))
        .route("/slots/{slot_id}/bookings", get(handlers::list_slot_bookings))
        // Booking ledger
        .route("/bookings", post(handlers::create_booking))
        .route("/bookings/{booking_id}/cancel", post(handlers::cancel_booking))
        .route("/bookings/{booking_id}/status", patch(handlers::update_booking_status))
        .route("/users/{user_id}/bookings", get(handlers::list_user_bookings))
        // Time preferences
        .route("/preferences", post(handlers::create_preference))
        .route("/preferences", get(handlers::list_all_preferences))
        .route("/preferences/{preference_id}", patch(handlers::update_preference))
        .route("/preferences/{preference_id}", delete(handlers::delete_preference))
        .route("/users/{user_id}/preferences", get(handlers::list_user_preferences))
        // Shared availability
        .route("/overlaps", get(handlers::list_overlaps));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
