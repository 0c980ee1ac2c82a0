use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, book_slot, booking_form, create_slot, list_bookings, list_slots,
};

/// Creates the API router with all booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /slots - Create a slot
/// - POST /slots/:id/book - Book a slot, redirects to /bookings
///
/// Query endpoints (Read operations):
/// - GET /slots - List slots
/// - GET /slots/:id/book - Slot shown before confirming a booking
/// - GET /bookings - List bookings with slot details
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/slots", get(list_slots).post(create_slot))
        .route("/slots/:id/book", get(booking_form).post(book_slot))
        .route("/bookings", get(list_bookings))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
