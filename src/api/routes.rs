//! Router configuration.

use super::handlers;
use super::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete router, everything nested under `/api/v1`
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Catalog
        .route("/conferences", get(handlers::list_conferences))
        // Requesters
        .route("/users", post(handlers::create_user))
        .route("/users/:user_id/bookings", get(handlers::user_bookings))
        .route("/users/:user_id/reservations", get(handlers::user_reservations))
        // Bookings
        .route(
            "/bookings",
            post(handlers::create_booking).get(handlers::all_bookings),
        )
        .route("/bookings/:id", get(handlers::get_booking))
        // Seat holds
        .route("/reservations", post(handlers::create_reservation))
        .route(
            "/reservations/:id",
            get(handlers::get_reservation).delete(handlers::cancel_reservation),
        )
        .route(
            "/reservations/:id/confirm",
            post(handlers::confirm_reservation),
        )
        // Wait queue
        .route("/queue/enqueue", post(handlers::enqueue))
        .route(
            "/queue/:conference_id/position",
            get(handlers::queue_position),
        )
        .route("/queue/claim", post(handlers::claim));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
