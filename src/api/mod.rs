//! HTTP routing layer
//!
//! An axum router translating JSON requests into engine operations. The
//! handlers hold no state of their own; every request is one call on a
//! [`BookingRepository`](crate::storage::BookingRepository).

pub mod error;
pub mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
