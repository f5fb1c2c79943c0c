//! Shared state for the HTTP handlers.

use crate::storage::{BookingRepository, MemoryStorage};
use chrono::TimeDelta;
use std::sync::Arc;

/// Application state shared across all HTTP handlers
///
/// Cloned per request; the engine itself sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The booking engine
    pub repo: Arc<dyn BookingRepository>,
    /// Hold duration, reported back to clients when they reserve
    pub hold_duration: TimeDelta,
}

impl AppState {
    #[must_use]
    pub fn new(repo: Arc<dyn BookingRepository>, hold_duration: TimeDelta) -> Self {
        Self {
            repo,
            hold_duration,
        }
    }

    /// State over an in-memory engine
    #[must_use]
    pub fn from_storage(storage: Arc<MemoryStorage>) -> Self {
        let hold_duration = storage.hold_duration();
        Self::new(storage, hold_duration)
    }
}
