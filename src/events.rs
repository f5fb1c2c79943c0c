//! Engine event broadcast
//!
//! Every committed mutation is published on a `tokio::sync::broadcast`
//! channel from inside the critical section that performed it, so receivers
//! observe events in commit order. Sending never blocks and having no
//! subscribers is fine; slow receivers see `RecvError::Lagged`.

use crate::core::{
    Booking, BookingId, ConferenceId, Reservation, ReservationId, UserId,
};
use serde::Serialize;
use tokio::sync::broadcast;

/// Something that happened inside the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    UserCreated {
        user_id: UserId,
    },
    BookingCreated {
        booking: Booking,
    },
    ReservationCreated {
        reservation: Reservation,
    },
    ReservationConfirmed {
        reservation_id: ReservationId,
        booking_id: BookingId,
    },
    ReservationCancelled {
        reservation_id: ReservationId,
    },
    ReservationExpired {
        reservation_id: ReservationId,
        conference_id: ConferenceId,
    },
    QueueJoined {
        user_id: UserId,
        conference_id: ConferenceId,
        position: usize,
    },
    QueueClaimed {
        user_id: UserId,
        conference_id: ConferenceId,
        reservation_id: ReservationId,
    },
}

/// Fan-out publisher for engine events
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per receiver
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Get an event receiver
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }

    /// Publish an event
    pub fn publish(&self, event: EngineEvent) {
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
