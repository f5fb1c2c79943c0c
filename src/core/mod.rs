//! Domain types for the booking engine
//!
//! Identifiers, the records owned by each ledger, the read-side views handed
//! back to callers, and the clock used for hold expiry.

mod builders;
mod clock;
mod ids;
mod models;

pub use builders::ConferenceBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::{BookingId, ConferenceId, QueueEntryId, ReservationId, UserId};
pub use models::{
    Booking, BookingDetails, BookingReceipt, BookingStatus, Conference, ConferenceListing,
    ConferenceStats, QueueEntry, Reservation, ReservationReceipt, ReservationView, User,
    format_cents, normalize_contact,
};
