use super::ids::{BookingId, ConferenceId, QueueEntryId, ReservationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// A bookable pool of tickets with a fixed total capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    pub id: ConferenceId,
    pub name: String,
    pub location: String,
    /// Fixed at creation
    pub total_tickets: u32,
    /// Reduced only by confirmed bookings, never by holds
    pub available_tickets: u32,
    /// Price of one ticket in cents
    pub price_cents: u64,
    pub date: DateTime<Utc>,
}

impl Conference {
    /// Total price for `count` tickets, in cents
    #[must_use]
    pub fn price_for(&self, count: u32) -> u64 {
        self.price_cents.saturating_mul(u64::from(count))
    }

    /// Tickets permanently sold
    #[must_use]
    pub const fn sold(&self) -> u32 {
        self.total_tickets - self.available_tickets
    }
}

/// A requester who can hold and book tickets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Stored normalized, see [`normalize_contact`]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Normalize a contact address for uniqueness checks
#[must_use]
pub fn normalize_contact(contact: &str) -> String {
    contact.trim().to_lowercase()
}

/// Booking status. Confirmed is the only terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
}

/// A permanent, immutable purchase record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub conference_id: ConferenceId,
    pub tickets_booked: u32,
    pub total_amount_cents: u64,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

/// A time-boxed seat hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub conference_id: ConferenceId,
    pub ticket_count: u32,
    pub total_amount_cents: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Reservation {
    /// A hold is active strictly before its expiry instant
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left on the hold, clamped at zero
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// A pending claim in a conference's wait queue
///
/// Position is not stored; it is the entry's index in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: QueueEntryId,
    pub user_id: UserId,
    pub conference_id: ConferenceId,
    pub ticket_count: u32,
    pub enqueued_at: DateTime<Utc>,
}

/// Derived per-conference counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceStats {
    /// Tickets held by unexpired reservations
    pub reserved_count: u32,
    pub queue_length: usize,
}

/// A catalog row: the conference plus its derived counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceListing {
    pub conference: Conference,
    pub stats: ConferenceStats,
}

/// A booking with requester and conference snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDetails {
    pub booking: Booking,
    pub user: User,
    pub conference: Conference,
}

/// Result of creating or claiming a hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationReceipt {
    pub reservation: Reservation,
    pub conference: Conference,
}

/// Result of confirming a hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingReceipt {
    pub booking: Booking,
    pub conference: Conference,
}

/// A hold as seen by a reader, with time left computed at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationView {
    pub reservation: Reservation,
    pub conference: Conference,
    #[serde(rename = "remaining_time", serialize_with = "serialize_secs")]
    pub remaining: Duration,
    pub expired: bool,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Render cents as a dollar amount, e.g. `$299.99`
#[must_use]
pub fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
