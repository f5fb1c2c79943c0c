use super::memory::MemoryStorage;
use crate::core::{
    Booking, BookingDetails, BookingId, BookingReceipt, Conference, ConferenceId,
    ConferenceListing, ConferenceStats, ReservationId, ReservationReceipt, ReservationView, User,
    UserId,
};
use crate::error::Result;

/// Repository trait for booking operations
///
/// The HTTP layer and the CLI talk to the engine through this trait so that
/// handlers can be exercised against any implementation. Every method is one
/// atomic operation.
pub trait BookingRepository: Send + Sync {
    /// Registers a requester
    fn create_user(&self, name: &str, email: &str) -> Result<User>;

    /// Loads a requester by ID
    fn get_user(&self, id: &UserId) -> Result<User>;

    /// Finds a requester by contact, ignoring case
    fn find_user_by_contact(&self, contact: &str) -> Option<User>;

    /// Lists conferences with their derived counters
    fn list_conferences(&self) -> Vec<ConferenceListing>;

    /// Loads a conference by ID
    fn get_conference(&self, id: &ConferenceId) -> Result<Conference>;

    /// Held tickets and queue length for a conference
    fn conference_stats(&self, id: &ConferenceId) -> Result<ConferenceStats>;

    /// Books tickets directly
    fn book(&self, user_id: &UserId, conference_id: &ConferenceId, count: u32) -> Result<Booking>;

    /// Loads a booking with requester and conference snapshots
    fn get_booking(&self, id: &BookingId) -> Result<BookingDetails>;

    /// Bookings owned by a requester
    fn bookings_for_user(&self, user_id: &UserId) -> Vec<Booking>;

    /// Every booking
    fn all_bookings(&self) -> Vec<BookingDetails>;

    /// Places a temporary hold
    fn create_reservation(
        &self,
        user_id: &UserId,
        conference_id: &ConferenceId,
        count: u32,
    ) -> Result<ReservationReceipt>;

    /// Converts a hold into a booking
    fn confirm_reservation(&self, id: &ReservationId) -> Result<BookingReceipt>;

    /// Drops a hold
    fn cancel_reservation(&self, id: &ReservationId) -> Result<()>;

    /// Loads an active hold
    fn get_reservation(&self, id: &ReservationId) -> Result<ReservationView>;

    /// Active holds owned by a requester
    fn reservations_for_user(&self, user_id: &UserId) -> Vec<ReservationView>;

    /// Joins a wait queue, returning the 1-based position
    fn enqueue(&self, user_id: &UserId, conference_id: &ConferenceId, count: u32) -> Result<usize>;

    /// Position in a wait queue, if queued
    fn queue_position(&self, user_id: &UserId, conference_id: &ConferenceId) -> Option<usize>;

    /// Converts the head of a wait queue into a hold
    fn claim(&self, user_id: &UserId, conference_id: &ConferenceId) -> Result<ReservationReceipt>;

    /// Removes elapsed holds
    fn purge_expired(&self) -> usize;
}

impl BookingRepository for MemoryStorage {
    fn create_user(&self, name: &str, email: &str) -> Result<User> {
        Self::create_user(self, name, email)
    }

    fn get_user(&self, id: &UserId) -> Result<User> {
        Self::get_user(self, id)
    }

    fn find_user_by_contact(&self, contact: &str) -> Option<User> {
        Self::find_user_by_contact(self, contact)
    }

    fn list_conferences(&self) -> Vec<ConferenceListing> {
        Self::list_conferences(self)
    }

    fn get_conference(&self, id: &ConferenceId) -> Result<Conference> {
        Self::get_conference(self, id)
    }

    fn conference_stats(&self, id: &ConferenceId) -> Result<ConferenceStats> {
        Self::conference_stats(self, id)
    }

    fn book(&self, user_id: &UserId, conference_id: &ConferenceId, count: u32) -> Result<Booking> {
        Self::book(self, user_id, conference_id, count)
    }

    fn get_booking(&self, id: &BookingId) -> Result<BookingDetails> {
        Self::get_booking(self, id)
    }

    fn bookings_for_user(&self, user_id: &UserId) -> Vec<Booking> {
        Self::bookings_for_user(self, user_id)
    }

    fn all_bookings(&self) -> Vec<BookingDetails> {
        Self::all_bookings(self)
    }

    fn create_reservation(
        &self,
        user_id: &UserId,
        conference_id: &ConferenceId,
        count: u32,
    ) -> Result<ReservationReceipt> {
        Self::create_reservation(self, user_id, conference_id, count)
    }

    fn confirm_reservation(&self, id: &ReservationId) -> Result<BookingReceipt> {
        Self::confirm_reservation(self, id)
    }

    fn cancel_reservation(&self, id: &ReservationId) -> Result<()> {
        Self::cancel_reservation(self, id)
    }

    fn get_reservation(&self, id: &ReservationId) -> Result<ReservationView> {
        Self::get_reservation(self, id)
    }

    fn reservations_for_user(&self, user_id: &UserId) -> Vec<ReservationView> {
        Self::reservations_for_user(self, user_id)
    }

    fn enqueue(&self, user_id: &UserId, conference_id: &ConferenceId, count: u32) -> Result<usize> {
        Self::enqueue(self, user_id, conference_id, count)
    }

    fn queue_position(&self, user_id: &UserId, conference_id: &ConferenceId) -> Option<usize> {
        Self::queue_position(self, user_id, conference_id)
    }

    fn claim(&self, user_id: &UserId, conference_id: &ConferenceId) -> Result<ReservationReceipt> {
        Self::claim(self, user_id, conference_id)
    }

    fn purge_expired(&self) -> usize {
        Self::purge_expired(self)
    }
}
