//! Booking ledger: append-only record of confirmed purchases.

use crate::core::{Booking, BookingId, BookingStatus, ConferenceId, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
    index: HashMap<BookingId, usize>,
}

impl BookingLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a confirmed booking
    pub fn record(
        &mut self,
        user_id: UserId,
        conference_id: ConferenceId,
        tickets: u32,
        total_amount_cents: u64,
        now: DateTime<Utc>,
    ) -> Booking {
        let booking = Booking {
            id: BookingId::new(),
            user_id,
            conference_id,
            tickets_booked: tickets,
            total_amount_cents,
            status: BookingStatus::Confirmed,
            booked_at: now,
        };
        self.index.insert(booking.id, self.bookings.len());
        self.bookings.push(booking.clone());
        booking
    }

    pub fn get(&self, id: &BookingId) -> Option<&Booking> {
        self.index.get(id).map(|&i| &self.bookings[i])
    }

    /// Bookings owned by a requester, oldest first
    pub fn for_user<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings.iter().filter(move |b| &b.user_id == user_id)
    }

    /// Tickets sold for a conference across all bookings
    pub fn booked_for(&self, conference_id: &ConferenceId) -> u32 {
        self.bookings
            .iter()
            .filter(|b| &b.conference_id == conference_id)
            .map(|b| b.tickets_booked)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
