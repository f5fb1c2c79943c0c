//! Reservation ledger: every seat hold, active or not yet purged.
//!
//! Holds never touch a conference's `available_tickets`. They shrink the
//! *effective* availability, which is recomputed from this ledger every time
//! it is needed.

use crate::core::{Conference, ConferenceId, Reservation, ReservationId, UserId};
use crate::error::{BookingError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ReservationLedger {
    holds: HashMap<ReservationId, Reservation>,
}

impl ReservationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every hold whose window has elapsed, returning what was removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> Vec<Reservation> {
        let expired: Vec<ReservationId> = self
            .holds
            .values()
            .filter(|r| !r.is_active(now))
            .map(|r| r.id)
            .collect();

        expired
            .iter()
            .filter_map(|id| self.holds.remove(id))
            .collect()
    }

    /// Tickets held by unexpired reservations for a conference
    pub fn reserved_for(&self, conference_id: &ConferenceId, now: DateTime<Utc>) -> u32 {
        self.holds
            .values()
            .filter(|r| &r.conference_id == conference_id && r.is_active(now))
            .map(|r| r.ticket_count)
            .sum()
    }

    /// Tickets of `conference` nobody holds or has bought
    pub fn effective_availability(&self, conference: &Conference, now: DateTime<Utc>) -> u32 {
        conference
            .available_tickets
            .saturating_sub(self.reserved_for(&conference.id, now))
    }

    /// Fail unless `count` tickets of `conference` are effectively available
    pub fn ensure_available(
        &self,
        conference: &Conference,
        count: u32,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let available = self.effective_availability(conference, now);
        if count > available {
            return Err(BookingError::InsufficientInventory {
                requested: count,
                available,
            });
        }
        Ok(())
    }

    /// Whether `user_id` holds an unexpired reservation for the conference
    pub fn has_active(
        &self,
        user_id: &UserId,
        conference_id: &ConferenceId,
        now: DateTime<Utc>,
    ) -> bool {
        self.holds.values().any(|r| {
            &r.user_id == user_id && &r.conference_id == conference_id && r.is_active(now)
        })
    }

    /// Record a new hold expiring `hold_duration` after `now`
    ///
    /// The caller has already checked availability and exclusivity. Fails
    /// without recording anything when the expiry is not representable.
    pub fn hold(
        &mut self,
        user_id: UserId,
        conference: &Conference,
        count: u32,
        now: DateTime<Utc>,
        hold_duration: TimeDelta,
    ) -> Result<Reservation> {
        let expires_at = now.checked_add_signed(hold_duration).ok_or_else(|| {
            BookingError::InvalidRequest(format!(
                "hold duration of {}s is out of range",
                hold_duration.num_seconds()
            ))
        })?;
        let reservation = Reservation {
            id: ReservationId::new(),
            user_id,
            conference_id: conference.id.clone(),
            ticket_count: count,
            total_amount_cents: conference.price_for(count),
            created_at: now,
            expires_at,
        };
        self.holds.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.holds.get(id)
    }

    pub fn remove(&mut self, id: &ReservationId) -> Option<Reservation> {
        self.holds.remove(id)
    }

    /// Unexpired holds owned by a requester, oldest first
    pub fn active_for_user(&self, user_id: &UserId, now: DateTime<Utc>) -> Vec<&Reservation> {
        let mut holds: Vec<_> = self
            .holds
            .values()
            .filter(|r| &r.user_id == user_id && r.is_active(now))
            .collect();
        holds.sort_by_key(|r| r.created_at);
        holds
    }

    /// Physically present holds, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }
}
