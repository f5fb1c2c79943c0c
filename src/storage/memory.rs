//! The reservation engine
//!
//! `MemoryStorage` owns the inventory store, reservation ledger, wait queues,
//! booking ledger and requester directory behind one readers-writer lock.
//! Every public operation is a single critical section: mutations take the
//! write lock and validate everything before changing anything, pure reads
//! share the read lock. Operations that purge expired holds before reading
//! take the write lock so purge and read cannot interleave with another
//! thread's mutation.

use super::bookings::BookingLedger;
use super::inventory::{InventoryStore, seed_catalog};
use super::queue::WaitQueue;
use super::reservations::ReservationLedger;
use super::users::UserDirectory;
use crate::config::EngineConfig;
use crate::core::{
    Booking, BookingDetails, BookingId, BookingReceipt, Clock, Conference, ConferenceId,
    ConferenceListing, ConferenceStats, ReservationId, ReservationReceipt, ReservationView,
    SystemClock, User, UserId,
};
use crate::error::{BookingError, Entity, Result};
use crate::events::{EngineEvent, EventBus};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Everything guarded by the store lock
#[derive(Debug)]
struct StoreState {
    inventory: InventoryStore,
    reservations: ReservationLedger,
    queue: WaitQueue,
    bookings: BookingLedger,
    users: UserDirectory,
}

impl StoreState {
    fn new(catalog: Vec<Conference>) -> Self {
        Self {
            inventory: InventoryStore::new(catalog),
            reservations: ReservationLedger::new(),
            queue: WaitQueue::new(),
            bookings: BookingLedger::new(),
            users: UserDirectory::new(),
        }
    }

    /// Lazy expiry: drop stale holds and announce them
    fn purge_expired(&mut self, now: DateTime<Utc>, events: &EventBus) -> usize {
        let purged = self.reservations.purge_expired(now);
        for reservation in &purged {
            debug!(
                reservation_id = %reservation.id,
                conference_id = %reservation.conference_id,
                "purged expired reservation"
            );
            events.publish(EngineEvent::ReservationExpired {
                reservation_id: reservation.id,
                conference_id: reservation.conference_id.clone(),
            });
        }
        purged.len()
    }

    fn stats(&self, conference_id: &ConferenceId, now: DateTime<Utc>) -> ConferenceStats {
        ConferenceStats {
            reserved_count: self.reservations.reserved_for(conference_id, now),
            queue_length: self.queue.len(conference_id),
        }
    }

    fn view(&self, reservation_id: &ReservationId, now: DateTime<Utc>) -> Result<ReservationView> {
        let reservation = self
            .reservations
            .get(reservation_id)
            .ok_or_else(|| BookingError::not_found(Entity::Reservation, reservation_id))?;
        let conference = self.inventory.get(&reservation.conference_id)?;
        Ok(ReservationView {
            reservation: reservation.clone(),
            conference: conference.clone(),
            remaining: reservation.remaining(now),
            expired: !reservation.is_active(now),
        })
    }
}

/// In-memory, thread-safe booking engine
pub struct MemoryStorage {
    state: RwLock<StoreState>,
    catalog: Vec<Conference>,
    clock: Arc<dyn Clock>,
    hold_duration: TimeDelta,
    events: EventBus,
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("conferences", &self.catalog.len())
            .field("hold_duration", &self.hold_duration)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl MemoryStorage {
    /// Engine over the seed catalog using the wall clock
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemClock), None)
    }

    /// Engine reading time from `clock`
    #[must_use]
    pub fn with_clock(config: &EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_parts(config, clock, None)
    }

    /// Engine over a caller-supplied catalog; `reset` restores this catalog
    #[must_use]
    pub fn with_catalog(
        config: &EngineConfig,
        clock: Arc<dyn Clock>,
        catalog: Vec<Conference>,
    ) -> Self {
        Self::with_parts(config, clock, Some(catalog))
    }

    fn with_parts(
        config: &EngineConfig,
        clock: Arc<dyn Clock>,
        catalog: Option<Vec<Conference>>,
    ) -> Self {
        let catalog = catalog.unwrap_or_else(|| seed_catalog(clock.now()));
        info!(conferences = catalog.len(), "loaded conference catalog");
        Self {
            state: RwLock::new(StoreState::new(catalog.clone())),
            catalog,
            clock,
            hold_duration: config.hold_duration(),
            events: EventBus::new(config.event_capacity),
        }
    }

    /// How long a new hold lasts
    #[must_use]
    pub const fn hold_duration(&self) -> TimeDelta {
        self.hold_duration
    }

    /// Receive engine events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned store lock");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned store lock");
            poisoned.into_inner()
        })
    }

    // ------------------------------------------------------------------
    // Requesters
    // ------------------------------------------------------------------

    /// Register a requester; contacts are unique ignoring case and padding
    pub fn create_user(&self, name: &str, email: &str) -> Result<User> {
        let now = self.clock.now();
        let mut state = self.write();
        let user = state.users.create(name, email, now)?;
        debug!(user_id = %user.id, "created user");
        self.events
            .publish(EngineEvent::UserCreated { user_id: user.id });
        Ok(user)
    }

    pub fn get_user(&self, user_id: &UserId) -> Result<User> {
        self.read().users.get(user_id).cloned()
    }

    pub fn find_user_by_contact(&self, contact: &str) -> Option<User> {
        self.read().users.find_by_contact(contact).cloned()
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    /// Every conference in identifier order, with derived counters
    pub fn list_conferences(&self) -> Vec<ConferenceListing> {
        let now = self.clock.now();
        let state = self.read();
        state
            .inventory
            .iter()
            .map(|conference| ConferenceListing {
                conference: conference.clone(),
                stats: state.stats(&conference.id, now),
            })
            .collect()
    }

    pub fn get_conference(&self, conference_id: &ConferenceId) -> Result<Conference> {
        self.read().inventory.get(conference_id).cloned()
    }

    /// Held tickets and queue length for one conference, without purging
    pub fn conference_stats(&self, conference_id: &ConferenceId) -> Result<ConferenceStats> {
        let now = self.clock.now();
        let state = self.read();
        state.inventory.get(conference_id)?;
        Ok(state.stats(conference_id, now))
    }

    /// Buy tickets outright, without a hold
    ///
    /// Tickets promised to unexpired holds are not for sale, so a direct
    /// booking can never push `available_tickets` below what outstanding
    /// holds may still confirm.
    pub fn book(&self, user_id: &UserId, conference_id: &ConferenceId, count: u32) -> Result<Booking> {
        ensure_count(count)?;
        let now = self.clock.now();
        let mut state = self.write();
        state.purge_expired(now, &self.events);

        state.users.get(user_id)?;
        let conference = state.inventory.get(conference_id)?;
        let free = state.reservations.effective_availability(conference, now);
        let total = conference.price_for(count);

        if let Err(e) = state.inventory.take(conference_id, count, free) {
            debug!(%conference_id, count, error = %e, "direct booking rejected");
            return Err(e);
        }
        let booking = state
            .bookings
            .record(*user_id, conference_id.clone(), count, total, now);

        debug!(booking_id = %booking.id, %conference_id, count, "direct booking created");
        self.events.publish(EngineEvent::BookingCreated {
            booking: booking.clone(),
        });
        Ok(booking)
    }

    /// A booking with current requester and conference snapshots
    pub fn get_booking(&self, booking_id: &BookingId) -> Result<BookingDetails> {
        let state = self.read();
        let booking = state
            .bookings
            .get(booking_id)
            .ok_or_else(|| BookingError::not_found(Entity::Booking, booking_id))?;
        Ok(BookingDetails {
            booking: booking.clone(),
            user: state.users.get(&booking.user_id)?.clone(),
            conference: state.inventory.get(&booking.conference_id)?.clone(),
        })
    }

    pub fn bookings_for_user(&self, user_id: &UserId) -> Vec<Booking> {
        self.read().bookings.for_user(user_id).cloned().collect()
    }

    /// Every booking with snapshots, oldest first
    pub fn all_bookings(&self) -> Vec<BookingDetails> {
        let state = self.read();
        state
            .bookings
            .iter()
            .filter_map(|booking| {
                let user = state.users.get(&booking.user_id).ok()?;
                let conference = state.inventory.get(&booking.conference_id).ok()?;
                Some(BookingDetails {
                    booking: booking.clone(),
                    user: user.clone(),
                    conference: conference.clone(),
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Reservations
    // ------------------------------------------------------------------

    /// Place a hold on `count` tickets
    pub fn create_reservation(
        &self,
        user_id: &UserId,
        conference_id: &ConferenceId,
        count: u32,
    ) -> Result<ReservationReceipt> {
        ensure_count(count)?;
        let now = self.clock.now();
        let mut state = self.write();
        state.purge_expired(now, &self.events);

        state.users.get(user_id)?;
        let conference = state.inventory.get(conference_id)?.clone();

        if state.reservations.has_active(user_id, conference_id, now) {
            debug!(%user_id, %conference_id, "duplicate active reservation");
            return Err(BookingError::DuplicateActiveReservation {
                user_id: user_id.to_string(),
                conference_id: conference_id.to_string(),
            });
        }
        if let Err(e) = state.reservations.ensure_available(&conference, count, now) {
            debug!(%conference_id, count, error = %e, "reservation rejected");
            return Err(e);
        }

        let reservation =
            state
                .reservations
                .hold(*user_id, &conference, count, now, self.hold_duration)?;

        debug!(
            reservation_id = %reservation.id,
            %conference_id,
            count,
            expires_at = %reservation.expires_at,
            "reservation created"
        );
        self.events.publish(EngineEvent::ReservationCreated {
            reservation: reservation.clone(),
        });
        Ok(ReservationReceipt {
            reservation,
            conference,
        })
    }

    /// Turn an unexpired hold into a booking
    ///
    /// An elapsed hold is discarded and reported as `Expired`; once gone it
    /// is `NotFound` like any other unknown id.
    pub fn confirm_reservation(&self, reservation_id: &ReservationId) -> Result<BookingReceipt> {
        let now = self.clock.now();
        let mut state = self.write();

        let reservation = state
            .reservations
            .get(reservation_id)
            .ok_or_else(|| BookingError::not_found(Entity::Reservation, reservation_id))?
            .clone();

        if !reservation.is_active(now) {
            state.reservations.remove(reservation_id);
            debug!(%reservation_id, "confirm on expired reservation");
            self.events.publish(EngineEvent::ReservationExpired {
                reservation_id: *reservation_id,
                conference_id: reservation.conference_id.clone(),
            });
            return Err(BookingError::Expired {
                id: reservation_id.to_string(),
            });
        }

        // The hold's own tickets are part of what it may take.
        let conference = state.inventory.get(&reservation.conference_id)?;
        let free = state.reservations.effective_availability(conference, now)
            + reservation.ticket_count;
        let conference = state
            .inventory
            .take(&reservation.conference_id, reservation.ticket_count, free)?
            .clone();

        state.reservations.remove(reservation_id);
        let booking = state.bookings.record(
            reservation.user_id,
            reservation.conference_id.clone(),
            reservation.ticket_count,
            reservation.total_amount_cents,
            now,
        );

        debug!(%reservation_id, booking_id = %booking.id, "reservation confirmed");
        self.events.publish(EngineEvent::ReservationConfirmed {
            reservation_id: *reservation_id,
            booking_id: booking.id,
        });
        Ok(BookingReceipt {
            booking,
            conference,
        })
    }

    /// Drop a hold, expired or not
    pub fn cancel_reservation(&self, reservation_id: &ReservationId) -> Result<()> {
        let mut state = self.write();
        state
            .reservations
            .remove(reservation_id)
            .ok_or_else(|| BookingError::not_found(Entity::Reservation, reservation_id))?;

        debug!(%reservation_id, "reservation cancelled");
        self.events.publish(EngineEvent::ReservationCancelled {
            reservation_id: *reservation_id,
        });
        Ok(())
    }

    /// Purge, then read one hold with its remaining time
    pub fn get_reservation(&self, reservation_id: &ReservationId) -> Result<ReservationView> {
        let now = self.clock.now();
        let mut state = self.write();
        state.purge_expired(now, &self.events);
        state.view(reservation_id, now)
    }

    /// Purge, then read a requester's active holds, oldest first
    pub fn reservations_for_user(&self, user_id: &UserId) -> Vec<ReservationView> {
        let now = self.clock.now();
        let mut state = self.write();
        state.purge_expired(now, &self.events);
        let ids: Vec<ReservationId> = state
            .reservations
            .active_for_user(user_id, now)
            .iter()
            .map(|r| r.id)
            .collect();
        ids.iter()
            .filter_map(|id| state.view(id, now).ok())
            .collect()
    }

    /// Discard every elapsed hold; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let purged = self.write().purge_expired(now, &self.events);
        if purged > 0 {
            info!(purged, "purged expired reservations");
        }
        purged
    }

    // ------------------------------------------------------------------
    // Wait queue
    // ------------------------------------------------------------------

    /// Join a conference's wait queue, returning the 1-based position
    ///
    /// A requester already queued keeps their place; only the requested
    /// ticket count is updated.
    pub fn enqueue(&self, user_id: &UserId, conference_id: &ConferenceId, count: u32) -> Result<usize> {
        ensure_count(count)?;
        let now = self.clock.now();
        let mut state = self.write();
        let outcome = state.queue.enqueue(*user_id, conference_id, count, now);

        debug!(%user_id, %conference_id, position = outcome.position, joined = outcome.joined, "enqueued");
        if outcome.joined {
            self.events.publish(EngineEvent::QueueJoined {
                user_id: *user_id,
                conference_id: conference_id.clone(),
                position: outcome.position,
            });
        }
        Ok(outcome.position)
    }

    /// 1-based queue position, `None` when not queued
    pub fn queue_position(&self, user_id: &UserId, conference_id: &ConferenceId) -> Option<usize> {
        self.read().queue.position(user_id, conference_id)
    }

    /// Convert the head of the queue into a hold
    ///
    /// Only the head may claim. On any failure the queue is left untouched
    /// and the head may retry later.
    pub fn claim(&self, user_id: &UserId, conference_id: &ConferenceId) -> Result<ReservationReceipt> {
        let now = self.clock.now();
        let mut state = self.write();

        let count = match state.queue.head(conference_id) {
            Some(head) if &head.user_id == user_id => head.ticket_count,
            _ => {
                debug!(%user_id, %conference_id, "claim out of turn");
                return Err(BookingError::NotYourTurn {
                    conference_id: conference_id.to_string(),
                });
            },
        };

        state.purge_expired(now, &self.events);
        state.users.get(user_id)?;
        let conference = state.inventory.get(conference_id)?.clone();
        if let Err(e) = state.reservations.ensure_available(&conference, count, now) {
            debug!(%conference_id, count, error = %e, "claim rejected");
            return Err(e);
        }

        // The head owns the front slot, so the one-hold-per-requester check
        // does not apply here.
        let reservation = state
            .reservations
            .hold(*user_id, &conference, count, now, self.hold_duration)?;
        state.queue.pop_head(conference_id);

        debug!(reservation_id = %reservation.id, %conference_id, count, "queue head claimed");
        self.events.publish(EngineEvent::ReservationCreated {
            reservation: reservation.clone(),
        });
        self.events.publish(EngineEvent::QueueClaimed {
            user_id: *user_id,
            conference_id: conference_id.clone(),
            reservation_id: reservation.id,
        });
        Ok(ReservationReceipt {
            reservation,
            conference,
        })
    }

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    /// Discard all state and reload the catalog the engine was built with
    pub fn reset(&self) {
        let mut state = self.write();
        *state = StoreState::new(self.catalog.clone());
        info!(conferences = self.catalog.len(), "store reset");
    }

    /// Tickets sold per the booking ledger, for invariant checks
    pub fn booked_tickets(&self, conference_id: &ConferenceId) -> u32 {
        self.read().bookings.booked_for(conference_id)
    }

    /// Holds physically present, including elapsed ones not yet purged
    pub fn stored_reservations(&self) -> usize {
        self.read().reservations.len()
    }
}

fn ensure_count(count: u32) -> Result<()> {
    if count == 0 {
        return Err(BookingError::InvalidRequest(
            "ticket count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::test_utils::{TestEngine, small_conference};

    #[test]
    fn test_reserve_then_confirm_moves_tickets_once() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");

        let receipt = t.storage.create_reservation(&alice, &t.conf, 2).unwrap();
        assert_eq!(receipt.conference.available_tickets, 5);
        assert_eq!(t.storage.conference_stats(&t.conf).unwrap().reserved_count, 2);

        let confirmed = t
            .storage
            .confirm_reservation(&receipt.reservation.id)
            .unwrap();
        assert_eq!(confirmed.conference.available_tickets, 3);
        assert_eq!(confirmed.booking.tickets_booked, 2);
        assert_eq!(confirmed.booking.total_amount_cents, receipt.reservation.total_amount_cents);
        assert_eq!(t.storage.conference_stats(&t.conf).unwrap().reserved_count, 0);
    }

    #[test]
    fn test_direct_booking_cannot_take_held_tickets() {
        let t = TestEngine::with_capacity(2);
        let alice = t.user("alice@example.com");
        let bob = t.user("bob@example.com");

        t.storage.create_reservation(&alice, &t.conf, 2).unwrap();
        let err = t.storage.book(&bob, &t.conf, 1).unwrap_err();
        assert!(matches!(
            err,
            BookingError::InsufficientInventory { requested: 1, available: 0 }
        ));
    }

    #[test]
    fn test_confirm_after_expiry_reports_expired_once() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");
        let id = t
            .storage
            .create_reservation(&alice, &t.conf, 1)
            .unwrap()
            .reservation
            .id;

        t.clock.advance(TimeDelta::seconds(15));
        assert!(matches!(
            t.storage.confirm_reservation(&id),
            Err(BookingError::Expired { .. })
        ));
        assert!(matches!(
            t.storage.confirm_reservation(&id),
            Err(BookingError::NotFound { entity: Entity::Reservation, .. })
        ));
        assert_eq!(t.storage.get_conference(&t.conf).unwrap().available_tickets, 5);
    }

    #[test]
    fn test_cancel_is_unconditional_then_not_found() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");
        let id = t
            .storage
            .create_reservation(&alice, &t.conf, 1)
            .unwrap()
            .reservation
            .id;

        t.clock.advance(TimeDelta::seconds(60));
        assert!(t.storage.cancel_reservation(&id).is_ok());
        assert!(matches!(
            t.storage.cancel_reservation(&id),
            Err(BookingError::NotFound { .. })
        ));
    }

    #[test]
    fn test_get_reservation_reports_remaining_time() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");
        let id = t
            .storage
            .create_reservation(&alice, &t.conf, 1)
            .unwrap()
            .reservation
            .id;

        t.clock.advance(TimeDelta::seconds(5));
        let view = t.storage.get_reservation(&id).unwrap();
        assert_eq!(view.remaining, std::time::Duration::from_secs(10));
        assert!(!view.expired);

        t.clock.advance(TimeDelta::seconds(10));
        assert!(matches!(
            t.storage.get_reservation(&id),
            Err(BookingError::NotFound { .. })
        ));
        assert_eq!(t.storage.stored_reservations(), 0);
    }

    #[test]
    fn test_unknown_references() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");
        let missing = ConferenceId::from("conf-404");

        assert!(matches!(
            t.storage.book(&alice, &missing, 1),
            Err(BookingError::NotFound { entity: Entity::Conference, .. })
        ));
        assert!(matches!(
            t.storage.create_reservation(&UserId::new(), &t.conf, 1),
            Err(BookingError::NotFound { entity: Entity::User, .. })
        ));
        assert!(matches!(
            t.storage.get_booking(&BookingId::new()),
            Err(BookingError::NotFound { entity: Entity::Booking, .. })
        ));
        assert!(t.storage.conference_stats(&missing).is_err());
    }

    #[test]
    fn test_zero_count_is_invalid() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");

        assert!(matches!(
            t.storage.book(&alice, &t.conf, 0),
            Err(BookingError::InvalidRequest(_))
        ));
        assert!(matches!(
            t.storage.create_reservation(&alice, &t.conf, 0),
            Err(BookingError::InvalidRequest(_))
        ));
        assert!(matches!(
            t.storage.enqueue(&alice, &t.conf, 0),
            Err(BookingError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_claim_failure_keeps_head_in_place() {
        let t = TestEngine::with_capacity(1);
        let alice = t.user("alice@example.com");
        let bob = t.user("bob@example.com");

        t.storage.create_reservation(&alice, &t.conf, 1).unwrap();
        t.storage.enqueue(&bob, &t.conf, 1).unwrap();

        assert!(matches!(
            t.storage.claim(&bob, &t.conf),
            Err(BookingError::InsufficientInventory { .. })
        ));
        assert_eq!(t.storage.queue_position(&bob, &t.conf), Some(1));

        t.clock.advance(TimeDelta::seconds(15));
        let receipt = t.storage.claim(&bob, &t.conf).unwrap();
        assert_eq!(receipt.reservation.user_id, bob);
        assert_eq!(t.storage.queue_position(&bob, &t.conf), None);
    }

    #[test]
    fn test_claim_bypasses_duplicate_check() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");

        t.storage.create_reservation(&alice, &t.conf, 1).unwrap();
        t.storage.enqueue(&alice, &t.conf, 2).unwrap();
        let receipt = t.storage.claim(&alice, &t.conf).unwrap();
        assert_eq!(receipt.reservation.ticket_count, 2);
        assert_eq!(t.storage.conference_stats(&t.conf).unwrap().reserved_count, 3);
    }

    #[test]
    fn test_claim_for_unknown_conference_with_queue() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");
        let missing = ConferenceId::from("conf-404");

        assert!(matches!(
            t.storage.claim(&alice, &missing),
            Err(BookingError::NotYourTurn { .. })
        ));
        t.storage.enqueue(&alice, &missing, 1).unwrap();
        assert!(matches!(
            t.storage.claim(&alice, &missing),
            Err(BookingError::NotFound { entity: Entity::Conference, .. })
        ));
        assert_eq!(t.storage.queue_position(&alice, &missing), Some(1));
    }

    #[test]
    fn test_events_follow_commit_order() {
        let t = TestEngine::with_capacity(5);
        let mut rx = t.storage.subscribe();
        let alice = t.user("alice@example.com");

        let id = t
            .storage
            .create_reservation(&alice, &t.conf, 1)
            .unwrap()
            .reservation
            .id;
        let booking = t.storage.confirm_reservation(&id).unwrap().booking;

        assert!(matches!(rx.try_recv().unwrap(), EngineEvent::UserCreated { .. }));
        assert!(matches!(rx.try_recv().unwrap(), EngineEvent::ReservationCreated { .. }));
        assert_eq!(
            rx.try_recv().unwrap(),
            EngineEvent::ReservationConfirmed {
                reservation_id: id,
                booking_id: booking.id
            }
        );
    }

    #[test]
    fn test_reset_restores_catalog() {
        let clock = Arc::new(ManualClock::default());
        let storage = MemoryStorage::with_catalog(
            &EngineConfig::default(),
            clock,
            vec![small_conference("conf-a", 3)],
        );
        let user = storage.create_user("A", "a@example.com").unwrap();
        let conf = ConferenceId::from("conf-a");
        storage.book(&user.id, &conf, 3).unwrap();
        assert_eq!(storage.get_conference(&conf).unwrap().available_tickets, 0);

        storage.reset();
        assert_eq!(storage.get_conference(&conf).unwrap().available_tickets, 3);
        assert!(storage.get_user(&user.id).is_err());
        assert!(storage.all_bookings().is_empty());
    }

    #[test]
    fn test_unrepresentable_hold_duration_fails_without_panicking() {
        let config = EngineConfig {
            hold_duration_secs: 10_000_000_000_000,
            ..EngineConfig::default()
        };
        let storage = MemoryStorage::with_catalog(
            &config,
            Arc::new(ManualClock::default()),
            vec![small_conference("conf-a", 3)],
        );
        let user = storage.create_user("A", "a@example.com").unwrap();
        let conf = ConferenceId::from("conf-a");

        assert!(matches!(
            storage.create_reservation(&user.id, &conf, 1),
            Err(BookingError::InvalidRequest(_))
        ));

        storage.enqueue(&user.id, &conf, 1).unwrap();
        assert!(matches!(
            storage.claim(&user.id, &conf),
            Err(BookingError::InvalidRequest(_))
        ));
        // the failed claim keeps the head in place and the engine stays usable
        assert_eq!(storage.queue_position(&user.id, &conf), Some(1));
        assert_eq!(storage.stored_reservations(), 0);
        assert!(storage.book(&user.id, &conf, 1).is_ok());
    }
}
