//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use conference_booking::config::EngineConfig;
use conference_booking::core::{ConferenceBuilder, ConferenceId, ManualClock, UserId};
use conference_booking::storage::MemoryStorage;
use std::sync::Arc;

pub struct Fixture {
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
    pub conf: ConferenceId,
}

impl Fixture {
    /// One conference `conf-a` with `capacity` tickets at 50.00 each
    pub fn new(capacity: u32) -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap(),
        ));
        let conference = ConferenceBuilder::new()
            .id("conf-a")
            .name("Conference A")
            .location("Lisbon")
            .capacity(capacity)
            .price_cents(5_000)
            .build();
        let storage = Arc::new(MemoryStorage::with_catalog(
            &EngineConfig::default(),
            clock.clone(),
            vec![conference],
        ));

        Self {
            storage,
            clock,
            conf: ConferenceId::from("conf-a"),
        }
    }

    pub fn user(&self, email: &str) -> UserId {
        self.storage.create_user("Requester", email).unwrap().id
    }

    /// `available + sold == total` and `available <= total`
    pub fn assert_capacity_invariant(&self) {
        let conference = self.storage.get_conference(&self.conf).unwrap();
        let sold = self.storage.booked_tickets(&self.conf);
        assert!(conference.available_tickets <= conference.total_tickets);
        assert_eq!(conference.available_tickets + sold, conference.total_tickets);
    }
}
