//! Test utilities for the booking engine
//!
//! Common fixtures so unit tests don't each assemble an engine, a clock and
//! a catalog by hand.

#![cfg(test)]

use crate::config::EngineConfig;
use crate::core::{Conference, ConferenceBuilder, ConferenceId, ManualClock, UserId};
use crate::storage::MemoryStorage;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

/// An engine over a single conference, driven by a manual clock
pub struct TestEngine {
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
    pub conf: ConferenceId,
}

impl TestEngine {
    /// One conference `conf-test` with `capacity` tickets and a 15 second hold
    pub fn with_capacity(capacity: u32) -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let storage = Arc::new(MemoryStorage::with_catalog(
            &EngineConfig::default(),
            clock.clone(),
            vec![small_conference("conf-test", capacity)],
        ));

        Self {
            storage,
            clock,
            conf: ConferenceId::from("conf-test"),
        }
    }

    /// Register a requester and return their id
    pub fn user(&self, email: &str) -> UserId {
        self.storage
            .create_user("Test User", email)
            .expect("Failed to create test user")
            .id
    }
}

/// A conference priced at 10.00 per ticket
pub fn small_conference(id: &str, capacity: u32) -> Conference {
    ConferenceBuilder::new()
        .id(id)
        .name(format!("Conference {id}"))
        .location("Test City")
        .capacity(capacity)
        .price_cents(1_000)
        .build()
}
