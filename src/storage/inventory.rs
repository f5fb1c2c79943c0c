//! Inventory store: the conference catalog and the authoritative
//! `available_tickets` counter of each conference.

use crate::core::{Conference, ConferenceBuilder, ConferenceId};
use crate::error::{BookingError, Entity, Result};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;

/// Conference catalog keyed (and therefore ordered) by conference ID
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    conferences: BTreeMap<ConferenceId, Conference>,
}

impl InventoryStore {
    /// Create a store over the given catalog
    pub fn new(catalog: impl IntoIterator<Item = Conference>) -> Self {
        Self {
            conferences: catalog.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    /// Look up a conference
    pub fn get(&self, id: &ConferenceId) -> Result<&Conference> {
        self.conferences
            .get(id)
            .ok_or_else(|| BookingError::not_found(Entity::Conference, id))
    }

    /// All conferences in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &Conference> {
        self.conferences.values()
    }

    pub fn len(&self) -> usize {
        self.conferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conferences.is_empty()
    }

    /// Permanently remove `count` tickets from a conference
    ///
    /// `effectively_free` is the number of tickets not already promised to
    /// someone else; the caller computes it from the reservation ledger. The
    /// counter is only touched once every check has passed.
    pub fn take(
        &mut self,
        id: &ConferenceId,
        count: u32,
        effectively_free: u32,
    ) -> Result<&Conference> {
        let conference = self
            .conferences
            .get_mut(id)
            .ok_or_else(|| BookingError::not_found(Entity::Conference, id))?;

        let available = effectively_free.min(conference.available_tickets);
        if count > available {
            return Err(BookingError::InsufficientInventory {
                requested: count,
                available,
            });
        }

        conference.available_tickets -= count;
        Ok(conference)
    }
}

/// The catalog every fresh engine starts with
pub fn seed_catalog(now: DateTime<Utc>) -> Vec<Conference> {
    vec![
        ConferenceBuilder::new()
            .id("conf-1")
            .name("Go Conference 2024")
            .location("San Francisco")
            .capacity(100)
            .price_cents(29_999)
            .date(now + TimeDelta::days(60))
            .build(),
        ConferenceBuilder::new()
            .id("conf-2")
            .name("DevOps Summit")
            .location("New York")
            .capacity(75)
            .price_cents(39_999)
            .date(now + TimeDelta::days(90))
            .build(),
        ConferenceBuilder::new()
            .id("conf-3")
            .name("Cloud Native Expo")
            .location("Seattle")
            .capacity(150)
            .price_cents(19_999)
            .date(now + TimeDelta::days(45))
            .build(),
    ]
}
