use super::{Conference, ConferenceId};
use chrono::{DateTime, Utc};

/// Builder for creating Conference instances
#[derive(Default)]
pub struct ConferenceBuilder {
    id: Option<ConferenceId>,
    name: Option<String>,
    location: Option<String>,
    total_tickets: u32,
    available_tickets: Option<u32>,
    price_cents: u64,
    date: Option<DateTime<Utc>>,
}

impl ConferenceBuilder {
    /// Create a new conference builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conference ID
    #[must_use]
    pub fn id(mut self, id: impl Into<ConferenceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the location
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the fixed total capacity
    #[must_use]
    pub const fn capacity(mut self, total_tickets: u32) -> Self {
        self.total_tickets = total_tickets;
        self
    }

    /// Start with fewer tickets available than the capacity
    ///
    /// Clamped to the capacity when built.
    #[must_use]
    pub const fn available(mut self, available_tickets: u32) -> Self {
        self.available_tickets = Some(available_tickets);
        self
    }

    /// Set the unit price in cents
    #[must_use]
    pub const fn price_cents(mut self, price_cents: u64) -> Self {
        self.price_cents = price_cents;
        self
    }

    /// Set the event date
    #[must_use]
    pub const fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Build the conference
    pub fn build(self) -> Conference {
        let name = self.name.unwrap_or_default();
        let id = self
            .id
            .unwrap_or_else(|| ConferenceId::new(slugify(&name)));
        Conference {
            id,
            name,
            location: self.location.unwrap_or_default(),
            total_tickets: self.total_tickets,
            available_tickets: self
                .available_tickets
                .map_or(self.total_tickets, |a| a.min(self.total_tickets)),
            price_cents: self.price_cents,
            date: self.date.unwrap_or_else(Utc::now),
        }
    }
}

fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
