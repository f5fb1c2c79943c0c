//! Error types for the booking engine
//!
//! Every engine operation returns exactly one of these kinds on failure.
//! The expected, actionable outcomes (`InsufficientInventory`,
//! `DuplicateActiveReservation`, `NotYourTurn`) are ordinary values, not
//! exceptional conditions, and callers are expected to branch on them.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BookingError>;

/// The kind of record a `NotFound` error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Conference,
    User,
    Reservation,
    Booking,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Conference => "Conference",
            Self::User => "User",
            Self::Reservation => "Reservation",
            Self::Booking => "Booking",
        };
        f.write_str(name)
    }
}

/// Errors produced by the booking engine and its front ends
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("Not enough tickets available: requested {requested}, available {available}")]
    InsufficientInventory { requested: u32, available: u32 },

    #[error("User {user_id} already has an active reservation for conference {conference_id}")]
    DuplicateActiveReservation {
        user_id: String,
        conference_id: String,
    },

    #[error("A user with email {contact} already exists")]
    DuplicateContact { contact: String },

    #[error("Reservation {id} has expired")]
    Expired { id: String },

    #[error("Not your turn yet for conference {conference_id}")]
    NotYourTurn { conference_id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl BookingError {
    /// Create a custom error from any message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Shorthand for a `NotFound` error
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable code for this error
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InsufficientInventory { .. } => "insufficient_inventory",
            Self::DuplicateActiveReservation { .. } => "duplicate_active_reservation",
            Self::DuplicateContact { .. } => "duplicate_contact",
            Self::Expired { .. } => "expired",
            Self::NotYourTurn { .. } => "not_your_turn",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Custom(_) => "internal",
        }
    }

    /// Whether the caller can reasonably retry or take another path
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientInventory { .. }
                | Self::DuplicateActiveReservation { .. }
                | Self::NotYourTurn { .. }
                | Self::Expired { .. }
        )
    }

    /// Whether this error came from configuration loading
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => format!("Failed to load configuration: {e}"),
            _ => self.to_string(),
        }
    }

    /// Hints for resolving the error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InsufficientInventory { .. } => vec![
                "Join the wait queue for this conference".to_string(),
                "Retry once outstanding holds expire".to_string(),
            ],
            Self::DuplicateActiveReservation { .. } => vec![
                "Confirm or cancel your existing reservation first".to_string(),
            ],
            Self::Expired { .. } => vec!["Create a new reservation".to_string()],
            Self::NotYourTurn { .. } => {
                vec!["Check your queue position and claim when you reach the front".to_string()]
            },
            Self::Config(_) => vec![
                "Check booking.toml or the BOOKING__* environment variables".to_string(),
            ],
            _ => vec![],
        }
    }
}
