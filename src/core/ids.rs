use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a conference
///
/// Conference identifiers are human-assigned slugs such as `conf-1` and are
/// the sort key for catalog listings, so they stay plain strings.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceId(String);

impl ConferenceId {
    /// Create a conference ID from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConferenceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ConferenceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Defines a UUID-backed identifier newtype
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse from the hyphenated string form
            pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }

            /// First eight characters, for log lines and terminal output
            #[must_use]
            pub fn short(&self) -> String {
                self.0.to_string().chars().take(8).collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a requester
    UserId
);
uuid_id!(
    /// Identifier of a seat hold
    ReservationId
);
uuid_id!(
    /// Identifier of a confirmed booking
    BookingId
);
uuid_id!(
    /// Identifier of a wait queue entry
    QueueEntryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conference_ids_sort_lexicographically() {
        let mut ids = vec![
            ConferenceId::from("conf-3"),
            ConferenceId::from("conf-1"),
            ConferenceId::from("conf-2"),
        ];
        ids.sort();
        let raw: Vec<_> = ids.iter().map(ConferenceId::as_str).collect();
        assert_eq!(raw, vec!["conf-1", "conf-2", "conf-3"]);
    }

    #[test]
    fn test_uuid_id_parse_round_trip() {
        let id = ReservationId::new();
        let parsed = ReservationId::parse_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert_eq!(id.short().len(), 8);
        assert!(UserId::parse_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = ConferenceId::from("conf-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"conf-1\"");
    }
}
