//! Requester directory with case-insensitive contact uniqueness.

use crate::core::{User, UserId, normalize_contact};
use crate::error::{BookingError, Entity, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<UserId, User>,
    by_contact: HashMap<String, UserId>,
}

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a requester. The stored email is the normalized form.
    pub fn create(&mut self, name: &str, email: &str, now: DateTime<Utc>) -> Result<User> {
        let contact = normalize_contact(email);
        if contact.is_empty() {
            return Err(BookingError::InvalidRequest(
                "email must not be empty".to_string(),
            ));
        }
        if self.by_contact.contains_key(&contact) {
            return Err(BookingError::DuplicateContact {
                contact: email.trim().to_string(),
            });
        }

        let user = User {
            id: UserId::new(),
            name: name.trim().to_string(),
            email: contact.clone(),
            created_at: now,
        };
        self.by_contact.insert(contact, user.id);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn get(&self, id: &UserId) -> Result<&User> {
        self.users
            .get(id)
            .ok_or_else(|| BookingError::not_found(Entity::User, id))
    }

    pub fn find_by_contact(&self, contact: &str) -> Option<&User> {
        self.by_contact
            .get(&normalize_contact(contact))
            .and_then(|id| self.users.get(id))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
