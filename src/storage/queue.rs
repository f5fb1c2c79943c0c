//! Per-conference FIFO wait queues.
//!
//! Positions are 1-based and derived from order at query time. Only removing
//! the head changes anybody else's position.

use crate::core::{ConferenceId, QueueEntry, QueueEntryId, UserId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};

/// Outcome of joining a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enqueued {
    /// 1-based position
    pub position: usize,
    /// False when an existing entry was updated in place
    pub joined: bool,
}

#[derive(Debug, Default)]
pub struct WaitQueue {
    queues: HashMap<ConferenceId, VecDeque<QueueEntry>>,
}

impl WaitQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a requester, or update the ticket count of their existing entry
    pub fn enqueue(
        &mut self,
        user_id: UserId,
        conference_id: &ConferenceId,
        ticket_count: u32,
        now: DateTime<Utc>,
    ) -> Enqueued {
        let queue = self.queues.entry(conference_id.clone()).or_default();

        if let Some(index) = queue.iter().position(|e| e.user_id == user_id) {
            queue[index].ticket_count = ticket_count;
            return Enqueued {
                position: index + 1,
                joined: false,
            };
        }

        queue.push_back(QueueEntry {
            id: QueueEntryId::new(),
            user_id,
            conference_id: conference_id.clone(),
            ticket_count,
            enqueued_at: now,
        });
        Enqueued {
            position: queue.len(),
            joined: true,
        }
    }

    /// 1-based position of a requester, if queued
    pub fn position(&self, user_id: &UserId, conference_id: &ConferenceId) -> Option<usize> {
        self.queues
            .get(conference_id)?
            .iter()
            .position(|e| &e.user_id == user_id)
            .map(|index| index + 1)
    }

    pub fn head(&self, conference_id: &ConferenceId) -> Option<&QueueEntry> {
        self.queues.get(conference_id)?.front()
    }

    /// Remove the head entry; every other entry moves up by one
    pub fn pop_head(&mut self, conference_id: &ConferenceId) -> Option<QueueEntry> {
        let queue = self.queues.get_mut(conference_id)?;
        let head = queue.pop_front();
        if queue.is_empty() {
            self.queues.remove(conference_id);
        }
        head
    }

    pub fn len(&self, conference_id: &ConferenceId) -> usize {
        self.queues.get(conference_id).map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_insertion_order() {
        let mut queue = WaitQueue::new();
        let conf = ConferenceId::from("conf-1");
        let now = Utc::now();
        let users: Vec<_> = (0..4).map(|_| UserId::new()).collect();

        for (i, user) in users.iter().enumerate() {
            let outcome = queue.enqueue(*user, &conf, 1, now);
            assert_eq!(outcome.position, i + 1);
            assert!(outcome.joined);
        }
        for (i, user) in users.iter().enumerate() {
            assert_eq!(queue.position(user, &conf), Some(i + 1));
        }
    }

    #[test]
    fn test_re_enqueue_keeps_position_and_updates_count() {
        let mut queue = WaitQueue::new();
        let conf = ConferenceId::from("conf-1");
        let now = Utc::now();
        let first = UserId::new();
        let second = UserId::new();

        queue.enqueue(first, &conf, 1, now);
        queue.enqueue(second, &conf, 1, now);
        let again = queue.enqueue(first, &conf, 4, now);

        assert_eq!(again, Enqueued { position: 1, joined: false });
        assert_eq!(queue.len(&conf), 2);
        assert_eq!(queue.head(&conf).unwrap().ticket_count, 4);
    }

    #[test]
    fn test_pop_head_shifts_everyone_up() {
        let mut queue = WaitQueue::new();
        let conf = ConferenceId::from("conf-1");
        let now = Utc::now();
        let users: Vec<_> = (0..3).map(|_| UserId::new()).collect();
        for user in &users {
            queue.enqueue(*user, &conf, 1, now);
        }

        let head = queue.pop_head(&conf).unwrap();
        assert_eq!(head.user_id, users[0]);
        assert_eq!(queue.position(&users[0], &conf), None);
        assert_eq!(queue.position(&users[1], &conf), Some(1));
        assert_eq!(queue.position(&users[2], &conf), Some(2));
    }

    #[test]
    fn test_queues_are_per_conference() {
        let mut queue = WaitQueue::new();
        let user = UserId::new();
        let a = ConferenceId::from("a");
        let b = ConferenceId::from("b");

        queue.enqueue(user, &a, 1, Utc::now());
        assert_eq!(queue.position(&user, &a), Some(1));
        assert_eq!(queue.position(&user, &b), None);
        assert_eq!(queue.len(&b), 0);
        assert!(queue.pop_head(&b).is_none());
        assert_eq!(queue.len(&a), 1);
    }
}
