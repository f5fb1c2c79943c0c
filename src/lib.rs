//! conference-booking - In-memory conference ticket inventory
//!
//! This crate provides a thread-safe booking engine with features including:
//! - Direct ticket purchases against a fixed-capacity catalog
//! - Temporary seat holds that expire lazily after a fixed duration
//! - A FIFO wait queue per conference with head-only claiming
//! - An HTTP API (feature `api`) and a CLI with a contention simulator

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::map_unwrap_or)]

//! # Concurrent Safety
//!
//! Every engine operation runs inside a single critical section over all
//! state. Readers share the lock; mutations, and reads that first purge
//! expired holds, take it exclusively. A ticket is therefore never sold
//! twice, and a hold never promises seats that another hold or a sale has
//! already claimed.
//!
//! # Example
//!
//! ```rust,ignore
//! use conference_booking::config::EngineConfig;
//! use conference_booking::core::ConferenceId;
//! use conference_booking::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new(&EngineConfig::default());
//! let user = storage.create_user("Ada", "ada@example.com")?;
//!
//! // Hold two seats for 15 seconds, then pay
//! let receipt = storage.create_reservation(&user.id, &ConferenceId::from("conf-1"), 2)?;
//! let booking = storage.confirm_reservation(&receipt.reservation.id)?;
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod storage;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{BookingError, Result};
