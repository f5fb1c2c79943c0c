//! Storage layer
//!
//! All state lives in memory inside [`MemoryStorage`]. The individual ledgers
//! are plain single-threaded structures; `MemoryStorage` composes them under
//! one lock so each operation is atomic across all of them.

mod bookings;
mod inventory;
mod memory;
mod queue;
mod repository;
mod reservations;
mod sweeper;
mod users;

pub use bookings::BookingLedger;
pub use inventory::{InventoryStore, seed_catalog};
pub use memory::MemoryStorage;
pub use queue::{Enqueued, WaitQueue};
pub use repository::BookingRepository;
pub use reservations::ReservationLedger;
pub use sweeper::{SweeperHandle, spawn_sweeper};
pub use users::UserDirectory;
