//! Storage layer for Tranzero.
//!
//! Persistence is deliberately thin: a [`CustomerStore`] holds whole
//! customer documents per team, and every mutation is a read-modify-write
//! of one document. The repositories on top enforce validation before any
//! write and record activity after every successful one.

pub mod activity;
pub mod memory;
pub mod repositories;
pub mod store;

pub use activity::{ActivityRecorder, LogActivityRecorder, MemoryActivityRecorder};
pub use memory::MemoryStore;
pub use repositories::{CustomerRepository, LedgerRepository, RepositoryError};
pub use store::{CustomerStore, StoreError};
