//! Core business logic module
//!
//! This module contains the rent ledger components:
//! - `traits` - Storage abstractions for interchangeable backends
//! - `store` - Key-value tenant stores (in-memory and file-backed)
//! - `accrual` - Rent accrual from elapsed time
//! - `portfolio` - Read-only status, profile and pending queries
//! - `ledger` - Operation orchestration over an injected store

pub mod accrual;
pub mod ledger;
pub mod portfolio;
pub mod store;
pub mod traits;

pub use accrual::AccrualCalculator;
pub use ledger::RentLedger;
pub use portfolio::{PendingEntry, PendingReport, RentStatus, TenantProfile};
pub use store::{FileBackend, KvTenantStore, MemoryBackend, STORAGE_KEY};
pub use traits::{KeyValueBackend, TenantStore};
