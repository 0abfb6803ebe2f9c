//! Rent Ledger Library
//! # Overview
//!
//! This library keeps a small landlord's ledger: tenants, the rent they owe,
//! payments against it, and a CSV interchange format for backup and transfer.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Tenant, Payment, LedgerConfig, errors, input parsing)
//! - [`policy`] - Grace-period policies turning dates into overdue days
//! - [`cli`] - CLI arguments parsing and command dispatch
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Operation orchestration over an injected store
//!   - [`core::accrual`] - Rent accrual from elapsed time
//!   - [`core::portfolio`] - Status, profile and pending report queries
//!   - [`core::store`] - Key-value tenant persistence
//! - [`io`] - CSV interchange import and export
//!
//! # Operations
//!
//! - **Add tenant**: register a tenant and accrue what they already owe
//! - **Record payment**: reduce the balance, never below zero
//! - **Increment rent**: raise the balance manually
//! - **Update rent date**: move the rent start and re-accrue, replacing the balance
//! - **Export / Import**: write or replace all tenants as CSV
//!
//! # Accrual
//!
//! With the default policy (10 grace days, 100 per day) a tenant whose rent
//! started 15 days ago owes `(15 - 10) * 100 = 500`.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod policy;
pub mod types;

pub use core::{FileBackend, KvTenantStore, MemoryBackend, RentLedger, TenantStore};
pub use io::{read_tenants_csv, write_tenants_csv};
pub use types::{LedgerConfig, LedgerError, Payment, Tenant, TenantMap, TenantName};
