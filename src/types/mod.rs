//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `tenant`: Tenant records, payments and balance mutations
//! - `config`: Policy constants
//! - `input`: Parsing of raw primitive inputs
//! - `error`: Error types for the rent ledger

pub mod config;
pub mod error;
pub mod input;
pub mod tenant;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use tenant::{DueMutation, Payment, Tenant, TenantMap, TenantName};
