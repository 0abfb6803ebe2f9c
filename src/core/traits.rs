//! Core traits for tenant persistence
//!
//! This module defines the trait abstractions that let the ledger run against
//! any durable key-value storage without knowing which one.

use crate::types::{LedgerError, TenantMap};

/// Raw key-value storage of string payloads
///
/// Mirrors the shape of a browser-style local store: one string value per key,
/// whole-value reads and writes.
pub trait KeyValueBackend {
    /// Read the value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Replace the value stored under `key`
    ///
    /// Must be atomic from the caller's point of view: a reader sees either
    /// the old or the new value, never a partial write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError>;
}

/// Durable mapping from tenant name to tenant record
///
/// The store is the single source of truth for tenant state. Implementations
/// load and save the whole mapping at once.
pub trait TenantStore {
    /// Load the persisted mapping
    ///
    /// Returns an empty mapping if nothing was persisted yet, and
    /// [`LedgerError::Format`] if the persisted payload is corrupt.
    fn load(&self) -> Result<TenantMap, LedgerError>;

    /// Overwrite the persisted mapping with `tenants`
    fn save(&mut self, tenants: &TenantMap) -> Result<(), LedgerError>;

    /// Remove a single tenant directly from storage
    ///
    /// Returns whether the tenant existed.
    fn remove(&mut self, name: &str) -> Result<bool, LedgerError> {
        let mut tenants = self.load()?;
        let existed = tenants.remove(name).is_some();
        if existed {
            self.save(&tenants)?;
        }
        Ok(existed)
    }
}
