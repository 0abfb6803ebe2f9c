//! Tenant storage
//!
//! This module provides the key-value backends and the [`KvTenantStore`] that
//! keeps the whole tenant mapping as one JSON document under a constant key.
//!
//! # Backends
//!
//! - [`MemoryBackend`]: in-process map, used by tests and throwaway sessions
//! - [`FileBackend`]: one file per key inside a data directory; writes go to a
//!   temporary file in the same directory that is then renamed over the target

use crate::core::traits::{KeyValueBackend, TenantStore};
use crate::types::{LedgerError, TenantMap};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::debug;

/// Key holding the serialized tenant mapping
pub const STORAGE_KEY: &str = "tenants";

/// In-memory key-value backend
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-system key-value backend
///
/// Each key maps to `<dir>/<key>.json`. The directory is created on first
/// write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.dir)?;

        // Same directory as the target so the rename stays on one filesystem
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(self.path_for(key))
            .map_err(|e| LedgerError::from(e.error))?;
        Ok(())
    }
}

/// Tenant store over any key-value backend
///
/// Serializes the full mapping with `serde_json` under [`STORAGE_KEY`].
#[derive(Debug, Default, Clone)]
pub struct KvTenantStore<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> KvTenantStore<B> {
    pub fn new(backend: B) -> Self {
        KvTenantStore { backend }
    }

    /// Mutable access to the underlying backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl KvTenantStore<MemoryBackend> {
    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl KvTenantStore<FileBackend> {
    /// Store persisted inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(dir))
    }
}

impl<B: KeyValueBackend> TenantStore for KvTenantStore<B> {
    fn load(&self) -> Result<TenantMap, LedgerError> {
        let Some(payload) = self.backend.get(STORAGE_KEY)? else {
            debug!("no persisted tenants, starting empty");
            return Ok(TenantMap::new());
        };

        let tenants: TenantMap = serde_json::from_str(&payload)?;
        debug!(count = tenants.len(), "loaded tenants");
        Ok(tenants)
    }

    fn save(&mut self, tenants: &TenantMap) -> Result<(), LedgerError> {
        let payload = serde_json::to_string(tenants)?;
        self.backend.set(STORAGE_KEY, &payload)?;
        debug!(count = tenants.len(), "saved tenants");
        Ok(())
    }
}
