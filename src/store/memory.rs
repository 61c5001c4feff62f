//! In-memory record store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::EngineResult;

use super::RecordStore;

/// A [`RecordStore`] backed by a map in process memory.
///
/// Used by tests and by the `memory` store backend; nothing survives the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    // A writer that panicked mid-insert still leaves a consistent map.
    fn read_guard(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.values.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.values.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.read_guard().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> EngineResult<()> {
        self.write_guard().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> EngineResult<()> {
        self.write_guard().remove(key);
        Ok(())
    }
}
