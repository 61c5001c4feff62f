//! Record store access for the Attendance Engine.
//!
//! The engines never hold records across calls. Every operation loads a full
//! collection through a [`Collection`] handle, changes it, and writes the
//! whole collection back.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use attendance_engine::store::{Collection, MemoryStore, RecordStore, LEAVE_REQUESTS};
//! use attendance_engine::models::LeaveRequest;
//!
//! let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
//! let leaves: Collection<LeaveRequest> = Collection::new(store, LEAVE_REQUESTS, false);
//! assert!(leaves.load().unwrap().is_empty());
//! ```

mod file;
mod memory;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key of the attendance record collection.
pub const ATTENDANCE_RECORDS: &str = "attendance_records";

/// Key of the leave request collection.
pub const LEAVE_REQUESTS: &str = "leave_requests";

/// Key of the signed-in employee.
pub const EMPLOYEE: &str = "employee";

/// A local key-value store holding serialized JSON values.
///
/// Implementations only move strings; parsing belongs to [`Collection`] and
/// the session manager. Writes replace the whole value under a key.
pub trait RecordStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn read(&self, key: &str) -> EngineResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> EngineResult<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> EngineResult<()>;
}

/// Typed view of one collection in a [`RecordStore`].
///
/// Records are stored as a flat JSON array of objects. A missing key loads as
/// an empty collection. Content that does not parse also loads as empty
/// unless the handle is strict, in which case it fails with
/// [`EngineError::CorruptStore`].
pub struct Collection<T> {
    store: Arc<dyn RecordStore>,
    key: &'static str,
    strict: bool,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            strict: self.strict,
            _record: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a handle on `key` in `store`.
    pub fn new(store: Arc<dyn RecordStore>, key: &'static str, strict: bool) -> Self {
        Self {
            store,
            key,
            strict,
            _record: PhantomData,
        }
    }

    /// Loads every record in store order.
    pub fn load(&self) -> EngineResult<Vec<T>> {
        let Some(raw) = self.store.read(self.key)? else {
            debug!(collection = self.key, "Collection is empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                debug!(collection = self.key, count = records.len(), "Loaded collection");
                Ok(records)
            }
            Err(e) if self.strict => Err(EngineError::CorruptStore {
                collection: self.key.to_string(),
                message: e.to_string(),
            }),
            Err(e) => {
                warn!(
                    collection = self.key,
                    error = %e,
                    "Stored collection is unparseable, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the stored collection with `records`.
    pub fn save(&self, records: &[T]) -> EngineResult<()> {
        let raw = serde_json::to_string(records).map_err(|e| EngineError::StoreIo {
            key: self.key.to_string(),
            message: e.to_string(),
        })?;
        self.store.write(self.key, &raw)
    }
}
