//! Directory-backed record store.
//!
//! Each key lives in its own `<key>.json` file under the store directory.
//! Every write goes to its own uniquely named temporary file in the store
//! directory and is renamed into place, so readers see either the previous
//! value or the new one, never a partial file.
//!
//! All I/O is blocking `std::fs`. The HTTP handlers run engine calls on the
//! blocking thread pool for that reason.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::RecordStore;

/// A [`RecordStore`] persisting one JSON file per key.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::store::{FileStore, RecordStore};
///
/// let store = FileStore::open("./data")?;
/// store.write("leave_requests", "[]")?;
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Opens a store in `directory`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(directory: P) -> EngineResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| EngineError::StoreIo {
            key: directory.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { directory })
    }

    /// The directory holding the key files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }

    fn io_error(key: &str, e: std::io::Error) -> EngineError {
        EngineError::StoreIo {
            key: key.to_string(),
            message: e.to_string(),
        }
    }
}

impl RecordStore for FileStore {
    fn read(&self, key: &str) -> EngineResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> EngineResult<()> {
        let path = self.path_for(key);

        // Dropping the staging file on any error path deletes it.
        let mut staging = Builder::new()
            .prefix(&format!(".{}.", key))
            .suffix(".json.tmp")
            .tempfile_in(&self.directory)
            .map_err(|e| Self::io_error(key, e))?;
        staging
            .write_all(value.as_bytes())
            .map_err(|e| Self::io_error(key, e))?;
        staging
            .persist(&path)
            .map_err(|e| Self::io_error(key, e.error))?;

        debug!(key, bytes = value.len(), path = %path.display(), "Wrote store file");
        Ok(())
    }

    fn remove(&self, key: &str) -> EngineResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.read("attendance_records").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_key_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("attendance_records", "[]").unwrap();

        let on_disk = fs::read_to_string(dir.path().join("attendance_records.json")).unwrap();
        assert_eq!(on_disk, "[]");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "staging files must not be left behind");
    }

    #[test]
    fn test_concurrent_writers_never_expose_partial_values() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        // Large enough that a write is not a single syscall.
        let values: Vec<String> = (0..8)
            .map(|n| {
                let records: Vec<String> = (0..5_000).map(|i| format!("writer-{}-{}", n, i)).collect();
                serde_json::to_string(&records).unwrap()
            })
            .collect();

        std::thread::scope(|scope| {
            for value in &values {
                let store = &store;
                scope.spawn(move || {
                    for _ in 0..50 {
                        store.write("attendance_records", value).unwrap();
                        let raw = store.read("attendance_records").unwrap().unwrap();
                        assert!(
                            serde_json::from_str::<Vec<String>>(&raw).is_ok(),
                            "read a partially written value"
                        );
                    }
                });
            }
        });

        let last = store.read("attendance_records").unwrap().unwrap();
        assert!(values.contains(&last));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        FileStore::open(dir.path())
            .unwrap()
            .write("employee", r#"{"employee_id":"EMP001"}"#)
            .unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.read("employee").unwrap().as_deref(),
            Some(r#"{"employee_id":"EMP001"}"#)
        );
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("portal").join("data");

        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.directory(), nested.as_path());
    }

    #[test]
    fn test_remove_deletes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("employee", "{}").unwrap();
        store.remove("employee").unwrap();
        assert!(store.read("employee").unwrap().is_none());
        assert!(store.remove("employee").is_ok());
    }
}
