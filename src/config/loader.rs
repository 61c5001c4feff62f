//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file and opening the configured record store.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::store::{FileStore, MemoryStore, RecordStore};

use super::types::{EngineConfig, StoreBackend};

/// Loads and provides access to the engine configuration.
///
/// # File Layout
///
/// ```text
/// store:
///   backend: file          # file | memory
///   directory: ./data
///   strict: false
/// attendance:
///   duplicate_clock_in: reject   # reject | allow
/// leave:
///   validate_date_range: true
/// identity:
///   access_code: "123456"
///   face_scan_steps: 10
///   face_scan_interval_ms: 200
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/portal.yaml")?;
/// let store = loader.open_store()?;
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML or has wrongly-typed fields (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|message| EngineError::ConfigParseError {
            path: path_str.clone(),
            message,
        })?;

        info!(path = %path_str, backend = ?config.store.backend, "Loaded configuration");
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    fn parse(content: &str) -> Result<EngineConfig, String> {
        // An empty file is a null document, which means "all defaults".
        if content.trim().is_empty() {
            return Ok(EngineConfig::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Opens the record store selected by the `store` section.
    pub fn open_store(&self) -> EngineResult<Arc<dyn RecordStore>> {
        let store = &self.config.store;
        Ok(match store.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File => Arc::new(FileStore::open(&store.directory)?),
        })
    }
}
