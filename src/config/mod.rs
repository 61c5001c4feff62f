//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the engine settings from a YAML file: the record store
//! backend, the duplicate clock-in policy, leave validation and the
//! placeholder identity settings.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/portal.yaml").unwrap();
//! println!("Store backend: {:?}", config.config().store.backend);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceConfig, DuplicateClockInPolicy, EngineConfig, IdentityConfig, LeaveConfig,
    StoreBackend, StoreConfig,
};
