//! Configuration types for the Attendance Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section and
//! field has a default, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Where records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// One JSON file per key in a directory.
    #[default]
    File,
    /// Process memory only.
    Memory,
}

/// Record store settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Which store implementation to use.
    pub backend: StoreBackend,
    /// Directory for the `file` backend.
    pub directory: PathBuf,
    /// Whether unparseable collections raise `CorruptStore` instead of
    /// loading as empty.
    pub strict: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            directory: PathBuf::from("./data"),
            strict: false,
        }
    }
}

/// What to do when an employee clocks in twice on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateClockInPolicy {
    /// Fail the second clock-in with `AlreadyClockedIn`.
    #[default]
    Reject,
    /// Append another record for the same day.
    Allow,
}

/// Attendance engine settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttendanceConfig {
    /// Handling of a second clock-in on the same day.
    pub duplicate_clock_in: DuplicateClockInPolicy,
}

/// Leave engine settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeaveConfig {
    /// Reject applications whose `end_date` is before `start_date`.
    pub validate_date_range: bool,
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            validate_date_range: true,
        }
    }
}

/// Placeholder identity settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// The one-time code accepted at login.
    pub access_code: String,
    /// Number of progress steps in the simulated face scan.
    pub face_scan_steps: u32,
    /// Delay between face scan steps, in milliseconds.
    pub face_scan_interval_ms: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            access_code: "123456".to_string(),
            face_scan_steps: 10,
            face_scan_interval_ms: 200,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Record store settings.
    pub store: StoreConfig,
    /// Attendance settings.
    pub attendance: AttendanceConfig,
    /// Leave settings.
    pub leave: LeaveConfig,
    /// Identity settings.
    pub identity: IdentityConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: EngineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(
            config.attendance.duplicate_clock_in,
            DuplicateClockInPolicy::Reject
        );
        assert!(config.leave.validate_date_range);
        assert_eq!(config.identity.access_code, "123456");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let yaml = r#"
identity:
  face_scan_interval_ms: 0
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.identity.face_scan_interval_ms, 0);
        assert_eq!(config.identity.face_scan_steps, 10);
        assert_eq!(config.identity.access_code, "123456");
    }

    #[test]
    fn test_policy_values_parse() {
        let yaml = r#"
store:
  backend: memory
attendance:
  duplicate_clock_in: allow
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(
            config.attendance.duplicate_clock_in,
            DuplicateClockInPolicy::Allow
        );
    }
}
