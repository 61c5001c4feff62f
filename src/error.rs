//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions of the attendance, leave and session operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::LeaveStatus;

/// The main error type for the Attendance Engine.
///
/// Every engine operation returns this error type, so callers (the HTTP layer
/// included) can map failures in one place.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::NoActiveClockIn {
///     employee_id: "EMP001".to_string(),
/// };
/// assert_eq!(error.to_string(), "No active clock-in found for employee 'EMP001' today");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Clock-out was attempted without a clock-in record for today.
    #[error("No active clock-in found for employee '{employee_id}' today")]
    NoActiveClockIn {
        /// The employee that tried to clock out.
        employee_id: String,
    },

    /// A second clock-in was attempted on a day that already has a record.
    #[error("Employee '{employee_id}' already clocked in on {date}")]
    AlreadyClockedIn {
        /// The employee that tried to clock in.
        employee_id: String,
        /// The day that already has a record.
        date: NaiveDate,
    },

    /// The one-time login code did not match.
    #[error("Invalid one-time code")]
    InvalidCode,

    /// An operation needed a signed-in employee but there is no session.
    #[error("No employee is signed in")]
    NotAuthenticated,

    /// The face verification gate returned a negative outcome.
    #[error("Face verification failed for employee '{employee_id}'")]
    VerificationFailed {
        /// The employee whose verification failed.
        employee_id: String,
    },

    /// A leave application contained invalid data.
    #[error("Invalid leave field '{field}': {message}")]
    InvalidLeave {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No leave request exists with the given id.
    #[error("Leave request not found: {leave_id}")]
    LeaveNotFound {
        /// The id that was looked up.
        leave_id: String,
    },

    /// The leave request has already been approved or rejected.
    #[error("Leave request '{leave_id}' is already {status}")]
    LeaveAlreadyDecided {
        /// The id of the decided request.
        leave_id: String,
        /// The status the request already has.
        status: LeaveStatus,
    },

    /// A stored collection could not be parsed (strict store mode only).
    #[error("Stored collection '{collection}' is corrupt: {message}")]
    CorruptStore {
        /// The collection key that failed to parse.
        collection: String,
        /// A description of the parse error.
        message: String,
    },

    /// The record store failed to read or write a key.
    #[error("Record store failure on '{key}': {message}")]
    StoreIo {
        /// The key being accessed.
        key: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
