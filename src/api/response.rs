//! Response types for the Attendance Engine API.
//!
//! This module defines the response bodies and the mapping from
//! [`EngineError`] to HTTP error responses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::AttendanceRecord;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 500 response carrying `error`.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::NoActiveClockIn { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("NO_ACTIVE_CLOCK_IN", message),
            ),
            EngineError::AlreadyClockedIn { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("ALREADY_CLOCKED_IN", message),
            ),
            EngineError::InvalidCode => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CODE", message),
            ),
            EngineError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("NOT_AUTHENTICATED", message),
            ),
            EngineError::VerificationFailed { .. } => (
                StatusCode::FORBIDDEN,
                ApiError::new("VERIFICATION_FAILED", message),
            ),
            EngineError::InvalidLeave { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_LEAVE",
                    message,
                    "The leave application contains invalid information",
                ),
            ),
            EngineError::LeaveNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("LEAVE_NOT_FOUND", message),
            ),
            EngineError::LeaveAlreadyDecided { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("LEAVE_ALREADY_DECIDED", message),
            ),
            EngineError::CorruptStore { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CORRUPT_STORE", "Stored records are unreadable", message),
            ),
            EngineError::StoreIo { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Record store failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// An attendance record with its worked duration rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceView {
    /// The stored record.
    #[serde(flatten)]
    pub record: AttendanceRecord,
    /// `"{h}h {m}m"`, or `"Ongoing"` before clock-out.
    pub worked_duration: String,
}

impl From<AttendanceRecord> for AttendanceView {
    fn from(record: AttendanceRecord) -> Self {
        let worked_duration = record.worked_duration().to_string();
        Self {
            record,
            worked_duration,
        }
    }
}
