//! Request types for the Attendance Engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{LeaveApplication, LeaveType};

/// Request body for `POST /session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The employee signing in.
    pub employee_id: String,
    /// The one-time code.
    pub code: String,
}

/// Request body for `POST /leaves`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyLeaveRequest {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Free-text reason, required.
    pub reason: String,
}

impl ApplyLeaveRequest {
    /// Checks the fields the engine leaves to the calling layer.
    pub fn validate(&self) -> Result<(), String> {
        if self.reason.trim().is_empty() {
            return Err("reason must not be empty".to_string());
        }
        Ok(())
    }
}

impl From<ApplyLeaveRequest> for LeaveApplication {
    fn from(req: ApplyLeaveRequest) -> Self {
        LeaveApplication {
            start_date: req.start_date,
            end_date: req.end_date,
            leave_type: req.leave_type,
            reason: req.reason,
        }
    }
}
