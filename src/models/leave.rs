//! Leave request model and related types.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    /// Sick leave.
    Sick,
    /// Casual leave.
    Casual,
    /// Planned vacation.
    Vacation,
    /// Emergency leave.
    Emergency,
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Casual => write!(f, "casual"),
            LeaveType::Vacation => write!(f, "vacation"),
            LeaveType::Emergency => write!(f, "emergency"),
        }
    }
}

/// Decision state of a leave request.
///
/// Requests are created `Pending`; only the approval authority moves them
/// to `Approved` or `Rejected`, and a decided request never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by the authority.
    Approved,
    /// Rejected by the authority.
    Rejected,
}

impl LeaveStatus {
    /// Returns true once the request has been approved or rejected.
    pub fn is_decided(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The fields an employee supplies when applying for leave.
///
/// There is no status field here: a `"status"` key in incoming
/// JSON is ignored, and the engine always creates the request as pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Free-text reason.
    pub reason: String,
}

/// A submitted leave request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: String,
    /// The employee who applied.
    pub employee_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Free-text reason.
    pub reason: String,
    /// Decision state.
    pub status: LeaveStatus,
    /// When the request was submitted.
    pub created_at: DateTime<FixedOffset>,
}
