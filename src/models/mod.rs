//! Core data models for the Attendance Engine.
//!
//! This module contains the records persisted in the record store and the
//! values derived from them.

mod attendance;
mod employee;
mod leave;

pub use attendance::{AttendanceRecord, AttendanceStatus, LATE_AFTER_HOUR, WorkedDuration};
pub use employee::Employee;
pub use leave::{LeaveApplication, LeaveRequest, LeaveStatus, LeaveType};
