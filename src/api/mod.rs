//! HTTP API module for the Attendance Engine.
//!
//! This module provides the JSON endpoints through which a portal front end
//! signs employees in, clocks them in and out, and files leave requests.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ApplyLeaveRequest, LoginRequest};
pub use response::{ApiError, ApiErrorResponse, AttendanceView};
pub use state::AppState;
