//! The attendance and leave engines.
//!
//! Both engines are cheap to clone and hold no records between calls; every
//! operation reads the current collection from the record store, changes it,
//! and writes it back whole.

mod attendance;
mod leave;

pub use attendance::{AttendanceEngine, worked_duration};
pub use leave::LeaveEngine;
