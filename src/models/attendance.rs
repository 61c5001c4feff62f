//! Attendance record model and related types.
//!
//! This module defines the [`AttendanceRecord`] kept per employee per calendar
//! day, its [`AttendanceStatus`], and the [`WorkedDuration`] derived from it.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

/// Clock-ins after this local hour are classified as late.
///
/// 09:59 is still on time; 10:00 is late.
pub const LATE_AFTER_HOUR: u32 = 9;

/// Attendance classification assigned at clock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Clocked in at or before the cutoff hour.
    Present,
    /// Clocked in after the cutoff hour.
    Late,
    /// No attendance for the day.
    Absent,
}

impl AttendanceStatus {
    /// Classifies a clock-in time by its local hour.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::AttendanceStatus;
    /// use chrono::DateTime;
    ///
    /// let on_time = DateTime::parse_from_rfc3339("2026-01-15T09:59:00+10:00").unwrap();
    /// assert_eq!(AttendanceStatus::for_clock_in(on_time), AttendanceStatus::Present);
    ///
    /// let late = DateTime::parse_from_rfc3339("2026-01-15T10:00:00+10:00").unwrap();
    /// assert_eq!(AttendanceStatus::for_clock_in(late), AttendanceStatus::Late);
    /// ```
    pub fn for_clock_in(clock_in: DateTime<FixedOffset>) -> Self {
        if clock_in.hour() > LATE_AFTER_HOUR {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::Absent => write!(f, "absent"),
        }
    }
}

/// One employee's attendance for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier, derived from the creation time.
    pub id: String,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// When the employee clocked in.
    pub clock_in: DateTime<FixedOffset>,
    /// When the employee clocked out, once they have.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<DateTime<FixedOffset>>,
    /// The local calendar day of `clock_in`.
    pub date: NaiveDate,
    /// Classification assigned at clock-in.
    pub status: AttendanceStatus,
    /// Outcome of the most recent face verification on this record.
    pub face_verified: bool,
    /// When the record was created.
    pub created_at: DateTime<FixedOffset>,
}

impl AttendanceRecord {
    /// Returns true while the employee has not clocked out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Elapsed time between clock-in and clock-out.
    ///
    /// Sub-minute remainders are truncated. A record without a clock-out is
    /// [`WorkedDuration::Ongoing`].
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRecord, AttendanceStatus, WorkedDuration};
    /// use chrono::{DateTime, NaiveDate};
    ///
    /// let clock_in = DateTime::parse_from_rfc3339("2026-01-15T09:00:00+10:00").unwrap();
    /// let record = AttendanceRecord {
    ///     id: "rec_001".to_string(),
    ///     employee_id: "EMP001".to_string(),
    ///     clock_in,
    ///     clock_out: Some(DateTime::parse_from_rfc3339("2026-01-15T17:30:00+10:00").unwrap()),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     status: AttendanceStatus::Present,
    ///     face_verified: true,
    ///     created_at: clock_in,
    /// };
    /// assert_eq!(record.worked_duration(), WorkedDuration::Elapsed { hours: 8, minutes: 30 });
    /// assert_eq!(record.worked_duration().to_string(), "8h 30m");
    /// ```
    pub fn worked_duration(&self) -> WorkedDuration {
        match self.clock_out {
            None => WorkedDuration::Ongoing,
            Some(clock_out) => {
                let total_minutes = (clock_out - self.clock_in).num_minutes();
                WorkedDuration::Elapsed {
                    hours: total_minutes / 60,
                    minutes: total_minutes % 60,
                }
            }
        }
    }
}

/// Time worked on an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WorkedDuration {
    /// The employee is still clocked in.
    Ongoing,
    /// Whole hours and remaining whole minutes between clock-in and clock-out.
    Elapsed {
        /// Whole hours.
        hours: i64,
        /// Remaining whole minutes.
        minutes: i64,
    },
}

impl fmt::Display for WorkedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkedDuration::Ongoing => write!(f, "Ongoing"),
            WorkedDuration::Elapsed { hours, minutes } => write!(f, "{}h {}m", hours, minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn record(clock_in: &str, clock_out: Option<&str>) -> AttendanceRecord {
        let clock_in = at(clock_in);
        AttendanceRecord {
            id: "rec_001".to_string(),
            employee_id: "EMP001".to_string(),
            clock_in,
            clock_out: clock_out.map(at),
            date: clock_in.date_naive(),
            status: AttendanceStatus::for_clock_in(clock_in),
            face_verified: true,
            created_at: clock_in,
        }
    }

    #[test]
    fn test_clock_in_before_cutoff_is_present() {
        assert_eq!(
            AttendanceStatus::for_clock_in(at("2026-01-15T08:59:00+10:00")),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn test_clock_in_during_cutoff_hour_is_present() {
        assert_eq!(
            AttendanceStatus::for_clock_in(at("2026-01-15T09:59:59+10:00")),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn test_clock_in_at_ten_is_late() {
        assert_eq!(
            AttendanceStatus::for_clock_in(at("2026-01-15T10:00:00+10:00")),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn test_classification_uses_local_hour_not_utc() {
        // 23:30 UTC is 09:30 the next day at +10:00
        assert_eq!(
            AttendanceStatus::for_clock_in(at("2026-01-16T09:30:00+10:00")),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn test_worked_duration_ongoing_without_clock_out() {
        let rec = record("2026-01-15T09:00:00+10:00", None);
        assert!(rec.is_open());
        assert_eq!(rec.worked_duration(), WorkedDuration::Ongoing);
        assert_eq!(rec.worked_duration().to_string(), "Ongoing");
    }

    #[test]
    fn test_worked_duration_eight_and_a_half_hours() {
        let rec = record("2026-01-15T09:00:00+10:00", Some("2026-01-15T17:30:00+10:00"));
        assert_eq!(
            rec.worked_duration(),
            WorkedDuration::Elapsed {
                hours: 8,
                minutes: 30
            }
        );
    }

    #[test]
    fn test_worked_duration_truncates_seconds() {
        let rec = record("2026-01-15T09:00:00+10:00", Some("2026-01-15T09:45:59+10:00"));
        assert_eq!(rec.worked_duration().to_string(), "0h 45m");
    }

    #[test]
    fn test_worked_duration_across_midnight() {
        let rec = record("2026-01-15T22:00:00+10:00", Some("2026-01-16T06:15:00+10:00"));
        assert_eq!(rec.worked_duration().to_string(), "8h 15m");
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Late).unwrap(),
            "\"late\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"present\""
        );
    }

    #[test]
    fn test_deserialize_record_without_clock_out() {
        let json = r#"{
            "id": "1736899200000",
            "employee_id": "EMP001",
            "clock_in": "2026-01-15T08:45:00.000Z",
            "date": "2026-01-15",
            "status": "present",
            "face_verified": true,
            "created_at": "2026-01-15T08:45:00.000Z"
        }"#;

        let rec: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "1736899200000");
        assert!(rec.clock_out.is_none());
        assert_eq!(rec.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_open_record_omits_clock_out_when_serialized() {
        let rec = record("2026-01-15T09:00:00+10:00", None);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("clock_out"));
    }
}
