//! The attendance engine.
//!
//! Owns the daily clock-in/clock-out lifecycle: today's record, history,
//! lateness classification at clock-in, and worked duration.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::DuplicateClockInPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, WorkedDuration};
use crate::store::{ATTENDANCE_RECORDS, Collection, RecordStore};

/// Stateless transformer over the `attendance_records` collection.
///
/// Every call re-reads the collection, so two engines on the same store see
/// each other's writes. Writes replace the whole collection; concurrent
/// writers on one store can lose updates.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use attendance_engine::clock::ManualClock;
/// use attendance_engine::config::DuplicateClockInPolicy;
/// use attendance_engine::engine::AttendanceEngine;
/// use attendance_engine::models::AttendanceStatus;
/// use attendance_engine::store::MemoryStore;
///
/// let clock = Arc::new(ManualClock::parse("2026-01-15T10:05:00+10:00"));
/// let engine = AttendanceEngine::new(
///     Arc::new(MemoryStore::new()),
///     clock,
///     DuplicateClockInPolicy::Reject,
///     false,
/// );
///
/// let record = engine.clock_in("EMP001", true)?;
/// assert_eq!(record.status, AttendanceStatus::Late);
/// assert_eq!(engine.today_record("EMP001")?, Some(record));
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Clone)]
pub struct AttendanceEngine {
    records: Collection<AttendanceRecord>,
    clock: Arc<dyn Clock>,
    duplicate_policy: DuplicateClockInPolicy,
}

impl AttendanceEngine {
    /// Creates an engine over `store`.
    ///
    /// `strict` makes unparseable stored records an error instead of an
    /// empty collection.
    pub fn new(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        duplicate_policy: DuplicateClockInPolicy,
        strict: bool,
    ) -> Self {
        Self {
            records: Collection::new(store, ATTENDANCE_RECORDS, strict),
            clock,
            duplicate_policy,
        }
    }

    /// Returns the employee's record for the current local day, if any.
    ///
    /// With duplicate clock-ins allowed there can be several; the most
    /// recently created one wins, ties going to the later in store order.
    pub fn today_record(&self, employee_id: &str) -> EngineResult<Option<AttendanceRecord>> {
        let today = self.clock.today();
        let record = self
            .records
            .load()?
            .into_iter()
            .filter(|r| r.employee_id == employee_id && r.date == today)
            .max_by_key(|r| r.created_at);

        debug!(employee_id, %today, found = record.is_some(), "Looked up today's record");
        Ok(record)
    }

    /// Returns the employee's records, most recently created first.
    ///
    /// Records created at the same instant keep their store order.
    pub fn history(&self, employee_id: &str) -> EngineResult<Vec<AttendanceRecord>> {
        let mut history: Vec<AttendanceRecord> = self
            .records
            .load()?
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(history)
    }

    /// Records a clock-in at the current time.
    ///
    /// The caller must already hold a positive face verification; this method
    /// stores `face_verified` as given and does not verify again.
    ///
    /// # Returns
    ///
    /// The new record, which becomes today's record. Fails with
    /// `AlreadyClockedIn` when the policy is `Reject` and the employee already
    /// has a record today.
    pub fn clock_in(&self, employee_id: &str, face_verified: bool) -> EngineResult<AttendanceRecord> {
        let now = self.clock.now();
        let date = now.date_naive();
        let mut records = self.records.load()?;

        if self.duplicate_policy == DuplicateClockInPolicy::Reject
            && records
                .iter()
                .any(|r| r.employee_id == employee_id && r.date == date)
        {
            warn!(employee_id, %date, "Rejected second clock-in");
            return Err(EngineError::AlreadyClockedIn {
                employee_id: employee_id.to_string(),
                date,
            });
        }

        let record = AttendanceRecord {
            id: Uuid::now_v7().to_string(),
            employee_id: employee_id.to_string(),
            clock_in: now,
            clock_out: None,
            date,
            status: AttendanceStatus::for_clock_in(now),
            face_verified,
            created_at: now,
        };

        records.push(record.clone());
        self.records.save(&records)?;

        info!(
            employee_id,
            record_id = %record.id,
            status = %record.status,
            face_verified,
            "Clocked in"
        );
        Ok(record)
    }

    /// Records a clock-out on today's record.
    ///
    /// The newest record still open today is closed. When every record of the
    /// day is already closed, the newest one has its `clock_out` and
    /// `face_verified` overwritten; neither ordering against `clock_in` nor
    /// monotonicity is checked.
    ///
    /// # Returns
    ///
    /// The updated record, or `NoActiveClockIn` if the employee has no record
    /// today.
    pub fn clock_out(&self, employee_id: &str, face_verified: bool) -> EngineResult<AttendanceRecord> {
        let date = self.clock.today();
        let records = self.records.load()?;

        let todays = records
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date == date);
        let target = todays
            .clone()
            .filter(|r| r.is_open())
            .max_by_key(|r| r.created_at)
            .or_else(|| todays.max_by_key(|r| r.created_at))
            .cloned();

        let Some(mut today) = target else {
            warn!(employee_id, "Clock-out without a clock-in today");
            return Err(EngineError::NoActiveClockIn {
                employee_id: employee_id.to_string(),
            });
        };

        today.clock_out = Some(self.clock.now());
        today.face_verified = face_verified;

        let records: Vec<AttendanceRecord> = records
            .into_iter()
            .map(|r| if r.id == today.id { today.clone() } else { r })
            .collect();
        self.records.save(&records)?;

        info!(
            employee_id,
            record_id = %today.id,
            worked = %today.worked_duration(),
            "Clocked out"
        );
        Ok(today)
    }
}

/// Worked duration of `record`; [`WorkedDuration::Ongoing`] until clock-out.
pub fn worked_duration(record: &AttendanceRecord) -> WorkedDuration {
    record.worked_duration()
}
