//! The leave engine.
//!
//! Creates leave requests as pending, lists them per employee, and applies
//! the approval authority's decision.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveApplication, LeaveRequest, LeaveStatus};
use crate::store::{Collection, LEAVE_REQUESTS, RecordStore};

/// Stateless transformer over the `leave_requests` collection.
#[derive(Clone)]
pub struct LeaveEngine {
    requests: Collection<LeaveRequest>,
    clock: Arc<dyn Clock>,
    validate_date_range: bool,
}

impl LeaveEngine {
    /// Creates an engine over `store`.
    ///
    /// With `validate_date_range` set, applications ending before they start
    /// are rejected. Overlap with earlier requests is never checked.
    pub fn new(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        validate_date_range: bool,
        strict: bool,
    ) -> Self {
        Self {
            requests: Collection::new(store, LEAVE_REQUESTS, strict),
            clock,
            validate_date_range,
        }
    }

    /// Returns the employee's leave requests in store order.
    pub fn leaves(&self, employee_id: &str) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self
            .requests
            .load()?
            .into_iter()
            .filter(|l| l.employee_id == employee_id)
            .collect())
    }

    /// Submits a leave application for `employee_id`.
    ///
    /// The request is always created `Pending`. Callers showing a
    /// most-recent-first list should put the returned request at the front
    /// of their own view.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use attendance_engine::clock::ManualClock;
    /// use attendance_engine::engine::LeaveEngine;
    /// use attendance_engine::models::{LeaveApplication, LeaveStatus, LeaveType};
    /// use attendance_engine::store::MemoryStore;
    /// use chrono::NaiveDate;
    ///
    /// let engine = LeaveEngine::new(
    ///     Arc::new(MemoryStore::new()),
    ///     Arc::new(ManualClock::parse("2026-01-30T10:00:00+10:00")),
    ///     true,
    ///     false,
    /// );
    /// let request = engine.apply("EMP001", LeaveApplication {
    ///     start_date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 2, 4).unwrap(),
    ///     leave_type: LeaveType::Vacation,
    ///     reason: "Family trip".to_string(),
    /// })?;
    /// assert_eq!(request.status, LeaveStatus::Pending);
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn apply(&self, employee_id: &str, application: LeaveApplication) -> EngineResult<LeaveRequest> {
        if self.validate_date_range && application.end_date < application.start_date {
            warn!(
                employee_id,
                start_date = %application.start_date,
                end_date = %application.end_date,
                "Rejected leave application with inverted dates"
            );
            return Err(EngineError::InvalidLeave {
                field: "end_date".to_string(),
                message: format!(
                    "{} is before start_date {}",
                    application.end_date, application.start_date
                ),
            });
        }

        let request = LeaveRequest {
            id: Uuid::now_v7().to_string(),
            employee_id: employee_id.to_string(),
            start_date: application.start_date,
            end_date: application.end_date,
            leave_type: application.leave_type,
            reason: application.reason,
            status: LeaveStatus::Pending,
            created_at: self.clock.now(),
        };

        let mut requests = self.requests.load()?;
        requests.push(request.clone());
        self.requests.save(&requests)?;

        info!(
            employee_id,
            leave_id = %request.id,
            leave_type = %request.leave_type,
            "Leave request submitted"
        );
        Ok(request)
    }

    /// Approves a pending request.
    pub fn approve(&self, leave_id: &str) -> EngineResult<LeaveRequest> {
        self.decide(leave_id, LeaveStatus::Approved)
    }

    /// Rejects a pending request.
    pub fn reject(&self, leave_id: &str) -> EngineResult<LeaveRequest> {
        self.decide(leave_id, LeaveStatus::Rejected)
    }

    fn decide(&self, leave_id: &str, decision: LeaveStatus) -> EngineResult<LeaveRequest> {
        let mut requests = self.requests.load()?;

        let request = requests
            .iter_mut()
            .find(|l| l.id == leave_id)
            .ok_or_else(|| EngineError::LeaveNotFound {
                leave_id: leave_id.to_string(),
            })?;

        if request.status.is_decided() {
            warn!(leave_id, status = %request.status, "Leave request already decided");
            return Err(EngineError::LeaveAlreadyDecided {
                leave_id: leave_id.to_string(),
                status: request.status,
            });
        }

        request.status = decision;
        let decided = request.clone();
        self.requests.save(&requests)?;

        info!(
            leave_id,
            employee_id = %decided.employee_id,
            status = %decided.status,
            "Leave request decided"
        );
        Ok(decided)
    }
}
