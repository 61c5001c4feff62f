//! Sign-in session persisted in the record store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::store::{EMPLOYEE, RecordStore};

use super::verification::CodeVerifier;

/// Keeps the single signed-in employee under the `employee` key.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn RecordStore>,
    verifier: Arc<dyn CodeVerifier>,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    /// Creates a session manager over `store`.
    pub fn new(
        store: Arc<dyn RecordStore>,
        verifier: Arc<dyn CodeVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            verifier,
            clock,
        }
    }

    /// Signs in `employee_id` with a one-time `code`.
    ///
    /// Any employee id is accepted; on success the placeholder profile
    /// replaces whatever session was stored before. A rejected code fails
    /// with `InvalidCode` and leaves the store untouched.
    pub fn login(&self, employee_id: &str, code: &str) -> EngineResult<Employee> {
        if !self.verifier.verify_code(code) {
            warn!(employee_id, "Login rejected: invalid code");
            return Err(EngineError::InvalidCode);
        }

        let employee = Employee::provisional(employee_id, self.clock.now());
        let raw = serde_json::to_string(&employee).map_err(|e| EngineError::StoreIo {
            key: EMPLOYEE.to_string(),
            message: e.to_string(),
        })?;
        self.store.write(EMPLOYEE, &raw)?;

        info!(employee_id, "Signed in");
        Ok(employee)
    }

    /// Returns the signed-in employee.
    ///
    /// A stored value that does not parse counts as signed out.
    pub fn current(&self) -> EngineResult<Option<Employee>> {
        let Some(raw) = self.store.read(EMPLOYEE)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(employee) => Ok(Some(employee)),
            Err(e) => {
                warn!(error = %e, "Stored session is unparseable, treating as signed out");
                Ok(None)
            }
        }
    }

    /// Returns the signed-in employee or `NotAuthenticated`.
    pub fn require(&self) -> EngineResult<Employee> {
        self.current()?.ok_or(EngineError::NotAuthenticated)
    }

    /// Signs out. Signing out without a session is a no-op.
    pub fn logout(&self) -> EngineResult<()> {
        self.store.remove(EMPLOYEE)?;
        info!("Signed out");
        Ok(())
    }
}
