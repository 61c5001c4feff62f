//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigLoader, EngineConfig};
use crate::engine::{AttendanceEngine, LeaveEngine};
use crate::error::EngineResult;
use crate::identity::{
    CodeVerifier, FaceVerifier, SessionManager, SimulatedFaceVerifier, StaticCodeVerifier,
};
use crate::store::RecordStore;

/// Shared application state.
///
/// Holds the engines, the session manager and the face verification gate,
/// all sharing one record store and one clock.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    attendance: AttendanceEngine,
    leave: LeaveEngine,
    session: SessionManager,
    face_verifier: Arc<dyn FaceVerifier>,
}

impl AppState {
    /// Builds the state over `store` and `clock` with the placeholder
    /// verifiers described by `config`.
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>, config: &EngineConfig) -> Self {
        let strict = config.store.strict;
        let code_verifier: Arc<dyn CodeVerifier> =
            Arc::new(StaticCodeVerifier::new(config.identity.access_code.clone()));

        Self {
            attendance: AttendanceEngine::new(
                store.clone(),
                clock.clone(),
                config.attendance.duplicate_clock_in,
                strict,
            ),
            leave: LeaveEngine::new(
                store.clone(),
                clock.clone(),
                config.leave.validate_date_range,
                strict,
            ),
            session: SessionManager::new(store.clone(), code_verifier, clock.clone()),
            face_verifier: Arc::new(SimulatedFaceVerifier::from_config(&config.identity)),
            store,
            clock,
        }
    }

    /// Opens the configured store and uses the system clock.
    pub fn from_config(loader: &ConfigLoader) -> EngineResult<Self> {
        let store = loader.open_store()?;
        Ok(Self::new(store, Arc::new(SystemClock), loader.config()))
    }

    /// Replaces the login code check.
    pub fn with_code_verifier(mut self, verifier: Arc<dyn CodeVerifier>) -> Self {
        self.session = SessionManager::new(self.store.clone(), verifier, self.clock.clone());
        self
    }

    /// Replaces the face verification gate.
    pub fn with_face_verifier(mut self, verifier: Arc<dyn FaceVerifier>) -> Self {
        self.face_verifier = verifier;
        self
    }

    /// The attendance engine.
    pub fn attendance(&self) -> &AttendanceEngine {
        &self.attendance
    }

    /// The leave engine.
    pub fn leave(&self) -> &LeaveEngine {
        &self.leave
    }

    /// The session manager.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// The face verification gate.
    pub fn face_verifier(&self) -> &dyn FaceVerifier {
        self.face_verifier.as_ref()
    }
}
