//! Verification capabilities gating login and attendance.
//!
//! The shipped implementations are placeholders: a literal one-time code and
//! a face scan that always succeeds. A production backend replaces them
//! behind the same traits without touching the engines.

use std::time::Duration;

use tracing::debug;

use crate::config::IdentityConfig;

/// Checks a one-time login code.
pub trait CodeVerifier: Send + Sync {
    /// Returns true when `code` is accepted.
    fn verify_code(&self, code: &str) -> bool;
}

/// Checks that the person at the device is `employee_id`.
pub trait FaceVerifier: Send + Sync {
    /// Returns the verification outcome.
    fn verify_face(&self, employee_id: &str) -> bool;
}

/// Accepts exactly one configured code.
///
/// This is not a security mechanism.
#[derive(Debug, Clone)]
pub struct StaticCodeVerifier {
    code: String,
}

impl StaticCodeVerifier {
    /// Creates a verifier accepting `code`.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl Default for StaticCodeVerifier {
    fn default() -> Self {
        Self::new(IdentityConfig::default().access_code)
    }
}

impl CodeVerifier for StaticCodeVerifier {
    fn verify_code(&self, code: &str) -> bool {
        code == self.code
    }
}

/// A fixed-length progress simulation that always ends positive.
///
/// # Example
///
/// ```
/// use attendance_engine::identity::{FaceVerifier, SimulatedFaceVerifier};
/// use std::time::Duration;
///
/// let scanner = SimulatedFaceVerifier::new(10, Duration::from_millis(200));
/// assert_eq!(scanner.progress_steps(), vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
/// assert!(scanner.verify_face("EMP001"));
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedFaceVerifier {
    steps: u32,
    step_interval: Duration,
}

impl SimulatedFaceVerifier {
    /// Creates a scanner with `steps` progress steps, `step_interval` apart.
    ///
    /// Zero steps is treated as one.
    pub fn new(steps: u32, step_interval: Duration) -> Self {
        Self {
            steps: steps.max(1),
            step_interval,
        }
    }

    /// Builds the scanner described by the identity settings.
    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(
            config.face_scan_steps,
            Duration::from_millis(config.face_scan_interval_ms),
        )
    }

    /// Total time a full scan takes, saturating at [`Duration::MAX`].
    pub fn scan_duration(&self) -> Duration {
        self.step_interval
            .checked_mul(self.steps)
            .unwrap_or(Duration::MAX)
    }

    /// Progress percentages reported by a scan, ending at 100.
    pub fn progress_steps(&self) -> Vec<u8> {
        (1..=self.steps)
            .map(|step| progress_percent(step, self.steps))
            .collect()
    }

    /// Runs the animated scan, reporting each progress percentage.
    ///
    /// Waits one step interval before each report and resolves to the
    /// verification outcome. This is for front ends that render scan
    /// progress before calling the clock-in or clock-out endpoint; the HTTP
    /// gate itself calls [`FaceVerifier::verify_face`] without waiting.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use attendance_engine::identity::SimulatedFaceVerifier;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let scanner = SimulatedFaceVerifier::new(4, Duration::from_millis(1));
    /// let mut shown = Vec::new();
    /// let verified = scanner.scan("EMP001", |percent| shown.push(percent)).await;
    ///
    /// assert!(verified);
    /// assert_eq!(shown, vec![25, 50, 75, 100]);
    /// # });
    /// ```
    pub async fn scan<F>(&self, employee_id: &str, mut on_progress: F) -> bool
    where
        F: FnMut(u8),
    {
        for percent in self.progress_steps() {
            tokio::time::sleep(self.step_interval).await;
            debug!(employee_id, percent, "Face scan progress");
            on_progress(percent);
        }
        self.verify_face(employee_id)
    }
}

fn progress_percent(step: u32, steps: u32) -> u8 {
    (u64::from(step) * 100 / u64::from(steps)) as u8
}

impl Default for SimulatedFaceVerifier {
    fn default() -> Self {
        Self::from_config(&IdentityConfig::default())
    }
}

impl FaceVerifier for SimulatedFaceVerifier {
    fn verify_face(&self, employee_id: &str) -> bool {
        debug!(employee_id, "Simulated face verification passed");
        true
    }
}
