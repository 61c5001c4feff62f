//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! attendance and leave-application endpoints act for the signed-in employee.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{Employee, LeaveRequest};

use super::request::{ApplyLeaveRequest, LoginRequest};
use super::response::{ApiError, ApiErrorResponse, AttendanceView};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/session",
            post(login_handler)
                .get(current_session_handler)
                .delete(logout_handler),
        )
        .route("/attendance", get(history_handler))
        .route("/attendance/today", get(today_handler))
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .route("/leaves", get(list_leaves_handler).post(apply_leave_handler))
        .route("/leaves/:leave_id/approve", put(approve_leave_handler))
        .route("/leaves/:leave_id/reject", put(reject_leave_handler))
        .with_state(state)
}

/// Converts a JSON extraction failure into a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn signed_in(state: &AppState) -> Result<Employee, ApiErrorResponse> {
    Ok(state.session().require()?)
}

fn created<T: Serialize>(body: T) -> Response {
    (StatusCode::CREATED, Json(body)).into_response()
}

/// Runs record store work on the blocking thread pool.
///
/// Engine calls read and write the store synchronously, so handlers never run
/// them on the async workers directly.
async fn blocking<T, F>(work: F) -> Result<T, ApiErrorResponse>
where
    F: FnOnce() -> Result<T, ApiErrorResponse> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        warn!(error = %e, "Blocking store task failed");
        ApiErrorResponse::internal(ApiError::new(
            "INTERNAL_ERROR",
            "Request processing failed",
        ))
    })?
}

/// Handler for POST /session.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    info!(correlation_id = %correlation_id, employee_id = %request.employee_id, "Processing login");
    let employee = blocking(move || {
        Ok(state.session().login(&request.employee_id, &request.code)?)
    })
    .await?;
    Ok(Json(employee))
}

/// Handler for GET /session.
async fn current_session_handler(State(state): State<AppState>) -> ApiResult<Employee> {
    Ok(Json(blocking(move || signed_in(&state)).await?))
}

/// Handler for DELETE /session.
async fn logout_handler(State(state): State<AppState>) -> Result<StatusCode, ApiErrorResponse> {
    blocking(move || Ok(state.session().logout()?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /attendance/today. Answers `null` before clock-in.
async fn today_handler(State(state): State<AppState>) -> ApiResult<Option<AttendanceView>> {
    let today = blocking(move || {
        let employee = signed_in(&state)?;
        Ok(state.attendance().today_record(&employee.employee_id)?)
    })
    .await?;
    Ok(Json(today.map(AttendanceView::from)))
}

/// Handler for GET /attendance.
async fn history_handler(State(state): State<AppState>) -> ApiResult<Vec<AttendanceView>> {
    let history = blocking(move || {
        let employee = signed_in(&state)?;
        Ok(state.attendance().history(&employee.employee_id)?)
    })
    .await?;
    Ok(Json(history.into_iter().map(AttendanceView::from).collect()))
}

/// Runs the face gate for the signed-in employee.
///
/// Only a passing gate lets a clock-in or clock-out through, so the records
/// written behind it are always `face_verified`.
fn verify_face(state: &AppState, employee: &Employee) -> Result<(), ApiErrorResponse> {
    if !state.face_verifier().verify_face(&employee.employee_id) {
        warn!(employee_id = %employee.employee_id, "Face verification failed");
        return Err(EngineError::VerificationFailed {
            employee_id: employee.employee_id.clone(),
        }
        .into());
    }
    Ok(())
}

/// Handler for POST /attendance/clock-in.
async fn clock_in_handler(State(state): State<AppState>) -> Result<Response, ApiErrorResponse> {
    let record = blocking(move || {
        let employee = signed_in(&state)?;
        verify_face(&state, &employee)?;
        Ok(state.attendance().clock_in(&employee.employee_id, true)?)
    })
    .await?;
    Ok(created(AttendanceView::from(record)))
}

/// Handler for POST /attendance/clock-out.
async fn clock_out_handler(State(state): State<AppState>) -> ApiResult<AttendanceView> {
    let record = blocking(move || {
        let employee = signed_in(&state)?;
        verify_face(&state, &employee)?;
        Ok(state.attendance().clock_out(&employee.employee_id, true)?)
    })
    .await?;
    Ok(Json(record.into()))
}

/// Handler for GET /leaves.
async fn list_leaves_handler(State(state): State<AppState>) -> ApiResult<Vec<LeaveRequest>> {
    let leaves = blocking(move || {
        let employee = signed_in(&state)?;
        Ok(state.leave().leaves(&employee.employee_id)?)
    })
    .await?;
    Ok(Json(leaves))
}

/// Handler for POST /leaves.
async fn apply_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApplyLeaveRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let employee = blocking({
        let state = state.clone();
        move || signed_in(&state)
    })
    .await?;
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    if let Err(message) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %message, "Leave application invalid");
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            message,
        )));
    }

    let leave = blocking(move || Ok(state.leave().apply(&employee.employee_id, request.into())?))
        .await?;
    info!(correlation_id = %correlation_id, leave_id = %leave.id, "Leave application stored");
    Ok(created(leave))
}

/// Handler for PUT /leaves/:leave_id/approve.
async fn approve_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
) -> ApiResult<LeaveRequest> {
    Ok(Json(blocking(move || Ok(state.leave().approve(&leave_id)?)).await?))
}

/// Handler for PUT /leaves/:leave_id/reject.
async fn reject_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
) -> ApiResult<LeaveRequest> {
    Ok(Json(blocking(move || Ok(state.leave().reject(&leave_id)?)).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::EngineConfig;
    use crate::identity::FaceVerifier;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state(now: &str) -> AppState {
        AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::parse(now)),
            &EngineConfig::default(),
        )
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_login_with_valid_code_returns_employee() {
        let router = create_router(create_test_state("2026-01-15T08:30:00+10:00"));

        let (status, body) = send(
            router,
            "POST",
            "/session",
            Some(r#"{"employee_id":"EMP001","code":"123456"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let employee: Employee = serde_json::from_slice(&body).unwrap();
        assert_eq!(employee.employee_id, "EMP001");
    }

    #[tokio::test]
    async fn test_login_with_wrong_code_returns_401() {
        let router = create_router(create_test_state("2026-01-15T08:30:00+10:00"));

        let (status, body) = send(
            router,
            "POST",
            "/session",
            Some(r#"{"employee_id":"EMP001","code":"111111"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_CODE");
    }

    #[tokio::test]
    async fn test_malformed_login_json_returns_400() {
        let router = create_router(create_test_state("2026-01-15T08:30:00+10:00"));

        let (status, body) = send(router, "POST", "/session", Some("{invalid json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_login_missing_code_returns_validation_error() {
        let router = create_router(create_test_state("2026-01-15T08:30:00+10:00"));

        let (status, body) =
            send(router, "POST", "/session", Some(r#"{"employee_id":"EMP001"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_attendance_requires_session() {
        let router = create_router(create_test_state("2026-01-15T08:30:00+10:00"));

        let (status, body) = send(router, "POST", "/attendance/clock-in", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "NOT_AUTHENTICATED");
    }

    #[tokio::test]
    async fn test_clock_in_returns_201_with_ongoing_duration() {
        let state = create_test_state("2026-01-15T08:30:00+10:00");
        state.session().login("EMP001", "123456").unwrap();

        let (status, body) =
            send(create_router(state), "POST", "/attendance/clock-in", None).await;

        assert_eq!(status, StatusCode::CREATED);
        let view: AttendanceView = serde_json::from_slice(&body).unwrap();
        assert_eq!(view.record.employee_id, "EMP001");
        assert_eq!(view.worked_duration, "Ongoing");
        assert!(view.record.face_verified);
    }

    #[tokio::test]
    async fn test_today_is_null_before_clock_in() {
        let state = create_test_state("2026-01-15T08:30:00+10:00");
        state.session().login("EMP001", "123456").unwrap();

        let (status, body) = send(create_router(state), "GET", "/attendance/today", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"null");
    }

    #[tokio::test]
    async fn test_failed_face_verification_blocks_clock_in() {
        struct AlwaysFails;
        impl FaceVerifier for AlwaysFails {
            fn verify_face(&self, _employee_id: &str) -> bool {
                false
            }
        }

        let state = create_test_state("2026-01-15T08:30:00+10:00")
            .with_face_verifier(Arc::new(AlwaysFails));
        state.session().login("EMP001", "123456").unwrap();

        let (status, body) = send(
            create_router(state.clone()),
            "POST",
            "/attendance/clock-in",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VERIFICATION_FAILED");
        assert!(state.attendance().today_record("EMP001").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_leave_reason_returns_400() {
        let state = create_test_state("2026-01-15T08:30:00+10:00");
        state.session().login("EMP001", "123456").unwrap();

        let (status, body) = send(
            create_router(state),
            "POST",
            "/leaves",
            Some(r#"{"start_date":"2026-02-02","end_date":"2026-02-02","leave_type":"sick","reason":" "}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_approve_unknown_leave_returns_404() {
        let router = create_router(create_test_state("2026-01-15T08:30:00+10:00"));

        let (status, body) = send(router, "PUT", "/leaves/missing/approve", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "LEAVE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_logout_returns_204_and_clears_session() {
        let state = create_test_state("2026-01-15T08:30:00+10:00");
        state.session().login("EMP001", "123456").unwrap();

        let (status, _) = send(create_router(state.clone()), "DELETE", "/session", None).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.session().current().unwrap().is_none());
    }
}
