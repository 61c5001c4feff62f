//! Employee model.
//!
//! The Employee is provisioned outside this crate; the engines only read the
//! `employee_id` from it and the session manager persists it at login.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an employee who can sign in to the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Storage identifier of the profile.
    pub id: String,
    /// Stable identifier of the person, the key used by attendance and leave records.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Enrolled face template, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_data: Option<String>,
    /// Whether the employee may use the portal.
    pub is_active: bool,
    /// When the profile was created.
    pub created_at: DateTime<FixedOffset>,
}

impl Employee {
    /// Builds the placeholder profile handed out by the code login.
    ///
    /// The display name falls back to the employee id and the contact fields
    /// are left empty until a real directory is wired in.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    /// use chrono::DateTime;
    ///
    /// let now = DateTime::parse_from_rfc3339("2026-01-15T08:30:00+10:00").unwrap();
    /// let employee = Employee::provisional("EMP001", now);
    /// assert_eq!(employee.employee_id, "EMP001");
    /// assert!(employee.is_active);
    /// ```
    pub fn provisional(employee_id: &str, now: DateTime<FixedOffset>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            employee_id: employee_id.to_string(),
            name: employee_id.to_string(),
            email: String::new(),
            phone: String::new(),
            face_data: None,
            is_active: true,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_stored_employee() {
        let json = r#"{
            "id": "1",
            "employee_id": "EMP001",
            "name": "John Doe",
            "email": "john.doe@company.com",
            "phone": "+1234567890",
            "face_data": "mock_face_data",
            "is_active": true,
            "created_at": "2026-01-15T08:30:00.000Z"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employee_id, "EMP001");
        assert_eq!(employee.name, "John Doe");
        assert_eq!(employee.face_data.as_deref(), Some("mock_face_data"));
        assert!(employee.is_active);
    }

    #[test]
    fn test_face_data_is_optional() {
        let json = r#"{
            "id": "2",
            "employee_id": "EMP002",
            "name": "Jane Roe",
            "email": "",
            "phone": "",
            "is_active": false,
            "created_at": "2026-01-15T08:30:00+10:00"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.face_data.is_none());
        assert!(!employee.is_active);
    }

    #[test]
    fn test_provisional_ids_are_unique() {
        let now = DateTime::parse_from_rfc3339("2026-01-15T08:30:00+10:00").unwrap();
        let first = Employee::provisional("EMP001", now);
        let second = Employee::provisional("EMP001", now);
        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, now);
    }
}
