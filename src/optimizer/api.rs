//! Wire types for the optimization service
//!
//! The service takes `{period, employees, shifts}` with timestamps written
//! as `YYYY-MM-DDTHH:MM:SS` and answers with the assignment list in the
//! same shape the local [`Schedule`](crate::models::Schedule) serializes to.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Employee, Period, Shift, TIMESTAMP_FORMAT};

/// Health endpoint, relative to the service base URL
pub const HEALTH_PATH: &str = "/api/health";

/// Optimization endpoint, relative to the service base URL
pub const OPTIMIZE_PATH: &str = "/api/schedule/optimize";

// ============================================================================
// Request
// ============================================================================

/// Body of `POST /api/schedule/optimize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// `YYYY-MM-DD/YYYY-MM-DD`
    pub period: String,
    pub employees: Vec<EmployeePayload>,
    pub shifts: Vec<ShiftPayload>,
}

impl OptimizeRequest {
    pub fn new(period: Period, employees: &[Employee], shifts: &[Shift]) -> Self {
        Self {
            period: period.to_string(),
            employees: employees.iter().map(EmployeePayload::from).collect(),
            shifts: shifts.iter().map(ShiftPayload::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub max_hours: f64,
    pub availability_start: String,
    pub availability_end: String,
}

impl From<&Employee> for EmployeePayload {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            skills: employee.skills.iter().cloned().collect(),
            max_hours: employee.max_hours,
            availability_start: employee
                .availability_start
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            availability_end: employee.availability_end.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftPayload {
    pub id: String,
    pub role: String,
    pub start_time: String,
    pub end_time: String,
    pub required_skill: String,
}

impl From<&Shift> for ShiftPayload {
    fn from(shift: &Shift) -> Self {
        Self {
            id: shift.id.clone(),
            role: shift.role.clone(),
            start_time: shift.start_time.format(TIMESTAMP_FORMAT).to_string(),
            end_time: shift.end_time.format(TIMESTAMP_FORMAT).to_string(),
            required_skill: shift.required_skill.clone(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Success body of the optimization endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub assignments: Vec<Assignment>,

    /// Free-form status word (`success`, `optimal`, `partial`, ...)
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub unassigned_shifts: Vec<String>,
}

impl OptimizeResponse {
    /// Message, treating an empty string as absent
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Error body (`{"detail": ...}`) returned with HTTP 4xx/5xx
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable detail; structured details are rendered as JSON
    pub fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
