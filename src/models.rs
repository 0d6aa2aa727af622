// Core data structures for the shift assignment engine

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Wire format for timestamps exchanged with the optimizer service
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A validated employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub skills: BTreeSet<String>,
    /// Weekly capacity in hours
    pub max_hours: f64,
    pub availability_start: NaiveDateTime,
    pub availability_end: NaiveDateTime,
}

impl Employee {
    /// Check whether the employee holds a skill
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Check whether `[start, end]` lies inside the availability window
    pub fn is_available_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.availability_start <= start && self.availability_end >= end
    }
}

/// A validated shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub role: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub required_skill: String,
}

impl Shift {
    /// Shift length in hours (fractional)
    pub fn duration_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_seconds() as f64 / 3600.0
    }

    /// Calendar day the shift starts on
    pub fn day(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// One shift given to one employee
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(alias = "shiftId")]
    pub shift_id: String,

    #[serde(alias = "empId")]
    pub employee_id: String,

    /// Denormalized for display
    #[serde(alias = "empName")]
    pub employee_name: String,
}

impl Assignment {
    pub fn new(
        shift_id: impl Into<String>,
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
    ) -> Self {
        Self {
            shift_id: shift_id.into(),
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
        }
    }
}

/// Coverage status of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Every shift is assigned
    Feasible,
    /// Some shifts are unassigned
    Partial,
    /// The exact solver found no assignment satisfying the hard constraints
    Infeasible,
}

impl ScheduleStatus {
    /// Derive the status from the unassigned count
    pub fn from_coverage(unassigned: usize) -> Self {
        if unassigned == 0 {
            Self::Feasible
        } else {
            Self::Partial
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feasible => "feasible",
            Self::Partial => "partial",
            Self::Infeasible => "infeasible",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date range a run covers, written `YYYY-MM-DD/YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Smallest period containing every shift, `None` without shifts
    pub fn covering(shifts: &[Shift]) -> Option<Self> {
        let start = shifts.iter().map(|s| s.start_time.date()).min()?;
        let end = shifts.iter().map(|s| s.end_time.date()).max()?;
        Some(Self { start, end })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| format!("period '{s}' must look like YYYY-MM-DD/YYYY-MM-DD"))?;
        let parse = |part: &str| {
            NaiveDate::parse_from_str(part.trim(), "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{part}' in period: {e}"))
        };
        Self::new(parse(start)?, parse(end)?)
            .ok_or_else(|| format!("period '{s}' ends before it starts"))
    }
}

/// Result of one scheduling run
///
/// Serializes to the same shape the optimizer service answers with, so the
/// display layer reads one format regardless of which path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub assignments: Vec<Assignment>,

    pub status: ScheduleStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Unassigned shift ids, in shift input order
    #[serde(default)]
    pub unassigned_shifts: Vec<String>,
}

impl Schedule {
    /// Build a schedule whose status follows from its coverage
    pub fn new(assignments: Vec<Assignment>, unassigned_shifts: Vec<String>) -> Self {
        let status = ScheduleStatus::from_coverage(unassigned_shifts.len());
        Self {
            assignments,
            status,
            message: None,
            unassigned_shifts,
        }
    }

    /// Schedule reporting that no assignment satisfies the hard constraints
    pub fn infeasible(shifts: &[Shift], message: impl Into<String>) -> Self {
        Self {
            assignments: Vec::new(),
            status: ScheduleStatus::Infeasible,
            message: Some(message.into()),
            unassigned_shifts: shifts.iter().map(|s| s.id.clone()).collect(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Find the assignment for a shift
    pub fn assignment_for(&self, shift_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.shift_id == shift_id)
    }

    /// All assignments given to one employee
    pub fn assignments_for_employee(&self, employee_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    pub fn is_fully_assigned(&self) -> bool {
        self.status == ScheduleStatus::Feasible
    }

    /// Fraction of shifts that received an employee (1.0 for an empty schedule)
    pub fn coverage(&self) -> f64 {
        let total = self.assignments.len() + self.unassigned_shifts.len();
        if total == 0 {
            return 1.0;
        }
        self.assignments.len() as f64 / total as f64
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
