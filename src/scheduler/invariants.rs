//! Checks for the hard rules every run must respect
//!
//! [`check_inputs`] runs before any assignment work; [`verify_assignments`]
//! validates a finished assignment list, whichever path produced it.

use std::collections::{HashMap, HashSet};

use super::eligibility::is_eligible;
use super::error::{Invariant, SchedulerError, SchedulerResult};
use crate::models::{Assignment, Employee, Shift};

/// Slack for summing fractional hours in a different order than they were added
const CAPACITY_TOLERANCE: f64 = 1e-9;

/// Reject inputs that no run may start from
pub fn check_inputs(employees: &[Employee], shifts: &[Shift]) -> SchedulerResult<()> {
    let mut shift_ids = HashSet::with_capacity(shifts.len());
    for shift in shifts {
        if !shift_ids.insert(shift.id.as_str()) {
            return Err(SchedulerError::invariant(
                Invariant::UniqueShiftIds,
                format!("shift '{}' appears more than once", shift.id),
            ));
        }
        if shift.end_time <= shift.start_time {
            return Err(SchedulerError::invariant(
                Invariant::PositiveDuration,
                format!("shift '{}' has duration {}h", shift.id, shift.duration_hours()),
            ));
        }
    }

    let mut employee_ids = HashSet::with_capacity(employees.len());
    for employee in employees {
        if !employee_ids.insert(employee.id.as_str()) {
            return Err(SchedulerError::invariant(
                Invariant::UniqueEmployeeIds,
                format!("employee '{}' appears more than once", employee.id),
            ));
        }
        if !(employee.max_hours.is_finite() && employee.max_hours > 0.0) {
            return Err(SchedulerError::invariant(
                Invariant::PositiveCapacity,
                format!("employee '{}' has max_hours {}", employee.id, employee.max_hours),
            ));
        }
    }

    Ok(())
}

/// Verify that `assignments` respect references, single assignment, skill,
/// availability and capacity against the given data
pub fn verify_assignments(
    assignments: &[Assignment],
    employees: &[Employee],
    shifts: &[Shift],
) -> SchedulerResult<()> {
    let shifts_by_id: HashMap<&str, &Shift> = shifts.iter().map(|s| (s.id.as_str(), s)).collect();
    let employees_by_id: HashMap<&str, &Employee> =
        employees.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut seen_shifts = HashSet::with_capacity(assignments.len());
    let mut hours: HashMap<&str, f64> = HashMap::new();

    for assignment in assignments {
        let shift = shifts_by_id
            .get(assignment.shift_id.as_str())
            .ok_or_else(|| {
                SchedulerError::invariant(
                    Invariant::KnownReference,
                    format!("unknown shift '{}'", assignment.shift_id),
                )
            })?;
        let employee = employees_by_id
            .get(assignment.employee_id.as_str())
            .ok_or_else(|| {
                SchedulerError::invariant(
                    Invariant::KnownReference,
                    format!("unknown employee '{}'", assignment.employee_id),
                )
            })?;

        if !seen_shifts.insert(shift.id.as_str()) {
            return Err(SchedulerError::invariant(
                Invariant::SingleAssignment,
                format!("shift '{}' assigned more than once", shift.id),
            ));
        }

        if !employee.has_skill(&shift.required_skill) {
            return Err(SchedulerError::invariant(
                Invariant::SkillMatch,
                format!(
                    "employee '{}' lacks skill '{}' for shift '{}'",
                    employee.id, shift.required_skill, shift.id
                ),
            ));
        }
        if !is_eligible(employee, shift) {
            return Err(SchedulerError::invariant(
                Invariant::Availability,
                format!("shift '{}' is outside employee '{}' availability", shift.id, employee.id),
            ));
        }

        *hours.entry(employee.id.as_str()).or_insert(0.0) += shift.duration_hours();
    }

    for (employee_id, total) in hours {
        let max_hours = employees_by_id[employee_id].max_hours;
        if total > max_hours + CAPACITY_TOLERANCE {
            return Err(SchedulerError::invariant(
                Invariant::Capacity,
                format!("employee '{employee_id}' assigned {total}h over capacity {max_hours}h"),
            ));
        }
    }

    Ok(())
}
