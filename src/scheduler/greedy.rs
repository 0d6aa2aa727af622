//! Greedy assignment heuristic
//!
//! Walks the shifts in input order and gives each to the first eligible
//! candidate that still has room under their weekly capacity. Candidates are
//! re-ranked for every shift, so hours spread across the team as the run
//! proceeds. The result is deterministic for a given input but not
//! necessarily optimal: an early choice can block a later shift that an
//! exact solver would have covered.

use std::time::Instant;

use super::eligibility::{eligible_candidates, AssignedHours};
use super::error::SchedulerResult;
use super::invariants::check_inputs;
use crate::models::{Assignment, Employee, Schedule, Shift};

/// Assign shifts to employees greedily
///
/// Never fails for lack of coverage: shifts nobody can take are listed as
/// unassigned and the status becomes `partial`. Fails only when the input
/// breaks an invariant (duplicate ids, non-positive duration or capacity).
pub fn assign(employees: &[Employee], shifts: &[Shift]) -> SchedulerResult<Schedule> {
    check_inputs(employees, shifts)?;

    let started = Instant::now();
    let mut assigned_hours = AssignedHours::with_capacity(employees.len());
    let mut assignments = Vec::with_capacity(shifts.len());
    let mut unassigned = Vec::new();

    for shift in shifts {
        let duration = shift.duration_hours();
        let chosen = eligible_candidates(shift, employees, &assigned_hours)
            .into_iter()
            .find(|e| assigned_hours.get(&e.id).copied().unwrap_or(0.0) + duration <= e.max_hours);

        match chosen {
            Some(employee) => {
                *assigned_hours.entry(employee.id.clone()).or_insert(0.0) += duration;
                tracing::trace!(shift_id = %shift.id, employee_id = %employee.id, "Shift assigned");
                assignments.push(Assignment::new(&shift.id, &employee.id, &employee.name));
            }
            None => {
                tracing::trace!(shift_id = %shift.id, "No candidate with remaining capacity");
                unassigned.push(shift.id.clone());
            }
        }
    }

    let schedule = Schedule::new(assignments, unassigned);
    tracing::debug!(
        assigned = schedule.assignments.len(),
        unassigned = schedule.unassigned_shifts.len(),
        status = %schedule.status,
        elapsed_us = started.elapsed().as_micros() as u64,
        "Greedy run complete"
    );
    Ok(schedule)
}
