//! Eligibility filtering and candidate ordering
//!
//! An employee is eligible for a shift when they hold the required skill and
//! their availability window contains the whole shift, both bounds
//! inclusive. Candidates are ranked least-loaded first so work spreads out
//! across the team; ties fall back to the name, compared byte-wise, and then
//! to input order.

use std::collections::HashMap;

use crate::models::{Employee, Shift};

/// Hours already given to each employee during the current run
pub type AssignedHours = HashMap<String, f64>;

/// Check skill and availability for one employee/shift pair
pub fn is_eligible(employee: &Employee, shift: &Shift) -> bool {
    employee.has_skill(&shift.required_skill)
        && employee.is_available_between(shift.start_time, shift.end_time)
}

/// Eligible employees for `shift`, best candidate first
///
/// Ordering: ascending assigned hours (absent = 0), then ascending name by
/// plain byte comparison, then input order.
pub fn eligible_candidates<'a>(
    shift: &Shift,
    employees: &'a [Employee],
    assigned_hours: &AssignedHours,
) -> Vec<&'a Employee> {
    let hours_of = |e: &Employee| assigned_hours.get(&e.id).copied().unwrap_or(0.0);

    let mut candidates: Vec<&Employee> = employees
        .iter()
        .filter(|e| is_eligible(e, shift))
        .collect();

    // sort_by is stable: equal keys keep input order
    candidates.sort_by(|a, b| {
        hours_of(a)
            .total_cmp(&hours_of(b))
            .then_with(|| a.name.as_bytes().cmp(b.name.as_bytes()))
    });
    candidates
}

/// Eligible head count for one shift
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftEligibility {
    pub shift_id: String,
    pub required_skill: String,
    pub eligible: usize,
}

/// Count eligible employees per shift, in shift order
pub fn diagnose(employees: &[Employee], shifts: &[Shift]) -> Vec<ShiftEligibility> {
    shifts
        .iter()
        .map(|shift| ShiftEligibility {
            shift_id: shift.id.clone(),
            required_skill: shift.required_skill.clone(),
            eligible: employees.iter().filter(|e| is_eligible(e, shift)).count(),
        })
        .collect()
}

/// Log per-shift eligibility and warn about shifts nobody can take
///
/// Returns the ids of shifts with no eligible employee.
pub fn log_diagnostics(employees: &[Employee], shifts: &[Shift]) -> Vec<String> {
    let mut unstaffable = Vec::new();

    for entry in diagnose(employees, shifts) {
        tracing::debug!(
            shift_id = %entry.shift_id,
            skill = %entry.required_skill,
            eligible = entry.eligible,
            "Shift eligibility"
        );
        if entry.eligible == 0 {
            tracing::warn!(
                shift_id = %entry.shift_id,
                skill = %entry.required_skill,
                "No eligible employees for shift"
            );
            unstaffable.push(entry.shift_id);
        }
    }

    unstaffable
}
