//! Property tests for the greedy assignment heuristic

mod common;

use chrono::{Duration, NaiveDateTime};
use proptest::prelude::*;
use std::collections::HashSet;

use shiftplan::models::{Employee, ScheduleStatus, Shift};
use shiftplan::scheduler::{assign, verify_assignments};

const SKILLS: [&str; 3] = ["cook", "cashier", "welder"];

fn day_start() -> NaiveDateTime {
    common::ts("2025-07-01T00:00:00")
}

fn arb_employee(index: usize) -> impl Strategy<Value = Employee> {
    (
        proptest::sample::subsequence(SKILLS.to_vec(), 1..=3),
        1u32..=12,
        0i64..12,
        1i64..=12,
        prop::sample::select(vec!["Ann", "Ben", "Cy", "ann"]),
    )
        .prop_map(move |(skills, max_hours, from, span, name)| Employee {
            id: format!("E{index}"),
            name: name.to_string(),
            skills: skills.into_iter().map(str::to_string).collect(),
            max_hours: f64::from(max_hours),
            availability_start: day_start() + Duration::hours(from),
            availability_end: day_start() + Duration::hours(from + span),
        })
}

fn arb_shift(index: usize) -> impl Strategy<Value = Shift> {
    (prop::sample::select(SKILLS.to_vec()), 0i64..20, 1i64..=4).prop_map(
        move |(skill, start, length)| Shift {
            id: format!("S{index}"),
            role: format!("{skill}_shift"),
            start_time: day_start() + Duration::hours(start),
            end_time: day_start() + Duration::hours(start + length),
            required_skill: skill.to_string(),
        },
    )
}

fn arb_problem() -> impl Strategy<Value = (Vec<Employee>, Vec<Shift>)> {
    (1usize..6, 0usize..10).prop_flat_map(|(n_emp, n_shift)| {
        let employees: Vec<_> = (0..n_emp).map(arb_employee).collect();
        let shifts: Vec<_> = (0..n_shift).map(arb_shift).collect();
        (employees, shifts)
    })
}

proptest! {
    #[test]
    fn assignments_respect_every_constraint((employees, shifts) in arb_problem()) {
        let schedule = assign(&employees, &shifts).unwrap();
        prop_assert!(verify_assignments(&schedule.assignments, &employees, &shifts).is_ok());
    }

    #[test]
    fn every_shift_is_covered_or_reported((employees, shifts) in arb_problem()) {
        let schedule = assign(&employees, &shifts).unwrap();

        let assigned: HashSet<&str> = schedule.assignments.iter().map(|a| a.shift_id.as_str()).collect();
        let unassigned: HashSet<&str> = schedule.unassigned_shifts.iter().map(String::as_str).collect();

        prop_assert_eq!(assigned.len(), schedule.assignments.len());
        prop_assert!(assigned.is_disjoint(&unassigned));
        prop_assert_eq!(assigned.len() + unassigned.len(), shifts.len());
    }

    #[test]
    fn status_follows_coverage((employees, shifts) in arb_problem()) {
        let schedule = assign(&employees, &shifts).unwrap();
        let expected = if schedule.unassigned_shifts.is_empty() {
            ScheduleStatus::Feasible
        } else {
            ScheduleStatus::Partial
        };
        prop_assert_eq!(schedule.status, expected);
    }

    #[test]
    fn unassigned_shifts_keep_input_order((employees, shifts) in arb_problem()) {
        let schedule = assign(&employees, &shifts).unwrap();
        let positions: Vec<usize> = schedule
            .unassigned_shifts
            .iter()
            .map(|id| shifts.iter().position(|s| &s.id == id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn assignment_is_deterministic((employees, shifts) in arb_problem()) {
        let first = assign(&employees, &shifts).unwrap();
        let second = assign(&employees, &shifts).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_least_loaded_employee_wins() {
    let (employees, shifts) = common::kitchen();
    let schedule = assign(&employees, &shifts).unwrap();

    let owners: Vec<&str> = schedule
        .assignments
        .iter()
        .map(|a| a.employee_id.as_str())
        .collect();
    assert_eq!(owners, vec!["E1", "E2"]);
    assert_eq!(schedule.unassigned_shifts, vec!["S3".to_string()]);
    assert_eq!(schedule.status, ScheduleStatus::Partial);
}

#[test]
fn test_name_breaks_ties_bytewise() {
    // Uppercase sorts before lowercase
    let employees = vec![
        common::employee("E1", "bob", &["cook"], 8.0),
        common::employee("E2", "Zed", &["cook"], 8.0),
    ];
    let shifts = vec![common::shift("S1", "cook", 8, 12)];

    let schedule = assign(&employees, &shifts).unwrap();
    assert_eq!(schedule.assignments[0].employee_id, "E2");
}

#[test]
fn test_capacity_is_inclusive() {
    let employees = vec![common::employee("E1", "Alice", &["cook"], 8.0)];
    let shifts = vec![
        common::shift("S1", "cook", 8, 12),
        common::shift("S2", "cook", 12, 16),
        common::shift("S3", "cook", 16, 17),
    ];

    let schedule = assign(&employees, &shifts).unwrap();
    assert_eq!(schedule.assignments.len(), 2);
    assert_eq!(schedule.unassigned_shifts, vec!["S3".to_string()]);
}
