//! Schedule reports
//!
//! Turns a stored schedule plus the records it was computed from into the
//! views a consumer needs: hours per employee against capacity, overall
//! coverage, and a per-day listing of shifts for calendar display.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Employee, Schedule, ScheduleStatus, Shift};
use crate::utils::format_hours;

/// Hours given to one employee
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeLoad {
    pub employee_id: String,
    pub name: String,
    pub shift_count: usize,
    pub assigned_hours: f64,
    pub max_hours: f64,
}

impl EmployeeLoad {
    /// Share of capacity used, 0.0 to 1.0
    pub fn utilization(&self) -> f64 {
        if self.max_hours > 0.0 {
            self.assigned_hours / self.max_hours
        } else {
            0.0
        }
    }
}

/// One shift in the per-day listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    pub shift_id: String,
    pub role: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_hours: f64,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
}

/// Everything `show` prints about a schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub status: ScheduleStatus,
    pub message: Option<String>,
    pub total_shifts: usize,
    pub assigned_shifts: usize,
    pub coverage: f64,
    pub employees: Vec<EmployeeLoad>,
    pub days: BTreeMap<NaiveDate, Vec<DayEntry>>,

    /// Assignments whose shift or employee is missing from the given records
    pub orphaned_assignments: usize,
}

impl ScheduleReport {
    /// Build a report; employees keep input order, days are chronological
    pub fn build(schedule: &Schedule, employees: &[Employee], shifts: &[Shift]) -> Self {
        let shifts_by_id: HashMap<&str, &Shift> = shifts.iter().map(|s| (s.id.as_str(), s)).collect();
        let known_employees: HashMap<&str, &Employee> =
            employees.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut loads: HashMap<&str, (usize, f64)> = HashMap::new();
        let mut orphaned = 0;
        for assignment in &schedule.assignments {
            match (
                shifts_by_id.get(assignment.shift_id.as_str()),
                known_employees.contains_key(assignment.employee_id.as_str()),
            ) {
                (Some(shift), true) => {
                    let entry = loads.entry(assignment.employee_id.as_str()).or_insert((0, 0.0));
                    entry.0 += 1;
                    entry.1 += shift.duration_hours();
                }
                _ => orphaned += 1,
            }
        }

        let employee_loads = employees
            .iter()
            .map(|e| {
                let (shift_count, assigned_hours) =
                    loads.get(e.id.as_str()).copied().unwrap_or((0, 0.0));
                EmployeeLoad {
                    employee_id: e.id.clone(),
                    name: e.name.clone(),
                    shift_count,
                    assigned_hours,
                    max_hours: e.max_hours,
                }
            })
            .collect();

        let mut days: BTreeMap<NaiveDate, Vec<DayEntry>> = BTreeMap::new();
        for shift in shifts {
            let assignment = schedule.assignment_for(&shift.id);
            days.entry(shift.day()).or_default().push(DayEntry {
                shift_id: shift.id.clone(),
                role: shift.role.clone(),
                start_time: shift.start_time,
                end_time: shift.end_time,
                duration_hours: shift.duration_hours(),
                employee_id: assignment.map(|a| a.employee_id.clone()),
                employee_name: assignment.map(|a| a.employee_name.clone()),
            });
        }
        for entries in days.values_mut() {
            entries.sort_by_key(|e| e.start_time);
        }

        Self {
            status: schedule.status,
            message: schedule.message.clone(),
            total_shifts: shifts.len(),
            assigned_shifts: schedule.assignments.len() - orphaned,
            coverage: schedule.coverage(),
            employees: employee_loads,
            days,
            orphaned_assignments: orphaned,
        }
    }

    /// Employees whose assigned hours exceed capacity
    pub fn overloaded(&self) -> Vec<&EmployeeLoad> {
        self.employees
            .iter()
            .filter(|l| l.assigned_hours > l.max_hours)
            .collect()
    }

    /// Render as plain text
    pub fn render(&self) -> String {
        let mut output = String::from("Schedule Report\n");
        output.push_str(&format!("{:=<60}\n", ""));
        output.push_str(&format!("Status: {}\n", self.status));
        if let Some(message) = &self.message {
            output.push_str(&format!("Message: {message}\n"));
        }
        output.push_str(&format!(
            "Coverage: {}/{} shifts ({:.1}%)\n",
            self.assigned_shifts,
            self.total_shifts,
            self.coverage * 100.0
        ));
        if self.orphaned_assignments > 0 {
            output.push_str(&format!(
                "Warning: {} assignment(s) reference unknown records\n",
                self.orphaned_assignments
            ));
        }

        output.push_str("\nEmployees\n");
        output.push_str(&format!("{:-<60}\n", ""));
        for load in &self.employees {
            output.push_str(&format!(
                "{:<24} {:>3} shift(s) {:>8} / {:<8} {:>5.1}%\n",
                load.name,
                load.shift_count,
                format_hours(load.assigned_hours),
                format_hours(load.max_hours),
                load.utilization() * 100.0
            ));
        }

        for (day, entries) in &self.days {
            output.push_str(&format!("\n{}\n", day.format("%a %Y-%m-%d")));
            output.push_str(&format!("{:-<60}\n", ""));
            for entry in entries {
                output.push_str(&format!(
                    "{}-{} {:<10} {:<14} {}\n",
                    entry.start_time.format("%H:%M"),
                    entry.end_time.format("%H:%M"),
                    entry.shift_id,
                    entry.role,
                    entry.employee_name.as_deref().unwrap_or("(unassigned)")
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn employee(id: &str, name: &str, max_hours: f64) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            skills: ["cook".to_string()].into_iter().collect(),
            max_hours,
            availability_start: ts("2025-07-01T00:00:00"),
            availability_end: ts("2025-07-07T00:00:00"),
        }
    }

    fn shift(id: &str, start: &str, end: &str) -> Shift {
        Shift {
            id: id.to_string(),
            role: "cook".to_string(),
            start_time: ts(start),
            end_time: ts(end),
            required_skill: "cook".to_string(),
        }
    }

    fn fixture() -> (Schedule, Vec<Employee>, Vec<Shift>) {
        let employees = vec![employee("E1", "Ann", 8.0), employee("E2", "Bob", 10.0)];
        let shifts = vec![
            shift("S2", "2025-07-02T13:00:00", "2025-07-02T17:00:00"),
            shift("S1", "2025-07-01T08:00:00", "2025-07-01T12:30:00"),
            shift("S3", "2025-07-02T06:00:00", "2025-07-02T10:00:00"),
        ];
        let schedule = Schedule::new(
            vec![
                Assignment::new("S2", "E1", "Ann"),
                Assignment::new("S1", "E1", "Ann"),
            ],
            vec!["S3".to_string()],
        );
        (schedule, employees, shifts)
    }

    #[test]
    fn test_employee_loads() {
        let (schedule, employees, shifts) = fixture();
        let report = ScheduleReport::build(&schedule, &employees, &shifts);

        assert_eq!(report.employees[0].shift_count, 2);
        assert!((report.employees[0].assigned_hours - 8.5).abs() < 1e-9);
        assert_eq!(report.employees[1].shift_count, 0);
        assert_eq!(report.overloaded().len(), 1);
        assert_eq!(report.assigned_shifts, 2);
        assert_eq!(report.total_shifts, 3);
    }

    #[test]
    fn test_days_are_chronological() {
        let (schedule, employees, shifts) = fixture();
        let report = ScheduleReport::build(&schedule, &employees, &shifts);

        let days: Vec<_> = report.days.keys().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2025-07-01", "2025-07-02"]);

        let second_day = &report.days.values().nth(1).unwrap();
        assert_eq!(second_day[0].shift_id, "S3");
        assert_eq!(second_day[0].employee_name, None);
        assert_eq!(second_day[1].employee_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_orphaned_assignments_are_counted() {
        let (mut schedule, employees, shifts) = fixture();
        schedule.assignments.push(Assignment::new("S9", "E1", "Ann"));

        let report = ScheduleReport::build(&schedule, &employees, &shifts);
        assert_eq!(report.orphaned_assignments, 1);
        assert!(report.render().contains("reference unknown records"));
    }

    #[test]
    fn test_render_mentions_status_and_unassigned() {
        let (schedule, employees, shifts) = fixture();
        let text = ScheduleReport::build(&schedule, &employees, &shifts).render();

        assert!(text.contains("Status: partial"));
        assert!(text.contains("(unassigned)"));
        assert!(text.contains("8.5h / 8h"));
    }
}
