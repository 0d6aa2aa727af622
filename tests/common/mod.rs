//! Common test utilities

use chrono::NaiveDateTime;
use serde_json::{json, Value};
use shiftplan::models::{Employee, Shift, TIMESTAMP_FORMAT};
use shiftplan::validation::RawRecord;

/// Parse a wire-format timestamp
#[allow(dead_code)]
pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).expect("valid test timestamp")
}

/// Create an employee available all of 2025-07-01
#[allow(dead_code)]
pub fn employee(id: &str, name: &str, skills: &[&str], max_hours: f64) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        max_hours,
        availability_start: ts("2025-07-01T00:00:00"),
        availability_end: ts("2025-07-01T23:59:59"),
    }
}

/// Create a shift on 2025-07-01 between the given hours
#[allow(dead_code)]
pub fn shift(id: &str, skill: &str, start_hour: u32, end_hour: u32) -> Shift {
    Shift {
        id: id.to_string(),
        role: format!("{skill}_shift"),
        start_time: ts(&format!("2025-07-01T{start_hour:02}:00:00")),
        end_time: ts(&format!("2025-07-01T{end_hour:02}:00:00")),
        required_skill: skill.to_string(),
    }
}

/// Two cooks, two cook shifts and one welder shift nobody can work
#[allow(dead_code)]
pub fn kitchen() -> (Vec<Employee>, Vec<Shift>) {
    let employees = vec![
        employee("E1", "Alice", &["cook"], 8.0),
        employee("E2", "Bob", &["cook", "cashier"], 8.0),
    ];
    let shifts = vec![
        shift("S1", "cook", 8, 12),
        shift("S2", "cook", 12, 16),
        shift("S3", "welder", 9, 17),
    ];
    (employees, shifts)
}

/// Convert a JSON object literal into a raw record
#[allow(dead_code)]
pub fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

/// Raw employee record as an upload would carry it
#[allow(dead_code)]
pub fn raw_employee(id: &str, skills: &str, max_hours: &str) -> RawRecord {
    record(json!({
        "id": id,
        "name": format!("Employee {id}"),
        "skills": skills,
        "max_hours": max_hours,
        "availability_start": "2025-07-01T06:00:00",
        "availability_end": "2025-07-01T22:00:00"
    }))
}

/// Raw shift record as an upload would carry it
#[allow(dead_code)]
pub fn raw_shift(id: &str, skill: &str, start: &str, end: &str) -> RawRecord {
    record(json!({
        "id": id,
        "role": format!("{skill}_shift"),
        "start_time": start,
        "end_time": end,
        "required_skill": skill
    }))
}
