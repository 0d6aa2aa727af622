//! Per-record validation rules
//!
//! Each function is pure: it reads one raw record and returns either the
//! normalized domain value or the first rule the record breaks.

use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::BTreeSet;

use super::error::ValidationError;
use super::timestamp::parse_timestamp;
use super::RawRecord;
use crate::models::{Employee, Shift};

/// Separator for skill lists supplied as a single string
pub const SKILL_DELIMITER: char = ',';

const EMPLOYEE_FIELDS: [&str; 6] = [
    "id",
    "name",
    "skills",
    "max_hours",
    "availability_start",
    "availability_end",
];

const SHIFT_FIELDS: [&str; 5] = ["id", "role", "start_time", "end_time", "required_skill"];

/// Validate and normalize one employee record
pub fn validate_employee(raw: &RawRecord) -> Result<Employee, ValidationError> {
    require_fields(raw, &EMPLOYEE_FIELDS)?;

    let id = text_field(raw, "id")?;
    let name = text_field(raw, "name")?;

    let max_hours_text = text_field(raw, "max_hours")?;
    let max_hours = parse_max_hours(&max_hours_text)?;

    let availability_start = timestamp_field(raw, "availability_start")?;
    let availability_end = timestamp_field(raw, "availability_end")?;
    if availability_start >= availability_end {
        return Err(ValidationError::InvalidRange {
            start_field: "availability_start",
            end_field: "availability_end",
        });
    }

    let skills = skills_field(raw)?;

    Ok(Employee {
        id,
        name,
        skills,
        max_hours,
        availability_start,
        availability_end,
    })
}

/// Validate and normalize one shift record
pub fn validate_shift(raw: &RawRecord) -> Result<Shift, ValidationError> {
    require_fields(raw, &SHIFT_FIELDS)?;

    let start_time = timestamp_field(raw, "start_time")?;
    let end_time = timestamp_field(raw, "end_time")?;
    if start_time >= end_time {
        return Err(ValidationError::InvalidRange {
            start_field: "start_time",
            end_field: "end_time",
        });
    }

    Ok(Shift {
        id: text_field(raw, "id")?,
        role: text_field(raw, "role")?,
        start_time,
        end_time,
        required_skill: text_field(raw, "required_skill")?,
    })
}

/// Split a delimited skill string into trimmed, non-empty tokens
pub fn parse_skills(value: &str) -> BTreeSet<String> {
    value
        .split(SKILL_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Record id, if the record has a usable one
pub(crate) fn record_id(raw: &RawRecord) -> Option<String> {
    text_field(raw, "id").ok()
}

fn require_fields(raw: &RawRecord, fields: &[&'static str]) -> Result<(), ValidationError> {
    for &field in fields {
        if !is_present(raw.get(field)) {
            return Err(ValidationError::MissingField { field });
        }
    }
    Ok(())
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn text_field(raw: &RawRecord, field: &'static str) -> Result<String, ValidationError> {
    match raw.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(ValidationError::MissingField { field }),
    }
}

fn parse_max_hours(text: &str) -> Result<f64, ValidationError> {
    match text.parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours > 0.0 => Ok(hours),
        _ => Err(ValidationError::InvalidMaxHours {
            value: text.to_string(),
        }),
    }
}

fn timestamp_field(raw: &RawRecord, field: &'static str) -> Result<NaiveDateTime, ValidationError> {
    let text = text_field(raw, field)?;
    parse_timestamp(&text).ok_or(ValidationError::InvalidTimestamp { field, value: text })
}

fn skills_field(raw: &RawRecord) -> Result<BTreeSet<String>, ValidationError> {
    let (skills, original) = match raw.get("skills") {
        Some(Value::String(s)) => (parse_skills(s), s.clone()),
        Some(Value::Array(items)) => {
            let skills = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            (skills, Value::Array(items.clone()).to_string())
        }
        _ => return Err(ValidationError::MissingField { field: "skills" }),
    };

    if skills.is_empty() {
        return Err(ValidationError::EmptySkills { value: original });
    }
    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn employee_record() -> RawRecord {
        record(json!({
            "id": "E1",
            "name": " Alice ",
            "skills": "cook, cashier ,,",
            "max_hours": "8",
            "availability_start": "2025-07-01T06:00:00",
            "availability_end": "2025-07-01T22:00:00"
        }))
    }

    fn shift_record() -> RawRecord {
        record(json!({
            "id": "S1",
            "role": "morning_cook",
            "start_time": "2025-07-01T08:00:00",
            "end_time": "2025-07-01T12:00:00",
            "required_skill": "cook"
        }))
    }

    #[test]
    fn test_valid_employee_is_normalized() {
        let employee = validate_employee(&employee_record()).unwrap();
        assert_eq!(employee.id, "E1");
        assert_eq!(employee.name, "Alice");
        assert_eq!(employee.max_hours, 8.0);
        assert_eq!(
            employee.skills.iter().cloned().collect::<Vec<_>>(),
            vec!["cashier".to_string(), "cook".to_string()]
        );
    }

    #[test]
    fn test_employee_numeric_max_hours_and_skill_list() {
        let mut raw = employee_record();
        raw.insert("max_hours".to_string(), json!(37.5));
        raw.insert("skills".to_string(), json!(["cook", " welder "]));

        let employee = validate_employee(&raw).unwrap();
        assert_eq!(employee.max_hours, 37.5);
        assert!(employee.has_skill("welder"));
    }

    #[test]
    fn test_employee_missing_field() {
        for field in EMPLOYEE_FIELDS {
            let mut raw = employee_record();
            raw.remove(field);
            assert_eq!(
                validate_employee(&raw),
                Err(ValidationError::MissingField { field }),
                "removing {field}"
            );
        }
    }

    #[test]
    fn test_employee_blank_field_is_missing() {
        let mut raw = employee_record();
        raw.insert("name".to_string(), json!("   "));
        assert_eq!(
            validate_employee(&raw),
            Err(ValidationError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_employee_max_hours_rules() {
        for bad in ["0", "-4", "eight", "NaN", "inf"] {
            let mut raw = employee_record();
            raw.insert("max_hours".to_string(), json!(bad));
            assert!(
                matches!(validate_employee(&raw), Err(ValidationError::InvalidMaxHours { .. })),
                "max_hours {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_employee_availability_must_be_ordered() {
        let mut raw = employee_record();
        raw.insert("availability_end".to_string(), json!("2025-07-01T06:00:00"));
        assert_eq!(
            validate_employee(&raw),
            Err(ValidationError::InvalidRange {
                start_field: "availability_start",
                end_field: "availability_end",
            })
        );
    }

    #[test]
    fn test_employee_unparseable_timestamp() {
        let mut raw = employee_record();
        raw.insert("availability_start".to_string(), json!("yesterday"));
        assert_eq!(
            validate_employee(&raw),
            Err(ValidationError::InvalidTimestamp {
                field: "availability_start",
                value: "yesterday".to_string(),
            })
        );
    }

    #[test]
    fn test_employee_skills_that_trim_to_nothing() {
        let mut raw = employee_record();
        raw.insert("skills".to_string(), json!(" , ,"));
        assert!(matches!(
            validate_employee(&raw),
            Err(ValidationError::EmptySkills { .. })
        ));
    }

    #[test]
    fn test_valid_shift() {
        let shift = validate_shift(&shift_record()).unwrap();
        assert_eq!(shift.id, "S1");
        assert_eq!(shift.required_skill, "cook");
        assert_eq!(shift.duration_hours(), 4.0);
    }

    #[test]
    fn test_shift_zero_length_rejected() {
        let mut raw = shift_record();
        raw.insert("end_time".to_string(), json!("2025-07-01T08:00:00"));
        assert_eq!(
            validate_shift(&raw),
            Err(ValidationError::InvalidRange {
                start_field: "start_time",
                end_field: "end_time",
            })
        );
    }

    #[test]
    fn test_shift_missing_required_skill() {
        let mut raw = shift_record();
        raw.insert("required_skill".to_string(), Value::Null);
        assert_eq!(
            validate_shift(&raw),
            Err(ValidationError::MissingField {
                field: "required_skill"
            })
        );
    }

    #[test]
    fn test_parse_skills() {
        let skills = parse_skills(" cook,  , manager,cook ");
        assert_eq!(skills.len(), 2);
        assert!(skills.contains("cook"));
        assert!(skills.contains("manager"));
    }
}
