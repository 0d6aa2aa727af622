//! Record Validator
//!
//! Normalizes raw employee and shift records (key/value maps as produced by a
//! tabular upload) into domain types. Batches are all-or-nothing: a single
//! bad record rejects the whole upload, and the error lists every failing
//! record so the caller can report them together.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use shiftplan::validation::{validate_shifts, RawRecord};
//!
//! let raw: RawRecord = serde_json::from_value(json!({
//!     "id": "S1",
//!     "role": "cook",
//!     "start_time": "2025-07-01T08:00:00",
//!     "end_time": "2025-07-01T12:00:00",
//!     "required_skill": "cook"
//! }))
//! .unwrap();
//!
//! let shifts = validate_shifts(&[raw]).unwrap();
//! assert_eq!(shifts[0].duration_hours(), 4.0);
//! ```

pub mod error;
pub mod records;
pub mod timestamp;

use std::collections::HashSet;

use crate::models::{Employee, Shift};

pub use error::{BatchValidationError, RecordFailure, RecordKind, ValidationError};
pub use records::{parse_skills, validate_employee, validate_shift, SKILL_DELIMITER};
pub use timestamp::parse_timestamp;

/// One uploaded row: field name to value
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Validate a batch of employee records
pub fn validate_employees(records: &[RawRecord]) -> Result<Vec<Employee>, BatchValidationError> {
    validate_batch(RecordKind::Employee, records, validate_employee, |e| &e.id)
}

/// Validate a batch of shift records
pub fn validate_shifts(records: &[RawRecord]) -> Result<Vec<Shift>, BatchValidationError> {
    validate_batch(RecordKind::Shift, records, validate_shift, |s| &s.id)
}

fn validate_batch<T, V, I>(
    kind: RecordKind,
    records: &[RawRecord],
    validate: V,
    id_of: I,
) -> Result<Vec<T>, BatchValidationError>
where
    V: Fn(&RawRecord) -> Result<T, ValidationError>,
    I: Fn(&T) -> &str,
{
    if records.is_empty() {
        return Err(BatchValidationError::Empty { kind });
    }

    let mut accepted = Vec::with_capacity(records.len());
    let mut failures = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, raw) in records.iter().enumerate() {
        match validate(raw) {
            Ok(value) => {
                let id = id_of(&value).to_string();
                if !seen_ids.insert(id.clone()) {
                    failures.push(RecordFailure {
                        index,
                        id: Some(id.clone()),
                        error: ValidationError::DuplicateId { id },
                    });
                    continue;
                }
                accepted.push(value);
            }
            Err(error) => failures.push(RecordFailure {
                index,
                id: records::record_id(raw),
                error,
            }),
        }
    }

    if failures.is_empty() {
        tracing::debug!(kind = %kind, count = accepted.len(), "Batch validated");
        Ok(accepted)
    } else {
        tracing::warn!(
            kind = %kind,
            total = records.len(),
            rejected = failures.len(),
            "Batch rejected"
        );
        Err(BatchValidationError::Invalid { kind, failures })
    }
}
