//! Error types for record validation

use std::fmt;
use thiserror::Error;

/// Kind of record a batch holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Employee,
    Shift,
}

impl RecordKind {
    /// Plural label used in messages and as the storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employees",
            Self::Shift => "shifts",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated rule
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field absent, null or blank
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    /// max_hours is not a positive number
    #[error("invalid max_hours '{value}': must be a number greater than 0")]
    InvalidMaxHours { value: String },

    /// Timestamp is not ISO-8601 parseable
    #[error("invalid timestamp in '{field}': '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    /// Start is not strictly before end
    #[error("invalid date range: '{start_field}' must be before '{end_field}'")]
    InvalidRange {
        start_field: &'static str,
        end_field: &'static str,
    },

    /// Skill list parsed to nothing
    #[error("no usable skills in '{value}'")]
    EmptySkills { value: String },

    /// Same id used twice in one batch
    #[error("duplicate id '{id}'")]
    DuplicateId { id: String },
}

/// One rejected record in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Zero-based position in the uploaded batch
    pub index: usize,

    /// Record id, when the record carried one
    pub id: Option<String>,

    pub error: ValidationError,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "row {} ({}): {}", self.index + 1, id, self.error),
            None => write!(f, "row {}: {}", self.index + 1, self.error),
        }
    }
}

/// Rejection of a whole batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchValidationError {
    /// Nothing to validate
    #[error("empty {kind} batch")]
    Empty { kind: RecordKind },

    /// At least one record broke a rule; nothing from the batch is admitted
    #[error("{} invalid record(s) in {kind}: {}", .failures.len(), join_failures(.failures))]
    Invalid {
        kind: RecordKind,
        failures: Vec<RecordFailure>,
    },
}

impl BatchValidationError {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Empty { kind } | Self::Invalid { kind, .. } => *kind,
        }
    }

    /// Per-record failures (empty for an empty batch)
    pub fn failures(&self) -> &[RecordFailure] {
        match self {
            Self::Empty { .. } => &[],
            Self::Invalid { failures, .. } => failures,
        }
    }
}

fn join_failures(failures: &[RecordFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
