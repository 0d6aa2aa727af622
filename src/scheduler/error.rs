//! Error types for the scheduler module

use std::fmt;
use thiserror::Error;

use crate::storage::StorageError;

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Internal rule a run's input or output must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invariant {
    /// Two shifts share an id
    UniqueShiftIds,
    /// Two employees share an id
    UniqueEmployeeIds,
    /// Shift ends at or before it starts
    PositiveDuration,
    /// Employee capacity is zero, negative or not finite
    PositiveCapacity,
    /// A shift was assigned more than once
    SingleAssignment,
    /// Assignee lacks the required skill
    SkillMatch,
    /// Shift lies outside the assignee's availability window
    Availability,
    /// Assignee's total hours exceed max_hours
    Capacity,
    /// Assignment names a shift or employee that does not exist
    KnownReference,
}

impl Invariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UniqueShiftIds => "unique shift ids",
            Self::UniqueEmployeeIds => "unique employee ids",
            Self::PositiveDuration => "positive shift duration",
            Self::PositiveCapacity => "positive capacity",
            Self::SingleAssignment => "at most one assignment per shift",
            Self::SkillMatch => "skill match",
            Self::Availability => "availability",
            Self::Capacity => "capacity",
            Self::KnownReference => "known reference",
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduler-specific errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Input or output broke an internal invariant; the run is aborted
    #[error("invariant violated ({invariant}): {detail}")]
    InvariantViolation {
        invariant: Invariant,
        detail: String,
    },

    /// Persisting or loading the schedule failed
    #[error("schedule store error during '{operation}': {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

impl SchedulerError {
    /// Create an invariant violation
    pub fn invariant(invariant: Invariant, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            invariant,
            detail: detail.into(),
        }
    }

    /// Create a store error with context
    pub fn store(operation: &'static str, source: StorageError) -> Self {
        Self::Store { operation, source }
    }

    /// The violated invariant, if this is an invariant violation
    pub fn violated_invariant(&self) -> Option<Invariant> {
        match self {
            Self::InvariantViolation { invariant, .. } => Some(*invariant),
            _ => None,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Store { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_message() {
        let err = SchedulerError::invariant(Invariant::UniqueShiftIds, "shift 'S1' appears twice");
        assert_eq!(
            err.to_string(),
            "invariant violated (unique shift ids): shift 'S1' appears twice"
        );
        assert_eq!(err.violated_invariant(), Some(Invariant::UniqueShiftIds));
    }

    #[test]
    fn test_is_recoverable() {
        let store_err = SchedulerError::store(
            "set",
            StorageError::InvalidKey("bad key".to_string()),
        );
        assert!(store_err.is_recoverable());

        let invariant_err = SchedulerError::invariant(Invariant::Capacity, "E1");
        assert!(!invariant_err.is_recoverable());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let scheduler_err: SchedulerError = json_err.into();
        assert!(matches!(scheduler_err, SchedulerError::Serialization { .. }));
    }
}
