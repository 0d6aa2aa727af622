//! Unified error handling for the shiftplan crate
//!
//! Each module keeps its own error type; [`Error`] wraps them so callers
//! crossing module boundaries can use one type and still ask how to react
//! through [`Error::category`] and [`Error::is_recoverable`].

use std::io;
use thiserror::Error;

pub use crate::optimizer::ClientError;
pub use crate::scheduler::error::SchedulerError;
pub use crate::storage::StorageError;
pub use crate::validation::BatchValidationError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Rejected input records
    Validation,
    /// Broken scheduling invariants
    Scheduler,
    /// Optimizer transport errors
    Network,
    /// Storage and I/O errors
    Storage,
    /// Configuration errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Scheduler => "scheduler",
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

/// Unified error type for the shiftplan crate
#[derive(Error, Debug)]
pub enum Error {
    /// Record batch rejected
    #[error("Validation error: {0}")]
    Validation(#[from] BatchValidationError),

    /// Scheduling run aborted
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Optimizer client errors
    #[error("Optimizer error: {0}")]
    Client(#[from] ClientError),

    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Scheduler(e) => e.is_recoverable(),
            Self::Client(e) => e.is_retryable(),
            Self::Storage(StorageError::Io { .. }) => true,
            Self::Storage(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Scheduler(SchedulerError::Store { .. }) => ErrorCategory::Storage,
            Self::Scheduler(_) => ErrorCategory::Scheduler,
            Self::Client(_) => ErrorCategory::Network,
            Self::Storage(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Other,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
