//! shiftplan - employee shift scheduling
//!
//! Assigns employees to shifts so that every assignment respects the
//! employee's skills, availability window and weekly hour cap.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Employees, shifts, assignments and schedules
//! - [`validation`] - Turning raw JSON records into checked models
//! - [`scheduler`] - Greedy assignment, invariants and the scheduling engine
//! - [`optimizer`] - HTTP client and gateway for the optimization service
//! - [`storage`] - Key/value persistence for records and schedules
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shiftplan::scheduler::{RunOptions, ScheduleStore, SchedulingEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = SchedulingEngine::new(Arc::new(ScheduleStore::new()));
//!     let outcome = engine.run(&[], &[], RunOptions::heuristic_only()).await?;
//!     println!("{}", outcome.schedule.status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod scheduler;
pub mod storage;
pub mod utils;
pub mod validation;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Assignment, Employee, Period, Schedule, ScheduleStatus, Shift};
    pub use crate::optimizer::{Gateway, GatewayOutcome, OptimizerClient};
    pub use crate::scheduler::{RunOptions, RunOutcome, ScheduleStore, SchedulingEngine};
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, RecordStore};
}

// Direct re-exports for convenience
pub use models::{Assignment, Employee, Schedule, ScheduleStatus, Shift};
