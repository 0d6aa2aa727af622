//! Shift assignment engine
//!
//! # Overview
//!
//! Given validated employees and shifts, the engine produces a [`Schedule`]
//! that respects four hard rules:
//!
//! - each shift goes to at most one employee
//! - the employee holds the shift's required skill
//! - the shift lies inside the employee's availability window
//! - the employee's total assigned hours stay within `max_hours`
//!
//! # Architecture
//!
//! ```text
//!   validated records
//!          │
//!   ┌──────▼───────┐   solver reachable   ┌───────────────────┐
//!   │    Engine    ├─────────────────────►│ Optimization      │
//!   │ (run lock,   │◄─────────────────────┤ Gateway           │
//!   │  decision)   │ Solved / Infeasible  └───────────────────┘
//!   └──────┬───────┘   / Unavailable
//!          │ unavailable or heuristic-only
//!   ┌──────▼───────┐      ┌──────────────┐
//!   │   Greedy     ├─────►│ Eligibility  │
//!   │  heuristic   │      │   filter     │
//!   └──────┬───────┘      └──────────────┘
//!          │
//!   ┌──────▼───────┐
//!   │   Schedule   │
//!   │    Store     │
//!   └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`eligibility`] - skill/availability filter and candidate ranking
//! - [`greedy`] - the greedy assignment heuristic
//! - [`invariants`] - input checks and assignment verification
//! - [`store`] - holder of the last computed schedule
//! - [`engine`] - the decision point between solver and heuristic
//! - [`report`] - per-employee and per-day views of a schedule
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use shiftplan::scheduler::{RunOptions, ScheduleStore, SchedulingEngine};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = Arc::new(ScheduleStore::new());
//! let engine = SchedulingEngine::new(Arc::clone(&store));
//!
//! let outcome = engine.run(&[], &[], RunOptions::default()).await?;
//! println!("{} via {}", outcome.schedule.status, outcome.source);
//! # Ok(())
//! # }
//! ```
//!
//! [`Schedule`]: crate::models::Schedule

pub mod eligibility;
pub mod engine;
pub mod error;
pub mod greedy;
pub mod invariants;
pub mod report;
pub mod store;

pub use eligibility::{diagnose, eligible_candidates, is_eligible, AssignedHours, ShiftEligibility};
pub use engine::{RunOptions, RunOutcome, ScheduleSource, SchedulingEngine};
pub use error::{Invariant, SchedulerError, SchedulerResult};
pub use greedy::assign;
pub use invariants::{check_inputs, verify_assignments};
pub use report::{DayEntry, EmployeeLoad, ScheduleReport};
pub use store::{ScheduleStore, StoreStatus};
