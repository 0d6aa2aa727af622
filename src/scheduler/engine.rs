//! Scheduling engine
//!
//! The one place that decides between the exact solver and the greedy
//! heuristic. A run:
//!
//! 1. checks input invariants and logs eligibility diagnostics
//! 2. asks the optimization gateway, when one is configured and allowed
//! 3. falls back to the heuristic when the gateway is unavailable
//! 4. writes the finished schedule to the store, exactly once
//!
//! Runs on one engine are serialized: a second caller waits for the first
//! to finish. A run future dropped before step 4 begins leaves the store as
//! it was; once the write has begun it completes in the background.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use super::eligibility::log_diagnostics;
use super::error::SchedulerResult;
use super::greedy;
use super::invariants::check_inputs;
use super::store::ScheduleStore;
use crate::models::{Employee, Period, Schedule, Shift};
use crate::optimizer::{Gateway, GatewayOutcome};

/// Which path produced a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Heuristic,
    Optimizer,
}

impl fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heuristic => f.write_str("heuristic"),
            Self::Optimizer => f.write_str("optimizer"),
        }
    }
}

/// Per-run options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Period sent to the optimizer; derived from the shifts when absent
    pub period: Option<Period>,

    /// Skip the optimizer even when one is configured
    pub heuristic_only: bool,
}

impl RunOptions {
    pub fn heuristic_only() -> Self {
        Self {
            heuristic_only: true,
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub schedule: Schedule,
    pub source: ScheduleSource,

    /// Non-fatal notice, set when the optimizer could not be used
    pub advisory: Option<String>,

    /// Shifts nobody was eligible for
    pub unstaffable_shifts: Vec<String>,
}

/// Runs the scheduling pipeline and owns the decision point
pub struct SchedulingEngine {
    store: Arc<ScheduleStore>,
    gateway: Option<Gateway>,
    run_lock: Mutex<()>,
}

impl SchedulingEngine {
    /// Engine that only uses the greedy heuristic
    pub fn new(store: Arc<ScheduleStore>) -> Self {
        Self {
            store,
            gateway: None,
            run_lock: Mutex::new(()),
        }
    }

    /// Attach an optimization gateway
    pub fn with_gateway(mut self, gateway: Gateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn store(&self) -> &Arc<ScheduleStore> {
        &self.store
    }

    pub fn has_gateway(&self) -> bool {
        self.gateway.is_some()
    }

    /// Compute a schedule and store it
    ///
    /// Fails only on invariant violations or store errors; optimizer trouble
    /// turns into a heuristic run with an advisory.
    pub async fn run(
        &self,
        employees: &[Employee],
        shifts: &[Shift],
        options: RunOptions,
    ) -> SchedulerResult<RunOutcome> {
        let _guard = self.run_lock.lock().await;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("schedule_run", %run_id);
        self.run_locked(run_id, employees, shifts, options)
            .instrument(span)
            .await
    }

    async fn run_locked(
        &self,
        run_id: Uuid,
        employees: &[Employee],
        shifts: &[Shift],
        options: RunOptions,
    ) -> SchedulerResult<RunOutcome> {
        let started = Instant::now();
        tracing::info!(
            employees = employees.len(),
            shifts = shifts.len(),
            heuristic_only = options.heuristic_only,
            "Scheduling run started"
        );

        check_inputs(employees, shifts)?;
        let unstaffable_shifts = log_diagnostics(employees, shifts);

        let (schedule, source, advisory) = self.decide(employees, shifts, &options).await?;

        self.store.set(schedule.clone()).await?;

        tracing::info!(
            source = %source,
            status = %schedule.status,
            assigned = schedule.assignments.len(),
            unassigned = schedule.unassigned_shifts.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scheduling run finished"
        );

        Ok(RunOutcome {
            run_id,
            schedule,
            source,
            advisory,
            unstaffable_shifts,
        })
    }

    async fn decide(
        &self,
        employees: &[Employee],
        shifts: &[Shift],
        options: &RunOptions,
    ) -> SchedulerResult<(Schedule, ScheduleSource, Option<String>)> {
        let gateway = match &self.gateway {
            Some(gateway) if !options.heuristic_only => gateway,
            _ => {
                let schedule = greedy::assign(employees, shifts)?;
                return Ok((schedule, ScheduleSource::Heuristic, None));
            }
        };

        let Some(period) = options.period.or_else(|| Period::covering(shifts)) else {
            // Nothing to optimize
            let schedule = greedy::assign(employees, shifts)?;
            return Ok((schedule, ScheduleSource::Heuristic, None));
        };

        match gateway.solve(period, employees, shifts).await {
            GatewayOutcome::Solved(schedule) => Ok((schedule, ScheduleSource::Optimizer, None)),
            GatewayOutcome::Infeasible { message } => Ok((
                Schedule::infeasible(shifts, message),
                ScheduleSource::Optimizer,
                None,
            )),
            GatewayOutcome::Unavailable { reason } => {
                tracing::warn!(reason = %reason, "Optimizer unavailable, using greedy heuristic");
                let schedule = greedy::assign(employees, shifts)?;
                let advisory = format!("Optimizer unavailable ({reason}); used greedy heuristic");
                Ok((schedule, ScheduleSource::Heuristic, Some(advisory)))
            }
        }
    }
}
