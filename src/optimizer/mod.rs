//! Optimization Gateway
//!
//! Delegates a scheduling problem to an external exact solver and maps its
//! answer back onto the local data model. The gateway never lets a remote
//! failure escape: every outcome is one of
//!
//! - [`GatewayOutcome::Solved`] - a reconciled schedule
//! - [`GatewayOutcome::Infeasible`] - the solver proved no assignment fits
//! - [`GatewayOutcome::Unavailable`] - unreachable, failing or answering
//!   nonsense; the caller falls back to the local heuristic
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shiftplan::models::Period;
//! use shiftplan::optimizer::{ClientConfig, Gateway, GatewayOutcome, OptimizerClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = OptimizerClient::new(ClientConfig::new("http://localhost:8000"))?;
//! let gateway = Gateway::new(Arc::new(client));
//!
//! let period: Period = "2025-07-01/2025-07-07".parse().map_err(anyhow::Error::msg)?;
//! match gateway.solve(period, &[], &[]).await {
//!     GatewayOutcome::Solved(schedule) => println!("{}", schedule.status),
//!     GatewayOutcome::Infeasible { message } => println!("infeasible: {message}"),
//!     GatewayOutcome::Unavailable { reason } => println!("fallback: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use crate::models::{Assignment, Employee, Period, Schedule, ScheduleStatus, Shift};
use crate::scheduler::invariants::verify_assignments;

pub use api::{OptimizeRequest, OptimizeResponse};
pub use client::{ClientConfig, ClientError, OptimizerClient};

/// Message used when the solver reports infeasibility without detail
const DEFAULT_INFEASIBLE_MESSAGE: &str = "No feasible solution found";

// ============================================================================
// Backend Seam
// ============================================================================

/// Something that can answer health probes and optimization requests
#[async_trait]
pub trait OptimizationBackend: Send + Sync {
    /// Succeeds when the backend is reachable and healthy
    async fn health(&self) -> Result<(), ClientError>;

    /// Solve one problem
    async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, ClientError>;
}

#[async_trait]
impl OptimizationBackend for OptimizerClient {
    async fn health(&self) -> Result<(), ClientError> {
        OptimizerClient::health(self).await
    }

    async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, ClientError> {
        OptimizerClient::optimize(self, request).await
    }
}

// ============================================================================
// Gateway
// ============================================================================

/// Result of asking the exact solver
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutcome {
    Solved(Schedule),
    Infeasible { message: String },
    Unavailable { reason: String },
}

/// Health probe, optimization call and reconciliation in one place
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn OptimizationBackend>,
}

impl Gateway {
    pub fn new(backend: Arc<dyn OptimizationBackend>) -> Self {
        Self { backend }
    }

    /// Probe health, then solve; both steps run sequentially
    pub async fn solve(&self, period: Period, employees: &[Employee], shifts: &[Shift]) -> GatewayOutcome {
        if let Err(e) = self.backend.health().await {
            tracing::warn!(error = %e, "Optimizer health check failed");
            return GatewayOutcome::Unavailable {
                reason: format!("health check failed: {e}"),
            };
        }

        let started = Instant::now();
        let request = OptimizeRequest::new(period, employees, shifts);
        let response = match self.backend.optimize(&request).await {
            Ok(response) => response,
            Err(ClientError::Infeasible { detail }) => {
                tracing::info!(detail = %detail, "Optimizer reported infeasible problem");
                return GatewayOutcome::Infeasible { message: detail };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Optimization request failed");
                return GatewayOutcome::Unavailable {
                    reason: format!("optimization failed: {e}"),
                };
            }
        };

        match reconcile(&response, employees, shifts) {
            Ok(schedule) if schedule.status == ScheduleStatus::Infeasible => {
                GatewayOutcome::Infeasible {
                    message: schedule
                        .message
                        .unwrap_or_else(|| DEFAULT_INFEASIBLE_MESSAGE.to_string()),
                }
            }
            Ok(schedule) => {
                tracing::info!(
                    assigned = schedule.assignments.len(),
                    unassigned = schedule.unassigned_shifts.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Optimizer solution accepted"
                );
                GatewayOutcome::Solved(schedule)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Optimizer response rejected");
                GatewayOutcome::Unavailable {
                    reason: format!("malformed optimizer response: {e}"),
                }
            }
        }
    }
}

// ============================================================================
// Reconciliation
// ============================================================================

/// Status word reported by the solver
fn reported_status(word: &str) -> Option<ScheduleStatus> {
    match word.trim().to_ascii_lowercase().as_str() {
        "success" | "optimal" | "feasible" => Some(ScheduleStatus::Feasible),
        "partial" => Some(ScheduleStatus::Partial),
        "infeasible" => Some(ScheduleStatus::Infeasible),
        _ => None,
    }
}

/// Map a solver response onto the local model
///
/// Every assignment must reference a known shift and employee, cover each
/// shift at most once and respect skill, availability and capacity;
/// otherwise the whole response is rejected. Employee names come from the
/// local data and the unassigned list is recomputed in shift input order.
/// An `infeasible` status yields [`Schedule::infeasible`]; any other status
/// follows local coverage.
pub fn reconcile(
    response: &OptimizeResponse,
    employees: &[Employee],
    shifts: &[Shift],
) -> Result<Schedule, ClientError> {
    let reported = reported_status(&response.status);
    let message = response.message().map(str::to_string);

    if reported == Some(ScheduleStatus::Infeasible) {
        let message = message.unwrap_or_else(|| DEFAULT_INFEASIBLE_MESSAGE.to_string());
        return Ok(Schedule::infeasible(shifts, message));
    }

    verify_assignments(&response.assignments, employees, shifts)
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    let names: HashMap<&str, &str> = employees
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();

    // Keep the solver's assignments but in shift input order
    let by_shift: HashMap<&str, &Assignment> = response
        .assignments
        .iter()
        .map(|a| (a.shift_id.as_str(), a))
        .collect();

    let mut assignments = Vec::with_capacity(by_shift.len());
    let mut unassigned = Vec::new();
    for shift in shifts {
        match by_shift.get(shift.id.as_str()) {
            Some(a) => {
                let name = names.get(a.employee_id.as_str()).copied().unwrap_or_default();
                assignments.push(Assignment::new(&shift.id, &a.employee_id, name));
            }
            None => unassigned.push(shift.id.clone()),
        }
    }

    if !response.unassigned_shifts.is_empty() {
        let claimed: HashSet<&str> = response.unassigned_shifts.iter().map(String::as_str).collect();
        let local: HashSet<&str> = unassigned.iter().map(String::as_str).collect();
        if claimed != local {
            tracing::debug!(
                claimed = claimed.len(),
                recomputed = local.len(),
                "Optimizer unassigned list differs from recomputed list"
            );
        }
    }

    let schedule = Schedule::new(assignments, unassigned);
    match reported {
        Some(status) if status != schedule.status => tracing::debug!(
            reported = %status,
            derived = %schedule.status,
            "Optimizer status contradicts coverage; using coverage"
        ),
        None => tracing::warn!(status = %response.status, "Unrecognized optimizer status"),
        _ => {}
    }

    Ok(match message {
        Some(m) => schedule.with_message(m),
        None => schedule,
    })
}
