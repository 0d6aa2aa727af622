use anyhow::{Context, Result};
use std::sync::Arc;

use shiftplan::models::Period;
use shiftplan::optimizer::{Gateway, OptimizerClient};
use shiftplan::scheduler::{RunOptions, ScheduleReport, SchedulingEngine};

use super::AppContext;

pub struct ScheduleParams {
    pub heuristic_only: bool,
    pub period: Option<String>,
}

pub async fn schedule(ctx: &AppContext, params: ScheduleParams) -> Result<()> {
    let records = ctx.records();
    let employees = records.employees().context("Failed to load employees")?;
    let shifts = records.shifts().context("Failed to load shifts")?;

    if shifts.is_empty() {
        println!("No shifts imported. Run 'shiftplan import --shifts <file>' first.");
        return Ok(());
    }

    let period = params
        .period
        .or_else(|| ctx.config.scheduling.period.clone())
        .map(|p| p.parse::<Period>().map_err(anyhow::Error::msg))
        .transpose()
        .context("Invalid --period")?;

    let heuristic_only = params.heuristic_only || ctx.config.scheduling.heuristic_only;

    let store = Arc::new(ctx.schedule_store());
    let mut engine = SchedulingEngine::new(Arc::clone(&store));
    if ctx.config.optimizer.enabled && !heuristic_only {
        let client = OptimizerClient::new(ctx.config.client_config())
            .context("Failed to create optimizer client")?;
        engine = engine.with_gateway(Gateway::new(Arc::new(client)));
    }

    let options = RunOptions {
        period,
        heuristic_only,
    };

    let before = store.status().await.updated_at;
    let outcome = tokio::select! {
        result = engine.run(&employees, &shifts, options) => result.context("Scheduling run failed")?,
        _ = tokio::signal::ctrl_c() => {
            // Waits for a write that was already under way
            if store.status().await.updated_at == before {
                println!("Interrupted; stored schedule left unchanged");
            } else {
                println!("Interrupted after the new schedule was stored");
            }
            return Ok(());
        }
    };

    println!("Run {} ({})", outcome.run_id, outcome.source);
    if let Some(advisory) = &outcome.advisory {
        println!("Notice: {advisory}");
    }
    if !outcome.unstaffable_shifts.is_empty() {
        println!(
            "No eligible employee for: {}",
            outcome.unstaffable_shifts.join(", ")
        );
    }
    println!();
    print!(
        "{}",
        ScheduleReport::build(&outcome.schedule, &employees, &shifts).render()
    );

    Ok(())
}
