use anyhow::{Context, Result};
use serde_json::json;

use shiftplan::scheduler::ScheduleReport;

use super::AppContext;

pub async fn show(ctx: &AppContext, as_json: bool) -> Result<()> {
    let store = ctx.schedule_store();
    let Some(schedule) = store.load().await.context("Failed to load stored schedule")? else {
        println!("No schedule yet. Run 'shiftplan schedule' first.");
        return Ok(());
    };

    let records = ctx.records();
    let employees = records.employees().context("Failed to load employees")?;
    let shifts = records.shifts().context("Failed to load shifts")?;
    let report = ScheduleReport::build(&schedule, &employees, &shifts);

    if as_json {
        let document = json!({
            "schedule": schedule,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", store.status().await.display());
        println!();
        print!("{}", report.render());
    }

    Ok(())
}
