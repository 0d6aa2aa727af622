use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use shiftplan::error::Error;
use shiftplan::storage::parse_record_batch;
use shiftplan::validation::RawRecord;

use super::AppContext;

pub struct ImportParams {
    pub employees: Option<PathBuf>,
    pub shifts: Option<PathBuf>,
}

pub async fn import(ctx: &AppContext, params: ImportParams) -> Result<()> {
    if params.employees.is_none() && params.shifts.is_none() {
        anyhow::bail!("nothing to import: pass --employees and/or --shifts");
    }

    // Read, parse and validate everything before storing anything
    let employees = match &params.employees {
        Some(path) => Some(read_batch(path).await?),
        None => None,
    };
    let shifts = match &params.shifts {
        Some(path) => Some(read_batch(path).await?),
        None => None,
    };

    let imported = ctx
        .records()
        .import(employees.as_deref(), shifts.as_deref())
        .map_err(report_rejection)?;

    if let Some(employees) = &imported.employees {
        println!("Imported {} employee(s)", employees.len());
    }
    if let Some(shifts) = &imported.shifts {
        println!("Imported {} shift(s)", shifts.len());
    }

    Ok(())
}

async fn read_batch(path: &Path) -> Result<Vec<RawRecord>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;

    parse_record_batch(&text)
        .with_context(|| format!("Records file is not a JSON array of objects: {}", path.display()))
}

fn report_rejection(err: Error) -> anyhow::Error {
    if let Error::Validation(batch) = &err {
        eprintln!("Rejected {} batch:", batch.kind());
        for failure in batch.failures() {
            eprintln!("  {failure}");
        }
    }
    anyhow::Error::new(err)
}
