//! Persistence of validated employee and shift batches
//!
//! An import validates the whole batch first and only then replaces what is
//! stored, so a rejected upload never clobbers the previous good one.

use std::sync::Arc;

use super::{get_json, put_json, KeyValueStore, EMPLOYEES_KEY, SHIFTS_KEY};
use crate::error::Result;
use crate::models::{Employee, Shift};
use crate::validation::{validate_employees, validate_shifts, RawRecord};

/// Parse an uploaded JSON document into raw records
///
/// Accepts either an array of objects or `{"records": [...]}`.
pub fn parse_record_batch(text: &str) -> serde_json::Result<Vec<RawRecord>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Batch {
        Bare(Vec<RawRecord>),
        Wrapped { records: Vec<RawRecord> },
    }

    Ok(match serde_json::from_str::<Batch>(text)? {
        Batch::Bare(records) | Batch::Wrapped { records } => records,
    })
}

/// Batches accepted by [`RecordStore::import`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Imported {
    pub employees: Option<Vec<Employee>>,
    pub shifts: Option<Vec<Shift>>,
}

/// Repository for the record batches a run is computed from
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Validate and persist an employee batch, replacing the stored one
    pub fn import_employees(&self, raw: &[RawRecord]) -> Result<Vec<Employee>> {
        Ok(self.import(Some(raw), None)?.employees.unwrap_or_default())
    }

    /// Validate and persist a shift batch, replacing the stored one
    pub fn import_shifts(&self, raw: &[RawRecord]) -> Result<Vec<Shift>> {
        Ok(self.import(None, Some(raw))?.shifts.unwrap_or_default())
    }

    /// Validate both batches, then persist whichever were given
    ///
    /// A rejected batch leaves both stored batches as they were.
    pub fn import(
        &self,
        employees: Option<&[RawRecord]>,
        shifts: Option<&[RawRecord]>,
    ) -> Result<Imported> {
        let imported = Imported {
            employees: employees.map(validate_employees).transpose()?,
            shifts: shifts.map(validate_shifts).transpose()?,
        };

        if let Some(employees) = &imported.employees {
            put_json(self.backend.as_ref(), EMPLOYEES_KEY, employees)?;
            tracing::info!(count = employees.len(), "Employees imported");
        }
        if let Some(shifts) = &imported.shifts {
            put_json(self.backend.as_ref(), SHIFTS_KEY, shifts)?;
            tracing::info!(count = shifts.len(), "Shifts imported");
        }

        Ok(imported)
    }

    /// Stored employees, empty when none were imported
    pub fn employees(&self) -> Result<Vec<Employee>> {
        Ok(get_json::<Vec<Employee>>(self.backend.as_ref(), EMPLOYEES_KEY)?.unwrap_or_default())
    }

    /// Stored shifts, empty when none were imported
    pub fn shifts(&self) -> Result<Vec<Shift>> {
        Ok(get_json::<Vec<Shift>>(self.backend.as_ref(), SHIFTS_KEY)?.unwrap_or_default())
    }
}
