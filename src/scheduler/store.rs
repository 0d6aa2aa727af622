//! Schedule Store
//!
//! Holds the most recent [`Schedule`] for readers. Writers replace it
//! wholesale; readers always see either the old or the new schedule, never
//! a mix. When a key-value backend is attached the schedule is also
//! persisted under [`SCHEDULE_KEY`] and can be restored with
//! [`ScheduleStore::load`] on startup.
//!
//! A write takes the state lock, then hands the guard to a blocking task
//! that persists and swaps. Dropping the caller's future before the lock is
//! taken changes nothing; once taken, the backend and memory are updated
//! together even if the caller goes away.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use super::error::{SchedulerError, SchedulerResult};
use crate::models::Schedule;
use crate::storage::{self, KeyValueStore, StorageError, SCHEDULE_KEY};

/// A schedule together with the time it was stored
#[derive(Debug, Clone)]
struct Stored {
    schedule: Schedule,
    updated_at: DateTime<Utc>,
}

impl Stored {
    fn now(schedule: Schedule) -> Self {
        Self {
            schedule,
            updated_at: Utc::now(),
        }
    }
}

type StateGuard = OwnedRwLockWriteGuard<Option<Stored>>;

/// Last-writer-wins holder of the current schedule
pub struct ScheduleStore {
    state: Arc<RwLock<Option<Stored>>>,
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl ScheduleStore {
    /// Create an in-memory store
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
            backend: None,
        }
    }

    /// Create a store that persists every write to `backend`
    pub fn with_backend(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::new()
        }
    }

    /// Current schedule, `None` when nothing has been computed yet
    pub async fn get(&self) -> Option<Schedule> {
        self.state.read().await.as_ref().map(|s| s.schedule.clone())
    }

    /// Replace the current schedule
    ///
    /// The backend is written first; if that fails the in-memory schedule
    /// is left as it was.
    pub async fn set(&self, schedule: Schedule) -> SchedulerResult<()> {
        let assigned = schedule.assignments.len();
        let status = schedule.status;

        self.commit("set", move |backend, mut guard| {
            if let Some(backend) = backend {
                storage::put_json(backend.as_ref(), SCHEDULE_KEY, &schedule)?;
            }
            *guard = Some(Stored::now(schedule));
            Ok(())
        })
        .await?;

        tracing::info!(assigned, status = %status, "Schedule stored");
        Ok(())
    }

    /// Drop the current schedule, in memory and in the backend
    pub async fn clear(&self) -> SchedulerResult<()> {
        self.commit("clear", |backend, mut guard| {
            if let Some(backend) = backend {
                backend.remove(SCHEDULE_KEY)?;
            }
            *guard = None;
            Ok(())
        })
        .await?;

        tracing::debug!("Schedule cleared");
        Ok(())
    }

    /// Restore the persisted schedule into memory
    ///
    /// Returns the restored schedule, `None` without a backend or when
    /// nothing was persisted.
    pub async fn load(&self) -> SchedulerResult<Option<Schedule>> {
        if self.backend.is_none() {
            return Ok(None);
        }

        let restored = self
            .commit("load", |backend, mut guard| {
                let Some(backend) = backend else {
                    return Ok(None);
                };
                let restored: Option<Schedule> = storage::get_json(backend.as_ref(), SCHEDULE_KEY)?;
                if let Some(schedule) = &restored {
                    *guard = Some(Stored::now(schedule.clone()));
                }
                Ok(restored)
            })
            .await?;

        if let Some(schedule) = &restored {
            tracing::info!(
                assigned = schedule.assignments.len(),
                status = %schedule.status,
                "Schedule restored"
            );
        }

        Ok(restored)
    }

    /// Snapshot of the store's state
    pub async fn status(&self) -> StoreStatus {
        let state = self.state.read().await;
        StoreStatus {
            has_schedule: state.is_some(),
            updated_at: state.as_ref().map(|s| s.updated_at),
            persistent: self.backend.is_some(),
        }
    }

    /// Run `f` on a blocking thread while holding the write lock
    ///
    /// The only await before the task is spawned is the lock itself, so a
    /// cancelled caller either never starts `f` or lets it run to the end.
    async fn commit<T, F>(&self, operation: &'static str, f: F) -> SchedulerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Option<Arc<dyn KeyValueStore>>, StateGuard) -> Result<T, StorageError>
            + Send
            + 'static,
    {
        let guard = Arc::clone(&self.state).write_owned().await;
        let backend = self.backend.clone();

        tokio::task::spawn_blocking(move || f(backend, guard))
            .await
            .map_err(|e| StorageError::Io {
                key: SCHEDULE_KEY.to_string(),
                source: std::io::Error::other(e),
            })
            .and_then(|result| result)
            .map_err(|e| SchedulerError::store(operation, e))
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Store status information
#[derive(Debug, Clone)]
pub struct StoreStatus {
    pub has_schedule: bool,
    pub updated_at: Option<DateTime<Utc>>,
    pub persistent: bool,
}

impl StoreStatus {
    /// Format as display string
    pub fn display(&self) -> String {
        let mut output = String::from("Schedule Store\n");
        output.push_str(&format!("{:-<30}\n", ""));
        output.push_str(&format!("Has Schedule: {}\n", self.has_schedule));
        output.push_str(&format!("Persistent: {}\n", self.persistent));
        if let Some(at) = self.updated_at {
            output.push_str(&format!("Updated: {}\n", at.format("%Y-%m-%d %H:%M:%S UTC")));
        }
        output
    }
}
