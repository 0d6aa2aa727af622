pub mod health;
pub mod import;
pub mod schedule;
pub mod show;

use anyhow::{Context, Result};
use std::sync::Arc;

use shiftplan::config::Config;
use shiftplan::scheduler::ScheduleStore;
use shiftplan::storage::{FileStore, KeyValueStore, RecordStore};

// Re-export command functions for convenience
pub use health::health;
pub use import::{import, ImportParams};
pub use schedule::{schedule, ScheduleParams};
pub use show::show;

/// Shared state every command opens from the configuration
pub struct AppContext {
    pub config: Config,
    backend: Arc<dyn KeyValueStore>,
}

impl AppContext {
    pub fn open(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.storage.data_dir).with_context(|| {
            format!(
                "Failed to open data directory: {}",
                config.storage.data_dir.display()
            )
        })?;
        tracing::debug!(data_dir = %store.dir().display(), "Data directory opened");

        Ok(Self {
            config,
            backend: Arc::new(store),
        })
    }

    pub fn records(&self) -> RecordStore {
        RecordStore::new(Arc::clone(&self.backend))
    }

    pub fn schedule_store(&self) -> ScheduleStore {
        ScheduleStore::with_backend(Arc::clone(&self.backend))
    }
}
