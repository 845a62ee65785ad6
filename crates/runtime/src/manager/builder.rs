use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::thread;
use std::time::Duration;

use save_core::{SlotDirectory, SlotInfo, ValueStore};
use tokio::runtime::Handle;
use tracing::info;

use super::{RuntimeHost, SlotManager};
use crate::config::{SaveSystemConfig, SettingsSource, StaticSettings};
use crate::error::{ManagerError, Result};
use crate::listeners::ListenerRegistry;
use crate::repository::{ContainerRepository, FileContainerRepository};
use crate::workers::{NotificationDispatcher, PersistenceHandle, PlaytimeTracker};

/// Builder for [`SlotManager`].
pub struct SlotManagerBuilder {
    settings: Option<Box<dyn SettingsSource>>,
    repository: Option<Arc<dyn ContainerRepository>>,
    runtime: Option<Handle>,
    playtime_period: Duration,
}

impl SlotManagerBuilder {
    pub(super) fn new() -> Self {
        Self {
            settings: None,
            repository: None,
            runtime: None,
            playtime_period: PlaytimeTracker::DEFAULT_PERIOD,
        }
    }

    /// Use fixed settings.
    pub fn config(self, config: SaveSystemConfig) -> Self {
        self.settings(StaticSettings::new(config))
    }

    /// Re-read settings from `source` before each new-game, save and load.
    pub fn settings(mut self, source: impl SettingsSource + 'static) -> Self {
        self.settings = Some(Box::new(source));
        self
    }

    /// Override container storage.
    ///
    /// Defaults to a [`FileContainerRepository`] in the configured save
    /// directory.
    pub fn repository(mut self, repository: Arc<dyn ContainerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Run background work on an existing tokio runtime instead of a
    /// manager-owned one.
    pub fn runtime_handle(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Interval between playtime ticks (one second by default).
    pub fn playtime_period(mut self, period: Duration) -> Self {
        self.playtime_period = period;
        self
    }

    /// Build the manager. The calling thread becomes the primary thread.
    pub fn build(self) -> Result<SlotManager> {
        let settings = self
            .settings
            .unwrap_or_else(|| Box::new(StaticSettings::default()));
        let config = settings.load();

        let runtime = match self.runtime {
            Some(handle) => RuntimeHost::Shared(handle),
            None => RuntimeHost::Owned(
                tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(2)
                    .thread_name("save-worker")
                    .enable_all()
                    .build()
                    .map_err(ManagerError::RuntimeStart)?,
            ),
        };
        let handle = runtime.handle();

        let repository = self.repository.unwrap_or_else(|| {
            Arc::new(FileContainerRepository::new(config.resolved_save_dir()))
        });

        let (persistence, persistence_task) =
            PersistenceHandle::spawn(&handle, Arc::clone(&repository));
        let dispatcher = NotificationDispatcher::new(handle, config.multithreaded_events);

        info!(
            "Save system ready: project={} version={} format={:?} single_file={} multithreaded={}",
            config.project.name,
            config.project.version,
            config.container_format,
            config.single_file_saving,
            config.multithreaded_saving
        );

        Ok(SlotManager {
            settings,
            config,
            repository,
            directory: SlotDirectory::new(),
            loaded: HashSet::new(),
            current_name: String::new(),
            current_info: SlotInfo::default(),
            current_data: ValueStore::default(),
            playtime: Arc::new(AtomicU64::new(0)),
            tracker: None,
            playtime_period: self.playtime_period,
            listeners: ListenerRegistry::new(),
            dispatcher,
            persistence,
            persistence_task: Some(persistence_task),
            primary: thread::current().id(),
            runtime,
        })
    }
}

impl Default for SlotManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
