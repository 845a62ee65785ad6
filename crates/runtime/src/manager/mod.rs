//! The slot manager: owner of the active slot and the slot directory.
//!
//! [`SlotManager`] is the single entry point game code talks to. It holds a
//! detached copy of the active slot, commits it into the
//! [`SlotDirectory`] on save, and hands the directory to the persistence
//! worker. Operations never panic and never return errors: each one reports
//! its outcome as `bool`/`Option` and logs why it failed.
//!
//! Modules are organized by responsibility:
//! - `builder` constructs the manager and its background runtime
//! - `lifecycle` implements new/save/load/delete/rename/select
//! - `values` holds the typed accessors for the active slot
//! - `spawn` recreates stored actors and objects
//! - `queries` answers slot-directory questions for menus
//! - `record` flattens serializable records into scalar entries

mod builder;
mod lifecycle;
mod queries;
mod record;
mod spawn;
mod values;

pub use builder::SlotManagerBuilder;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};
use std::time::Duration;

use save_core::{SlotDirectory, SlotInfo, ValueStore};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::config::{SaveSystemConfig, SettingsSource, log_changes};
use crate::error::{ManagerError, Result};
use crate::listeners::{LifecycleEvent, LifecycleListener, ListenerRegistry};
use crate::repository::{ContainerKey, ContainerRepository};
use crate::workers::{NotificationDispatcher, PersistenceHandle, PlaytimeTracker};

/// String entry holding the level the active slot was saved in.
pub const CURRENT_LEVEL_KEY: &str = "Current Level";

/// Tokio runtime the background work runs on.
enum RuntimeHost {
    Owned(tokio::runtime::Runtime),
    Shared(Handle),
}

impl RuntimeHost {
    fn handle(&self) -> Handle {
        match self {
            Self::Owned(runtime) => runtime.handle().clone(),
            Self::Shared(handle) => handle.clone(),
        }
    }
}

/// Manages save slots for one game session.
///
/// New-game, save, load and spawn operations must run on the primary
/// thread, which is the thread that built the manager. A manager that owns
/// its runtime must also be dropped outside of any async context.
pub struct SlotManager {
    settings: Box<dyn SettingsSource>,
    config: SaveSystemConfig,
    repository: Arc<dyn ContainerRepository>,

    directory: SlotDirectory,
    /// Containers already merged into `directory`, by file and user.
    loaded: HashSet<(String, u32)>,

    current_name: String,
    current_info: SlotInfo,
    current_data: ValueStore,

    playtime: Arc<AtomicU64>,
    tracker: Option<PlaytimeTracker>,
    playtime_period: Duration,

    listeners: ListenerRegistry,
    dispatcher: NotificationDispatcher,
    persistence: PersistenceHandle,
    persistence_task: Option<JoinHandle<()>>,

    primary: ThreadId,
    runtime: RuntimeHost,
}

impl SlotManager {
    pub fn builder() -> SlotManagerBuilder {
        SlotManagerBuilder::new()
    }

    /// Settings as of the last refresh.
    pub fn config(&self) -> &SaveSystemConfig {
        &self.config
    }

    /// Register a listener for lifecycle notifications.
    pub fn register_listener<L: LifecycleListener + 'static>(&mut self, listener: &Arc<L>) {
        self.listeners.register(listener);
    }

    pub fn unregister_listener<L: LifecycleListener + 'static>(
        &mut self,
        listener: &Arc<L>,
    ) -> bool {
        self.listeners.unregister(listener)
    }

    /// Make the calling thread the primary thread.
    pub fn rebind_primary_context(&mut self) {
        self.primary = thread::current().id();
    }

    pub fn is_primary_context(&self) -> bool {
        thread::current().id() == self.primary
    }

    /// Block until every queued background write has finished.
    ///
    /// Returns `false` when called from an async context, where blocking
    /// is not allowed; use the worker's async flush there instead.
    pub fn flush(&self) -> bool {
        if Handle::try_current().is_ok() {
            warn!("flush called from an async context; background writes not awaited");
            return false;
        }
        match self.persistence.flush_blocking() {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to flush background saves: {}", e);
                false
            }
        }
    }

    /// Async variant of [`SlotManager::flush`].
    pub async fn flush_async(&self) -> bool {
        self.persistence.flush().await.is_ok()
    }

    fn ensure_primary(&self, operation: &'static str) -> Result<()> {
        if self.is_primary_context() {
            Ok(())
        } else {
            Err(ManagerError::NotPrimaryContext { operation })
        }
    }

    /// Re-read settings and apply toggles that affect running components.
    fn refresh_settings(&mut self) {
        let next = self.settings.load();
        if next == self.config {
            return;
        }
        log_changes(&self.config, &next);
        self.dispatcher.set_background(next.multithreaded_events);
        self.config = next;
    }

    /// Notify every live listener.
    fn dispatch_all(&mut self, event: LifecycleEvent) {
        let targets = self.listeners.live();
        self.dispatcher.dispatch(targets, event);
    }

    fn sync_playtime(&mut self) {
        self.current_data.seconds_played = self.playtime.load(Ordering::Relaxed);
    }

    /// Bind a fresh counter seeded from the active slot and restart the
    /// tracker on it. The previous tracker stops with its counter.
    fn rebind_playtime(&mut self) {
        self.playtime = Arc::new(AtomicU64::new(self.current_data.seconds_played));
        self.tracker = Some(PlaytimeTracker::spawn(
            &self.runtime.handle(),
            &self.playtime,
            self.playtime_period,
        ));
    }

    /// Copy slot `name` out of the directory as the active slot.
    fn select(&mut self, name: &str) -> bool {
        let Some((info, data)) = self.directory.get(name) else {
            return false;
        };
        self.current_info = info.clone();
        self.current_data = data.clone();
        self.current_name = name.to_owned();
        self.playtime
            .store(self.current_data.seconds_played, Ordering::Relaxed);
        true
    }

    fn clear_current(&mut self) {
        self.current_name.clear();
        self.current_info = SlotInfo::default();
        self.current_data = ValueStore::default();
        self.playtime.store(0, Ordering::Relaxed);
    }

    fn container_key(&self, file: &str, user_index: u32) -> Result<ContainerKey> {
        let format = self
            .config
            .container_format
            .ok_or(ManagerError::FormatUnset)?;
        let key = ContainerKey::new(file, user_index, format);
        key.validate()?;
        Ok(key)
    }

    /// Log a failed operation at the level its error class calls for.
    fn report(&self, operation: &str, err: &ManagerError) {
        if err.is_recoverable() {
            warn!("{} failed: {}", operation, err);
        } else {
            error!("{} failed: {}", operation, err);
        }
    }
}

impl Drop for SlotManager {
    fn drop(&mut self) {
        self.tracker = None;
        self.persistence.shutdown();

        // Drain queued writes before the owned runtime goes away.
        let task = self.persistence_task.take();
        if let (RuntimeHost::Owned(runtime), Some(task)) = (&self.runtime, task)
            && Handle::try_current().is_err()
        {
            let _ = runtime.block_on(task);
        }
    }
}
