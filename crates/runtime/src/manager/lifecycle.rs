//! Slot lifecycle: new, save, load, delete, rename and selection.

use chrono::Local;
use save_core::{SlotDirectory, SlotInfo, ValueStore};
use strum::IntoEnumIterator;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use super::SlotManager;
use crate::config::ContainerFormat;
use crate::error::{ManagerError, Result};
use crate::listeners::LifecycleEvent;
use crate::repository::ContainerKey;

impl SlotManager {
    /// Create slot `name` and make it the active slot.
    ///
    /// Fails without touching anything when `name` exists and `overwrite`
    /// is false.
    pub fn new_game(&mut self, name: &str, overwrite: bool) -> bool {
        match self.try_new_game(name, overwrite) {
            Ok(()) => true,
            Err(e) => {
                self.report("new_game", &e);
                false
            }
        }
    }

    /// Commit the active slot under `name` and persist the container.
    ///
    /// Returns whether the write completed (synchronous saving) or was
    /// queued (background saving). `post_save` listeners are notified in
    /// both cases, and also when the write could not be started.
    pub fn save_game(&mut self, name: &str, user_index: u32) -> bool {
        match self.try_save_game(name, user_index) {
            Ok(()) => true,
            Err(e) => {
                self.report("save_game", &e);
                false
            }
        }
    }

    /// Make stored slot `name` the active slot, reading the container first
    /// if this session has not read it yet.
    ///
    /// Stored actors are not spawned; see [`SlotManager::spawn_stored_actors`].
    pub fn load_game(&mut self, name: &str, user_index: u32) -> bool {
        match self.try_load_game(name, user_index) {
            Ok(()) => true,
            Err(e) => {
                self.report("load_game", &e);
                false
            }
        }
    }

    /// Merge container `file` into the slot directory.
    ///
    /// Each container is read at most once per session; slots already in
    /// memory win over their stored copies. With background saving on, the
    /// read runs on the persistence worker and this call blocks until it
    /// completes. Returns whether the container's data is loaded.
    pub fn load_data(&mut self, file: &str, user_index: u32) -> bool {
        let id = (file.to_owned(), user_index);
        if self.loaded.contains(&id) {
            return true;
        }

        if self.config.verbose_logging {
            debug!("Attempting to load data for player {}", user_index);
        }

        match self.read_container(file, user_index) {
            // per-slot containers are named after the one slot they hold
            Ok(Some(stored)) if !self.config.single_file_saving && !stored.contains(file) => {
                debug!(
                    "Container {} for player {} holds another slot, skipping",
                    file, user_index
                );
                false
            }
            Ok(Some(stored)) => {
                let added = self.directory.merge_missing(stored);
                self.loaded.insert(id);
                if self.config.verbose_logging {
                    debug!(
                        "Loaded data for player {}: {} slot(s) added",
                        user_index, added
                    );
                }
                true
            }
            Ok(None) => {
                warn!("Unable to load data: container {} doesn't exist", file);
                false
            }
            Err(e) => {
                self.report("load_data", &e);
                false
            }
        }
    }

    /// Remove slot `name` and persist the result.
    ///
    /// The container is written even when the slot was not present.
    pub fn delete_game(&mut self, name: &str, user_index: u32) -> bool {
        match self.try_delete_game(name, user_index) {
            Ok(()) => true,
            Err(e) => {
                self.report("delete_game", &e);
                false
            }
        }
    }

    /// Rename a slot.
    ///
    /// With one container per slot, a container already stored for `old` is
    /// moved to `new` right away. Otherwise the change is persisted by the
    /// next save.
    pub fn rename_slot(&mut self, old: &str, new: &str) -> bool {
        match self.try_rename_slot(old, new) {
            Ok(()) => true,
            Err(e) => {
                self.report("rename_slot", &e);
                false
            }
        }
    }

    /// Switch the active slot without reading storage or notifying
    /// listeners. An empty name clears the selection.
    pub fn set_active_save(&mut self, name: &str) -> bool {
        if name.is_empty() {
            self.clear_current();
            return true;
        }
        if !self.select(name) {
            error!("Unable to set active save {}: slot doesn't exist", name);
            return false;
        }
        if self.config.verbose_logging {
            debug!("Active save set to {}", name);
        }
        true
    }

    /// Overwrite the project version recorded in slot `name`.
    pub fn update_save_slot_project_version(&mut self, name: &str, version: &str) -> bool {
        let Some(data) = self.directory.data_mut(name) else {
            warn!("Unable to update project version: slot {} doesn't exist", name);
            return false;
        };
        data.project_version = version.to_owned();
        if self.current_name == name {
            self.current_data.project_version = version.to_owned();
        }
        true
    }

    /// Pause or resume play time counting, creating the tracker if needed.
    pub fn set_time_keeper_enabled(&mut self, enabled: bool) {
        if self.tracker.is_none() {
            self.rebind_playtime();
        }
        if let Some(tracker) = &self.tracker {
            tracker.set_enabled(enabled);
        }
    }

    fn try_new_game(&mut self, name: &str, overwrite: bool) -> Result<()> {
        self.ensure_primary("new_game")?;
        if name.is_empty() {
            return Err(ManagerError::NullInput("slot name".into()));
        }
        self.refresh_settings();

        if self.directory.contains(name) && !overwrite {
            return Err(ManagerError::SlotExists(name.to_owned()));
        }

        let info = SlotInfo::created_at(&Local::now());
        let mut data = ValueStore::new();
        data.project_version = self.config.project.version.clone();

        self.directory.insert(name, info.clone(), data.clone());
        self.current_name = name.to_owned();
        self.current_info = info;
        self.current_data = data;

        info!("Created save slot {}", name);

        self.dispatch_all(LifecycleEvent::NewSlotCreated);
        self.rebind_playtime();
        Ok(())
    }

    fn try_save_game(&mut self, name: &str, user_index: u32) -> Result<()> {
        self.ensure_primary("save_game")?;
        if name.is_empty() {
            return Err(ManagerError::NullInput("slot name".into()));
        }
        self.refresh_settings();

        let file = self.config.container_file(name).to_owned();
        self.ensure_loaded(&file, user_index);

        if self.config.automatic_actor_saving {
            self.capture_registered_actors();
        }

        self.dispatch_all(LifecycleEvent::PreSave);

        self.current_data.project_version = self.config.project.version.clone();
        self.sync_playtime();
        if self.current_info.date_created.is_empty() {
            self.current_info = SlotInfo::created_at(&Local::now());
        }
        if self
            .directory
            .commit(name, &self.current_info, self.current_data.clone())
        {
            debug!("Save slot {} added to directory", name);
        }

        let result = self.persist(name, user_index);
        if result.is_ok() {
            info!("Saved game {} for player {}", name, user_index);
        }

        self.dispatch_all(LifecycleEvent::PostSave);
        result
    }

    fn try_load_game(&mut self, name: &str, user_index: u32) -> Result<()> {
        self.ensure_primary("load_game")?;
        self.refresh_settings();

        self.dispatch_all(LifecycleEvent::PreLoad);

        let file = self.config.container_file(name).to_owned();
        self.load_data(&file, user_index);

        if !self.select(name) {
            return Err(ManagerError::SlotNotFound(name.to_owned()));
        }

        info!("Loaded game {} for player {}", name, user_index);

        self.dispatch_all(LifecycleEvent::PostLoad);
        self.rebind_playtime();
        Ok(())
    }

    fn try_rename_slot(&mut self, old: &str, new: &str) -> Result<()> {
        if new.is_empty() {
            return Err(ManagerError::NullInput("new slot name".into()));
        }

        // players whose stored container for `old` this session has read
        let stored_for: Vec<u32> = if self.config.single_file_saving {
            Vec::new()
        } else {
            self.loaded
                .iter()
                .filter(|(file, _)| file == old)
                .map(|(_, user_index)| *user_index)
                .collect()
        };
        for &user_index in &stored_for {
            self.ensure_loaded(new, user_index);
        }

        self.directory.rename(old, new)?;
        if self.current_name == old {
            self.current_name = new.to_owned();
        }
        info!("Renamed save slot {} to {}", old, new);

        for user_index in stored_for {
            self.persist(new, user_index)?;
            self.persist(old, user_index)?;
        }
        Ok(())
    }

    fn try_delete_game(&mut self, name: &str, user_index: u32) -> Result<()> {
        self.refresh_settings();

        let file = self.config.container_file(name).to_owned();
        self.ensure_loaded(&file, user_index);

        if !self.directory.contains(name) {
            warn!("Deleting save slot {}: slot doesn't exist", name);
        }
        if self.current_name == name {
            self.clear_current();
        }
        self.directory.remove(name);

        self.persist(name, user_index)?;
        info!("Deleted save slot {} for player {}", name, user_index);
        Ok(())
    }

    /// Write the container that holds `slot`.
    ///
    /// Single-file mode writes the whole directory. Otherwise the slot's
    /// own container holds just that slot and is removed once the slot is
    /// deleted.
    fn persist(&mut self, slot: &str, user_index: u32) -> Result<()> {
        let key = self.container_key(self.config.container_file(slot), user_index)?;
        let snapshot = if self.config.single_file_saving {
            Some(self.directory.clone())
        } else {
            self.directory.get(slot).map(|(info, data)| {
                let mut own = SlotDirectory::new();
                own.insert(slot, info.clone(), data.clone());
                own
            })
        };

        let file_name = key.file_name();
        let id = (key.file.clone(), user_index);
        match (snapshot, self.config.multithreaded_saving) {
            // fire-and-forget; the worker logs the outcome
            (Some(directory), true) => self.persistence.submit_write(key, directory)?,
            (None, true) => self.persistence.submit_delete(key)?,
            (Some(directory), false) => self.repository.save(&key, &directory)?,
            (None, false) => self.repository.delete(&key)?,
        }
        // memory now holds everything the container does
        self.loaded.insert(id);

        if self.config.verbose_logging {
            debug!("Persisted container {}", file_name);
        }
        Ok(())
    }

    /// Merge container `file` if it is stored and not read yet. Missing
    /// containers are not reported.
    pub(super) fn ensure_loaded(&mut self, file: &str, user_index: u32) {
        if self.loaded.contains(&(file.to_owned(), user_index)) {
            return;
        }
        let stored = match self.config.container_format {
            Some(format) => self
                .repository
                .exists(&ContainerKey::new(file, user_index, format)),
            None => ContainerFormat::iter()
                .any(|format| self.repository.exists(&ContainerKey::new(file, user_index, format))),
        };
        if stored {
            self.load_data(file, user_index);
        }
    }

    /// Read container `file`. Without a configured format every known
    /// format is tried in turn.
    fn read_container(&self, file: &str, user_index: u32) -> Result<Option<SlotDirectory>> {
        let formats: Vec<ContainerFormat> = match self.config.container_format {
            Some(format) => vec![format],
            None => ContainerFormat::iter().collect(),
        };

        for format in formats {
            let key = ContainerKey::new(file, user_index, format);
            key.validate()?;
            if let Some(directory) = self.read_key(key)? {
                return Ok(Some(directory));
            }
        }
        Ok(None)
    }

    fn read_key(&self, key: ContainerKey) -> Result<Option<SlotDirectory>> {
        // blocking on the worker is only possible outside async contexts
        if self.config.multithreaded_saving && Handle::try_current().is_err() {
            Ok(self.persistence.read_blocking(key)?)
        } else {
            Ok(self.repository.load(&key)?)
        }
    }
}
