//! Slot-directory queries for save/load menus.

use std::sync::atomic::Ordering;

use save_core::{SlotInfo, format_time_played};
use tracing::{error, warn};

use super::SlotManager;

impl SlotManager {
    /// Names of every known slot, reading stored containers first.
    pub fn save_slot_names(&mut self, user_index: u32) -> Vec<String> {
        self.ensure_containers_loaded(user_index);
        self.directory.names()
    }

    pub fn does_save_slot_exist(&self, name: &str) -> bool {
        self.directory.contains(name)
    }

    /// Whether any slot exists.
    ///
    /// In single-file mode this counts the active slot and every slot in the
    /// container, including slots not written yet. Otherwise it asks storage
    /// whether any container file is present.
    pub fn do_save_slots_exist(&mut self, user_index: u32) -> bool {
        if self.config.single_file_saving {
            return !self.current_name.is_empty() || !self.save_slot_names(user_index).is_empty();
        }
        match self.repository.has_any() {
            Ok(any) => any,
            Err(e) => {
                error!("Unable to inspect save directory: {}", e);
                false
            }
        }
    }

    /// Name of the active slot, empty when none is selected.
    pub fn current_slot_name(&self) -> &str {
        &self.current_name
    }

    /// Metadata of the active slot with an up-to-date play time string.
    pub fn current_slot_info(&self) -> SlotInfo {
        let mut info = self.current_info.clone();
        info.time_played = format_time_played(self.seconds_played());
        info
    }

    pub fn actor_names(&self) -> &[String] {
        self.current_data.actor_names()
    }

    pub fn date_created(&self) -> &str {
        &self.current_info.date_created
    }

    /// Seconds played in the active slot, including the running session.
    pub fn seconds_played(&self) -> u64 {
        self.playtime.load(Ordering::Relaxed)
    }

    /// Format the play time of slot `name` and cache it in its metadata.
    pub fn time_played(&mut self, name: &str) -> Option<String> {
        let seconds = if name == self.current_name {
            self.seconds_played()
        } else {
            self.directory.data(name)?.seconds_played
        };
        let formatted = format_time_played(seconds);

        let Some(info) = self.directory.info_mut(name) else {
            warn!("Unable to get time played: slot {} doesn't exist", name);
            return None;
        };
        info.time_played = formatted.clone();
        if name == self.current_name {
            self.current_info.time_played = formatted.clone();
        }
        Some(formatted)
    }

    /// Metadata of slot `name` with a refreshed play time string.
    pub fn save_slot_info(&mut self, name: &str) -> Option<SlotInfo> {
        if !self.directory.contains(name) {
            warn!("Unable to get slot info: slot {} doesn't exist", name);
            return None;
        }
        self.time_played(name);
        self.directory.info(name).cloned()
    }

    pub fn save_slot_project_version(&self, name: &str) -> Option<String> {
        let version = self
            .directory
            .data(name)
            .map(|data| data.project_version.clone());
        if version.is_none() {
            warn!("Unable to get project version: slot {} doesn't exist", name);
        }
        version
    }

    /// Merge every stored container for `user_index` that this session has
    /// not read yet.
    fn ensure_containers_loaded(&mut self, user_index: u32) {
        if self.config.single_file_saving {
            let file = self.config.save_file_name.clone();
            self.ensure_loaded(&file, user_index);
            return;
        }

        let keys = match self.repository.list() {
            Ok(keys) => keys,
            Err(e) => {
                error!("Unable to list save containers: {}", e);
                return;
            }
        };
        for key in keys {
            let matches_format = self
                .config
                .container_format
                .is_none_or(|format| format == key.format);
            if matches_format && let Some(file) = key.file_for_user(user_index) {
                self.load_data(&file, user_index);
            }
        }
    }
}
