//! Save system settings and the sources they are re-read from.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

/// Encoding of a save container on disk.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ContainerFormat {
    /// Compact binary container, `.sav`
    #[default]
    Bincode,
    /// Human-readable container, `.json`
    Json,
}

impl ContainerFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Bincode => "sav",
            Self::Json => "json",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "sav" => Some(Self::Bincode),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Name and version of the host project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
}

impl ProjectInfo {
    pub const DEFAULT_VERSION: &'static str = "1.0";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Self::DEFAULT_VERSION.to_owned(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self::new("SaveGame")
    }
}

/// Settings that control how slots are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSystemConfig {
    /// `None` leaves the target type unset: saves and deletes skip the write.
    pub container_format: Option<ContainerFormat>,
    /// Container file used when `single_file_saving` is on.
    pub save_file_name: String,
    pub verbose_logging: bool,
    /// Run container reads and writes on the background worker.
    pub multithreaded_saving: bool,
    /// Dispatch lifecycle notifications on background threads.
    pub multithreaded_events: bool,
    /// Keep every slot in one container instead of one file per slot.
    pub single_file_saving: bool,
    /// Capture registered actors right before each save.
    pub automatic_actor_saving: bool,
    /// Overrides the platform save directory.
    pub save_dir: Option<PathBuf>,
    pub project: ProjectInfo,
}

impl Default for SaveSystemConfig {
    fn default() -> Self {
        Self::for_project(ProjectInfo::default())
    }
}

impl SaveSystemConfig {
    pub fn for_project(project: ProjectInfo) -> Self {
        Self {
            container_format: Some(ContainerFormat::default()),
            save_file_name: project.name.clone(),
            verbose_logging: true,
            multithreaded_saving: true,
            multithreaded_events: false,
            single_file_saving: true,
            automatic_actor_saving: false,
            save_dir: None,
            project,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SAVE_PROJECT_NAME` - Host project name (default: `SaveGame`)
    /// - `SAVE_PROJECT_VERSION` - Version stamped into saves (default: `1.0`)
    /// - `SAVE_CONTAINER_FORMAT` - `bincode`, `json` or `none` (default: bincode)
    /// - `SAVE_FILE_NAME` - Single-file container name (default: project name)
    /// - `SAVE_VERBOSE_LOGGING` - Log every store and load step (default: true)
    /// - `SAVE_MULTITHREADED` - Background container I/O (default: true)
    /// - `SAVE_MULTITHREADED_EVENTS` - Background notifications (default: false)
    /// - `SAVE_SINGLE_FILE` - One container for all slots (default: true)
    /// - `SAVE_AUTOMATIC_ACTORS` - Capture actors on save (default: false)
    /// - `SAVE_GAMES_DIR` - Save directory (default: platform-specific)
    pub fn from_env() -> Self {
        let mut project = ProjectInfo::default();
        if let Ok(name) = env::var("SAVE_PROJECT_NAME")
            && !name.trim().is_empty()
        {
            project.name = name;
        }
        if let Ok(version) = env::var("SAVE_PROJECT_VERSION") {
            project.version = version;
        }

        let mut config = Self::for_project(project);

        if let Ok(format) = env::var("SAVE_CONTAINER_FORMAT") {
            config.container_format = parse_format_setting(&format);
        }

        if let Ok(file) = env::var("SAVE_FILE_NAME")
            && !file.trim().is_empty()
        {
            config.save_file_name = file;
        }

        if let Some(verbose) = read_env::<bool>("SAVE_VERBOSE_LOGGING") {
            config.verbose_logging = verbose;
        }
        if let Some(enabled) = read_env::<bool>("SAVE_MULTITHREADED") {
            config.multithreaded_saving = enabled;
        }
        if let Some(enabled) = read_env::<bool>("SAVE_MULTITHREADED_EVENTS") {
            config.multithreaded_events = enabled;
        }
        if let Some(enabled) = read_env::<bool>("SAVE_SINGLE_FILE") {
            config.single_file_saving = enabled;
        }
        if let Some(enabled) = read_env::<bool>("SAVE_AUTOMATIC_ACTORS") {
            config.automatic_actor_saving = enabled;
        }

        config.save_dir = env::var("SAVE_GAMES_DIR").ok().map(PathBuf::from);

        config
    }

    /// Directory containers are written to.
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir
            .clone()
            .unwrap_or_else(|| default_save_dir(&self.project.name))
    }

    /// Container file holding `slot`.
    pub fn container_file<'a>(&'a self, slot: &'a str) -> &'a str {
        if self.single_file_saving {
            &self.save_file_name
        } else {
            slot
        }
    }

    /// Describe every toggle that differs between `self` and `next`.
    pub fn changes(&self, next: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        let mut flag = |label: &str, old: bool, new: bool| {
            if old != new {
                let state = if new { "enabled" } else { "disabled" };
                changes.push(format!("{label} {state}"));
            }
        };
        flag("verbose logging", self.verbose_logging, next.verbose_logging);
        flag(
            "multithreaded saving",
            self.multithreaded_saving,
            next.multithreaded_saving,
        );
        flag(
            "multithreaded events",
            self.multithreaded_events,
            next.multithreaded_events,
        );
        flag(
            "single file saving",
            self.single_file_saving,
            next.single_file_saving,
        );
        flag(
            "automatic actor saving",
            self.automatic_actor_saving,
            next.automatic_actor_saving,
        );

        if self.container_format != next.container_format {
            let format = next
                .container_format
                .map_or_else(|| "unset".to_owned(), |f| f.to_string());
            changes.push(format!("container format set to {format}"));
        }
        if self.save_file_name != next.save_file_name {
            changes.push(format!("save file name set to {}", next.save_file_name));
        }
        if self.project.version != next.project.version {
            changes.push(format!("project version set to {}", next.project.version));
        }
        changes
    }
}

/// Platform save directory: `<data dir>/<project>/SaveGames`.
pub fn default_save_dir(project: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", project)
        .map(|dirs| dirs.data_dir().join("SaveGames"))
        .unwrap_or_else(|| PathBuf::from("./SaveGames"))
}

/// Where the manager re-reads its settings from before new-game, save and load.
pub trait SettingsSource: Send + Sync {
    fn load(&self) -> SaveSystemConfig;
}

/// In-process settings that callers can change at runtime.
#[derive(Clone, Debug, Default)]
pub struct StaticSettings {
    inner: Arc<RwLock<SaveSystemConfig>>,
}

impl StaticSettings {
    pub fn new(config: SaveSystemConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Apply `f` to the shared settings; the manager observes the change on
    /// its next lifecycle operation.
    pub fn update(&self, f: impl FnOnce(&mut SaveSystemConfig)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

impl SettingsSource for StaticSettings {
    fn load(&self) -> SaveSystemConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Settings re-read from the process environment on every load.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn load(&self) -> SaveSystemConfig {
        SaveSystemConfig::from_env()
    }
}

/// Log each difference between two settings snapshots.
pub(crate) fn log_changes(old: &SaveSystemConfig, new: &SaveSystemConfig) {
    for change in old.changes(new) {
        info!("Save settings changed: {}", change);
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring invalid {} value '{}'", key, value);
            None
        }
    }
}

/// `none` clears the format; anything unrecognised also leaves it unset.
fn parse_format_setting(value: &str) -> Option<ContainerFormat> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return None;
    }
    match ContainerFormat::from_str(value) {
        Ok(format) => Some(format),
        Err(_) => {
            warn!(
                "Invalid SAVE_CONTAINER_FORMAT value '{}', container format is unset",
                value
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SaveSystemConfig::default();

        assert_eq!(config.container_format, Some(ContainerFormat::Bincode));
        assert_eq!(config.save_file_name, "SaveGame");
        assert_eq!(config.project.version, "1.0");
        assert!(config.verbose_logging);
        assert!(config.multithreaded_saving);
        assert!(!config.multithreaded_events);
        assert!(config.single_file_saving);
        assert!(!config.automatic_actor_saving);
    }

    #[test]
    fn test_container_file_follows_single_file_mode() {
        let mut config = SaveSystemConfig::default();
        assert_eq!(config.container_file("Slot1"), "SaveGame");

        config.single_file_saving = false;
        assert_eq!(config.container_file("Slot1"), "Slot1");
    }

    #[test]
    fn test_changes_lists_toggles() {
        let old = SaveSystemConfig::default();
        let mut new = old.clone();
        new.multithreaded_saving = false;
        new.container_format = None;

        assert_eq!(
            old.changes(&new),
            vec![
                "multithreaded saving disabled".to_owned(),
                "container format set to unset".to_owned(),
            ]
        );
        assert!(old.changes(&old).is_empty());
    }

    #[test]
    fn test_static_settings_update_is_observed() {
        let settings = StaticSettings::new(SaveSystemConfig::default());
        let observer = settings.clone();

        settings.update(|c| c.verbose_logging = false);

        assert!(!observer.load().verbose_logging);
    }

    #[test]
    fn test_format_parsing_and_extensions() {
        assert_eq!(
            ContainerFormat::from_str("JSON").ok(),
            Some(ContainerFormat::Json)
        );
        assert_eq!(ContainerFormat::Bincode.extension(), "sav");
        assert_eq!(
            ContainerFormat::from_extension("json"),
            Some(ContainerFormat::Json)
        );
        assert_eq!(ContainerFormat::from_extension("tmp"), None);
    }

    #[test]
    fn test_format_setting_values() {
        assert_eq!(parse_format_setting(" json "), Some(ContainerFormat::Json));
        assert_eq!(parse_format_setting("Bincode"), Some(ContainerFormat::Bincode));
        assert_eq!(parse_format_setting("NONE"), None);
        assert_eq!(parse_format_setting("yaml"), None);
    }
}
