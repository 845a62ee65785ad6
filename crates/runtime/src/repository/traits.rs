//! Repository contract for saving and loading save containers.

use save_core::SlotDirectory;

use crate::config::ContainerFormat;
use crate::repository::{RepositoryError, Result};

/// Identifies one container in storage.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerKey {
    pub file: String,
    pub user_index: u32,
    pub format: ContainerFormat,
}

impl ContainerKey {
    pub fn new(file: impl Into<String>, user_index: u32, format: ContainerFormat) -> Self {
        Self {
            file: file.into(),
            user_index,
            format,
        }
    }

    /// `<file>.<ext>` for the first user, `<file>_<user>.<ext>` otherwise.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem(), self.format.extension())
    }

    fn stem(&self) -> String {
        if self.user_index == 0 {
            self.file.clone()
        } else {
            format!("{}_{}", self.file, self.user_index)
        }
    }

    /// The container name this key's file would have if it belonged to
    /// `user_index`, or `None` when the file name rules that out.
    ///
    /// A stem ending in `_<digits>` can be read either way, so listed keys
    /// are resolved against the user being asked about.
    pub fn file_for_user(&self, user_index: u32) -> Option<String> {
        let stem = self.stem();
        if user_index == 0 {
            return Some(stem);
        }
        stem.strip_suffix(&format!("_{user_index}"))
            .filter(|file| !file.is_empty())
            .map(str::to_owned)
    }

    /// Rejects names that would escape the save directory.
    pub fn validate(&self) -> Result<()> {
        let file = self.file.as_str();
        let invalid = file.trim().is_empty()
            || file.contains(['/', '\\', '\0'])
            || file.contains("..");
        if invalid {
            return Err(RepositoryError::InvalidFileName(self.file.clone()));
        }
        Ok(())
    }
}

/// Repository for whole-container persistence.
///
/// Writes replace the previous container atomically from the reader's point
/// of view; there are no partial updates.
pub trait ContainerRepository: Send + Sync {
    /// Write `directory` as the container identified by `key`.
    fn save(&self, key: &ContainerKey, directory: &SlotDirectory) -> Result<()>;

    /// Read a container, `None` when it does not exist.
    fn load(&self, key: &ContainerKey) -> Result<Option<SlotDirectory>>;

    fn exists(&self, key: &ContainerKey) -> bool;

    /// Remove a container. Missing containers are not an error.
    fn delete(&self, key: &ContainerKey) -> Result<()>;

    /// Every container currently in storage.
    fn list(&self) -> Result<Vec<ContainerKey>>;

    /// Whether storage holds at least one container.
    fn has_any(&self) -> Result<bool> {
        Ok(!self.list()?.is_empty())
    }
}
