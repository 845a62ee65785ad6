//! File-based ContainerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use save_core::SlotDirectory;

use crate::config::ContainerFormat;
use crate::repository::{ContainerKey, ContainerRepository, RepositoryError, Result};

/// Stores each container as one file under a base directory.
///
/// # File Format
///
/// Containers are stored as `{file}.{ext}` (or `{file}_{user}.{ext}` for
/// secondary users), where the extension follows the container format:
/// `.sav` for bincode, `.json` for JSON. Writes go to a temporary sibling
/// first and are renamed into place.
pub struct FileContainerRepository {
    base_dir: PathBuf,
}

impl FileContainerRepository {
    /// Create a repository rooted at `base_dir`.
    ///
    /// The directory is created on first write, so probing for saves never
    /// leaves an empty directory behind.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn container_path(&self, key: &ContainerKey) -> Result<PathBuf> {
        key.validate()?;
        Ok(self.base_dir.join(key.file_name()))
    }
}

impl ContainerRepository for FileContainerRepository {
    fn save(&self, key: &ContainerKey, directory: &SlotDirectory) -> Result<()> {
        let path = self.container_path(key)?;
        let temp_path = path.with_extension(format!("{}.tmp", key.format.extension()));

        let bytes = key.format.encode(directory)?;

        fs::create_dir_all(&self.base_dir).map_err(RepositoryError::Io)?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved container with {} slot(s) to {}",
            directory.len(),
            path.display()
        );

        Ok(())
    }

    fn load(&self, key: &ContainerKey) -> Result<Option<SlotDirectory>> {
        let path = self.container_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let directory = key.format.decode(&bytes)?;

        tracing::debug!(
            "Loaded container with {} slot(s) from {}",
            directory.len(),
            path.display()
        );

        Ok(Some(directory))
    }

    fn exists(&self, key: &ContainerKey) -> bool {
        self.container_path(key).is_ok_and(|path| path.exists())
    }

    fn delete(&self, key: &ContainerKey) -> Result<()> {
        let path = self.container_path(key)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted container {}", path.display());
        }

        Ok(())
    }

    fn list(&self) -> Result<Vec<ContainerKey>> {
        let mut keys = Vec::new();

        if !self.base_dir.exists() {
            return Ok(keys);
        }

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && let Some(format) = path
                    .extension()
                    .and_then(|s| s.to_str())
                    .and_then(ContainerFormat::from_extension)
            {
                keys.push(parse_stem(stem, format));
            }
        }

        keys.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(keys)
    }
}

/// Split a trailing `_<user>` suffix off a container file stem.
fn parse_stem(stem: &str, format: ContainerFormat) -> ContainerKey {
    if let Some((file, user)) = stem.rsplit_once('_')
        && !file.is_empty()
        && let Ok(user_index) = user.parse::<u32>()
        && user_index != 0
    {
        return ContainerKey::new(file, user_index, format);
    }
    ContainerKey::new(stem, 0, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use save_core::{SlotInfo, ValueStore};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileContainerRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileContainerRepository::new(temp_dir.path().join("SaveGames"));
        (temp_dir, repo)
    }

    fn sample_directory() -> SlotDirectory {
        let mut data = ValueStore::new();
        data.insert("gold", 120_i32).unwrap();
        data.project_version = "1.0".into();

        let mut directory = SlotDirectory::new();
        directory.insert(
            "Slot1",
            SlotInfo {
                date_created: "01-02-2025".into(),
                time_created: "3:04PM".into(),
                time_played: String::new(),
            },
            data,
        );
        directory
    }

    #[test]
    fn test_save_and_load() {
        let (_temp, repo) = setup();
        let key = ContainerKey::new("Game", 0, ContainerFormat::Bincode);

        repo.save(&key, &sample_directory()).unwrap();

        assert!(repo.exists(&key));
        assert!(repo.base_dir().join("Game.sav").exists());
        let loaded = repo.load(&key).unwrap().unwrap();
        assert_eq!(loaded, sample_directory());
    }

    #[test]
    fn test_json_container_is_readable() {
        let (_temp, repo) = setup();
        let key = ContainerKey::new("Game", 1, ContainerFormat::Json);

        repo.save(&key, &sample_directory()).unwrap();

        let text = fs::read_to_string(repo.base_dir().join("Game_1.json")).unwrap();
        assert!(text.contains("\"Slot1\""));
        assert_eq!(repo.load(&key).unwrap().unwrap(), sample_directory());
    }

    #[test]
    fn test_load_missing_returns_none() {
        let (_temp, repo) = setup();
        let key = ContainerKey::new("Game", 0, ContainerFormat::Bincode);

        assert!(repo.load(&key).unwrap().is_none());
        assert!(!repo.exists(&key));
        assert!(!repo.has_any().unwrap());
    }

    #[test]
    fn test_delete_and_list() {
        let (_temp, repo) = setup();
        let first = ContainerKey::new("Slot1", 0, ContainerFormat::Bincode);
        let second = ContainerKey::new("Slot_2", 3, ContainerFormat::Json);

        repo.save(&first, &sample_directory()).unwrap();
        repo.save(&second, &sample_directory()).unwrap();

        assert_eq!(repo.list().unwrap(), vec![first.clone(), second.clone()]);
        assert!(repo.has_any().unwrap());

        repo.delete(&first).unwrap();
        repo.delete(&first).unwrap();
        assert_eq!(repo.list().unwrap(), vec![second]);
    }

    #[test]
    fn test_rejects_escaping_file_names() {
        let (_temp, repo) = setup();
        let key = ContainerKey::new("../outside", 0, ContainerFormat::Bincode);

        let err = repo.save(&key, &sample_directory()).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidFileName(_)));
        assert!(!repo.exists(&key));
    }

    #[test]
    fn test_corrupted_container_is_an_error() {
        let (_temp, repo) = setup();
        let key = ContainerKey::new("Game", 0, ContainerFormat::Json);
        fs::create_dir_all(repo.base_dir()).unwrap();
        fs::write(repo.base_dir().join("Game.json"), b"{\"slots\":{\"A\":").unwrap();

        assert!(matches!(
            repo.load(&key).unwrap_err(),
            RepositoryError::Json(_)
        ));
    }
}
