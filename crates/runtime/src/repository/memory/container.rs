//! In-memory ContainerRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use save_core::SlotDirectory;

use crate::repository::{ContainerKey, ContainerRepository, RepositoryError, Result};

/// Keeps encoded containers in memory.
///
/// Containers are stored encoded so a load goes through the same codec
/// path as the file repository.
#[derive(Default)]
pub struct InMemoryContainerRepository {
    containers: RwLock<BTreeMap<String, (ContainerKey, Vec<u8>)>>,
}

impl InMemoryContainerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContainerRepository for InMemoryContainerRepository {
    fn save(&self, key: &ContainerKey, directory: &SlotDirectory) -> Result<()> {
        key.validate()?;
        let bytes = key.format.encode(directory)?;
        let mut containers = self
            .containers
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        containers.insert(key.file_name(), (key.clone(), bytes));
        Ok(())
    }

    fn load(&self, key: &ContainerKey) -> Result<Option<SlotDirectory>> {
        key.validate()?;
        let containers = self
            .containers
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        containers
            .get(&key.file_name())
            .map(|(_, bytes)| key.format.decode(bytes))
            .transpose()
    }

    fn exists(&self, key: &ContainerKey) -> bool {
        self.containers
            .read()
            .map(|containers| containers.contains_key(&key.file_name()))
            .unwrap_or(false)
    }

    fn delete(&self, key: &ContainerKey) -> Result<()> {
        let mut containers = self
            .containers
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        containers.remove(&key.file_name());
        Ok(())
    }

    fn list(&self) -> Result<Vec<ContainerKey>> {
        let containers = self
            .containers
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(containers.values().map(|(key, _)| key.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContainerFormat;
    use save_core::{SlotInfo, ValueStore};

    #[test]
    fn test_save_load_delete() {
        let repo = InMemoryContainerRepository::new();
        let key = ContainerKey::new("Game", 0, ContainerFormat::Bincode);
        let mut directory = SlotDirectory::new();
        directory.insert("A", SlotInfo::default(), ValueStore::new());

        assert!(repo.load(&key).unwrap().is_none());
        repo.save(&key, &directory).unwrap();
        assert!(repo.exists(&key));
        assert_eq!(repo.load(&key).unwrap(), Some(directory));
        assert!(repo.has_any().unwrap());

        repo.delete(&key).unwrap();
        assert!(!repo.exists(&key));
        assert!(repo.list().unwrap().is_empty());
    }
}
