//! Which save directory and container the command works on.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use save_runtime::{ContainerFormat, SaveSystemConfig, SlotManager};

#[derive(Args, Debug)]
pub struct Target {
    /// Save directory (defaults to SAVE_GAMES_DIR or the platform data directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Container format (bincode, json)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub container: Option<ContainerFormat>,

    /// Shared container name used by single-file saving
    #[arg(long, global = true, value_name = "NAME")]
    pub file: Option<String>,

    /// Slots live in one file each instead of a shared container
    #[arg(long, global = true)]
    pub per_slot: bool,

    /// User index the containers belong to
    #[arg(short, long, global = true, default_value_t = 0)]
    pub user: u32,
}

impl Target {
    /// Environment settings with command-line overrides applied.
    pub fn config(&self) -> SaveSystemConfig {
        let mut config = SaveSystemConfig::from_env();
        if let Some(dir) = &self.dir {
            config.save_dir = Some(dir.clone());
        }
        if let Some(format) = self.container {
            config.container_format = Some(format);
        }
        if let Some(file) = &self.file {
            config.save_file_name = file.clone();
        }
        if self.per_slot {
            config.single_file_saving = false;
        }
        // One-shot process: write synchronously so nothing is pending at exit.
        config.multithreaded_saving = false;
        config.multithreaded_events = false;
        config
    }

    pub fn manager(&self) -> Result<SlotManager> {
        SlotManager::builder()
            .config(self.config())
            .build()
            .context("Failed to start the save system")
    }

    /// Manager with `slot` loaded as the active slot.
    pub fn open(&self, slot: &str) -> Result<SlotManager> {
        let mut manager = self.manager()?;
        if !manager.load_game(slot, self.user) {
            anyhow::bail!(
                "Slot not found: {}\n\nHint: run `savectl list` to see available slots",
                slot
            );
        }
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn target(dir: &Path) -> Target {
        Target {
            dir: Some(dir.to_path_buf()),
            container: Some(ContainerFormat::Json),
            file: Some("Shared".into()),
            per_slot: false,
            user: 0,
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_env() {
        let temp = TempDir::new().unwrap();
        let config = target(temp.path()).config();

        assert_eq!(config.save_dir.as_deref(), Some(temp.path()));
        assert_eq!(config.container_format, Some(ContainerFormat::Json));
        assert_eq!(config.save_file_name, "Shared");
        assert!(!config.multithreaded_saving);
        assert!(!config.multithreaded_events);
    }

    #[test]
    fn test_open_existing_and_missing_slot() {
        let temp = TempDir::new().unwrap();
        let target = target(temp.path());

        let err = target.open("Missing").err().unwrap();
        assert!(err.to_string().contains("Slot not found"));

        {
            let mut manager = target.manager().unwrap();
            assert!(manager.new_game("Slot1", false));
            assert!(manager.save_game("Slot1", 0));
        }
        assert!(temp.path().join("Shared.json").exists());

        let manager = target.open("Slot1").unwrap();
        assert_eq!(manager.current_slot_name(), "Slot1");
    }
}
