//! Slot management commands.

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::target::Target;

/// Create an empty slot and write it
#[derive(Parser, Debug)]
pub struct New {
    /// Slot name
    #[arg(value_name = "SLOT")]
    pub slot: String,

    /// Replace the slot if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

impl New {
    pub fn execute(self, target: &Target) -> Result<()> {
        let mut manager = target.manager()?;
        // Read stored slots first so an existing one is detected.
        manager.save_slot_names(target.user);

        if !manager.new_game(&self.slot, self.overwrite) {
            anyhow::bail!(
                "Unable to create slot {}\n\nHint: pass --overwrite to replace an existing slot",
                self.slot
            );
        }
        if !manager.save_game(&self.slot, target.user) {
            anyhow::bail!("Unable to write slot {}", self.slot);
        }

        println!(
            "{} Created slot {}",
            style("✓").green().bold(),
            style(&self.slot).cyan()
        );
        Ok(())
    }
}

/// Delete a slot
#[derive(Parser, Debug)]
pub struct Delete {
    /// Slot name
    #[arg(value_name = "SLOT")]
    pub slot: String,
}

impl Delete {
    pub fn execute(self, target: &Target) -> Result<()> {
        let mut manager = target.manager()?;
        if !manager.save_slot_names(target.user).contains(&self.slot) {
            anyhow::bail!("Slot not found: {}", self.slot);
        }
        if !manager.delete_game(&self.slot, target.user) {
            anyhow::bail!("Unable to delete slot {}", self.slot);
        }

        println!(
            "{} Deleted slot {}",
            style("✓").green().bold(),
            style(&self.slot).cyan()
        );
        Ok(())
    }
}

/// Rename a slot
#[derive(Parser, Debug)]
pub struct Rename {
    /// Current slot name
    #[arg(value_name = "FROM")]
    pub from: String,

    /// New slot name
    #[arg(value_name = "TO")]
    pub to: String,
}

impl Rename {
    pub fn execute(self, target: &Target) -> Result<()> {
        let mut manager = target.open(&self.from)?;
        if !manager.rename_slot(&self.from, &self.to) {
            anyhow::bail!("Unable to rename {} to {}", self.from, self.to);
        }
        if !manager.save_game(&self.to, target.user) {
            anyhow::bail!("Unable to write slot {}", self.to);
        }

        println!(
            "{} Renamed {} to {}",
            style("✓").green().bold(),
            style(&self.from).cyan(),
            style(&self.to).cyan()
        );
        Ok(())
    }
}
