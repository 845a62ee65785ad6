//! Show one slot's metadata and a count of what it stores.

use anyhow::Result;
use clap::Parser;
use console::style;
use save_runtime::CURRENT_LEVEL_KEY;
use save_runtime::save_core::ValueKind;
use strum::IntoEnumIterator;

use crate::target::Target;

/// Show the metadata of one slot
#[derive(Parser, Debug)]
pub struct Info {
    /// Slot name
    #[arg(value_name = "SLOT")]
    pub slot: String,
}

impl Info {
    pub fn execute(self, target: &Target) -> Result<()> {
        let manager = target.open(&self.slot)?;
        let info = manager.current_slot_info();
        let data = manager.current_data();

        println!("{} {}", style("Slot:").bold().cyan(), self.slot);
        println!(
            "{} {} {}",
            style("Created:").bold().cyan(),
            info.date_created,
            info.time_created
        );
        println!(
            "{} {} ({}s)",
            style("Played:").bold().cyan(),
            info.time_played.trim_end_matches(", "),
            data.seconds_played
        );
        println!(
            "{} {}",
            style("Project version:").bold().cyan(),
            data.project_version
        );
        if data.contains::<String>(CURRENT_LEVEL_KEY) {
            println!(
                "{} {}",
                style("Level:").bold().cyan(),
                manager.stored_level()
            );
        }
        println!();

        println!("{}", style("Stored values:").bold().yellow());
        for kind in ValueKind::iter() {
            let count = data.names_of(kind).len();
            if count > 0 {
                println!("  {:<10} {}", kind.as_ref(), count);
            }
        }
        println!("  {:<10} {}", "total", data.len());
        Ok(())
    }
}
