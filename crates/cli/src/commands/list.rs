//! List the slots stored for a user.

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::target::Target;

/// List every slot with its creation stamp
#[derive(Parser, Debug)]
pub struct List {
    /// Also show the project version each slot was written with
    #[arg(long)]
    pub versions: bool,
}

impl List {
    pub fn execute(self, target: &Target) -> Result<()> {
        let config = target.config();
        let mut manager = target.manager()?;
        let names = manager.save_slot_names(target.user);

        println!(
            "{} {}",
            style("Save directory:").bold().cyan(),
            config.resolved_save_dir().display()
        );
        if names.is_empty() {
            println!("{}", style("No save slots found").dim());
            return Ok(());
        }
        println!();

        for name in &names {
            let info = manager.save_slot_info(name).unwrap_or_default();
            print!(
                "  {:<24} {} {:<8} {}",
                style(name).bold(),
                info.date_created,
                info.time_created,
                style(info.time_played.trim_end_matches(", ")).dim()
            );
            if self.versions
                && let Some(version) = manager.save_slot_project_version(name)
            {
                print!(" {}", style(format!("v{version}")).yellow());
            }
            println!();
        }

        println!();
        println!("{} slot(s)", names.len());
        Ok(())
    }
}
