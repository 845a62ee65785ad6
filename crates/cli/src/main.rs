//! Save slot inspector.
//!
//! Reads and edits the containers written by `save-runtime` using the same
//! `SAVE_*` environment settings as the game.
//! Run with: `savectl [--dir DIR] <command>`

mod commands;
mod target;

use anyhow::Result;
use clap::Parser;
use commands::{Delete, Dump, Info, List, New, Rename, Set};
use target::Target;

/// Inspect and edit save slots
#[derive(Parser)]
#[command(name = "savectl")]
#[command(about = "Inspect and edit save slots", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    target: Target,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List every slot with its creation stamp
    List(List),

    /// Show the metadata of one slot
    Info(Info),

    /// Print every value stored in a slot
    Dump(Dump),

    /// Create an empty slot and write it
    New(New),

    /// Delete a slot
    Delete(Delete),

    /// Rename a slot
    Rename(Rename),

    /// Store a single value in a slot
    Set(Set),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAVE_GAMES_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let target = cli.target;

    match cli.command {
        Command::List(cmd) => cmd.execute(&target),
        Command::Info(cmd) => cmd.execute(&target),
        Command::Dump(cmd) => cmd.execute(&target),
        Command::New(cmd) => cmd.execute(&target),
        Command::Delete(cmd) => cmd.execute(&target),
        Command::Rename(cmd) => cmd.execute(&target),
        Command::Set(cmd) => cmd.execute(&target),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["savectl", "set", "Slot1", "integer", "Gold", "-5", "--user", "2"]);

        assert_eq!(cli.target.user, 2);
        let Command::Set(set) = cli.command else {
            panic!("expected set");
        };
        assert_eq!(set.value, "-5");
    }
}
