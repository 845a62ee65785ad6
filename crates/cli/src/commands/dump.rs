//! Print the values stored in one slot.

use std::fmt::Debug;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use save_runtime::save_core::{
    ActorSnapshot, ClassRef, Name, ObjectSnapshot, Rotator, StoredValue, Text, Transform,
    ValueKind, ValueStore, Vector3,
};
use strum::IntoEnumIterator;

use crate::target::Target;

/// Print every value stored in a slot
#[derive(Parser, Debug)]
pub struct Dump {
    /// Slot name
    #[arg(value_name = "SLOT")]
    pub slot: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Values grouped by kind
    Summary,
    /// Full JSON output
    Json,
}

impl Dump {
    pub fn execute(self, target: &Target) -> Result<()> {
        let manager = target.open(&self.slot)?;
        let data = manager.current_data();

        match self.format {
            OutputFormat::Summary => print_summary(&self.slot, data),
            OutputFormat::Json => print_json(data)?,
        }
        Ok(())
    }
}

fn print_summary(slot: &str, data: &ValueStore) {
    println!(
        "{}",
        style(format!("=== {slot} ({} values) ===", data.len()))
            .bold()
            .green()
    );

    for kind in ValueKind::iter() {
        let names = data.names_of(kind);
        if names.is_empty() {
            continue;
        }
        println!();
        println!("{}", style(format!("{kind}:")).bold().yellow());
        for name in names {
            println!("  {:<24} {}", name, describe(data, kind, name));
        }
    }
}

fn print_json(data: &ValueStore) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize slot to JSON")?;
    println!("{json}");
    Ok(())
}

fn describe(data: &ValueStore, kind: ValueKind, name: &str) -> String {
    match kind {
        ValueKind::Integer => show::<i32>(data, name),
        ValueKind::Float => show::<f32>(data, name),
        ValueKind::Boolean => show::<bool>(data, name),
        ValueKind::String => show::<String>(data, name),
        ValueKind::Text => show::<Text>(data, name),
        ValueKind::Name => show::<Name>(data, name),
        ValueKind::Class => show::<ClassRef>(data, name),
        ValueKind::Vector => show::<Vector3>(data, name),
        ValueKind::Rotator => show::<Rotator>(data, name),
        ValueKind::Transform => show::<Transform>(data, name),
        ValueKind::Object => show::<ObjectSnapshot>(data, name),
        ValueKind::Actor => show::<ActorSnapshot>(data, name),
    }
}

fn show<V: StoredValue + Debug>(data: &ValueStore, name: &str) -> String {
    data.get::<V>(name)
        .map(|value| format!("{value:?}"))
        .unwrap_or_default()
}
