//! Edit a single value in a stored slot.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use save_runtime::save_core::{ClassRef, Name, Rotator, Text, ValueKind, Vector3};

use crate::target::Target;

/// Store a single value in a slot
#[derive(Parser, Debug)]
pub struct Set {
    /// Slot name
    #[arg(value_name = "SLOT")]
    pub slot: String,

    /// Value kind (integer, float, boolean, string, text, name, class, vector, rotator)
    #[arg(value_name = "KIND")]
    pub kind: ValueKind,

    /// Value name inside the slot
    #[arg(value_name = "NAME")]
    pub name: String,

    /// New value; vectors and rotators take `x,y,z`
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

impl Set {
    pub fn execute(self, target: &Target) -> Result<()> {
        let mut manager = target.open(&self.slot)?;

        let stored = match self.kind {
            ValueKind::Integer => manager.store(&self.name, parse::<i32>(&self.value)?),
            ValueKind::Float => manager.store(&self.name, parse::<f32>(&self.value)?),
            ValueKind::Boolean => manager.store(&self.name, parse::<bool>(&self.value)?),
            ValueKind::String => manager.store(&self.name, self.value.clone()),
            ValueKind::Text => manager.store(&self.name, Text::from(self.value.as_str())),
            ValueKind::Name => manager.store(&self.name, Name::from(self.value.as_str())),
            ValueKind::Class => manager.store(&self.name, ClassRef::new(self.value.as_str())),
            ValueKind::Vector => {
                let [x, y, z] = parse_triple(&self.value)?;
                manager.store(&self.name, Vector3::new(x, y, z))
            }
            ValueKind::Rotator => {
                let [pitch, yaw, roll] = parse_triple(&self.value)?;
                manager.store(&self.name, Rotator { pitch, yaw, roll })
            }
            ValueKind::Transform | ValueKind::Object | ValueKind::Actor => {
                anyhow::bail!("{} values can only be written by the game", self.kind)
            }
        };
        if !stored {
            anyhow::bail!("Unable to store {} {}", self.kind, self.name);
        }
        if !manager.save_game(&self.slot, target.user) {
            anyhow::bail!("Unable to write slot {}", self.slot);
        }

        println!(
            "{} {}.{} = {}",
            style("✓").green().bold(),
            style(&self.slot).cyan(),
            self.name,
            self.value
        );
        Ok(())
    }
}

fn parse<T>(raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value: {raw}"))
}

fn parse_triple(raw: &str) -> Result<[f32; 3]> {
    let parts = raw
        .split(',')
        .map(parse::<f32>)
        .collect::<Result<Vec<_>>>()?;
    <[f32; 3]>::try_from(parts)
        .map_err(|_| anyhow::anyhow!("Expected three comma-separated numbers, got {raw}"))
}
