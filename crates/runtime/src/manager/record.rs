//! Flattening serializable records into scalar slot entries.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::SlotManager;

impl SlotManager {
    /// Store every scalar leaf of `record` in the active slot.
    ///
    /// Field names are appended to `prefix` (`"Player"` + `"hp"` becomes
    /// `"Playerhp"`) and sequence elements append their index, so a
    /// `Vec<i32>` field can be read back with [`SlotManager::get_array`].
    /// Integers that fit `i32` are stored as integers, other numbers as
    /// floats; nulls are skipped. Returns the number of entries stored.
    pub fn store_record<T: Serialize + ?Sized>(&mut self, prefix: &str, record: &T) -> usize {
        let value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unable to store record {}: {}", prefix, e);
                return 0;
            }
        };

        let mut stored = 0;
        self.store_json(prefix.to_owned(), &value, &mut stored);
        stored
    }

    fn store_json(&mut self, name: String, value: &Value, stored: &mut usize) {
        let ok = match value {
            Value::Null => return,
            Value::Bool(flag) => self.store(&name, *flag),
            Value::Number(number) => match number.as_i64().and_then(|n| i32::try_from(n).ok()) {
                Some(int) => self.store(&name, int),
                None => self.store(&name, number.as_f64().unwrap_or_default() as f32),
            },
            Value::String(text) => self.store(&name, text.clone()),
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.store_json(format!("{name}{index}"), item, stored);
                }
                return;
            }
            Value::Object(fields) => {
                for (field, item) in fields {
                    self.store_json(format!("{name}{field}"), item, stored);
                }
                return;
            }
        };
        if ok {
            *stored += 1;
        }
    }
}
