//! The set of all slots held by one save container.

use std::collections::BTreeMap;

use crate::error::DirectoryError;
use crate::slot::SlotInfo;
use crate::store::ValueStore;

/// Slot metadata and slot data keyed by slot name.
///
/// Both maps always hold exactly the same set of names; every mutating
/// method updates them together, and decoding a container whose maps
/// disagree fails with [`DirectoryError::MismatchedKeys`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDirectory")
)]
pub struct SlotDirectory {
    slots: BTreeMap<String, SlotInfo>,
    data: BTreeMap<String, ValueStore>,
}

impl SlotDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Slot names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.slots.keys().cloned().collect()
    }

    pub fn info(&self, name: &str) -> Option<&SlotInfo> {
        self.slots.get(name)
    }

    pub fn info_mut(&mut self, name: &str) -> Option<&mut SlotInfo> {
        self.slots.get_mut(name)
    }

    pub fn data(&self, name: &str) -> Option<&ValueStore> {
        self.data.get(name)
    }

    pub fn data_mut(&mut self, name: &str) -> Option<&mut ValueStore> {
        self.data.get_mut(name)
    }

    /// Metadata and data of one slot.
    pub fn get(&self, name: &str) -> Option<(&SlotInfo, &ValueStore)> {
        self.slots.get(name).zip(self.data.get(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotInfo, &ValueStore)> {
        self.slots.iter().filter_map(|(name, info)| {
            self.data
                .get(name)
                .map(|data| (name.as_str(), info, data))
        })
    }

    /// Insert or replace both the metadata and the data of `name`.
    pub fn insert(&mut self, name: impl Into<String>, info: SlotInfo, data: ValueStore) {
        let name = name.into();
        self.slots.insert(name.clone(), info);
        self.data.insert(name, data);
    }

    /// Commit a slot on save.
    ///
    /// New names take both `info` and `data`; existing names keep their
    /// stored metadata and only have their data replaced. Returns `true`
    /// when the slot was newly inserted.
    pub fn commit(&mut self, name: &str, info: &SlotInfo, data: ValueStore) -> bool {
        let inserted = !self.slots.contains_key(name);
        if inserted {
            self.slots.insert(name.to_owned(), info.clone());
        }
        self.data.insert(name.to_owned(), data);
        inserted
    }

    pub fn remove(&mut self, name: &str) -> Option<(SlotInfo, ValueStore)> {
        let info = self.slots.remove(name)?;
        let data = self.data.remove(name).unwrap_or_default();
        Some((info, data))
    }

    /// Move slot `old` to `new`, keeping its metadata and data.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), DirectoryError> {
        if !self.slots.contains_key(old) {
            return Err(DirectoryError::SlotNotFound(old.to_owned()));
        }
        if old == new {
            return Ok(());
        }
        if self.slots.contains_key(new) {
            return Err(DirectoryError::SlotExists(new.to_owned()));
        }

        if let Some((info, data)) = self.remove(old) {
            self.insert(new, info, data);
        }
        Ok(())
    }

    /// Add slots from `other` whose names are not present here.
    ///
    /// Existing entries win. Returns the number of slots added.
    pub fn merge_missing(&mut self, other: SlotDirectory) -> usize {
        let SlotDirectory { slots, mut data } = other;
        let mut added = 0;
        for (name, info) in slots {
            if self.slots.contains_key(&name) {
                continue;
            }
            let store = data.remove(&name).unwrap_or_default();
            self.insert(name, info, store);
            added += 1;
        }
        added
    }
}

/// Wire shape of [`SlotDirectory`], validated on decode.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDirectory {
    slots: BTreeMap<String, SlotInfo>,
    data: BTreeMap<String, ValueStore>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDirectory> for SlotDirectory {
    type Error = DirectoryError;

    fn try_from(raw: RawDirectory) -> Result<Self, Self::Error> {
        let mismatched: Vec<String> = raw
            .slots
            .keys()
            .filter(|name| !raw.data.contains_key(*name))
            .chain(raw.data.keys().filter(|name| !raw.slots.contains_key(*name)))
            .cloned()
            .collect();

        if !mismatched.is_empty() {
            return Err(DirectoryError::MismatchedKeys(mismatched));
        }

        let mut data = raw.data;
        for store in data.values_mut() {
            store.reconcile_actor_names();
        }

        Ok(Self {
            slots: raw.slots,
            data,
        })
    }
}
