//! Typed key-value store holding one slot's data.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::StoreError;
use crate::math::{Rotator, Transform, Vector3};
use crate::value::{ActorSnapshot, ClassRef, Name, ObjectSnapshot, Text, ValueKind};

/// A value type with its own table inside [`ValueStore`].
///
/// Each implementor selects the table it lives in and names the zero value
/// returned for missing entries.
pub trait StoredValue: Clone + Sized {
    const KIND: ValueKind;

    fn table(store: &ValueStore) -> &BTreeMap<String, Self>;

    fn table_mut(store: &mut ValueStore) -> &mut BTreeMap<String, Self>;

    fn zero() -> Self;

    /// Null values are rejected on insert.
    fn is_null(&self) -> bool {
        false
    }

    /// Called after `name` was inserted into this value's table.
    fn on_insert(_store: &mut ValueStore, _name: &str) {}
}

/// Name-keyed maps, one per [`ValueKind`], plus per-slot bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueStore {
    integers: BTreeMap<String, i32>,
    floats: BTreeMap<String, f32>,
    booleans: BTreeMap<String, bool>,
    strings: BTreeMap<String, String>,
    texts: BTreeMap<String, Text>,
    names: BTreeMap<String, Name>,
    classes: BTreeMap<String, ClassRef>,
    vectors: BTreeMap<String, Vector3>,
    rotators: BTreeMap<String, Rotator>,
    transforms: BTreeMap<String, Transform>,
    objects: BTreeMap<String, ObjectSnapshot>,
    actors: BTreeMap<String, ActorSnapshot>,
    /// Actor snapshot names in first-insertion order.
    actor_names: Vec<String>,
    pub seconds_played: u64,
    pub project_version: String,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name` in the table for `V`.
    pub fn insert<V: StoredValue>(
        &mut self,
        name: impl Into<String>,
        value: V,
    ) -> Result<(), StoreError> {
        let name = name.into();
        if value.is_null() {
            return Err(StoreError::NullValue {
                kind: V::KIND,
                name,
            });
        }

        V::table_mut(self).insert(name.clone(), value);
        V::on_insert(self, &name);
        Ok(())
    }

    pub fn get<V: StoredValue>(&self, name: &str) -> Option<&V> {
        V::table(self).get(name)
    }

    /// Returns the stored value or `V::zero()`.
    pub fn get_or_zero<V: StoredValue>(&self, name: &str) -> V {
        self.get(name).cloned().unwrap_or_else(V::zero)
    }

    pub fn contains<V: StoredValue>(&self, name: &str) -> bool {
        V::table(self).contains_key(name)
    }

    /// Reads `<base>0 .. <base>(len - 1)`; missing elements become zero values.
    pub fn get_array<V: StoredValue>(&self, base: &str, len: usize) -> Vec<V> {
        (0..len)
            .map(|i| self.get_or_zero(&format!("{base}{i}")))
            .collect()
    }

    /// Remove `name` from every category. Returns whether anything was removed.
    pub fn erase(&mut self, name: &str) -> bool {
        let mut removed = false;
        removed |= self.integers.remove(name).is_some();
        removed |= self.floats.remove(name).is_some();
        removed |= self.booleans.remove(name).is_some();
        removed |= self.strings.remove(name).is_some();
        removed |= self.texts.remove(name).is_some();
        removed |= self.names.remove(name).is_some();
        removed |= self.classes.remove(name).is_some();
        removed |= self.vectors.remove(name).is_some();
        removed |= self.rotators.remove(name).is_some();
        removed |= self.transforms.remove(name).is_some();
        removed |= self.objects.remove(name).is_some();
        if self.actors.remove(name).is_some() {
            self.actor_names.retain(|n| n != name);
            removed = true;
        }
        removed
    }

    /// Names of stored actor snapshots, in the order they were first stored.
    pub fn actor_names(&self) -> &[String] {
        &self.actor_names
    }

    /// Align the actor order with the actor table.
    ///
    /// Names without a snapshot and repeated names are dropped; snapshots
    /// missing from the order are appended by name. Returns how many names
    /// were dropped.
    pub fn reconcile_actor_names(&mut self) -> usize {
        let before = self.actor_names.len();
        let actors = &self.actors;
        let mut seen = BTreeSet::new();
        self.actor_names
            .retain(|name| actors.contains_key(name) && seen.insert(name.clone()));
        let dropped = before - self.actor_names.len();

        let unlisted: Vec<String> = actors
            .keys()
            .filter(|name| !seen.contains(*name))
            .cloned()
            .collect();
        self.actor_names.extend(unlisted);
        dropped
    }

    pub fn actors(&self) -> impl Iterator<Item = (&str, &ActorSnapshot)> {
        self.actor_names
            .iter()
            .filter_map(|name| self.actors.get(name).map(|a| (name.as_str(), a)))
    }

    pub fn objects(&self) -> impl Iterator<Item = (&str, &ObjectSnapshot)> {
        self.objects.iter().map(|(name, o)| (name.as_str(), o))
    }

    /// Names stored under `kind`, sorted.
    pub fn names_of(&self, kind: ValueKind) -> Vec<&str> {
        fn keys<V>(map: &BTreeMap<String, V>) -> Vec<&str> {
            map.keys().map(String::as_str).collect()
        }

        match kind {
            ValueKind::Integer => keys(&self.integers),
            ValueKind::Float => keys(&self.floats),
            ValueKind::Boolean => keys(&self.booleans),
            ValueKind::String => keys(&self.strings),
            ValueKind::Text => keys(&self.texts),
            ValueKind::Name => keys(&self.names),
            ValueKind::Class => keys(&self.classes),
            ValueKind::Vector => keys(&self.vectors),
            ValueKind::Rotator => keys(&self.rotators),
            ValueKind::Transform => keys(&self.transforms),
            ValueKind::Object => keys(&self.objects),
            ValueKind::Actor => keys(&self.actors),
        }
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.integers.len()
            + self.floats.len()
            + self.booleans.len()
            + self.strings.len()
            + self.texts.len()
            + self.names.len()
            + self.classes.len()
            + self.vectors.len()
            + self.rotators.len()
            + self.transforms.len()
            + self.objects.len()
            + self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! stored_value {
    ($ty:ty, $kind:ident, $field:ident, $zero:expr) => {
        impl StoredValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn table(store: &ValueStore) -> &BTreeMap<String, Self> {
                &store.$field
            }

            fn table_mut(store: &mut ValueStore) -> &mut BTreeMap<String, Self> {
                &mut store.$field
            }

            fn zero() -> Self {
                $zero
            }
        }
    };
}

stored_value!(i32, Integer, integers, 0);
stored_value!(f32, Float, floats, 0.0);
stored_value!(bool, Boolean, booleans, false);
stored_value!(String, String, strings, String::new());
stored_value!(Text, Text, texts, Text::default());
stored_value!(Name, Name, names, Name::default());
stored_value!(Vector3, Vector, vectors, Vector3::ZERO);
stored_value!(Rotator, Rotator, rotators, Rotator::ZERO);
stored_value!(Transform, Transform, transforms, Transform::IDENTITY);

impl StoredValue for ClassRef {
    const KIND: ValueKind = ValueKind::Class;

    fn table(store: &ValueStore) -> &BTreeMap<String, Self> {
        &store.classes
    }

    fn table_mut(store: &mut ValueStore) -> &mut BTreeMap<String, Self> {
        &mut store.classes
    }

    fn zero() -> Self {
        ClassRef::NULL
    }

    fn is_null(&self) -> bool {
        ClassRef::is_null(self)
    }
}

impl StoredValue for ObjectSnapshot {
    const KIND: ValueKind = ValueKind::Object;

    fn table(store: &ValueStore) -> &BTreeMap<String, Self> {
        &store.objects
    }

    fn table_mut(store: &mut ValueStore) -> &mut BTreeMap<String, Self> {
        &mut store.objects
    }

    fn zero() -> Self {
        ObjectSnapshot::default()
    }

    fn is_null(&self) -> bool {
        self.class.is_null()
    }
}

impl StoredValue for ActorSnapshot {
    const KIND: ValueKind = ValueKind::Actor;

    fn table(store: &ValueStore) -> &BTreeMap<String, Self> {
        &store.actors
    }

    fn table_mut(store: &mut ValueStore) -> &mut BTreeMap<String, Self> {
        &mut store.actors
    }

    fn zero() -> Self {
        ActorSnapshot::default()
    }

    fn is_null(&self) -> bool {
        self.class.is_null()
    }

    fn on_insert(store: &mut ValueStore, name: &str) {
        if !store.actor_names.iter().any(|n| n == name) {
            store.actor_names.push(name.to_owned());
        }
    }
}
