//! Value categories held by a [`crate::ValueStore`].
//!
//! Scalar kinds map onto plain Rust types; the remaining kinds are thin
//! newtypes so that two categories with the same payload (for example
//! strings and localized text) land in separate tables.

use core::fmt;

use crate::math::Transform;

/// Category of a stored value.
///
/// The same name may exist once per category; erasing a name removes it
/// from every category.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
    String,
    Text,
    Name,
    Class,
    Vector,
    Rotator,
    Transform,
    Object,
    Actor,
}

/// Localized, player-facing text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text(pub String);

/// Symbolic identifier (level names, tags).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Name(pub String);

/// Reference to a spawnable class by path.
///
/// An empty path is the null reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassRef(pub String);

impl ClassRef {
    pub const NULL: Self = Self(String::new());

    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

macro_rules! string_newtype_impls {
    ($($ty:ident),*) => {$(
        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    )*};
}

string_newtype_impls!(Text, Name, ClassRef);

/// How a respawned actor resolves collisions at its stored transform.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpawnCollisionMethod {
    /// Fall back to the class default.
    #[default]
    Undefined,
    AlwaysSpawn,
    AdjustIfPossibleButAlwaysSpawn,
    AdjustIfPossibleButDontSpawnIfColliding,
    DontSpawnIfColliding,
}

/// Everything needed to respawn an actor on load.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub class: ClassRef,
    pub transform: Transform,
    pub collision: SpawnCollisionMethod,
    pub simulating_physics: bool,
}

/// A non-spatial object recorded by class only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSnapshot {
    pub class: ClassRef,
}

impl ObjectSnapshot {
    pub fn new(class: ClassRef) -> Self {
        Self { class }
    }
}
