//! Spatial value types stored alongside scalar save data.

/// Three-component vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Euler rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

/// Affine transform: translation, rotation and per-axis scale.
///
/// The zero value of a transform is [`Transform::IDENTITY`], not an
/// all-zero struct, so `Default` yields unit scale.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Rotator,
    pub scale: Vector3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vector3::ZERO,
        rotation: Rotator::ZERO,
        scale: Vector3::ONE,
    };

    pub const fn from_translation(translation: Vector3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub const fn with_rotation(mut self, rotation: Rotator) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
