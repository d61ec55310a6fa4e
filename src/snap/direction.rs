use bevy::prelude::*;

use crate::error::SnapError;

/// Axis-aligned direction the selection is swept along
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum SnapDirection {
    #[default]
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl SnapDirection {
    /// All directions in dropdown order
    pub const ALL: [SnapDirection; 6] = [
        SnapDirection::PosX,
        SnapDirection::NegX,
        SnapDirection::PosY,
        SnapDirection::NegY,
        SnapDirection::PosZ,
        SnapDirection::NegZ,
    ];

    /// Look up a direction by its dropdown index
    pub fn from_index(index: usize) -> Result<Self, SnapError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SnapError::InvalidDirectionIndex { index })
    }

    pub fn index(self) -> usize {
        match self {
            SnapDirection::PosX => 0,
            SnapDirection::NegX => 1,
            SnapDirection::PosY => 2,
            SnapDirection::NegY => 3,
            SnapDirection::PosZ => 4,
            SnapDirection::NegZ => 5,
        }
    }

    /// Signed unit axis
    pub fn vector(self) -> Vec3 {
        match self {
            SnapDirection::PosX => Vec3::X,
            SnapDirection::NegX => Vec3::NEG_X,
            SnapDirection::PosY => Vec3::Y,
            SnapDirection::NegY => Vec3::NEG_Y,
            SnapDirection::PosZ => Vec3::Z,
            SnapDirection::NegZ => Vec3::NEG_Z,
        }
    }

    /// Component-wise absolute value of [`Self::vector`], used to mask out the other two axes
    pub fn abs_vector(self) -> Vec3 {
        self.vector().abs()
    }

    pub fn dir3(self) -> Dir3 {
        match self {
            SnapDirection::PosX => Dir3::X,
            SnapDirection::NegX => Dir3::NEG_X,
            SnapDirection::PosY => Dir3::Y,
            SnapDirection::NegY => Dir3::NEG_Y,
            SnapDirection::PosZ => Dir3::Z,
            SnapDirection::NegZ => Dir3::NEG_Z,
        }
    }

    /// Get display name for UI
    pub fn label(self) -> &'static str {
        match self {
            SnapDirection::PosX => "Positive X",
            SnapDirection::NegX => "Negative X",
            SnapDirection::PosY => "Positive Y",
            SnapDirection::NegY => "Negative Y",
            SnapDirection::PosZ => "Positive Z",
            SnapDirection::NegZ => "Negative Z",
        }
    }

    /// Single-letter axis name
    pub fn axis_name(self) -> &'static str {
        match self {
            SnapDirection::PosX | SnapDirection::NegX => "X",
            SnapDirection::PosY | SnapDirection::NegY => "Y",
            SnapDirection::PosZ | SnapDirection::NegZ => "Z",
        }
    }
}
