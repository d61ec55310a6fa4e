use bevy::prelude::*;

use crate::error::SnapError;

/// World-space AABB of a single collider found under the selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionVolume {
    /// Entity owning the collider
    pub entity: Entity,
    pub min: Vec3,
    pub max: Vec3,
}

impl CollisionVolume {
    pub fn new(entity: Entity, min: Vec3, max: Vec3) -> Self {
        Self { entity, min, max }
    }

    /// Build from a center and half-extents, the way colliders report their bounds
    pub fn from_center_extents(entity: Entity, center: Vec3, extents: Vec3) -> Self {
        Self {
            entity,
            min: center - extents,
            max: center + extents,
        }
    }
}

/// Smallest axis-aligned box enclosing every collision volume of the selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionBounds {
    pub center: Vec3,
    /// Half-size per axis, never negative
    pub extents: Vec3,
}

impl UnionBounds {
    /// Fold a set of volumes into their union.
    ///
    /// The running min/max starts from the first volume, so the result does not
    /// depend on enumeration order. Fails with [`SnapError::NoCollidableGeometry`]
    /// when there is nothing to fold.
    pub fn from_volumes<'a, I>(volumes: I) -> Result<Self, SnapError>
    where
        I: IntoIterator<Item = &'a CollisionVolume>,
    {
        let mut volumes = volumes.into_iter();
        let first = volumes.next().ok_or(SnapError::NoCollidableGeometry)?;

        let (min, max) = volumes.fold((first.min, first.max), |(min, max), volume| {
            (min.min(volume.min), max.max(volume.max))
        });

        let center = (min + max) / 2.0;
        Ok(Self {
            center,
            extents: max - center,
        })
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Full box size, as used for drawing
    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }
}
