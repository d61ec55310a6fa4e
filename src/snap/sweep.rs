use avian3d::prelude::*;
use bevy::ecs::system::{SystemParam, SystemParamItem};
use bevy::prelude::*;

use super::bounds::UnionBounds;
use super::direction::SnapDirection;
use crate::settings::SnapSettings;

/// A single obstruction reported by a box sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// World-space contact point on the obstructing collider
    pub point: Vec3,
    /// Distance travelled along the sweep direction before contact
    pub distance: f32,
}

/// Scene query used to sweep the selection's bounds through the world
pub trait SweepQuery {
    /// Cast a box of `half_extents` from `origin` along `direction`, returning every hit
    fn sweep(&self, origin: Vec3, half_extents: Vec3, direction: Dir3) -> Vec<SweepHit>;
}

/// Pick the nearest hit strictly ahead of the box.
///
/// Zero-distance hits are the box's own starting overlap and are ignored.
/// Ties keep whichever hit was enumerated first.
pub fn closest_hit<I>(hits: I) -> Option<SweepHit>
where
    I: IntoIterator<Item = SweepHit>,
{
    hits.into_iter()
        .filter(|hit| hit.distance > 0.0)
        .fold(None, |closest: Option<SweepHit>, hit| match closest {
            Some(current) if current.distance <= hit.distance => Some(current),
            _ => Some(hit),
        })
}

/// Offset that brings the leading face of `bounds` onto `hit`, masked to the sweep axis
pub fn displacement_for(bounds: &UnionBounds, direction: SnapDirection, hit: Option<SweepHit>) -> Vec3 {
    let Some(hit) = hit else {
        return Vec3::ZERO;
    };

    let mask = direction.abs_vector();
    hit.point * mask - (bounds.center * mask + bounds.extents * direction.vector())
}

/// Sweep `bounds` along `direction` and return the displacement to first contact
pub fn compute_displacement(
    bounds: &UnionBounds,
    direction: SnapDirection,
    query: &impl SweepQuery,
) -> Vec3 {
    let hits = query.sweep(bounds.center, bounds.extents, direction.dir3());
    let hit = closest_hit(hits);

    match hit {
        Some(hit) => debug!("Closest snap hit at distance {:.3} ({:?})", hit.distance, hit.point),
        None => debug!("No obstruction along {}", direction.label()),
    }

    displacement_for(bounds, direction, hit)
}

/// [`SweepQuery`] backed by Avian3D's spatial query pipeline
pub struct AvianSweep<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
    max_distance: f32,
    max_hits: u32,
}

impl<'a, 'w, 's> AvianSweep<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, max_distance: f32, max_hits: u32) -> Self {
        Self {
            spatial_query,
            filter: SpatialQueryFilter::default(),
            max_distance,
            max_hits,
        }
    }

    /// Skip the given collider entities (usually the selection itself)
    pub fn excluding(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.filter = self.filter.with_excluded_entities(entities);
        self
    }
}

impl SweepQuery for AvianSweep<'_, '_, '_> {
    fn sweep(&self, origin: Vec3, half_extents: Vec3, direction: Dir3) -> Vec<SweepHit> {
        let size = half_extents * 2.0;
        let shape = Collider::cuboid(size.x, size.y, size.z);
        let config = cast_config(self.max_distance);

        self.spatial_query
            .shape_hits(
                &shape,
                origin,
                Quat::IDENTITY,
                direction,
                self.max_hits,
                &config,
                &self.filter,
            )
            .into_iter()
            .map(|hit| SweepHit {
                point: hit.point1,
                distance: hit.distance,
            })
            .collect()
    }
}

/// Shape cast settings for a sweep of at most `max_distance`.
///
/// Colliders the box already overlaps at its origin are skipped by the
/// pipeline, so they never use up the `max_hits` budget.
pub fn cast_config(max_distance: f32) -> ShapeCastConfig {
    ShapeCastConfig {
        ignore_origin_penetration: true,
        ..ShapeCastConfig::from_max_distance(max_distance)
    }
}

/// System parameter the snap systems sweep through.
///
/// The plugin registers its systems with [`AvianBackend`]. Any other
/// parameter, such as a resource describing a fixed scene, can stand in.
pub trait SweepBackend: SystemParam + 'static {
    fn cast_box(
        param: &SystemParamItem<'_, '_, Self>,
        settings: &SnapSettings,
        excluded: &[Entity],
        origin: Vec3,
        half_extents: Vec3,
        direction: Dir3,
    ) -> Vec<SweepHit>;
}

/// Avian3D's spatial query as a [`SweepBackend`]
pub type AvianBackend = SpatialQuery<'static, 'static>;

impl SweepBackend for AvianBackend {
    fn cast_box(
        spatial_query: &SystemParamItem<'_, '_, Self>,
        settings: &SnapSettings,
        excluded: &[Entity],
        origin: Vec3,
        half_extents: Vec3,
        direction: Dir3,
    ) -> Vec<SweepHit> {
        AvianSweep::new(spatial_query, settings.max_distance, settings.max_hits)
            .excluding(excluded.iter().copied())
            .sweep(origin, half_extents, direction)
    }
}

/// [`SweepQuery`] over a borrowed [`SweepBackend`] parameter
pub struct BackendSweep<'a, 'w, 's, B: SweepBackend> {
    param: &'a SystemParamItem<'w, 's, B>,
    settings: &'a SnapSettings,
    excluded: Vec<Entity>,
}

impl<'a, 'w, 's, B: SweepBackend> BackendSweep<'a, 'w, 's, B> {
    pub fn new(
        param: &'a SystemParamItem<'w, 's, B>,
        settings: &'a SnapSettings,
        excluded: impl IntoIterator<Item = Entity>,
    ) -> Self {
        Self {
            param,
            settings,
            excluded: excluded.into_iter().collect(),
        }
    }
}

impl<B: SweepBackend> SweepQuery for BackendSweep<'_, '_, '_, B> {
    fn sweep(&self, origin: Vec3, half_extents: Vec3, direction: Dir3) -> Vec<SweepHit> {
        B::cast_box(self.param, self.settings, &self.excluded, origin, half_extents, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed set of hits regardless of the query
    struct FixedHits(Vec<SweepHit>);

    impl SweepQuery for FixedHits {
        fn sweep(&self, _origin: Vec3, _half_extents: Vec3, _direction: Dir3) -> Vec<SweepHit> {
            self.0.clone()
        }
    }

    fn hit(point: Vec3, distance: f32) -> SweepHit {
        SweepHit { point, distance }
    }

    fn unit_cube() -> UnionBounds {
        UnionBounds {
            center: Vec3::ZERO,
            extents: Vec3::ONE,
        }
    }

    #[test]
    fn closest_hit_skips_zero_distance() {
        let hits = vec![
            hit(Vec3::ZERO, 0.0),
            hit(Vec3::new(7.0, 0.0, 0.0), 6.0),
            hit(Vec3::new(5.0, 0.0, 0.0), 4.0),
        ];

        let closest = closest_hit(hits).unwrap();
        assert_eq!(closest.distance, 4.0);
        assert_eq!(closest.point.x, 5.0);
    }

    #[test]
    fn closest_hit_keeps_first_on_tie() {
        let hits = vec![
            hit(Vec3::new(5.0, 1.0, 0.0), 4.0),
            hit(Vec3::new(5.0, -1.0, 0.0), 4.0),
        ];

        let closest = closest_hit(hits).unwrap();
        assert_eq!(closest.point.y, 1.0);
    }

    #[test]
    fn no_hit_ahead_gives_zero_displacement() {
        let query = FixedHits(vec![hit(Vec3::ONE, 0.0), hit(Vec3::ONE, -2.0)]);
        let displacement = compute_displacement(&unit_cube(), SnapDirection::PosX, &query);
        assert_eq!(displacement, Vec3::ZERO);

        let empty = FixedHits(Vec::new());
        let displacement = compute_displacement(&unit_cube(), SnapDirection::NegZ, &empty);
        assert_eq!(displacement, Vec3::ZERO);
    }

    #[test]
    fn cube_against_wall_along_positive_x() {
        // Wall face at x = 5, contact point somewhere on that face
        let query = FixedHits(vec![hit(Vec3::new(5.0, 0.3, -0.7), 4.0)]);
        let displacement = compute_displacement(&unit_cube(), SnapDirection::PosX, &query);

        assert_eq!(displacement, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn negative_direction_gives_negative_offset() {
        // Floor top at y = -3 below a unit cube centered at y = 0.5
        let bounds = UnionBounds {
            center: Vec3::new(2.0, 0.5, 1.0),
            extents: Vec3::ONE,
        };
        let query = FixedHits(vec![hit(Vec3::new(2.4, -3.0, 0.9), 2.5)]);
        let displacement = compute_displacement(&bounds, SnapDirection::NegY, &query);

        assert_eq!(displacement, Vec3::new(0.0, -2.5, 0.0));
    }

    #[test]
    fn displacement_is_zero_off_axis_for_every_direction() {
        let bounds = UnionBounds {
            center: Vec3::new(1.5, -2.0, 3.25),
            extents: Vec3::new(0.5, 2.0, 1.0),
        };
        let query = FixedHits(vec![hit(Vec3::new(9.0, -7.0, 4.0), 3.0)]);

        for direction in SnapDirection::ALL {
            let displacement = compute_displacement(&bounds, direction, &query);
            let off_axis = displacement * (Vec3::ONE - direction.abs_vector());
            assert_eq!(off_axis, Vec3::ZERO, "off-axis motion for {:?}", direction);
        }
    }

    #[test]
    fn cast_skips_starting_overlaps() {
        let config = cast_config(250.0);

        assert!(config.ignore_origin_penetration);
        assert_eq!(config.max_distance, 250.0);
    }
}
