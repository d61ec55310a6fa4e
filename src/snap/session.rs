use bevy::prelude::*;

use super::bounds::{CollisionVolume, UnionBounds};
use super::direction::SnapDirection;
use super::sweep::{compute_displacement, SweepQuery};
use crate::error::SnapError;

/// Lifecycle of a snap session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Window open, nothing computed yet
    #[default]
    Idle,
    /// Bounds and displacement are up to date
    PreviewReady,
    /// Displacement applied, window closing
    Snapped,
    /// Closed without moving anything
    Cancelled,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Snapped | SessionPhase::Cancelled)
    }
}

/// State of one open snap window.
///
/// Inserted as a resource when the window opens and removed when it closes,
/// so nothing survives from one session to the next.
#[derive(Resource, Debug)]
pub struct SnapSession {
    phase: SessionPhase,
    title: String,
    preview_enabled: bool,
    direction: SnapDirection,
    /// Selected entities, sorted, as seen when the session last looked
    selection: Vec<Entity>,
    /// Collider entities making up the current bounds
    colliders: Vec<Entity>,
    bounds: Option<UnionBounds>,
    displacement: Vec3,
    /// Bounds must be rebuilt before the next preview
    dirty: bool,
    /// Scroll position of the window contents
    pub scroll_offset: Vec2,
}

impl SnapSession {
    pub fn open(title: impl Into<String>, mut selection: Vec<Entity>, preview_enabled: bool) -> Self {
        selection.sort();
        selection.dedup();
        Self {
            phase: SessionPhase::Idle,
            title: title.into(),
            preview_enabled,
            direction: SnapDirection::default(),
            selection,
            colliders: Vec::new(),
            bounds: None,
            displacement: Vec3::ZERO,
            dirty: true,
            scroll_offset: Vec2::ZERO,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    pub fn direction(&self) -> SnapDirection {
        self.direction
    }

    pub fn selection(&self) -> &[Entity] {
        &self.selection
    }

    pub fn colliders(&self) -> &[Entity] {
        &self.colliders
    }

    pub fn bounds(&self) -> Option<&UnionBounds> {
        self.bounds.as_ref()
    }

    pub fn displacement(&self) -> Vec3 {
        self.displacement
    }

    /// Whether the preview needs a full bounds + distance pass
    pub fn needs_recalculate(&self) -> bool {
        self.preview_enabled && !self.phase.is_terminal() && (self.dirty || self.bounds.is_none())
    }

    /// Change direction from a dropdown index
    pub fn set_direction_index(&mut self, index: usize) -> Result<(), SnapError> {
        let direction = SnapDirection::from_index(index)?;
        self.set_direction(direction);
        Ok(())
    }

    /// Change direction. The old displacement no longer applies and is dropped.
    pub fn set_direction(&mut self, direction: SnapDirection) {
        if direction == self.direction {
            return;
        }
        self.direction = direction;
        self.displacement = Vec3::ZERO;
        self.dirty = true;
    }

    /// Toggle the preview. Turning it on invalidates the cached bounds.
    pub fn set_preview(&mut self, enabled: bool) {
        if enabled && !self.preview_enabled {
            self.dirty = true;
        }
        self.preview_enabled = enabled;
    }

    /// Returns `true` if `current` differs from the selection this session was tracking
    pub fn selection_differs(&self, current: &[Entity]) -> bool {
        self.selection.as_slice() != current
    }

    /// Track a new selection; the next preview pass rebuilds the bounds
    pub fn update_selection(&mut self, mut selection: Vec<Entity>) {
        selection.sort();
        selection.dedup();
        self.selection = selection;
        self.dirty = true;
    }

    /// Rebuild bounds from `volumes` and sweep them along the current direction.
    ///
    /// On error the previous bounds and displacement are left untouched.
    pub fn recalculate(
        &mut self,
        volumes: &[CollisionVolume],
        query: &impl SweepQuery,
    ) -> Result<(), SnapError> {
        if self.phase.is_terminal() {
            return Err(SnapError::SessionClosed);
        }

        let bounds = UnionBounds::from_volumes(volumes)?;
        self.displacement = compute_displacement(&bounds, self.direction, query);
        self.bounds = Some(bounds);
        self.colliders = volumes.iter().map(|volume| volume.entity).collect();
        self.dirty = false;
        self.phase = SessionPhase::PreviewReady;
        Ok(())
    }

    /// Re-sweep the existing bounds, picking up obstructions that moved
    pub fn refresh_distance(&mut self, query: &impl SweepQuery) -> Result<(), SnapError> {
        if self.phase.is_terminal() {
            return Err(SnapError::SessionClosed);
        }

        if let Some(bounds) = self.bounds {
            self.displacement = compute_displacement(&bounds, self.direction, query);
            self.phase = SessionPhase::PreviewReady;
        }
        Ok(())
    }

    /// Confirm the snap and return the displacement to apply.
    ///
    /// Without an up-to-date preview the bounds and distance are computed
    /// fresh first. A session snaps at most once.
    pub fn snap(
        &mut self,
        volumes: &[CollisionVolume],
        query: &impl SweepQuery,
    ) -> Result<Vec3, SnapError> {
        if self.phase.is_terminal() {
            return Err(SnapError::SessionClosed);
        }

        if !self.preview_enabled || self.dirty || self.bounds.is_none() {
            self.recalculate(volumes, query)?;
        }

        self.phase = SessionPhase::Snapped;
        Ok(self.displacement)
    }

    /// Close without moving anything
    pub fn cancel(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = SessionPhase::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::sweep::SweepHit;

    /// Box sweep against axis-aligned half-space walls, one per direction
    struct Walls {
        /// Wall faces at `+x, -x, +y, -y, +z, -z`
        faces: [f32; 6],
    }

    impl SweepQuery for Walls {
        fn sweep(&self, origin: Vec3, half_extents: Vec3, direction: Dir3) -> Vec<SweepHit> {
            let dir = *direction;
            let Some(index) = SnapDirection::ALL.iter().position(|d| d.vector() == dir) else {
                return Vec::new();
            };
            let face = self.faces[index];
            let axis = dir.abs();
            let leading = origin.dot(axis) + half_extents.dot(axis) * dir.dot(axis).signum();
            let distance = (face - leading) * dir.dot(axis).signum();
            if !distance.is_finite() || distance < 0.0 {
                return Vec::new();
            }
            let point = origin * (Vec3::ONE - axis) + axis * face;
            vec![
                SweepHit {
                    point: origin,
                    distance: 0.0,
                },
                SweepHit { point, distance },
            ]
        }
    }

    fn scene() -> Walls {
        Walls {
            faces: [5.0, -8.0, 10.0, -3.0, f32::INFINITY, f32::NEG_INFINITY],
        }
    }

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    fn unit_cube(entity: Entity) -> Vec<CollisionVolume> {
        vec![CollisionVolume::from_center_extents(entity, Vec3::ZERO, Vec3::ONE)]
    }

    #[test]
    fn open_session_is_idle() {
        let session = SnapSession::open("Snap Cube", entities(1), true);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.direction(), SnapDirection::PosX);
        assert!(session.bounds().is_none());
        assert!(session.needs_recalculate());
    }

    #[test]
    fn recalculate_against_wall() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection.clone(), true);

        session.recalculate(&volumes, &scene()).unwrap();

        let bounds = session.bounds().unwrap();
        assert_eq!(bounds.center, Vec3::ZERO);
        assert_eq!(bounds.extents, Vec3::ONE);
        assert_eq!(session.displacement(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(session.phase(), SessionPhase::PreviewReady);
        assert_eq!(session.colliders(), selection.as_slice());
        assert!(!session.needs_recalculate());
    }

    #[test]
    fn snap_moves_cube_flush_with_wall() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, true);
        session.recalculate(&volumes, &scene()).unwrap();

        let displacement = session.snap(&volumes, &scene()).unwrap();
        let position = Vec3::ZERO + displacement;

        assert_eq!(position, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(session.phase(), SessionPhase::Snapped);
    }

    #[test]
    fn snap_applies_once_per_session() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, true);

        session.snap(&volumes, &scene()).unwrap();
        let err = session.snap(&volumes, &scene()).unwrap_err();

        assert_eq!(err, SnapError::SessionClosed);
        assert_eq!(session.displacement(), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn snap_without_preview_computes_fresh() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, false);
        assert!(!session.needs_recalculate());

        let displacement = session.snap(&volumes, &scene()).unwrap();
        assert_eq!(displacement, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn direction_change_discards_previous_axis() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, true);
        session.recalculate(&volumes, &scene()).unwrap();
        assert_eq!(session.displacement(), Vec3::new(4.0, 0.0, 0.0));

        session.set_direction_index(3).unwrap();
        assert_eq!(session.direction(), SnapDirection::NegY);
        assert_eq!(session.displacement(), Vec3::ZERO);
        assert!(session.needs_recalculate());

        session.recalculate(&volumes, &scene()).unwrap();
        assert_eq!(session.displacement(), Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn no_obstruction_gives_zero_displacement() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, true);
        session.set_direction(SnapDirection::PosZ);

        session.recalculate(&volumes, &scene()).unwrap();
        assert_eq!(session.displacement(), Vec3::ZERO);
        assert_eq!(session.phase(), SessionPhase::PreviewReady);
    }

    #[test]
    fn no_colliders_fails_and_keeps_prior_state() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, true);
        session.recalculate(&volumes, &scene()).unwrap();

        let err = session.recalculate(&[], &scene()).unwrap_err();
        assert_eq!(err, SnapError::NoCollidableGeometry);
        assert_eq!(session.displacement(), Vec3::new(4.0, 0.0, 0.0));

        session.set_preview(false);
        let err = session.snap(&[], &scene()).unwrap_err();
        assert_eq!(err, SnapError::NoCollidableGeometry);
        assert_ne!(session.phase(), SessionPhase::Snapped);
    }

    #[test]
    fn invalid_direction_index_leaves_direction_alone() {
        let mut session = SnapSession::open("Snap Cube", entities(1), true);
        let err = session.set_direction_index(9).unwrap_err();

        assert_eq!(err, SnapError::InvalidDirectionIndex { index: 9 });
        assert_eq!(session.direction(), SnapDirection::PosX);
    }

    #[test]
    fn union_of_two_objects_snaps_as_one_box() {
        let selection = entities(2);
        let volumes = vec![
            CollisionVolume::from_center_extents(selection[0], Vec3::new(-2.0, 0.0, 0.0), Vec3::ONE),
            CollisionVolume::from_center_extents(selection[1], Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5)),
        ];
        let mut session = SnapSession::open("Snap Selection", selection, true);
        session.recalculate(&volumes, &scene()).unwrap();

        // Union spans x in [-3, 1.5], leading face 3.5 short of the wall
        assert_eq!(session.displacement(), Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn enabling_preview_marks_bounds_stale() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, true);
        session.recalculate(&volumes, &scene()).unwrap();

        session.set_preview(false);
        assert!(!session.needs_recalculate());
        session.set_preview(true);
        assert!(session.needs_recalculate());
    }

    #[test]
    fn cancelled_session_rejects_work() {
        let selection = entities(1);
        let volumes = unit_cube(selection[0]);
        let mut session = SnapSession::open("Snap Cube", selection, true);
        session.cancel();

        assert_eq!(session.phase(), SessionPhase::Cancelled);
        assert!(!session.needs_recalculate());
        assert_eq!(session.recalculate(&volumes, &scene()).unwrap_err(), SnapError::SessionClosed);
        assert_eq!(session.snap(&volumes, &scene()).unwrap_err(), SnapError::SessionClosed);
    }

    #[test]
    fn selection_tracking_ignores_order() {
        let mut selection = entities(3);
        selection.sort();
        let mut reversed = selection.clone();
        reversed.reverse();
        let session = SnapSession::open("Snap Selection", reversed, true);

        assert!(!session.selection_differs(&selection));
        assert!(session.selection_differs(&selection[..2]));
    }
}
