use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use super::session::SnapSession;
use crate::settings::SnapSettings;

/// Gizmo group for the snap preview, so its line width is independent of the host's gizmos
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct SnapGizmos;

/// Arrow showing which way the selection will travel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewArrow {
    pub start: Vec3,
    pub end: Vec3,
}

/// What the preview should draw for the current session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewShapes {
    pub bounds_center: Vec3,
    pub bounds_size: Vec3,
    pub arrow: Option<PreviewArrow>,
    /// Center of the box at its snapped position
    pub destination: Option<Vec3>,
}

impl PreviewShapes {
    /// Nothing is drawn while the preview is off or before bounds exist
    pub fn from_session(session: &SnapSession) -> Option<Self> {
        if !session.preview_enabled() || session.phase().is_terminal() {
            return None;
        }
        let bounds = session.bounds()?;
        let direction = session.direction();
        let displacement = session.displacement();
        let arrow_length = bounds.extents.length() / 2.0;

        // Only worth an arrow when the gap is larger than the box itself plus the arrow
        let projected_size = (bounds.size() * direction.abs_vector()).length();
        let arrow = (displacement.length() > projected_size + arrow_length).then(|| {
            let start = bounds.center + bounds.extents * direction.vector();
            PreviewArrow {
                start,
                end: start + direction.vector() * arrow_length,
            }
        });

        let destination = (displacement != Vec3::ZERO).then(|| bounds.center + displacement);

        Some(Self {
            bounds_center: bounds.center,
            bounds_size: bounds.size(),
            arrow,
            destination,
        })
    }
}

pub(crate) fn configure_snap_gizmos(mut config_store: ResMut<GizmoConfigStore>, settings: Res<SnapSettings>) {
    let (config, _) = config_store.config_mut::<SnapGizmos>();
    config.line.width = settings.line_width;
}

/// Draw the bounding box, direction arrow and destination box
pub(crate) fn draw_snap_preview(
    mut gizmos: Gizmos<SnapGizmos>,
    session: Option<Res<SnapSession>>,
    settings: Res<SnapSettings>,
) {
    let Some(session) = session else {
        return;
    };
    let Some(shapes) = PreviewShapes::from_session(&session) else {
        return;
    };

    gizmos.cuboid(
        Transform::from_translation(shapes.bounds_center).with_scale(shapes.bounds_size),
        settings.bounds_color(),
    );

    if let Some(arrow) = shapes.arrow {
        gizmos.arrow(arrow.start, arrow.end, settings.arrow_color());
    }

    if let Some(destination) = shapes.destination {
        gizmos.cuboid(
            Transform::from_translation(destination).with_scale(shapes.bounds_size),
            settings.destination_color(),
        );
    }
}
