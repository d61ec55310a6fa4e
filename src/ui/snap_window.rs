use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::snap::{
    CloseSnapWindow, ConfirmSnap, SetSnapDirection, SetSnapPreview, SnapDirection, SnapSession,
    SnapStatus,
};

pub struct SnapWindowPlugin;

impl Plugin for SnapWindowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, (draw_snap_window, draw_snap_notice));
    }
}

/// Short readout of where the selection will go
fn offset_summary(session: &SnapSession) -> String {
    if !session.preview_enabled() {
        return "Preview off".to_string();
    }
    if session.bounds().is_none() {
        return "Calculating...".to_string();
    }

    let direction = session.direction();
    let offset = session.displacement().dot(direction.abs_vector());
    if offset == 0.0 {
        format!("No obstruction along {}", direction.label())
    } else {
        format!("Moves {:.3} along {}", offset, direction.axis_name())
    }
}

/// Draw the snap window: direction dropdown, preview toggle and Snap button
fn draw_snap_window(
    mut contexts: EguiContexts,
    session: Option<ResMut<SnapSession>>,
    mut direction_events: MessageWriter<SetSnapDirection>,
    mut preview_events: MessageWriter<SetSnapPreview>,
    mut confirm_events: MessageWriter<ConfirmSnap>,
    mut close_events: MessageWriter<CloseSnapWindow>,
) -> Result {
    let Some(mut session) = session else {
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?;

    let mut open = true;
    let mut direction_index = session.direction().index();
    let mut preview = session.preview_enabled();
    let offset = egui::vec2(session.scroll_offset.x, session.scroll_offset.y);
    let summary = offset_summary(&session);
    let mut scrolled_to = None;

    egui::Window::new(session.title())
        .id(egui::Id::new("snap_window"))
        .open(&mut open)
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            let output = egui::ScrollArea::vertical()
                .scroll_offset(offset)
                .show(ui, |ui| {
                    ui.add_space(4.0);

                    ui.label("Direction");
                    egui::ComboBox::from_id_salt("snap_direction")
                        .width(ui.available_width())
                        .show_index(ui, &mut direction_index, SnapDirection::ALL.len(), |i| {
                            SnapDirection::ALL[i].label()
                        });

                    ui.add_space(4.0);
                    ui.checkbox(&mut preview, "Preview");

                    ui.add_space(4.0);
                    ui.small(summary.as_str());

                    ui.add_space(4.0);
                    if ui
                        .add_sized([ui.available_width(), 20.0], egui::Button::new("Snap"))
                        .clicked()
                    {
                        confirm_events.write(ConfirmSnap);
                    }
                });
            scrolled_to = Some(output.state.offset);
        });

    if let Some(offset) = scrolled_to {
        session.scroll_offset = Vec2::new(offset.x, offset.y);
    }

    if direction_index != session.direction().index() {
        direction_events.write(SetSnapDirection {
            index: direction_index,
        });
    }

    if preview != session.preview_enabled() {
        preview_events.write(SetSnapPreview(preview));
    }

    if !open {
        close_events.write(CloseSnapWindow);
    }

    Ok(())
}

/// Show the last snap failure until the user dismisses it
fn draw_snap_notice(mut contexts: EguiContexts, mut status: ResMut<SnapStatus>) -> Result {
    let Some(notice) = status.notice.clone() else {
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?;

    let mut dismissed = false;
    egui::Window::new("Snap")
        .id(egui::Id::new("snap_notice"))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(notice).color(egui::Color32::from_rgb(230, 90, 90)));
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        status.dismiss();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::{CollisionVolume, SweepHit, SweepQuery};

    /// Wall face at x = 5
    struct Wall;

    impl SweepQuery for Wall {
        fn sweep(&self, origin: Vec3, half_extents: Vec3, direction: Dir3) -> Vec<SweepHit> {
            let leading = origin.x + half_extents.x;
            if direction != Dir3::X {
                return Vec::new();
            }
            vec![SweepHit {
                point: Vec3::new(5.0, origin.y, origin.z),
                distance: 5.0 - leading,
            }]
        }
    }

    fn previewed_session() -> SnapSession {
        let entity = World::new().spawn_empty().id();
        let mut session = SnapSession::open("Snap Crate", vec![entity], true);
        let volumes = [CollisionVolume::new(entity, Vec3::splat(-1.0), Vec3::ONE)];
        session.recalculate(&volumes, &Wall).unwrap();
        session
    }

    #[test]
    fn readout_shows_previewed_offset() {
        assert_eq!(offset_summary(&previewed_session()), "Moves 4.000 along X");
    }

    #[test]
    fn readout_says_preview_off_once_disabled() {
        let mut session = previewed_session();
        session.set_preview(false);
        assert_eq!(offset_summary(&session), "Preview off");

        session.set_direction(SnapDirection::NegY);
        assert_eq!(offset_summary(&session), "Preview off");
    }
}
