mod bounds;
mod direction;
mod preview;
mod session;
mod sweep;
mod systems;

pub use bounds::*;
pub use direction::*;
pub use preview::*;
pub use session::*;
pub use sweep::*;
pub use systems::*;

use bevy::prelude::*;

use crate::settings::SnapSettings;

/// Snap session, preview gizmos and the systems driving them
pub struct SnapPlugin;

impl Plugin for SnapPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SnapSettings::load())
            .init_resource::<SnapStatus>()
            .init_gizmo_group::<SnapGizmos>()
            .add_message::<OpenSnapWindow>()
            .add_message::<CloseSnapWindow>()
            .add_message::<ConfirmSnap>()
            .add_message::<SetSnapDirection>()
            .add_message::<SetSnapPreview>()
            .add_message::<SnapApplied>()
            .add_systems(Startup, configure_snap_gizmos)
            .add_systems(
                Update,
                (
                    handle_snap_hotkey,
                    open_snap_window,
                    watch_selection,
                    handle_session_messages,
                    update_snap_preview::<AvianBackend>,
                    confirm_snap::<AvianBackend>,
                    draw_snap_preview,
                )
                    .chain(),
            );
    }
}
