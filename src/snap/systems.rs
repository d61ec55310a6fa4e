use avian3d::prelude::*;
use bevy::ecs::system::StaticSystemParam;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::bounds::CollisionVolume;
use super::session::SnapSession;
use super::sweep::{BackendSweep, SweepBackend};
use crate::error::SnapError;
use crate::selection::Selected;
use crate::settings::SnapSettings;
use crate::utils::should_process_input;

/// Event to open the snap window for the current selection
#[derive(Message)]
pub struct OpenSnapWindow;

/// Event to close the snap window without moving anything
#[derive(Message)]
pub struct CloseSnapWindow;

/// Event to apply the snap and close the window
#[derive(Message)]
pub struct ConfirmSnap;

/// Event to change the snap direction by dropdown index
#[derive(Message)]
pub struct SetSnapDirection {
    pub index: usize,
}

/// Event to toggle the snap preview
#[derive(Message)]
pub struct SetSnapPreview(pub bool);

/// Sent after a snap moved the selection, so hosts can record undo history
#[derive(Message, Debug, Clone)]
pub struct SnapApplied {
    /// Entities whose transforms were changed
    pub entities: Vec<Entity>,
    /// World-space offset added to each of them
    pub displacement: Vec3,
}

/// Last snap failure, shown to the user until dismissed
#[derive(Resource, Default, Debug)]
pub struct SnapStatus {
    pub notice: Option<String>,
}

impl SnapStatus {
    pub fn report(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }
}

/// Selected entities in a stable order
fn current_selection(selected: &Query<Entity, With<Selected>>) -> Vec<Entity> {
    let mut entities: Vec<Entity> = selected.iter().collect();
    entities.sort();
    entities
}

/// Collect the world-space AABB of every collider on the selection and its descendants
pub fn collect_volumes(
    selection: &[Entity],
    colliders: &Query<(&Collider, &GlobalTransform)>,
    children: &Query<&Children>,
) -> Vec<CollisionVolume> {
    let mut volumes = Vec::new();
    for &root in selection {
        for entity in std::iter::once(root).chain(children.iter_descendants(root)) {
            let Ok((collider, global)) = colliders.get(entity) else {
                continue;
            };
            let (_, rotation, translation) = global.to_scale_rotation_translation();
            let aabb = collider.aabb(translation, rotation);
            volumes.push(CollisionVolume::new(entity, aabb.min, aabb.max));
        }
    }
    volumes
}

/// Drop entities whose ancestor is also selected, so nothing moves twice
pub fn top_level_selection(selection: &[Entity], parents: &Query<&ChildOf>) -> Vec<Entity> {
    selection
        .iter()
        .copied()
        .filter(|&entity| {
            !parents
                .iter_ancestors(entity)
                .any(|ancestor| selection.contains(&ancestor))
        })
        .collect()
}

/// Convert a world-space offset into the local space of `parent`
pub fn local_offset(parent: Option<&GlobalTransform>, world_offset: Vec3) -> Vec3 {
    match parent {
        Some(parent) => parent.affine().inverse().transform_vector3(world_offset),
        None => world_offset,
    }
}

/// End the session after an error and tell the user
fn abort_session(commands: &mut Commands, session: &mut SnapSession, status: &mut SnapStatus, err: SnapError) {
    error!("{}: {}", session.title(), err);
    session.cancel();
    status.report(err.to_string());
    commands.remove_resource::<SnapSession>();
}

/// Ctrl+Shift+S opens the snap window
pub(crate) fn handle_snap_hotkey(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut open_events: MessageWriter<OpenSnapWindow>,
) {
    if !should_process_input(&mut contexts) {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if ctrl && shift && keyboard.just_pressed(KeyCode::KeyS) {
        open_events.write(OpenSnapWindow);
    }
}

/// Start a new session, replacing any window that is already open
pub(crate) fn open_snap_window(
    mut events: MessageReader<OpenSnapWindow>,
    mut commands: Commands,
    selected: Query<Entity, With<Selected>>,
    names: Query<&Name>,
    settings: Res<SnapSettings>,
    mut status: ResMut<SnapStatus>,
    existing: Option<ResMut<SnapSession>>,
) {
    if events.read().last().is_none() {
        return;
    }

    let selection = current_selection(&selected);
    if selection.is_empty() {
        warn!("Snap: nothing selected");
        status.report("Select at least one object to snap");
        return;
    }

    if let Some(mut existing) = existing {
        existing.cancel();
        debug!("Replacing open snap window '{}'", existing.title());
    }

    let title = match selection.as_slice() {
        [single] => match names.get(*single) {
            Ok(name) => format!("Snap {}", name),
            Err(_) => "Snap Selection".to_string(),
        },
        _ => "Snap Selection".to_string(),
    };

    info!("{} ({} objects)", title, selection.len());
    status.dismiss();
    commands.insert_resource(SnapSession::open(title, selection, settings.preview_by_default));
}

/// Cancel (or follow, per settings) when the selection changes under an open session
pub(crate) fn watch_selection(
    mut commands: Commands,
    session: Option<ResMut<SnapSession>>,
    selected: Query<Entity, With<Selected>>,
    settings: Res<SnapSettings>,
) {
    let Some(mut session) = session else {
        return;
    };

    let selection = current_selection(&selected);
    if !session.selection_differs(&selection) {
        return;
    }

    if settings.close_on_selection_change || selection.is_empty() {
        info!("Selection changed, closing '{}'", session.title());
        session.cancel();
        commands.remove_resource::<SnapSession>();
    } else {
        debug!("Selection changed, refreshing '{}'", session.title());
        session.update_selection(selection);
    }
}

/// Apply direction / preview / close requests from the window
pub(crate) fn handle_session_messages(
    mut commands: Commands,
    session: Option<ResMut<SnapSession>>,
    mut direction_events: MessageReader<SetSnapDirection>,
    mut preview_events: MessageReader<SetSnapPreview>,
    mut close_events: MessageReader<CloseSnapWindow>,
    mut settings: ResMut<SnapSettings>,
    mut status: ResMut<SnapStatus>,
) {
    let Some(mut session) = session else {
        direction_events.clear();
        preview_events.clear();
        close_events.clear();
        return;
    };

    for event in direction_events.read() {
        if let Err(err) = session.set_direction_index(event.index) {
            abort_session(&mut commands, &mut session, &mut status, err);
            return;
        }
        debug!("Snap direction: {}", session.direction().label());
    }

    for SetSnapPreview(enabled) in preview_events.read() {
        session.set_preview(*enabled);
        if settings.preview_by_default != *enabled {
            settings.preview_by_default = *enabled;
            settings.save();
        }
    }

    if close_events.read().last().is_some() {
        info!("Closed '{}'", session.title());
        session.cancel();
        commands.remove_resource::<SnapSession>();
    }
}

/// Keep the preview's bounds and distance current while the window is open
pub(crate) fn update_snap_preview<B: SweepBackend>(
    mut commands: Commands,
    session: Option<ResMut<SnapSession>>,
    backend: StaticSystemParam<B>,
    colliders: Query<(&Collider, &GlobalTransform)>,
    children: Query<&Children>,
    settings: Res<SnapSettings>,
    mut status: ResMut<SnapStatus>,
) {
    let Some(mut session) = session else {
        return;
    };
    if !session.preview_enabled() || session.phase().is_terminal() {
        return;
    }

    let result = if session.needs_recalculate() {
        let volumes = collect_volumes(session.selection(), &colliders, &children);
        let sweep = BackendSweep::<B>::new(
            &*backend,
            &settings,
            volumes.iter().map(|volume| volume.entity),
        );
        session.recalculate(&volumes, &sweep)
    } else {
        let sweep = BackendSweep::<B>::new(&*backend, &settings, session.colliders().iter().copied());
        session.refresh_distance(&sweep)
    };

    if let Err(err) = result {
        abort_session(&mut commands, &mut session, &mut status, err);
    }
}

/// Move every selected object by the session's displacement and close the window
pub(crate) fn confirm_snap<B: SweepBackend>(
    mut events: MessageReader<ConfirmSnap>,
    mut commands: Commands,
    session: Option<ResMut<SnapSession>>,
    backend: StaticSystemParam<B>,
    colliders: Query<(&Collider, &GlobalTransform)>,
    children: Query<&Children>,
    parents: Query<&ChildOf>,
    globals: Query<&GlobalTransform>,
    mut transforms: Query<&mut Transform>,
    settings: Res<SnapSettings>,
    mut status: ResMut<SnapStatus>,
    mut applied: MessageWriter<SnapApplied>,
) {
    if events.read().last().is_none() {
        return;
    }
    let Some(mut session) = session else {
        return;
    };

    let volumes = collect_volumes(session.selection(), &colliders, &children);
    let sweep = BackendSweep::<B>::new(
        &*backend,
        &settings,
        volumes.iter().map(|volume| volume.entity),
    );

    let displacement = match session.snap(&volumes, &sweep) {
        Ok(displacement) => displacement,
        Err(err) => {
            abort_session(&mut commands, &mut session, &mut status, err);
            return;
        }
    };

    let entities = top_level_selection(session.selection(), &parents);
    for &entity in &entities {
        let parent_global = parents
            .get(entity)
            .ok()
            .and_then(|child_of| globals.get(child_of.parent()).ok());
        if let Ok(mut transform) = transforms.get_mut(entity) {
            transform.translation += local_offset(parent_global, displacement);
        }
    }

    info!("Snapped {} objects by {:?}", entities.len(), displacement);
    applied.write(SnapApplied { entities, displacement });
    commands.remove_resource::<SnapSession>();
}
