use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::constants::{picking, preview_colors};
use crate::utils::pointer_over_ui;

/// Marker component for selected entities
#[derive(Component, Default)]
pub struct Selected;

/// Marker for entities that click selection may pick.
///
/// Clicking a collider selects the nearest ancestor carrying this marker.
#[derive(Component, Default)]
pub struct Selectable;

/// Resource to track multi-selection state
#[derive(Resource, Default)]
pub struct SelectionState {
    pub multi_select: bool,
}

/// Click-to-select for hosts that don't bring their own selection
pub struct ClickSelectionPlugin;

impl Plugin for ClickSelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionState>().add_systems(
            Update,
            (update_multi_select_state, handle_click_selection, draw_selection_outline).chain(),
        );
    }
}

/// Track shift key for multi-selection
fn update_multi_select_state(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<SelectionState>) {
    state.multi_select = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
}

/// Handle click-to-select using raycasting
fn handle_click_selection(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    spatial_query: SpatialQuery,
    selectable: Query<Entity, With<Selectable>>,
    parent_query: Query<&ChildOf>,
    selected: Query<Entity, With<Selected>>,
    selection_state: Res<SelectionState>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    if pointer_over_ui(&mut contexts) {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    let Some((camera, camera_transform)) = camera_query.iter().find(|(camera, _)| camera.is_active) else {
        return;
    };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let filter = SpatialQueryFilter::default();
    if let Some(hit) = spatial_query.cast_ray(
        ray.origin,
        ray.direction,
        picking::MAX_PICK_DISTANCE,
        true,
        &filter,
    ) {
        let Some(entity_to_select) = find_selectable_ancestor(hit.entity, &selectable, &parent_query) else {
            return;
        };

        if !selection_state.multi_select {
            for entity in selected.iter().filter(|&entity| entity != entity_to_select) {
                commands.entity(entity).remove::<Selected>();
            }
        }

        // Toggle selection if multi-select and already selected
        if selection_state.multi_select && selected.get(entity_to_select).is_ok() {
            commands.entity(entity_to_select).remove::<Selected>();
        } else {
            commands.entity(entity_to_select).insert(Selected);
        }
    } else if !selection_state.multi_select {
        // Clicked on nothing - clear selection
        for entity in selected.iter() {
            commands.entity(entity).remove::<Selected>();
        }
    }
}

/// Walk up the parent hierarchy to find an entity with `Selectable`
fn find_selectable_ancestor(
    entity: Entity,
    selectable: &Query<Entity, With<Selectable>>,
    parent_query: &Query<&ChildOf>,
) -> Option<Entity> {
    std::iter::once(entity)
        .chain(parent_query.iter_ancestors(entity))
        .find(|&candidate| selectable.contains(candidate))
}

/// Outline selected objects with their collider bounds
fn draw_selection_outline(
    mut gizmos: Gizmos,
    selected: Query<(&Collider, &GlobalTransform), With<Selected>>,
) {
    let [r, g, b, a] = preview_colors::SELECTION;
    for (collider, global) in selected.iter() {
        let (_, rotation, translation) = global.to_scale_rotation_translation();
        let aabb = collider.aabb(translation, rotation);
        gizmos.cuboid(
            Transform::from_translation((aabb.min + aabb.max) / 2.0).with_scale(aabb.max - aabb.min),
            Color::srgba(r, g, b, a),
        );
    }
}
