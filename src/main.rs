//! Demo scene for the snap tool.
//!
//! Click a crate to select it (Shift for multi-select), press
//! `Ctrl+Shift+S`, pick a direction and hit Snap.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_collision_snap::{CollisionSnapPlugin, Selectable, Selected};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Collision Snap".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(CollisionSnapPlugin::with_click_selection())
        .add_systems(Startup, setup_demo_scene)
        .run();
}

/// Floor, a wall on +X, a shelf overhead, and a few crates to push around
fn setup_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-6.0, 8.0, 14.0).looking_at(Vec3::new(1.0, 1.0, 0.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let static_material = materials.add(Color::srgb(0.6, 0.6, 0.7));
    let mut spawn_static = |commands: &mut Commands, name: &str, size: Vec3, position: Vec3| {
        commands.spawn((
            Name::new(name.to_string()),
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(static_material.clone()),
            Transform::from_translation(position),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
        ));
    };

    spawn_static(&mut commands, "Floor", Vec3::new(30.0, 0.2, 30.0), Vec3::new(0.0, -3.1, 0.0));
    spawn_static(&mut commands, "Wall", Vec3::new(0.5, 12.0, 30.0), Vec3::new(5.25, 3.0, 0.0));
    spawn_static(&mut commands, "Shelf", Vec3::new(6.0, 0.3, 6.0), Vec3::new(0.0, 6.0, 0.0));

    let crate_material = materials.add(Color::srgb(0.8, 0.7, 0.6));
    let crate_mesh = meshes.add(Cuboid::new(2.0, 2.0, 2.0));
    for (i, position) in [Vec3::ZERO, Vec3::new(-4.0, 1.0, 3.0)].into_iter().enumerate() {
        let mut entity = commands.spawn((
            Name::new(format!("Crate {}", i + 1)),
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_translation(position),
            RigidBody::Static,
            Collider::cuboid(2.0, 2.0, 2.0),
            Selectable,
        ));
        if i == 0 {
            entity.insert(Selected);
        }
    }
}
