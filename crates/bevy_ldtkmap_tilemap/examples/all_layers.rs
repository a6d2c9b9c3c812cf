//! Complete example rendering every LDtk layer type.
//!
//! Demonstrates:
//! - Tile and auto-layers (stacked tiles become stacked tilemaps)
//! - Int-grid layers with auto-tiles
//! - Level backgrounds
//! - Level geometry gizmos
//!
//! Run with: `cargo run -p bevy_ldtkmap_tilemap --example all_layers`

use bevy::prelude::*;
use bevy_inspector_egui::{bevy_egui::EguiPlugin, quick::WorldInspectorPlugin};
use bevy_ldtkmap_assets::LdtkAssetsPlugin;
use bevy_ldtkmap_core::prelude::*;
use bevy_ldtkmap_tilemap::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .add_plugins(LdtkAssetsPlugin)
        .add_plugins(LdtkCorePlugin::default())
        .add_plugins(TilemapPlugin::default())
        .add_plugins(EguiPlugin::default())
        .add_plugins(WorldInspectorPlugin::default())
        .add_systems(Startup, setup)
        .add_systems(Update, (camera_movement, controls))
        .run();
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn(Camera2d);

    commands
        .spawn(LdtkProject {
            handle: asset_server.load("ldtk/world.ldtk"),
        })
        .observe(|trigger: On<ProjectSpawned>| {
            info!("Project ready: {:?}", trigger.event().entity);
        });

    info!("Controls:");
    info!("  WASD          - Move camera");
    info!("  +/-           - Zoom");
    info!("  B             - Toggle level backgrounds (applies on respawn)");
    info!("  G             - Toggle level geometry gizmos");
    info!("  R             - Respawn all projects");
}

fn camera_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let speed = 200.0;

    if keyboard.pressed(KeyCode::KeyW) {
        camera_transform.translation.y += speed * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::KeyS) {
        camera_transform.translation.y -= speed * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::KeyA) {
        camera_transform.translation.x -= speed * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::KeyD) {
        camera_transform.translation.x += speed * time.delta_secs();
    }

    if keyboard.pressed(KeyCode::Equal) || keyboard.pressed(KeyCode::NumpadAdd) {
        camera_transform.scale *= 0.99;
    }
    if keyboard.pressed(KeyCode::Minus) || keyboard.pressed(KeyCode::NumpadSubtract) {
        camera_transform.scale *= 1.01;
    }
}

fn controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut config: ResMut<TilemapRenderConfig>,
    debug: Option<Res<DebugLevelGeometry>>,
    projects: Query<Entity, With<LdtkProject>>,
) {
    if keyboard.just_pressed(KeyCode::KeyB) {
        config.render_backgrounds = !config.render_backgrounds;
        info!("Level backgrounds: {}", config.render_backgrounds);
    }

    if keyboard.just_pressed(KeyCode::KeyG) {
        if debug.is_some() {
            commands.remove_resource::<DebugLevelGeometry>();
        } else {
            commands.insert_resource(DebugLevelGeometry::default());
        }
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        for project in &projects {
            commands.entity(project).insert(RespawnLdtk);
        }
    }
}
