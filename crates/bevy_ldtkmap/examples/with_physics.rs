//! Example demonstrating `bevy_ldtkmap` with Avian2D physics integration.
//!
//! The unified plugin renders the project with `bevy_ecs_tilemap` and builds
//! colliders from int-grid layers and entities with a `body_type` field.
//!
//! Run with: `cargo run --example with_physics --features avian`

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_ldtkmap::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(
            BevyLdtkmapPlugin::default()
                .with_avian(PhysicsConfig::default().with_entity_body("Player", BodyType::Dynamic)),
        )
        .add_systems(Startup, setup)
        .add_systems(Update, respawn_on_r)
        .run();
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn(Camera2d);

    commands.spawn((
        LdtkProject {
            handle: asset_server.load("world.ldtk"),
        },
        LevelSelection::identifier("Level_0"),
    ));

    info!("Project loaded with physics integration!");
    info!("Non-zero int-grid cells are solid, press R to respawn.");
}

fn respawn_on_r(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    projects: Query<Entity, With<LdtkProject>>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        for project in &projects {
            commands.entity(project).insert(RespawnLdtk);
        }
    }
}
