//! Basic physics example with debug visualization.
//!
//! This example demonstrates:
//! - Loading an LDtk project with an int-grid collision layer
//! - Merged compound colliders for solid int-grid cells
//! - Entity bodies from the `entity_bodies` table and `body_type` fields
//! - Debug gizmo visualization of physics colliders
//!
//! # Setup
//!
//! Create an LDtk project at `assets/ldtk/physics.ldtk` with:
//! - An int-grid layer named `Collisions` (value 1 = wall)
//! - A `Player` entity
//! - Any entity with a `body_type` enum field (values `Static`, `Dynamic`, `Kinematic`)

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_ldtkmap_assets::LdtkAssetsPlugin;
use bevy_ldtkmap_avian::prelude::*;
use bevy_ldtkmap_core::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .add_plugins(PhysicsPlugins::default().with_length_unit(16.0))
        .add_plugins(PhysicsDebugPlugin)
        .add_plugins(LdtkAssetsPlugin)
        .add_plugins(LdtkCorePlugin::default())
        .add_plugins(LdtkAvianPlugin::new(
            PhysicsConfig::default()
                .with_solid_values([1])
                .with_int_grid_layers(["Collisions"])
                .with_entity_body("Player", BodyType::Dynamic),
        ))
        .insert_resource(Gravity(Vec2::NEG_Y * 400.0))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((Camera2d, Transform::from_xyz(0.0, 0.0, 1000.0)));

    commands.spawn(LdtkProject {
        handle: asset_server.load("ldtk/physics.ldtk"),
    });

    info!("Basic Physics Example");
    info!("Walls: merged colliders from the 'Collisions' int-grid layer (value 1)");
    info!("Player: dynamic body from the entity_bodies table");
    info!("Other entities: opt in with a 'body_type' field");
}
