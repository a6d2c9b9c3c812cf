//! Example demonstrating the field-to-component workflow.
//!
//! This example shows:
//! - Binding components to entity identifiers with `#[derive(LdtkFields)]`
//! - Reading LDtk enum fields with `#[derive(LdtkEnum)]`
//! - Registering a handler function for an identifier
//! - Reacting to `EntitySpawned` with an observer
//! - Reading raw fields via `LdtkFields`
//!
//! Run with `cargo run --example custom_components` and place an LDtk project
//! at `assets/world.ldtk` with `Player`, `Enemy` and `Chest` entities.

use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use bevy_ldtkmap_assets::LdtkAssetsPlugin;
use bevy_ldtkmap_core::prelude::*;
use bevy_ldtkmap_core::prelude::EntityRef;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(LdtkAssetsPlugin)
        .add_plugins(LdtkCorePlugin::default())
        .register_type::<Chest>()
        .register_ldtk_entity("Player", spawn_player)
        .add_systems(Startup, setup)
        .add_systems(Update, (log_enemies, log_chests))
        .add_observer(on_entity_spawned)
        .run();
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn(Camera2d);
    commands.spawn(LdtkProject {
        handle: asset_server.load("world.ldtk"),
    });
}

#[derive(Component)]
struct Player;

fn spawn_player(entity: &mut EntityCommands, ldtk: &LdtkEntity, fields: &LdtkFields) {
    let lives = fields.get_as::<i32>("lives").unwrap_or(3);
    info!("Player '{}' starts with {} lives", ldtk.iid, lives);
    entity.insert(Player);
}

#[derive(LdtkEnum, Debug, Clone, Copy, PartialEq, Default)]
enum EnemyKind {
    #[default]
    Slime,
    Bat,
    #[ldtk(name = "Skeleton_archer")]
    Archer,
}

/// Inserted on every `Enemy` entity.
#[derive(Component, LdtkFields, Debug)]
#[ldtk(entity = "Enemy")]
struct Enemy {
    kind: EnemyKind,
    #[ldtk(default = 1)]
    damage: i32,
    #[ldtk(name = "patrol_speed", default = 40.0)]
    speed: f32,
    target: Option<EntityRef>,
}

/// Inserted on every `Chest` entity.
#[derive(Component, Reflect, LdtkFields, Debug)]
#[reflect(Component)]
#[ldtk(entity = "Chest")]
struct Chest {
    #[ldtk(default)]
    gold: i32,
    #[ldtk(default)]
    loot: Vec<String>,
    #[ldtk(skip)]
    opened: bool,
}

fn log_enemies(enemies: Query<(&Enemy, &Transform), Added<Enemy>>) {
    for (enemy, transform) in &enemies {
        info!(
            "{:?} at {:?}: damage {}, speed {}, target {:?}",
            enemy.kind, transform.translation, enemy.damage, enemy.speed, enemy.target
        );
    }
}

fn log_chests(chests: Query<&Chest, Added<Chest>>) {
    for chest in &chests {
        info!(
            "Chest with {} gold and {} items (opened: {})",
            chest.gold,
            chest.loot.len(),
            chest.opened
        );
    }
}

fn on_entity_spawned(trigger: On<EntitySpawned>, fields: Query<&LdtkFields>) {
    let event = trigger.event();
    let Ok(fields) = fields.get(event.entity) else {
        return;
    };

    debug!(
        "Spawned '{}' ({}) with {} fields",
        event.identifier,
        event.iid,
        fields.len()
    );
    for (name, value) in fields.iter() {
        debug!("  {}: {}", name, value.kind());
    }
}
