//! Level spawning logic.

use bevy::prelude::*;
use bevy_ldtkmap_assets::json::Level;
use bevy_ldtkmap_assets::prelude::LdtkProjectAsset;

use crate::components::{
    LayersInLevel, LdtkLevel, LdtkLevelProjectOf, LevelBackground, LevelGeometry,
};
use crate::events::LevelSpawned;
use crate::fields::LdtkFields;
use crate::geometry::{level_translation, parse_hex_color};
use crate::spawn::spawn_layer;
use crate::systems::SpawnContext;

/// Spawn a level entity and its layers.
///
/// The level is placed at its LDtk world position with its origin at the
/// bottom-left corner. LDtk lists layers top-most first, so they are spawned
/// in reverse and the first spawned layer gets the lowest z.
///
/// # Returns
///
/// The level entity
pub fn spawn_level(
    commands: &mut Commands,
    project_entity: Entity,
    project: &LdtkProjectAsset,
    level: &Level,
    context: &SpawnContext,
) -> Entity {
    let geometry = LevelGeometry::new(level.px_wid, level.px_hei);
    let translation = level_translation(level.world_x, level.world_y, level.px_hei);

    let level_entity = commands
        .spawn((
            Name::new(format!("Level: {}", level.identifier)),
            LdtkLevel {
                identifier: level.identifier.clone(),
                iid: level.iid.clone(),
                uid: level.uid,
            },
            geometry.clone(),
            LdtkFields::from_instances(&level.field_instances),
            LdtkLevelProjectOf(project_entity),
            Transform::from_translation(translation.extend(0.0)),
        ))
        .id();

    let bg_color = level.bg_color.as_deref().unwrap_or(&project.project.bg_color);
    if let Some(color) = parse_hex_color(bg_color) {
        commands.entity(level_entity).insert(LevelBackground(color));
    }

    let mut layer_entities = Vec::new();
    let layers = level.layer_instances.as_deref().unwrap_or_default();
    for layer in layers.iter().rev() {
        let z = context.z_config.z_for(layer_entities.len());
        if let Some(layer_entity) =
            spawn_layer(commands, level_entity, layer, project, &geometry, z, context)
        {
            layer_entities.push(layer_entity);
        }
    }

    debug!(
        "Spawned level '{}' with {} layers",
        level.identifier,
        layer_entities.len()
    );

    commands
        .entity(level_entity)
        .insert(LayersInLevel(layer_entities.clone()))
        .add_children(&layer_entities);

    commands
        .entity(level_entity)
        .trigger(|entity| LevelSpawned { entity });

    level_entity
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::EntityCommands;
    use bevy::platform::collections::HashMap;
    use bevy_ldtkmap_assets::json::{
        EntityInstance, LayerInstance, LayerType, LdtkJson, TileInstance,
    };

    use super::*;
    use crate::components::{IntGridData, LdtkEntity, LdtkLayer, TileLayerData};
    use crate::plugin::{LayerZConfig, LdtkCoreConfig};
    use crate::registry::LdtkEntityRegistry;

    #[derive(Component)]
    struct Player;

    fn spawn_player(entity: &mut EntityCommands, _: &LdtkEntity, _: &LdtkFields) {
        entity.insert(Player);
    }

    fn project() -> LdtkProjectAsset {
        LdtkProjectAsset {
            project: LdtkJson {
                bg_color: "#40465B".to_string(),
                ..default()
            },
            tileset_images: HashMap::default(),
            external_levels: HashMap::default(),
        }
    }

    fn layer(identifier: &str, layer_type: LayerType) -> LayerInstance {
        LayerInstance {
            identifier: identifier.to_string(),
            layer_type,
            c_wid: 3,
            c_hei: 2,
            grid_size: 16,
            opacity: 1.0,
            visible: true,
            ..default()
        }
    }

    fn level() -> Level {
        let mut entities = layer("Entities", LayerType::Entities);
        entities.entity_instances.push(EntityInstance {
            identifier: "Player".to_string(),
            iid: "player-iid".to_string(),
            px: [24, 32],
            pivot: [0.5, 1.0],
            width: 16,
            height: 16,
            ..default()
        });

        let mut collisions = layer("Collisions", LayerType::IntGrid);
        collisions.int_grid_csv = vec![0, 0, 0, 1, 1, 1];
        collisions.auto_layer_tiles.push(TileInstance {
            px: [0, 16],
            a: 1.0,
            ..default()
        });

        let mut hidden = layer("Decorations", LayerType::Tiles);
        hidden.visible = false;

        Level {
            identifier: "Level_0".to_string(),
            iid: "level-iid".to_string(),
            world_y: 256,
            px_wid: 48,
            px_hei: 32,
            layer_instances: Some(vec![
                entities,
                collisions,
                layer("Fancy", LayerType::Unknown),
                hidden,
            ]),
            ..default()
        }
    }

    fn spawn(world: &mut World, registry: &LdtkEntityRegistry, config: &LdtkCoreConfig) -> Entity {
        let z_config = LayerZConfig::default();
        let context = SpawnContext::new(registry, config, &z_config);
        let project = project();
        let level = level();

        let project_entity = world.spawn_empty().id();
        let level_entity = {
            let mut commands = world.commands();
            spawn_level(&mut commands, project_entity, &project, &level, &context)
        };
        world.flush();
        level_entity
    }

    #[test]
    fn test_spawn_level_hierarchy() {
        let mut world = World::new();
        let mut registry = LdtkEntityRegistry::build();
        registry.register_handler("Player", spawn_player);
        let config = LdtkCoreConfig {
            warn_unmapped_entities: false,
            ..default()
        };

        let level_entity = spawn(&mut world, &registry, &config);

        let transform = world.get::<Transform>(level_entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, -288.0, 0.0));
        assert_eq!(
            world.get::<LdtkLevel>(level_entity).unwrap().identifier,
            "Level_0"
        );
        // No level color: falls back to the project's
        assert!(world.get::<LevelBackground>(level_entity).is_some());

        // The unknown and the hidden layers are skipped
        let layers = &world.get::<LayersInLevel>(level_entity).unwrap().0;
        assert_eq!(layers.len(), 2);

        // Spawned bottom-most first
        let collisions = layers[0];
        assert_eq!(world.get::<LdtkLayer>(collisions), Some(&LdtkLayer::IntGrid));
        assert_eq!(world.get::<Transform>(collisions).unwrap().translation.z, 0.0);
        let grid = world.get::<IntGridData>(collisions).unwrap();
        assert_eq!(grid.filled_count(), 3);
        // Row 0 is the top row
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(0, 1), Some(1));
        assert_eq!(world.get::<TileLayerData>(collisions).unwrap().tiles.len(), 1);

        let entities = layers[1];
        assert_eq!(world.get::<LdtkLayer>(entities), Some(&LdtkLayer::Entities));
        assert_eq!(world.get::<Transform>(entities).unwrap().translation.z, 1.0);

        let children = world.get::<Children>(entities).unwrap();
        assert_eq!(children.len(), 1);
        let player = children[0];
        assert_eq!(
            world.get::<Transform>(player).unwrap().translation.truncate(),
            Vec2::new(24.0, 0.0)
        );
        assert_eq!(world.get::<LdtkEntity>(player).unwrap().iid, "player-iid");
        assert!(world.get::<Player>(player).is_some());
    }

    #[test]
    fn test_spawn_hidden_layers() {
        let mut world = World::new();
        let registry = LdtkEntityRegistry::build();
        let config = LdtkCoreConfig {
            warn_unmapped_entities: false,
            spawn_hidden_layers: true,
            ..default()
        };

        let level_entity = spawn(&mut world, &registry, &config);

        let layers = &world.get::<LayersInLevel>(level_entity).unwrap().0;
        assert_eq!(layers.len(), 3);
        // Last in LDtk order, so bottom-most
        assert_eq!(world.get::<Visibility>(layers[0]), Some(&Visibility::Hidden));
        assert_eq!(world.get::<Visibility>(layers[1]), Some(&Visibility::Inherited));
    }
}
