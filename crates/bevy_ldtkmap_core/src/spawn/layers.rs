//! Layer spawning dispatcher.

use bevy::prelude::*;
use bevy_ldtkmap_assets::json::LayerInstance;
use bevy_ldtkmap_assets::prelude::LdtkProjectAsset;

use crate::components::{
    IntGridData, LayerGeometry, LayerIid, LdtkLayer, LdtkLayerLevelOf, LevelGeometry,
};
use crate::events::{EntityLayerSpawned, IntGridLayerSpawned, TileLayerSpawned};
use crate::spawn::{build_tile_layer_data, spawn_entity_layer};
use crate::systems::SpawnContext;

/// Spawn a single layer entity with appropriate components.
///
/// Dispatches on the LDtk layer type and triggers the matching layer event
/// for Layer 3 integration via observers.
///
/// # Arguments
///
/// * `commands` - Bevy commands for entity spawning
/// * `level_entity` - Parent level entity (for relationship)
/// * `layer` - The layer instance from the level
/// * `project` - Project asset, for tileset lookups
/// * `geometry` - Geometry of the parent level
/// * `z` - Z value of the layer inside the level
/// * `context` - Spawn context
///
/// # Returns
///
/// The spawned layer entity, or `None` for hidden or unknown layers
pub fn spawn_layer(
    commands: &mut Commands,
    level_entity: Entity,
    layer: &LayerInstance,
    project: &LdtkProjectAsset,
    geometry: &LevelGeometry,
    z: f32,
    context: &SpawnContext,
) -> Option<Entity> {
    let Some(kind) = LdtkLayer::from_layer_type(&layer.layer_type) else {
        warn!(
            "Unknown layer type for layer '{}', skipping",
            layer.identifier
        );
        return None;
    };

    if !layer.visible && !context.config.spawn_hidden_layers {
        debug!("Layer '{}' is hidden, skipping", layer.identifier);
        return None;
    }

    let transform = Transform::from_xyz(
        layer.px_total_offset_x as f32,
        -layer.px_total_offset_y as f32, // Invert Y for LDtk's Y-down to Bevy's Y-up
        z,
    );
    let visibility = if layer.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    let layer_entity = commands
        .spawn((
            kind,
            LayerIid(layer.iid.clone()),
            LayerGeometry {
                cell_size: layer.grid_size.max(0) as u32,
                size: UVec2::new(layer.c_wid.max(0) as u32, layer.c_hei.max(0) as u32),
                opacity: layer.opacity,
            },
            LdtkLayerLevelOf(level_entity),
            transform,
            visibility,
            Name::new(format!("Layer: {}", layer.identifier)),
        ))
        .id();

    match kind {
        LdtkLayer::Entities => {
            let entity_entities =
                spawn_entity_layer(commands, level_entity, layer, geometry, context);
            if !entity_entities.is_empty() {
                commands.entity(layer_entity).add_children(&entity_entities);
            }

            commands.trigger(EntityLayerSpawned {
                entity: layer_entity,
                level_entity,
                layer_identifier: layer.identifier.clone(),
            });
        }

        LdtkLayer::IntGrid => {
            let grid = IntGridData::new(
                layer.c_wid.max(0) as u32,
                layer.c_hei.max(0) as u32,
                layer.grid_size.max(0) as u32,
                layer.int_grid_csv.clone(),
            )
            .with_level_height(geometry.size_px.y);
            commands.entity(layer_entity).insert(grid);

            commands.trigger(IntGridLayerSpawned {
                entity: layer_entity,
                level_entity,
                layer_identifier: layer.identifier.clone(),
            });

            // Int-grid layers can carry auto-layer rules
            if !layer.auto_layer_tiles.is_empty() {
                insert_tiles(commands, layer_entity, level_entity, layer, project, geometry);
            }
        }

        LdtkLayer::Tiles | LdtkLayer::AutoLayer => {
            insert_tiles(commands, layer_entity, level_entity, layer, project, geometry);
        }
    }

    Some(layer_entity)
}

fn insert_tiles(
    commands: &mut Commands,
    layer_entity: Entity,
    level_entity: Entity,
    layer: &LayerInstance,
    project: &LdtkProjectAsset,
    geometry: &LevelGeometry,
) {
    let tile_data = build_tile_layer_data(layer, project, geometry.size_px.y);
    commands.entity(layer_entity).insert(tile_data);

    commands.trigger(TileLayerSpawned {
        entity: layer_entity,
        level_entity,
        layer_identifier: layer.identifier.clone(),
    });
}
