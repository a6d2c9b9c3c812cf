//! Observer for tile layer spawning events.

use bevy::prelude::*;
use bevy_ldtkmap_core::components::TileLayerData;
use bevy_ldtkmap_core::events::TileLayerSpawned;

use super::tilemap_builder::TilemapBuilder;
use crate::config::TilemapRenderConfig;

/// Observer that renders tile layers when spawned by Layer 2.
///
/// This is the main entry point for tile layer rendering. When Layer 2 spawns
/// a tile, auto or auto-tiled int-grid layer with `TileLayerData`, this observer:
/// 1. Reads the pre-processed tile data
/// 2. Splits overlapping tiles into stacked sub-layers
/// 3. Creates one `bevy_ecs_tilemap` tilemap per sub-layer as children
pub fn on_tile_layer_spawned(
    trigger: On<TileLayerSpawned>,
    layer_query: Query<&TileLayerData>,
    config: Res<TilemapRenderConfig>,
    mut commands: Commands,
) {
    let event = trigger.event();

    let Ok(tile_data) = layer_query.get(event.entity) else {
        warn!(
            "TileLayerSpawned event for entity {:?} but no TileLayerData component found",
            event.entity
        );
        return;
    };

    debug!(
        "Rendering tile layer '{}' ({:?}) with {} tiles",
        event.layer_identifier,
        event.entity,
        tile_data.tiles.len()
    );

    TilemapBuilder::build(
        &mut commands,
        event.entity,
        &event.layer_identifier,
        tile_data,
        config.sublayer_z_step,
    );
}
