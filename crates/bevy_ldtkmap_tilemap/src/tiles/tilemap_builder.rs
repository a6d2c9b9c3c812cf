//! Converts `TileLayerData` into `bevy_ecs_tilemap` structures.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::*;
use bevy_ldtkmap_core::components::{LdtkTile, TileLayerData, TilesetInfo};

/// Builds `bevy_ecs_tilemap` structures from Layer 2's `TileLayerData`.
///
/// LDtk auto-layers often stack several tiles in one cell, while a tilemap
/// holds a single tile per position. The layer is split with
/// [`TileLayerData::stacked`] and each stack becomes its own tilemap, drawn
/// in order just above the previous one.
pub struct TilemapBuilder;

impl TilemapBuilder {
    /// Build tilemap structures from tile layer data.
    ///
    /// Creates `bevy_ecs_tilemap` entities as children of the layer entity.
    ///
    /// # Arguments
    ///
    /// * `commands` - Command buffer for spawning entities
    /// * `layer_entity` - The layer entity to attach tilemaps to
    /// * `layer_identifier` - LDtk layer identifier, for logs
    /// * `tile_data` - Pre-processed tile data from Layer 2
    /// * `sublayer_z_step` - Z distance between stacked sub-layers
    pub fn build(
        commands: &mut Commands,
        layer_entity: Entity,
        layer_identifier: &str,
        tile_data: &TileLayerData,
        sublayer_z_step: f32,
    ) {
        let Some(tileset) = &tile_data.tileset else {
            warn!(
                "Layer '{}' has no tileset image, skipping tilemap creation",
                layer_identifier
            );
            return;
        };

        if tileset.tile_size == 0 || tile_data.cell_size == 0 {
            warn!(
                "Layer '{}' has a zero tile size, skipping tilemap creation",
                layer_identifier
            );
            return;
        }

        if tileset.padding > 0 {
            warn!(
                "Tileset {} has {}px padding, which bevy_ecs_tilemap ignores; tiles of layer '{}' may be offset",
                tileset.uid, tileset.padding, layer_identifier
            );
        }

        let stacks = tile_data.stacked();
        let placed: usize = stacks.iter().map(Vec::len).sum();
        if placed < tile_data.tiles.len() {
            warn!(
                "Skipped {} tiles outside the grid of layer '{}'",
                tile_data.tiles.len() - placed,
                layer_identifier
            );
        }

        if stacks.is_empty() {
            debug!("Layer '{}' has no tiles, skipping tilemap creation", layer_identifier);
            return;
        }

        for (index, stack) in stacks.iter().enumerate() {
            Self::create_sublayer(
                commands,
                layer_entity,
                tile_data,
                tileset,
                index,
                stack,
                sublayer_z_step,
            );
        }

        debug!(
            "Created {} tilemaps for layer '{}'",
            stacks.len(),
            layer_identifier
        );
    }

    /// Create a single tilemap for one stack of tiles.
    fn create_sublayer(
        commands: &mut Commands,
        layer_entity: Entity,
        tile_data: &TileLayerData,
        tileset: &TilesetInfo,
        index: usize,
        stack: &[(UVec2, &LdtkTile)],
        sublayer_z_step: f32,
    ) {
        let map_size = TilemapSize {
            x: tile_data.width,
            y: tile_data.height,
        };

        let tile_size = TilemapTileSize {
            x: tileset.tile_size as f32,
            y: tileset.tile_size as f32,
        };

        let grid_size = TilemapGridSize {
            x: tile_data.cell_size as f32,
            y: tile_data.cell_size as f32,
        };

        let mut tile_storage = TileStorage::empty(map_size);

        // Spawn empty tilemap entity first (following bevy_ecs_tilemap pattern)
        let tilemap_entity = commands.spawn_empty().id();
        commands.entity(layer_entity).add_child(tilemap_entity);

        let mut tile_entities = Vec::with_capacity(stack.len());
        for (cell, tile) in stack {
            let tile_pos = TilePos {
                x: cell.x,
                y: cell.y,
            };

            let tile_entity = commands
                .spawn(TileBundle {
                    position: tile_pos,
                    texture_index: TileTextureIndex(tile.tile_id),
                    tilemap_id: TilemapId(tilemap_entity),
                    flip: TileFlip {
                        x: tile.flip_x,
                        y: tile.flip_y,
                        d: false,
                    },
                    color: tile_color(tile_data.opacity, tile.opacity),
                    ..default()
                })
                .id();
            tile_storage.set(&tile_pos, tile_entity);
            tile_entities.push(tile_entity);
        }

        commands.entity(tilemap_entity).add_children(&tile_entities);

        commands.entity(tilemap_entity).insert((
            TilemapBundle {
                grid_size,
                size: map_size,
                storage: tile_storage,
                texture: TilemapTexture::Single(tileset.image.clone()),
                tile_size,
                spacing: TilemapSpacing {
                    x: tileset.spacing as f32,
                    y: tileset.spacing as f32,
                },
                map_type: TilemapType::Square,
                transform: Transform::from_translation(sublayer_translation(
                    tile_data,
                    index,
                    sublayer_z_step,
                )),
                ..default()
            },
            TilemapSublayer { index },
            Name::new(format!("Tilemap {index}")),
        ));
    }
}

/// Marks a tilemap built for one stack of a tile layer.
///
/// Index 0 holds the first tile of every cell and is drawn lowest.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilemapSublayer {
    pub index: usize,
}

/// Position of a sub-layer tilemap inside its layer.
///
/// `bevy_ecs_tilemap` centers `TilePos (0, 0)` on the tilemap origin, so the
/// grid's bottom-left corner is offset by half a cell.
pub(crate) fn sublayer_translation(tile_data: &TileLayerData, index: usize, z_step: f32) -> Vec3 {
    let half_cell = tile_data.cell_size as f32 / 2.0;
    let origin = tile_data.grid_origin();
    Vec3::new(
        origin.x + half_cell,
        origin.y + half_cell,
        index as f32 * z_step,
    )
}

pub(crate) fn tile_color(layer_opacity: f32, tile_opacity: f32) -> TileColor {
    TileColor(Color::WHITE.with_alpha((layer_opacity * tile_opacity).clamp(0.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(height: u32, level_height: f32) -> TileLayerData {
        TileLayerData {
            cell_size: 16,
            width: 4,
            height,
            level_height,
            opacity: 0.5,
            tileset: None,
            tiles: Vec::new(),
        }
    }

    #[test]
    fn test_sublayer_translation() {
        // Grid fills the level
        assert_eq!(
            sublayer_translation(&layer(2, 32.0), 0, 0.1),
            Vec3::new(8.0, 8.0, 0.0)
        );

        // Level taller than the grid: the grid hangs from the top
        assert_eq!(
            sublayer_translation(&layer(2, 48.0), 2, 0.25),
            Vec3::new(8.0, 24.0, 0.5)
        );
    }

    #[test]
    fn test_tile_color_combines_opacities() {
        assert_eq!(tile_color(0.5, 0.5).0.alpha(), 0.25);
        assert_eq!(tile_color(1.0, 1.0).0, Color::WHITE);
        assert_eq!(tile_color(2.0, 1.0).0.alpha(), 1.0);
    }
}
