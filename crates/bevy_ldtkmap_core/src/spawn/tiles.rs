//! Tile layer data building.

use bevy::prelude::*;
use bevy_ldtkmap_assets::json::LayerInstance;
use bevy_ldtkmap_assets::prelude::LdtkProjectAsset;

use crate::components::{LdtkTile, TileLayerData, TilesetInfo};

/// Build `TileLayerData` from a layer's tiles.
///
/// Resolves the layer's tileset definition and atlas image. A missing
/// tileset or image is logged and leaves `tileset` empty; the tiles are
/// still recorded.
///
/// # Arguments
///
/// * `layer` - Layer instance (`Tiles`, `AutoLayer`, or auto-tiled `IntGrid`)
/// * `project` - Project asset holding tileset definitions and images
/// * `level_height` - Pixel height of the parent level
pub fn build_tile_layer_data(
    layer: &LayerInstance,
    project: &LdtkProjectAsset,
    level_height: f32,
) -> TileLayerData {
    let tileset = layer.tileset_def_uid.and_then(|uid| {
        let Some(definition) = project.project.tileset(uid) else {
            warn!(
                "Layer '{}' references unknown tileset uid {}",
                layer.identifier, uid
            );
            return None;
        };
        let Some(image) = project.tileset_image(uid) else {
            warn!(
                "Tileset '{}' has no image, layer '{}' will not render",
                definition.identifier, layer.identifier
            );
            return None;
        };
        Some(TilesetInfo {
            uid,
            image: image.clone(),
            tile_size: definition.tile_grid_size.max(0) as u32,
            columns: definition.c_wid.max(0) as u32,
            rows: definition.c_hei.max(0) as u32,
            spacing: definition.spacing.max(0) as u32,
            padding: definition.padding.max(0) as u32,
        })
    });

    let tiles = layer
        .tiles()
        .iter()
        .map(|tile| LdtkTile {
            px: IVec2::from_array(tile.px),
            src: IVec2::from_array(tile.src),
            tile_id: tile.t.max(0) as u32,
            flip_x: tile.flip_x(),
            flip_y: tile.flip_y(),
            opacity: tile.a,
        })
        .collect();

    TileLayerData {
        cell_size: layer.grid_size.max(0) as u32,
        width: layer.c_wid.max(0) as u32,
        height: layer.c_hei.max(0) as u32,
        level_height,
        opacity: layer.opacity,
        tileset,
        tiles,
    }
}
