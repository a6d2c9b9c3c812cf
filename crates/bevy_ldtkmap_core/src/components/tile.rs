//! Tile layer data components.
//!
//! Individual tiles are NOT spawned as entities. Tile data is stored in the
//! `TileLayerData` component attached to tile layer entities.

use bevy::prelude::*;

/// Tileset atlas information resolved from the project definitions.
#[derive(Debug, Clone, Reflect)]
pub struct TilesetInfo {
    /// Tileset definition uid
    pub uid: i32,
    /// Atlas image
    pub image: Handle<Image>,
    /// Size of one atlas tile in pixels
    pub tile_size: u32,
    /// Atlas size in tiles
    pub columns: u32,
    pub rows: u32,
    /// Pixels between tiles
    pub spacing: u32,
    /// Pixels around the atlas border
    pub padding: u32,
}

/// One placed tile (NOT a component, stored in `TileLayerData`).
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct LdtkTile {
    /// Destination in layer pixel space (top-left of the tile, y down)
    pub px: IVec2,
    /// Source position in the atlas, in pixels
    pub src: IVec2,
    /// Tile id in the tileset
    pub tile_id: u32,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Tile opacity (`a` in LDtk)
    pub opacity: f32,
}

/// Tiles of a `Tiles` or `AutoLayer` layer (or the auto-tiles of an int-grid).
///
/// Layer 3 rendering plugins decide how to render this.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::TileLayerData;
/// fn log_tiles(layer_query: Query<&TileLayerData>) {
///     for tile_data in &layer_query {
///         for tile in &tile_data.tiles {
///             if let Some(cell) = tile_data.cell_of(tile) {
///                 info!("Tile {} at {:?}", tile.tile_id, cell);
///             }
///         }
///     }
/// }
/// ```
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TileLayerData {
    /// Cell size in pixels
    pub cell_size: u32,
    /// Layer width in cells
    pub width: u32,
    /// Layer height in cells
    pub height: u32,
    /// Level pixel height; the grid's top row sits at the top of the level
    pub level_height: f32,
    /// Layer opacity
    pub opacity: f32,
    /// `None` when the layer has no tileset or its image isn't available
    pub tileset: Option<TilesetInfo>,
    /// Tiles in LDtk draw order (later tiles draw over earlier ones)
    pub tiles: Vec<LdtkTile>,
}

impl TileLayerData {
    /// Layer-space position of the grid's bottom-left corner.
    pub fn grid_origin(&self) -> Vec2 {
        Vec2::new(0.0, self.level_height - (self.height * self.cell_size) as f32)
    }

    /// Grid cell of a tile with row 0 at the bottom (y up).
    ///
    /// Returns `None` for tiles placed off the layer grid.
    pub fn cell_of(&self, tile: &LdtkTile) -> Option<UVec2> {
        if self.cell_size == 0 || tile.px.x < 0 || tile.px.y < 0 {
            return None;
        }
        let col = tile.px.x as u32 / self.cell_size;
        let row_down = tile.px.y as u32 / self.cell_size;
        if col >= self.width || row_down >= self.height {
            return None;
        }
        Some(UVec2::new(col, self.height - 1 - row_down))
    }

    /// Split tiles into stacks holding at most one tile per cell.
    ///
    /// Auto-layers routinely place several tiles in the same cell. Stack 0 holds
    /// the first tile of every cell, stack 1 the second, and so on, so rendering
    /// the stacks bottom-up keeps LDtk's draw order. Off-grid tiles are dropped.
    pub fn stacked(&self) -> Vec<Vec<(UVec2, &LdtkTile)>> {
        let mut depth = vec![0usize; (self.width * self.height) as usize];
        let mut stacks: Vec<Vec<(UVec2, &LdtkTile)>> = Vec::new();

        for tile in &self.tiles {
            let Some(cell) = self.cell_of(tile) else {
                continue;
            };
            let slot = &mut depth[(cell.y * self.width + cell.x) as usize];
            if *slot == stacks.len() {
                stacks.push(Vec::new());
            }
            stacks[*slot].push((cell, tile));
            *slot += 1;
        }

        stacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: i32, y: i32, id: u32) -> LdtkTile {
        LdtkTile {
            px: IVec2::new(x, y),
            src: IVec2::ZERO,
            tile_id: id,
            flip_x: false,
            flip_y: false,
            opacity: 1.0,
        }
    }

    fn layer(tiles: Vec<LdtkTile>) -> TileLayerData {
        TileLayerData {
            cell_size: 16,
            width: 4,
            height: 2,
            level_height: 40.0,
            opacity: 1.0,
            tileset: None,
            tiles,
        }
    }

    #[test]
    fn test_cell_of_flips_rows() {
        let data = layer(vec![]);

        // Top row in LDtk is the last row in Bevy
        assert_eq!(data.cell_of(&tile(0, 0, 0)), Some(UVec2::new(0, 1)));
        assert_eq!(data.cell_of(&tile(48, 16, 0)), Some(UVec2::new(3, 0)));
        assert_eq!(data.cell_of(&tile(64, 0, 0)), None);
        assert_eq!(data.cell_of(&tile(-16, 0, 0)), None);
    }

    #[test]
    fn test_grid_origin() {
        assert_eq!(layer(vec![]).grid_origin(), Vec2::new(0.0, 8.0));
    }

    #[test]
    fn test_stacked_keeps_draw_order() {
        let data = layer(vec![
            tile(0, 0, 1),
            tile(16, 0, 2),
            tile(0, 0, 3),
            tile(0, 0, 4),
            tile(200, 0, 5),
        ]);

        let stacks = data.stacked();

        assert_eq!(stacks.len(), 3);
        let ids: Vec<Vec<u32>> = stacks
            .iter()
            .map(|stack| stack.iter().map(|(_, t)| t.tile_id).collect())
            .collect();
        assert_eq!(ids, vec![vec![1, 2], vec![3], vec![4]]);
    }
}
