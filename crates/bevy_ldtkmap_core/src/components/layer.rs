//! Layer components.

use bevy::prelude::*;
use bevy_ldtkmap_assets::csv::IntGridCsv;
use bevy_ldtkmap_assets::json::LayerType;

use crate::geometry::index_to_cell;

/// Layer type marker component.
///
/// Attached to layer entities to indicate what kind of LDtk layer they came from.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub enum LdtkLayer {
    /// Entity layer - has entity children
    Entities,
    /// Int-grid layer - has `IntGridData` (and `TileLayerData` when auto-tiled)
    IntGrid,
    /// Hand-placed tiles - has `TileLayerData`
    Tiles,
    /// Rule-placed tiles - has `TileLayerData`
    AutoLayer,
}

impl LdtkLayer {
    /// Map an LDtk layer type, `None` for types this crate doesn't handle.
    pub fn from_layer_type(layer_type: &LayerType) -> Option<Self> {
        match layer_type {
            LayerType::Entities => Some(Self::Entities),
            LayerType::IntGrid => Some(Self::IntGrid),
            LayerType::Tiles => Some(Self::Tiles),
            LayerType::AutoLayer => Some(Self::AutoLayer),
            LayerType::Unknown => None,
        }
    }
}

/// LDtk's unique instance id of the layer.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub struct LayerIid(pub String);

/// Grid dimensions of a layer.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LayerGeometry {
    /// Cell size in pixels
    pub cell_size: u32,
    /// Size in cells
    pub size: UVec2,
    pub opacity: f32,
}

/// Int-grid values attached to int-grid layer entities.
///
/// Individual cells are NOT spawned as entities; Layer 3 plugins decide what
/// a value means (collision, triggers, ...).
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::IntGridData;
/// fn count_walls(layers: Query<&IntGridData>) {
///     for grid in &layers {
///         let walls = grid.iter_cells().filter(|(_, value)| *value == 1).count();
///         info!("{walls} wall cells");
///     }
/// }
/// ```
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct IntGridData {
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    /// Cell size in pixels
    pub cell_size: u32,
    /// Level pixel height for coordinate conversion in Layer 3.
    /// Row 0 of the grid sits at the top of the level.
    pub level_height: f32,
    /// Flattened grid: index = row * width + col, `0` = empty
    pub values: Vec<i32>,
}

impl IntGridData {
    pub fn new(width: u32, height: u32, cell_size: u32, values: Vec<i32>) -> Self {
        Self {
            width,
            height,
            cell_size,
            level_height: (height * cell_size) as f32,
            values,
        }
    }

    /// Use a level height other than the grid's own pixel height.
    pub fn with_level_height(mut self, level_height: f32) -> Self {
        self.level_height = level_height;
        self
    }

    /// Build from a parsed int-grid CSV.
    pub fn from_csv(csv: &IntGridCsv, cell_size: u32) -> Self {
        Self::new(csv.width, csv.height, cell_size, csv.values.clone())
    }

    /// Value at `(col, row)`, `None` if out of bounds.
    pub fn get(&self, col: u32, row: u32) -> Option<i32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get((row * self.width + col) as usize).copied()
    }

    /// Iterate non-empty cells in index order.
    ///
    /// Returns `(cell, value)` tuples with `cell = (col, row)`, row 0 at the top.
    pub fn iter_cells(&self) -> impl Iterator<Item = (UVec2, i32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .filter_map(|(index, value)| Some((index_to_cell(index, self.width)?, *value)))
    }

    /// Layer-space center of a cell (y up).
    pub fn cell_center(&self, cell: UVec2) -> Vec2 {
        let size = self.cell_size as f32;
        Vec2::new(
            (cell.x as f32 + 0.5) * size,
            self.level_height - (cell.y as f32 + 0.5) * size,
        )
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.values.iter().filter(|value| **value != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> IntGridData {
        #[rustfmt::skip]
        let values = vec![
            0, 1, 0,
            2, 0, 1,
        ];
        IntGridData::new(3, 2, 16, values)
    }

    #[test]
    fn test_get() {
        let grid = grid();

        assert_eq!(grid.get(1, 0), Some(1));
        assert_eq!(grid.get(0, 1), Some(2));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_iter_cells_skips_empty() {
        let cells: Vec<_> = grid().iter_cells().collect();

        assert_eq!(
            cells,
            vec![
                (UVec2::new(1, 0), 1),
                (UVec2::new(0, 1), 2),
                (UVec2::new(2, 1), 1),
            ]
        );
        assert_eq!(grid().filled_count(), 3);
    }

    #[test]
    fn test_cell_center() {
        let grid = grid();
        assert_eq!(grid.cell_center(UVec2::new(0, 0)), Vec2::new(8.0, 24.0));

        // Level taller than the grid: row 0 still hugs the top
        let grid = grid.with_level_height(40.0);
        assert_eq!(grid.cell_center(UVec2::new(2, 1)), Vec2::new(40.0, 16.0));
    }

    #[test]
    fn test_from_csv() {
        let csv = IntGridCsv {
            width: 2,
            height: 1,
            values: vec![0, 1],
        };
        let grid = IntGridData::from_csv(&csv, 8);

        assert_eq!(grid.cell_size, 8);
        assert_eq!(grid.get(1, 0), Some(1));
    }

    #[test]
    fn test_layer_kind_mapping() {
        assert_eq!(
            LdtkLayer::from_layer_type(&LayerType::AutoLayer),
            Some(LdtkLayer::AutoLayer)
        );
        assert_eq!(LdtkLayer::from_layer_type(&LayerType::Unknown), None);
    }
}
