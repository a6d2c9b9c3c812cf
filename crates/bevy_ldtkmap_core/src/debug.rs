//! Debug visualization for LDtk levels.

use bevy::prelude::*;

use crate::components::{IntGridData, LevelGeometry};

/// Resource to enable level geometry debug visualization.
///
/// Insert this resource to draw the bounds of every level and the filled
/// cells of every int-grid layer.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::debug::DebugLevelGeometry;
/// fn enable_debug(mut commands: Commands) {
///     commands.insert_resource(DebugLevelGeometry::default());
/// }
/// ```
#[derive(Resource, Debug, Clone)]
pub struct DebugLevelGeometry {
    /// Color for the level bounds rectangle
    pub bounds_color: Color,
    /// Color for filled int-grid cells, `None` to skip them
    pub int_grid_color: Option<Color>,
}

impl Default for DebugLevelGeometry {
    fn default() -> Self {
        Self {
            bounds_color: Color::srgba(0.0, 1.0, 0.0, 0.8),
            int_grid_color: Some(Color::srgba(1.0, 0.3, 0.3, 0.5)),
        }
    }
}

/// System that draws debug rectangles for level bounds and int-grid cells.
pub fn draw_level_geometry_debug(
    config: Res<DebugLevelGeometry>,
    level_query: Query<(&LevelGeometry, &GlobalTransform)>,
    grid_query: Query<(&IntGridData, &GlobalTransform)>,
    mut gizmos: Gizmos,
) {
    for (geometry, global_transform) in &level_query {
        let origin = global_transform.translation().truncate();
        gizmos.rect_2d(
            Isometry2d::from_translation(origin + geometry.center()),
            geometry.size_px,
            config.bounds_color,
        );
    }

    let Some(cell_color) = config.int_grid_color else {
        return;
    };
    for (grid, global_transform) in &grid_query {
        let origin = global_transform.translation().truncate();
        let size = Vec2::splat(grid.cell_size as f32);
        for (cell, _) in grid.iter_cells() {
            gizmos.rect_2d(
                Isometry2d::from_translation(origin + grid.cell_center(cell)),
                size,
                cell_color,
            );
        }
    }
}
