//! Int-grid collider generation.

use std::collections::HashSet;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_ldtkmap_core::components::IntGridData;
use bevy_ldtkmap_core::events::IntGridLayerSpawned;

use crate::config::{IntGridColliderConfig, PhysicsConfig, TileColliderStrategy};

/// Observer that generates physics colliders for int-grid layers.
///
/// When an int-grid layer is spawned, this observer:
/// 1. Checks if int-grid colliders are enabled for the layer in `PhysicsConfig`
/// 2. Selects the solid cells (`IntGridColliderConfig`)
/// 3. Generates colliders based on the configured strategy:
///    - `PerCell`: Individual child entities per cell
///    - `CompoundMerged`: Compound with rectangle merging (recommended)
///
/// The layer entity becomes a `RigidBody::Static` in both cases.
///
/// # Rectangle Merging Optimization
///
/// The `CompoundMerged` strategy uses a greedy algorithm to merge solid
/// cells into larger rectangles, dramatically reducing collider count.
pub fn on_int_grid_layer_spawned(
    trigger: On<IntGridLayerSpawned>,
    layer_query: Query<&IntGridData>,
    config: Res<PhysicsConfig>,
    mut commands: Commands,
) {
    let event = trigger.event();

    if !config.enable_int_grid_colliders || !config.int_grid.applies_to(&event.layer_identifier) {
        return;
    }

    let Ok(grid) = layer_query.get(event.entity) else {
        warn!(
            "IntGridLayerSpawned event for entity {:?} but no IntGridData component found",
            event.entity
        );
        return;
    };

    let cells = solid_cells(grid, &config.int_grid);
    if cells.is_empty() {
        debug!(
            "No solid cells in int-grid layer '{}'",
            event.layer_identifier
        );
        return;
    }

    let friction = Friction::new(config.default_friction);
    let restitution = Restitution::new(config.default_restitution);

    match config.tile_collider_strategy {
        TileColliderStrategy::PerCell => {
            let cell_size = grid.cell_size as f32;
            let cell_count = cells.len();
            let mut layer = commands.entity(event.entity);
            layer.insert(RigidBody::Static);
            layer.with_children(|parent| {
                for (col, row) in cells {
                    parent.spawn((
                        Name::new(format!("Collision ({col}, {row})")),
                        Collider::rectangle(cell_size, cell_size),
                        Transform::from_translation(
                            grid.cell_center(UVec2::new(col, row)).extend(0.0),
                        ),
                        friction,
                        restitution,
                        config.default_collision_layers,
                    ));
                }
            });

            debug!(
                "Generated {} cell colliders for layer '{}'",
                cell_count, event.layer_identifier
            );
        }

        TileColliderStrategy::CompoundMerged => {
            let cell_count = cells.len();
            let rects = merge_cells_into_rectangles(
                cells,
                Vec2::splat(grid.cell_size as f32),
                grid.level_height,
            );
            let rect_count = rects.len();

            let shapes = rects
                .into_iter()
                .map(|(center, size)| (center, 0.0, Collider::rectangle(size.x, size.y)))
                .collect::<Vec<_>>();

            commands.entity(event.entity).insert((
                RigidBody::Static,
                Collider::compound(shapes),
                friction,
                restitution,
                config.default_collision_layers,
            ));

            debug!(
                "Generated compound collider for layer '{}' (merged {} cells into {} rectangles)",
                event.layer_identifier, cell_count, rect_count
            );
        }
    }
}

/// Solid cells as `(col, row)`, row 0 at the top, in index order.
fn solid_cells(grid: &IntGridData, config: &IntGridColliderConfig) -> Vec<(u32, u32)> {
    grid.iter_cells()
        .filter(|(_, value)| config.is_solid(*value))
        .map(|(cell, _)| (cell.x, cell.y))
        .collect()
}

/// Merge grid cells into rectangles.
///
/// Uses a greedy horizontal-then-vertical approach:
/// 1. Sort positions by (row, col) for scanline processing
/// 2. For each unvisited position:
///    a. Extend horizontally as far as possible
///    b. Extend that strip downward (keeping width constant)
///    c. Mark all positions in the merged rectangle as visited
///
/// # Arguments
///
/// * `positions` - Grid positions `(col, row)` of cells to merge, row 0 at the top
/// * `cell_size` - Size of each cell in world units
/// * `top` - Layer-space y of the grid's top edge
///
/// # Returns
///
/// Vector of (`center_position`, size) for each merged rectangle, in layer space (y up).
fn merge_cells_into_rectangles(
    positions: Vec<(u32, u32)>,
    cell_size: Vec2,
    top: f32,
) -> Vec<(Vec2, Vec2)> {
    let mut grid: HashSet<(u32, u32)> = positions.into_iter().collect();
    let mut rects = Vec::new();

    let mut sorted_positions: Vec<_> = grid.iter().copied().collect();
    sorted_positions.sort_by_key(|&(x, y)| (y, x));

    for (start_x, start_y) in sorted_positions {
        if !grid.contains(&(start_x, start_y)) {
            continue; // Already merged
        }

        let mut width = 1;
        while grid.contains(&(start_x + width, start_y)) {
            width += 1;
        }

        let mut height = 1;
        'vertical: loop {
            for dx in 0..width {
                if !grid.contains(&(start_x + dx, start_y + height)) {
                    break 'vertical;
                }
            }
            height += 1;
        }

        for dy in 0..height {
            for dx in 0..width {
                grid.remove(&(start_x + dx, start_y + dy));
            }
        }

        let center_x = (start_x as f32 + width as f32 / 2.0) * cell_size.x;
        // start_y is the top row of the rectangle
        let center_y = top - (start_y as f32 + height as f32 / 2.0) * cell_size.y;

        rects.push((
            Vec2::new(center_x, center_y),
            Vec2::new(width as f32 * cell_size.x, height as f32 * cell_size.y),
        ));
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: Vec2 = Vec2::new(16.0, 16.0);

    fn spawn_grid(config: PhysicsConfig, layer_identifier: &str) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(config);
        world.add_observer(on_int_grid_layer_spawned);

        // Top row solid, bottom row half solid
        let layer = world
            .spawn(IntGridData::new(3, 2, 16, vec![1, 1, 1, 0, 2, 0]))
            .id();
        world.trigger(IntGridLayerSpawned {
            entity: layer,
            level_entity: Entity::PLACEHOLDER,
            layer_identifier: layer_identifier.to_string(),
        });
        world.flush();
        (world, layer)
    }

    #[test]
    fn test_compound_collider_on_layer() {
        let (world, layer) = spawn_grid(PhysicsConfig::default(), "Collisions");

        assert_eq!(world.get::<RigidBody>(layer), Some(&RigidBody::Static));
        assert!(world.get::<Collider>(layer).is_some());
        assert!(world.get::<Children>(layer).is_none());
    }

    #[test]
    fn test_per_cell_colliders_are_children() {
        let config = PhysicsConfig::default()
            .with_tile_collider_strategy(TileColliderStrategy::PerCell)
            .with_solid_values([1]);
        let (world, layer) = spawn_grid(config, "Collisions");

        assert_eq!(world.get::<RigidBody>(layer), Some(&RigidBody::Static));
        assert!(world.get::<Collider>(layer).is_none());

        let cells = world.get::<Children>(layer).unwrap().to_vec();
        assert_eq!(cells.len(), 3);
        for cell in cells {
            assert!(world.get::<Collider>(cell).is_some());
        }
    }

    #[test]
    fn test_layer_filter_skips_other_layers() {
        let config = PhysicsConfig::default().with_int_grid_layers(["Walls"]);
        let (world, layer) = spawn_grid(config, "Collisions");

        assert!(world.get::<RigidBody>(layer).is_none());
        assert!(world.get::<Collider>(layer).is_none());
    }

    #[test]
    fn test_merge_single_cell() {
        // Grid 10 cells tall
        let rects = merge_cells_into_rectangles(vec![(0, 0)], CELL, 160.0);

        assert_eq!(rects.len(), 1);
        // Top row: center_y = 160 - 0.5 * 16
        assert_eq!(rects[0].0, Vec2::new(8.0, 152.0));
        assert_eq!(rects[0].1, Vec2::new(16.0, 16.0));
    }

    #[test]
    fn test_merge_horizontal_strip() {
        let rects = merge_cells_into_rectangles(vec![(0, 0), (1, 0), (2, 0)], CELL, 160.0);

        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0, Vec2::new(24.0, 152.0));
        assert_eq!(rects[0].1, Vec2::new(48.0, 16.0));
    }

    #[test]
    fn test_merge_rectangle() {
        let positions = vec![(0, 0), (1, 0), (0, 1), (1, 1)];
        let rects = merge_cells_into_rectangles(positions, CELL, 160.0);

        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0, Vec2::new(16.0, 144.0));
        assert_eq!(rects[0].1, Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_merge_l_shape() {
        #[rustfmt::skip]
        let positions = vec![
            (0, 0), (1, 0), (2, 0),
            (0, 1), (0, 2),
        ];
        let rects = merge_cells_into_rectangles(positions, CELL, 160.0);

        assert_eq!(rects.len(), 2);
        let area: f32 = rects.iter().map(|(_, size)| size.x * size.y).sum();
        assert_eq!(area, 5.0 * 256.0);
    }

    #[test]
    fn test_solid_cells() {
        #[rustfmt::skip]
        let grid = IntGridData::new(3, 2, 8, vec![
            0, 1, 2,
            3, 0, 1,
        ]);

        let all = solid_cells(&grid, &IntGridColliderConfig::default());
        assert_eq!(all, vec![(1, 0), (2, 0), (0, 1), (2, 1)]);

        let walls = IntGridColliderConfig {
            solid_values: Some(vec![1]),
            layers: None,
        };
        assert_eq!(solid_cells(&grid, &walls), vec![(1, 0), (2, 1)]);
    }
}
