//! Spawning for levels from the "super simple export".

use bevy::prelude::*;
use bevy_ldtkmap_assets::csv::IntGridCsv;
use bevy_ldtkmap_assets::prelude::{
    LdtkSimplifiedLevelAsset, LdtkSimplifiedWorldAsset, SimplifiedEntity,
};

use crate::components::{
    CompositeImage, IntGridData, LayerGeometry, LayersInLevel, LdtkEntity, LdtkLayer,
    LdtkLayerLevelOf, LdtkLevel, LdtkLevelProjectOf, LevelBackground, LevelGeometry,
    LevelsInProject,
};
use crate::events::{
    CompositeSpawned, EntityLayerSpawned, IntGridLayerSpawned, LevelSpawned,
};
use crate::fields::LdtkFields;
use crate::geometry::{level_translation, parse_hex_color};
use crate::spawn::spawn_entity;
use crate::systems::SpawnContext;

/// Layer identifier given to the collision grid read from `Collisions.csv`.
pub const COLLISIONS_LAYER: &str = "Collisions";

/// Layer identifier given to the entities of a simplified level.
pub const ENTITIES_LAYER: &str = "Entities";

/// Spawn a simplified level onto `level_entity`.
///
/// The level entity is moved to the level's world position (keeping its z)
/// and receives, bottom to top:
/// - the composite image, centred on the level (when it loaded)
/// - a `Collisions` int-grid layer (when `Collisions.csv` exists)
/// - an `Entities` layer with entities named `LDtk_{identifier}_{n}`,
///   numbered in export order
///
/// `entity_counter` is the next `n`. It is advanced past this level's
/// entities, so a world can carry it from one level to the next.
pub fn spawn_simplified_level(
    commands: &mut Commands,
    level_entity: Entity,
    asset: &LdtkSimplifiedLevelAsset,
    composite_loaded: bool,
    root_transform: &Transform,
    entity_counter: &mut usize,
    context: &SpawnContext,
) {
    let data = &asset.data;
    let geometry = LevelGeometry::new(data.width, data.height);
    let translation = level_translation(data.x, data.y, data.height);

    commands.entity(level_entity).insert((
        Name::new(format!("Level: {}", data.identifier)),
        LdtkLevel {
            identifier: data.identifier.clone(),
            iid: data.unique_identifer.clone(),
            uid: 0,
        },
        geometry.clone(),
        LdtkFields::from_untyped(&data.custom_fields),
        Transform {
            translation: translation.extend(root_transform.translation.z),
            ..*root_transform
        },
    ));
    if let Some(color) = parse_hex_color(&data.bg_color) {
        commands.entity(level_entity).insert(LevelBackground(color));
    }

    let mut children = Vec::new();
    let mut layers = Vec::new();

    if composite_loaded {
        let composite = commands
            .spawn((
                Name::new("Composite"),
                CompositeImage {
                    image: asset.composite.clone(),
                    size: geometry.size_px,
                },
                Transform::from_translation(
                    geometry.center().extend(context.z_config.z_for(0)),
                ),
            ))
            .id();
        children.push(composite);
        commands.trigger(CompositeSpawned {
            entity: composite,
            level_entity,
        });
    } else {
        warn!(
            "Missing composite image for level '{}', spawning without it",
            data.identifier
        );
    }

    let cell_size = asset
        .collisions
        .as_ref()
        .map_or(context.config.simplified_grid_size, |csv| {
            collision_cell_size(csv, data.width, context.config.simplified_grid_size)
        })
        .max(1);

    match &asset.collisions {
        Some(csv) => {
            let grid = IntGridData::from_csv(csv, cell_size).with_level_height(geometry.size_px.y);
            let collisions = commands
                .spawn((
                    LdtkLayer::IntGrid,
                    LayerGeometry {
                        cell_size,
                        size: UVec2::new(grid.width, grid.height),
                        opacity: 1.0,
                    },
                    grid,
                    LdtkLayerLevelOf(level_entity),
                    Transform::from_xyz(0.0, 0.0, context.z_config.z_for(1)),
                    Name::new(format!("Layer: {COLLISIONS_LAYER}")),
                ))
                .id();
            layers.push(collisions);
            commands.trigger(IntGridLayerSpawned {
                entity: collisions,
                level_entity,
                layer_identifier: COLLISIONS_LAYER.to_string(),
            });
        }
        None => info!(
            "Level '{}' has no collisions, skipping them",
            data.identifier
        ),
    }

    let entities_layer = commands
        .spawn((
            LdtkLayer::Entities,
            LdtkLayerLevelOf(level_entity),
            Transform::from_xyz(0.0, 0.0, context.z_config.z_for(2)),
            Name::new(format!("Layer: {ENTITIES_LAYER}")),
        ))
        .id();

    let entity_children: Vec<Entity> = data
        .entities_in_export_order()
        .map(|entity| {
            let name = Name::new(format!("LDtk_{}_{}", entity.id, *entity_counter));
            *entity_counter += 1;
            spawn_entity(
                commands,
                level_entity,
                simplified_entity(entity, cell_size as i32),
                LdtkFields::from_untyped(&entity.custom_fields),
                name,
                geometry.px_to_local(IVec2::new(entity.x, entity.y)),
                context,
            )
        })
        .collect();
    if !entity_children.is_empty() {
        commands.entity(entities_layer).add_children(&entity_children);
    }
    commands.trigger(EntityLayerSpawned {
        entity: entities_layer,
        level_entity,
        layer_identifier: ENTITIES_LAYER.to_string(),
    });
    layers.push(entities_layer);

    debug!(
        "Spawned simplified level '{}' with {} entities",
        data.identifier,
        entity_children.len()
    );

    children.extend(&layers);
    commands
        .entity(level_entity)
        .insert(LayersInLevel(layers))
        .add_children(&children);

    commands
        .entity(level_entity)
        .trigger(|entity| LevelSpawned { entity });
}

/// Spawn every level of a simplified world as a child of `world_entity`.
///
/// Levels are spawned in project order and share one entity counter, so
/// entity names are unique across the world. Levels whose `data.json` isn't
/// available are logged and skipped.
///
/// # Returns
///
/// The spawned level entities, in project order.
pub fn spawn_simplified_world(
    commands: &mut Commands,
    world_entity: Entity,
    world: &LdtkSimplifiedWorldAsset,
    level_assets: &Assets<LdtkSimplifiedLevelAsset>,
    is_composite_loaded: impl Fn(&Handle<Image>) -> bool,
    context: &SpawnContext,
) -> Vec<Entity> {
    let mut entity_counter = 0;
    let mut level_entities = Vec::new();

    for level in &world.levels {
        let Some(level_asset) = level_assets.get(&level.handle) else {
            warn!(
                "Level '{}' has no data.json (missing or failed to load), skipping",
                level.identifier
            );
            continue;
        };

        let level_entity = commands
            .spawn((LdtkLevelProjectOf(world_entity), Transform::default()))
            .id();
        spawn_simplified_level(
            commands,
            level_entity,
            level_asset,
            is_composite_loaded(&level_asset.composite),
            &Transform::IDENTITY,
            &mut entity_counter,
            context,
        );
        level_entities.push(level_entity);
    }

    commands
        .entity(world_entity)
        .insert(LevelsInProject(level_entities.clone()))
        .add_children(&level_entities);

    level_entities
}

/// The export doesn't carry a grid size: derive it from the level width.
fn collision_cell_size(csv: &IntGridCsv, level_width: i32, fallback: u32) -> u32 {
    let level_width = level_width.max(0) as u32;
    if csv.width > 0 && level_width > 0 && level_width % csv.width == 0 {
        level_width / csv.width
    } else {
        fallback
    }
}

/// Simplified exports only give the entity position; treat it as the top-left corner.
fn simplified_entity(entity: &SimplifiedEntity, cell_size: i32) -> LdtkEntity {
    LdtkEntity {
        identifier: entity.id.clone(),
        iid: entity.iid.clone(),
        size: Vec2::new(entity.width as f32, entity.height as f32),
        pivot: Vec2::ZERO,
        grid: IVec2::new(entity.x / cell_size, entity.y / cell_size),
        tags: Vec::new(),
    }
}
