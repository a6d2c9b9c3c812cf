//! Entity layer spawning.

use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use bevy_ldtkmap_assets::json::{EntityInstance, LayerInstance};

use crate::components::{LdtkEntity, LevelGeometry};
use crate::events::EntitySpawned;
use crate::fields::LdtkFields;
use crate::systems::SpawnContext;

/// Spawn one child entity per entity instance of an entity layer.
///
/// Each entity is placed at its pivot point, converted to level space.
///
/// # Returns
///
/// Vec of spawned entities
pub fn spawn_entity_layer(
    commands: &mut Commands,
    level_entity: Entity,
    layer: &LayerInstance,
    geometry: &LevelGeometry,
    context: &SpawnContext,
) -> Vec<Entity> {
    layer
        .entity_instances
        .iter()
        .map(|instance| {
            spawn_entity(
                commands,
                level_entity,
                ldtk_entity(instance),
                LdtkFields::from_instances(&instance.field_instances),
                Name::new(format!("Entity: {}", instance.identifier)),
                geometry.px_to_local(IVec2::from_array(instance.px)),
                context,
            )
        })
        .collect()
}

fn ldtk_entity(instance: &EntityInstance) -> LdtkEntity {
    LdtkEntity {
        identifier: instance.identifier.clone(),
        iid: instance.iid.clone(),
        size: Vec2::new(instance.width as f32, instance.height as f32),
        pivot: Vec2::from_array(instance.pivot),
        grid: IVec2::from_array(instance.grid),
        tags: instance.tags.clone(),
    }
}

/// Spawn a single LDtk entity with its registered components.
///
/// Attaches `LdtkEntity` and `LdtkFields`, then every component type and
/// handler registered for the identifier. Triggers `EntitySpawned`.
///
/// # Arguments
///
/// * `commands` - Bevy commands for entity spawning
/// * `level_entity` - Level the entity belongs to
/// * `entity` - Entity identity and box
/// * `fields` - Converted custom fields
/// * `name` - Entity name
/// * `translation` - Level-space position of the pivot
/// * `context` - Spawn context with the entity registry
pub fn spawn_entity(
    commands: &mut Commands,
    level_entity: Entity,
    entity: LdtkEntity,
    fields: LdtkFields,
    name: Name,
    translation: Vec2,
    context: &SpawnContext,
) -> Entity {
    let mut entity_cmd = commands.spawn((
        name,
        entity.clone(),
        fields.clone(),
        Transform::from_translation(translation.extend(0.0)),
    ));

    attach_registered(&mut entity_cmd, &entity, &fields, context);

    let entity_id = entity_cmd.id();

    commands.trigger(EntitySpawned {
        entity: entity_id,
        level_entity,
        identifier: entity.identifier,
        iid: entity.iid,
    });

    entity_id
}

/// Insert derived components and run handlers bound to the entity identifier.
fn attach_registered(
    entity_cmd: &mut EntityCommands,
    entity: &LdtkEntity,
    fields: &LdtkFields,
    context: &SpawnContext,
) {
    let registry = context.registry;

    if !registry.is_mapped(&entity.identifier) {
        if context.config.warn_unmapped_entities {
            warn!(
                "Nothing registered for LDtk entity '{}', spawning it bare",
                entity.identifier
            );
        }
        return;
    }

    for info in registry.components_for(&entity.identifier) {
        match (info.insert)(entity_cmd, fields) {
            Ok(()) => debug!(
                "Attached '{}' to entity '{}'",
                info.type_name, entity.identifier
            ),
            Err(e) => warn!(
                "Failed to build '{}' for entity '{}': {}",
                info.type_name, entity.identifier, e
            ),
        }
    }

    for handler in registry.handlers_for(&entity.identifier) {
        handler(entity_cmd, entity, fields);
    }
}
