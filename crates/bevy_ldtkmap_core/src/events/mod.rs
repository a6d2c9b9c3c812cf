//! Event system for Layer 3 extension hooks.
//!
//! These events allow Layer 3 plugins (rendering, physics) and game code to
//! hook into the spawning process with observers.

use bevy::prelude::*;

/// Fired when an LDtk entity instance is spawned.
///
/// Use this event to:
/// - Attach gameplay components based on the entity identifier or fields
/// - Set up physics colliders from the entity box
///
/// # Example
///
/// ```ignore
/// fn on_entity_spawned(
///     trigger: On<EntitySpawned>,
///     fields: Query<&LdtkFields>,
///     mut commands: Commands,
/// ) {
///     let event = trigger.event();
///     if event.identifier == "Enemy"
///         && let Ok(fields) = fields.get(event.entity)
///         && fields.get_as::<bool>("boss").unwrap_or(false)
///     {
///         commands.entity(event.entity).insert(Boss);
///     }
/// }
/// ```
#[derive(Event, Debug, Clone)]
pub struct EntitySpawned {
    /// The spawned entity
    pub entity: Entity,
    /// The level it belongs to
    pub level_entity: Entity,
    /// LDtk entity identifier (e.g. `"Player"`)
    pub identifier: String,
    /// LDtk instance iid
    pub iid: String,
}

/// Fired when an entity layer and all its entities are spawned.
#[derive(Event, Debug, Clone)]
pub struct EntityLayerSpawned {
    /// The spawned layer entity
    pub entity: Entity,
    /// The parent level entity
    pub level_entity: Entity,
    /// LDtk layer identifier
    pub layer_identifier: String,
}

/// Fired when an int-grid layer is spawned with its `IntGridData`.
///
/// Layer 3 plugins use this to generate collision from the grid.
#[derive(Event, Debug, Clone)]
pub struct IntGridLayerSpawned {
    /// The spawned layer entity
    pub entity: Entity,
    /// The parent level entity
    pub level_entity: Entity,
    /// LDtk layer identifier
    pub layer_identifier: String,
}

/// Fired when a layer with tiles is spawned with its `TileLayerData`.
///
/// Also fired for int-grid layers that have auto-layer tiles.
#[derive(Event, Debug, Clone)]
pub struct TileLayerSpawned {
    /// The spawned layer entity
    pub entity: Entity,
    /// The parent level entity
    pub level_entity: Entity,
    /// LDtk layer identifier
    pub layer_identifier: String,
}

/// Fired when the composite image of a simplified level is spawned.
#[derive(Event, Debug, Clone)]
pub struct CompositeSpawned {
    /// The entity holding `CompositeImage`
    pub entity: Entity,
    /// The level entity
    pub level_entity: Entity,
}

/// Fired when a level's entity hierarchy is fully spawned.
///
/// Triggered for every level of a project and for simplified levels.
/// This is an `EntityEvent` that can be observed on the level entity.
///
/// # Example
///
/// ```ignore
/// commands.spawn(LdtkSimplifiedLevel { handle })
///     .observe(|trigger: On<LevelSpawned>| {
///         info!("Level ready: {:?}", trigger.event().entity);
///     });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct LevelSpawned {
    /// The level entity
    #[event_target]
    pub entity: Entity,
}

/// Fired when a project and all its selected levels are spawned.
///
/// This is an `EntityEvent` that can be observed on the project entity.
///
/// # Example
///
/// ```ignore
/// commands.spawn(LdtkProject { handle })
///     .observe(|trigger: On<ProjectSpawned>, mut readiness: ResMut<GameReadiness>| {
///         readiness.world_ready = true;
///     });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct ProjectSpawned {
    /// The project entity
    #[event_target]
    pub entity: Entity,
}
