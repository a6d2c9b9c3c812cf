//! Entity collider generation.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_ldtkmap_core::components::LdtkEntity;
use bevy_ldtkmap_core::events::EntitySpawned;
use bevy_ldtkmap_core::fields::{FromLdtkFields, LdtkFields};

use crate::config::PhysicsConfig;
use crate::properties::PhysicsSettings;

/// Observer that generates physics colliders for LDtk entities.
///
/// Entities are opt-in: only those with a `body_type` field, or whose
/// identifier is listed in `PhysicsConfig::entity_bodies`, get physics.
///
/// The observer:
/// 1. Reads `PhysicsSettings` from the entity's fields
/// 2. Resolves the body type, skipping entities that didn't opt in
/// 3. Creates a rectangle collider of the entity size, centred on the
///    entity box rather than its pivot
/// 4. Attaches physics components based on `PhysicsSettings` values
///
/// # Example in LDtk
///
/// ```text
/// Entity: Crate (pivot bottom-center)
///   body_type: Enum(BodyType) = Dynamic
///   friction: Float = 0.8
///   collision_groups: String = "props"
///   collision_mask: String = "ground,player"
/// ```
pub fn on_entity_spawned(
    trigger: On<EntitySpawned>,
    entity_query: Query<(&LdtkEntity, &LdtkFields)>,
    config: Res<PhysicsConfig>,
    mut commands: Commands,
) {
    let event = trigger.event();

    let Ok((entity, fields)) = entity_query.get(event.entity) else {
        return;
    };

    let settings = match PhysicsSettings::from_ldtk_fields(fields) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(
                "Invalid physics fields on entity '{}' ({}): {}",
                event.identifier, event.iid, e
            );
            return;
        }
    };

    let Some(body_type) = settings.resolve_body_type(&event.identifier, &config) else {
        return;
    };

    let Some(collider) = entity_collider(entity) else {
        warn!(
            "Entity '{}' ({}) has a body but no size, skipping collider",
            event.identifier, event.iid
        );
        return;
    };

    let rigid_body = body_type.to_rigid_body();
    let collision_layers = settings.collision_layers(&config);

    let mut entity_cmds = commands.entity(event.entity);
    entity_cmds.insert((
        rigid_body,
        collider,
        Friction::new(settings.friction(&config)).with_combine_rule(CoefficientCombine::Average),
        Restitution::new(settings.restitution(&config))
            .with_combine_rule(CoefficientCombine::Average),
        collision_layers,
    ));

    if rigid_body == RigidBody::Dynamic {
        entity_cmds.insert(ColliderDensity(settings.density(&config)));
    }

    if settings.is_sensor(&config) {
        entity_cmds.insert(Sensor);
    }

    // Optional components
    if let Some(linear_damping) = settings.linear_damping {
        entity_cmds.insert(LinearDamping(linear_damping));
    }
    if let Some(angular_damping) = settings.angular_damping {
        entity_cmds.insert(AngularDamping(angular_damping));
    }
    if let Some(gravity_scale) = settings.gravity_scale {
        entity_cmds.insert(GravityScale(gravity_scale));
    }
    if settings.lock_rotation {
        entity_cmds.insert(LockedAxes::ROTATION_LOCKED);
    }

    debug!(
        "Created collider for entity '{}' (body_type: {:?}, friction: {}, restitution: {})",
        event.identifier,
        body_type,
        settings.friction(&config),
        settings.restitution(&config),
    );

    entity_cmds.insert(settings);
}

/// Rectangle collider covering the entity box.
///
/// The entity's origin is its pivot, so off-center pivots wrap the
/// rectangle in a compound to shift it.
fn entity_collider(entity: &LdtkEntity) -> Option<Collider> {
    let (center, size) = collider_rect(entity)?;
    let rectangle = Collider::rectangle(size.x, size.y);
    if center == Vec2::ZERO {
        Some(rectangle)
    } else {
        Some(Collider::compound(vec![(center, 0.0, rectangle)]))
    }
}

/// Center (relative to the pivot) and size of the entity box.
fn collider_rect(entity: &LdtkEntity) -> Option<(Vec2, Vec2)> {
    if entity.size.x <= 0.0 || entity.size.y <= 0.0 {
        return None;
    }
    Some((entity.center_offset(), entity.size))
}

#[cfg(test)]
mod tests {
    use bevy_ldtkmap_core::fields::FieldValue;

    use super::*;
    use crate::properties::BodyType;

    fn spawn_with_fields(config: PhysicsConfig, fields: LdtkFields) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(config);
        world.add_observer(on_entity_spawned);

        let crate_entity = world
            .spawn((entity(Vec2::new(16.0, 16.0), Vec2::splat(0.5)), fields))
            .id();
        world.trigger(EntitySpawned {
            entity: crate_entity,
            level_entity: Entity::PLACEHOLDER,
            identifier: "Crate".to_string(),
            iid: "crate-iid".to_string(),
        });
        world.flush();
        (world, crate_entity)
    }

    #[test]
    fn test_body_type_field_adds_physics() {
        let mut fields = LdtkFields::default();
        fields.insert("body_type", FieldValue::Enum("Dynamic".into()));
        fields.insert("is_sensor", FieldValue::Bool(true));
        fields.insert("lock_rotation", FieldValue::Bool(true));

        let (world, crate_entity) = spawn_with_fields(PhysicsConfig::default(), fields);

        assert_eq!(world.get::<RigidBody>(crate_entity), Some(&RigidBody::Dynamic));
        assert!(world.get::<Collider>(crate_entity).is_some());
        assert!(world.get::<Sensor>(crate_entity).is_some());
        assert!(world.get::<LockedAxes>(crate_entity).is_some());
        assert_eq!(
            world.get::<PhysicsSettings>(crate_entity).unwrap().body_type,
            Some(BodyType::Dynamic)
        );
    }

    #[test]
    fn test_config_body_applies_without_field() {
        let config = PhysicsConfig::default().with_entity_body("Crate", BodyType::Static);

        let (world, crate_entity) = spawn_with_fields(config, LdtkFields::default());

        assert_eq!(world.get::<RigidBody>(crate_entity), Some(&RigidBody::Static));
        assert!(world.get::<Sensor>(crate_entity).is_none());
    }

    #[test]
    fn test_entity_without_body_is_untouched() {
        let (world, crate_entity) =
            spawn_with_fields(PhysicsConfig::default(), LdtkFields::default());

        assert!(world.get::<RigidBody>(crate_entity).is_none());
        assert!(world.get::<Collider>(crate_entity).is_none());
        assert!(world.get::<PhysicsSettings>(crate_entity).is_none());
    }

    fn entity(size: Vec2, pivot: Vec2) -> LdtkEntity {
        LdtkEntity {
            identifier: "Crate".to_string(),
            iid: "crate-iid".to_string(),
            size,
            pivot,
            grid: IVec2::ZERO,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_collider_rect_follows_pivot() {
        let centered = entity(Vec2::new(16.0, 32.0), Vec2::splat(0.5));
        assert_eq!(
            collider_rect(&centered),
            Some((Vec2::ZERO, Vec2::new(16.0, 32.0)))
        );

        // Bottom-center pivot: the box is above the origin
        let feet = entity(Vec2::new(16.0, 32.0), Vec2::new(0.5, 1.0));
        assert_eq!(
            collider_rect(&feet),
            Some((Vec2::new(0.0, 16.0), Vec2::new(16.0, 32.0)))
        );

        // Top-left pivot: right and down
        let corner = entity(Vec2::new(16.0, 32.0), Vec2::ZERO);
        assert_eq!(
            collider_rect(&corner),
            Some((Vec2::new(8.0, -16.0), Vec2::new(16.0, 32.0)))
        );
    }

    #[test]
    fn test_zero_size_has_no_collider() {
        assert_eq!(collider_rect(&entity(Vec2::new(0.0, 8.0), Vec2::ZERO)), None);
    }
}
