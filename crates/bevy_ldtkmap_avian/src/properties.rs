//! Physics settings read from LDtk entity fields.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_ldtkmap_macros::{LdtkEnum, LdtkFields};

use crate::config::PhysicsConfig;

/// Physics settings for one LDtk entity, read from its fields.
///
/// Add any of these fields to an entity definition in LDtk; missing or null
/// fields fall back to the `PhysicsConfig` defaults.
///
/// # Example in LDtk
///
/// ```text
/// Entity: Crate
///   body_type: Enum(BodyType) = Dynamic
///   friction: Float = 0.8
///   restitution: Float = 0.3
///   collision_groups: String = "props"
///   collision_mask: String = "ground,player"
/// ```
///
/// Field names match the struct fields below. Float fields accept LDtk
/// `Int` values too. `lock_rotation` and the damping and gravity fields only
/// matter for dynamic bodies.
#[derive(Component, Reflect, LdtkFields, Default, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct PhysicsSettings {
    /// Rigid body type. `None` defers to `PhysicsConfig::entity_bodies`.
    pub body_type: Option<BodyType>,

    pub friction: Option<f32>,

    pub restitution: Option<f32>,

    pub density: Option<f32>,

    /// Group names passed to `PhysicsConfig::collision_layers_fn`.
    #[ldtk(default)]
    pub collision_groups: String,

    /// Mask names passed to `PhysicsConfig::collision_layers_fn`.
    #[ldtk(default)]
    pub collision_mask: String,

    pub is_sensor: Option<bool>,

    pub linear_damping: Option<f32>,

    pub angular_damping: Option<f32>,

    pub gravity_scale: Option<f32>,

    #[ldtk(default)]
    pub lock_rotation: bool,
}

impl PhysicsSettings {
    /// Body type for an entity: its own field first, then the config table.
    ///
    /// `None` means the entity doesn't get physics.
    pub fn resolve_body_type(&self, identifier: &str, config: &PhysicsConfig) -> Option<BodyType> {
        self.body_type
            .or_else(|| config.entity_bodies.get(identifier).copied())
    }

    pub fn friction(&self, config: &PhysicsConfig) -> f32 {
        self.friction.unwrap_or(config.default_friction)
    }

    pub fn restitution(&self, config: &PhysicsConfig) -> f32 {
        self.restitution.unwrap_or(config.default_restitution)
    }

    pub fn density(&self, config: &PhysicsConfig) -> f32 {
        self.density.unwrap_or(config.default_density)
    }

    pub fn is_sensor(&self, config: &PhysicsConfig) -> bool {
        self.is_sensor.unwrap_or(config.default_is_sensor)
    }

    /// Layers from the group and mask fields, or the config default when
    /// both are empty.
    pub fn collision_layers(&self, config: &PhysicsConfig) -> CollisionLayers {
        if self.collision_groups.is_empty() && self.collision_mask.is_empty() {
            config.default_collision_layers
        } else {
            (config.collision_layers_fn)(&self.collision_groups, &self.collision_mask)
        }
    }
}

/// Body kind of a physics entity.
///
/// Read from a `body_type` enum (or string) field; the LDtk enum values must
/// match the variant names.
#[derive(Reflect, LdtkEnum, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Never moves. Int-grid colliders always use this.
    #[default]
    Static,

    /// Simulated: falls, collides and can be pushed.
    Dynamic,

    /// Moved only by its velocity, e.g. platforms on a path.
    Kinematic,
}

impl BodyType {
    pub fn to_rigid_body(self) -> RigidBody {
        match self {
            BodyType::Static => RigidBody::Static,
            BodyType::Dynamic => RigidBody::Dynamic,
            BodyType::Kinematic => RigidBody::Kinematic,
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy_ldtkmap_core::fields::{FieldValue, FromLdtkFields, LdtkFields};

    use super::*;

    #[test]
    fn test_settings_from_fields() {
        let mut fields = LdtkFields::default();
        fields.insert("body_type", FieldValue::Enum("Kinematic".into()));
        fields.insert("friction", FieldValue::Float(0.8));
        fields.insert("density", FieldValue::Null);
        fields.insert("collision_groups", FieldValue::String("player".into()));
        fields.insert("health", FieldValue::Int(3));

        let settings = PhysicsSettings::from_ldtk_fields(&fields).unwrap();
        let config = PhysicsConfig::default();

        assert_eq!(settings.body_type, Some(BodyType::Kinematic));
        assert_eq!(settings.friction(&config), 0.8);
        assert_eq!(settings.density(&config), config.default_density);
        assert_eq!(settings.collision_groups, "player");
        assert!(!settings.lock_rotation);
    }

    #[test]
    fn test_body_type_resolution() {
        let config = PhysicsConfig::default().with_entity_body("Crate", BodyType::Dynamic);
        let settings = PhysicsSettings::default();

        assert_eq!(
            settings.resolve_body_type("Crate", &config),
            Some(BodyType::Dynamic)
        );
        assert_eq!(settings.resolve_body_type("Coin", &config), None);

        let settings = PhysicsSettings {
            body_type: Some(BodyType::Static),
            ..default()
        };
        assert_eq!(
            settings.resolve_body_type("Crate", &config),
            Some(BodyType::Static)
        );
    }

    #[test]
    fn test_invalid_body_type() {
        let mut fields = LdtkFields::default();
        fields.insert("body_type", FieldValue::String("Floaty".into()));

        assert!(PhysicsSettings::from_ldtk_fields(&fields).is_err());
    }

    #[test]
    fn test_to_rigid_body() {
        assert_eq!(BodyType::Dynamic.to_rigid_body(), RigidBody::Dynamic);
        assert_eq!(BodyType::default().to_rigid_body(), RigidBody::Static);
    }
}
