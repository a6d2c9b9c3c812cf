//! Global physics configuration and defaults.

use std::collections::HashMap;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::properties::BodyType;

/// Collider defaults and generation switches, inserted by `LdtkAvianPlugin`.
///
/// Applies to every collider built from LDtk levels. Entity fields (see
/// [`PhysicsSettings`](crate::PhysicsSettings)) override the defaults per instance.
///
/// # Example
///
/// ```rust,ignore
/// use avian2d::prelude::*;
/// use bevy::prelude::*;
/// use bevy_ldtkmap_avian::{BodyType, LdtkAvianPlugin, PhysicsConfig};
///
/// // `collision_groups` / `collision_mask` fields hold group names like "hero,pickup"
/// fn groups_from_names(names: &str) -> LayerMask {
///     names
///         .split(',')
///         .map(|name| match name.trim() {
///             "hero" => LayerMask(1 << 0),
///             "terrain" => LayerMask(1 << 1),
///             "pickup" => LayerMask(1 << 2),
///             _ => LayerMask::NONE,
///         })
///         .fold(LayerMask::NONE, |acc, mask| acc | mask)
/// }
///
/// fn layers_from_fields(groups: &str, mask: &str) -> CollisionLayers {
///     CollisionLayers::new(groups_from_names(groups), groups_from_names(mask))
/// }
///
/// App::new()
///     .add_plugins(LdtkAvianPlugin::new(
///         PhysicsConfig::default()
///             .with_default_friction(0.3)
///             .with_collision_layers_fn(layers_from_fields)
///             .with_solid_values([1, 2])
///             .with_entity_body("Hero", BodyType::Dynamic),
///     ))
///     .run();
/// ```
#[derive(Resource, Clone)]
pub struct PhysicsConfig {
    /// Friction when the entity has no `friction` field.
    ///
    /// Default: `0.5`
    pub default_friction: f32,

    /// Bounciness when the entity has no `restitution` field.
    ///
    /// Default: `0.0`
    pub default_restitution: f32,

    /// Collider density when the entity has no `density` field.
    ///
    /// Default: `1.0`
    pub default_density: f32,

    /// Whether entity colliders are sensors when `is_sensor` isn't set.
    ///
    /// Default: `false`
    pub default_is_sensor: bool,

    /// Default collision layers for colliders without explicit collision groups.
    ///
    /// Default: [`CollisionLayers::default()`]
    pub default_collision_layers: CollisionLayers,

    /// Turns the `collision_groups` and `collision_mask` field strings into `CollisionLayers`.
    ///
    /// Called with the `collision_groups` and `collision_mask` entity fields,
    /// e.g. `("player,friendly", "ground,enemies")`.
    pub collision_layers_fn: fn(&str, &str) -> CollisionLayers,

    /// Body type per LDtk entity identifier.
    ///
    /// Entities listed here get a collider even without a `body_type` field.
    /// A `body_type` field on the instance takes precedence.
    pub entity_bodies: HashMap<String, BodyType>,

    /// Enable collider generation for int-grid layers.
    ///
    /// Default: `true`
    pub enable_int_grid_colliders: bool,

    /// Which int-grid cells are solid.
    pub int_grid: IntGridColliderConfig,

    /// Strategy for generating int-grid colliders.
    ///
    /// Default: [`TileColliderStrategy::CompoundMerged`]
    pub tile_collider_strategy: TileColliderStrategy,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            default_friction: 0.5,
            default_restitution: 0.0,
            default_density: 1.0,
            default_is_sensor: false,
            default_collision_layers: CollisionLayers::default(),
            collision_layers_fn: default_collision_layers_fn,
            entity_bodies: HashMap::new(),
            enable_int_grid_colliders: true,
            int_grid: IntGridColliderConfig::default(),
            tile_collider_strategy: TileColliderStrategy::CompoundMerged,
        }
    }
}

/// Ignores the field strings.
fn default_collision_layers_fn(_groups: &str, _mask: &str) -> CollisionLayers {
    CollisionLayers::default()
}

impl PhysicsConfig {
    /// Builder method: Set default friction.
    pub fn with_default_friction(mut self, friction: f32) -> Self {
        self.default_friction = friction;
        self
    }

    /// Builder method: Set default restitution.
    pub fn with_default_restitution(mut self, restitution: f32) -> Self {
        self.default_restitution = restitution;
        self
    }

    /// Builder method: Set default density.
    pub fn with_default_density(mut self, density: f32) -> Self {
        self.default_density = density;
        self
    }

    /// Builder method: Set default sensor flag.
    pub fn with_default_is_sensor(mut self, is_sensor: bool) -> Self {
        self.default_is_sensor = is_sensor;
        self
    }

    /// Builder method: Set default collision layers.
    pub fn with_default_collision_layers(mut self, collision_layers: CollisionLayers) -> Self {
        self.default_collision_layers = collision_layers;
        self
    }

    /// Builder method: Set collision layers conversion function.
    pub fn with_collision_layers_fn(
        mut self,
        collision_layers_fn: fn(&str, &str) -> CollisionLayers,
    ) -> Self {
        self.collision_layers_fn = collision_layers_fn;
        self
    }

    /// Builder method: Give every entity with this identifier a body.
    pub fn with_entity_body(mut self, identifier: impl Into<String>, body_type: BodyType) -> Self {
        self.entity_bodies.insert(identifier.into(), body_type);
        self
    }

    /// Builder method: Enable or disable int-grid colliders.
    pub fn with_int_grid_colliders(mut self, enable: bool) -> Self {
        self.enable_int_grid_colliders = enable;
        self
    }

    /// Builder method: Only treat these int-grid values as solid.
    pub fn with_solid_values(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.int_grid.solid_values = Some(values.into_iter().collect());
        self
    }

    /// Builder method: Only generate colliders for these int-grid layers.
    pub fn with_int_grid_layers(
        mut self,
        identifiers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.int_grid.layers = Some(identifiers.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method: Set int-grid collider strategy.
    pub fn with_tile_collider_strategy(mut self, strategy: TileColliderStrategy) -> Self {
        self.tile_collider_strategy = strategy;
        self
    }
}

/// Selects the int-grid cells that become colliders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntGridColliderConfig {
    /// Solid values. `None` treats every non-zero value as solid.
    pub solid_values: Option<Vec<i32>>,

    /// Layer identifiers to generate colliders for. `None` means every int-grid layer.
    pub layers: Option<Vec<String>>,
}

impl IntGridColliderConfig {
    /// Whether a cell with this value is solid.
    pub fn is_solid(&self, value: i32) -> bool {
        match &self.solid_values {
            Some(values) => values.contains(&value),
            None => value != 0,
        }
    }

    /// Whether colliders are generated for this layer.
    pub fn applies_to(&self, layer_identifier: &str) -> bool {
        self.layers
            .as_ref()
            .is_none_or(|layers| layers.iter().any(|layer| layer == layer_identifier))
    }
}

/// How solid int-grid cells become colliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileColliderStrategy {
    /// One child entity with a square collider per solid cell, named
    /// `Collision (col, row)`. Lets gameplay code despawn single cells.
    PerCell,

    /// Cells merged into as few rectangles as possible, attached to the layer
    /// entity as one compound collider.
    CompoundMerged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_values() {
        let all = IntGridColliderConfig::default();
        assert!(all.is_solid(1));
        assert!(all.is_solid(-3));
        assert!(!all.is_solid(0));

        let config = PhysicsConfig::default().with_solid_values([1, 3]);
        assert!(config.int_grid.is_solid(3));
        assert!(!config.int_grid.is_solid(2));
    }

    #[test]
    fn test_layer_filter() {
        assert!(IntGridColliderConfig::default().applies_to("Anything"));

        let config = PhysicsConfig::default().with_int_grid_layers(["Collisions"]);
        assert!(config.int_grid.applies_to("Collisions"));
        assert!(!config.int_grid.applies_to("Water"));
    }

    #[test]
    fn test_builders() {
        let config = PhysicsConfig::default()
            .with_default_friction(0.1)
            .with_entity_body("Crate", BodyType::Dynamic)
            .with_tile_collider_strategy(TileColliderStrategy::PerCell);

        assert_eq!(config.default_friction, 0.1);
        assert_eq!(config.entity_bodies.get("Crate"), Some(&BodyType::Dynamic));
        assert_eq!(config.tile_collider_strategy, TileColliderStrategy::PerCell);
    }
}
