//! Plugin for `Avian2D` physics integration.

use bevy::prelude::*;

use crate::config::PhysicsConfig;
use crate::entities;
use crate::int_grid;

/// Plugin that integrates `Avian2D` physics with `bevy_ldtkmap`.
///
/// This plugin:
/// - Registers the [`PhysicsConfig`] resource for global configuration
/// - Adds observers for entity collider generation
/// - Optionally adds observers for int-grid collider generation (if enabled)
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_avian::{LdtkAvianPlugin, PhysicsConfig};
/// use avian2d::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(PhysicsPlugins::default())
///     .add_plugins(LdtkAvianPlugin::default())
///     .run();
/// ```
///
/// # Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_avian::{LdtkAvianPlugin, PhysicsConfig, TileColliderStrategy};
///
/// App::new()
///     .add_plugins(LdtkAvianPlugin::new(
///         PhysicsConfig::default()
///             .with_default_friction(0.3)
///             .with_tile_collider_strategy(TileColliderStrategy::PerCell),
///     ))
///     .run();
/// ```
#[derive(Default)]
pub struct LdtkAvianPlugin {
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl LdtkAvianPlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for LdtkAvianPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        app.register_type::<crate::properties::PhysicsSettings>();
        app.register_type::<crate::properties::BodyType>();

        app.add_observer(entities::on_entity_spawned);

        if self.config.enable_int_grid_colliders {
            app.add_observer(int_grid::on_int_grid_layer_spawned);
        }

        info!("LdtkAvianPlugin initialized");
    }
}
